//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A registered binding or credential kind (e.g., `vault-token`, `approle`).
///
/// Matches the `kind` key of a binding or credential table.
pub type KindId = &'static str;
