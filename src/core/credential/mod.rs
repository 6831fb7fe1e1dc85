//! Stored credentials and how they authenticate against vault.
//!
//! Every credential kind implements [`Credential`]. Bindings only see the
//! trait; the concrete strategy (pre-issued token, AppRole, Kubernetes, ...)
//! decides which [`Exchange`](crate::core::client::Exchange) it sends.
//!
//! ## Builtin kinds
//!
//! - **token**: pre-issued token, validated with `lookup-self`
//! - **token-file**: token read from a file at bind time
//! - **approle**: role id + secret id login
//! - **kubernetes**: service account JWT login
//! - **secret-text**: plain stored secret, not usable for vault login
//!
//! ## Adding a New Kind
//!
//! 1. Implement the `Credential` trait
//! 2. Add the implementation in a new file (e.g., `github.rs`)
//! 3. Register it in `Registry::builtin`

use std::fmt;

use crate::core::client::{ClientHandle, Token};
use crate::core::context::BindContext;
use crate::error::{AuthError, Result};

mod approle;
mod kubernetes;
mod secret_text;
pub mod store;
mod token;

pub use approle::AppRole;
pub use kubernetes::Kubernetes;
pub use secret_text::SecretText;
pub use store::{CredentialStore, MemoryStore};
pub use token::{StaticToken, TokenFile};

/// What a credential can be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Can produce a vault token through an authentication exchange.
    VaultToken,
    /// Holds a plain secret value.
    SecretText,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VaultToken => f.write_str("vault token"),
            Self::SecretText => f.write_str("secret text"),
        }
    }
}

/// A stored credential.
///
/// Implementations own their secret material and must redact it from
/// `Debug` output.
pub trait Credential: fmt::Debug + Send + Sync {
    /// Registered kind name (e.g., `approle`).
    fn kind(&self) -> &'static str;

    fn capability(&self) -> Capability;

    /// Obtain a vault token with exactly one exchange through `client`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the exchange fails and `Error::Cancelled` if
    /// the context is cancelled.
    fn token(&self, client: &dyn ClientHandle, ctx: &BindContext) -> Result<Token> {
        let _ = (client, ctx);
        Err(AuthError::CredentialUnavailable {
            kind: self.kind(),
            reason: "cannot produce a vault token".to_string(),
        }
        .into())
    }

    /// The stored secret of a `SecretText` credential.
    fn secret(&self) -> Option<&str> {
        None
    }
}
