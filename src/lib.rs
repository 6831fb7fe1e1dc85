//! vaultbind - Bind HashiCorp Vault credentials to job environments.
//!
//! A binding takes a stored credential id and a vault endpoint, logs in once,
//! and hands the job a map of variables: the address, the namespace, and a
//! short-lived token. The token is never persisted or logged.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── run           # Run a command with bound variables
//! │   ├── check         # Validate config without contacting vault
//! │   ├── variables     # List declared variable names
//! │   ├── kinds         # List registered binding/credential kinds
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── binding/      # Binding trait, vault-token and secret-text kinds
//!     ├── client/       # ClientFactory/ClientHandle traits, vaultrs client
//!     ├── credential/   # Credential trait, builtin kinds, credential store
//!     ├── config        # .vaultbind.toml management
//!     ├── context       # Cancellation and tracing span for one bind
//!     ├── endpoint      # Validated address + namespace
//!     ├── job           # Bind every binding of a job step
//!     ├── registry      # Kind id -> factory + label
//!     └── variables     # Output variable map
//! ```
//!
//! # Example
//!
//! ```no_run
//! use vaultbind::core::binding::{Binding, VaultTokenBinding};
//! use vaultbind::core::client::VaultrsFactory;
//! use vaultbind::core::context::BindContext;
//! use vaultbind::core::credential::{MemoryStore, StaticToken};
//!
//! # fn main() -> vaultbind::error::Result<()> {
//! let store = MemoryStore::new().with("vault-static-1", StaticToken::new("s.abc123")?)?;
//! let binding = VaultTokenBinding::new("vault-static-1", "https://vault.example:8200", "team-a");
//!
//! let vars = binding.bind(&BindContext::new(), &store, &VaultrsFactory::new())?;
//! assert_eq!(vars.get("VAULT_NAMESPACE"), Some("team-a"));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
