//! Vault client abstraction.
//!
//! A [`ClientFactory`] turns an [`Endpoint`] into a [`ClientHandle`] without
//! touching the network. The handle performs exactly one authentication
//! [`Exchange`] per call and returns the resulting [`Token`].
//!
//! ## Adding a New Client
//!
//! 1. Implement `ClientFactory` and `ClientHandle`
//! 2. Add the implementation in a new file (e.g., `http.rs`)
//! 3. Re-export from this module

use std::fmt;

use zeroize::Zeroizing;

use crate::core::context::BindContext;
use crate::core::endpoint::Endpoint;
use crate::error::Result;

mod vaultrs;

pub use self::vaultrs::{VaultrsClient, VaultrsFactory};

/// Opaque vault token produced by an authentication exchange.
///
/// Wiped from memory on drop; never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(Zeroizing<String>);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// The raw token value. Callers must not log it.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// One authentication exchange against vault.
///
/// Each variant maps to a single request; the handle never retries.
pub enum Exchange<'a> {
    /// Validate a pre-issued token with `auth/token/lookup-self`.
    LookupSelf { token: &'a str },

    /// Log in with an AppRole role/secret pair.
    AppRole {
        mount: &'a str,
        role_id: &'a str,
        secret_id: &'a str,
    },

    /// Log in with a Kubernetes service account JWT.
    Kubernetes {
        mount: &'a str,
        role: &'a str,
        jwt: &'a str,
    },
}

impl Exchange<'_> {
    /// Auth method name for logs and errors.
    pub fn method(&self) -> &'static str {
        match self {
            Self::LookupSelf { .. } => "token",
            Self::AppRole { .. } => "approle",
            Self::Kubernetes { .. } => "kubernetes",
        }
    }
}

impl fmt::Debug for Exchange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LookupSelf { .. } => f.debug_struct("LookupSelf").finish_non_exhaustive(),
            Self::AppRole { mount, role_id, .. } => f
                .debug_struct("AppRole")
                .field("mount", mount)
                .field("role_id", role_id)
                .finish_non_exhaustive(),
            Self::Kubernetes { mount, role, .. } => f
                .debug_struct("Kubernetes")
                .field("mount", mount)
                .field("role", role)
                .finish_non_exhaustive(),
        }
    }
}

/// A configured, not yet connected vault client.
pub trait ClientHandle {
    /// Endpoint this handle was built for.
    fn endpoint(&self) -> &Endpoint;

    /// Perform one authentication exchange.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if vault rejects the exchange or the request
    /// fails, and `Error::Cancelled` if the context is cancelled first.
    fn authenticate(&self, exchange: &Exchange<'_>, ctx: &BindContext) -> Result<Token>;
}

/// Builds client handles from endpoint configuration.
pub trait ClientFactory {
    /// Build a handle for `endpoint`. Performs no network I/O.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the client cannot be configured.
    fn build(&self, endpoint: &Endpoint) -> Result<Box<dyn ClientHandle>>;
}
