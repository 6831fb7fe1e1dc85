//! Vault endpoint description.
//!
//! An [`Endpoint`] is the validated address and optional namespace a client
//! is built from. It is constructed per bind and never outlives it.

use url::Url;

use crate::core::validation::require_header_safe;
use crate::error::{ConfigError, Result};

/// Validated address and namespace of a vault server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    address: Url,
    namespace: Option<String>,
}

impl Endpoint {
    /// Parse and validate an endpoint.
    ///
    /// A blank namespace means the root scope.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyAddress` for a blank address and
    /// `ConfigError::InvalidAddress` when the address is not an absolute
    /// http(s) URL with a host, and `ConfigError::ControlCharacter` for a
    /// namespace that cannot be sent as a request header.
    pub fn new(address: &str, namespace: &str) -> Result<Self> {
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyAddress.into());
        }

        let invalid = |reason: String| ConfigError::InvalidAddress {
            address: address.to_string(),
            reason,
        };

        let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(invalid(format!("unsupported scheme '{}'", other)).into()),
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("missing host".to_string()).into());
        }

        let namespace = namespace.trim();
        require_header_safe("namespace", namespace)?;
        Ok(Self {
            address: url,
            namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
        })
    }

    /// Base address handed to the client, without a trailing slash.
    pub fn address(&self) -> &str {
        self.address.as_str().trim_end_matches('/')
    }

    /// Parsed base URL.
    pub fn url(&self) -> &Url {
        &self.address
    }

    /// Namespace, or `None` for the root scope.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}
