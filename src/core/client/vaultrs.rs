//! Vault client backed by the `vaultrs` crate.
//!
//! The async `vaultrs` calls are driven on a current-thread runtime built for
//! each exchange and raced against the bind context's cancellation token.

use std::time::Duration;

use ::vaultrs::client::{VaultClient, VaultClientSettings, VaultClientSettingsBuilder};
use ::vaultrs::error::ClientError;
use tracing::{debug, trace};

use super::{ClientFactory, ClientHandle, Exchange, Token};
use crate::core::context::BindContext;
use crate::core::endpoint::Endpoint;
use crate::error::{AuthError, ConfigError, Error, Result};

/// Builds [`VaultrsClient`] handles.
#[derive(Debug, Clone)]
pub struct VaultrsFactory {
    timeout: Option<Duration>,
    verify_tls: bool,
}

impl VaultrsFactory {
    /// Factory with no request timeout and TLS verification enabled.
    pub fn new() -> Self {
        Self {
            timeout: None,
            verify_tls: true,
        }
    }

    /// Per-request timeout applied by the HTTP client.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable TLS certificate verification.
    pub fn with_tls_verification(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }
}

impl Default for VaultrsFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientFactory for VaultrsFactory {
    fn build(&self, endpoint: &Endpoint) -> Result<Box<dyn ClientHandle>> {
        let mut builder = VaultClientSettingsBuilder::default();
        builder
            .address(endpoint.address())
            .namespace(endpoint.namespace().map(str::to_string))
            .timeout(self.timeout)
            .verify(self.verify_tls)
            // Never pick up VAULT_TOKEN from our own environment.
            .token("");

        let settings = builder
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        debug!(
            address = %endpoint.address(),
            namespace = endpoint.namespace().unwrap_or(""),
            verify_tls = self.verify_tls,
            "configured vault client"
        );

        Ok(Box::new(VaultrsClient {
            endpoint: endpoint.clone(),
            settings,
        }))
    }
}

/// Client handle holding `vaultrs` settings for one endpoint.
///
/// Connects lazily: nothing is sent until [`ClientHandle::authenticate`].
#[derive(Debug)]
pub struct VaultrsClient {
    endpoint: Endpoint,
    settings: VaultClientSettings,
}

impl VaultrsClient {
    fn client(&self, token: &str, method: &'static str) -> Result<VaultClient> {
        let mut settings = self.settings.clone();
        settings.token = token.to_string();
        VaultClient::new(settings).map_err(|e| transport(method, &e))
    }

    async fn exchange(&self, exchange: &Exchange<'_>) -> Result<Token> {
        let method = exchange.method();
        trace!(method, "sending vault auth request");

        let token = match *exchange {
            Exchange::LookupSelf { token } => {
                let client = self.client(token, method)?;
                ::vaultrs::token::lookup_self(&client)
                    .await
                    .map_err(|e| auth_error(method, e))?;
                token.to_string()
            }
            Exchange::AppRole {
                mount,
                role_id,
                secret_id,
            } => {
                let client = self.client("", method)?;
                ::vaultrs::auth::approle::login(&client, mount, role_id, secret_id)
                    .await
                    .map_err(|e| auth_error(method, e))?
                    .client_token
            }
            Exchange::Kubernetes { mount, role, jwt } => {
                let client = self.client("", method)?;
                ::vaultrs::auth::kubernetes::login(&client, mount, role, jwt)
                    .await
                    .map_err(|e| auth_error(method, e))?
                    .client_token
            }
        };

        if token.is_empty() {
            return Err(AuthError::EmptyToken.into());
        }

        trace!(method, "vault auth request succeeded");
        Ok(Token::new(token))
    }
}

impl ClientHandle for VaultrsClient {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn authenticate(&self, exchange: &Exchange<'_>, ctx: &BindContext) -> Result<Token> {
        if ctx.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let method = exchange.method();
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AuthError::Transport {
                method,
                reason: format!("failed to create runtime: {}", e),
            })?;

        let cancellation = ctx.cancellation().clone();
        rt.block_on(async {
            tokio::select! {
                biased;
                _ = cancellation.cancelled() => {
                    debug!(method, "vault exchange cancelled");
                    Err(Error::Cancelled)
                }
                result = self.exchange(exchange) => result,
            }
        })
    }
}

fn auth_error(method: &'static str, err: ClientError) -> Error {
    match err {
        ClientError::APIError { code, errors } => AuthError::Rejected {
            method,
            status: code,
            reason: if errors.is_empty() {
                "no reason given".to_string()
            } else {
                errors.join("; ")
            },
        }
        .into(),
        other => transport(method, &other),
    }
}

fn transport(method: &'static str, err: &ClientError) -> Error {
    AuthError::Transport {
        method,
        reason: err.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    fn handle(address: &str) -> Box<dyn ClientHandle> {
        let endpoint = Endpoint::new(address, "team-a").unwrap();
        VaultrsFactory::new().build(&endpoint).unwrap()
    }

    #[test]
    fn test_build_is_offline() {
        // Nothing listens here; building must still succeed.
        let handle = handle("https://vault.invalid:8200");
        assert_eq!(handle.endpoint().address(), "https://vault.invalid:8200");
        assert_eq!(handle.endpoint().namespace(), Some("team-a"));
    }

    #[test]
    fn test_cancelled_before_exchange() {
        let handle = handle("http://127.0.0.1:1");
        let ctx = BindContext::new();
        ctx.cancel();

        let err = handle
            .authenticate(&Exchange::LookupSelf { token: "s.abc123" }, &ctx)
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }

    #[test]
    fn test_connection_refused_is_auth_error() {
        let handle = handle("http://127.0.0.1:1");
        let err = handle
            .authenticate(
                &Exchange::LookupSelf { token: "s.abc123" },
                &BindContext::new(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::Transport { .. })), "{:?}", err);
        assert!(!err.to_string().contains("s.abc123"));
    }

    #[test]
    fn test_cancelled_mid_exchange() {
        // Accepts the connection and never answers.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        thread::spawn(move || {
            let _conn = listener.accept();
            thread::sleep(Duration::from_secs(30));
        });

        let handle = handle(&address);
        let ctx = BindContext::new();
        let canceller = ctx.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(200));
            canceller.cancel();
        });

        let err = handle
            .authenticate(
                &Exchange::AppRole {
                    mount: "approle",
                    role_id: "role",
                    secret_id: "secret",
                },
                &ctx,
            )
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled), "{:?}", err);
    }
}
