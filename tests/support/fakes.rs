//! In-process fakes for the vault client.
//!
//! `FakeFactory` counts how often a client is built and records every
//! exchange that reaches the fake server, so tests can assert which steps of
//! a bind ran and what each credential sent.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use vaultbind::core::client::{ClientFactory, ClientHandle, Exchange, Token};
use vaultbind::core::context::BindContext;
use vaultbind::core::endpoint::Endpoint;
use vaultbind::error::{AuthError, Error, Result};

/// How the fake server answers an exchange.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Accept: echo a looked-up token, or issue `login_token` for logins.
    Accept { login_token: String },
    /// Reject every exchange with 403.
    Reject,
}

/// An exchange as the fake server received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    LookupSelf {
        token: String,
    },
    AppRole {
        mount: String,
        role_id: String,
        secret_id: String,
    },
    Kubernetes {
        mount: String,
        role: String,
        jwt: String,
    },
}

impl From<&Exchange<'_>> for Sent {
    fn from(exchange: &Exchange<'_>) -> Self {
        match *exchange {
            Exchange::LookupSelf { token } => Sent::LookupSelf {
                token: token.to_string(),
            },
            Exchange::AppRole {
                mount,
                role_id,
                secret_id,
            } => Sent::AppRole {
                mount: mount.to_string(),
                role_id: role_id.to_string(),
                secret_id: secret_id.to_string(),
            },
            Exchange::Kubernetes { mount, role, jwt } => Sent::Kubernetes {
                mount: mount.to_string(),
                role: role.to_string(),
                jwt: jwt.to_string(),
            },
        }
    }
}

/// Client factory recording every build and exchange.
#[derive(Debug)]
pub struct FakeFactory {
    outcome: Outcome,
    builds: AtomicUsize,
    sent: Arc<Mutex<Vec<Sent>>>,
    endpoints: Mutex<Vec<Endpoint>>,
}

impl FakeFactory {
    pub fn accepting() -> Self {
        Self::new(Outcome::Accept {
            login_token: "s.login".to_string(),
        })
    }

    pub fn rejecting() -> Self {
        Self::new(Outcome::Reject)
    }

    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            builds: AtomicUsize::new(0),
            sent: Arc::new(Mutex::new(Vec::new())),
            endpoints: Mutex::new(Vec::new()),
        }
    }

    /// Number of client handles built.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    /// Number of exchanges sent to the fake server.
    pub fn exchanges(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Exchanges sent to the fake server, in order.
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Endpoints clients were built for, in order.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.endpoints.lock().unwrap().clone()
    }
}

impl ClientFactory for FakeFactory {
    fn build(&self, endpoint: &Endpoint) -> Result<Box<dyn ClientHandle>> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        self.endpoints.lock().unwrap().push(endpoint.clone());
        Ok(Box::new(FakeClient {
            endpoint: endpoint.clone(),
            outcome: self.outcome.clone(),
            sent: Arc::clone(&self.sent),
        }))
    }
}

struct FakeClient {
    endpoint: Endpoint,
    outcome: Outcome,
    sent: Arc<Mutex<Vec<Sent>>>,
}

impl ClientHandle for FakeClient {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn authenticate(&self, exchange: &Exchange<'_>, ctx: &BindContext) -> Result<Token> {
        if ctx.is_cancelled() {
            return Err(Error::Cancelled);
        }
        self.sent.lock().unwrap().push(Sent::from(exchange));

        match (&self.outcome, exchange) {
            (Outcome::Reject, exchange) => Err(AuthError::Rejected {
                method: exchange.method(),
                status: 403,
                reason: "permission denied".to_string(),
            }
            .into()),
            (Outcome::Accept { .. }, Exchange::LookupSelf { token }) => Ok(Token::new(*token)),
            (Outcome::Accept { login_token }, _) => Ok(Token::new(login_token.clone())),
        }
    }
}
