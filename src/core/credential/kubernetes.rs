//! Kubernetes service account credentials.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use zeroize::Zeroizing;

use super::{Capability, Credential};
use crate::core::client::{ClientHandle, Exchange, Token};
use crate::core::constants;
use crate::core::context::BindContext;
use crate::core::validation::require;
use crate::error::{AuthError, Result};

/// Logs in with the pod's service account JWT, read at bind time.
#[derive(Debug)]
pub struct Kubernetes {
    role: String,
    mount: String,
    jwt_path: PathBuf,
}

#[derive(Deserialize)]
struct KubernetesEntry {
    role: String,
    #[serde(default)]
    mount: Option<String>,
    #[serde(default)]
    jwt_path: Option<PathBuf>,
}

impl Kubernetes {
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if the role is blank.
    pub fn new(role: impl Into<String>) -> Result<Self> {
        let role = role.into();
        require("role", &role)?;
        Ok(Self {
            role,
            mount: constants::DEFAULT_KUBERNETES_MOUNT.to_string(),
            jwt_path: PathBuf::from(constants::DEFAULT_KUBERNETES_JWT_PATH),
        })
    }

    pub fn with_mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = mount.into();
        self
    }

    pub fn with_jwt_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.jwt_path = path.into();
        self
    }

    pub fn jwt_path(&self) -> &Path {
        &self.jwt_path
    }

    pub(crate) fn from_table(table: &toml::Table) -> Result<Box<dyn Credential>> {
        let entry: KubernetesEntry = crate::core::registry::decode("kubernetes", table)?;
        let mut cred = Self::new(entry.role)?;
        if let Some(mount) = entry.mount.filter(|m| !m.trim().is_empty()) {
            cred = cred.with_mount(mount.trim());
        }
        if let Some(path) = entry.jwt_path {
            cred = cred.with_jwt_path(path);
        }
        Ok(Box::new(cred))
    }

    fn read_jwt(&self) -> Result<Zeroizing<String>> {
        let unavailable = |reason: String| AuthError::CredentialUnavailable {
            kind: "kubernetes",
            reason,
        };
        let jwt = Zeroizing::new(
            std::fs::read_to_string(&self.jwt_path)
                .map_err(|e| unavailable(format!("{}: {}", self.jwt_path.display(), e)))?,
        );
        let jwt = Zeroizing::new(jwt.trim().to_string());
        if jwt.is_empty() {
            return Err(unavailable(format!("{} is empty", self.jwt_path.display())).into());
        }
        Ok(jwt)
    }
}

impl Credential for Kubernetes {
    fn kind(&self) -> &'static str {
        "kubernetes"
    }

    fn capability(&self) -> Capability {
        Capability::VaultToken
    }

    fn token(&self, client: &dyn ClientHandle, ctx: &BindContext) -> Result<Token> {
        debug!(role = %self.role, mount = %self.mount, "reading service account token");
        let jwt = self.read_jwt()?;
        client.authenticate(
            &Exchange::Kubernetes {
                mount: &self.mount,
                role: &self.role,
                jwt: &jwt,
            },
            ctx,
        )
    }
}
