//! Constants used throughout vaultbind.
//!
//! Centralizes default variable names, file names, and vault mount points.

/// Job configuration file name (.vaultbind.toml).
pub const CONFIG_FILE: &str = ".vaultbind.toml";

/// Environment variable that overrides the log filter.
pub const LOG_ENV: &str = "VAULTBIND_LOG";

/// Default variable receiving the vault address.
pub const DEFAULT_ADDR_VARIABLE: &str = "VAULT_ADDR";

/// Default variable receiving the vault token.
pub const DEFAULT_TOKEN_VARIABLE: &str = "VAULT_TOKEN";

/// Default variable receiving the vault namespace.
pub const DEFAULT_NAMESPACE_VARIABLE: &str = "VAULT_NAMESPACE";

/// Default mount of the AppRole auth method.
pub const DEFAULT_APPROLE_MOUNT: &str = "approle";

/// Default mount of the Kubernetes auth method.
pub const DEFAULT_KUBERNETES_MOUNT: &str = "kubernetes";

/// Service account token projected into every pod.
pub const DEFAULT_KUBERNETES_JWT_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";
