//! Error types for vaultbind.
//!
//! Every failure of a bind surfaces as a single [`Error`], which keeps the
//! phase that failed (config, lookup, auth, cancellation) and its cause.

use std::path::PathBuf;
use thiserror::Error;

use crate::core::credential::Capability;

/// Top-level error returned by every bind and CLI operation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("credential lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("could not log in to vault: {0}")]
    Auth(#[from] AuthError),

    #[error("cancelled while waiting for vault")]
    Cancelled,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// The step of the bind protocol an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Config,
    Lookup,
    Auth,
    Cancelled,
    Other,
}

impl Error {
    /// Phase of the bind protocol that produced this error.
    pub fn phase(&self) -> Phase {
        match self {
            Self::Config(_) => Phase::Config,
            Self::Lookup(_) => Phase::Lookup,
            Self::Auth(_) => Phase::Auth,
            Self::Cancelled => Phase::Cancelled,
            Self::Io(_) | Self::Other(_) => Phase::Other,
        }
    }
}

/// Static configuration problems, detected before any network activity.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("vault address is empty")]
    EmptyAddress,

    #[error("invalid vault address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("invalid variable name '{name}': {reason}")]
    InvalidVariable { name: String, reason: String },

    #[error("variable '{name}' is declared by more than one binding")]
    VariableCollision { name: String },

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{0}' contains a control character")]
    ControlCharacter(&'static str),

    #[error("unknown {what} kind: {kind}")]
    UnknownKind { what: &'static str, kind: String },

    #[error("{what} kind already registered: {kind}")]
    DuplicateKind { what: &'static str, kind: String },

    #[error("invalid {kind} entry: {reason}")]
    InvalidEntry { kind: String, reason: String },

    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to configure vault client: {0}")]
    Client(String),
}

/// Credential store lookup failures.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("no credential with id '{0}'")]
    NotFound(String),

    #[error("credential '{id}' is a {kind} credential, expected {expected}")]
    WrongCapability {
        id: String,
        kind: &'static str,
        expected: Capability,
    },

    #[error("duplicate credential id '{0}'")]
    DuplicateId(String),
}

/// Failures of the authentication exchange itself.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{method} login rejected ({status}): {reason}")]
    Rejected {
        method: &'static str,
        status: u16,
        reason: String,
    },

    #[error("{method} request failed: {reason}")]
    Transport { method: &'static str, reason: String },

    #[error("{kind} credential unavailable: {reason}")]
    CredentialUnavailable { kind: &'static str, reason: String },

    #[error("vault returned an empty token")]
    EmptyToken,
}

pub type Result<T> = std::result::Result<T, Error>;
