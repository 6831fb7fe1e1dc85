//! Command-line interface.

pub mod check;
pub mod completions;
pub mod kinds;
pub mod output;
pub mod run;
pub mod variables;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::core::config::Config;
use crate::core::registry::Registry;

/// vaultbind - Bind vault credentials to job environments.
#[derive(Parser)]
#[command(
    name = "vaultbind",
    about = "Bind HashiCorp Vault credentials to job environments",
    version
)]
pub struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Job configuration file
    #[arg(short, long, global = true, env = "VAULTBIND_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Run a command with bound variables injected as env vars
    Run {
        /// Do not mask secret values in the command's output
        #[arg(long)]
        no_mask: bool,
        /// Command and arguments to run
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },

    /// Validate bindings and credentials without contacting vault
    Check,

    /// List the variable names each binding declares
    Variables {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List registered binding and credential kinds
    Kinds,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command, config: Option<PathBuf>) -> crate::error::Result<()> {
    use Command::*;

    let config = config.unwrap_or_else(Config::default_path);
    match command {
        Run { no_mask, command } => run::execute(&config, &command, !no_mask),
        Check => check::execute(&config),
        Variables { json } => variables::execute(&config, json),
        Kinds => kinds::execute(),
        Completions { shell } => completions::execute(shell),
    }
}

/// Load the job configuration together with the builtin registry.
pub(crate) fn load(path: &Path) -> crate::error::Result<(Config, Registry)> {
    Ok((Config::load(path)?, Registry::builtin()))
}
