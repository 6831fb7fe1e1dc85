//! vaultbind - Bind HashiCorp Vault credentials to job environments.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vaultbind::cli::output;
use vaultbind::cli::{execute, Cli};
use vaultbind::core::constants::LOG_ENV;
use vaultbind::error::{ConfigError, Error, LookupError};

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so the child's stdout stays clean
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("vaultbind=debug")
        } else {
            EnvFilter::new("vaultbind=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.config) {
        let suggestion = match &e {
            Error::Config(ConfigError::NotFound(_)) => {
                Some("create .vaultbind.toml or pass --config")
            }
            Error::Lookup(LookupError::NotFound(_)) => {
                Some("check credential_id against the ids in the credentials file")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
