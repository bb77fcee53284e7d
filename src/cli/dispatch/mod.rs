//! Maps parsed CLI arguments to the action the binary runs.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{database, ARG_HOST, ARG_PORT};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use url::Url;

/// Build the server action from validated matches.
///
/// # Errors
/// Returns an error if the DSN is not a `postgres://` URL.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let host = matches
        .get_one::<String>(ARG_HOST)
        .cloned()
        .unwrap_or_else(|| "::".to_string());
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let max_connections = matches
        .get_one::<u32>(database::ARG_MAX_CONNECTIONS)
        .copied()
        .unwrap_or(5);

    let dsn = match matches.get_one::<String>(database::ARG_DSN) {
        Some(dsn) if !dsn.trim().is_empty() => {
            let parsed = Url::parse(dsn).context("invalid USERSIGNUP_DSN")?;
            if !matches!(parsed.scheme(), "postgres" | "postgresql") {
                return Err(anyhow!(
                    "unsupported DSN scheme '{}', expected postgres://",
                    parsed.scheme()
                ));
            }
            Some(SecretString::from(dsn.clone()))
        }
        _ => None,
    };

    Ok(Action::Server(Args {
        host,
        port,
        dsn,
        max_connections,
    }))
}
