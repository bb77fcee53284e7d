use crate::{
    cli::telemetry,
    model::Validator,
    signup,
    store::{MemoryUserStore, PgUserStore, UserStore},
};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{error, info, warn};
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub host: String,
    pub port: u16,
    pub dsn: Option<SecretString>,
    pub max_connections: u32,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database cannot be prepared or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let result = match open_store(&args).await {
        Ok(store) => signup::new(&args.host, args.port, store, Validator::system()).await,
        Err(err) => {
            error!("Failed to prepare the user store: {err:#}");
            Err(err)
        }
    };

    telemetry::shutdown_tracer();

    result
}

async fn open_store(args: &Args) -> Result<Arc<dyn UserStore>> {
    let Some(dsn) = &args.dsn else {
        warn!("No DSN configured, users are kept in memory and lost on restart");
        return Ok(Arc::new(MemoryUserStore::new()));
    };

    let store = PgUserStore::connect(dsn.expose_secret(), args.max_connections).await?;
    store
        .migrate()
        .await
        .context("Failed to create the users table")?;

    Ok(Arc::new(store))
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("{}:{}", args.host, args.port)),
        (
            "dsn",
            args.dsn.as_ref().map_or_else(
                || "none (in-memory store)".to_string(),
                |dsn| redact_dsn(dsn.expose_secret()),
            ),
        ),
        ("max_connections", args.max_connections.to_string()),
    ];
    log_entries("Startup configuration", &entries);
}

fn redact_dsn(dsn: &str) -> String {
    match Url::parse(dsn) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("REDACTED"));
            }
            parsed.to_string()
        }
        Err(_) => "invalid-dsn".to_string(),
    }
}

fn log_entries(title: &str, entries: &[(&str, String)]) {
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!("{}\n\n{title}:", banner());
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        message.push_str(&format!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn banner() -> String {
    let short_hash = short_commit(crate::GIT_COMMIT_HASH);
    BANNER.replace(
        "{VERSION}",
        &format!(" - {} - {}", env!("CARGO_PKG_VERSION"), short_hash),
    )
}

fn short_commit(hash: &str) -> String {
    let trimmed = hash.trim();
    if trimmed.len() > 7 {
        trimmed[..7].to_string()
    } else {
        trimmed.to_string()
    }
}

const BANNER: &str = r"
  +-----------------+
  |  user  ___      |
  |  name |___|     |
  |  pass |***|     |
  +-----------------+  U S E R S I G N U P {VERSION}";
