use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Directives appended to the configured level so driver chatter stays out of the log.
const QUIET_DEPENDENCIES: &str = "sqlx=warn,hyper=warn,reqwest=warn";

pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(default_level)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init site-server logging: {e}"))?;

    Ok(())
}

fn default_directives(level: &str) -> String {
    format!("{level},{QUIET_DEPENDENCIES}")
}
