use crate::{errors::Error, Result};

/// Initialize tracing for the bot.
///
/// `RUST_LOG` overrides the default filter.
pub fn init(service_name: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    // Default: info for our crates, warn for everything else.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(service_name));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .try_init()
        .map_err(|e| Error::External(format!("failed to install tracing subscriber: {e}")))
}

fn default_filter(service_name: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::new(format!(
        "warn,aqb_core=info,aqb_sources=info,aqb_telegram=info,{service_name}=info"
    ))
}
