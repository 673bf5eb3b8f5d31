use std::sync::Arc;

use aqb_core::{app::AirQualityService, config::Config};
use aqb_sources::{HttpAirQualitySource, SourceConfig};

#[tokio::main]
async fn main() -> Result<(), aqb_core::Error> {
    aqb_core::logging::init("aqb")?;

    let cfg = match Config::load() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return Err(e);
        }
    };

    let source = Arc::new(HttpAirQualitySource::new(SourceConfig::from_config(&cfg))?);
    let service = Arc::new(AirQualityService::new(
        source,
        cfg.jakarta_stations.clone(),
    ));

    aqb_telegram::router::run_polling(cfg, service)
        .await
        .map_err(|e| aqb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
