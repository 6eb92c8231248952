use anyhow::Result;
use tracing::{info, warn};

use thoitiet::api::AppState;
use thoitiet::{ThoiTietConfig, VERSION, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ThoiTietConfig::load()?;
    telemetry::init(&config.logging)?;

    info!("Starting ThoiTiet backend v{}", VERSION);
    if config.weather.is_configured() {
        info!("WeatherAPI key configured");
    } else {
        warn!("WeatherAPI key not configured; weather requests will be rejected by the provider");
    }

    let state = AppState::from_config(&config)?;
    web::run(&config.server, state).await
}
