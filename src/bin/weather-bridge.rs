use anyhow::Result;
use tracing::info;
use weather_agent::{bridge, config, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
        config.bridge.port = port;
    }

    let log_level = match logging::init(&config.logs.level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    info!("Starting weather bridge with log level: {}", log_level);

    bridge::run(config.bridge).await?;

    Ok(())
}
