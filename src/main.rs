use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{error, info};
use weather_agent::{agent::Agent, config, logging, tool::create_weather_client};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let mut config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // City: first argument, then WEATHER_CITY, then config
    if let Some(city) = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("WEATHER_CITY").ok())
    {
        config.agent.city = city;
    }

    let log_level = match logging::init(&config.logs.level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    info!("Starting weather agent with log level: {}", log_level);

    let weather_client = create_weather_client(&config.weather_tool).await?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            println!("{}", event);
        }
    });

    let report = Agent::from_config(&config.agent, weather_client)
        .with_event_sender(event_tx)
        .run()
        .await;

    printer.await?;

    if let Some(e) = &report.error {
        error!("Run {} ended without a result: {}", report.run_id, e);
        std::process::exit(1);
    }

    info!(
        "Run {} completed (notified: {})",
        report.run_id,
        report.notified()
    );

    Ok(())
}
