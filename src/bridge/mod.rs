mod handlers;
mod types;
mod weather;

pub use handlers::{AppState, extract_city};
pub use types::{ErrorResponse, ReportLocation, RunToolRequest, WeatherReport};
pub use weather::{WeatherService, describe_weather_code};

use crate::{Result, config::BridgeConfig};
use axum::{
    Router,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/run-tool", post(handlers::run_tool))
        .route("/health", get(handlers::health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

pub async fn run(config: BridgeConfig) -> Result<()> {
    let weather = WeatherService::new(&config)?;
    let app = router(AppState {
        weather: Arc::new(weather),
    });

    let addr = SocketAddr::new(config.host.parse()?, config.port);

    info!("Starting weather bridge on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
