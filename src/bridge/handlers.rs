use super::{
    types::{ErrorResponse, RunToolRequest, WeatherReport},
    weather::WeatherService,
};
use crate::tool::ToolMessage;
use axum::{extract::State, http::StatusCode, response::Json};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, error, info};

static CITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^.*\bfor\s+(.+?)[\s.!?]*$").expect("valid city pattern"));

#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<WeatherService>,
}

pub async fn run_tool(
    State(state): State<AppState>,
    Json(request): Json<RunToolRequest>,
) -> Result<Json<WeatherReport>, (StatusCode, Json<ErrorResponse>)> {
    if request.tool_list().is_none() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Tools parameter must be a non-empty array".to_string(),
            }),
        ));
    }

    let city = extract_city(&request.messages);
    info!(
        "Received run-tool request for {} (tools: {:?})",
        city,
        request.tool_names()
    );
    if let Some(config) = &request.config {
        debug!("Tool run config: {:?}", config);
    }

    match state.weather.get_weather(&city).await {
        Ok(report) => {
            debug!("get-weather tool result: {:?}", report);
            Ok(Json(report))
        }
        Err(e) => {
            error!("get-weather failed for {}: {}", city, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

pub async fn health() -> &'static str {
    "ok"
}

/// Takes the city from the last message: whatever follows the final "for"
/// on the last line that has one.
pub fn extract_city(messages: &[ToolMessage]) -> String {
    messages
        .last()
        .and_then(|message| {
            message
                .content
                .lines()
                .rev()
                .filter_map(|line| CITY_PATTERN.captures(line.trim()))
                .filter_map(|captures| captures.get(1))
                .map(|city| city.as_str().trim())
                .find(|city| !city.is_empty())
        })
        .map(str::to_string)
        .unwrap_or_else(|| "Unknown".to_string())
}
