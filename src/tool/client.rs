use super::types::{WeatherSnapshot, WeatherToolRequest};
use super::{bridge::BridgeWeatherClient, mcp::McpWeatherClient};
use crate::{
    Error, Result,
    config::{WeatherToolConfig, WeatherToolKind},
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;
use tracing::info;

/// The capability the agent needs from the outside world: one weather lookup.
///
/// Any failure (transport, provider, malformed output, timeout) is reported
/// as [`Error::Collaborator`].
#[async_trait]
pub trait WeatherToolClient: Send + Sync {
    async fn fetch_weather(&self, request: &WeatherToolRequest) -> Result<WeatherSnapshot>;
}

pub async fn create_weather_client(
    config: &WeatherToolConfig,
) -> Result<Box<dyn WeatherToolClient>> {
    match config.kind {
        WeatherToolKind::Bridge => {
            info!("Using weather bridge at {}", config.url);
            Ok(Box::new(BridgeWeatherClient::new(config)?))
        }
        WeatherToolKind::Mcp => {
            let mcp = config.mcp.as_ref().ok_or_else(|| {
                Error::config("weather_tool.type 'mcp' requires a 'mcp' section")
            })?;
            info!("Using MCP weather server '{}'", mcp.name);
            Ok(Box::new(
                McpWeatherClient::connect(mcp, config.timeout_secs).await?,
            ))
        }
    }
}

pub(crate) fn build_headers(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut header_map = HeaderMap::new();
    for (key, value) in headers {
        let header_name: HeaderName = key
            .parse()
            .map_err(|e| Error::config(format!("Invalid header name '{}': {}", key, e)))?;
        let header_value: HeaderValue = value
            .parse()
            .map_err(|e| Error::config(format!("Invalid header value for '{}': {}", key, e)))?;
        header_map.insert(header_name, header_value);
    }
    Ok(header_map)
}
