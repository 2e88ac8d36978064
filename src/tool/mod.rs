mod bridge;
mod client;
mod mcp;
mod types;

pub use bridge::BridgeWeatherClient;
pub use client::{WeatherToolClient, create_weather_client};
pub use mcp::{McpWeatherClient, snapshot_from_tool_result};
pub use types::{
    CurrentWeather, Function, PayloadLocation, Tool, ToolMessage, ToolRunConfig,
    WEATHER_TOOL_DESCRIPTION, WEATHER_TOOL_NAME, WeatherCondition, WeatherPayload,
    WeatherSnapshot, WeatherToolRequest,
};
