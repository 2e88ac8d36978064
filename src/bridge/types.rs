use crate::tool::{CurrentWeather, ToolMessage, ToolRunConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct RunToolRequest {
    #[serde(default)]
    pub messages: Vec<ToolMessage>,
    /// Left untyped so a non-array value can be answered with a 400.
    #[serde(default)]
    pub tools: Option<Value>,
    #[serde(default)]
    pub config: Option<ToolRunConfig>,
}

impl RunToolRequest {
    /// The tool list, if `tools` is a non-empty array.
    pub fn tool_list(&self) -> Option<&[Value]> {
        self.tools
            .as_ref()
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .filter(|tools| !tools.is_empty())
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tool_list()
            .unwrap_or_default()
            .iter()
            .filter_map(|tool| tool.pointer("/function/name").and_then(Value::as_str))
            .collect()
    }
}

/// Body returned by `get-weather`; the agent side reads it as a `WeatherPayload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: ReportLocation,
    pub current: CurrentWeather,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
