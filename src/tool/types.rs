use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const WEATHER_TOOL_NAME: &str = "get-weather";
pub const WEATHER_TOOL_DESCRIPTION: &str = "Gets weather information of a particular city";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolMessage {
    pub role: String,
    pub content: String,
}

impl ToolMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: Function,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl Tool {
    /// The `get-weather` function tool, taking a single required `city`.
    pub fn weather() -> Self {
        Self {
            tool_type: "function".to_string(),
            function: Function {
                name: WEATHER_TOOL_NAME.to_string(),
                description: WEATHER_TOOL_DESCRIPTION.to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "city": {
                            "type": "string",
                            "description": "The city name"
                        }
                    },
                    "required": ["city"]
                }),
            },
        }
    }
}

/// Options forwarded to the tool runner with every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRunConfig {
    /// Reject malformed tool outputs.
    pub strict_validation: bool,
    /// Cap on chained tool invocations.
    pub max_recursive_tool_runs: u32,
    pub stream_final_response: bool,
    pub verbose: bool,
}

impl Default for ToolRunConfig {
    fn default() -> Self {
        Self {
            strict_validation: true,
            max_recursive_tool_runs: 1,
            stream_final_response: false,
            verbose: true,
        }
    }
}

/// Structured request handed to a [`WeatherToolClient`](super::WeatherToolClient).
///
/// Serializes to the `{messages, tools, config}` body of the bridge's
/// `/run-tool` endpoint. `city` is kept alongside for transports that pass
/// tool arguments directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherToolRequest {
    #[serde(skip)]
    pub city: String,
    pub messages: Vec<ToolMessage>,
    pub tools: Vec<Tool>,
    pub config: ToolRunConfig,
}

impl WeatherToolRequest {
    pub fn for_city(city: impl Into<String>) -> Self {
        let city = city.into();
        Self {
            messages: vec![ToolMessage::user(format!(
                "Get the weather information for {city}"
            ))],
            tools: vec![Tool::weather()],
            config: ToolRunConfig::default(),
            city,
        }
    }

    pub fn tool_name(&self) -> &str {
        self.tools
            .first()
            .map(|tool| tool.function.name.as_str())
            .unwrap_or(WEATHER_TOOL_NAME)
    }
}

/// Weather reading consumed by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub temperature_c: f64,
    pub condition: String,
    pub wind_kph: f64,
}

/// Wire shape returned by the `get-weather` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherPayload {
    #[serde(default)]
    pub location: Option<PayloadLocation>,
    pub current: CurrentWeather,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadLocation {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temp_c: f64,
    pub wind_kph: f64,
    pub condition: WeatherCondition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub text: String,
}

impl WeatherPayload {
    pub fn into_snapshot(self, city: &str, strict: bool) -> Result<WeatherSnapshot> {
        let current = self.current;

        if strict {
            if current.condition.text.trim().is_empty() {
                return Err(Error::collaborator(
                    "weather payload has an empty condition text",
                ));
            }
            if !current.temp_c.is_finite() || !current.wind_kph.is_finite() {
                return Err(Error::collaborator(
                    "weather payload has a non-numeric temperature or wind speed",
                ));
            }
        }

        let city = match self.location {
            Some(location) if !location.name.is_empty() => location.name,
            _ => city.to_string(),
        };

        Ok(WeatherSnapshot {
            city,
            temperature_c: current.temp_c,
            condition: current.condition.text,
            wind_kph: current.wind_kph,
        })
    }
}
