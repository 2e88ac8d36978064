use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default)]
    pub weather_tool: WeatherToolConfig,
    #[serde(default)]
    pub bridge: BridgeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_agent_name")]
    pub name: String,
    #[serde(default = "default_city")]
    pub city: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherToolConfig {
    #[serde(rename = "type", default)]
    pub kind: WeatherToolKind,
    #[serde(default = "default_bridge_url")]
    pub url: String,
    /// Upper bound on one weather call. Unset means wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub mcp: Option<McpServerConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherToolKind {
    #[default]
    Bridge,
    Mcp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServerConfig {
    pub name: String,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub client_type: McpClientType,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    // Stdio specific fields
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum McpClientType {
    Sse,
    StreamableHttp,
    Stdio,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// Nominatim rejects requests without an identifying agent.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            city: default_city(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for WeatherToolConfig {
    fn default() -> Self {
        Self {
            kind: WeatherToolKind::default(),
            url: default_bridge_url(),
            timeout_secs: None,
            headers: HashMap::new(),
            mcp: None,
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_agent_name() -> String {
    "WeatherAgent1".to_string()
}

fn default_city() -> String {
    "Austin".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_bridge_url() -> String {
    "http://localhost:3000/run-tool".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_geocoding_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_user_agent() -> String {
    concat!("weather-agent/", env!("CARGO_PKG_VERSION")).to_string()
}
