use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::fs;
use weather_agent::{
    Result,
    config::{BridgeConfig, WeatherToolConfig},
    tool::WeatherSnapshot,
};

/// Build a snapshot the way the fetch step would store it
pub fn snapshot(city: &str, temp_c: f64, condition: &str, wind_kph: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        city: city.to_string(),
        temperature_c: temp_c,
        condition: condition.to_string(),
        wind_kph,
    }
}

/// Bridge response body for the given reading
pub fn weather_payload(city: &str, temp_c: f64, condition: &str, wind_kph: f64) -> Value {
    json!({
        "location": {"name": city, "lat": 30.27, "lon": -97.74},
        "current": {
            "temp_c": temp_c,
            "wind_kph": wind_kph,
            "condition": {"text": condition}
        }
    })
}

/// Weather tool config pointing at a bridge URL
pub fn bridge_tool_config(url: String) -> WeatherToolConfig {
    WeatherToolConfig {
        url,
        ..Default::default()
    }
}

/// Bridge config whose upstream providers live on a mock server
pub fn bridge_config_for(upstream_uri: &str) -> BridgeConfig {
    BridgeConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        geocoding_url: format!("{}/search", upstream_uri),
        forecast_url: format!("{}/v1/forecast", upstream_uri),
        ..Default::default()
    }
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
agent:
  name: "TestAgent"
  city: "Oslo"
logs:
  level: "debug"
weather_tool:
  type: bridge
  url: "http://127.0.0.1:4000/run-tool"
  timeout_secs: 5
  headers:
    x-api-key: "secret"
bridge:
  host: "127.0.0.1"
  port: 4000
"#;

/// Configuration selecting an MCP weather server
pub const MCP_CONFIG_YAML: &str = r#"
weather_tool:
  type: mcp
  mcp:
    name: "weather"
    type: "stdio"
    command: "weather-mcp"
    args: ["--units", "metric"]
    env:
      WEATHER_API_KEY: "test"
"#;
