use super::client::{WeatherToolClient, build_headers};
use super::types::{WeatherPayload, WeatherSnapshot, WeatherToolRequest};
use crate::{Error, Result, config::WeatherToolConfig};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Calls a weather bridge's `/run-tool` endpoint over HTTP.
pub struct BridgeWeatherClient {
    client: reqwest::Client,
    url: String,
}

impl BridgeWeatherClient {
    pub fn new(config: &WeatherToolConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().default_headers(build_headers(&config.headers)?);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl WeatherToolClient for BridgeWeatherClient {
    async fn fetch_weather(&self, request: &WeatherToolRequest) -> Result<WeatherSnapshot> {
        if request.config.verbose {
            debug!(
                "Sending payload to weather bridge {}: {}",
                self.url,
                serde_json::to_string(request)?
            );
        }

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::collaborator(format!("weather bridge timed out: {}", e))
                } else {
                    Error::collaborator(format!("weather bridge request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Weather bridge returned {}: {}", status, body);
            return Err(Error::collaborator(format!(
                "weather bridge returned {}: {}",
                status, body
            )));
        }

        let payload: WeatherPayload = response
            .json()
            .await
            .map_err(|e| Error::collaborator(format!("malformed weather payload: {}", e)))?;

        debug!("Received weather payload from bridge: {:?}", payload);
        payload.into_snapshot(&request.city, request.config.strict_validation)
    }
}
