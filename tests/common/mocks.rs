use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use weather_agent::{
    Error, Result,
    tool::{WeatherSnapshot, WeatherToolClient, WeatherToolRequest},
};

/// Mock weather tool client for testing
#[derive(Debug, Clone)]
pub struct MockWeatherClient {
    pub snapshot: Option<WeatherSnapshot>,
    pub error: Option<Error>,
    pub requests: Arc<Mutex<Vec<WeatherToolRequest>>>,
}

impl MockWeatherClient {
    pub fn new() -> Self {
        Self {
            snapshot: None,
            error: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_snapshot(mut self, snapshot: WeatherSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    pub fn with_error(mut self, error: Error) -> Self {
        self.error = Some(error);
        self
    }

    /// Shared handle that outlives the agent the mock is boxed into.
    pub fn requests_handle(&self) -> Arc<Mutex<Vec<WeatherToolRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl Default for MockWeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherToolClient for MockWeatherClient {
    async fn fetch_weather(&self, request: &WeatherToolRequest) -> Result<WeatherSnapshot> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(ref error) = self.error {
            return Err(error.clone());
        }

        self.snapshot
            .clone()
            .ok_or_else(|| Error::collaborator("No mock snapshot configured"))
    }
}
