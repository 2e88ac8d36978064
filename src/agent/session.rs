use crate::{Error, Result, tool::WeatherSnapshot};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Per-run record owned by one [`Agent`](super::Agent).
///
/// `weather` is written by the fetch step and `notification` by the process
/// step, each at most once. Later steps only read them.
#[derive(Debug, Clone)]
pub struct AgentSession {
    pub name: String,
    pub city: String,
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    weather: Option<WeatherSnapshot>,
    notification: Option<String>,
}

impl AgentSession {
    pub fn new(name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            weather: None,
            notification: None,
        }
    }

    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.weather.as_ref()
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub(crate) fn record_weather(&mut self, snapshot: WeatherSnapshot) -> Result<()> {
        if self.weather.is_some() {
            return Err(Error::internal("weather snapshot already recorded for this run"));
        }
        self.weather = Some(snapshot);
        Ok(())
    }

    pub(crate) fn record_notification(&mut self, text: String) -> Result<()> {
        if self.notification.is_some() {
            return Err(Error::internal("notification already rendered for this run"));
        }
        self.notification = Some(text);
        Ok(())
    }

    /// Hands over the notification and drops everything else.
    pub(crate) fn into_notification(self) -> Option<String> {
        self.notification
    }
}
