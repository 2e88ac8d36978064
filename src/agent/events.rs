use super::{NotifyDecision, State};
use crate::{Error, tool::WeatherSnapshot};
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// Observable milestones of a run, emitted in pipeline order.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    FetchStarted { city: String },
    FetchCompleted { snapshot: WeatherSnapshot },
    FetchFailed { error: String },
    ProcessingStarted,
    NotificationRendered { text: String },
    NotificationSent { text: String },
    NoNotification { condition: String },
    RunCompleted,
    RunFailed { error: String },
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchStarted { city } => write!(f, "fetching weather for {}", city),
            Self::FetchCompleted { snapshot } => write!(
                f,
                "weather fetched: {}°C, {}, {} km/h",
                snapshot.temperature_c, snapshot.condition, snapshot.wind_kph
            ),
            Self::FetchFailed { error } => write!(f, "weather fetch failed: {}", error),
            Self::ProcessingStarted => f.write_str("processing weather data"),
            Self::NotificationRendered { text } => write!(f, "notification rendered:\n{}", text),
            Self::NotificationSent { text } => write!(f, "notification sent: {}", text),
            Self::NoNotification { condition } => {
                write!(f, "no notification: condition={}", condition)
            }
            Self::RunCompleted => f.write_str("run completed"),
            Self::RunFailed { error } => write!(f, "run failed: {}", error),
        }
    }
}

/// What is left of a run once the agent has been consumed.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    pub agent_name: String,
    pub city: String,
    pub final_state: State,
    /// Only populated when the run succeeded.
    pub notification: Option<String>,
    pub decision: Option<NotifyDecision>,
    pub error: Option<Error>,
    pub events: Vec<RunEvent>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    pub fn notified(&self) -> bool {
        self.decision.as_ref().is_some_and(NotifyDecision::is_sent)
    }
}
