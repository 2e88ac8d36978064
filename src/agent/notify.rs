use crate::tool::WeatherSnapshot;

/// Condition keywords that warrant a notification, matched case-insensitively.
pub const NOTIFY_KEYWORDS: [&str; 2] = ["rain", "overcast"];

/// Outcome of the notify step.
#[derive(Debug, Clone, PartialEq)]
pub enum NotifyDecision {
    /// The rendered notification was surfaced.
    Sent { text: String },
    /// Nothing was surfaced; carries the condition text as reported.
    Skipped { condition: String },
}

impl NotifyDecision {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

/// Looks only at the condition text; temperature and wind never matter.
pub fn should_notify(condition: &str) -> bool {
    let condition = condition.to_lowercase();
    NOTIFY_KEYWORDS
        .iter()
        .any(|keyword| condition.contains(keyword))
}

pub fn render_notification(city: &str, snapshot: &WeatherSnapshot) -> String {
    format!(
        "Current weather in {}:\nTemperature: {}°C\nCondition: {}\nWind Speed: {} km/h",
        city, snapshot.temperature_c, snapshot.condition, snapshot.wind_kph
    )
}
