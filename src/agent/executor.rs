use super::{
    events::{RunEvent, RunReport},
    fsm::{State, StateMachine},
    notify::{NotifyDecision, render_notification, should_notify},
    session::AgentSession,
};
use crate::{
    Error, Result,
    config::AgentConfig,
    tool::{WeatherToolClient, WeatherToolRequest},
};
use chrono::Utc;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

pub struct Agent {
    session: AgentSession,
    fsm: StateMachine,
    weather_client: Box<dyn WeatherToolClient>,
    decision: Option<NotifyDecision>,
    events: Vec<RunEvent>,
    event_tx: Option<UnboundedSender<RunEvent>>,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        weather_client: Box<dyn WeatherToolClient>,
    ) -> Self {
        Self::from_parts(
            AgentSession::new(name, city),
            StateMachine::new(),
            weather_client,
        )
    }

    pub fn from_config(config: &AgentConfig, weather_client: Box<dyn WeatherToolClient>) -> Self {
        Self::new(config.name.clone(), config.city.clone(), weather_client)
    }

    /// Builds an agent around an existing session and machine, e.g. one that
    /// has already been advanced by its owner.
    pub fn from_parts(
        session: AgentSession,
        fsm: StateMachine,
        weather_client: Box<dyn WeatherToolClient>,
    ) -> Self {
        info!(
            "Initializing agent '{}' for city {} (run {})",
            session.name, session.city, session.run_id
        );
        Self {
            session,
            fsm,
            weather_client,
            decision: None,
            events: Vec::new(),
            event_tx: None,
        }
    }

    /// Every emitted event is also sent here. A closed receiver is ignored.
    pub fn with_event_sender(mut self, event_tx: UnboundedSender<RunEvent>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    pub fn session(&self) -> &AgentSession {
        &self.session
    }

    pub fn current_state(&self) -> State {
        self.fsm.current_state()
    }

    pub fn events(&self) -> &[RunEvent] {
        &self.events
    }

    /// Drives the pipeline to `Completed` and consumes the agent.
    ///
    /// A failing step is reported once and the machine is forced to
    /// `Completed`; nothing is retried.
    pub async fn run(mut self) -> RunReport {
        let start_time = Instant::now();
        info!(
            "🚀 Starting run {} for {} in {}",
            self.session.run_id, self.session.name, self.session.city
        );

        let mut failure = None;
        let mut steps = 0;

        while !self.fsm.is_terminal() {
            steps += 1;
            debug!(
                "🔄 Drive loop step {} - current state: {}",
                steps,
                self.fsm.current_state()
            );

            if let Err(e) = self.step().await {
                error!(
                    "❌ Run {} failed in state {}: {}",
                    self.session.run_id,
                    self.fsm.current_state(),
                    e
                );
                self.fsm.force_complete();
                failure = Some(e);
            }
        }

        match &failure {
            Some(e) => self.emit(RunEvent::RunFailed {
                error: e.to_string(),
            }),
            None => self.emit(RunEvent::RunCompleted),
        }

        info!(
            "🏁 Run {} finished after {} steps in {:?}",
            self.session.run_id,
            steps,
            start_time.elapsed()
        );

        let succeeded = failure.is_none();
        let run_id = self.session.run_id;
        let agent_name = self.session.name.clone();
        let city = self.session.city.clone();
        let started_at = self.session.started_at;
        let notification = self.session.into_notification().filter(|_| succeeded);

        RunReport {
            run_id,
            agent_name,
            city,
            final_state: self.fsm.current_state(),
            notification,
            decision: self.decision.filter(|_| succeeded),
            error: failure,
            events: self.events,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Runs the handler for the current state, once.
    pub async fn step(&mut self) -> Result<()> {
        match self.fsm.current_state() {
            State::Start => self.fetch_weather().await,
            State::FetchingWeather => self.process_data(),
            State::ProcessingData => self.notify_user(),
            State::Notifying => self.finalize(),
            State::Completed => {
                debug!("Run {} already completed", self.session.run_id);
                Ok(())
            }
        }
    }

    async fn fetch_weather(&mut self) -> Result<()> {
        info!(
            "{} is fetching weather data for {}...",
            self.session.name, self.session.city
        );
        self.emit(RunEvent::FetchStarted {
            city: self.session.city.clone(),
        });

        let request = WeatherToolRequest::for_city(&self.session.city);
        let fetch_start = Instant::now();
        let result = self.weather_client.fetch_weather(&request).await;

        match result {
            Ok(snapshot) => {
                info!("✅ Weather fetched in {:?}", fetch_start.elapsed());
                self.session.record_weather(snapshot.clone())?;
                self.emit(RunEvent::FetchCompleted { snapshot });
                self.fsm.transition(State::FetchingWeather)
            }
            Err(e) => {
                let e = match e {
                    Error::Collaborator(_) => e,
                    other => Error::collaborator(other.to_string()),
                };
                self.emit(RunEvent::FetchFailed {
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    fn process_data(&mut self) -> Result<()> {
        info!("{} is processing weather data...", self.session.name);
        self.emit(RunEvent::ProcessingStarted);

        let Some(snapshot) = self.session.weather() else {
            warn!("No weather data available to process");
            return Err(Error::MissingData("weather snapshot"));
        };

        let text = render_notification(&self.session.city, snapshot);
        self.session.record_notification(text.clone())?;
        self.emit(RunEvent::NotificationRendered { text });
        self.fsm.transition(State::ProcessingData)
    }

    fn notify_user(&mut self) -> Result<()> {
        info!("{} is notifying the user...", self.session.name);

        let Some(snapshot) = self.session.weather() else {
            warn!("No weather data available for notification");
            return Err(Error::MissingData("weather snapshot"));
        };

        let decision = if should_notify(&snapshot.condition) {
            let text = self
                .session
                .notification()
                .ok_or(Error::MissingData("notification text"))?;
            NotifyDecision::Sent {
                text: text.to_string(),
            }
        } else {
            NotifyDecision::Skipped {
                condition: snapshot.condition.clone(),
            }
        };

        self.emit(match &decision {
            NotifyDecision::Sent { text } => RunEvent::NotificationSent { text: text.clone() },
            NotifyDecision::Skipped { condition } => RunEvent::NoNotification {
                condition: condition.clone(),
            },
        });
        self.decision = Some(decision);
        self.fsm.transition(State::Notifying)
    }

    fn finalize(&mut self) -> Result<()> {
        self.fsm.transition(State::Completed)
    }

    fn emit(&mut self, event: RunEvent) {
        info!(run_id = %self.session.run_id, "📣 {}", event);
        if let Some(tx) = &self.event_tx {
            if tx.send(event.clone()).is_err() {
                debug!("Event receiver dropped, continuing without it");
            }
        }
        self.events.push(event);
    }
}
