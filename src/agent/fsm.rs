use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

// Agent states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    Start,
    FetchingWeather,
    ProcessingData,
    Notifying,
    Completed,
}

impl State {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::FetchingWeather => "fetching_weather",
            Self::ProcessingData => "processing_data",
            Self::Notifying => "notifying",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every state the machine declares, in pipeline order.
pub const STATES: [State; 5] = [
    State::Start,
    State::FetchingWeather,
    State::ProcessingData,
    State::Notifying,
    State::Completed,
];

/// The allow-list. `Completed` has no outgoing edge.
pub const TRANSITIONS: [(State, State); 4] = [
    (State::Start, State::FetchingWeather),
    (State::FetchingWeather, State::ProcessingData),
    (State::ProcessingData, State::Notifying),
    (State::Notifying, State::Completed),
];

/// Minimal FSM: a current state plus legality checks against [`TRANSITIONS`].
///
/// Owned by a single agent and accessed sequentially; it does no I/O.
#[derive(Debug, Clone)]
pub struct StateMachine {
    state: State,
}

impl StateMachine {
    pub fn new() -> Self {
        debug!("🚀 Creating new FSM in state {}", State::Start);
        Self {
            state: State::Start,
        }
    }

    pub fn current_state(&self) -> State {
        self.state
    }

    pub fn states(&self) -> &'static [State] {
        &STATES
    }

    pub fn can_transition(&self, to: State) -> bool {
        TRANSITIONS.contains(&(self.state, to))
    }

    pub fn transition(&mut self, to: State) -> Result<()> {
        if !self.can_transition(to) {
            warn!("❌ Invalid FSM transition from {} to {}", self.state, to);
            return Err(Error::IllegalTransition {
                from: self.state,
                to,
            });
        }

        info!("🎯 FSM state transition: {} -> {}", self.state, to);
        self.state = to;
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        self.state == State::Completed
    }

    /// Jumps straight to `Completed`, bypassing the allow-list.
    ///
    /// Reserved for the drive loop's failure path.
    pub(crate) fn force_complete(&mut self) {
        if self.state != State::Completed {
            warn!("⛔ Forcing FSM from {} to {}", self.state, State::Completed);
            self.state = State::Completed;
        }
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}
