mod events;
mod executor;
pub mod fsm;
mod notify;
mod session;

pub use events::{RunEvent, RunReport};
pub use executor::Agent;
pub use fsm::{STATES, State, StateMachine, TRANSITIONS};
pub use notify::{NOTIFY_KEYWORDS, NotifyDecision, render_notification, should_notify};
pub use session::AgentSession;
