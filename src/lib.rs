pub mod agent;
pub mod bridge;
pub mod config;
pub mod error;
pub mod logging;
pub mod tool;

pub use error::{Error, Result};
