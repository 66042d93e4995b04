//! Shared bootstrap utilities for client front-ends.
//!
//! Provides configuration loading and logging setup that can be reused by the
//! headless client or any other front-end that embeds the event system.
pub mod config;
pub mod logging;

pub use config::AppConfig;
pub use logging::{LoggingGuard, setup_logging};
