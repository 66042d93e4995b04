use strum::{AsRefStr, Display, EnumIter};

/// Text color (or severity) of a message log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum LogColor {
    White,
    Gray,
    Green,
    Cyan,
    Yellow,
    Gold,
    Orange,
    Red,
}

/// On-screen message log.
pub trait LogSink {
    fn write(&self, text: &str, color: LogColor);
}

/// Log sink that forwards lines to `tracing` under the `game_log` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl LogSink for TracingLog {
    fn write(&self, text: &str, color: LogColor) {
        match color {
            LogColor::Red => tracing::warn!(target: "game_log", %color, "{text}"),
            _ => tracing::info!(target: "game_log", %color, "{text}"),
        }
    }
}
