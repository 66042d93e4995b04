//! Error type returned by bus handlers.
//!
//! Handler errors never escape the bus. They are logged per handler and
//! counted in [`Statistics`](crate::Statistics); dispatch then moves on.
use std::fmt;

use thiserror::Error;

pub type HandlerResult = std::result::Result<(), HandlerError>;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{0}")]
    Message(String),

    #[error("{collaborator} failed: {reason}")]
    Collaborator {
        collaborator: &'static str,
        reason: String,
    },
}

impl HandlerError {
    pub fn msg(message: impl fmt::Display) -> Self {
        Self::Message(message.to_string())
    }

    /// Wraps a failure reported by an external collaborator (content loader,
    /// restart manager, ...).
    pub fn collaborator(collaborator: &'static str, reason: impl fmt::Display) -> Self {
        Self::Collaborator {
            collaborator,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaborator_error_names_the_source() {
        let err = HandlerError::collaborator("content loader", "missing prefab 'potion'");
        assert_eq!(
            err.to_string(),
            "content loader failed: missing prefab 'potion'"
        );
    }

    #[test]
    fn message_error_displays_verbatim() {
        assert_eq!(HandlerError::msg("boom").to_string(), "boom");
    }
}
