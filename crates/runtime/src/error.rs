//! Failures reported by collaborators at the bus boundary.
//!
//! Collaborators return these instead of panicking; handlers log them and
//! hand them back to the bus as [`HandlerError`]s so they show up in the
//! failure statistics.
use event_bus::HandlerError;
use game_events::{DropKind, Position};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpawnError {
    #[error("no prefab registered for {kind}")]
    MissingPrefab { kind: DropKind },

    #[error("spawn position {position} is blocked")]
    Blocked { position: Position },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestartError {
    #[error("a restart is already in progress")]
    AlreadyRestarting,

    #[error("no checkpoint has been recorded")]
    NoCheckpoint,

    #[error("restart failed: {0}")]
    Failed(String),
}

/// Misuse of the event system lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SystemError {
    #[error("event system has been disposed")]
    Disposed,
}

impl From<SpawnError> for HandlerError {
    fn from(err: SpawnError) -> Self {
        HandlerError::collaborator("content loader", err)
    }
}

impl From<RestartError> for HandlerError {
    fn from(err: RestartError) -> Self {
        HandlerError::collaborator("restart manager", err)
    }
}
