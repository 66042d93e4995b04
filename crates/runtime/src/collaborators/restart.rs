use game_events::RestartRequested;

use crate::error::RestartError;

/// Runs the restart pipeline. Implementations publish the `restart.*` stage
/// topics as the pipeline advances.
pub trait RestartManager {
    fn restart(&self, request: &RestartRequested) -> Result<(), RestartError>;
}
