use game_events::{DropKind, Position};

use crate::error::SpawnError;

/// Creates loot objects in the world.
pub trait ContentLoader {
    /// Spawns `amount` of `kind` at `position`.
    fn spawn(&self, kind: DropKind, amount: u32, position: Position) -> Result<(), SpawnError>;
}
