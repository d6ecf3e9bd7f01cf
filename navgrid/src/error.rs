use crate::{MovementMode, TileId};

/// Reasons a move request is refused.
///
/// A refused request never touches the controller: mode, phase, distance and the stored
/// path stay as they were.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MovementError {
    /// The mover's position does not resolve to any tile.
    #[error("mover is not on the grid")]
    NotOnGrid,

    /// The target is not among the tiles reachable this turn.
    #[error("no path to tile {0:?}")]
    NoPathToTarget(TileId),

    /// The route collapsed to a zero-length path (target is where the mover stands).
    #[error("path to the target has zero length")]
    DegeneratePath,

    /// Following backpointers from the target revisited a tile.
    #[error("backpointer chain from tile {0:?} loops")]
    CyclicBackpointers(TileId),

    /// The requested movement mode is not enabled for this mover.
    #[error("movement mode {0:?} is not available")]
    ModeUnavailable(MovementMode),
}
