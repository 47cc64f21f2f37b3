use thiserror::Error;

use crate::types::{EntityId, Pos};

/// Rejections raised by the state engine. A rejected transition leaves the state untouched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("unknown entity: {0}")]
    UnknownEntity(EntityId),
    #[error("cell {pos} is already occupied by {occupant}")]
    CellOccupied { pos: Pos, occupant: EntityId },
    #[error("cell {0} is not floor")]
    NotFloor(Pos),
    #[error("entity {0} has no location on the grid")]
    NotPlaced(EntityId),
    #[error("entity {0} already exists")]
    DuplicateEntity(EntityId),
    #[error("coordinate {0} is outside the grid")]
    OutOfBounds(Pos),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("invalid generation parameters: {0}")]
    InvalidParameters(&'static str),
    #[error("seed room at ({x}, {y}) with size {size} does not fit the grid")]
    SeedRoomOutOfBounds { x: i32, y: i32, size: i32 },
    #[error(
        "room placement gave up after {attempts} attempts ({placed} of {requested} rooms placed)"
    )]
    PlacementExhausted { attempts: u32, placed: u32, requested: u32 },
    #[error("no free floor cell found after {samples} samples")]
    NoFreeCell { samples: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}
