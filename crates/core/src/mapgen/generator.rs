//! Level generation orchestration: seed room first, then the requested number of attached rooms.

use log::debug;

use crate::config::GenerationParams;
use crate::error::GenerationError;
use crate::grid::TileGrid;
use crate::rng::GameRng;

use super::layout::{RoomRect, carve_room, place_one_room};
use super::seed::derive_level_seed;

/// Reproducible level source: the same run seed and level number always yield the same grid.
pub struct MapGenerator {
    run_seed: u64,
    params: GenerationParams,
}

impl MapGenerator {
    pub fn new(run_seed: u64, params: GenerationParams) -> Self {
        Self { run_seed, params }
    }

    pub fn generate(&self, level: u32) -> Result<TileGrid, GenerationError> {
        let mut rng = GameRng::seed_from_u64(derive_level_seed(self.run_seed, level));
        build_grid(&self.params, &mut rng)
    }
}

pub(super) fn seed_room(params: &GenerationParams) -> RoomRect {
    RoomRect {
        x: params.seed_room_x,
        y: params.seed_room_y,
        width: params.seed_room_size,
        height: params.seed_room_size,
    }
}

pub(super) fn build_grid(
    params: &GenerationParams,
    rng: &mut GameRng,
) -> Result<TileGrid, GenerationError> {
    params.validate()?;

    let mut grid = TileGrid::filled(params.width, params.height);
    carve_room(&mut grid, seed_room(params));

    for placed in 0..params.room_count {
        match place_one_room(&mut grid, params, rng) {
            Ok(room) => {
                debug!("room {} placed at {:?} via door {}", placed + 1, room.room, room.door);
            }
            Err(failure) => {
                return Err(GenerationError::PlacementExhausted {
                    attempts: failure.attempts,
                    placed,
                    requested: params.room_count,
                });
            }
        }
    }

    debug!(
        "generated {}x{} grid with {} rooms and {} floor cells",
        grid.width(),
        grid.height(),
        params.room_count + 1,
        grid.floor_count()
    );
    Ok(grid)
}
