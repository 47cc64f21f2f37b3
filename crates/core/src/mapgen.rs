//! Procedural level generation: one seed room, then rooms grown outward through single-tile doors.

mod generator;
mod layout;
mod seed;
mod spawns;

use std::collections::{BTreeSet, VecDeque};

use crate::config::GenerationParams;
use crate::error::GenerationError;
use crate::grid::TileGrid;
use crate::rng::GameRng;
use crate::types::{Direction, Pos};

pub use generator::MapGenerator;
pub use layout::RoomRect;
pub use seed::derive_level_seed;
pub use spawns::{SpawnRequest, find_empty_floor_block, find_empty_floor_cell, level_roster};

/// Builds a full level grid from `params`, drawing every random choice from `rng`.
pub fn generate(params: &GenerationParams, rng: &mut GameRng) -> Result<TileGrid, GenerationError> {
    generator::build_grid(params, rng)
}

/// Whether every floor cell can reach every other one through orthogonal floor steps.
pub fn is_fully_connected(grid: &TileGrid) -> bool {
    let Some(start) = grid.floor_positions().next() else {
        return true;
    };
    reachable_floor(grid, start).len() == grid.floor_count()
}

pub fn reachable_floor(grid: &TileGrid, start: Pos) -> BTreeSet<Pos> {
    let mut seen = BTreeSet::new();
    if !grid.is_floor(start) {
        return seen;
    }
    let mut open = VecDeque::from([start]);
    seen.insert(start);
    while let Some(pos) = open.pop_front() {
        for direction in Direction::ALL {
            let next = pos.step(direction);
            if grid.is_floor(next) && seen.insert(next) {
                open.push_back(next);
            }
        }
    }
    seen
}
