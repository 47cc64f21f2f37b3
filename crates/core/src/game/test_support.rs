//! Shared fixtures for unit tests across the crate.
//! Small hand-built grids keep engine and session tests independent of the generator.

use std::sync::Arc;

use super::Game;
use crate::config::GameConfig;
use crate::engine::{Transition, apply};
use crate::grid::TileGrid;
use crate::journal::InputJournal;
use crate::rng::GameRng;
use crate::state::WorldState;
use crate::types::{EntityId, EntityKind, Pos, TileKind};

/// Floor everywhere except a one-cell wall border.
pub(crate) fn open_grid(width: i32, height: i32) -> Arc<TileGrid> {
    let mut grid = TileGrid::filled(width, height);
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            grid.set_tile(Pos::new(x, y), TileKind::Floor);
        }
    }
    Arc::new(grid)
}

/// Two rooms joined by a one-cell corridor at row 2: `(1..=3, 1..=3)` and `(5..=7, 1..=3)`.
pub(crate) fn twin_rooms_grid() -> Arc<TileGrid> {
    Arc::new(TileGrid::from_rows(&[
        "#########",
        "#...#...#",
        "#.......#",
        "#...#...#",
        "#########",
    ]))
}

pub(crate) fn apply_all(state: &WorldState, transitions: &[Transition]) -> WorldState {
    transitions.iter().fold(state.clone(), |current, transition| {
        apply(&current, transition).unwrap_or_else(|err| panic!("{}: {err}", transition.name()))
    })
}

/// Baseline player standing at `pos` on a 10x10 open room.
pub(crate) fn player_in_open_room(pos: Pos) -> WorldState {
    let initial = WorldState::initial(&GameConfig::default());
    apply_all(
        &initial,
        &[
            Transition::ResetGrid { grid: open_grid(10, 10) },
            Transition::SetLocation { id: EntityId::player(), pos },
        ],
    )
}

pub(crate) fn spawn_at(
    id: &str,
    kind: EntityKind,
    health: i32,
    attack: i32,
    pos: Pos,
) -> Transition {
    Transition::SpawnEntity { id: EntityId::new(id), kind, health, attack, pos }
}

/// A session around a hand-built snapshot, with default rules and a fixed seed.
pub(crate) fn game_with_state(state: WorldState) -> Game {
    let seed = 7;
    Game {
        config: GameConfig::default(),
        seed,
        rng: GameRng::seed_from_u64(seed),
        state,
        observers: Vec::new(),
        log: Vec::new(),
        transitions_applied: 0,
        journal: InputJournal::new(seed),
    }
}
