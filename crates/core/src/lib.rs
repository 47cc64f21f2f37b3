//! Deterministic core of a grid-based dungeon crawl.
//!
//! Front ends generate levels with [`mapgen`], drive play through [`Game`] intents and read
//! [`WorldState`] snapshots back to paint a view. Every state change goes through
//! [`engine::apply`].

pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod grid;
pub mod journal;
pub mod mapgen;
pub mod replay;
pub mod rng;
pub mod state;
pub mod types;
pub mod visibility;

pub use combat::{CombatOutcome, Exchange};
pub use config::GameConfig;
pub use engine::{Transition, apply};
pub use error::{GenerationError, SessionError, TransitionError};
pub use game::{Game, Observer, snapshot_hash};
pub use grid::TileGrid;
pub use journal::{InputJournal, InputRecord, JOURNAL_FORMAT_VERSION};
pub use replay::{ReplayError, ReplayResult, replay_to_end};
pub use rng::GameRng;
pub use state::{Entity, InvariantViolation, LocationIndex, Progression, Viewport, WorldState};
pub use types::*;
pub use visibility::{CellContent, CellView, VisibleWindow, classify_cell, is_lit, visible_window};
