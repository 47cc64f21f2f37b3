use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::grid::TileGrid;
use crate::types::{Delta, EntityId, EntityKind, Pos};

/// Every permitted world mutation. Serialized with a `type` tag (`kind` is taken by the entity
/// kind of a spawn); tags this build does not know decode to [`Transition::Unrecognized`],
/// which applies as a no-op.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transition {
    /// Replaces the tile grid. Entities left off the new floor lose their location.
    SetGrid { grid: Arc<TileGrid> },
    /// Replaces the tile grid and drops every entity except the player, who is left unplaced.
    ResetGrid { grid: Arc<TileGrid> },
    SpawnEntity { id: EntityId, kind: EntityKind, health: i32, attack: i32, pos: Pos },
    /// Lowers health without removing the entity, even past zero.
    DealDamage { id: EntityId, amount: i32 },
    AddHealth { id: EntityId, amount: i32 },
    /// Equips `weapon` on the player and stacks `attack_bonus` onto the current attack.
    SwitchWeapon { weapon: String, attack_bonus: i32 },
    MoveEntity { id: EntityId, delta: Delta },
    SetLocation { id: EntityId, pos: Pos },
    RemoveEntity { id: EntityId },
    /// Collapses the board to the player at its current location.
    ResetBoard,
    NextLevel,
    AddXp { amount: i32 },
    LevelUpPlayer { attack_gain: i32, health_gain: i32, xp_to_next: i32 },
    /// Adds the boss covering the 2x2 block whose top-left cell is `pos`.
    AddBoss { attack: i32, health: i32, pos: Pos },
    ToggleDarkness,
    SetViewport { width: u32, height: u32 },
    #[serde(other)]
    Unrecognized,
}

impl Transition {
    pub fn name(&self) -> &'static str {
        match self {
            Transition::SetGrid { .. } => "set_grid",
            Transition::ResetGrid { .. } => "reset_grid",
            Transition::SpawnEntity { .. } => "spawn_entity",
            Transition::DealDamage { .. } => "deal_damage",
            Transition::AddHealth { .. } => "add_health",
            Transition::SwitchWeapon { .. } => "switch_weapon",
            Transition::MoveEntity { .. } => "move_entity",
            Transition::SetLocation { .. } => "set_location",
            Transition::RemoveEntity { .. } => "remove_entity",
            Transition::ResetBoard => "reset_board",
            Transition::NextLevel => "next_level",
            Transition::AddXp { .. } => "add_xp",
            Transition::LevelUpPlayer { .. } => "level_up_player",
            Transition::AddBoss { .. } => "add_boss",
            Transition::ToggleDarkness => "toggle_darkness",
            Transition::SetViewport { .. } => "set_viewport",
            Transition::Unrecognized => "unrecognized",
        }
    }
}
