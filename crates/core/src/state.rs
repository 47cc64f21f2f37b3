use std::collections::BTreeMap;
use std::collections::btree_map;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GameConfig;
use crate::grid::TileGrid;
use crate::types::{Delta, EntityId, EntityKind, Pos};

/// Player-only progress carried alongside the shared entity attributes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Progression {
    pub weapon: String,
    /// Sum of every weapon bonus picked up so far.
    pub attack_bonus: i32,
    pub level: u32,
    pub xp: i32,
    pub xp_to_next: i32,
    pub inventory: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Entity {
    pub kind: EntityKind,
    pub health: i32,
    pub attack: i32,
    /// Anchor cell; bosses extend one cell right and down from it. `None` while off the grid.
    pub pos: Option<Pos>,
    pub progression: Option<Progression>,
}

impl Entity {
    pub fn new(kind: EntityKind, health: i32, attack: i32, pos: Pos) -> Self {
        Self { kind, health, attack, pos: Some(pos), progression: None }
    }

    pub fn baseline_player(config: &GameConfig) -> Self {
        let player = &config.rules.player;
        Self {
            kind: EntityKind::Player,
            health: player.base_health,
            attack: player.base_attack,
            pos: Some(Pos::ORIGIN),
            progression: Some(Progression {
                weapon: "fists".to_string(),
                attack_bonus: 0,
                level: 1,
                xp: 0,
                xp_to_next: player.to_next_level,
                inventory: Vec::new(),
            }),
        }
    }

    /// Only combatants can be defeated; pickups and exits carry no meaningful health.
    pub fn is_defeated(&self) -> bool {
        matches!(self.kind, EntityKind::Player | EntityKind::Enemy | EntityKind::Boss)
            && self.health <= 0
    }

    pub fn cells(&self) -> Vec<Pos> {
        self.pos.and_then(|anchor| footprint(self.kind, anchor)).unwrap_or_default()
    }
}

/// Cells covered by an entity of `kind` anchored at `anchor`, or `None` if the block would run
/// past the edge of the coordinate space.
pub fn footprint(kind: EntityKind, anchor: Pos) -> Option<Vec<Pos>> {
    let size = kind.footprint();
    (0..size)
        .flat_map(|dy| (0..size).map(move |dx| anchor.offset(Delta::new(dx, dy))))
        .collect()
}

/// Coordinate to occupant lookup. Only the state engine writes it, always in lockstep with the
/// registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LocationIndex {
    cells: BTreeMap<Pos, EntityId>,
}

impl LocationIndex {
    pub fn occupant(&self, pos: Pos) -> Option<&EntityId> {
        self.cells.get(&pos)
    }

    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.cells.contains_key(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Pos, EntityId> {
        self.cells.iter()
    }

    pub(crate) fn occupy(&mut self, cells: &[Pos], id: &EntityId) {
        for &pos in cells {
            self.cells.insert(pos, id.clone());
        }
    }

    pub(crate) fn vacate(&mut self, cells: &[Pos]) {
        for pos in cells {
            self.cells.remove(pos);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.cells.clear();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// One immutable snapshot of the world. New snapshots come only from [`crate::engine::apply`];
/// the tile grid is shared between snapshots until a transition replaces it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldState {
    pub(crate) grid: Arc<TileGrid>,
    pub(crate) entities: BTreeMap<EntityId, Entity>,
    pub(crate) index: LocationIndex,
    pub(crate) level: u32,
    pub(crate) viewport: Viewport,
    pub(crate) in_darkness: bool,
}

impl WorldState {
    /// The player alone at the origin with baseline stats, on an empty grid.
    pub fn initial(config: &GameConfig) -> Self {
        let player_id = EntityId::player();
        let player = Entity::baseline_player(config);
        let mut index = LocationIndex::default();
        index.occupy(&player.cells(), &player_id);
        Self {
            grid: Arc::new(TileGrid::default()),
            entities: BTreeMap::from([(player_id, player)]),
            index,
            level: 1,
            viewport: Viewport {
                width: config.viewport.initial_width,
                height: config.viewport.initial_height,
            },
            in_darkness: true,
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn entities(&self) -> &BTreeMap<EntityId, Entity> {
        &self.entities
    }

    pub fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn index(&self) -> &LocationIndex {
        &self.index
    }

    pub fn entity_at(&self, pos: Pos) -> Option<(&EntityId, &Entity)> {
        let id = self.index.occupant(pos)?;
        self.entities.get(id).map(|entity| (id, entity))
    }

    pub fn player(&self) -> Option<&Entity> {
        self.entities.get(&EntityId::player())
    }

    pub fn player_progress(&self) -> Option<&Progression> {
        self.player().and_then(|player| player.progression.as_ref())
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn in_darkness(&self) -> bool {
        self.in_darkness
    }

    /// First broken link between the registry, the location index and the grid, if any.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (pos, id) in self.index.iter() {
            let Some(entity) = self.entities.get(id) else {
                return Err(InvariantViolation::DanglingIndexEntry { pos: *pos, id: id.clone() });
            };
            if !entity.cells().contains(pos) {
                return Err(InvariantViolation::IndexMismatch { pos: *pos, id: id.clone() });
            }
        }

        for (id, entity) in &self.entities {
            if entity.pos.is_none() {
                if !entity.is_defeated() {
                    return Err(InvariantViolation::Unplaced(id.clone()));
                }
                continue;
            }
            for pos in entity.cells() {
                if self.index.occupant(pos) != Some(id) {
                    return Err(InvariantViolation::MissingIndexEntry { pos, id: id.clone() });
                }
                if !self.grid.is_empty() && !self.grid.is_floor(pos) {
                    return Err(InvariantViolation::OffFloor { pos, id: id.clone() });
                }
            }
        }
        Ok(())
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self::initial(&GameConfig::default())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("index cell {pos} points at missing entity {id}")]
    DanglingIndexEntry { pos: Pos, id: EntityId },
    #[error("index cell {pos} points at {id}, which does not cover it")]
    IndexMismatch { pos: Pos, id: EntityId },
    #[error("entity {id} covers {pos} without an index entry")]
    MissingIndexEntry { pos: Pos, id: EntityId },
    #[error("entity {id} stands on non-floor cell {pos}")]
    OffFloor { pos: Pos, id: EntityId },
    #[error("live entity {0} has no location")]
    Unplaced(EntityId),
}
