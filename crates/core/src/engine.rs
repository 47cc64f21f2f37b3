//! The state engine: a pure function from a snapshot and a transition to the next snapshot.
//!
//! [`apply`] never mutates its input. It works on a copy and hands the copy back only when every
//! check passed, so a rejected transition is never partially visible. The registry and the
//! location index are updated together inside each arm; nothing outside this module writes
//! the index.

mod transition;


use std::collections::BTreeMap;
use std::sync::Arc;

pub use transition::Transition;

use crate::error::TransitionError;
use crate::grid::TileGrid;
use crate::state::{Entity, Progression, WorldState, footprint};
use crate::types::{EntityId, EntityKind, Pos};

pub fn apply(state: &WorldState, transition: &Transition) -> Result<WorldState, TransitionError> {
    let mut next = state.clone();
    match transition {
        Transition::SetGrid { grid } => set_grid(&mut next, grid),
        Transition::ResetGrid { grid } => reset_grid(&mut next, grid)?,
        Transition::SpawnEntity { id, kind, health, attack, pos } => {
            spawn(&mut next, id, Entity::new(*kind, *health, *attack, *pos))?;
        }
        Transition::DealDamage { id, amount } => {
            let entity = entity_mut(&mut next, id)?;
            entity.health = entity.health.saturating_sub(*amount);
        }
        Transition::AddHealth { id, amount } => {
            let entity = entity_mut(&mut next, id)?;
            entity.health = entity.health.saturating_add(*amount);
        }
        Transition::SwitchWeapon { weapon, attack_bonus } => {
            let PlayerMut { attack, progress, .. } = player_mut(&mut next)?;
            *attack = attack.saturating_add(*attack_bonus);
            progress.attack_bonus = progress.attack_bonus.saturating_add(*attack_bonus);
            progress.weapon.clone_from(weapon);
            progress.inventory.push(weapon.clone());
        }
        Transition::MoveEntity { id, delta } => {
            let from = placed_anchor(&next, id)?;
            let to = from
                .offset(*delta)
                .ok_or(TransitionError::OutOfBounds(from.saturating_offset(*delta)))?;
            relocate(&mut next, id, to)?;
        }
        Transition::SetLocation { id, pos } => relocate(&mut next, id, *pos)?,
        Transition::RemoveEntity { id } => {
            let entity = next
                .entities
                .remove(id)
                .ok_or_else(|| TransitionError::UnknownEntity(id.clone()))?;
            next.index.vacate(&entity.cells());
        }
        Transition::ResetBoard => {
            let player_id = EntityId::player();
            let player = take_player(&mut next)?;
            next.index.clear();
            next.index.occupy(&player.cells(), &player_id);
            next.entities = BTreeMap::from([(player_id, player)]);
        }
        Transition::NextLevel => next.level = next.level.saturating_add(1),
        Transition::AddXp { amount } => {
            let progress = player_mut(&mut next)?.progress;
            progress.xp = progress.xp.saturating_add(*amount);
            progress.xp_to_next = progress.xp_to_next.saturating_sub(*amount);
        }
        Transition::LevelUpPlayer { attack_gain, health_gain, xp_to_next } => {
            let player = player_mut(&mut next)?;
            *player.attack = player.attack.saturating_add(*attack_gain);
            *player.health = player.health.saturating_add(*health_gain);
            player.progress.xp_to_next = *xp_to_next;
            player.progress.level = player.progress.level.saturating_add(1);
        }
        Transition::AddBoss { attack, health, pos } => {
            let boss = Entity::new(EntityKind::Boss, *health, *attack, *pos);
            spawn(&mut next, &EntityId::boss(), boss)?;
        }
        Transition::ToggleDarkness => next.in_darkness = !next.in_darkness,
        Transition::SetViewport { width, height } => {
            next.viewport.width = *width;
            next.viewport.height = *height;
        }
        Transition::Unrecognized => {}
    }
    Ok(next)
}

fn set_grid(next: &mut WorldState, grid: &Arc<TileGrid>) {
    next.grid = Arc::clone(grid);
    let stranded: Vec<EntityId> = next
        .entities
        .iter()
        .filter(|(_, entity)| entity.cells().iter().any(|&pos| !next.grid.is_floor(pos)))
        .map(|(id, _)| id.clone())
        .collect();
    for id in stranded {
        if let Some(entity) = next.entities.get_mut(&id) {
            next.index.vacate(&entity.cells());
            entity.pos = None;
        }
    }
}

fn reset_grid(next: &mut WorldState, grid: &Arc<TileGrid>) -> Result<(), TransitionError> {
    let mut player = take_player(next)?;
    player.pos = None;
    next.grid = Arc::clone(grid);
    next.index.clear();
    next.entities = BTreeMap::from([(EntityId::player(), player)]);
    Ok(())
}

fn spawn(next: &mut WorldState, id: &EntityId, entity: Entity) -> Result<(), TransitionError> {
    if next.entities.contains_key(id) {
        return Err(TransitionError::DuplicateEntity(id.clone()));
    }
    let cells = match entity.pos {
        Some(anchor) => footprint(entity.kind, anchor).ok_or(TransitionError::OutOfBounds(anchor))?,
        None => Vec::new(),
    };
    check_cells(next, id, &cells)?;
    next.index.occupy(&cells, id);
    next.entities.insert(id.clone(), entity);
    Ok(())
}

fn relocate(next: &mut WorldState, id: &EntityId, anchor: Pos) -> Result<(), TransitionError> {
    let kind = entity_mut(next, id)?.kind;
    let cells = footprint(kind, anchor).ok_or(TransitionError::OutOfBounds(anchor))?;
    check_cells(next, id, &cells)?;

    let entity = entity_mut(next, id)?;
    let previous = entity.cells();
    entity.pos = Some(anchor);
    next.index.vacate(&previous);
    next.index.occupy(&cells, id);
    Ok(())
}

/// Every destination cell must be floor inside the grid and free of other occupants.
fn check_cells(state: &WorldState, id: &EntityId, cells: &[Pos]) -> Result<(), TransitionError> {
    for &pos in cells {
        if !state.grid.in_bounds(pos) {
            return Err(TransitionError::OutOfBounds(pos));
        }
        if !state.grid.is_floor(pos) {
            return Err(TransitionError::NotFloor(pos));
        }
        if let Some(occupant) = state.index.occupant(pos)
            && occupant != id
        {
            return Err(TransitionError::CellOccupied { pos, occupant: occupant.clone() });
        }
    }
    Ok(())
}

fn placed_anchor(state: &WorldState, id: &EntityId) -> Result<Pos, TransitionError> {
    let entity =
        state.entities.get(id).ok_or_else(|| TransitionError::UnknownEntity(id.clone()))?;
    entity.pos.ok_or_else(|| TransitionError::NotPlaced(id.clone()))
}

fn entity_mut<'a>(
    state: &'a mut WorldState,
    id: &EntityId,
) -> Result<&'a mut Entity, TransitionError> {
    state.entities.get_mut(id).ok_or_else(|| TransitionError::UnknownEntity(id.clone()))
}

/// Disjoint borrows of the player's combat stats and progression.
struct PlayerMut<'a> {
    attack: &'a mut i32,
    health: &'a mut i32,
    progress: &'a mut Progression,
}

fn player_mut(state: &mut WorldState) -> Result<PlayerMut<'_>, TransitionError> {
    let player = entity_mut(state, &EntityId::player())?;
    let Entity { attack, health, progression: Some(progress), .. } = player else {
        return Err(TransitionError::UnknownEntity(EntityId::player()));
    };
    Ok(PlayerMut { attack, health, progress })
}

fn take_player(state: &mut WorldState) -> Result<Entity, TransitionError> {
    let player_id = EntityId::player();
    state.entities.remove(&player_id).ok_or(TransitionError::UnknownEntity(player_id))
}
