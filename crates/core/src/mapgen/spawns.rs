//! Per-level spawn roster and the free-cell samplers used to place it.

use crate::config::Rules;
use crate::error::GenerationError;
use crate::grid::TileGrid;
use crate::rng::GameRng;
use crate::state::LocationIndex;
use crate::types::{EXIT_ID, EntityId, EntityKind, Pos};

/// One entity a level starts with. Placement is decided separately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnRequest {
    pub id: EntityId,
    pub kind: EntityKind,
    pub health: i32,
    pub attack: i32,
}

/// Everything a fresh level contains besides the player, in spawn order: the level's weapon,
/// then alternating health pickups and enemies, then the exit or, on the boss level, the boss.
pub fn level_roster(level: u32, rules: &Rules) -> Vec<SpawnRequest> {
    let multiplier = Rules::level_multiplier(level);
    let mut roster = Vec::with_capacity(rules.items_per_level as usize * 2 + 2);

    if let Some(weapon) = rules.weapon_for_level(level) {
        roster.push(SpawnRequest {
            id: EntityId::new(weapon.name.as_str()),
            kind: EntityKind::Weapon,
            health: 0,
            attack: weapon.attack,
        });
    }

    for i in 0..rules.items_per_level {
        roster.push(SpawnRequest {
            id: EntityId::new(format!("health{i}")),
            kind: EntityKind::Health,
            health: rules.health_pickup_value.saturating_mul(multiplier),
            attack: 0,
        });
        roster.push(SpawnRequest {
            id: EntityId::new(format!("enemy{i}")),
            kind: EntityKind::Enemy,
            health: rules.enemy.health.saturating_mul(multiplier),
            attack: rules.enemy.attack.saturating_mul(multiplier),
        });
    }

    if level < rules.boss_level {
        roster.push(SpawnRequest {
            id: EntityId::new(EXIT_ID),
            kind: EntityKind::Exit,
            health: 0,
            attack: 0,
        });
    } else if level == rules.boss_level {
        roster.push(SpawnRequest {
            id: EntityId::boss(),
            kind: EntityKind::Boss,
            health: rules.boss.health,
            attack: rules.boss.attack,
        });
    }
    roster
}

/// Uniform rejection sampler over floor cells nobody occupies.
pub fn find_empty_floor_cell(
    grid: &TileGrid,
    index: &LocationIndex,
    rng: &mut GameRng,
    max_samples: u32,
) -> Result<Pos, GenerationError> {
    find_empty_floor_block(grid, index, rng, 1, max_samples)
}

/// Anchor of a free `size` x `size` block of floor, sampled the same way as single cells.
pub fn find_empty_floor_block(
    grid: &TileGrid,
    index: &LocationIndex,
    rng: &mut GameRng,
    size: i32,
    max_samples: u32,
) -> Result<Pos, GenerationError> {
    let width = grid.width().max(0) as u32;
    let height = grid.height().max(0) as u32;
    if width > 0 && height > 0 {
        for _ in 0..max_samples {
            let anchor = Pos::new(rng.below(width) as i32, rng.below(height) as i32);
            let free = (0..size).all(|dy| {
                (0..size).all(|dx| {
                    let pos = Pos::new(anchor.x + dx, anchor.y + dy);
                    grid.is_floor(pos) && !index.is_occupied(pos)
                })
            });
            if free {
                return Ok(anchor);
            }
        }
    }
    Err(GenerationError::NoFreeCell { samples: max_samples })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::types::TileKind;

    #[test]
    fn first_level_roster_matches_the_rules_table() {
        let rules = GameConfig::default().rules;
        let roster = level_roster(1, &rules);

        assert_eq!(roster.len(), 1 + 14 + 1);
        assert_eq!(
            roster[0],
            SpawnRequest {
                id: "Staff".into(),
                kind: EntityKind::Weapon,
                health: 0,
                attack: 5
            }
        );
        assert_eq!(roster[1].id, EntityId::new("health0"));
        assert_eq!(roster[1].health, 40);
        assert_eq!((roster[2].health, roster[2].attack), (30, 30));
        assert_eq!(roster.last().map(|spawn| spawn.kind), Some(EntityKind::Exit));
    }

    #[test]
    fn boss_level_replaces_the_exit_with_the_boss() {
        let rules = GameConfig::default().rules;
        let roster = level_roster(rules.boss_level, &rules);
        assert!(roster.iter().all(|spawn| spawn.kind != EntityKind::Exit));
        let boss = roster.last().expect("boss");
        assert_eq!((boss.kind, boss.health, boss.attack), (EntityKind::Boss, 500, 125));
        assert_eq!(roster[0].id, EntityId::new("Dragon Spear"));
    }

    #[test]
    fn levels_past_the_boss_have_neither_exit_nor_boss() {
        let rules = GameConfig::default().rules;
        let roster = level_roster(rules.boss_level + 1, &rules);
        assert!(
            roster.iter().all(|spawn| !matches!(spawn.kind, EntityKind::Exit | EntityKind::Boss))
        );
    }

    #[test]
    fn sampler_skips_walls_and_occupied_cells() {
        let grid = TileGrid::from_rows(&["###", "#..", "###"]);
        let mut index = LocationIndex::default();
        index.occupy(&[Pos::new(1, 1)], &EntityId::player());
        let mut rng = GameRng::seed_from_u64(9);
        for _ in 0..20 {
            let pos = find_empty_floor_cell(&grid, &index, &mut rng, 10_000).expect("free cell");
            assert_eq!(pos, Pos::new(2, 1));
            assert_eq!(grid.tile_at(pos), TileKind::Floor);
        }
    }

    #[test]
    fn full_board_reports_no_free_cell() {
        let grid = TileGrid::from_rows(&["#.#"]);
        let mut index = LocationIndex::default();
        index.occupy(&[Pos::new(1, 0)], &EntityId::player());
        let mut rng = GameRng::seed_from_u64(9);
        assert_eq!(
            find_empty_floor_cell(&grid, &index, &mut rng, 500),
            Err(GenerationError::NoFreeCell { samples: 500 })
        );
    }

    #[test]
    fn block_sampler_needs_the_whole_square_free() {
        let grid = TileGrid::from_rows(&["#####", "#..##", "#..##", "#.###", "#####"]);
        let index = LocationIndex::default();
        let mut rng = GameRng::seed_from_u64(4);
        let anchor = find_empty_floor_block(&grid, &index, &mut rng, 2, 10_000).expect("block");
        assert_eq!(anchor, Pos::new(1, 1));
    }
}
