//! Tunable generation parameters and game rules.
//!
//! Defaults reproduce the classic five-level dragon hunt. Front ends usually load overrides from
//! a TOML file; every section and field is optional there.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub generation: GenerationParams,
    pub rules: Rules,
    pub viewport: ViewportConfig,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GenerationError> {
        self.generation.validate()?;
        let rules = &self.rules;
        if rules.damage_range < 0 {
            return Err(GenerationError::InvalidParameters("damage_range must not be negative"));
        }
        if rules.boss_level == 0 {
            return Err(GenerationError::InvalidParameters("boss_level must be at least 1"));
        }
        if rules.weapons.is_empty() {
            return Err(GenerationError::InvalidParameters("weapon table must not be empty"));
        }
        if self.viewport.tile_size == 0 {
            return Err(GenerationError::InvalidParameters("tile_size must be positive"));
        }
        Ok(())
    }
}

/// Largest `width * height` a level may have.
pub const MAX_GRID_CELLS: i32 = 1 << 24;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    pub width: i32,
    pub height: i32,
    pub max_room_size: i32,
    pub min_room_size: i32,
    pub room_count: u32,
    pub seed_room_x: i32,
    pub seed_room_y: i32,
    pub seed_room_size: i32,
    /// Cap on whole-room attempts per placed room.
    pub max_placement_attempts: u32,
    /// Cap on random samples while hunting for a wall cell next to floor.
    pub max_attachment_samples: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            max_room_size: 20,
            min_room_size: 6,
            room_count: 20,
            seed_room_x: 30,
            seed_room_y: 30,
            seed_room_size: 15,
            max_placement_attempts: 10_000,
            max_attachment_samples: 100_000,
        }
    }
}

impl GenerationParams {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GenerationError::InvalidParameters("grid dimensions must be positive"));
        }
        if self.width.checked_mul(self.height).is_none_or(|cells| cells > MAX_GRID_CELLS) {
            return Err(GenerationError::InvalidParameters("grid has too many cells"));
        }
        if self.min_room_size < 1 {
            return Err(GenerationError::InvalidParameters("min_room_size must be at least 1"));
        }
        if self.max_room_size < self.min_room_size {
            return Err(GenerationError::InvalidParameters(
                "max_room_size must not be below min_room_size",
            ));
        }
        if self.max_room_size > self.width.min(self.height) {
            return Err(GenerationError::InvalidParameters(
                "max_room_size must not exceed the grid dimensions",
            ));
        }
        if self.max_placement_attempts == 0 || self.max_attachment_samples == 0 {
            return Err(GenerationError::InvalidParameters("retry caps must be positive"));
        }
        if self.seed_room_size < 1
            || self.seed_room_x < 0
            || self.seed_room_y < 0
            || self.seed_room_x.checked_add(self.seed_room_size).is_none_or(|x| x > self.width)
            || self.seed_room_y.checked_add(self.seed_room_size).is_none_or(|y| y > self.height)
        {
            return Err(GenerationError::SeedRoomOutOfBounds {
                x: self.seed_room_x,
                y: self.seed_room_y,
                size: self.seed_room_size,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub name: String,
    pub attack: i32,
}

impl WeaponSpec {
    fn new(name: &str, attack: i32) -> Self {
        Self { name: name.to_string(), attack }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyMultipliers {
    pub health: i32,
    pub attack: i32,
    pub xp: i32,
}

impl Default for EnemyMultipliers {
    fn default() -> Self {
        Self { health: 15, attack: 15, xp: 10 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerMultipliers {
    pub base_health: i32,
    pub base_attack: i32,
    pub health: i32,
    pub attack: i32,
    pub to_next_level: i32,
}

impl Default for PlayerMultipliers {
    fn default() -> Self {
        Self { base_health: 100, base_attack: 10, health: 5, attack: 10, to_next_level: 60 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossStats {
    pub attack: i32,
    pub health: i32,
}

impl Default for BossStats {
    fn default() -> Self {
        Self { attack: 125, health: 500 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub damage_range: i32,
    pub light_radius: i32,
    pub boss_level: u32,
    pub items_per_level: u32,
    pub health_pickup_value: i32,
    pub enemy: EnemyMultipliers,
    pub player: PlayerMultipliers,
    pub boss: BossStats,
    /// Weapon found on level `n` is entry `n - 1`; deeper levels reuse the last entry.
    pub weapons: Vec<WeaponSpec>,
    pub max_free_cell_samples: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            damage_range: 5,
            light_radius: 10,
            boss_level: 5,
            items_per_level: 7,
            health_pickup_value: 20,
            enemy: EnemyMultipliers::default(),
            player: PlayerMultipliers::default(),
            boss: BossStats::default(),
            weapons: vec![
                WeaponSpec::new("Staff", 5),
                WeaponSpec::new("Hammer", 10),
                WeaponSpec::new("Hanzo Sword", 15),
                WeaponSpec::new("Blades of Chaos", 20),
                WeaponSpec::new("Dragon Spear", 30),
            ],
            max_free_cell_samples: 100_000,
        }
    }
}

impl Rules {
    pub fn weapon_for_level(&self, level: u32) -> Option<&WeaponSpec> {
        let index = (level.max(1) - 1) as usize;
        self.weapons.get(index).or_else(|| self.weapons.last())
    }

    /// Scale applied to level-dependent spawns: the level number plus one.
    pub fn level_multiplier(level: u32) -> i32 {
        i32::try_from(level).unwrap_or(i32::MAX).saturating_add(1)
    }

    pub fn enemy_xp(&self, level: u32) -> i32 {
        Self::level_multiplier(level).saturating_mul(self.enemy.xp)
    }

    /// Stat gains applied when a player at `player_level` crosses the xp threshold:
    /// `(attack, health, next xp_to_next)`.
    pub fn level_up_gains(&self, player_level: u32) -> (i32, i32, i32) {
        let next_level = Self::level_multiplier(player_level);
        (
            next_level.saturating_mul(self.player.attack),
            next_level.saturating_mul(self.player.health),
            next_level.saturating_add(1).saturating_mul(self.player.to_next_level),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub tile_size: u32,
    /// Rows reserved for the status header above the board.
    pub header_rows: u32,
    pub initial_width: u32,
    pub initial_height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { tile_size: 11, header_rows: 5, initial_width: 500, initial_height: 500 }
    }
}
