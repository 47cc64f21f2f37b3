use std::fmt;

use serde::{Deserialize, Serialize};

/// Grid coordinate. `x` indexes columns, `y` indexes rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const ORIGIN: Pos = Pos { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `None` when either coordinate leaves the `i32` range.
    pub const fn offset(self, delta: Delta) -> Option<Self> {
        match (self.x.checked_add(delta.dx), self.y.checked_add(delta.dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }

    pub const fn saturating_offset(self, delta: Delta) -> Self {
        Self { x: self.x.saturating_add(delta.dx), y: self.y.saturating_add(delta.dy) }
    }

    pub const fn step(self, direction: Direction) -> Self {
        self.saturating_offset(direction.delta())
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

impl Delta {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::East, Direction::South, Direction::West];

    /// Unit step; north is towards row 0.
    pub const fn delta(self) -> Delta {
        match self {
            Direction::North => Delta::new(0, -1),
            Direction::East => Delta::new(1, 0),
            Direction::South => Delta::new(0, 1),
            Direction::West => Delta::new(-1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Player,
    Enemy,
    Weapon,
    Health,
    Boss,
    Exit,
}

impl EntityKind {
    /// Edge length of the square block of cells the entity occupies.
    pub const fn footprint(self) -> i32 {
        match self {
            EntityKind::Boss => 2,
            _ => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn player() -> Self {
        Self::new(PLAYER_ID)
    }

    pub fn boss() -> Self {
        Self::new(BOSS_ID)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

pub const PLAYER_ID: &str = "player";
pub const BOSS_ID: &str = "boss";
pub const EXIT_ID: &str = "exit";

/// Player-facing requests a front end translates input into.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Move(Direction),
    NewGame,
    ToggleDarkness,
    Resize { width: u32, height: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

/// What a single movement intent turned into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Blocked,
    Moved,
    PickedUpWeapon { name: EntityId, attack_bonus: i32 },
    Healed { amount: i32 },
    Fought { dealt: i32, received: i32 },
    EnemyDefeated { enemy: EntityId, xp: i32 },
    Descended { level: u32 },
    Finished(RunOutcome),
}

/// Notifications a front end may surface as messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    WeaponUnlocked { name: EntityId },
    HealthAdded { amount: i32 },
    DamageReceived { amount: i32 },
    EnemyHealthRemaining { enemy: EntityId, health: i32 },
    EnemyDefeated { enemy: EntityId, xp: i32 },
    LeveledUp { level: u32 },
    NextLevel { level: u32 },
    PlayerKilled,
    BossDefeated,
}
