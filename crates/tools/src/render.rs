//! Plain-text rendering: whole grids for `generate`, fogged windows for `play`.

use std::fmt::Write;

use crawl_core::{
    CellContent, EntityKind, GameConfig, LogEvent, Pos, TileGrid, TileKind, WorldState,
    classify_cell, visible_window,
};

pub fn glyph(content: CellContent) -> char {
    match content {
        CellContent::Wall => '#',
        CellContent::Floor => '.',
        CellContent::Entity(kind) => match kind {
            EntityKind::Player => '@',
            EntityKind::Enemy => 'e',
            EntityKind::Boss => 'D',
            EntityKind::Weapon => ')',
            EntityKind::Health => '+',
            EntityKind::Exit => '>',
        },
    }
}

pub fn render_grid(grid: &TileGrid) -> String {
    let mut out = String::with_capacity(((grid.width() + 1) * grid.height()) as usize);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            out.push(match grid.tile_at(Pos::new(x, y)) {
                TileKind::Wall => '#',
                TileKind::Floor => '.',
            });
        }
        out.push('\n');
    }
    out
}

/// The window a screen of the current viewport would show. Unlit cells are blank.
pub fn render_view(state: &WorldState, config: &GameConfig) -> String {
    let Some(player) = state.player().and_then(|player| player.pos) else {
        return String::new();
    };
    let window = visible_window(player, state.viewport(), state.grid(), &config.viewport);
    let mut out = String::new();
    for row in window.rows() {
        for pos in row {
            let cell = classify_cell(state, pos, config.rules.light_radius);
            out.push(if cell.lit { glyph(cell.content) } else { ' ' });
        }
        out.push('\n');
    }
    out
}

pub fn status_line(state: &WorldState) -> String {
    let mut line = format!("Dungeon {}", state.level());
    if let Some(player) = state.player() {
        let _ = write!(line, " | Health {} | Attack {}", player.health, player.attack);
    }
    if let Some(progress) = state.player_progress() {
        let _ = write!(
            line,
            " | Weapon {} | Level {} | Next level in {} xp",
            progress.weapon, progress.level, progress.xp_to_next
        );
    }
    line
}

pub fn describe(event: &LogEvent) -> String {
    match event {
        LogEvent::WeaponUnlocked { name } => format!("You unlocked the {name}!"),
        LogEvent::HealthAdded { amount } => format!("You gained {amount} health."),
        LogEvent::DamageReceived { amount } => format!("You took {amount} damage."),
        LogEvent::EnemyHealthRemaining { enemy, health } => {
            format!("{enemy} has {health} health left.")
        }
        LogEvent::EnemyDefeated { enemy, xp } => {
            format!("You defeated {enemy} and earned {xp} xp.")
        }
        LogEvent::LeveledUp { level } => format!("You reached level {level}!"),
        LogEvent::NextLevel { level } => format!("Welcome to dungeon {level}."),
        LogEvent::PlayerKilled => "You died. A new run begins.".to_string(),
        LogEvent::BossDefeated => "The dragon is slain. You win!".to_string(),
    }
}
