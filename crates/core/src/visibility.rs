//! Light radius and render-window math for front ends.
//! Nothing here affects simulation; the engine never consults it.

use crate::config::ViewportConfig;
use crate::grid::TileGrid;
use crate::state::{Viewport, WorldState};
use crate::types::{EntityKind, Pos, TileKind};

/// A cell is lit inside the circle of `radius` around the player, clipped to the bounding square.
pub fn is_lit(player: Pos, cell: Pos, radius: i32) -> bool {
    let dx = i64::from(cell.x - player.x);
    let dy = i64::from(cell.y - player.y);
    let r = i64::from(radius);
    r > 0 && dx * dx + dy * dy < r * r && dx.abs() <= r && dy.abs() <= r
}

/// Half-open rectangle of cells a front end paints, `left..right` by `top..bottom`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleWindow {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl VisibleWindow {
    pub fn width(self) -> i32 {
        self.right - self.left
    }

    pub fn height(self) -> i32 {
        self.bottom - self.top
    }

    /// Row-major positions inside the window.
    pub fn rows(self) -> impl Iterator<Item = impl Iterator<Item = Pos>> {
        (self.top..self.bottom).map(move |y| (self.left..self.right).map(move |x| Pos::new(x, y)))
    }
}

/// Centres a viewport-sized window on the player, then slides it back inside the grid.
pub fn visible_window(
    player: Pos,
    viewport: Viewport,
    grid: &TileGrid,
    config: &ViewportConfig,
) -> VisibleWindow {
    let tile = config.tile_size.max(1);
    let cols = (viewport.width / tile) as i32;
    let rows = ((viewport.height / tile) as i32 - config.header_rows as i32).max(0);

    let (left, right) = clamp_span(player.x - (cols + 1) / 2, cols, grid.width());
    let (top, bottom) = clamp_span(player.y - (rows + 1) / 2, rows, grid.height());
    VisibleWindow { left, top, right, bottom }
}

fn clamp_span(start: i32, len: i32, limit: i32) -> (i32, i32) {
    let mut start = start.max(0);
    let mut end = start + len;
    if end > limit {
        start = if len > limit { 0 } else { start - (end - limit) };
        end = limit;
    }
    (start, end)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellContent {
    Wall,
    Floor,
    Entity(EntityKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellView {
    pub content: CellContent,
    pub lit: bool,
}

/// What a front end should draw at `pos`. With darkness off every cell is lit.
pub fn classify_cell(state: &WorldState, pos: Pos, radius: i32) -> CellView {
    let content = match state.entity_at(pos) {
        Some((_, entity)) => CellContent::Entity(entity.kind),
        None => match state.grid().tile_at(pos) {
            TileKind::Wall => CellContent::Wall,
            TileKind::Floor => CellContent::Floor,
        },
    };
    let lit = !state.in_darkness()
        || state.player().and_then(|player| player.pos).is_some_and(|at| is_lit(at, pos, radius));
    CellView { content, lit }
}
