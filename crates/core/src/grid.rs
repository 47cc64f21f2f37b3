//! Wall/floor tile matrix for one dungeon level.

use serde::{Deserialize, Serialize};

use crate::types::{Pos, TileKind};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    /// A grid of the given size with every cell set to wall.
    pub fn filled(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self { width, height, tiles: vec![TileKind::Wall; width as usize * height as usize] }
    }

    /// Builds a grid from rows of `#` (wall) and `.` (floor); other characters read as floor.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0) as i32;
        let mut grid = Self::filled(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch != '#' {
                    grid.set_tile(Pos::new(x as i32, y as i32), TileKind::Floor);
                }
            }
        }
        grid
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Out-of-bounds coordinates read as wall.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn is_floor(&self, pos: Pos) -> bool {
        self.tile_at(pos) == TileKind::Floor
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Pos::new(x, y)))
    }

    pub fn floor_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.positions().filter(|&pos| self.is_floor(pos))
    }

    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|&&tile| tile == TileKind::Floor).count()
    }

    /// Stable byte encoding used for fingerprints.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.tiles.len());
        bytes.extend(self.width.to_le_bytes());
        bytes.extend(self.height.to_le_bytes());
        bytes.extend(self.tiles.iter().map(|tile| match tile {
            TileKind::Wall => 0_u8,
            TileKind::Floor => 1,
        }));
        bytes
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * (self.width as usize) + (pos.x as usize)
    }
}
