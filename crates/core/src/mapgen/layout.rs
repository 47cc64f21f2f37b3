//! Room rectangles and the room placer that grows the floor network one door at a time.

use log::trace;

use crate::config::GenerationParams;
use crate::grid::TileGrid;
use crate::rng::GameRng;
use crate::types::{Direction, Pos, TileKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RoomRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl RoomRect {
    pub fn right(self) -> i32 {
        self.x + self.width - 1
    }

    pub fn bottom(self) -> i32 {
        self.y + self.height - 1
    }

    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= self.x && pos.x <= self.right() && pos.y >= self.y && pos.y <= self.bottom()
    }

    pub fn cells(self) -> impl Iterator<Item = Pos> {
        (self.x..=self.right())
            .flat_map(move |x| (self.y..=self.bottom()).map(move |y| Pos::new(x, y)))
    }
}

/// A wall cell with floor on one side; carving it turns it into a door.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Attachment {
    pub(super) pos: Pos,
    pub(super) open: Direction,
}

/// A room accepted by the placer together with the door joining it to existing floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct PlacedRoom {
    pub(super) room: RoomRect,
    pub(super) door: Pos,
}

/// Reason the placer stopped without carving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct PlacementFailure {
    pub(super) attempts: u32,
}

pub(super) fn carve_room(grid: &mut TileGrid, room: RoomRect) {
    for pos in room.cells() {
        grid.set_tile(pos, TileKind::Floor);
    }
}

/// Direction of the first floor neighbour of a wall cell, checked west, east, north, south.
pub(super) fn open_direction(grid: &TileGrid, pos: Pos) -> Option<Direction> {
    if !grid.in_bounds(pos) || grid.tile_at(pos) != TileKind::Wall {
        return None;
    }
    [Direction::West, Direction::East, Direction::North, Direction::South]
        .into_iter()
        .find(|&direction| grid.is_floor(pos.step(direction)))
}

pub(super) fn find_attachment_point(
    grid: &TileGrid,
    rng: &mut GameRng,
    max_samples: u32,
) -> Option<Attachment> {
    for _ in 0..max_samples {
        let pos = Pos::new(
            rng.below(grid.width().max(0) as u32) as i32,
            rng.below(grid.height().max(0) as u32) as i32,
        );
        if let Some(open) = open_direction(grid, pos) {
            return Some(Attachment { pos, open });
        }
    }
    None
}

/// Signed shift of a room along the wall it is attached by, so doors are not always centred.
pub(super) fn door_offset(rng: &mut GameRng, length: i32) -> i32 {
    rng.below(length.max(1) as u32) as i32 - (length - 1) / 2
}

/// Rectangle for a `width` x `height` room on the far side of `attachment` from its open neighbour.
pub(super) fn orient_room(
    attachment: Attachment,
    width: i32,
    height: i32,
    offset: i32,
) -> RoomRect {
    let Pos { x, y } = attachment.pos;
    let (room_x, room_y) = match attachment.open {
        Direction::East => (x - width, y - height / 2 + offset),
        Direction::West => (x + 1, y - height / 2 + offset),
        Direction::North => (x - width / 2 + offset, y + 1),
        Direction::South => (x - width / 2 + offset, y - height),
    };
    RoomRect { x: room_x, y: room_y, width, height }
}

/// The far edge must stay strictly inside the grid, leaving the last row and column as wall.
pub(super) fn fits_grid(grid: &TileGrid, room: RoomRect) -> bool {
    room.x >= 0
        && room.y >= 0
        && room.x + room.width < grid.width()
        && room.y + room.height < grid.height()
}

/// Accepts a room only when every column slice it spans is entirely wall.
pub(super) fn is_clear(grid: &TileGrid, room: RoomRect) -> bool {
    (room.x..=room.right()).all(|x| {
        (room.y..=room.bottom()).all(|y| grid.tile_at(Pos::new(x, y)) == TileKind::Wall)
    })
}

pub(super) fn place_one_room(
    grid: &mut TileGrid,
    params: &GenerationParams,
    rng: &mut GameRng,
) -> Result<PlacedRoom, PlacementFailure> {
    for attempt in 1..=params.max_placement_attempts {
        let Some(attachment) = find_attachment_point(grid, rng, params.max_attachment_samples)
        else {
            return Err(PlacementFailure { attempts: attempt });
        };

        let width = rng.range_i32(params.min_room_size, params.max_room_size);
        let height = rng.range_i32(params.min_room_size, params.max_room_size);
        let offset = match attachment.open {
            Direction::East | Direction::West => door_offset(rng, height),
            Direction::North | Direction::South => door_offset(rng, width),
        };
        let room = orient_room(attachment, width, height, offset);

        if !fits_grid(grid, room) || !is_clear(grid, room) {
            trace!("room {room:?} rejected on attempt {attempt}");
            continue;
        }

        carve_room(grid, room);
        grid.set_tile(attachment.pos, TileKind::Floor);
        return Ok(PlacedRoom { room, door: attachment.pos });
    }
    Err(PlacementFailure { attempts: params.max_placement_attempts })
}
