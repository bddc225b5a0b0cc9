//! Room rectangles and rejection-sampling placement.

use serde::{Deserialize, Serialize};

use crate::config::RoomParams;
use crate::error::GenerationError;
use crate::rng::DungeonRng;

use super::cell::CellType;
use super::grid::{Coord, Grid};

/// Inner attempt budget; resets on every successful placement. Exhausting it
/// restarts the whole placement on a fresh grid.
const PLACEMENT_TRIES: u32 = 200;

/// An axis-aligned room rectangle, wall border included.
///
/// Immutable once placed; the interior (everything inside the one-cell
/// border) is floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// A room's four exit sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    North,
    South,
    West,
    East,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::West, Side::East];
}

impl Room {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rightmost column covered by this room (border included)
    pub const fn right(&self) -> usize {
        self.x + self.width - 1
    }

    /// Bottommost row covered by this room (border included)
    pub const fn bottom(&self) -> usize {
        self.y + self.height - 1
    }

    /// Squared distance of the top-left corner to the grid origin.
    ///
    /// A cheap sort key for corridor chaining, not a real graph metric.
    pub const fn distance_to_origin(&self) -> usize {
        self.x * self.x + self.y * self.y
    }

    /// Center cell of the room
    pub const fn center(&self) -> Coord {
        Coord::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Overlap test on full extents, border included. Touching edges do not
    /// count as overlap; sharing any cell does.
    pub const fn overlaps(&self, other: &Room) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    /// Whether a side has clearance between the room border and the grid
    /// boundary, so a door there opens onto at least one outside cell.
    pub fn side_is_valid(&self, side: Side, grid: &Grid) -> bool {
        match side {
            Side::North => self.y >= 1,
            Side::South => self.bottom() + 1 < grid.height(),
            Side::West => self.x >= 1,
            Side::East => self.right() + 1 < grid.width(),
        }
    }

    /// Random door coordinate on a side's border wall, corners excluded
    pub fn door_on(&self, side: Side, rng: &mut DungeonRng) -> Coord {
        match side {
            Side::North => Coord::new(rng.between(self.x + 1, self.right() - 1), self.y),
            Side::South => Coord::new(rng.between(self.x + 1, self.right() - 1), self.bottom()),
            Side::West => Coord::new(self.x, rng.between(self.y + 1, self.bottom() - 1)),
            Side::East => Coord::new(self.right(), rng.between(self.y + 1, self.bottom() - 1)),
        }
    }
}

/// Place `params.count` non-overlapping rooms by rejection sampling.
///
/// Rooms larger than the grid (or smaller than the 3-cell minimum) are
/// rejected up front with `InvalidConfiguration`; the sampling arithmetic
/// below assumes validated bounds. Returns the carved grid and the placed
/// rooms, or `GenerationExhausted` once `max_restarts` fresh-grid restarts
/// have been burned.
pub fn place_rooms(
    width: usize,
    height: usize,
    params: &RoomParams,
    max_restarts: u32,
    rng: &mut DungeonRng,
) -> Result<(Grid, Vec<Room>), GenerationError> {
    params.validate(width, height)?;

    for _ in 0..max_restarts {
        let mut grid = Grid::new(width, height);
        let mut rooms: Vec<Room> = Vec::with_capacity(params.count);
        let mut tries = 0u32;

        while rooms.len() < params.count && tries < PLACEMENT_TRIES {
            let w = rng.between(params.min_width, params.max_width);
            let h = rng.between(params.min_height, params.max_height);
            let x = rng.between(0, width - w);
            let y = rng.between(0, height - h);
            let room = Room::new(x, y, w, h);

            if rooms.iter().any(|r| r.overlaps(&room)) {
                tries += 1;
                continue;
            }

            carve_room(&mut grid, &room);
            rooms.push(room);
            tries = 0;
        }

        if rooms.len() == params.count {
            return Ok((grid, rooms));
        }
    }

    Err(GenerationError::GenerationExhausted {
        restarts: max_restarts,
    })
}

/// Mark a room's border cells as wall and its interior as floor
fn carve_room(grid: &mut Grid, room: &Room) {
    for y in room.y..=room.bottom() {
        for x in room.x..=room.right() {
            let border =
                x == room.x || x == room.right() || y == room.y || y == room.bottom();
            grid.set_type(
                x,
                y,
                if border { CellType::Wall } else { CellType::Free },
            );
        }
    }
}
