//! Corridor carving between placed rooms.
//!
//! Rooms are chained in order of squared distance to the grid origin — a
//! cheap proxy metric, not a minimum spanning tree — and each consecutive
//! pair is joined through a carved door on one side of each room. The chain
//! topology guarantees overall connectivity without minimizing corridor
//! length.

use crate::error::GenerationError;
use crate::path::find_path;
use crate::rng::DungeonRng;

use super::cell::CellType;
use super::grid::{Coord, Grid};
use super::room::{Room, Side};

/// Connect every room into one walkable chain.
///
/// Fails with `PathNotFound` if any pair cannot be joined, in which case the
/// whole generation attempt must retry.
pub fn connect(
    grid: &mut Grid,
    rooms: &[Room],
    rng: &mut DungeonRng,
) -> Result<(), GenerationError> {
    if rooms.len() < 2 {
        return Ok(());
    }

    let mut sorted = rooms.to_vec();
    sorted.sort_by_key(Room::distance_to_origin);

    for pair in sorted.windows(2) {
        let door_a = pick_door(&pair[0], grid, rng);
        let door_b = pick_door(&pair[1], grid, rng);

        grid.set_type(door_a.x, door_a.y, CellType::Free);
        grid.set_type(door_b.x, door_b.y, CellType::Free);

        // Permissive predicate: the corridor may cut through anything, and
        // every cell on the route is carved free afterwards.
        let route = find_path(grid, door_a, door_b, |_, _| true)?;
        for cell in route {
            grid.set_type(cell.x, cell.y, CellType::Free);
        }
    }

    Ok(())
}

/// Pick a door coordinate on a random valid side of the room.
///
/// A side is valid only with clearance between the room border and the grid
/// boundary; a room spanning the whole grid has none, and then any side
/// still carries the door.
fn pick_door(room: &Room, grid: &Grid, rng: &mut DungeonRng) -> Coord {
    let valid: Vec<Side> = Side::ALL
        .into_iter()
        .filter(|side| room.side_is_valid(*side, grid))
        .collect();

    let side = match rng.choose(&valid) {
        Some(&side) => side,
        None => Side::ALL[rng.rn2(4) as usize],
    };

    room.door_on(side, rng)
}
