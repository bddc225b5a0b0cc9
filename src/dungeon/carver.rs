//! Cave carving: randomized depth-first "recursive backtracker" plus the
//! cleanup passes that make the result read as a cave instead of a maze.

use crate::rng::DungeonRng;

use super::cell::CellType;
use super::grid::{Coord, Grid, CARDINALS};

/// One suspended step of the depth-first walk.
struct Frame {
    x: usize,
    y: usize,
    dirs: [(i32, i32); 4],
    next: usize,
}

/// Carve a cave into an all-wall grid, starting from `start`.
///
/// From the current cell the four directions are shuffled; expanding into an
/// unvisited neighbor marks the current cell visited and free. Once the goal
/// cell has been visited, each cell may expand into at most `branch_limit`
/// neighbors, which keeps the carving sparse; until then expansion is
/// unrestricted so the goal is always reached. Carving stays one cell away
/// from the grid edge, leaving the border walls intact.
pub fn carve(
    grid: &mut Grid,
    start: Coord,
    goal: Coord,
    branch_limit: u8,
    rng: &mut DungeonRng,
) {
    let mut visited_goal = false;
    let mut stack = vec![new_frame(start.x, start.y, rng)];

    while let Some(top) = stack.last_mut() {
        if top.next >= 4 {
            stack.pop();
            continue;
        }
        let (dx, dy) = top.dirs[top.next];
        top.next += 1;
        let (x, y) = (top.x, top.y);

        let nx = x as i32 + dx;
        let ny = y as i32 + dy;
        if !carveable(grid, nx, ny) {
            continue;
        }
        let (nx, ny) = (nx as usize, ny as usize);
        if grid.cell(nx, ny).visited {
            continue;
        }

        let cell = grid.cell_mut(x, y);
        cell.visited = true;
        cell.typ = CellType::Free;
        cell.visited_neighbors = cell.visited_neighbors.saturating_add(1);
        let expansions = cell.visited_neighbors;

        if nx == goal.x && ny == goal.y {
            visited_goal = true;
        }

        if expansions <= branch_limit || !visited_goal {
            stack.push(new_frame(nx, ny, rng));
        }
    }
}

fn new_frame(x: usize, y: usize, rng: &mut DungeonRng) -> Frame {
    let mut dirs = CARDINALS;
    rng.shuffle(&mut dirs);
    Frame {
        x,
        y,
        dirs,
        next: 0,
    }
}

/// The walk may only enter cells one step inside the grid edge
fn carveable(grid: &Grid, x: i32, y: i32) -> bool {
    x >= 1
        && y >= 1
        && (x as usize) < grid.width() - 1
        && (y as usize) < grid.height() - 1
}

/// Convert walls with `threshold` or more free orthogonal neighbors to free
/// space, re-scanning until a full pass changes nothing.
pub fn remove_lonely_walls(grid: &mut Grid, threshold: usize) {
    loop {
        let mut changed = false;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.cell(x, y).typ.is_wall()
                    && grid.free_neighbor_count(x, y) >= threshold
                {
                    grid.set_type(x, y, CellType::Free);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
}

/// Tighten accidental two-wide gaps into one-wide corridors: next to a wall,
/// a free cell backed by another wall one step further gets re-walled.
pub fn connect_corridors(grid: &mut Grid) {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if !grid.cell(x, y).typ.is_wall() {
                continue;
            }
            for (dx, dy) in CARDINALS {
                let (ox, oy) = (x as i32 + dx, y as i32 + dy);
                let (tx, ty) = (x as i32 + 2 * dx, y as i32 + 2 * dy);
                let one_free = grid
                    .get(ox, oy)
                    .is_some_and(|c| c.typ == CellType::Free);
                let two_wall = grid.get(tx, ty).is_some_and(|c| c.typ.is_wall());
                if one_free && two_wall {
                    grid.set_type(ox as usize, oy as usize, CellType::Wall);
                }
            }
        }
    }
}
