//! Grid pathfinding (A* over a 4-connected grid).
//!
//! The search is generic over a caller-supplied walkability predicate: during
//! corridor carving the predicate is the permissive "always true", while
//! runtime navigation callers pass the live grid's walkability plus whatever
//! entity-collision rules they enforce. A search owns its own node arena and
//! open/closed sets; nothing is retained between calls, so independent
//! callers (generation, player guidance, several enemy AIs) can interleave
//! invocations freely.

use hashbrown::HashSet;

use crate::dungeon::{Coord, Grid, CARDINALS};
use crate::error::PathNotFound;

/// Cost of one orthogonal step; diagonal moves do not exist.
const STEP_COST: u32 = 10;

/// Multiplier applied to the Manhattan heuristic.
const HEURISTIC_WEIGHT: u32 = 10;

/// One node of the search tree rooted at the start cell.
///
/// `parent` indexes into the arena owned by a single `find_path` call.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    x: usize,
    y: usize,
    parent: Option<usize>,
    g: u32,
    f: u32,
}

fn heuristic(x: usize, y: usize, goal: Coord) -> u32 {
    (Coord::new(x, y).manhattan(goal) as u32) * HEURISTIC_WEIGHT
}

/// Find a shortest path from `start` to `goal`, 4-connected.
///
/// The returned path runs from start (exclusive) to goal (inclusive). If the
/// open set empties before the goal is extracted the result is
/// `Err(PathNotFound)` — never a partial path to the closest-reached node.
///
/// Two deliberate quirks are part of the contract:
///
/// - Tie-break: the open list is scanned linearly and a candidate replaces
///   the running best whenever its `f` is less than *or equal*, so the
///   later-found node among equal-`f` entries wins. Tests depend on this
///   ordering being stable.
/// - Goal override: a neighbor within Manhattan distance 1 of the goal is
///   expandable even when `walkable` rejects it. This keeps the goal
///   reachable when its own tile is not walkable (e.g. an exit not yet
///   carved free), and several call sites rely on it.
///
/// Closed nodes are never reopened; an already-open node is evicted and
/// re-parented when a cost no greater than its current `g` is found.
pub fn find_path<W>(
    grid: &Grid,
    start: Coord,
    goal: Coord,
    walkable: W,
) -> Result<Vec<Coord>, PathNotFound>
where
    W: Fn(usize, usize) -> bool,
{
    let mut nodes: Vec<SearchNode> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut closed: HashSet<(usize, usize)> = HashSet::new();

    nodes.push(SearchNode {
        x: start.x,
        y: start.y,
        parent: None,
        g: 0,
        f: heuristic(start.x, start.y, goal),
    });
    open.push(0);

    loop {
        if open.is_empty() {
            return Err(PathNotFound { start, goal });
        }

        // Linear scan for minimum f; grids are tens-by-tens tiles, so a heap
        // would buy nothing observable. The <= keeps the tie-break contract.
        let mut best = 0;
        for (i, &id) in open.iter().enumerate() {
            if nodes[id].f <= nodes[open[best]].f {
                best = i;
            }
        }
        let current = open.remove(best);
        let (cx, cy) = (nodes[current].x, nodes[current].y);
        closed.insert((cx, cy));

        if cx == goal.x && cy == goal.y {
            return Ok(reconstruct(&nodes, current));
        }

        for (dx, dy) in CARDINALS {
            let nx = cx as i32 + dx;
            let ny = cy as i32 + dy;
            if !grid.in_bounds(nx, ny) {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);

            let near_goal = Coord::new(nx, ny).manhattan(goal) <= 1;
            if !walkable(nx, ny) && !near_goal {
                continue;
            }
            if closed.contains(&(nx, ny)) {
                continue;
            }

            let g = nodes[current].g + STEP_COST;

            if let Some(&id) = open
                .iter()
                .find(|&&id| nodes[id].x == nx && nodes[id].y == ny)
            {
                if nodes[id].g >= g {
                    // Evict the existing entry: re-point its parent and cost
                    // at the cheaper route through the current node.
                    nodes[id].parent = Some(current);
                    nodes[id].g = g;
                    nodes[id].f = g + heuristic(nx, ny, goal);
                }
            } else {
                nodes.push(SearchNode {
                    x: nx,
                    y: ny,
                    parent: Some(current),
                    g,
                    f: g + heuristic(nx, ny, goal),
                });
                open.push(nodes.len() - 1);
            }
        }
    }
}

/// Walk parent links back from the goal; the start node (the only one with
/// no parent) is excluded.
fn reconstruct(nodes: &[SearchNode], goal_id: usize) -> Vec<Coord> {
    let mut path = Vec::new();
    let mut current = goal_id;

    while let Some(parent) = nodes[current].parent {
        path.push(Coord::new(nodes[current].x, nodes[current].y));
        current = parent;
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::CellType;

    fn open_grid(width: usize, height: usize) -> Grid {
        let mut grid = Grid::new(width, height);
        for y in 0..height {
            for x in 0..width {
                grid.set_type(x, y, CellType::Free);
            }
        }
        grid
    }

    #[test]
    fn test_empty_grid_path_length() {
        let grid = open_grid(10, 10);
        let path = find_path(
            &grid,
            Coord::new(0, 0),
            Coord::new(9, 9),
            |x, y| grid.is_walkable(x, y),
        )
        .unwrap();

        // Manhattan distance, start exclusive, goal inclusive
        assert_eq!(path.len(), 18);
        assert_eq!(*path.last().unwrap(), Coord::new(9, 9));
    }

    #[test]
    fn test_wall_column_with_gap() {
        let mut grid = open_grid(10, 10);
        for y in 0..10 {
            if y != 5 {
                grid.set_type(5, y, CellType::Wall);
            }
        }

        let path = find_path(
            &grid,
            Coord::new(0, 0),
            Coord::new(9, 9),
            |x, y| grid.is_walkable(x, y),
        )
        .unwrap();

        let column_cells: Vec<Coord> = path.iter().copied().filter(|c| c.x == 5).collect();
        assert_eq!(column_cells, vec![Coord::new(5, 5)]);
    }

    #[test]
    fn test_consecutive_cells_adjacent() {
        let grid = open_grid(12, 8);
        let start = Coord::new(1, 1);
        let path = find_path(&grid, start, Coord::new(10, 6), |x, y| {
            grid.is_walkable(x, y)
        })
        .unwrap();

        let mut prev = start;
        for &cell in &path {
            assert_eq!(prev.manhattan(cell), 1);
            prev = cell;
        }
    }

    #[test]
    fn test_not_found_when_sealed_off() {
        let mut grid = open_grid(10, 10);
        // Seal the goal corner behind a solid wall, out of goal-override range
        for y in 0..10 {
            grid.set_type(6, y, CellType::Wall);
        }
        for x in 6..10 {
            grid.set_type(x, 6, CellType::Wall);
        }

        let err = find_path(
            &grid,
            Coord::new(0, 0),
            Coord::new(9, 9),
            |x, y| grid.is_walkable(x, y),
        )
        .unwrap_err();

        assert_eq!(
            err,
            PathNotFound {
                start: Coord::new(0, 0),
                goal: Coord::new(9, 9),
            }
        );
    }

    #[test]
    fn test_goal_override_wall_goal() {
        // Goal is a wall orthogonally adjacent to start: the override must
        // still produce the one-step path.
        let mut grid = open_grid(5, 5);
        grid.set_type(1, 0, CellType::Wall);

        let path = find_path(
            &grid,
            Coord::new(0, 0),
            Coord::new(1, 0),
            |x, y| grid.is_walkable(x, y),
        )
        .unwrap();

        assert_eq!(path, vec![Coord::new(1, 0)]);
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = open_grid(5, 5);
        let path = find_path(
            &grid,
            Coord::new(2, 2),
            Coord::new(2, 2),
            |x, y| grid.is_walkable(x, y),
        )
        .unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut grid = open_grid(16, 16);
        for x in 3..13 {
            grid.set_type(x, 8, CellType::Wall);
        }

        let run = || {
            find_path(
                &grid,
                Coord::new(1, 14),
                Coord::new(14, 1),
                |x, y| grid.is_walkable(x, y),
            )
            .unwrap()
        };

        let first = run();
        for _ in 0..5 {
            assert_eq!(run(), first);
        }
    }

    #[test]
    fn test_permissive_predicate_ignores_walls() {
        let grid = Grid::new(9, 9); // all wall
        let path = find_path(&grid, Coord::new(0, 0), Coord::new(8, 8), |_, _| true).unwrap();
        assert_eq!(path.len(), 16);
    }

    #[test]
    fn test_path_cells_walkable_or_goal() {
        let mut grid = open_grid(10, 10);
        for y in 2..9 {
            grid.set_type(4, y, CellType::Wall);
        }
        let goal = Coord::new(9, 9);
        let path = find_path(&grid, Coord::new(0, 9), goal, |x, y| grid.is_walkable(x, y))
            .unwrap();

        for &cell in &path {
            assert!(
                grid.is_walkable(cell.x, cell.y) || cell == goal,
                "unwalkable cell {cell} in path"
            );
        }
    }
}
