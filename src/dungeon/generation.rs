//! Top-level generation pipeline: build a candidate grid with the configured
//! strategy, validate it, and retry from scratch until the cap.

use serde::{Deserialize, Serialize};

use crate::config::{GenerationConfig, Strategy};
use crate::error::{GenerationError, PathNotFound};
use crate::path::find_path;
use crate::rng::DungeonRng;

use super::carver;
use super::cell::CellType;
use super::corridor;
use super::grid::{Coord, Grid};
use super::room::{self, Room};
use super::validator::{self, Verdict};

/// Generate a dungeon grid with a walkable route from `entry` to `goal`.
///
/// Each attempt starts from a fresh all-wall grid, runs the configured
/// strategy, then stamps the entry and goal tiles and validates the result.
/// A rejected candidate is discarded whole; nothing carries over between
/// attempts except the RNG stream. After `max_attempts` rejections the call
/// fails with [`GenerationError::GenerationFailed`].
pub fn generate(
    width: usize,
    height: usize,
    entry: Coord,
    goal: Coord,
    config: &GenerationConfig,
    rng: &mut DungeonRng,
) -> Result<Grid, GenerationError> {
    config.validate(width, height, entry, goal)?;

    for _ in 0..config.max_attempts {
        let mut grid = match build_candidate(width, height, entry, goal, config, rng) {
            Ok(grid) => grid,
            // A failed corridor or access route just spoils this attempt
            Err(GenerationError::PathNotFound(_)) => continue,
            Err(err) => return Err(err),
        };

        grid.set_type(entry.x, entry.y, CellType::Free);
        grid.set_type(goal.x, goal.y, CellType::Exit);

        if let Verdict::Accepted = validator::validate(&grid, entry, goal, config.wall_band) {
            return Ok(grid);
        }
    }

    Err(GenerationError::GenerationFailed {
        attempts: config.max_attempts,
    })
}

fn build_candidate(
    width: usize,
    height: usize,
    entry: Coord,
    goal: Coord,
    config: &GenerationConfig,
    rng: &mut DungeonRng,
) -> Result<Grid, GenerationError> {
    match config.strategy {
        Strategy::Rooms => {
            let (mut grid, rooms) =
                room::place_rooms(width, height, &config.rooms, config.max_placement_restarts, rng)?;
            corridor::connect(&mut grid, &rooms, rng)?;
            carve_access(&mut grid, &rooms, entry, goal)?;
            Ok(grid)
        }
        Strategy::Cave => {
            let mut grid = Grid::new(width, height);
            carver::carve(&mut grid, entry, goal, config.branch_limit, rng);
            carver::remove_lonely_walls(&mut grid, config.lonely_wall_threshold);
            carver::connect_corridors(&mut grid);
            Ok(grid)
        }
    }
}

/// Dig the entry and goal tiles into the room chain.
///
/// Rooms start sealed inside solid rock, so a caller-picked entry or goal
/// usually lands outside every room. Tunnel from the entry to the first room
/// of the chain and from the goal to the last, the same way corridors are
/// dug between rooms.
fn carve_access(
    grid: &mut Grid,
    rooms: &[Room],
    entry: Coord,
    goal: Coord,
) -> Result<(), PathNotFound> {
    if rooms.is_empty() {
        return Ok(());
    }
    let mut chain = rooms.to_vec();
    chain.sort_by_key(Room::distance_to_origin);

    let anchors = [
        (entry, chain[0].center()),
        (goal, chain[chain.len() - 1].center()),
    ];
    for (from, to) in anchors {
        let route = find_path(grid, from, to, |_, _| true)?;
        grid.set_type(from.x, from.y, CellType::Free);
        for step in route {
            grid.set_type(step.x, step.y, CellType::Free);
        }
    }
    Ok(())
}

/// What a reserved tile is being held for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    Enemy,
    Obstacle,
}

/// A tile set aside for later population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub at: Coord,
    pub kind: SpawnKind,
}

/// Reserve free tiles for enemies and obstacles.
///
/// Each free cell rolls once: the bottom of the unit interval goes to
/// obstacles, the top to enemies. Chosen cells are marked
/// [`CellType::Reserved`] so later passes do not treat them as open floor.
/// Cells in `keep_clear` (typically the entry and goal) are never taken.
pub fn reserve_spawns(
    grid: &mut Grid,
    enemy_probability: f64,
    obstacle_probability: f64,
    keep_clear: &[Coord],
    rng: &mut DungeonRng,
) -> Vec<Spawn> {
    let mut spawns = Vec::new();
    for at in grid.free_cells() {
        if keep_clear.contains(&at) {
            continue;
        }
        let roll = rng.uniform();
        let kind = if roll <= obstacle_probability {
            SpawnKind::Obstacle
        } else if roll >= 1.0 - enemy_probability {
            SpawnKind::Enemy
        } else {
            continue;
        };
        grid.set_type(at.x, at.y, CellType::Reserved);
        spawns.push(Spawn { at, kind });
    }
    spawns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Difficulty, RoomParams, WallBand};

    fn cave_config() -> GenerationConfig {
        GenerationConfig {
            // Wide band so the test exercises the pipeline, not the odds
            wall_band: WallBand {
                min: 0.05,
                max: 0.95,
            },
            ..GenerationConfig::for_difficulty(Strategy::Cave, Difficulty::Normal)
        }
    }

    #[test]
    fn test_cave_generation_connects_entry_to_goal() {
        let mut rng = DungeonRng::new(42);
        let entry = Coord::new(1, 1);
        let goal = Coord::new(28, 18);
        let grid = generate(30, 20, entry, goal, &cave_config(), &mut rng)
            .unwrap();

        assert!(grid.cell(entry.x, entry.y).typ.is_walkable());
        assert_eq!(grid.cell(goal.x, goal.y).typ, CellType::Exit);
        assert!(
            find_path(&grid, entry, goal, |x, y| grid.is_walkable(x, y)).is_ok()
        );
    }

    #[test]
    fn test_room_generation_connects_entry_to_goal() {
        let mut rng = DungeonRng::new(7);
        let config = GenerationConfig {
            strategy: Strategy::Rooms,
            wall_band: WallBand {
                min: 0.05,
                max: 0.95,
            },
            rooms: RoomParams {
                count: 4,
                min_width: 5,
                max_width: 8,
                min_height: 5,
                max_height: 8,
            },
            ..GenerationConfig::for_difficulty(Strategy::Rooms, Difficulty::Normal)
        };
        let entry = Coord::new(1, 1);
        let goal = Coord::new(38, 28);
        let grid = generate(40, 30, entry, goal, &config, &mut rng).unwrap();

        assert_eq!(grid.cell(goal.x, goal.y).typ, CellType::Exit);
        assert!(
            find_path(&grid, entry, goal, |x, y| grid.is_walkable(x, y)).is_ok()
        );
    }

    #[test]
    fn test_accepted_grid_is_inside_band() {
        let mut rng = DungeonRng::new(3);
        let config = cave_config();
        let grid = generate(
            30,
            20,
            Coord::new(1, 1),
            Coord::new(28, 18),
            &config,
            &mut rng,
        )
        .unwrap();

        assert!(config.wall_band.contains(grid.wall_fraction()));
    }

    #[test]
    fn test_impossible_band_fails_with_attempt_count() {
        let mut rng = DungeonRng::new(42);
        let config = GenerationConfig {
            // No grid with an intact border can have under 1% walls
            wall_band: WallBand {
                min: 0.0,
                max: 0.01,
            },
            max_attempts: 5,
            ..GenerationConfig::for_difficulty(Strategy::Cave, Difficulty::Normal)
        };
        let err = generate(
            20,
            20,
            Coord::new(1, 1),
            Coord::new(18, 18),
            &config,
            &mut rng,
        )
        .unwrap_err();

        assert_eq!(err, GenerationError::GenerationFailed { attempts: 5 });
    }

    #[test]
    fn test_invalid_config_rejected_before_any_attempt() {
        let mut rng = DungeonRng::new(42);
        let config = GenerationConfig {
            max_attempts: 0,
            ..cave_config()
        };
        let err = generate(
            20,
            20,
            Coord::new(1, 1),
            Coord::new(18, 18),
            &config,
            &mut rng,
        )
        .unwrap_err();

        assert!(matches!(err, GenerationError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_generation_deterministic_per_seed() {
        let run = |seed| {
            let mut rng = DungeonRng::new(seed);
            generate(
                30,
                20,
                Coord::new(1, 1),
                Coord::new(28, 18),
                &cave_config(),
                &mut rng,
            )
            .map(|g| g.to_string())
        };

        assert_eq!(run(11), run(11));
    }

    #[test]
    fn test_reserve_spawns_marks_cells_and_spares_keep_clear() {
        let mut rng = DungeonRng::new(42);
        let entry = Coord::new(1, 1);
        let goal = Coord::new(28, 18);
        let mut grid = generate(30, 20, entry, goal, &cave_config(), &mut rng)
            .unwrap();

        let spawns = reserve_spawns(&mut grid, 0.5, 0.2, &[entry], &mut rng);

        assert!(!spawns.is_empty());
        for spawn in &spawns {
            assert_ne!(spawn.at, entry);
            assert_eq!(grid.cell(spawn.at.x, spawn.at.y).typ, CellType::Reserved);
        }
        // Reserved tiles are no longer open floor
        assert!(!grid.is_walkable(spawns[0].at.x, spawns[0].at.y));
    }

    #[test]
    fn test_reserve_spawns_zero_probability_reserves_nothing() {
        let mut rng = DungeonRng::new(1);
        let mut grid = Grid::new(10, 10);
        for y in 1..9 {
            for x in 1..9 {
                grid.set_type(x, y, CellType::Free);
            }
        }
        // enemy needs roll >= 1.0, obstacle needs roll <= -1.0; uniform()
        // is in [0, 1) so neither can ever match
        let spawns = reserve_spawns(&mut grid, 0.0, -1.0, &[], &mut rng);
        assert!(spawns.is_empty());
    }
}
