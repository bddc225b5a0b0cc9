//! Generation tuning parameters.
//!
//! The core reads no environment variables or files; every knob arrives in a
//! `GenerationConfig` value supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::dungeon::Coord;
use crate::error::GenerationError;

/// How the initial grid is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Rejection-sampled rectangular rooms joined by carved corridors
    Rooms,
    /// Randomized depth-first cave carving plus cleanup passes
    Cave,
}

/// Accepted range for the wall-cell fraction of a generated grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallBand {
    pub min: f64,
    pub max: f64,
}

impl WallBand {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, fraction: f64) -> bool {
        fraction >= self.min && fraction <= self.max
    }
}

/// Difficulty tier selecting a wall-band preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Wall-band preset for a strategy.
    ///
    /// The cave Normal band is the classic one-fifth to one-third of all
    /// tiles; room dungeons are mostly rock by construction, so their bands
    /// sit much higher.
    pub fn wall_band(self, strategy: Strategy) -> WallBand {
        match strategy {
            Strategy::Cave => match self {
                Difficulty::Easy => WallBand::new(0.05, 0.60),
                Difficulty::Normal => WallBand::new(0.20, 1.0 / 3.0),
                Difficulty::Hard => WallBand::new(0.25, 0.50),
            },
            Strategy::Rooms => match self {
                Difficulty::Easy => WallBand::new(0.30, 0.95),
                Difficulty::Normal => WallBand::new(0.40, 0.92),
                Difficulty::Hard => WallBand::new(0.50, 0.90),
            },
        }
    }
}

/// Bounds for room placement.
///
/// Widths and heights include the one-cell wall border, so the minimum
/// useful dimension is 3 (a single interior cell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomParams {
    pub count: usize,
    pub min_width: usize,
    pub max_width: usize,
    pub min_height: usize,
    pub max_height: usize,
}

impl RoomParams {
    /// Reject placement bounds that can never fit a grid of the given size.
    ///
    /// Called both by [`GenerationConfig::validate`] and by `place_rooms`
    /// itself, so the placement operation rejects oversized rooms with a
    /// typed error instead of underflowing its sampling arithmetic.
    pub fn validate(&self, width: usize, height: usize) -> Result<(), GenerationError> {
        let invalid = |reason: String| GenerationError::InvalidConfiguration { reason };

        if self.count == 0 {
            return Err(invalid("room count must be positive".into()));
        }
        if self.min_width < 3 || self.min_height < 3 {
            return Err(invalid(
                "rooms need a one-cell interior (minimum dimension 3)".into(),
            ));
        }
        if self.min_width > self.max_width || self.min_height > self.max_height {
            return Err(invalid("room size bounds are inverted".into()));
        }
        if self.max_width > width || self.max_height > height {
            return Err(invalid(format!(
                "maximum room size {}x{} exceeds grid size {width}x{height}",
                self.max_width, self.max_height
            )));
        }
        Ok(())
    }
}

impl Default for RoomParams {
    fn default() -> Self {
        Self {
            count: 6,
            min_width: 6,
            max_width: 12,
            min_height: 5,
            max_height: 9,
        }
    }
}

/// Everything one `generate` call needs beyond dimensions and endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub strategy: Strategy,
    /// Acceptance band for the validator
    pub wall_band: WallBand,
    /// Room placement bounds (room strategy only)
    pub rooms: RoomParams,
    /// Extra expansions allowed per carved cell once the goal is reached
    pub branch_limit: u8,
    /// Free-neighbor count at which a wall is considered lonely and removed
    pub lonely_wall_threshold: usize,
    /// Whole-pipeline restart cap before `GenerationFailed`
    pub max_attempts: u32,
    /// Fresh-grid restart cap inside room placement
    pub max_placement_restarts: u32,
}

impl GenerationConfig {
    /// Config preset for a strategy and difficulty tier
    pub fn for_difficulty(strategy: Strategy, difficulty: Difficulty) -> Self {
        Self {
            strategy,
            wall_band: difficulty.wall_band(strategy),
            rooms: RoomParams::default(),
            branch_limit: 1,
            lonely_wall_threshold: 4,
            max_attempts: 50,
            max_placement_restarts: 1000,
        }
    }

    /// Reject impossible parameter combinations up front; these are caller
    /// bugs and are never retried.
    pub fn validate(
        &self,
        width: usize,
        height: usize,
        entry: Coord,
        goal: Coord,
    ) -> Result<(), GenerationError> {
        let invalid = |reason: String| GenerationError::InvalidConfiguration { reason };

        if width < 3 || height < 3 {
            return Err(invalid(format!(
                "grid dimensions {width}x{height} leave no interior"
            )));
        }
        if entry.x >= width || entry.y >= height {
            return Err(invalid(format!("entry {entry} out of bounds")));
        }
        if goal.x >= width || goal.y >= height {
            return Err(invalid(format!("goal {goal} out of bounds")));
        }
        if entry == goal {
            return Err(invalid(format!("entry and goal coincide at {entry}")));
        }
        if !(0.0..=1.0).contains(&self.wall_band.min)
            || !(0.0..=1.0).contains(&self.wall_band.max)
            || self.wall_band.min >= self.wall_band.max
        {
            return Err(invalid(format!(
                "wall band [{}, {}] is inverted or outside [0, 1]",
                self.wall_band.min, self.wall_band.max
            )));
        }
        if self.max_attempts == 0 {
            return Err(invalid("generation attempt cap must be positive".into()));
        }

        match self.strategy {
            Strategy::Rooms => {
                self.rooms.validate(width, height)?;
                if self.max_placement_restarts == 0 {
                    return Err(invalid("placement restart cap must be positive".into()));
                }
            }
            Strategy::Cave => {
                // Carving keeps a one-cell margin, so a border endpoint can
                // never be reached and every attempt would be wasted.
                for (name, c) in [("entry", entry), ("goal", goal)] {
                    if c.x == 0 || c.y == 0 || c.x + 1 == width || c.y + 1 == height {
                        return Err(invalid(format!(
                            "cave {name} {c} lies on the grid border, outside the carveable interior"
                        )));
                    }
                }
                if self.branch_limit == 0 {
                    return Err(invalid("branch limit must be at least 1".into()));
                }
                if !(1..=4).contains(&self.lonely_wall_threshold) {
                    return Err(invalid(
                        "lonely-wall threshold must be between 1 and 4 neighbors".into(),
                    ));
                }
            }
        }

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::for_difficulty(Strategy::Cave, Difficulty::Normal)
    }
}
