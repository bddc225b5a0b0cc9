//! Candidate grid acceptance: wall-ratio band plus a connectivity check.

use crate::config::WallBand;
use crate::path::find_path;

use super::grid::{Coord, Grid};

/// Outcome of validating one candidate grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Accepted,
    Rejected(RejectReason),
}

/// Why a candidate grid was turned down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RejectReason {
    /// Too open: the wall fraction fell below the band.
    TooFewWalls { fraction: f64 },
    /// Too dense: the wall fraction exceeded the band.
    TooManyWalls { fraction: f64 },
    /// No walkable route from entry to goal.
    Disconnected,
}

/// Check a candidate grid against the wall-ratio band and confirm that a
/// walkable route exists from `entry` to `goal`.
///
/// The ratio check runs first since it is cheap; connectivity failure rejects
/// regardless of ratio. Validation never mutates the grid, so re-validating
/// an accepted grid always accepts again.
pub fn validate(grid: &Grid, entry: Coord, goal: Coord, band: WallBand) -> Verdict {
    let fraction = grid.wall_fraction();
    if fraction < band.min {
        return Verdict::Rejected(RejectReason::TooFewWalls { fraction });
    }
    if fraction > band.max {
        return Verdict::Rejected(RejectReason::TooManyWalls { fraction });
    }

    match find_path(grid, entry, goal, |x, y| grid.is_walkable(x, y)) {
        Ok(_) => Verdict::Accepted,
        Err(_) => Verdict::Rejected(RejectReason::Disconnected),
    }
}
