//! Error types for dungeon generation and search.
//!
//! Every failure mode is an ordinary return value; nothing here panics or
//! downgrades to a best-effort result.

use thiserror::Error;

use crate::dungeon::Coord;

/// Errors surfaced by the generation pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// Rejected before any work is attempted; never retried.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Room placement gave up after restarting from a fresh grid too often.
    #[error("room placement exhausted after {restarts} grid restarts")]
    GenerationExhausted { restarts: u32 },

    /// No candidate grid was accepted within the attempt cap.
    #[error("no acceptable dungeon after {attempts} generation attempts")]
    GenerationFailed { attempts: u32 },

    /// A corridor search failed, aborting the connection step.
    #[error(transparent)]
    PathNotFound(#[from] PathNotFound),
}

/// The open set emptied before the goal was reached.
///
/// Callers receive no path, never a partial one.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no path from {start} to {goal}")]
pub struct PathNotFound {
    pub start: Coord,
    pub goal: Coord,
}
