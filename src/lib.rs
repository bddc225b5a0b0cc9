//! cavern-core: dungeon generation and pathfinding for a tile-based crawler
//!
//! This crate contains the map-building logic with no I/O dependencies.
//! It is designed to be pure and testable: all randomness flows through a
//! seeded [`DungeonRng`], so any generated dungeon can be reproduced from
//! its seed.
//!
//! Two generation strategies are provided. [`config::Strategy::Rooms`]
//! scatters non-overlapping rectangular rooms and digs corridors between
//! them; [`config::Strategy::Cave`] carves an organic cave with a randomized
//! depth-first walk. Both feed a validator that checks the wall ratio and
//! start-to-goal connectivity, retrying from scratch up to a configured cap.

pub mod config;
pub mod dungeon;
pub mod error;
pub mod path;

mod rng;

pub use config::{Difficulty, GenerationConfig, RoomParams, Strategy, WallBand};
pub use dungeon::{generate, CellType, Coord, Grid};
pub use error::{GenerationError, PathNotFound};
pub use path::find_path;
pub use rng::DungeonRng;
