//! Dungeon system
//!
//! Contains the grid and cell primitives, both generation strategies, and
//! the validation that drives the retry loop.

mod carver;
mod cell;
mod corridor;
mod generation;
mod grid;
mod room;
mod validator;

pub use carver::{carve, connect_corridors, remove_lonely_walls};
pub use cell::{Cell, CellType};
pub use corridor::connect;
pub use generation::{generate, reserve_spawns, Spawn, SpawnKind};
pub use grid::{Coord, Grid, CARDINALS};
pub use room::{place_rooms, Room, Side};
pub use validator::{validate, RejectReason, Verdict};
