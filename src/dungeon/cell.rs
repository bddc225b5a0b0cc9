//! Map cell types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Cell/terrain type.
///
/// This is the only vocabulary shared with rendering and entity-spawning
/// collaborators; nothing else about a cell crosses that boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum CellType {
    /// Solid rock/wall; grids start out all wall
    #[default]
    Wall = 0,
    /// Open floor
    Free = 1,
    /// Floor claimed by a spawned entity or obstacle
    Reserved = 2,
    /// The level exit tile
    Exit = 3,
}

impl CellType {
    /// Check if this type blocks movement
    pub const fn is_wall(&self) -> bool {
        matches!(self, CellType::Wall)
    }

    /// Check if this is passable (can walk through)
    pub const fn is_walkable(&self) -> bool {
        matches!(self, CellType::Free | CellType::Exit)
    }

    /// Get the display character for this cell type
    pub const fn symbol(&self) -> char {
        match self {
            CellType::Wall => '#',
            CellType::Free => '.',
            CellType::Reserved => '*',
            CellType::Exit => '>',
        }
    }
}

/// A single map cell.
///
/// `visited` and `visited_neighbors` are transient bookkeeping for the cave
/// carver; they carry no meaning outside one carving run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Terrain type
    pub typ: CellType,

    /// Expanded by the cave carver's depth-first walk
    pub visited: bool,

    /// How many neighbors the carver has recursed into from here
    pub visited_neighbors: u8,
}

impl Cell {
    /// Create a new wall cell
    pub const fn wall() -> Self {
        Self {
            typ: CellType::Wall,
            visited: false,
            visited_neighbors: 0,
        }
    }

    /// Create a floor cell
    pub const fn free() -> Self {
        Self {
            typ: CellType::Free,
            visited: false,
            visited_neighbors: 0,
        }
    }

    /// Check if walkable
    pub const fn is_walkable(&self) -> bool {
        self.typ.is_walkable()
    }
}
