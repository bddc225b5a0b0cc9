//! The tile grid one generation attempt owns.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::cell::{Cell, CellType};

/// The four cardinal directions, in scan order: north, south, west, east.
///
/// Every consumer of neighbors (search, carving, cleanup) iterates in this
/// order so results are reproducible.
pub const CARDINALS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Grid coordinates of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate
    pub fn manhattan(&self, other: Coord) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A fixed-size 2D array of cells, created fresh per generation attempt.
///
/// Stored row-major; dimensions never change for the lifetime of the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid filled with wall cells
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::wall(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of tiles
    pub fn total_tiles(&self) -> usize {
        self.width * self.height
    }

    /// Check whether signed coordinates fall inside the grid
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Borrow the cell at (x, y); panics when out of bounds
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[y * self.width + x]
    }

    /// Mutably borrow the cell at (x, y); panics when out of bounds
    pub fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        &mut self.cells[y * self.width + x]
    }

    /// Borrow the cell at signed coordinates, if in bounds
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(self.cell(x as usize, y as usize))
        } else {
            None
        }
    }

    /// Set the terrain type at (x, y)
    pub fn set_type(&mut self, x: usize, y: usize, typ: CellType) {
        self.cell_mut(x, y).typ = typ;
    }

    /// Walkability of the cell at (x, y); out of bounds is not walkable
    pub fn is_walkable(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cell(x, y).is_walkable()
    }

    /// Count wall cells
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.typ.is_wall()).count()
    }

    /// Proportion of wall cells to total tiles
    pub fn wall_fraction(&self) -> f64 {
        self.wall_count() as f64 / self.total_tiles() as f64
    }

    /// Coordinates of every `Free` cell, in row-major order
    pub fn free_cells(&self) -> Vec<Coord> {
        let mut out = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.cell(x, y).typ == CellType::Free {
                    out.push(Coord::new(x, y));
                }
            }
        }
        out
    }

    /// Count of free orthogonal neighbors of (x, y)
    pub fn free_neighbor_count(&self, x: usize, y: usize) -> usize {
        CARDINALS
            .iter()
            .filter(|(dx, dy)| {
                self.get(x as i32 + dx, y as i32 + dy)
                    .is_some_and(|c| c.typ == CellType::Free)
            })
            .count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", self.cell(x, y).typ.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
