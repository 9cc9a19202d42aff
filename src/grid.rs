// Static occupancy grid for one decision call

use log::warn;
use std::collections::HashSet;

use crate::types::{Coord, GridPayload};

/// Grid extents plus the set of occupied cells.
/// Immutable for the duration of a search.
#[derive(Debug, Clone)]
pub struct Grid {
    pub size_x: i32,
    pub size_y: i32,
    filled: HashSet<Coord>,
}

impl Grid {
    pub fn new<I>(size_x: i32, size_y: i32, filled: I) -> Self
    where
        I: IntoIterator<Item = Coord>,
    {
        Grid {
            size_x,
            size_y,
            filled: filled.into_iter().collect(),
        }
    }

    /// Builds the grid from the host payload
    ///
    /// A key names a cell only when it is spelled exactly as that cell's
    /// `"x-y"` key; anything else (`"nonsense"`, `"03-2"`) is skipped rather
    /// than rejected.
    pub fn from_payload(payload: &GridPayload) -> Self {
        let filled = payload.filled.keys().filter_map(|key| {
            let cell = Coord::parse_key(key);
            if cell.is_none() {
                warn!("Ignoring filled cell key '{}': not a canonical x-y key", key);
            }
            cell
        });

        Grid::new(payload.size_x, payload.size_y, filled)
    }

    pub fn is_out_of_bounds(&self, cell: &Coord) -> bool {
        cell.x < 0 || cell.y < 0 || cell.x >= self.size_x || cell.y >= self.size_y
    }

    pub fn is_filled(&self, cell: &Coord) -> bool {
        self.filled.contains(cell)
    }

    /// Validity filter: off-grid or occupied cells are rejected.
    /// Only the starting occupancy is consulted, never cells claimed during a search.
    pub fn is_valid(&self, cell: &Coord) -> bool {
        !self.is_out_of_bounds(cell) && !self.is_filled(cell)
    }

    pub fn filled_count(&self) -> usize {
        self.filled.len()
    }
}
