//! Discovered map cells
//!
//! Tracks which map-grid cells the player has uncovered. Cells are kept in a
//! set, so re-adding a known cell is a no-op.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Coordinate of one cell on the world map grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MapCoord {
    pub x: i32,
    pub y: i32,
}

impl MapCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Registry of discovered map cells
#[derive(Debug, Clone, Default)]
pub struct DiscoveredMaps {
    cells: BTreeSet<MapCoord>,
}

impl DiscoveredMaps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a cell discovered; returns true if it was new
    pub fn discover(&mut self, coord: MapCoord) -> bool {
        self.cells.insert(coord)
    }

    /// Add many cells, returning how many were new
    pub fn extend<I: IntoIterator<Item = MapCoord>>(&mut self, coords: I) -> usize {
        let before = self.cells.len();
        self.cells.extend(coords);
        self.cells.len() - before
    }

    pub fn is_discovered(&self, coord: MapCoord) -> bool {
        self.cells.contains(&coord)
    }

    pub fn cells(&self) -> &BTreeSet<MapCoord> {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}
