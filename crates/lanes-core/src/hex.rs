//! Hex coordinate system using axial coordinates (q, r).
//!
//! This module provides the foundational coordinate type for the hex board:
//! - `HexCoord`: identifies individual board cells
//! - `DIRECTIONS`: the six neighbor offsets, clockwise from North
//!
//! We use axial coordinates because they make neighbor calculations elegant
//! and avoid the wasted space of offset coordinates. The implicit third
//! coordinate `s` satisfies `q + r + s = 0`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// The six neighbor offsets in clockwise order starting from North.
///
/// The position of an offset in this array is its *edge index* (0-5), the
/// canonical numbering used when mapping tile edges to lane colors.
pub const DIRECTIONS: [HexCoord; 6] = [
    HexCoord::new(0, -1),  // N  (edge 0)
    HexCoord::new(1, -1),  // NE (edge 1)
    HexCoord::new(1, 0),   // E  (edge 2)
    HexCoord::new(0, 1),   // SE (edge 3)
    HexCoord::new(-1, 1),  // SW (edge 4)
    HexCoord::new(-1, 0),  // NW (edge 5)
];

/// Axial coordinate for the hex grid.
///
/// In axial coordinates:
/// - `q` increases going east (right)
/// - `r` increases going southeast
/// - The third coordinate `s` (not stored) satisfies: q + r + s = 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct HexCoord {
    /// Column (increases going east)
    pub q: i32,
    /// Row (increases going southeast)
    pub r: i32,
}

impl HexCoord {
    /// Create a new hex coordinate
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third coordinate (s = -q - r)
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Ring index: distance from the board center at (0, 0).
    ///
    /// Cells with `ring() == radius` form the rim of a radius-bounded board.
    pub fn ring(&self) -> i32 {
        self.q.abs().max(self.r.abs()).max(self.s().abs())
    }

    /// The six neighboring cells in clockwise order starting from North
    pub fn neighbors(&self) -> [HexCoord; 6] {
        DIRECTIONS.map(|d| *self + d)
    }

    /// Get the neighbor across a specific edge (edge index 0-5)
    pub fn neighbor(&self, edge_index: usize) -> HexCoord {
        *self + DIRECTIONS[edge_index % 6]
    }

    /// Distance to another cell (in hex steps)
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// The edge index whose direction offset equals `delta`, if any.
    ///
    /// This is the inverse of [`DIRECTIONS`]: for adjacent cells `a` and `b`,
    /// `edge_index_for(b - a)` is the index of the edge of `a` facing `b`.
    pub fn edge_index_for(delta: HexCoord) -> Option<usize> {
        DIRECTIONS.iter().position(|d| *d == delta)
    }
}

impl Add for HexCoord {
    type Output = HexCoord;

    fn add(self, rhs: HexCoord) -> HexCoord {
        HexCoord::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Sub for HexCoord {
    type Output = HexCoord;

    fn sub(self, rhs: HexCoord) -> HexCoord {
        HexCoord::new(self.q - rhs.q, self.r - rhs.r)
    }
}
