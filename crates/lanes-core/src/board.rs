//! Game board representation: lane colors, tiles, and the board arena.
//!
//! This module contains:
//! - The six lane colors
//! - `Tile`: a cell's lane list and rotation
//! - `Board`: a radius-bounded arena of tiles plus the origin set
//! - JSON-friendly snapshot types for plain structural serialization
//!
//! The board is stored as a flat arena indexed by a coordinate-to-linear
//! function rather than a sparse map, so iteration stays cache-friendly.

use crate::hex::HexCoord;
use serde::{Deserialize, Serialize};

/// Player identifier (index into the game's player list)
pub type PlayerId = u8;

/// Lane colors, in cyclic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Violet,
}

impl Color {
    /// All colors in cyclic order
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Violet,
    ];

    /// Single-letter display code
    pub fn code(&self) -> char {
        match self {
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Violet => 'V',
        }
    }
}

/// A single board cell: its lanes (in placement order) and rotation.
///
/// `rotation` is a clockwise offset in `0..6` applied when mapping edge
/// indices to colors; a freshly placed tile starts at rotation 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Lanes occupying this cell, oldest first
    pub lanes: Vec<Color>,
    /// Clockwise rotation offset (0-5)
    pub rotation: u8,
}

impl Tile {
    /// Whether at least one lane occupies this tile
    pub fn is_occupied(&self) -> bool {
        !self.lanes.is_empty()
    }
}

/// The complete game board.
///
/// Every in-bounds coordinate has a (possibly empty) tile slot. Origin
/// coordinates are the exception: they are permanently wild, never hold a
/// tile, and act as connectivity sources for placement and scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    radius: i32,
    /// Arena of tiles over a (2*radius+1)^2 grid; out-of-hex slots stay empty
    tiles: Vec<Tile>,
    origins: Vec<HexCoord>,
}

impl Board {
    /// Create an empty board of the given radius with the given origins.
    pub fn new(radius: i32, origins: Vec<HexCoord>) -> Self {
        assert!(radius >= 1, "board radius must be at least 1");
        assert!(
            origins.iter().all(|o| o.ring() <= radius),
            "origins must lie within the board"
        );
        let side = (2 * radius + 1) as usize;
        Self {
            radius,
            tiles: vec![Tile::default(); side * side],
            origins,
        }
    }

    /// Board radius (rim cells have `ring() == radius`)
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Whether a coordinate lies on the board
    pub fn in_bounds(&self, coord: HexCoord) -> bool {
        coord.ring() <= self.radius
    }

    /// Whether a coordinate is an origin
    pub fn is_origin(&self, coord: HexCoord) -> bool {
        self.origins.contains(&coord)
    }

    /// The origin coordinates
    pub fn origins(&self) -> &[HexCoord] {
        &self.origins
    }

    fn index_of(&self, coord: HexCoord) -> Option<usize> {
        if !self.in_bounds(coord) {
            return None;
        }
        let side = 2 * self.radius + 1;
        Some(((coord.r + self.radius) * side + (coord.q + self.radius)) as usize)
    }

    /// Get the tile at a coordinate.
    ///
    /// Returns `None` out of bounds and at origins (origins never hold a
    /// tile).
    pub fn tile(&self, coord: HexCoord) -> Option<&Tile> {
        if self.is_origin(coord) {
            return None;
        }
        self.index_of(coord).map(|i| &self.tiles[i])
    }

    /// Lanes at a coordinate (empty for origins and out-of-bounds cells)
    pub fn lanes(&self, coord: HexCoord) -> &[Color] {
        self.tile(coord).map_or(&[], |t| t.lanes.as_slice())
    }

    /// Rotation of the tile at a coordinate (origins are always rotation 0)
    pub fn rotation(&self, coord: HexCoord) -> u8 {
        self.tile(coord).map_or(0, |t| t.rotation)
    }

    /// Whether the cell holds at least one lane
    pub fn is_occupied(&self, coord: HexCoord) -> bool {
        !self.lanes(coord).is_empty()
    }

    /// Whether the cell holds a lane of the given color
    pub fn has_lane(&self, coord: HexCoord, color: Color) -> bool {
        self.lanes(coord).contains(&color)
    }

    /// Whether any lane exists anywhere on the board
    pub fn any_lane(&self) -> bool {
        self.tiles.iter().any(|t| t.is_occupied())
    }

    /// Total number of lanes on the board
    pub fn lane_total(&self) -> usize {
        self.tiles.iter().map(|t| t.lanes.len()).sum()
    }

    /// Iterate over all in-bounds coordinates
    pub fn coords(&self) -> impl Iterator<Item = HexCoord> + '_ {
        let radius = self.radius;
        (-radius..=radius)
            .flat_map(move |r| (-radius..=radius).map(move |q| HexCoord::new(q, r)))
            .filter(move |c| c.ring() <= radius)
    }

    /// Iterate over the outermost ring
    pub fn rim_coords(&self) -> impl Iterator<Item = HexCoord> + '_ {
        let radius = self.radius;
        self.coords().filter(move |c| c.ring() == radius)
    }

    /// Iterate over coordinates holding at least one lane
    pub fn occupied_coords(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.coords().filter(move |c| self.is_occupied(*c))
    }

    // ==================== Mutation Methods ====================
    //
    // Mutations perform no legality checks beyond structural invariants;
    // callers validate through the placement module first.

    /// Append a lane at a coordinate (assumes validation already done)
    pub fn push_lane(&mut self, coord: HexCoord, color: Color) {
        assert!(!self.is_origin(coord), "cannot place a lane on an origin");
        let idx = self
            .index_of(coord)
            .expect("cannot place a lane outside the board");
        self.tiles[idx].lanes.push(color);
    }

    /// Rotate the tile at a coordinate clockwise by `delta` steps
    pub fn rotate_tile(&mut self, coord: HexCoord, delta: u8) {
        assert!(!self.is_origin(coord), "cannot rotate an origin");
        let idx = self
            .index_of(coord)
            .expect("cannot rotate a tile outside the board");
        let tile = &mut self.tiles[idx];
        tile.rotation = (tile.rotation + delta) % 6;
    }

    /// Convert to a JSON-friendly representation with coordinate lists
    /// instead of the internal arena. Only occupied tiles are emitted.
    pub fn to_json_friendly(&self) -> BoardJson {
        BoardJson {
            radius: self.radius,
            tiles: self
                .coords()
                .filter(|c| self.is_occupied(*c))
                .map(|c| TileJson {
                    q: c.q,
                    r: c.r,
                    lanes: self.lanes(c).to_vec(),
                    rotation: self.rotation(c),
                })
                .collect(),
            origins: self
                .origins
                .iter()
                .map(|o| CoordJson { q: o.q, r: o.r })
                .collect(),
        }
    }
}

/// JSON-friendly board representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardJson {
    pub radius: i32,
    pub tiles: Vec<TileJson>,
    pub origins: Vec<CoordJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileJson {
    pub q: i32,
    pub r: i32,
    pub lanes: Vec<Color>,
    pub rotation: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordJson {
    pub q: i32,
    pub r: i32,
}
