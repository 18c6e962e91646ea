//! Map positions.
//!
//! The economy only needs two things from a map coordinate: equality (to find
//! the building on a tile) and a distance in tiles (to order warehouses and to
//! compute delivery delay). [`Position`] captures exactly that, so hosts can
//! plug in their own coordinate type. [`CubeCoord`] is the hex-grid default.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A location on the map.
pub trait Position: Copy + Eq + Debug {
    /// Distance to `other`, in tiles.
    fn distance_to(&self, other: &Self) -> u32;
}

/// Cube coordinates on a hex grid. Valid coordinates satisfy `q + r + s == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CubeCoord {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl CubeCoord {
    pub const ORIGIN: CubeCoord = CubeCoord { q: 0, r: 0, s: 0 };

    pub fn new(q: i32, r: i32, s: i32) -> Self {
        debug_assert_eq!(q + r + s, 0, "cube coordinates must sum to zero");
        Self { q, r, s }
    }
}

impl Position for CubeCoord {
    fn distance_to(&self, other: &Self) -> u32 {
        ((self.q - other.q).unsigned_abs()
            + (self.r - other.r).unsigned_abs()
            + (self.s - other.s).unsigned_abs())
            / 2
    }
}

/// Turns needed to cover `distance` tiles at `tiles_per_turn`, rounded up.
/// A speed of zero is treated as one tile per turn.
pub fn distance_in_turns(distance: u32, tiles_per_turn: u32) -> u32 {
    distance.div_ceil(tiles_per_turn.max(1))
}
