use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::tileset::Tile;
use crate::RenderError;

/// Horizontal flip flag of a Tiled gid.
pub const FLIP_H: u32 = 0x8000_0000; // bit 31
/// Vertical flip flag of a Tiled gid.
pub const FLIP_V: u32 = 0x4000_0000; // bit 30
/// Diagonal (anti-diagonal transpose) flag of a Tiled gid.
pub const FLIP_D: u32 = 0x2000_0000; // bit 29
/// Mask selecting the tile id bits of a gid.
pub const GID_MASK: u32 = 0x1FFF_FFFF; // keep lower 29 bits (bit 28 is free)

/// A raw Tiled global tile id, flip flags included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gid(pub u32);

impl Gid {
    /// Tile id with the flag bits stripped.
    #[inline] pub fn clean(self) -> u32 { self.0 & GID_MASK }
    /// Horizontal flip flag.
    #[inline] pub fn flip_h(self) -> bool { (self.0 & FLIP_H) != 0 }
    /// Vertical flip flag.
    #[inline] pub fn flip_v(self) -> bool { (self.0 & FLIP_V) != 0 }
    /// Diagonal flip flag.
    #[inline] pub fn flip_d(self) -> bool { (self.0 & FLIP_D) != 0 }
}

/// Quarter-turn rotation of a cell's texture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    /// No rotation.
    #[default]
    #[serde(rename = "0")]
    R0,
    /// One quarter turn counterclockwise.
    #[serde(rename = "90")]
    R90,
    /// Half turn.
    #[serde(rename = "180")]
    R180,
    /// Three quarter turns counterclockwise.
    #[serde(rename = "270")]
    R270,
}

impl Rotation {
    /// Parses a rotation in degrees; only the four quarter turns are valid.
    pub fn from_degrees(degrees: u16) -> Result<Self, RenderError> {
        match degrees {
            0 => Ok(Rotation::R0),
            90 => Ok(Rotation::R90),
            180 => Ok(Rotation::R180),
            270 => Ok(Rotation::R270),
            other => Err(RenderError::InvalidRotation(other)),
        }
    }

    /// Rotation in degrees.
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }
}

/// One grid position of a tile layer.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    /// Tile drawn in this cell; `None` draws nothing.
    pub tile: Option<Arc<Tile>>,
    /// Swap the texture horizontally.
    pub flip_h: bool,
    /// Swap the texture vertically.
    pub flip_v: bool,
    /// Applied after both flips.
    pub rotation: Rotation,
}

impl Cell {
    /// Unflipped, unrotated cell showing `tile`.
    pub fn new(tile: Arc<Tile>) -> Self {
        Cell {
            tile: Some(tile),
            ..Default::default()
        }
    }

    /// Sets both flip flags.
    pub fn flipped(mut self, flip_h: bool, flip_v: bool) -> Self {
        self.flip_h = flip_h;
        self.flip_v = flip_v;
        self
    }

    /// Sets the rotation.
    pub fn rotated(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builds a cell from a tile and the flip bits of its Tiled gid.
    ///
    /// A diagonal flip has no direct counterpart in a cell, so it is folded
    /// into a quarter turn plus at most one axis flip.
    pub fn from_gid(tile: Arc<Tile>, gid: Gid) -> Self {
        let cell = Cell::new(tile);
        if !gid.flip_d() {
            return cell.flipped(gid.flip_h(), gid.flip_v());
        }
        match (gid.flip_h(), gid.flip_v()) {
            (true, true) => cell.flipped(true, false).rotated(Rotation::R270),
            (true, false) => cell.rotated(Rotation::R270),
            (false, true) => cell.rotated(Rotation::R90),
            (false, false) => cell.flipped(false, true).rotated(Rotation::R270),
        }
    }
}
