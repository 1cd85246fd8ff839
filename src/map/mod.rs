//! In-memory map model consumed by the renderers.
//!
//! Loading maps from disk is someone else's job; these types only carry what
//! rasterization needs.

mod cell;
mod layer;
mod tileset;

pub use cell::{Cell, Gid, Rotation, FLIP_D, FLIP_H, FLIP_V, GID_MASK};
pub use layer::{MapLayer, MapObject, ObjectLayer, TileLayer, TileMap};
pub use tileset::{TextureId, TextureRegion, Tile, TileSet};
