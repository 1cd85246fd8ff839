#![warn(missing_docs)]

//! Viewport-culled, cacheable tile layer renderer for Macroquad.
//!
//! Each frame the visible cells of every tile layer are turned into textured
//! quads (position, packed color, UVs with per-cell flips and quarter turns)
//! and handed to a draw sink. [`RenderSession`] does this every frame;
//! [`CachedRenderer`] records the scene once per view and replays it.

mod config;
mod error;
pub mod map;
pub mod render;
mod view;

pub use config::{build_renderer, RenderMode, RendererConfig};
pub use error::RenderError;
pub use map::{Cell, MapLayer, MapObject, ObjectLayer, Rotation, TextureId, TextureRegion, Tile, TileLayer, TileMap, TileSet};
pub use render::{
    CacheSink, BatchSink, CachedRenderer, FrameStats, IgnoreObjects, Isometric, MacroquadSink, MapRenderer,
    MemorySink, ObjectRenderer, Orthogonal, ProjectionKind, QuadSink, RenderSession,
};
pub use view::{camera2d_view, OrthoCamera};
