//! Rasterization of tile layers into quads and the renderers that drive it.

mod cache;
mod cull;
mod macroquad_sink;
mod memory;
mod projection;
pub mod quad;
mod rasterizer;
mod session;
mod sink;

use macroquad::math::{Mat4, Rect};

use crate::view::OrthoCamera;
use crate::RenderError;

pub use cache::{BeginAction, CacheState, CacheStateMachine, CachedRenderer, EndAction};
pub use cull::{RowOrder, VisibleRange};
pub use macroquad_sink::MacroquadSink;
pub use memory::{MemorySink, SinkCounters, SubmittedQuad};
pub use projection::{Isometric, Orthogonal, ProjectionKind, ProjectionStrategy};
pub use quad::{pack_color, unpack_color, Quad, QUAD_LEN};
pub use rasterizer::LayerRasterizer;
pub use session::{FrameStats, IgnoreObjects, ObjectRenderer, RenderSession};
pub use sink::{BatchSink, CacheId, CacheSink, QuadSink};

/// Frame-level interface shared by the immediate and cached renderers.
pub trait MapRenderer {
    /// Takes the projection and view rectangle from `camera`.
    fn set_view(&mut self, camera: &OrthoCamera);

    /// Sets the projection and view rectangle explicitly.
    fn set_view_bounds(&mut self, projection: Mat4, x: f32, y: f32, width: f32, height: f32);

    /// Draws every visible layer in map order.
    fn render(&mut self) -> Result<FrameStats, RenderError>;

    /// Draws the layers at `indices` only.
    fn render_layers(&mut self, indices: &[usize]) -> Result<FrameStats, RenderError>;

    /// World rectangle set by the last `set_view*` call.
    fn view_bounds(&self) -> Rect;

    /// World units per tile pixel.
    fn unit_scale(&self) -> f32;
}
