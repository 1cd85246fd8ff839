use macroquad::math::Mat4;

use super::quad::QUAD_LEN;
use crate::map::TextureId;

/// Handle to one recorded cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheId(pub usize);

/// Anything that accepts finished quads.
pub trait QuadSink {
    /// Projection used for everything submitted afterwards.
    fn set_projection(&mut self, projection: Mat4);

    /// Takes one quad sampling `texture`.
    fn submit_quad(&mut self, texture: TextureId, vertices: &[f32; QUAD_LEN]);
}

/// Immediate-mode sink: quads between `begin` and `end` are drawn this frame.
pub trait BatchSink: QuadSink {
    /// Starts a frame.
    fn begin(&mut self);
    /// Flushes whatever is still pending.
    fn end(&mut self);
}

/// Sink that can record quads once and replay them on later frames.
///
/// Quads submitted between `begin_recording` and `end_recording` go into the
/// new entry instead of being drawn.
pub trait CacheSink: QuadSink {
    /// Drops every recorded entry.
    fn clear(&mut self);
    /// Starts a new entry; submitted quads go into it.
    fn begin_recording(&mut self);
    /// Closes the entry and returns its id.
    fn end_recording(&mut self) -> CacheId;
    /// Opens a playback session; only `replay` is valid until `end_playback`.
    fn begin_playback(&mut self);
    /// Draws a recorded entry.
    fn replay(&mut self, id: CacheId);
    /// Closes the playback session.
    fn end_playback(&mut self);
    /// Toggles alpha blending around playback.
    fn set_blending(&mut self, enabled: bool);

    /// Hint: recordings will hold about `quads` quads.
    fn reserve(&mut self, _quads: usize) {}
}
