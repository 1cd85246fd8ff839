use log::warn;
use macroquad::math::Mat4;

use super::quad::{Quad, QUAD_LEN};
use super::sink::{BatchSink, CacheId, CacheSink, QuadSink};
use crate::map::TextureId;

/// A quad as it reached a sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubmittedQuad {
    /// Texture the quad samples.
    pub texture: TextureId,
    /// Vertex data as submitted.
    pub quad: Quad,
}

/// How often each sink entry point was hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkCounters {
    /// Calls to `begin`.
    pub begins: usize,
    /// Calls to `end`.
    pub ends: usize,
    /// Calls to `submit_quad`, recorded or not.
    pub submitted: usize,
    /// Calls to `clear`.
    pub clears: usize,
    /// Calls to `begin_recording`.
    pub recordings: usize,
    /// Calls to `begin_playback`.
    pub playbacks: usize,
    /// Calls to `replay`.
    pub replays: usize,
}

/// Headless sink that keeps everything it is given.
///
/// Implements both sink flavours so either renderer can drive it; tests use
/// it to observe exactly what reached the GPU boundary.
#[derive(Debug, Default)]
pub struct MemorySink {
    drawn: Vec<SubmittedQuad>,
    entries: Vec<Vec<SubmittedQuad>>,
    recording: Option<Vec<SubmittedQuad>>,
    entry_capacity: usize,
    projection: Option<Mat4>,
    blending: bool,
    counters: SinkCounters,
}

impl MemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-reserves room for `quads` quads in each cache entry.
    pub fn with_capacity(quads: usize) -> Self {
        MemorySink {
            entry_capacity: quads,
            ..Default::default()
        }
    }

    /// Quads drawn since the last [`MemorySink::reset_drawn`], including replayed ones.
    pub fn drawn(&self) -> &[SubmittedQuad] {
        &self.drawn
    }

    /// Forgets the drawn quads; counters and entries are kept.
    pub fn reset_drawn(&mut self) {
        self.drawn.clear();
    }

    /// Call counts so far.
    pub fn counters(&self) -> SinkCounters {
        self.counters
    }

    /// Quads stored in cache entry `id`.
    pub fn entry(&self, id: CacheId) -> Option<&[SubmittedQuad]> {
        self.entries.get(id.0).map(Vec::as_slice)
    }

    /// Number of recorded entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Last projection set, if any.
    pub fn projection(&self) -> Option<Mat4> {
        self.projection
    }

    /// Blending flag as last set.
    pub fn blending(&self) -> bool {
        self.blending
    }
}

impl QuadSink for MemorySink {
    fn set_projection(&mut self, projection: Mat4) {
        self.projection = Some(projection);
    }

    fn submit_quad(&mut self, texture: TextureId, vertices: &[f32; QUAD_LEN]) {
        self.counters.submitted += 1;
        let quad = SubmittedQuad {
            texture,
            quad: Quad::from(*vertices),
        };
        match self.recording.as_mut() {
            Some(entry) => entry.push(quad),
            None => self.drawn.push(quad),
        }
    }
}

impl BatchSink for MemorySink {
    fn begin(&mut self) {
        self.counters.begins += 1;
    }

    fn end(&mut self) {
        self.counters.ends += 1;
    }
}

impl CacheSink for MemorySink {
    fn clear(&mut self) {
        self.counters.clears += 1;
        self.entries.clear();
    }

    fn begin_recording(&mut self) {
        self.counters.recordings += 1;
        self.recording = Some(Vec::with_capacity(self.entry_capacity));
    }

    fn end_recording(&mut self) -> CacheId {
        let entry = self.recording.take().unwrap_or_default();
        self.entries.push(entry);
        CacheId(self.entries.len() - 1)
    }

    fn begin_playback(&mut self) {
        self.counters.playbacks += 1;
    }

    fn replay(&mut self, id: CacheId) {
        self.counters.replays += 1;
        match self.entries.get(id.0) {
            Some(entry) => self.drawn.extend_from_slice(entry),
            None => warn!("replay of unknown cache entry {}", id.0),
        }
    }

    fn end_playback(&mut self) {}

    fn set_blending(&mut self, enabled: bool) {
        self.blending = enabled;
    }

    fn reserve(&mut self, quads: usize) {
        self.entry_capacity = quads;
    }
}
