use log::{trace, warn};
use macroquad::camera::{set_camera, set_default_camera, Camera};
use macroquad::math::Mat4;
use macroquad::models::{draw_mesh, Mesh, Vertex};
use macroquad::texture::{RenderPass, Texture2D};

use super::quad::{idx::*, unpack_color, QUAD_LEN};
use super::sink::{BatchSink, CacheId, CacheSink, QuadSink};
use crate::map::TextureId;

/// macroquad's default `Conf::draw_call_vertex_capacity`.
pub const DEFAULT_DRAW_CALL_VERTICES: usize = 10_000;
/// macroquad's default `Conf::draw_call_index_capacity`.
pub const DEFAULT_DRAW_CALL_INDICES: usize = 5_000;

const VERTICES_PER_QUAD: usize = 4;
const INDICES_PER_QUAD: usize = 6;
// u16 indices address at most this many vertices.
const INDEX_SPACE: usize = u16::MAX as usize + 1;

// Quads per mesh. macroquad clamps geometry once a draw call reaches its
// capacity, so a mesh must stay strictly below both limits.
fn batch_quads(vertex_capacity: usize, index_capacity: usize) -> usize {
    let by_vertices = vertex_capacity.saturating_sub(1) / VERTICES_PER_QUAD;
    let by_indices = index_capacity.saturating_sub(1) / INDICES_PER_QUAD;
    by_vertices.min(by_indices).min(INDEX_SPACE / VERTICES_PER_QUAD).max(1)
}

struct MatrixCamera(Mat4);

impl Camera for MatrixCamera {
    fn matrix(&self) -> Mat4 {
        self.0
    }

    fn depth_enabled(&self) -> bool {
        false
    }

    fn render_pass(&self) -> Option<RenderPass> {
        None
    }

    fn viewport(&self) -> Option<(i32, i32, i32, i32)> {
        None
    }
}

#[derive(Default)]
struct PendingMesh {
    texture: Option<TextureId>,
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
}

/// Draw sink backed by macroquad's mesh drawing.
///
/// Consecutive quads sharing a texture are merged into one [`Mesh`]. A
/// texture change, or a batch reaching the draw-call capacity or the 16-bit
/// index space, flushes it. While recording,
/// flushed meshes are kept instead of drawn and [`CacheSink::replay`] draws
/// them again.
pub struct MacroquadSink {
    textures: Vec<Texture2D>,
    pending: PendingMesh,
    entries: Vec<Vec<Mesh>>,
    recording: Option<Vec<Mesh>>,
    projection: Option<Mat4>,
    blending: bool,
    reserve_quads: usize,
    max_batch_quads: usize,
}

impl MacroquadSink {
    /// Sink sized for macroquad's default draw-call capacity.
    pub fn new() -> Self {
        Self::with_draw_call_capacity(DEFAULT_DRAW_CALL_VERTICES, DEFAULT_DRAW_CALL_INDICES)
    }

    /// Sink for a window whose `Conf` raises the draw-call capacity.
    pub fn with_draw_call_capacity(vertices: usize, indices: usize) -> Self {
        MacroquadSink {
            textures: Vec::new(),
            pending: PendingMesh::default(),
            entries: Vec::new(),
            recording: None,
            projection: None,
            blending: false,
            reserve_quads: 0,
            max_batch_quads: batch_quads(vertices, indices),
        }
    }

    /// Makes `texture` addressable by the returned id.
    pub fn register_texture(&mut self, texture: Texture2D) -> TextureId {
        self.textures.push(texture);
        TextureId(self.textures.len() as u32 - 1)
    }

    /// Whether the last playback session asked for blending.
    pub fn blending(&self) -> bool {
        self.blending
    }

    fn apply_projection(&self) {
        if let Some(m) = self.projection {
            set_camera(&MatrixCamera(m));
        }
    }

    fn restore_projection(&self) {
        if self.projection.is_some() {
            set_default_camera();
        }
    }

    fn flush(&mut self) {
        if self.pending.vertices.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending);
        let texture = pending.texture.and_then(|id| {
            let tex = self.textures.get(id.0 as usize).cloned();
            if tex.is_none() {
                warn!("texture {} was never registered, drawing untextured", id.0);
            }
            tex
        });
        let mesh = Mesh {
            vertices: pending.vertices,
            indices: pending.indices,
            texture,
        };
        match self.recording.as_mut() {
            Some(entry) => entry.push(mesh),
            None => draw_mesh(&mesh),
        }
    }
}

impl Default for MacroquadSink {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadSink for MacroquadSink {
    fn set_projection(&mut self, projection: Mat4) {
        self.projection = Some(projection);
    }

    fn submit_quad(&mut self, texture: TextureId, v: &[f32; QUAD_LEN]) {
        let full = self.pending.vertices.len() / VERTICES_PER_QUAD >= self.max_batch_quads;
        if self.pending.texture != Some(texture) || full {
            self.flush();
            self.pending.texture = Some(texture);
        }

        let base = self.pending.vertices.len() as u16;
        for (x, y, c, u, tv) in [
            (X1, Y1, C1, U1, V1),
            (X2, Y2, C2, U2, V2),
            (X3, Y3, C3, U3, V3),
            (X4, Y4, C4, U4, V4),
        ] {
            self.pending
                .vertices
                .push(Vertex::new(v[x], v[y], 0.0, v[u], v[tv], unpack_color(v[c])));
        }
        self.pending
            .indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

impl BatchSink for MacroquadSink {
    fn begin(&mut self) {
        self.apply_projection();
    }

    fn end(&mut self) {
        self.flush();
        self.restore_projection();
    }
}

impl CacheSink for MacroquadSink {
    fn clear(&mut self) {
        self.entries.clear();
    }

    fn begin_recording(&mut self) {
        self.flush();
        self.recording = Some(Vec::new());
        self.pending
            .vertices
            .reserve(self.reserve_quads.min(self.max_batch_quads) * VERTICES_PER_QUAD);
    }

    fn end_recording(&mut self) -> CacheId {
        self.flush();
        let entry = self.recording.take().unwrap_or_default();
        trace!("recorded cache entry of {} meshes", entry.len());
        self.entries.push(entry);
        CacheId(self.entries.len() - 1)
    }

    fn begin_playback(&mut self) {
        self.apply_projection();
    }

    fn replay(&mut self, id: CacheId) {
        match self.entries.get(id.0) {
            Some(meshes) => meshes.iter().for_each(draw_mesh),
            None => warn!("replay of unknown cache entry {}", id.0),
        }
    }

    fn end_playback(&mut self) {
        self.restore_projection();
    }

    // macroquad's default pipeline already alpha-blends; the flag is only
    // tracked so playback sessions stay balanced.
    fn set_blending(&mut self, enabled: bool) {
        self.blending = enabled;
    }

    fn reserve(&mut self, quads: usize) {
        self.reserve_quads = quads;
    }
}
