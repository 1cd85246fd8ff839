use log::trace;
use macroquad::math::{vec2, Rect};

use super::projection::ProjectionStrategy;
use super::quad::{pack_color, Quad};
use super::sink::QuadSink;
use crate::map::TileLayer;

/// Turns the visible cells of one tile layer into quads.
///
/// Owns the single vertex scratch reused for every cell of every layer.
#[derive(Debug, Default)]
pub struct LayerRasterizer {
    scratch: Quad,
}

impl LayerRasterizer {
    /// Rasterizer with a zeroed scratch quad.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one quad per occupied cell in the projection's visible range and
    /// returns how many were emitted. Empty cells emit nothing.
    pub fn rasterize<P, S>(
        &mut self,
        layer: &TileLayer,
        projection: &P,
        view: &Rect,
        unit_scale: f32,
        sink: &mut S,
    ) -> usize
    where
        P: ProjectionStrategy,
        S: QuadSink + ?Sized,
    {
        let color = pack_color(1.0, 1.0, 1.0, layer.opacity);
        let tile_size = vec2(layer.tile_width(), layer.tile_height()) * unit_scale;

        let range = projection.visible_range(view, tile_size, layer.width(), layer.height());
        if range.is_empty() {
            trace!("layer '{}': nothing visible", layer.name);
            return 0;
        }

        let mut emitted = 0;
        for (col, row) in range.cells() {
            let Some(cell) = layer.cell_at(col, row) else {
                continue;
            };
            let Some(tile) = cell.tile.as_deref() else {
                continue;
            };

            let region = &tile.region;
            let origin = projection.cell_origin(col, row, tile_size);
            let x2 = origin.x + region.width * unit_scale;
            let y2 = origin.y + region.height * unit_scale;

            self.scratch.set(origin.x, origin.y, x2, y2, color, region);
            self.scratch.orient(cell.flip_h, cell.flip_v, cell.rotation);
            sink.submit_quad(region.texture, self.scratch.vertices());
            emitted += 1;
        }

        trace!(
            "layer '{}': cols {}..{} rows {}..{} -> {} quads",
            layer.name,
            range.col1,
            range.col2,
            range.row1,
            range.row2,
            emitted
        );
        emitted
    }
}
