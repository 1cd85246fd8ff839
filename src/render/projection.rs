use macroquad::math::{vec2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::cull::{RowOrder, VisibleRange};

/// Which projection a renderer is built with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    /// Square grid, culled against the view.
    #[default]
    Orthogonal,
    /// Diamond grid, always scanned in full.
    Isometric,
}

/// How grid cells map onto the screen.
///
/// Renderers are generic over this, so the choice is made once per renderer
/// rather than once per cell.
pub trait ProjectionStrategy {
    /// Tag used by logging and configuration.
    const KIND: ProjectionKind;

    /// Cells of a `width`x`height` layer to visit for `view`, in draw order.
    /// `tile_size` is unit scaled.
    fn visible_range(&self, view: &Rect, tile_size: Vec2, width: usize, height: usize) -> VisibleRange;

    /// Bottom-left corner of cell `(col, row)` in world units.
    fn cell_origin(&self, col: usize, row: usize, tile_size: Vec2) -> Vec2;
}

/// Rectangular grid projection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Orthogonal;

impl ProjectionStrategy for Orthogonal {
    const KIND: ProjectionKind = ProjectionKind::Orthogonal;

    fn visible_range(&self, view: &Rect, tile_size: Vec2, width: usize, height: usize) -> VisibleRange {
        VisibleRange::orthogonal(view, tile_size.x, tile_size.y, width, height)
    }

    #[inline]
    fn cell_origin(&self, col: usize, row: usize, tile_size: Vec2) -> Vec2 {
        vec2(col as f32 * tile_size.x, row as f32 * tile_size.y)
    }
}

/// Diamond (isometric) projection.
///
/// The view rectangle is not mapped back into grid space, so every cell is
/// visited each pass. Rows go from the last to the first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Isometric;

impl ProjectionStrategy for Isometric {
    const KIND: ProjectionKind = ProjectionKind::Isometric;

    fn visible_range(&self, _view: &Rect, _tile_size: Vec2, width: usize, height: usize) -> VisibleRange {
        VisibleRange::full(width, height, RowOrder::Descending)
    }

    #[inline]
    fn cell_origin(&self, col: usize, row: usize, tile_size: Vec2) -> Vec2 {
        let half = tile_size * 0.5;
        let (col, row) = (col as f32, row as f32);
        vec2((col + row) * half.x, (row - col) * half.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orthogonal_origin_is_grid_multiple() {
        assert_eq!(Orthogonal.cell_origin(3, 2, vec2(32.0, 16.0)), vec2(96.0, 32.0));
    }

    #[test]
    fn isometric_origin_walks_the_diamond() {
        let size = vec2(64.0, 32.0);
        assert_eq!(Isometric.cell_origin(0, 0, size), vec2(0.0, 0.0));
        assert_eq!(Isometric.cell_origin(1, 0, size), vec2(32.0, -16.0));
        assert_eq!(Isometric.cell_origin(0, 1, size), vec2(32.0, 16.0));
        assert_eq!(Isometric.cell_origin(2, 3, size), vec2(160.0, 16.0));
    }

    #[test]
    fn isometric_ignores_the_view() {
        let far_away = Rect::new(1.0e6, 1.0e6, 1.0, 1.0);
        let r = Isometric.visible_range(&far_away, vec2(64.0, 32.0), 3, 2);
        assert_eq!(r, VisibleRange::full(3, 2, RowOrder::Descending));
    }

    #[test]
    fn kind_parses_lowercase() {
        let kind: ProjectionKind = serde_json::from_str("\"isometric\"").expect("parse");
        assert_eq!(kind, Isometric::KIND);
    }
}
