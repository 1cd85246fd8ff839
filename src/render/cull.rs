use macroquad::math::Rect;

/// Order in which rows of a [`VisibleRange`] are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrder {
    /// `row1` up to `row2 - 1`.
    Ascending,
    /// `row2 - 1` down to `row1`, so nearer isometric rows overdraw farther ones.
    Descending,
}

/// Half-open column/row interval of a layer to rasterize.
///
/// An inverted interval (`col2 <= col1` or `row2 <= row1`) is simply empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    /// First column.
    pub col1: usize,
    /// One past the last column.
    pub col2: usize,
    /// First row.
    pub row1: usize,
    /// One past the last row.
    pub row2: usize,
    /// Row visiting order.
    pub order: RowOrder,
}

impl VisibleRange {
    /// Every cell of a `width`x`height` grid.
    pub fn full(width: usize, height: usize, order: RowOrder) -> Self {
        VisibleRange {
            col1: 0,
            col2: width,
            row1: 0,
            row2: height,
            order,
        }
    }

    /// Cells of a grid intersecting `view`, padded by one tile on the far
    /// edges so partially visible tiles are kept.
    ///
    /// `tile_w`/`tile_h` are already unit scaled.
    pub fn orthogonal(view: &Rect, tile_w: f32, tile_h: f32, width: usize, height: usize) -> Self {
        let col1 = clamp_index((view.x / tile_w).floor(), width);
        let col2 = clamp_index(((view.x + view.w + tile_w) / tile_w).floor(), width);
        let row1 = clamp_index((view.y / tile_h).floor(), height);
        let row2 = clamp_index(((view.y + view.h + tile_h) / tile_h).floor(), height);

        VisibleRange {
            col1,
            col2,
            row1,
            row2,
            order: RowOrder::Ascending,
        }
    }

    /// True when there is nothing to rasterize.
    pub fn is_empty(&self) -> bool {
        self.col2 <= self.col1 || self.row2 <= self.row1
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        self.col2.saturating_sub(self.col1) * self.row2.saturating_sub(self.row1)
    }

    /// `(col, row)` pairs, rows in [`RowOrder`], columns always ascending.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let VisibleRange { col1, col2, row1, row2, order } = *self;
        let rows: Box<dyn Iterator<Item = usize>> = match order {
            RowOrder::Ascending => Box::new(row1..row2),
            RowOrder::Descending => Box::new((row1..row2).rev()),
        };
        rows.flat_map(move |row| (col1..col2).map(move |col| (col, row)))
    }
}

// Floors to an index in `0..=limit`; NaN lands on 0.
#[inline]
fn clamp_index(v: f32, limit: usize) -> usize {
    if v.is_nan() || v <= 0.0 {
        0
    } else if v >= limit as f32 {
        limit
    } else {
        v as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_covering_grid_keeps_everything() {
        let r = VisibleRange::orthogonal(&Rect::new(0.0, 0.0, 64.0, 64.0), 32.0, 32.0, 2, 2);
        assert_eq!((r.col1, r.col2, r.row1, r.row2), (0, 2, 0, 2));
        assert_eq!(r.len(), 4);
    }

    #[test]
    fn partial_edge_tiles_are_included() {
        let r = VisibleRange::orthogonal(&Rect::new(40.0, 10.0, 50.0, 20.0), 32.0, 32.0, 10, 10);
        assert_eq!((r.col1, r.col2), (1, 3));
        assert_eq!((r.row1, r.row2), (0, 1));
    }

    #[test]
    fn view_outside_grid_is_empty() {
        let views = [
            Rect::new(1000.0, 0.0, 64.0, 64.0),
            Rect::new(0.0, 1000.0, 64.0, 64.0),
            Rect::new(-500.0, 0.0, 64.0, 64.0),
            Rect::new(0.0, -500.0, 64.0, 64.0),
        ];
        for view in views {
            let r = VisibleRange::orthogonal(&view, 32.0, 32.0, 4, 4);
            assert!(r.is_empty(), "{view:?} -> {r:?}");
            assert_eq!(r.cells().count(), 0);
        }
    }

    #[test]
    fn degenerate_view_is_empty_not_an_error() {
        let r = VisibleRange::orthogonal(&Rect::new(64.0, 64.0, -200.0, -200.0), 32.0, 32.0, 4, 4);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
    }

    #[test]
    fn descending_rows_visit_bottom_row_first() {
        let cells: Vec<_> = VisibleRange::full(2, 2, RowOrder::Descending).cells().collect();
        assert_eq!(cells, vec![(0, 1), (1, 1), (0, 0), (1, 0)]);
    }
}
