use std::sync::Arc;

use macroquad::math::Vec2;

/// Opaque handle to an atlas texture owned by the draw sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Sub-rectangle of an atlas texture.
///
/// `u, v` is the top-left corner and `u2, v2` the bottom-right corner in
/// normalized texture space. `width`/`height` are the region's native pixel
/// size; they are never validated, a non-positive size just yields a
/// degenerate quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureRegion {
    /// Atlas the region belongs to.
    pub texture: TextureId,
    /// Left edge.
    pub u: f32,
    /// Top edge.
    pub v: f32,
    /// Right edge.
    pub u2: f32,
    /// Bottom edge.
    pub v2: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl TextureRegion {
    /// Region from normalized edges and a pixel size.
    #[allow(clippy::too_many_arguments)]
    pub fn new(texture: TextureId, u: f32, v: f32, u2: f32, v2: f32, width: f32, height: f32) -> Self {
        TextureRegion { texture, u, v, u2, v2, width, height }
    }

    /// Region covering `w`x`h` pixels at `(x, y)` of an atlas of `atlas_size` pixels.
    pub fn from_pixels(texture: TextureId, atlas_size: Vec2, x: f32, y: f32, w: f32, h: f32) -> Self {
        TextureRegion {
            texture,
            u: x / atlas_size.x,
            v: y / atlas_size.y,
            u2: (x + w) / atlas_size.x,
            v2: (y + h) / atlas_size.y,
            width: w,
            height: h,
        }
    }
}

/// A tile: an immutable texture region, shared by every cell that shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Global id of the tile, flip flags stripped.
    pub id: u32,
    /// Where the tile lives in its atlas.
    pub region: TextureRegion,
}

/// A regular-grid tile atlas.
#[derive(Debug, Clone)]
pub struct TileSet {
    /// Global id of the first tile.
    pub first_gid: u32,
    /// Number of tiles in the set.
    pub tilecount: u32,
    /// Tiles per atlas row. Image-collection sets use 0, laid out as one column.
    pub cols: u32,
    /// Tile width in pixels.
    pub tile_w: u32,
    /// Tile height in pixels.
    pub tile_h: u32,
    /// Pixels between neighbouring tiles.
    pub spacing: u32,
    /// Pixels around the atlas border.
    pub margin: u32,
    /// Atlas the regions sample.
    pub texture: TextureId,
    /// Pixel size of the atlas image.
    pub atlas_size: Vec2,
}

impl TileSet {
    /// True when `gid` (flags stripped) belongs to this set.
    #[inline]
    pub fn contains(&self, gid: u32) -> bool {
        gid >= self.first_gid && gid - self.first_gid < self.tilecount
    }

    /// Atlas region of the tile with local index `local`.
    pub fn region(&self, local: u32) -> TextureRegion {
        let cols = self.cols.max(1);
        let col = local % cols;
        let row = local / cols;
        let sx = self.margin + col * (self.tile_w + self.spacing);
        let sy = self.margin + row * (self.tile_h + self.spacing);

        TextureRegion::from_pixels(
            self.texture,
            self.atlas_size,
            sx as f32,
            sy as f32,
            self.tile_w as f32,
            self.tile_h as f32,
        )
    }

    /// Tile for a global id, or `None` if the id belongs elsewhere. Each call
    /// allocates; use [`TileSet::tiles`] to share tiles between cells.
    pub fn tile(&self, gid: u32) -> Option<Arc<Tile>> {
        if !self.contains(gid) {
            return None;
        }
        Some(Arc::new(Tile {
            id: gid,
            region: self.region(gid - self.first_gid),
        }))
    }

    /// Every tile of the set, in local id order.
    pub fn tiles(&self) -> Vec<Arc<Tile>> {
        (0..self.tilecount)
            .map(|local| self.first_gid.saturating_add(local))
            .filter_map(|gid| self.tile(gid))
            .collect()
    }
}
