use std::sync::Arc;

use macroquad::math::Rect;

use super::cell::{Cell, Gid};
use super::tileset::{Tile, TileSet};

/// A grid of cells drawn with a common tile size and opacity.
#[derive(Debug, Clone)]
pub struct TileLayer {
    /// Layer name, used in logs.
    pub name: String,
    /// Hidden layers are skipped entirely.
    pub visible: bool,
    /// 0.0 (transparent) ..= 1.0 (opaque); only modulates vertex alpha.
    pub opacity: f32,
    width: usize,
    height: usize,
    tile_w: f32,
    tile_h: f32,
    cells: Vec<Option<Cell>>,
}

impl TileLayer {
    /// Empty `width`x`height` layer whose grid cells are `tile_w`x`tile_h` pixels.
    pub fn new(name: impl Into<String>, width: usize, height: usize, tile_w: f32, tile_h: f32) -> Self {
        TileLayer {
            name: name.into(),
            visible: true,
            opacity: 1.0,
            width,
            height,
            tile_w,
            tile_h,
            cells: vec![None; width * height],
        }
    }

    /// Fills a layer from row-major Tiled gids. Gid 0, and gids no tile set
    /// claims, leave the cell empty. Cells showing the same tile share one
    /// `Arc<Tile>`.
    pub fn from_gids(
        name: impl Into<String>,
        width: usize,
        height: usize,
        tile_w: f32,
        tile_h: f32,
        data: &[u32],
        tilesets: &[TileSet],
    ) -> Self {
        let mut layer = TileLayer::new(name, width, height, tile_w, tile_h);
        let shared: Vec<(u32, Vec<Arc<Tile>>)> = tilesets.iter().map(|ts| (ts.first_gid, ts.tiles())).collect();
        for (idx, &raw) in data.iter().enumerate().take(width * height) {
            let gid = Gid(raw);
            if gid.clean() == 0 {
                continue;
            }
            let tile = shared.iter().find_map(|(first, tiles)| {
                let local = gid.clean().checked_sub(*first)?;
                tiles.get(local as usize).cloned()
            });
            if let Some(tile) = tile {
                layer.cells[idx] = Some(Cell::from_gid(tile, gid));
            }
        }
        layer
    }

    /// Columns.
    pub fn width(&self) -> usize { self.width }
    /// Rows.
    pub fn height(&self) -> usize { self.height }
    /// Grid cell width in pixels, before unit scaling.
    pub fn tile_width(&self) -> f32 { self.tile_w }
    /// Grid cell height in pixels, before unit scaling.
    pub fn tile_height(&self) -> f32 { self.tile_h }

    /// Cell at `(col, row)`, `None` when empty or outside the grid.
    #[inline]
    pub fn cell_at(&self, col: usize, row: usize) -> Option<&Cell> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells[row * self.width + col].as_ref()
    }

    /// Replaces a cell; writes outside the grid are ignored.
    pub fn set_cell(&mut self, col: usize, row: usize, cell: Option<Cell>) {
        if col < self.width && row < self.height {
            self.cells[row * self.width + col] = cell;
        }
    }

    /// Number of cells holding a tile.
    pub fn occupied(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.as_ref().is_some_and(|c| c.tile.is_some()))
            .count()
    }
}

/// A free-standing map object. The renderers only hand these to an
/// [`ObjectRenderer`](crate::ObjectRenderer).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapObject {
    /// Unique id within the map.
    pub id: u32,
    /// Object name, may be empty.
    pub name: String,
    /// World rectangle.
    pub bounds: Rect,
    /// Clockwise rotation in degrees.
    pub rotation: f32,
    /// Hidden objects are not passed to the object renderer.
    pub visible: bool,
    /// Tile shown by tile objects.
    pub gid: Option<u32>,
}

/// Layer of map objects.
#[derive(Debug, Clone)]
pub struct ObjectLayer {
    /// Layer name, used in logs.
    pub name: String,
    /// Hidden layers are skipped entirely.
    pub visible: bool,
    /// Objects in draw order.
    pub objects: Vec<MapObject>,
}

impl ObjectLayer {
    /// Visible layer holding `objects`.
    pub fn new(name: impl Into<String>, objects: Vec<MapObject>) -> Self {
        ObjectLayer {
            name: name.into(),
            visible: true,
            objects,
        }
    }
}

/// Either kind of map layer.
#[derive(Debug, Clone)]
pub enum MapLayer {
    /// Grid of tile cells.
    Tiles(TileLayer),
    /// Free-standing objects.
    Objects(ObjectLayer),
}

impl MapLayer {
    /// Name of the wrapped layer.
    pub fn name(&self) -> &str {
        match self {
            MapLayer::Tiles(l) => &l.name,
            MapLayer::Objects(l) => &l.name,
        }
    }

    /// Visibility of the wrapped layer.
    pub fn visible(&self) -> bool {
        match self {
            MapLayer::Tiles(l) => l.visible,
            MapLayer::Objects(l) => l.visible,
        }
    }
}

/// Layers in draw order (array order).
#[derive(Debug, Clone, Default)]
pub struct TileMap {
    /// Layers, drawn first to last.
    pub layers: Vec<MapLayer>,
    /// Tile sets the layers were built from.
    pub tilesets: Vec<TileSet>,
}

impl TileMap {
    /// Map without tile sets.
    pub fn new(layers: Vec<MapLayer>) -> Self {
        TileMap {
            layers,
            tilesets: Vec::new(),
        }
    }

    /// Attaches the tile sets gids resolve against.
    pub fn with_tilesets(mut self, tilesets: Vec<TileSet>) -> Self {
        self.tilesets = tilesets;
        self
    }

    /// Tile for a global id, if any tile set owns it.
    pub fn tile(&self, gid: u32) -> Option<Arc<Tile>> {
        self.tilesets.iter().find_map(|ts| ts.tile(gid))
    }
}
