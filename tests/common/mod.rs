// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::Arc;

use macroquad::math::{vec2, Rect};
use macroquad_tiled_renderer::{Cell, MapLayer, MapObject, ObjectLayer, TextureId, Tile, TileLayer, TileMap, TileSet};

pub fn tileset() -> TileSet {
    TileSet {
        first_gid: 1,
        tilecount: 4,
        cols: 2,
        tile_w: 32,
        tile_h: 32,
        spacing: 0,
        margin: 0,
        texture: TextureId(0),
        atlas_size: vec2(64.0, 64.0),
    }
}

pub fn tile(gid: u32) -> Arc<Tile> {
    tileset().tile(gid).expect("gid in tileset")
}

/// `width`x`height` layer of 32px tiles, every cell filled with gid 1.
pub fn full_layer(name: &str, width: usize, height: usize) -> TileLayer {
    let data = vec![1; width * height];
    TileLayer::from_gids(name, width, height, 32.0, 32.0, &data, &[tileset()])
}

pub fn objects(name: &str, count: u32) -> ObjectLayer {
    ObjectLayer::new(
        name,
        (0..count)
            .map(|id| MapObject {
                id,
                name: format!("obj{id}"),
                bounds: Rect::new(id as f32 * 10.0, 0.0, 10.0, 10.0),
                visible: true,
                ..Default::default()
            })
            .collect(),
    )
}

pub fn single_cell_map(cell: Cell) -> TileMap {
    let mut layer = TileLayer::new("one", 1, 1, 32.0, 32.0);
    layer.set_cell(0, 0, Some(cell));
    TileMap::new(vec![MapLayer::Tiles(layer)])
}
