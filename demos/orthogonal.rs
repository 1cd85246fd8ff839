use anyhow::Context;
use log::{error, info};
use macroquad::prelude::*;
use macroquad_tiled_renderer::{
    build_renderer, Cell, MacroquadSink, MapLayer, MapRenderer, ObjectLayer, MapObject, OrthoCamera, RendererConfig,
    Rotation, TextureId, TileLayer, TileMap, TileSet,
};

const CONFIG: &str = r#"{ "unit_scale": 1.0, "projection": "orthogonal", "mode": "cached" }"#;
const PAN_SPEED: f32 = 240.0;

fn window_conf() -> Conf {
    Conf {
        window_title: "Orthogonal Map".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

/// 2x2 atlas of 16px tiles, each a different flat color with a dark border.
fn checker_atlas() -> Texture2D {
    let colors = [BEIGE, DARKGREEN, SKYBLUE, GRAY];
    let mut image = Image::gen_image_color(32, 32, BLACK);
    for y in 0..32u32 {
        for x in 0..32u32 {
            let (tx, ty) = (x / 16, y / 16);
            let border = x % 16 == 0 || y % 16 == 0;
            let color = if border { DARKGRAY } else { colors[(ty * 2 + tx) as usize] };
            image.set_pixel(x, y, color);
        }
    }
    let texture = Texture2D::from_image(&image);
    texture.set_filter(FilterMode::Nearest);
    texture
}

fn build_map(texture: TextureId) -> TileMap {
    let tileset = TileSet {
        first_gid: 1,
        tilecount: 4,
        cols: 2,
        tile_w: 16,
        tile_h: 16,
        spacing: 0,
        margin: 0,
        texture,
        atlas_size: vec2(32.0, 32.0),
    };

    let (w, h) = (200, 120);
    let gids: Vec<u32> = (0..w * h)
        .map(|i| {
            let (col, row) = (i % w, i / w);
            let gid = ((col / 4 + row / 4) % 4 + 1) as u32;
            // every seventh tile flipped horizontally
            if i % 7 == 0 { gid | macroquad_tiled_renderer::map::FLIP_H } else { gid }
        })
        .collect();
    let ground = TileLayer::from_gids("ground", w, h, 16.0, 16.0, &gids, std::slice::from_ref(&tileset));

    let markers = ObjectLayer::new(
        "markers",
        (0..10)
            .map(|id| MapObject {
                id,
                name: format!("marker{id}"),
                bounds: Rect::new(64.0 + id as f32 * 96.0, 64.0, 24.0, 24.0),
                visible: true,
                ..Default::default()
            })
            .collect(),
    );

    let mut map = TileMap::new(vec![MapLayer::Tiles(ground), MapLayer::Objects(markers)]).with_tilesets(vec![tileset]);

    // a diagonal of rotated tiles to show cell orientation
    if let (Some(tile), Some(MapLayer::Tiles(layer))) = (map.tile(4), map.layers.first_mut()) {
        let turns = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];
        for i in 0..h.min(w) {
            layer.set_cell(i, i, Some(Cell::new(tile.clone()).rotated(turns[i % 4])));
        }
    }
    map
}

fn pan(camera: &mut OrthoCamera) -> bool {
    let step = PAN_SPEED * get_frame_time();
    let mut delta = Vec2::ZERO;
    if is_key_down(KeyCode::Left) {
        delta.x -= step;
    }
    if is_key_down(KeyCode::Right) {
        delta.x += step;
    }
    if is_key_down(KeyCode::Down) {
        delta.y -= step;
    }
    if is_key_down(KeyCode::Up) {
        delta.y += step;
    }
    if delta == Vec2::ZERO {
        return false;
    }
    camera.translate(delta);
    true
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let config = match RendererConfig::from_json_str(CONFIG).context("built-in demo config") {
        Ok(config) => config,
        Err(e) => {
            error!("{e:#}");
            return;
        }
    };
    info!("renderer config: {config:?}");

    let mut sink = MacroquadSink::new();
    let atlas = sink.register_texture(checker_atlas());
    let map = build_map(atlas);

    let mut camera = OrthoCamera::new(screen_width(), screen_height());
    let mut renderer = build_renderer(&config, &map, sink, |_: &MapObject| {});
    renderer.set_view(&camera);

    loop {
        clear_background(BLACK);

        if pan(&mut camera) {
            renderer.set_view(&camera);
        }
        match renderer.render() {
            Ok(stats) => {
                draw_text(
                    &format!("FPS: {}  quads: {}  replays: {}", get_fps(), stats.quads, stats.replays),
                    20.0,
                    40.0,
                    30.0,
                    RED,
                );
            }
            Err(e) => error!("render failed: {e}"),
        }

        next_frame().await;
    }
}
