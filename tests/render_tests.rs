// tests/render_tests.rs

mod common;

use macroquad::math::{vec2, Mat4, Rect};
use macroquad_tiled_renderer::{
    build_renderer, Cell, IgnoreObjects, Isometric, MapLayer, MapObject, MapRenderer, MemorySink, OrthoCamera,
    Orthogonal, RenderError, RenderSession, RendererConfig, TileLayer, TileMap,
};

use common::*;

#[test]
fn two_by_two_layer_emits_four_tiles() {
    let map = TileMap::new(vec![MapLayer::Tiles(full_layer("ground", 2, 2))]);
    let mut session = RenderSession::new(&map, Orthogonal, MemorySink::new(), IgnoreObjects);
    session.set_view_bounds(Mat4::IDENTITY, 0.0, 0.0, 64.0, 64.0);

    let stats = session.render().expect("render");
    assert_eq!(stats.quads, 4);
    assert_eq!(stats.layers, 1);

    let drawn = session.sink().drawn();
    let origins: Vec<_> = drawn.iter().map(|q| q.quad.positions()[0]).collect();
    assert_eq!(origins, vec![(0.0, 0.0), (32.0, 0.0), (0.0, 32.0), (32.0, 32.0)]);
    for q in drawn {
        let [(x1, y1), _, (x2, y2), _] = q.quad.positions();
        assert_eq!((x2 - x1, y2 - y1), (32.0, 32.0));
    }
}

#[test]
fn view_outside_grid_draws_nothing() {
    let map = TileMap::new(vec![MapLayer::Tiles(full_layer("ground", 4, 4))]);
    let mut session = RenderSession::new(&map, Orthogonal, MemorySink::new(), IgnoreObjects);

    for (x, y) in [(500.0, 0.0), (0.0, 500.0), (-500.0, -500.0)] {
        session.set_view_bounds(Mat4::IDENTITY, x, y, 64.0, 64.0);
        let stats = session.render().expect("render");
        assert_eq!(stats.quads, 0);
    }
    assert!(session.sink().drawn().is_empty());
    assert_eq!(session.sink().counters().begins, 3);
    assert_eq!(session.sink().counters().ends, 3);
}

#[test]
fn empty_cells_emit_no_geometry() {
    let data = [1, 0, 0, 2, 0, 3, 0, 0, 0];
    let layer = TileLayer::from_gids("sparse", 3, 3, 32.0, 32.0, &data, &[tileset()]);
    let occupied = layer.occupied();
    let map = TileMap::new(vec![MapLayer::Tiles(layer)]);

    let mut session = RenderSession::new(&map, Orthogonal, MemorySink::new(), IgnoreObjects);
    session.set_view_bounds(Mat4::IDENTITY, 0.0, 0.0, 96.0, 96.0);
    let stats = session.render().expect("render");

    assert_eq!(occupied, 3);
    assert_eq!(stats.quads, occupied);
    assert_eq!(session.sink().drawn().len(), occupied);
}

#[test]
fn horizontal_flip_swaps_u_and_keeps_v() {
    let map = single_cell_map(Cell::new(tile(1)).flipped(true, false));
    let mut session = RenderSession::new(&map, Orthogonal, MemorySink::new(), IgnoreObjects);
    session.set_view_bounds(Mat4::IDENTITY, 0.0, 0.0, 32.0, 32.0);
    session.render().expect("render");

    // region u = 0..0.5, v = 0..0.5; unflipped U1 = 0.0, U3 = 0.5
    let uvs = session.sink().drawn()[0].quad.uvs();
    assert_eq!(uvs, [(0.5, 0.5), (0.5, 0.0), (0.0, 0.0), (0.0, 0.5)]);
}

#[test]
fn hidden_layers_are_skipped() {
    let mut hidden = full_layer("hidden", 2, 2);
    hidden.visible = false;
    let map = TileMap::new(vec![
        MapLayer::Tiles(hidden),
        MapLayer::Tiles(full_layer("shown", 1, 1)),
    ]);

    let mut session = RenderSession::new(&map, Orthogonal, MemorySink::new(), IgnoreObjects);
    session.set_view_bounds(Mat4::IDENTITY, 0.0, 0.0, 64.0, 64.0);
    let stats = session.render().expect("render");
    assert_eq!(stats.layers, 1);
    assert_eq!(stats.quads, 1);
}

#[test]
fn visible_objects_reach_the_object_renderer() {
    let mut group = objects("spawns", 3);
    group.objects[1].visible = false;
    let mut hidden_group = objects("hidden", 2);
    hidden_group.visible = false;
    let map = TileMap::new(vec![
        MapLayer::Tiles(full_layer("ground", 1, 1)),
        MapLayer::Objects(group),
        MapLayer::Objects(hidden_group),
    ]);

    let mut seen = Vec::new();
    {
        let collect = |o: &MapObject| seen.push(o.id);
        let mut session = RenderSession::new(&map, Orthogonal, MemorySink::new(), collect);
        session.set_view_bounds(Mat4::IDENTITY, 0.0, 0.0, 32.0, 32.0);
        let stats = session.render().expect("render");
        assert_eq!(stats.layers, 2);
    }
    assert_eq!(seen, vec![0, 2]);
}

#[test]
fn render_layers_draws_the_requested_subset_in_order() {
    let map = TileMap::new(vec![
        MapLayer::Tiles(full_layer("a", 1, 1)),
        MapLayer::Tiles(full_layer("b", 2, 1)),
        MapLayer::Tiles(full_layer("c", 2, 2)),
    ]);
    let mut session = RenderSession::new(&map, Orthogonal, MemorySink::new(), IgnoreObjects);
    session.set_view_bounds(Mat4::IDENTITY, 0.0, 0.0, 64.0, 64.0);

    let stats = session.render_layers(&[2, 0]).expect("render subset");
    assert_eq!(stats.layers, 2);
    assert_eq!(stats.quads, 5);
}

#[test]
fn render_layers_rejects_bad_index_before_drawing() {
    let map = TileMap::new(vec![MapLayer::Tiles(full_layer("a", 1, 1))]);
    let mut session = RenderSession::new(&map, Orthogonal, MemorySink::new(), IgnoreObjects);

    let err = session.render_layers(&[0, 3]).unwrap_err();
    assert_eq!(err, RenderError::LayerOutOfRange { index: 3, len: 1 });
    assert_eq!(session.sink().counters().begins, 0);
    assert!(session.sink().drawn().is_empty());
}

#[test]
fn set_view_from_camera_updates_bounds_and_projection() {
    let map = TileMap::default();
    let mut session = RenderSession::new(&map, Orthogonal, MemorySink::new(), IgnoreObjects);

    let mut camera = OrthoCamera::new(320.0, 240.0);
    camera.translate(vec2(16.0, 8.0));
    session.set_view(&camera);

    assert_eq!(session.view_bounds(), Rect::new(16.0, 8.0, 320.0, 240.0));
    assert_eq!(session.sink().projection(), Some(camera.combined()));
}

#[test]
fn unit_scale_is_applied_to_positions() {
    let map = TileMap::new(vec![MapLayer::Tiles(full_layer("ground", 2, 1))]);
    let mut session = RenderSession::with_unit_scale(&map, Orthogonal, 0.5, MemorySink::new(), IgnoreObjects);
    session.set_view_bounds(Mat4::IDENTITY, 0.0, 0.0, 32.0, 16.0);
    session.render().expect("render");

    assert_eq!(session.unit_scale(), 0.5);
    let second = session.sink().drawn()[1].quad.positions();
    assert_eq!(second[0], (16.0, 0.0));
    assert_eq!(second[2], (32.0, 16.0));
}

#[test]
fn isometric_scans_the_whole_grid() {
    let map = TileMap::new(vec![MapLayer::Tiles(full_layer("iso", 3, 3))]);
    let mut session = RenderSession::new(&map, Isometric, MemorySink::new(), IgnoreObjects);
    session.set_view_bounds(Mat4::IDENTITY, 10_000.0, 10_000.0, 1.0, 1.0);

    let stats = session.render().expect("render");
    assert_eq!(stats.quads, 9);
}

#[test]
fn built_immediate_renderer_supports_layer_subsets() {
    let map = TileMap::new(vec![MapLayer::Tiles(full_layer("ground", 2, 2))]);
    let mut renderer = build_renderer(&RendererConfig::default(), &map, MemorySink::new(), IgnoreObjects);
    renderer.set_view_bounds(Mat4::IDENTITY, 0.0, 0.0, 64.0, 64.0);

    assert_eq!(renderer.render().expect("render").quads, 4);
    assert_eq!(renderer.render_layers(&[0]).expect("subset").quads, 4);
}
