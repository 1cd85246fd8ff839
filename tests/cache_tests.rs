// tests/cache_tests.rs

mod common;

use macroquad::math::Mat4;
use macroquad_tiled_renderer::render::CacheState;
use macroquad_tiled_renderer::{
    build_renderer, CachedRenderer, FrameStats, IgnoreObjects, MapLayer, MapRenderer, MemorySink, OrthoCamera, Orthogonal,
    RenderError, RendererConfig, TileMap,
};

use common::*;

fn two_by_two() -> TileMap {
    TileMap::new(vec![MapLayer::Tiles(full_layer("ground", 2, 2))])
}

#[test]
fn begin_end_after_set_view_leaves_cache_ready() {
    let map = two_by_two();
    let mut renderer = CachedRenderer::new(&map, Orthogonal, MemorySink::new(), IgnoreObjects);
    renderer.set_view(&OrthoCamera::new(64.0, 64.0));
    assert_eq!(renderer.state(), CacheState::Uncached);

    renderer.begin().expect("begin");
    assert_eq!(renderer.state(), CacheState::Building);
    renderer.end().expect("end");
    assert!(renderer.is_cached());
}

#[test]
fn rebuild_frame_records_once_then_replays_once() {
    let map = two_by_two();
    let mut renderer = CachedRenderer::new(&map, Orthogonal, MemorySink::new(), IgnoreObjects);
    renderer.set_view_bounds(Mat4::IDENTITY, 0.0, 0.0, 64.0, 64.0);

    let stats = renderer.render().expect("render");
    assert_eq!(stats.quads, 4);
    assert_eq!(stats.replays, 1);

    let counters = renderer.sink().counters();
    assert_eq!(counters.clears, 1);
    assert_eq!(counters.recordings, 1);
    assert_eq!(counters.playbacks, 1);
    assert_eq!(counters.replays, 1);
    assert_eq!(counters.submitted, 4);
    assert_eq!(renderer.sink().drawn().len(), 4);
}

#[test]
fn cached_frames_replay_without_rasterizing() {
    let map = two_by_two();
    let mut renderer = CachedRenderer::new(&map, Orthogonal, MemorySink::new(), IgnoreObjects);
    renderer.set_view_bounds(Mat4::IDENTITY, 0.0, 0.0, 64.0, 64.0);
    renderer.render().expect("first frame");
    let submitted = renderer.sink().counters().submitted;

    for _ in 0..3 {
        let stats = renderer.render().expect("cached frame");
        assert_eq!(stats, FrameStats { layers: 0, quads: 0, replays: 1 });
    }

    let counters = renderer.sink().counters();
    assert_eq!(counters.submitted, submitted);
    assert_eq!(counters.recordings, 1);
    assert_eq!(counters.replays, 4);
    assert!(!renderer.sink().blending());
}

#[test]
fn view_change_clears_and_rebuilds() {
    let map = two_by_two();
    let mut renderer = CachedRenderer::new(&map, Orthogonal, MemorySink::new(), IgnoreObjects);
    renderer.set_view_bounds(Mat4::IDENTITY, 0.0, 0.0, 64.0, 64.0);
    renderer.render().expect("first frame");
    renderer.render().expect("cached frame");

    renderer.set_view_bounds(Mat4::IDENTITY, 0.0, 0.0, 32.0, 32.0);
    assert!(renderer.is_cached());
    renderer.sink_mut().reset_drawn();
    let stats = renderer.render().expect("rebuild");

    let counters = renderer.sink().counters();
    assert_eq!(counters.clears, 2);
    assert_eq!(counters.recordings, 2);
    assert_eq!(renderer.sink().entry_count(), 1);
    assert_eq!(stats.replays, 1);
    assert_eq!(renderer.sink().drawn().len(), stats.quads);
}

#[test]
fn cached_renderer_rejects_layer_subsets() {
    let map = two_by_two();
    let mut renderer = CachedRenderer::new(&map, Orthogonal, MemorySink::new(), IgnoreObjects);
    renderer.set_view_bounds(Mat4::IDENTITY, 0.0, 0.0, 64.0, 64.0);

    for indices in [&[][..], &[0][..], &[7][..]] {
        assert_eq!(
            renderer.render_layers(indices),
            Err(RenderError::UnsupportedOperation { operation: "render_layers" })
        );
    }
    assert_eq!(renderer.sink().counters().recordings, 0);
}

#[test]
fn mismatched_begin_end_is_an_error() {
    let map = two_by_two();
    let mut renderer = CachedRenderer::new(&map, Orthogonal, MemorySink::new(), IgnoreObjects);

    assert!(matches!(renderer.end(), Err(RenderError::InvalidTransition { .. })));
    renderer.begin().expect("begin");
    assert!(matches!(renderer.begin(), Err(RenderError::InvalidTransition { .. })));
}

#[test]
fn config_builds_cached_isometric_renderer() {
    let config = RendererConfig::from_json_str(r#"{ "projection": "isometric", "mode": "cached" }"#)
        .expect("config");
    let map = two_by_two();
    let mut renderer = build_renderer(&config, &map, MemorySink::new(), IgnoreObjects);
    renderer.set_view_bounds(Mat4::IDENTITY, 1_000.0, 1_000.0, 1.0, 1.0);

    let first = renderer.render().expect("first frame");
    assert_eq!(first.quads, 4);
    let second = renderer.render().expect("second frame");
    assert_eq!(second.quads, 0);
    assert_eq!(second.replays, 1);
    assert!(renderer.render_layers(&[0]).is_err());
}
