use std::ops::AddAssign;

use log::trace;
use macroquad::math::{Mat4, Rect};

use super::projection::ProjectionStrategy;
use super::rasterizer::LayerRasterizer;
use super::sink::{BatchSink, QuadSink};
use super::MapRenderer;
use crate::map::{MapLayer, MapObject, TileMap};
use crate::view::OrthoCamera;
use crate::RenderError;

/// Work done by one render call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Visible layers dispatched.
    pub layers: usize,
    /// Quads generated from cells.
    pub quads: usize,
    /// Cache entries replayed.
    pub replays: usize,
}

impl AddAssign for FrameStats {
    fn add_assign(&mut self, rhs: Self) {
        self.layers += rhs.layers;
        self.quads += rhs.quads;
        self.replays += rhs.replays;
    }
}

/// Draws the objects of object layers. The renderers themselves only know
/// tile geometry.
pub trait ObjectRenderer {
    /// Called once per visible object of a visible object layer.
    fn render_object(&mut self, object: &MapObject);
}

impl<F: FnMut(&MapObject)> ObjectRenderer for F {
    fn render_object(&mut self, object: &MapObject) {
        self(object)
    }
}

/// Object renderer for maps whose object layers should not be drawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreObjects;

impl ObjectRenderer for IgnoreObjects {
    fn render_object(&mut self, _object: &MapObject) {}
}

/// Dispatches one layer by kind. Hidden layers are skipped.
#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_layer<P, S, O>(
    layer: &MapLayer,
    projection: &P,
    view: &Rect,
    unit_scale: f32,
    rasterizer: &mut LayerRasterizer,
    objects: &mut O,
    sink: &mut S,
    stats: &mut FrameStats,
) where
    P: ProjectionStrategy,
    S: QuadSink + ?Sized,
    O: ObjectRenderer + ?Sized,
{
    if !layer.visible() {
        trace!("layer '{}' hidden", layer.name());
        return;
    }
    stats.layers += 1;
    match layer {
        MapLayer::Tiles(tiles) => {
            stats.quads += rasterizer.rasterize(tiles, projection, view, unit_scale, sink);
        }
        MapLayer::Objects(group) => {
            for object in group.objects.iter().filter(|o| o.visible) {
                objects.render_object(object);
            }
        }
    }
}

/// Immediate-mode renderer: every frame rebuilds the visible geometry and
/// submits it straight to a [`BatchSink`].
pub struct RenderSession<'m, P, S, O> {
    map: &'m TileMap,
    unit_scale: f32,
    projection: P,
    sink: S,
    objects: O,
    view: Rect,
    rasterizer: LayerRasterizer,
}

impl<'m, P, S, O> RenderSession<'m, P, S, O>
where
    P: ProjectionStrategy,
    S: BatchSink,
    O: ObjectRenderer,
{
    /// Session with a unit scale of 1.
    pub fn new(map: &'m TileMap, projection: P, sink: S, objects: O) -> Self {
        Self::with_unit_scale(map, projection, 1.0, sink, objects)
    }

    /// Session drawing `unit_scale` world units per tile pixel.
    pub fn with_unit_scale(map: &'m TileMap, projection: P, unit_scale: f32, sink: S, objects: O) -> Self {
        RenderSession {
            map,
            unit_scale,
            projection,
            sink,
            objects,
            view: Rect::default(),
            rasterizer: LayerRasterizer::new(),
        }
    }

    /// Map being drawn.
    pub fn map(&self) -> &'m TileMap {
        self.map
    }

    /// Draw sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Draw sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the session, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<P, S, O> MapRenderer for RenderSession<'_, P, S, O>
where
    P: ProjectionStrategy,
    S: BatchSink,
    O: ObjectRenderer,
{
    fn set_view(&mut self, camera: &OrthoCamera) {
        self.sink.set_projection(camera.combined());
        self.view = camera.view_bounds();
    }

    fn set_view_bounds(&mut self, projection: Mat4, x: f32, y: f32, width: f32, height: f32) {
        self.sink.set_projection(projection);
        self.view = Rect::new(x, y, width, height);
    }

    fn render(&mut self) -> Result<FrameStats, RenderError> {
        let mut stats = FrameStats::default();
        self.sink.begin();
        for layer in &self.map.layers {
            draw_layer(
                layer,
                &self.projection,
                &self.view,
                self.unit_scale,
                &mut self.rasterizer,
                &mut self.objects,
                &mut self.sink,
                &mut stats,
            );
        }
        self.sink.end();
        trace!("{:?} frame: {} layers, {} quads", P::KIND, stats.layers, stats.quads);
        Ok(stats)
    }

    /// Renders only the layers at `indices`, in the given order.
    ///
    /// Every index is checked before anything is drawn, so a bad index never
    /// leaves a half-submitted frame.
    fn render_layers(&mut self, indices: &[usize]) -> Result<FrameStats, RenderError> {
        let len = self.map.layers.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(RenderError::LayerOutOfRange { index, len });
        }

        let mut stats = FrameStats::default();
        self.sink.begin();
        for &i in indices {
            draw_layer(
                &self.map.layers[i],
                &self.projection,
                &self.view,
                self.unit_scale,
                &mut self.rasterizer,
                &mut self.objects,
                &mut self.sink,
                &mut stats,
            );
        }
        self.sink.end();
        Ok(stats)
    }

    fn view_bounds(&self) -> Rect {
        self.view
    }

    fn unit_scale(&self) -> f32 {
        self.unit_scale
    }
}
