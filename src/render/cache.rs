//! Cache-and-replay rendering.
//!
//! The visible scene is recorded into a single cache entry the first time it
//! is drawn after a view change, then replayed on every later frame until the
//! view changes again.

use log::{debug, warn};
use macroquad::math::{Mat4, Rect};

use super::projection::ProjectionStrategy;
use super::rasterizer::LayerRasterizer;
use super::session::{draw_layer, FrameStats, ObjectRenderer};
use super::sink::{CacheId, CacheSink};
use super::MapRenderer;
use crate::map::TileMap;
use crate::view::OrthoCamera;
use crate::RenderError;

/// Whether the cache holds a usable recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing recorded for the current view.
    Uncached,
    /// A recording session is open.
    Building,
    /// The current view is recorded and can be replayed.
    Cached,
}

impl CacheState {
    fn name(self) -> &'static str {
        match self {
            CacheState::Uncached => "uncached",
            CacheState::Building => "building",
            CacheState::Cached => "cached",
        }
    }
}

/// What the caller must do after [`CacheStateMachine::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginAction {
    /// Open a recording session, clearing old entries first if `clear`.
    Record {
        /// Drop the stale entries first.
        clear: bool,
    },
    /// Open a playback session.
    Replay,
}

/// What the caller must do after [`CacheStateMachine::end`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndAction {
    /// Close the recording; the entry is now replayable.
    FinishRecording,
    /// Close the playback session.
    FinishPlayback,
}

/// Transitions of the cache, with the `recache` request flag kept beside the
/// state. Begin/end must alternate.
#[derive(Debug, Clone)]
pub struct CacheStateMachine {
    state: CacheState,
    recache: bool,
    open: bool,
}

impl Default for CacheStateMachine {
    fn default() -> Self {
        CacheStateMachine {
            state: CacheState::Uncached,
            recache: false,
            open: false,
        }
    }
}

impl CacheStateMachine {
    /// Machine with nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> CacheState {
        self.state
    }

    /// True when a recording is ready to replay.
    pub fn is_cached(&self) -> bool {
        self.state == CacheState::Cached
    }

    /// True once the view changed and the next `begin` will rebuild.
    pub fn needs_recache(&self) -> bool {
        self.recache
    }

    /// Requests a rebuild on the next `begin`, whatever the current state.
    pub fn invalidate(&mut self) {
        self.recache = true;
    }

    /// Opens a session.
    pub fn begin(&mut self) -> Result<BeginAction, RenderError> {
        if self.open {
            return Err(self.reject("begin"));
        }

        let clear = self.recache;
        if self.recache {
            self.recache = false;
            self.state = CacheState::Uncached;
        }

        match self.state {
            CacheState::Uncached => {
                self.state = CacheState::Building;
                self.open = true;
                Ok(BeginAction::Record { clear })
            }
            CacheState::Cached => {
                self.open = true;
                Ok(BeginAction::Replay)
            }
            CacheState::Building => Err(self.reject("begin")),
        }
    }

    /// Closes the session opened by the last `begin`.
    pub fn end(&mut self) -> Result<EndAction, RenderError> {
        if !self.open {
            return Err(self.reject("end"));
        }
        match self.state {
            CacheState::Building => {
                self.open = false;
                self.state = CacheState::Cached;
                Ok(EndAction::FinishRecording)
            }
            CacheState::Cached => {
                self.open = false;
                Ok(EndAction::FinishPlayback)
            }
            CacheState::Uncached => Err(self.reject("end")),
        }
    }

    fn reject(&self, event: &'static str) -> RenderError {
        RenderError::InvalidTransition {
            state: self.state.name(),
            event,
        }
    }
}

/// Renderer that records the visible layers once per view and replays them.
///
/// The frame on which the view changed does the work twice: a full
/// rasterization into the cache, then a replay of it.
pub struct CachedRenderer<'m, P, S, O> {
    map: &'m TileMap,
    unit_scale: f32,
    projection: P,
    sink: S,
    objects: O,
    view: Rect,
    rasterizer: LayerRasterizer,
    machine: CacheStateMachine,
    entry: Option<CacheId>,
}

impl<'m, P, S, O> CachedRenderer<'m, P, S, O>
where
    P: ProjectionStrategy,
    S: CacheSink,
    O: ObjectRenderer,
{
    /// Renderer with a unit scale of 1.
    pub fn new(map: &'m TileMap, projection: P, sink: S, objects: O) -> Self {
        Self::with_unit_scale(map, projection, 1.0, sink, objects)
    }

    /// Renderer drawing `unit_scale` world units per tile pixel.
    pub fn with_unit_scale(map: &'m TileMap, projection: P, unit_scale: f32, sink: S, objects: O) -> Self {
        CachedRenderer {
            map,
            unit_scale,
            projection,
            sink,
            objects,
            view: Rect::default(),
            rasterizer: LayerRasterizer::new(),
            machine: CacheStateMachine::new(),
            entry: None,
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

    /// State of the cache.
    pub fn state(&self) -> CacheState {
        self.machine.state()
    }

    /// True when the next frame is a replay.
    pub fn is_cached(&self) -> bool {
        self.machine.is_cached()
    }

    /// Opens a recording or playback session on the sink.
    pub fn begin(&mut self) -> Result<(), RenderError> {
        match self.machine.begin()? {
            BeginAction::Record { clear } => {
                if clear {
                    debug!("view changed, rebuilding tile cache");
                    self.sink.clear();
                    self.entry = None;
                }
                self.sink.begin_recording();
            }
            BeginAction::Replay => {
                self.sink.set_blending(true);
                self.sink.begin_playback();
            }
        }
        Ok(())
    }

    /// Closes the open session. Closing a recording immediately runs one
    /// replay pass so the freshly cached scene is shown this frame.
    pub fn end(&mut self) -> Result<FrameStats, RenderError> {
        match self.machine.end()? {
            EndAction::FinishRecording => {
                let id = self.sink.end_recording();
                self.entry = Some(id);
                debug!("tile cache recorded as entry {}", id.0);
                self.render()
            }
            EndAction::FinishPlayback => {
                self.sink.end_playback();
                self.sink.set_blending(false);
                Ok(FrameStats::default())
            }
        }
    }
}

impl<P, S, O> MapRenderer for CachedRenderer<'_, P, S, O>
where
    P: ProjectionStrategy,
    S: CacheSink,
    O: ObjectRenderer,
{
    fn set_view(&mut self, camera: &OrthoCamera) {
        self.sink.set_projection(camera.combined());
        self.view = camera.view_bounds();
        self.machine.invalidate();
    }

    fn set_view_bounds(&mut self, projection: Mat4, x: f32, y: f32, width: f32, height: f32) {
        self.sink.set_projection(projection);
        self.view = Rect::new(x, y, width, height);
        self.machine.invalidate();
    }

    fn render(&mut self) -> Result<FrameStats, RenderError> {
        self.begin()?;
        let mut stats = FrameStats::default();
        if self.machine.is_cached() {
            if let Some(id) = self.entry {
                self.sink.replay(id);
                stats.replays += 1;
            }
        } else {
            let map = self.map;
            for layer in &map.layers {
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
        }
        stats += self.end()?;
        Ok(stats)
    }

    fn render_layers(&mut self, _indices: &[usize]) -> Result<FrameStats, RenderError> {
        warn!("render_layers called on a cached renderer");
        Err(RenderError::UnsupportedOperation {
            operation: "render_layers",
        })
    }

    fn view_bounds(&self) -> Rect {
        self.view
    }

    fn unit_scale(&self) -> f32 {
        self.unit_scale
    }
}
