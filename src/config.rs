use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::map::TileMap;
use crate::render::{
    BatchSink, CacheSink, CachedRenderer, Isometric, MapRenderer, ObjectRenderer, Orthogonal,
    ProjectionKind, RenderSession,
};

/// Immediate or cache-and-replay rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Rebuild the geometry every frame.
    #[default]
    Immediate,
    /// Record once per view, replay afterwards.
    Cached,
}

/// Renderer settings, usually read from a small JSON document.
///
/// ```json
/// { "unit_scale": 0.03125, "projection": "isometric", "mode": "cached" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RendererConfig {
    /// World units per tile pixel.
    #[serde(default = "one")]
    pub unit_scale: f32,
    /// Grid projection.
    #[serde(default)]
    pub projection: ProjectionKind,
    /// Immediate or cached rendering.
    #[serde(default)]
    pub mode: RenderMode,
    /// Quads to reserve for the cache recording.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

fn one() -> f32 {
    1.0
}

fn default_cache_capacity() -> usize {
    4000
}

impl Default for RendererConfig {
    fn default() -> Self {
        RendererConfig {
            unit_scale: one(),
            projection: ProjectionKind::default(),
            mode: RenderMode::default(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl RendererConfig {
    /// Parses a config document and checks `unit_scale`.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: RendererConfig = serde_json::from_str(json).context("Parsing renderer config")?;
        if !(config.unit_scale.is_finite() && config.unit_scale > 0.0) {
            anyhow::bail!("unit_scale must be a positive number, got {}", config.unit_scale);
        }
        Ok(config)
    }

    /// Reads a `.json` config file.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let p = path.as_ref();
        if p.extension().and_then(|e| e.to_str()) != Some("json") {
            anyhow::bail!("Renderer config must be a JSON file: {}", p.display());
        }
        let txt = std::fs::read_to_string(p)
            .with_context(|| format!("Reading renderer config {}", p.display()))?;
        Self::from_json_str(&txt).with_context(|| format!("Loading renderer config {}", p.display()))
    }
}

/// Builds the renderer `config` asks for. The projection is fixed here, so
/// per-cell work stays statically dispatched behind the box.
pub fn build_renderer<'m, S, O>(
    config: &RendererConfig,
    map: &'m TileMap,
    mut sink: S,
    objects: O,
) -> Box<dyn MapRenderer + 'm>
where
    S: BatchSink + CacheSink + 'm,
    O: ObjectRenderer + 'm,
{
    let scale = config.unit_scale;
    match (config.mode, config.projection) {
        (RenderMode::Immediate, ProjectionKind::Orthogonal) => {
            Box::new(RenderSession::with_unit_scale(map, Orthogonal, scale, sink, objects))
        }
        (RenderMode::Immediate, ProjectionKind::Isometric) => {
            Box::new(RenderSession::with_unit_scale(map, Isometric, scale, sink, objects))
        }
        (RenderMode::Cached, ProjectionKind::Orthogonal) => {
            sink.reserve(config.cache_capacity);
            Box::new(CachedRenderer::with_unit_scale(map, Orthogonal, scale, sink, objects))
        }
        (RenderMode::Cached, ProjectionKind::Isometric) => {
            sink.reserve(config.cache_capacity);
            Box::new(CachedRenderer::with_unit_scale(map, Isometric, scale, sink, objects))
        }
    }
}
