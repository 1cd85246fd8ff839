use thiserror::Error;

/// Errors raised by the tile renderers.
///
/// Degenerate views and malformed texture regions are not errors: an empty
/// visible range simply produces no quads, and a bad region produces a bad
/// quad for the draw sink to deal with.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The call shape is not supported by this renderer (e.g. rendering a
    /// layer subset while in cache mode).
    #[error("{operation} is not implemented for this renderer")]
    UnsupportedOperation {
        /// Name of the rejected operation.
        operation: &'static str,
    },
    /// A layer index passed to `render_layers` does not exist.
    #[error("layer index {index} out of range (map has {len} layers)")]
    LayerOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of layers in the map.
        len: usize,
    },
    /// The cache state machine got an event it cannot accept in its state.
    #[error("cannot {event} while cache is {state}")]
    InvalidTransition {
        /// State the machine was in.
        state: &'static str,
        /// Event that was rejected.
        event: &'static str,
    },
    /// A rotation other than 0, 90, 180 or 270 degrees.
    #[error("invalid cell rotation {0} (expected 0, 90, 180 or 270)")]
    InvalidRotation(u16),
}
