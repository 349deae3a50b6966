use crate::grid::Position;
use thiserror::Error;

/// Errors the engine can report. A search that completes without reaching the
/// target is *not* an error; it comes back as `SearchResult { found: false }`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("position {pos} is outside a {size}x{size} grid")]
    OutOfBounds { pos: Position, size: usize },

    #[error("start and target must be distinct cells")]
    StartEqualsTarget,

    #[error("endpoint {0} sits on a wall")]
    EndpointOnWall(Position),

    #[error("grid size {0} is too small, need at least 2")]
    GridTooSmall(usize),

    #[error("bad weight table: {0}")]
    BadWeights(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
