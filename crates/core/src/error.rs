//! Error types for the figlink layout library.

use thiserror::Error;

/// Primary error type for figure clustering and export.
#[derive(Error, Debug)]
pub enum FigError {
    #[error("invalid geometry: ({x0}, {y0}, {x1}, {y1}) has negative extent")]
    InvalidGeometry { x0: f64, y0: f64, x1: f64, y1: f64 },

    #[error("unknown element category: {0}")]
    UnknownCategory(String),

    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias for FigError.
pub type Result<T> = std::result::Result<T, FigError>;
