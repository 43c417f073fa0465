//! Errors raised around the traced core: loading options, validating
//! scenes and writing images.
//!
//! Tracing itself never fails; depth budgets and degenerate geometry are
//! handled silently.

use thiserror::Error;

/// Errors that can occur while configuring a render or saving its output.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Options parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid render options: {0}")]
    InvalidOptions(String),

    #[error("Invalid scene: {0}")]
    InvalidScene(String),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
