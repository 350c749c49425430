// One error type for the whole pad.
// Every variant states *where* things went wrong.
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Pixel access outside [0,W)×[0,H). The rasterizer clamps, so hitting this is a bug.
    #[error("pixel ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfRange { x: i64, y: i64, width: usize, height: usize },

    #[error("cannot score a {}x{} drawing against a {}x{} reference", .candidate.0, .candidate.1, .reference.0, .reference.1)]
    DimensionMismatch { candidate: (usize, usize), reference: (usize, usize) },

    /// The reference has no ink, so there is nothing to recall.
    #[error("reference contains no ink pixels")]
    BlankReference,

    #[error("comparison requested while a stroke is in progress")]
    StrokeInProgress,

    #[error("no reference signature loaded")]
    NoReference,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("image error at {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("window init error: {0}")]
    WindowInit(String),

    #[error("window update error: {0}")]
    WindowUpdate(String),
}
