// Signature pad: freehand brush rasterizer plus a reference-recall scorer.

pub mod breath;
pub mod config;
pub mod draw;
pub mod error;
pub mod hud;
pub mod io;
pub mod logger;
pub mod noise;
pub mod pixel_buffer;
pub mod score;
pub mod session;
pub mod stamp;
pub mod stroke;
pub mod types;

pub use breath::{BreathGate, BreathState};
pub use config::{BreathConfig, BrushConfig, ScoreConfig, SessionConfig};
pub use error::{Error, Result};
pub use pixel_buffer::{PixelBuffer, Surface};
pub use score::SimilarityScorer;
pub use session::{DrawingSession, InputEvent};
pub use stamp::{apply_stamp, compute_stamp, Stamp, StampCache};
pub use stroke::{PointerEvent, StrokeRasterizer, StrokeState};
pub use types::{FrameBuffer, Rgba};
