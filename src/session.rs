// One signing attempt: the paper, the pen, the breath gauge and the reference.
// The host calls `tick` once per frame; everything in a frame happens inside it.

use std::path::Path;

use crate::breath::BreathGate;
use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::io;
use crate::pixel_buffer::{PixelBuffer, Surface};
use crate::score::SimilarityScorer;
use crate::stroke::{PointerEvent, StrokeRasterizer};
use crate::types::Rgba;

/// Input the host collected since the previous frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    HoldBreath,
    ReleaseBreath,
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(event)
    }
}

pub struct DrawingSession {
    buffer: PixelBuffer,
    reference: Option<PixelBuffer>,
    paper: Rgba,
    rasterizer: StrokeRasterizer,
    breath: BreathGate,
    scorer: SimilarityScorer,
    dirty: bool,
}

impl DrawingSession {
    /// Blank paper of the configured size, no reference.
    pub fn new(config: &SessionConfig) -> Result<Self> {
        config.validate()?;
        let paper: Rgba = config.paper.into();
        let buffer = PixelBuffer::new(config.width, config.height, paper)?;
        log::info!("new session on {}x{} paper", config.width, config.height);
        Ok(Self {
            buffer,
            reference: None,
            paper,
            rasterizer: StrokeRasterizer::new(config.brush.clone()),
            breath: BreathGate::new(&config.breath),
            scorer: SimilarityScorer::from(&config.score),
            dirty: true,
        })
    }

    /// Paper sized to match `reference`; the configured width/height are ignored.
    pub fn with_reference(config: &SessionConfig, reference: PixelBuffer) -> Result<Self> {
        let sized = SessionConfig {
            width: reference.width(),
            height: reference.height(),
            ..config.clone()
        };
        let mut session = Self::new(&sized)?;
        session.reference = Some(reference);
        Ok(session)
    }

    /// Load the reference from an image file and size the paper to it.
    pub fn from_reference_file(config: &SessionConfig, path: &Path) -> Result<Self> {
        Self::with_reference(config, io::load_png(path)?)
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn breath(&self) -> &BreathGate {
        &self.breath
    }

    pub fn rasterizer(&self) -> &StrokeRasterizer {
        &self.rasterizer
    }

    pub fn is_drawing(&self) -> bool {
        self.rasterizer.is_drawing()
    }

    /// One frame: breath first, then pointer samples (shaken unless breath is held),
    /// then a single flush if anything was stamped. Returns whether a flush happened.
    pub fn tick(&mut self, dt: f32, events: &[InputEvent], surface: &mut dyn Surface) -> Result<bool> {
        for event in events {
            match event {
                InputEvent::HoldBreath => {
                    self.breath.begin_hold();
                }
                InputEvent::ReleaseBreath => self.breath.end_hold(),
                InputEvent::Pointer(_) => {}
            }
        }
        self.breath.tick(dt);

        for event in events {
            if let InputEvent::Pointer(p) = *event {
                let p = self.shake(p);
                if self.rasterizer.handle(p, &mut self.buffer) {
                    self.dirty = true;
                }
            }
        }

        if !self.dirty {
            return Ok(false);
        }
        self.buffer.flush(surface)?;
        self.dirty = false;
        Ok(true)
    }

    fn shake(&self, event: PointerEvent) -> PointerEvent {
        match event {
            PointerEvent::Down { x, y, time } => {
                let (x, y) = self.breath.jitter(x, y);
                PointerEvent::Down { x, y, time }
            }
            PointerEvent::Move { x, y, time } => {
                let (x, y) = self.breath.jitter(x, y);
                PointerEvent::Move { x, y, time }
            }
            PointerEvent::Up => PointerEvent::Up,
        }
    }

    /// Blank the paper. A stroke still held continues from a fresh anchor.
    pub fn clear(&mut self) {
        self.buffer.fill(self.paper);
        self.rasterizer.drop_anchor();
        self.dirty = true;
        log::info!("paper cleared");
    }

    /// Raw recall of the reference ink. Only valid between strokes.
    pub fn compare(&self) -> Result<f32> {
        if self.is_drawing() {
            return Err(Error::StrokeInProgress);
        }
        let reference = self.reference.as_ref().ok_or(Error::NoReference)?;
        let score = self.scorer.score(&self.buffer, reference)?;
        log::info!("similarity {:.4}", score);
        Ok(score)
    }

    pub fn export(&self, path: &Path) -> Result<()> {
        io::save_png(&self.buffer, path)
    }
}
