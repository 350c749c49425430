// How much of the reference signature did the player cover?
// Only reference ink counts: extra ink drawn elsewhere is not penalized.

use crate::config::ScoreConfig;
use crate::error::{Error, Result};
use crate::pixel_buffer::PixelBuffer;
use crate::types::Rgba;

pub const DEFAULT_INK_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityScorer {
    pub ink_threshold: f32,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self { ink_threshold: DEFAULT_INK_THRESHOLD }
    }
}

impl From<&ScoreConfig> for SimilarityScorer {
    fn from(config: &ScoreConfig) -> Self {
        Self { ink_threshold: config.ink_threshold }
    }
}

/// Ink tallies behind a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkCounts {
    pub reference_ink: usize,
    pub matched_ink: usize,
}

impl SimilarityScorer {
    /// Near-black: R, G and B all below the threshold. Alpha is ignored.
    #[inline]
    pub fn is_ink(&self, c: Rgba) -> bool {
        c.r < self.ink_threshold && c.g < self.ink_threshold && c.b < self.ink_threshold
    }

    pub fn count(&self, candidate: &PixelBuffer, reference: &PixelBuffer) -> Result<InkCounts> {
        if candidate.dimensions() != reference.dimensions() {
            return Err(Error::DimensionMismatch {
                candidate: candidate.dimensions(),
                reference: reference.dimensions(),
            });
        }
        let mut counts = InkCounts { reference_ink: 0, matched_ink: 0 };
        for (&c, &r) in candidate.pixels().iter().zip(reference.pixels()) {
            if self.is_ink(r) {
                counts.reference_ink += 1;
                if self.is_ink(c) {
                    counts.matched_ink += 1;
                }
            }
        }
        Ok(counts)
    }

    /// matched ink / reference ink. Nominally in [0,1]; scaling for display is the caller's job.
    pub fn score(&self, candidate: &PixelBuffer, reference: &PixelBuffer) -> Result<f32> {
        let counts = self.count(candidate, reference)?;
        if counts.reference_ink == 0 {
            return Err(Error::BlankReference);
        }
        Ok(counts.matched_ink as f32 / counts.reference_ink as f32)
    }
}
