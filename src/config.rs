// Tunables for a drawing session, loadable from a JSON file.
// Every field has a default, so `{}` is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Color8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Paper width in pixels. Replaced by the reference size when one is loaded.
    pub width: usize,
    pub height: usize,
    /// Blank paper color, also used by "clear".
    pub paper: Color8,
    pub brush: BrushConfig,
    pub breath: BreathConfig,
    pub score: ScoreConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            paper: Color8([255, 255, 255, 255]),
            brush: BrushConfig::default(),
            breath: BreathConfig::default(),
            score: ScoreConfig::default(),
        }
    }
}

/// Pen shape and how it reacts to speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Base stamp radius in pixels.
    pub size: u32,
    pub color: Color8,
    /// Tap / stroke-end dots are `size * splotch_factor`.
    pub splotch_factor: f32,
    /// Width multiplier reached at `max_speed`.
    pub min_speed_scale: f32,
    /// Pixels per second at which the pen is thinnest.
    pub max_speed: f32,
    /// Velocity blend per sample, in (0,1]. Lower = smoother, laggier.
    pub smoothing_factor: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            size: 5,
            color: Color8([0, 0, 0, 255]),
            splotch_factor: 1.2,
            min_speed_scale: 0.8,
            max_speed: 1000.0,
            smoothing_factor: 0.3,
        }
    }
}

/// Breath holding: how long it lasts and how hard the hand shakes without it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathConfig {
    /// Seconds of breath when full.
    pub max: f32,
    /// Breath spent per second while holding.
    pub drain_rate: f32,
    /// Breath regained per second while not holding.
    pub recharge_rate: f32,
    /// Peak-to-peak shake in pixels.
    pub shake_amount: f32,
    /// How fast the shake wanders (noise samples per second).
    pub shake_speed: f32,
    pub seed: u32,
}

impl Default for BreathConfig {
    fn default() -> Self {
        Self {
            max: 5.0,
            drain_rate: 1.0,
            recharge_rate: 0.5,
            shake_amount: 16.0,
            shake_speed: 10.0,
            seed: 0x5EED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// A pixel is ink when R, G and B are all below this (0..1 scale).
    pub ink_threshold: f32,
    /// Multiplier the HUD applies to the raw ratio before showing it.
    pub display_scale: f32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self { ink_threshold: 0.1, display_scale: 1500.0 }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        let config = Self::from_json(&text)
            .map_err(|source| Error::Config { path: path.to_path_buf(), source })?;
        config.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(Error::InvalidConfig(msg.to_string()));

        if self.width == 0 || self.height == 0 {
            return invalid("width and height must be positive");
        }
        let b = &self.brush;
        if b.size == 0 {
            return invalid("brush.size must be at least 1");
        }
        if !(b.smoothing_factor > 0.0 && b.smoothing_factor <= 1.0) {
            return invalid("brush.smoothing_factor must be in (0, 1]");
        }
        if !(b.max_speed > 0.0) {
            return invalid("brush.max_speed must be positive");
        }
        if !(b.splotch_factor >= 0.0) || !(b.min_speed_scale >= 0.0) {
            return invalid("brush.splotch_factor and brush.min_speed_scale must not be negative");
        }
        // Biggest stamp (a splotch) must fit on the paper.
        let shortest = self.width.min(self.height) as f32;
        let largest = b.size as f32 * b.splotch_factor.max(1.0);
        if largest > shortest {
            return Err(Error::InvalidConfig(format!(
                "brush of radius {largest} does not fit on {}x{} paper",
                self.width, self.height
            )));
        }
        let br = &self.breath;
        if !(br.max > 0.0) || !(br.drain_rate > 0.0) || !(br.recharge_rate > 0.0) {
            return invalid("breath.max, breath.drain_rate and breath.recharge_rate must be positive");
        }
        if !(br.shake_amount >= 0.0) || !(br.shake_speed >= 0.0) {
            return invalid("breath.shake_amount and breath.shake_speed must not be negative");
        }
        let t = self.score.ink_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return invalid("score.ink_threshold must be in (0, 1]");
        }
        Ok(())
    }
}
