// Breath holding steadies the hand.
// Visual: while not holding, every pointer sample wobbles by a smooth noise
// offset; hold breath and the pen follows the mouse exactly until the breath
// runs out, then the wobble returns and the gauge slowly refills.

use crate::config::BreathConfig;
use crate::noise::value_noise_2d;

/// Decorrelates the y-axis noise row from the x-axis one.
const Y_SEED_OFFSET: u32 = 0x9E37;

#[derive(Debug, Clone, PartialEq)]
pub struct BreathState {
    /// Remaining breath, always within [0, max].
    pub current: f32,
    pub max: f32,
    pub recharge_rate: f32,
    pub is_held: bool,
}

pub struct BreathGate {
    state: BreathState,
    drain_rate: f32,
    shake_amount: f32,
    shake_speed: f32,
    seed: u32,
    clock: f32,
}

impl BreathGate {
    /// Starts with full breath, not held.
    pub fn new(config: &BreathConfig) -> Self {
        Self {
            state: BreathState {
                current: config.max,
                max: config.max,
                recharge_rate: config.recharge_rate,
                is_held: false,
            },
            drain_rate: config.drain_rate,
            shake_amount: config.shake_amount,
            shake_speed: config.shake_speed,
            seed: config.seed,
            clock: 0.0,
        }
    }

    pub fn state(&self) -> &BreathState {
        &self.state
    }

    pub fn current(&self) -> f32 {
        self.state.current
    }

    pub fn max(&self) -> f32 {
        self.state.max
    }

    pub fn is_held(&self) -> bool {
        self.state.is_held
    }

    /// Jitter applies whenever breath is not being held.
    pub fn jitter_enabled(&self) -> bool {
        !self.state.is_held
    }

    /// Start holding. Has no effect with an empty gauge; returns whether the hold took.
    pub fn begin_hold(&mut self) -> bool {
        if self.state.current > 0.0 {
            self.state.is_held = true;
        }
        self.state.is_held
    }

    pub fn end_hold(&mut self) {
        self.state.is_held = false;
    }

    /// Advance by `dt` seconds: drain while held, recharge otherwise.
    pub fn tick(&mut self, dt: f32) {
        if !(dt > 0.0) {
            return;
        }
        self.clock += dt;

        let s = &mut self.state;
        if s.is_held {
            s.current = (s.current - self.drain_rate * dt).clamp(0.0, s.max);
            if s.current <= 0.0 {
                s.is_held = false;
                log::debug!("out of breath");
            }
        } else {
            s.current = (s.current + s.recharge_rate * dt).clamp(0.0, s.max);
        }
    }

    /// Current shake offset, each axis within ±shake_amount/2.
    pub fn offset(&self) -> (f32, f32) {
        if !self.jitter_enabled() {
            return (0.0, 0.0);
        }
        let t = self.clock * self.shake_speed;
        let a = self.shake_amount;
        let ox = value_noise_2d(t, 0.0, self.seed) * a - a * 0.5;
        let oy = value_noise_2d(0.0, t, self.seed.wrapping_add(Y_SEED_OFFSET)) * a - a * 0.5;
        (ox, oy)
    }

    /// Apply the shake to one pointer position.
    pub fn jitter(&self, x: f32, y: f32) -> (f32, f32) {
        let (ox, oy) = self.offset();
        (x + ox, y + oy)
    }
}
