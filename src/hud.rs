// Presentation state for the on-screen gauges. No pixels here, only numbers
// that draw.rs turns into bars and text.

use crate::stroke::smooth_step;

/// Breath gauge opacity: hides itself once breath has been full for a while.
pub struct BreathMeter {
    pub alpha: f32,
    fade_timer: f32,
    fade_speed: f32, // alpha per second
    fade_delay: f32, // seconds full before fading starts
}

impl Default for BreathMeter {
    fn default() -> Self {
        Self { alpha: 1.0, fade_timer: 0.0, fade_speed: 2.0, fade_delay: 1.0 }
    }
}

impl BreathMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visual: gauge fades out 1 s after refilling, pops back in when breath is used.
    pub fn update(&mut self, dt: f32, current: f32, max: f32) {
        if current >= max {
            self.fade_timer += dt;
            if self.fade_timer >= self.fade_delay {
                self.alpha = move_towards(self.alpha, 0.0, self.fade_speed * dt);
            }
        } else {
            self.fade_timer = 0.0;
            self.alpha = move_towards(self.alpha, 1.0, self.fade_speed * dt);
        }
    }
}

fn move_towards(value: f32, target: f32, max_delta: f32) -> f32 {
    if (target - value).abs() <= max_delta {
        target
    } else {
        value + (target - value).signum() * max_delta
    }
}

/// Counts the displayed score up from zero instead of snapping to it.
pub struct ScoreRollup {
    target: f32,
    elapsed: f32,
    duration: f32,
}

impl ScoreRollup {
    pub fn new(duration: f32) -> Self {
        Self { target: 0.0, elapsed: duration, duration }
    }

    /// Restart the count toward `target`.
    pub fn start(&mut self, target: f32) {
        self.target = target;
        self.elapsed = 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current displayed value; exactly `target` once finished.
    pub fn value(&self) -> f32 {
        if self.is_done() {
            return self.target;
        }
        smooth_step(0.0, self.target, self.elapsed / self.duration)
    }

    pub fn text(&self) -> String {
        format!("SCORE: {:.0}%", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_fades_after_delay_when_full() {
        let mut m = BreathMeter::new();
        m.update(0.5, 5.0, 5.0);
        assert_eq!(m.alpha, 1.0);
        m.update(0.5, 5.0, 5.0);
        assert_eq!(m.alpha, 0.0);
        m.update(0.25, 5.0, 5.0);
        assert_eq!(m.alpha, 0.0);
    }

    #[test]
    fn meter_reappears_while_breath_is_used() {
        let mut m = BreathMeter { alpha: 0.0, ..BreathMeter::default() };
        m.update(0.25, 4.0, 5.0);
        assert_eq!(m.alpha, 0.5);
        m.update(0.5, 3.5, 5.0);
        assert_eq!(m.alpha, 1.0);
    }

    #[test]
    fn rollup_eases_and_lands_on_target() {
        let mut r = ScoreRollup::new(1.0);
        assert_eq!(r.value(), 0.0);
        r.start(80.0);
        assert_eq!(r.value(), 0.0);
        r.update(0.5);
        assert!((r.value() - 40.0).abs() < 1e-4);
        r.update(0.7);
        assert!(r.is_done());
        assert_eq!(r.value(), 80.0);
        assert_eq!(r.text(), "SCORE: 80%");
    }
}
