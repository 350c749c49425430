// Turns pointer samples into brush stamps.
// Visual: press = a round dot, drag = a line of overlapping dots that thins
// when you move fast and near the ends of every segment, release = a dot that
// caps the stroke.

use crate::config::BrushConfig;
use crate::pixel_buffer::PixelBuffer;
use crate::stamp::{apply_stamp, StampCache};
use crate::types::Rgba;

/// Segments shorter than this (pixels) are ignored.
const MIN_SEGMENT: f32 = 0.1;
/// Fraction of a segment at each end over which the width tapers.
const TAPER_SPAN: f32 = 0.2;
/// Width multiplier at the very ends of a segment.
const TAPER_MIN: f32 = 0.8;

/// Pointer input in paper pixel space. `time` is seconds on any monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32, time: f32 },
    Move { x: f32, y: f32, time: f32 },
    Up,
}

/// One accepted pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSample {
    pub x: f32,
    pub y: f32,
    pub time: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StrokeState {
    /// Last sample of the current stroke; `None` means the next move starts fresh.
    pub previous: Option<StrokeSample>,
    /// Smoothed pen velocity in pixels per second.
    pub velocity: (f32, f32),
    /// Pointer button is down.
    pub active: bool,
    /// A segment has been drawn since the last anchor.
    pub moved: bool,
}

/// Hermite ease from `from` to `to`, `t` clamped to [0,1].
#[inline]
pub fn smooth_step(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let t = t * t * (3.0 - 2.0 * t);
    from + (to - from) * t
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Width multiplier at parametric position `t` along a segment.
pub fn taper_factor(t: f32) -> f32 {
    if t < TAPER_SPAN {
        smooth_step(TAPER_MIN, 1.0, t / TAPER_SPAN)
    } else if t > 1.0 - TAPER_SPAN {
        smooth_step(TAPER_MIN, 1.0, (1.0 - t) / TAPER_SPAN)
    } else {
        1.0
    }
}

pub struct StrokeRasterizer {
    brush: BrushConfig,
    color: Rgba,
    state: StrokeState,
    stamps: StampCache,
}

impl StrokeRasterizer {
    pub fn new(brush: BrushConfig) -> Self {
        let color = brush.color.into();
        Self { brush, color, state: StrokeState::default(), stamps: StampCache::new() }
    }

    pub fn state(&self) -> &StrokeState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state.active
    }

    /// Radius of tap dots and stroke caps.
    pub fn splotch_radius(&self) -> u32 {
        (self.brush.size as f32 * self.brush.splotch_factor).round() as u32
    }

    /// Width multiplier for a pen moving at `speed` px/s.
    pub fn speed_scale(&self, speed: f32) -> f32 {
        let k = (speed / self.brush.max_speed).clamp(0.0, 1.0);
        lerp(1.0, self.brush.min_speed_scale, k)
    }

    /// Stamp radius at segment position `t` for the current smoothed speed.
    pub fn radius_at(&self, t: f32, speed: f32) -> u32 {
        let r = (self.brush.size as f32 * self.speed_scale(speed) * taper_factor(t)).round();
        r.max(1.0) as u32
    }

    /// Forget the stroke anchor but stay in whatever button state we are in.
    /// A move that follows starts a fresh anchor instead of joining a stale point.
    pub fn drop_anchor(&mut self) {
        self.state.previous = None;
        self.state.velocity = (0.0, 0.0);
        self.state.moved = false;
    }

    /// Feed one event. Returns true when anything was stamped.
    pub fn handle(&mut self, event: PointerEvent, buffer: &mut PixelBuffer) -> bool {
        match event {
            PointerEvent::Down { x, y, time } => {
                self.state = StrokeState { active: true, ..StrokeState::default() };
                let sample = clamp_sample(buffer, x, y, time);
                log::debug!("stroke begins at ({:.1}, {:.1})", sample.x, sample.y);
                self.anchor(sample, buffer);
                true
            }
            PointerEvent::Move { x, y, time } => {
                if !self.state.active {
                    return false;
                }
                let sample = clamp_sample(buffer, x, y, time);
                match self.state.previous {
                    None => {
                        self.anchor(sample, buffer);
                        true
                    }
                    Some(prev) => self.extend(prev, sample, buffer),
                }
            }
            PointerEvent::Up => {
                if !self.state.active {
                    return false;
                }
                let mut stamped = false;
                if let (Some(prev), true) = (self.state.previous, self.state.moved) {
                    self.splotch(prev, buffer);
                    stamped = true;
                }
                log::debug!("stroke ends");
                self.state = StrokeState::default();
                stamped
            }
        }
    }

    fn anchor(&mut self, sample: StrokeSample, buffer: &mut PixelBuffer) {
        self.splotch(sample, buffer);
        self.state.previous = Some(sample);
        self.state.moved = false;
    }

    fn splotch(&mut self, at: StrokeSample, buffer: &mut PixelBuffer) {
        let radius = self.splotch_radius();
        let stamp = self.stamps.get(radius);
        apply_stamp(buffer, at.x as i32, at.y as i32, stamp, self.color);
    }

    fn extend(&mut self, prev: StrokeSample, cur: StrokeSample, buffer: &mut PixelBuffer) -> bool {
        let elapsed = cur.time - prev.time;
        if elapsed > 0.0 {
            let raw = ((cur.x - prev.x) / elapsed, (cur.y - prev.y) / elapsed);
            let k = self.brush.smoothing_factor;
            let (vx, vy) = self.state.velocity;
            self.state.velocity = (lerp(vx, raw.0, k), lerp(vy, raw.1, k));
        }
        self.state.previous = Some(cur);

        let (dx, dy) = (cur.x - prev.x, cur.y - prev.y);
        let distance = (dx * dx + dy * dy).sqrt();
        if distance < MIN_SEGMENT {
            return false;
        }

        let (vx, vy) = self.state.velocity;
        let speed = (vx * vx + vy * vy).sqrt();
        let steps = (distance.ceil() as usize).max(2);
        for i in 0..steps {
            let t = i as f32 / (steps - 1) as f32;
            let x = prev.x + dx * t;
            let y = prev.y + dy * t;
            let radius = self.radius_at(t, speed);
            let stamp = self.stamps.get(radius);
            apply_stamp(buffer, x as i32, y as i32, stamp, self.color);
        }
        self.state.moved = true;
        true
    }
}

/// Pull a pointer position onto the paper. NaN collapses to the origin.
fn clamp_sample(buffer: &PixelBuffer, x: f32, y: f32, time: f32) -> StrokeSample {
    let max_x = (buffer.width() - 1) as f32;
    let max_y = (buffer.height() - 1) as f32;
    let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, max_x) };
    let y = if y.is_nan() { 0.0 } else { y.clamp(0.0, max_y) };
    StrokeSample { x, y, time }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(w: usize, h: usize) -> PixelBuffer {
        PixelBuffer::new(w, h, Rgba::WHITE).unwrap()
    }

    fn inked_rows_in_column(buf: &PixelBuffer, x: i64) -> usize {
        (0..buf.height() as i64).filter(|&y| buf.get(x, y).unwrap() != Rgba::WHITE).count()
    }

    fn touched(buf: &PixelBuffer) -> usize {
        buf.pixels().iter().filter(|&&p| p != Rgba::WHITE).count()
    }

    #[test]
    fn taper_is_thin_at_ends_and_full_in_middle() {
        assert!((taper_factor(0.0) - 0.8).abs() < 1e-6);
        assert!((taper_factor(1.0) - 0.8).abs() < 1e-6);
        assert_eq!(taper_factor(0.5), 1.0);
        assert!((taper_factor(0.2) - 1.0).abs() < 1e-6);
        assert!(taper_factor(0.1) > 0.8 && taper_factor(0.1) < 1.0);
        assert!((taper_factor(0.1) - taper_factor(0.9)).abs() < 1e-5);
    }

    #[test]
    fn faster_pens_draw_thinner() {
        let r = StrokeRasterizer::new(BrushConfig::default());
        assert_eq!(r.speed_scale(0.0), 1.0);
        assert!((r.speed_scale(1000.0) - 0.8).abs() < 1e-6);
        assert!((r.speed_scale(50_000.0) - 0.8).abs() < 1e-6);
        assert_eq!(r.radius_at(0.5, 0.0), 5);
        assert_eq!(r.radius_at(0.0, 1000.0), 3);
    }

    #[test]
    fn tap_makes_exactly_one_splotch() {
        let mut buf = paper(40, 40);
        let mut r = StrokeRasterizer::new(BrushConfig::default());
        assert_eq!(r.splotch_radius(), 6);

        r.handle(PointerEvent::Down { x: 20.0, y: 20.0, time: 0.0 }, &mut buf);
        r.handle(PointerEvent::Up, &mut buf);

        let mut expected = paper(40, 40);
        apply_stamp(&mut expected, 20, 20, &crate::stamp::compute_stamp(6), Rgba::BLACK);
        assert_eq!(buf, expected);
        assert!(!r.is_drawing());
        assert_eq!(r.state().previous, None);
    }

    #[test]
    fn straight_drag_tapers_at_both_ends() {
        let mut buf = paper(140, 60);
        let mut r = StrokeRasterizer::new(BrushConfig::default());
        r.handle(PointerEvent::Down { x: 20.0, y: 30.0, time: 0.0 }, &mut buf);
        r.handle(PointerEvent::Move { x: 120.0, y: 30.0, time: 1.0 }, &mut buf);
        r.handle(PointerEvent::Up, &mut buf);

        let middle = inked_rows_in_column(&buf, 70);
        assert_eq!(middle, 11);
        for x in 25..=29 {
            assert!(inked_rows_in_column(&buf, x) < middle, "start column {x}");
        }
        for x in 110..=115 {
            assert!(inked_rows_in_column(&buf, x) < middle, "end column {x}");
        }
    }

    #[test]
    fn tiny_moves_are_skipped() {
        let mut buf = paper(30, 30);
        let mut r = StrokeRasterizer::new(BrushConfig::default());
        r.handle(PointerEvent::Down { x: 10.0, y: 10.0, time: 0.0 }, &mut buf);
        let before = buf.clone();
        assert!(!r.handle(PointerEvent::Move { x: 10.05, y: 10.0, time: 0.1 }, &mut buf));
        assert_eq!(buf, before);
    }

    #[test]
    fn zero_interval_keeps_last_velocity() {
        let mut buf = paper(200, 30);
        let mut r = StrokeRasterizer::new(BrushConfig::default());
        r.handle(PointerEvent::Down { x: 10.0, y: 10.0, time: 0.0 }, &mut buf);
        r.handle(PointerEvent::Move { x: 20.0, y: 10.0, time: 0.1 }, &mut buf);
        let v = r.state().velocity;
        assert!((v.0 - 30.0).abs() < 1e-3, "smoothed velocity {v:?}");

        assert!(r.handle(PointerEvent::Move { x: 40.0, y: 10.0, time: 0.1 }, &mut buf));
        assert_eq!(r.state().velocity, v);
        assert!(v.0.is_finite());
    }

    #[test]
    fn positions_off_paper_are_clamped() {
        let mut buf = paper(20, 20);
        let mut r = StrokeRasterizer::new(BrushConfig::default());
        r.handle(PointerEvent::Down { x: -50.0, y: 5.0, time: 0.0 }, &mut buf);
        r.handle(PointerEvent::Move { x: 500.0, y: f32::NAN, time: 0.016 }, &mut buf);
        r.handle(PointerEvent::Move { x: 1e9, y: -1e9, time: 0.032 }, &mut buf);
        r.handle(PointerEvent::Up, &mut buf);
        assert!(touched(&buf) > 0);
        assert_eq!(buf.get(0, 5).unwrap(), Rgba::BLACK);
    }

    #[test]
    fn moves_without_button_do_nothing() {
        let mut buf = paper(20, 20);
        let mut r = StrokeRasterizer::new(BrushConfig::default());
        assert!(!r.handle(PointerEvent::Move { x: 5.0, y: 5.0, time: 0.0 }, &mut buf));
        assert!(!r.handle(PointerEvent::Up, &mut buf));
        assert_eq!(touched(&buf), 0);
    }

    #[test]
    fn dropped_anchor_starts_fresh_with_a_splotch() {
        let mut buf = paper(100, 40);
        let mut r = StrokeRasterizer::new(BrushConfig::default());
        r.handle(PointerEvent::Down { x: 10.0, y: 20.0, time: 0.0 }, &mut buf);
        r.drop_anchor();
        buf.fill(Rgba::WHITE);

        r.handle(PointerEvent::Move { x: 80.0, y: 20.0, time: 0.5 }, &mut buf);
        // no line back to x=10: only a dot around x=80
        assert_eq!(inked_rows_in_column(&buf, 40), 0);
        assert_eq!(buf.get(80, 20).unwrap(), Rgba::BLACK);
        assert_eq!(r.state().previous.map(|s| s.x), Some(80.0));
    }

    #[test]
    fn release_caps_a_moved_stroke() {
        let mut buf = paper(60, 30);
        let mut r = StrokeRasterizer::new(BrushConfig::default());
        r.handle(PointerEvent::Down { x: 10.0, y: 15.0, time: 0.0 }, &mut buf);
        r.handle(PointerEvent::Move { x: 40.0, y: 15.0, time: 0.1 }, &mut buf);
        let before_up = inked_rows_in_column(&buf, 40);
        assert!(r.handle(PointerEvent::Up, &mut buf));
        // cap radius 6 is wider than the tapered end of the line
        assert_eq!(inked_rows_in_column(&buf, 40), 13);
        assert!(before_up < 13);
        assert_eq!(*r.state(), StrokeState::default());
    }
}
