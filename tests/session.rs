// End-to-end: sign over a reference, score it, export it.

use signature_pad::{
    apply_stamp, compute_stamp, DrawingSession, Error, FrameBuffer, InputEvent, PixelBuffer,
    PointerEvent, Rgba, SessionConfig, SimilarityScorer,
};

fn steady_config() -> SessionConfig {
    let mut config = SessionConfig::default();
    config.breath.shake_amount = 0.0;
    config
}

/// Solid black horizontal bar, rows 18..=22, columns 20..=100.
fn bar_reference() -> PixelBuffer {
    let mut reference = PixelBuffer::new(128, 40, Rgba::WHITE).unwrap();
    for y in 18..=22 {
        for x in 20..=100 {
            reference.set(x, y, Rgba::BLACK).unwrap();
        }
    }
    reference
}

fn drag(session: &mut DrawingSession, fb: &mut FrameBuffer, from: (f32, f32), to: (f32, f32), frames: usize) {
    let dt = 1.0 / 60.0;
    let mut time = 0.0;
    session
        .tick(dt, &[PointerEvent::Down { x: from.0, y: from.1, time }.into()], fb)
        .unwrap();
    for i in 1..=frames {
        time += dt;
        let t = i as f32 / frames as f32;
        let x = from.0 + (to.0 - from.0) * t;
        let y = from.1 + (to.1 - from.1) * t;
        session.tick(dt, &[PointerEvent::Move { x, y, time }.into()], fb).unwrap();
    }
    session.tick(dt, &[PointerEvent::Up.into()], fb).unwrap();
}

#[test]
fn tracing_the_reference_scores_higher_than_missing_it() {
    let config = steady_config();
    let mut fb = FrameBuffer::new(128, 40);

    let mut traced = DrawingSession::with_reference(&config, bar_reference()).unwrap();
    for _ in 0..3 {
        drag(&mut traced, &mut fb, (20.0, 20.0), (100.0, 20.0), 40);
    }
    let good = traced.compare().unwrap();

    let mut missed = DrawingSession::with_reference(&config, bar_reference()).unwrap();
    drag(&mut missed, &mut fb, (20.0, 5.0), (100.0, 5.0), 40);
    let bad = missed.compare().unwrap();

    assert!(good > 0.5, "traced score {good}");
    assert!(bad < 0.1, "missed score {bad}");
    assert!(good > bad);
}

#[test]
fn scoring_a_copy_of_itself_is_perfect() {
    let reference = bar_reference();
    let score = SimilarityScorer::default().score(&reference.clone(), &reference).unwrap();
    assert_eq!(score, 1.0);
}

#[test]
fn blank_reference_cannot_be_scored() {
    let blank = PixelBuffer::new(128, 40, Rgba::WHITE).unwrap();
    let session = DrawingSession::with_reference(&steady_config(), blank).unwrap();
    assert!(matches!(session.compare(), Err(Error::BlankReference)));
}

#[test]
fn reference_sets_the_paper_size() {
    let session = DrawingSession::with_reference(&steady_config(), bar_reference()).unwrap();
    assert_eq!(session.buffer().dimensions(), (128, 40));
}

#[test]
fn tap_leaves_a_single_splotch() {
    let config = SessionConfig { width: 32, height: 32, ..steady_config() };
    let mut session = DrawingSession::new(&config).unwrap();
    let mut fb = FrameBuffer::new(32, 32);
    let frame: [InputEvent; 2] =
        [PointerEvent::Down { x: 16.0, y: 16.0, time: 0.0 }.into(), PointerEvent::Up.into()];
    session.tick(0.016, &frame, &mut fb).unwrap();

    let mut expected = PixelBuffer::new(32, 32, Rgba::WHITE).unwrap();
    apply_stamp(&mut expected, 16, 16, &compute_stamp(6), Rgba::BLACK);
    assert_eq!(session.buffer(), &expected);
}

#[test]
fn holding_breath_through_a_stroke_keeps_it_straight() {
    let mut config = SessionConfig { width: 200, height: 60, ..SessionConfig::default() };
    config.breath.shake_amount = 16.0;
    let mut session = DrawingSession::new(&config).unwrap();
    let mut fb = FrameBuffer::new(200, 60);

    session.tick(0.016, &[InputEvent::HoldBreath], &mut fb).unwrap();
    drag(&mut session, &mut fb, (20.0, 30.0), (180.0, 30.0), 30);
    assert!(session.breath().is_held());

    // brush radius 5, cap radius 6: nothing beyond 6 rows from the line
    for x in 0..200 {
        for y in [0, 10, 23, 37, 50, 59] {
            assert_eq!(session.buffer().get(x, y).unwrap(), Rgba::WHITE, "stray ink at ({x},{y})");
        }
    }
}

#[test]
fn export_writes_a_png_of_the_paper() {
    let config = SessionConfig { width: 24, height: 24, ..steady_config() };
    let mut session = DrawingSession::new(&config).unwrap();
    let mut fb = FrameBuffer::new(24, 24);
    session
        .tick(0.016, &[PointerEvent::Down { x: 12.0, y: 12.0, time: 0.0 }.into(), PointerEvent::Up.into()], &mut fb)
        .unwrap();

    let path = std::env::temp_dir().join(format!("signature-pad-export-{}.png", std::process::id()));
    session.export(&path).unwrap();
    let back = signature_pad::io::load_png(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(back.get(12, 12).unwrap(), Rgba::BLACK);
    assert_eq!(back.get(0, 0).unwrap(), Rgba::WHITE);
}
