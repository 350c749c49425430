// What you SEE now:
// • A sheet of paper sized to the reference signature (or 640x480).
// • Hold Left Mouse to sign. Your hand shakes a little...
// • Hold Right Mouse to hold your breath: the shake stops until the gauge empties.
// • S scores the drawing against the reference, C clears, E exports a PNG. ESC quits.
//
// `signature-pad score a.png b.png` does the comparison without a window.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use signature_pad::draw::{draw_crosshair, draw_gauge, draw_text_5x7, Drawer};
use signature_pad::hud::{BreathMeter, ScoreRollup};
use signature_pad::{
    io, logger, DrawingSession, Error, FrameBuffer, InputEvent, PointerEvent, SessionConfig,
    SimilarityScorer,
};

#[derive(Parser, Debug)]
#[command(name = "signature-pad", about = "Sign on virtual paper and see how close you got")]
struct Cli {
    /// error, warn, info, debug or trace.
    #[arg(long, global = true, default_value = "info", value_parser = logger::parse_level)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the drawing window (default).
    Draw(DrawArgs),
    /// Score CANDIDATE against REFERENCE and print the raw ratio.
    Score {
        candidate: PathBuf,
        reference: PathBuf,
        /// Ink threshold on a 0..1 channel scale.
        #[arg(long, default_value_t = signature_pad::score::DEFAULT_INK_THRESHOLD)]
        threshold: f32,
    },
}

#[derive(clap::Args, Debug)]
struct DrawArgs {
    /// Reference signature PNG; the paper takes its size.
    #[arg(short, long, value_name = "PNG")]
    reference: Option<PathBuf>,

    /// JSON session config (brush, breath, score settings).
    #[arg(short, long, value_name = "JSON")]
    config: Option<PathBuf>,

    /// Where E saves the drawing.
    #[arg(short, long, value_name = "PNG", default_value = "signature.png")]
    export: PathBuf,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,
}

impl Default for DrawArgs {
    fn default() -> Self {
        Self {
            reference: None,
            config: None,
            export: PathBuf::from("signature.png"),
            width: None,
            height: None,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.log_level);

    let result = match cli.command.unwrap_or(Command::Draw(DrawArgs::default())) {
        Command::Draw(args) => run_window(args),
        Command::Score { candidate, reference, threshold } => {
            score_files(&candidate, &reference, threshold)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn score_files(candidate: &Path, reference: &Path, threshold: f32) -> Result<(), Error> {
    let scorer = SimilarityScorer { ink_threshold: threshold };
    let score = scorer.score(&io::load_png(candidate)?, &io::load_png(reference)?)?;
    println!("{score:.6}");
    Ok(())
}

fn run_window(args: DrawArgs) -> Result<(), Error> {
    /* --- Config + paper ---
       Visual: nothing yet, just the sheet size and pen settings. */
    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(w) = args.width { config.width = w; }
    if let Some(h) = args.height { config.height = h; }

    let mut session = match &args.reference {
        Some(path) => DrawingSession::from_reference_file(&config, path)?,
        None => DrawingSession::new(&config)?,
    };
    let (w, h) = session.buffer().dimensions();
    let mut drawer = Drawer::new("Signature Pad", w, h)?;

    /* --- Reusable buffers ---
       `canvas` receives the paper once per frame; `screen` is canvas + HUD. */
    let mut canvas = FrameBuffer::new(w, h);
    let mut screen = FrameBuffer::new(w, h);

    let mut meter = BreathMeter::new();
    let mut rollup = ScoreRollup::new(1.0);
    let mut status: Option<String> = None;

    let start = Instant::now();
    let mut last_frame_time = start;
    let mut left_was_down = false;
    let mut right_was_down = false;
    let mut events: Vec<InputEvent> = Vec::with_capacity(8);

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32();
        last_frame_time = now;
        let time = (now - start).as_secs_f32();

        /* 1) Turn button edges into events for this frame. */
        events.clear();
        let right_down = drawer.right_mouse_down();
        if right_down && !right_was_down { events.push(InputEvent::HoldBreath); }
        if !right_down && right_was_down { events.push(InputEvent::ReleaseBreath); }
        right_was_down = right_down;

        let left_down = drawer.left_mouse_down();
        match drawer.mouse_pos() {
            Some((x, y)) if left_down => {
                let event = if left_was_down {
                    PointerEvent::Move { x, y, time }
                } else {
                    PointerEvent::Down { x, y, time }
                };
                events.push(event.into());
                left_was_down = true;
            }
            _ if !left_down && left_was_down => {
                events.push(PointerEvent::Up.into());
                left_was_down = false;
            }
            _ => {}
        }

        /* 2) Keys */
        if drawer.c_pressed_once() {
            session.clear();
            status = Some("CLEARED".into());
        }
        if drawer.s_pressed_once() {
            match session.compare() {
                Ok(raw) => {
                    rollup.start(raw * config.score.display_scale);
                    status = None;
                }
                Err(e) => {
                    log::warn!("cannot score: {e}");
                    status = Some(match e {
                        Error::NoReference => "NO REFERENCE".into(),
                        Error::BlankReference => "BLANK REFERENCE".into(),
                        Error::StrokeInProgress => "LIFT THE PEN FIRST".into(),
                        _ => "SCORE FAILED".into(),
                    });
                }
            }
        }
        if drawer.e_pressed_once() {
            status = Some(match session.export(&args.export) {
                Ok(()) => "SAVED".into(),
                Err(e) => {
                    log::warn!("export failed: {e}");
                    "SAVE FAILED".into()
                }
            });
        }

        /* 3) Breath, pen, and at most one flush of the paper into `canvas`. */
        session.tick(dt, &events, &mut canvas)?;

        /* 4) HUD on a copy so the paper itself stays clean. */
        screen.pixels.copy_from_slice(&canvas.pixels);

        let breath = session.breath();
        meter.update(dt, breath.current(), breath.max());
        let gauge_color = if breath.is_held() { 0x00_40_C0_FF } else { 0x00_60_A0_60 };
        draw_gauge(
            &mut screen,
            10, h as i32 - 16,
            120, 6,
            breath.current() / breath.max(),
            "BREATH",
            gauge_color,
            meter.alpha,
        );

        rollup.update(dt);
        draw_text_5x7(&mut screen, 8, 8, &rollup.text(), 0x00_30_30_30);
        if let Some(msg) = &status {
            draw_text_5x7(&mut screen, 8, 20, msg, 0x00_C0_30_30);
        }

        if let Some((mx, my)) = drawer.mouse_pos() {
            draw_crosshair(&mut screen, mx as i32, my as i32, 8, 0x00_90_90_90);
        }

        /* 5) Present to the window. */
        drawer.present(&screen)?;
    }

    Ok(())
}
