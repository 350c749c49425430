//! Stderr backend for the `log` facade.
//!
//! Lines look like `[  12.345s] [INFO] signature_pad::session: paper cleared`,
//! timed from `init`. Library code only uses `log::info!` and friends; the
//! binary decides whether anything is printed.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

struct StderrLogger {
    start: Instant,
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let secs = self.start.elapsed().as_secs_f64();
        // A closed stderr must never take the game down with it.
        let _ = writeln!(
            std::io::stderr().lock(),
            "[{:>9.3}s] [{}] {}: {}",
            secs,
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Clap value parser for `--log-level`: off, error, warn, info, debug or trace.
pub fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse::<LevelFilter>()
        .map_err(|_| format!("unknown log level '{s}' (expected off, error, warn, info, debug or trace)"))
}

/// Install the logger. Calling it again keeps the first level.
pub fn init(level: LevelFilter) {
    let logger = LOGGER.get_or_init(|| StderrLogger { start: Instant::now(), level });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
}
