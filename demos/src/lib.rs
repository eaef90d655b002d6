//! Shared pieces of the gridpath demo binaries.
//!
//! Demonstrates: loading saved layouts, seeded barrier scatter, running the
//! search through a [`Session`], rendering grids as text or in colour, and
//! cancelling a running search from the keyboard.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use gridpath_core::{Grid, Layout, LayoutDecoder, LayoutEncoder, LayoutError};
use log::{LevelFilter, Log, Metadata, Record};

mod render;
mod session;
pub mod term;

pub use render::{Rgb, colour_of, to_ascii};
pub use session::{Running, Session, scatter};

/// Default grid side for generated layouts.
pub const DEFAULT_SIDE: i32 = 50;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Settings of the live viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveConfig {
    /// Pause after each rendered event.
    pub delay: Duration,
    /// Rows of a generated layout.
    pub rows: i32,
    /// Columns of a generated layout.
    pub cols: i32,
    /// Probability that a generated cell is a barrier.
    pub density: f64,
    /// Seed of the layout generator.
    pub seed: u64,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(4),
            rows: DEFAULT_SIDE,
            cols: DEFAULT_SIDE,
            density: 0.3,
            seed: 42,
        }
    }
}

impl LiveConfig {
    /// Defaults overridden by `GRIDPATH_DELAY_MS`, `GRIDPATH_SEED`,
    /// `GRIDPATH_DENSITY`, `GRIDPATH_ROWS` and `GRIDPATH_COLS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(ms) = parse_var(&lookup, "GRIDPATH_DELAY_MS") {
            cfg.delay = Duration::from_millis(ms);
        }
        if let Some(seed) = parse_var(&lookup, "GRIDPATH_SEED") {
            cfg.seed = seed;
        }
        if let Some(d) = parse_var::<f64>(&lookup, "GRIDPATH_DENSITY") {
            cfg.density = d.clamp(0.0, 1.0);
        }
        if let Some(r) = parse_var::<i32>(&lookup, "GRIDPATH_ROWS") {
            cfg.rows = r.max(2);
        }
        if let Some(c) = parse_var::<i32>(&lookup, "GRIDPATH_COLS") {
            cfg.cols = c.max(2);
        }
        cfg
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Layout files
// ---------------------------------------------------------------------------

/// Load a layout file, text or binary, into a fresh grid.
pub fn load_layout(path: &Path, binary: bool) -> Result<Grid, LayoutError> {
    let loaded = if binary {
        fs::File::open(path)
            .map_err(LayoutError::from)
            .and_then(|f| LayoutDecoder::new(io::BufReader::new(f)).decode_grid())
    } else {
        fs::read_to_string(path)
            .map_err(LayoutError::from)
            .and_then(|s| Layout::parse_text(&s)?.into_grid())
    };
    if let Err(e) = &loaded {
        log::warn!("layout {} rejected: {e}", path.display());
    }
    loaded
}

/// Save the roles of `grid`, in the binary encoding if `binary` is set.
pub fn save_layout(path: &Path, grid: &Grid, binary: bool) -> Result<(), LayoutError> {
    let mut out = io::BufWriter::new(fs::File::create(path)?);
    if binary {
        let mut enc = LayoutEncoder::new(&mut out);
        enc.encode_grid(grid)?;
    } else {
        out.write_all(Layout::from_grid(grid).to_text().as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

/// Whether `path` names a binary layout, judging by its extension.
pub fn is_binary_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gpth"))
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(
                io::stderr().lock(),
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Parse a `GRIDPATH_LOG` value. Unset or unparsable means `warn`.
pub fn log_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|s| s.trim().parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

/// Install the stderr logger, with its level taken from `GRIDPATH_LOG`.
pub fn init_logger() {
    let level = log_level(std::env::var("GRIDPATH_LOG").ok().as_deref());
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
