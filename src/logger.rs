//! Debug logging for the engine and CLI.
//!
//! `log` records from this crate pass at debug level, everything else at warn
//! (debug with verbose logging on). `tracing` spans around merges and
//! distributions are written to the log file only, never to stderr.

use anyhow::{Result, anyhow};
use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, OnceLock};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Environment variable that turns on verbose logging for other crates.
pub const VERBOSE_ENV: &str = "GRADIENT_FORGE_VERBOSE";

const DEFAULT_FILTER: &str = "gradient_forge=debug,warn";

/// Where log lines go once logging is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// `-` means stderr, anything else is a file path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Self::Stderr
        } else {
            Self::File(PathBuf::from(arg))
        }
    }
}

#[derive(Default)]
struct Sink {
    enabled: bool,
    verbose: bool,
    stderr: bool,
    file: Option<File>,
}

impl Sink {
    fn write_file(&mut self, bytes: &[u8]) {
        if let Some(file) = self.file.as_mut() {
            let _ = file.write_all(bytes).and_then(|()| file.flush());
        }
    }
}

static SINK: LazyLock<Mutex<Sink>> = LazyLock::new(|| Mutex::new(Sink::default()));

struct ForgeLogger;

static LOGGER: ForgeLogger = ForgeLogger;

impl log::Log for ForgeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let sink = SINK.lock();
        if !sink.enabled {
            return false;
        }
        if sink.verbose || metadata.target().starts_with("gradient_forge") {
            metadata.level() <= Level::Debug
        } else {
            metadata.level() <= Level::Warn
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "{} {} [{}] - {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        );

        let mut sink = SINK.lock();
        sink.write_file(line.as_bytes());
        // stdout carries command output
        if sink.stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {}
}

/// `tracing` writer backed by the log file
#[derive(Clone, Copy)]
struct SpanWriter;

impl Write for SpanWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        SINK.lock().write_file(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> fmt::MakeWriter<'a> for SpanWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        *self
    }
}

/// Install the `log` logger and the `tracing` subscriber.
///
/// Idempotent. A subscriber installed by someone else is tolerated; only a
/// failure to install the `log` logger is an error.
pub fn init() -> Result<()> {
    static INIT: OnceLock<Result<(), String>> = OnceLock::new();

    let result = INIT.get_or_init(|| {
        let verbose_from_env = std::env::var(VERBOSE_ENV).is_ok()
            || std::env::var("RUST_LOG").is_ok_and(|v| v.contains("debug") || v.contains("trace"));
        if verbose_from_env {
            set_verbose_logging(true);
        }

        let spans = fmt::Layer::new()
            .with_target(true)
            .with_timer(fmt::time::ChronoUtc::rfc_3339())
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(false)
            .with_writer(SpanWriter);
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
        // an existing global subscriber keeps the spans
        let _ = Registry::default().with(filter).with(spans).try_init();

        log::set_logger(&LOGGER)
            .map(|()| log::set_max_level(LevelFilter::Debug))
            .map_err(|e| format!("Failed to install logger: {e}"))
    });

    result.clone().map_err(|e| anyhow!(e))
}

pub fn set_logging_enabled(enabled: bool) {
    SINK.lock().enabled = enabled;
}

pub fn is_logging_enabled() -> bool {
    SINK.lock().enabled
}

pub fn set_verbose_logging(enabled: bool) {
    SINK.lock().verbose = enabled;
}

/// Route log lines to `target`. A file is opened for appending; routing to
/// stderr keeps any open file.
pub fn set_log_target(target: &LogTarget) -> io::Result<()> {
    match target {
        LogTarget::Stderr => SINK.lock().stderr = true,
        LogTarget::File(path) => {
            let file = open_append(path)?;
            SINK.lock().file = Some(file);
        }
    }
    Ok(())
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! trace_debug {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}
