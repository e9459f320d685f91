//! Subscriber setup: a human-readable console layer plus JSON file layers
//! with size-based rotation, all filtered per target prefix.
//!
//! The `default` section's `file` receives every target its levels allow.
//! A `file` on any other section gets that target's events at the
//! section's `file_level`, in addition to the default file.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

use crate::config::{LogSection, LoggingConfig};

const FALLBACK: &str = "default";
const MAX_SIZE_MB: u64 = 100;

type RotatingFile = Mutex<FileRotate<AppendTimestamp>>;
type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn level(raw: &str) -> LevelFilter {
    raw.trim()
        .parse::<LevelFilter>()
        .ok()
        .or_else(|| raw.trim().eq_ignore_ascii_case("none").then_some(LevelFilter::OFF))
        .unwrap_or(LevelFilter::INFO)
}

/// `default` becomes the fallback level, every other key a target prefix.
fn targets(cfg: &LoggingConfig, pick: fn(&LogSection) -> &str) -> Targets {
    let mut targets = Targets::new().with_default(
        cfg.get(FALLBACK)
            .map_or(LevelFilter::INFO, |s| level(pick(s))),
    );
    for (target, section) in cfg.iter().filter(|(name, _)| *name != FALLBACK) {
        targets = targets.with_target(target.as_str(), level(pick(section)));
    }
    targets
}

fn log_path(file: &str, home: &Path) -> PathBuf {
    let file = Path::new(file);
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        home.join(file)
    }
}

fn open_rotating(path: &Path, max_bytes: usize) -> std::io::Result<RotatingFile> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(Mutex::new(FileRotate::new(
        path,
        AppendTimestamp::default(FileLimit::Age(chrono::Duration::days(1))),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    )))
}

fn max_bytes(section: &LogSection) -> usize {
    let bytes = section
        .max_size_mb
        .unwrap_or(MAX_SIZE_MB)
        .saturating_mul(1024 * 1024);
    usize::try_from(bytes).unwrap_or(usize::MAX)
}

/// Rotating file for a section, if it names one that can be opened.
fn open_sink(section: &LogSection, home: &Path) -> Option<RotatingFile> {
    if section.file.trim().is_empty() {
        return None;
    }
    let path = log_path(&section.file, home);
    open_rotating(&path, max_bytes(section))
        .map_err(|e| eprintln!("Failed to open log file '{}': {e}", path.display()))
        .ok()
}

fn file_sink(cfg: &LoggingConfig, home: &Path) -> Option<RotatingFile> {
    cfg.get(FALLBACK).and_then(|s| open_sink(s, home))
}

/// Sinks of the non-default sections that name their own file.
fn target_sinks<'a>(
    cfg: &'a LoggingConfig,
    home: &Path,
) -> Vec<(&'a str, &'a LogSection, RotatingFile)> {
    cfg.iter()
        .filter(|(name, _)| *name != FALLBACK)
        .filter_map(|(name, section)| {
            open_sink(section, home).map(|sink| (name.as_str(), section, sink))
        })
        .collect()
}

fn target_file_layers(cfg: &LoggingConfig, home: &Path) -> Vec<BoxedLayer> {
    target_sinks(cfg, home)
        .into_iter()
        .map(|(target, section, sink)| -> BoxedLayer {
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_target(true)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_writer(sink)
                .with_filter(Targets::new().with_target(target, level(&section.file_level)))
                .boxed()
        })
        .collect()
}

/// Install the global subscriber. `home` anchors relative log file paths.
/// Calling it twice keeps the first subscriber.
pub fn init_logging(cfg: &LoggingConfig, home: &Path) {
    let _ = tracing_log::LogTracer::init();

    let console = fmt::layer()
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(targets(cfg, |s| s.console_level.as_str()));

    let file = file_sink(cfg, home).map(|sink| {
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(sink)
            .with_filter(targets(cfg, |s| s.file_level.as_str()))
    });

    let _ = tracing_subscriber::registry()
        .with(target_file_layers(cfg, home))
        .with(console)
        .with(file)
        .try_init();
}
