use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.travelog/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.travelog/`
/// - `~/.travelog/logs/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let travelog_dir = home.join(".travelog");
    std::fs::create_dir_all(&travelog_dir)?;
    std::fs::create_dir_all(travelog_dir.join("logs"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
///
/// The `log_file` parameter is accepted for forward-compatibility but file
/// logging is not yet wired – all output currently goes to stderr.
pub fn setup_logging(log_level: &str, _log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Feed discovery ─────────────────────────────────────────────────────────────

/// Attempt to locate the trip feed file on the local system.
///
/// Checks the following paths in order and returns the first that exists:
/// 1. `./cities.json`
/// 2. `~/.travelog/cities.json`
///
/// Returns `None` when neither path exists.
pub fn discover_data_path() -> Option<PathBuf> {
    let mut candidates = vec![PathBuf::from("cities.json")];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".travelog").join("cities.json"));
    }
    candidates.into_iter().find(|p| p.exists())
}

/// Attempt to locate the optional zones overlay file.
///
/// Checks `./zones.geojson` then `~/.travelog/zones.geojson`.
pub fn discover_zones_path() -> Option<PathBuf> {
    let mut candidates = vec![PathBuf::from("zones.geojson")];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".travelog").join("zones.geojson"));
    }
    candidates.into_iter().find(|p| p.exists())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
