//! TTL-cached data manager for the travel-log runtime.
//!
//! Wraps feed loading and the aggregation pipeline with a configurable
//! time-to-live cache and transparent retry logic. Callers use
//! [`DataManager::get_data`] to obtain a fresh-or-cached [`TravelData`];
//! the manager handles staleness checks, up to three fetch attempts with
//! exponential back-off, and graceful fallback to the previous cache on
//! transient failure.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use travelog_data::aggregator::{TripAggregator, TripSnapshot};
use travelog_data::reader::load_records;
use travelog_data::zones::{load_zones, Zone};

// ── Defaults ──────────────────────────────────────────────────────────────────

/// Default cache TTL in seconds (matches the default refresh interval).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 30;

/// Maximum number of fetch attempts before giving up and returning stale data.
const MAX_RETRY_ATTEMPTS: u32 = 3;

// ── TravelData ────────────────────────────────────────────────────────────────

/// One complete refresh result: the pipeline snapshot plus the optional
/// zones overlay.
#[derive(Debug, Clone)]
pub struct TravelData {
    /// Derived cities, transports, stays and rollups.
    pub snapshot: TripSnapshot,
    /// Zones overlay, empty when no zones file is configured or it fails.
    pub zones: Vec<Zone>,
    /// When this refresh completed.
    pub generated_at: DateTime<Local>,
}

// ── DataManager ───────────────────────────────────────────────────────────────

/// TTL-cached wrapper around the full trip pipeline.
pub struct DataManager {
    /// Maximum age of cached data before it is considered stale.
    cache_ttl: Duration,
    /// Path to the trip feed file.
    data_path: PathBuf,
    /// Optional path to the GeoJSON zones overlay.
    zones_path: Option<PathBuf>,
    /// Most recently fetched pipeline result.
    cache: Option<TravelData>,
    /// When the cache was last populated.
    cache_timestamp: Option<Instant>,
    /// Human-readable description of the last error encountered.
    last_error: Option<String>,
    /// When the last *successful* fetch completed.
    last_successful_fetch: Option<Instant>,
}

impl DataManager {
    /// Create a new manager.
    ///
    /// # Parameters
    /// - `cache_ttl_secs` – seconds before cached data is considered stale.
    /// - `data_path`      – trip feed file to load on each fresh fetch.
    /// - `zones_path`     – optional zones overlay file.
    pub fn new(cache_ttl_secs: u64, data_path: PathBuf, zones_path: Option<PathBuf>) -> Self {
        Self {
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            data_path,
            zones_path,
            cache: None,
            cache_timestamp: None,
            last_error: None,
            last_successful_fetch: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return pipeline data, using the cache when it is still valid.
    ///
    /// When `force_refresh` is `true` the cache is bypassed and a fresh fetch
    /// is always attempted. On fetch failure the previous cache (if any) is
    /// returned as a best-effort fallback.
    ///
    /// The fetch is retried up to [`MAX_RETRY_ATTEMPTS`] times with
    /// exponential back-off (0 ms → 100 ms → 200 ms).
    pub fn get_data(&mut self, force_refresh: bool) -> Option<&TravelData> {
        if !force_refresh && self.is_cache_valid() {
            tracing::debug!("returning cached pipeline result");
            return self.cache.as_ref();
        }

        match self.fetch_with_retry() {
            Ok(data) => {
                tracing::debug!(
                    cities = data.snapshot.cities.len(),
                    transports = data.snapshot.transports.len(),
                    stays = data.snapshot.stays.len(),
                    "pipeline cache updated"
                );
                self.cache = Some(data);
                self.cache_timestamp = Some(Instant::now());
                self.last_successful_fetch = Some(Instant::now());
                self.last_error = None;
                self.cache.as_ref()
            }
            Err(e) => {
                tracing::warn!(error = %e, "fetch failed; falling back to cached data");
                self.last_error = Some(e);
                // Return whatever we have, even if stale.
                self.cache.as_ref()
            }
        }
    }

    /// Discard the current cache, forcing the next [`get_data`] call to fetch.
    pub fn invalidate_cache(&mut self) {
        self.cache = None;
        self.cache_timestamp = None;
        tracing::debug!("cache invalidated");
    }

    /// Age of the current cache entry, or `None` if no data has been fetched.
    pub fn cache_age(&self) -> Option<Duration> {
        self.cache_timestamp.map(|ts| ts.elapsed())
    }

    /// Human-readable description of the last fetch error, or `None`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// `true` when the cache holds data that is still within its TTL.
    fn is_cache_valid(&self) -> bool {
        match (self.cache.as_ref(), self.cache_timestamp) {
            (Some(_), Some(ts)) => ts.elapsed() < self.cache_ttl,
            _ => false,
        }
    }

    /// Attempt up to [`MAX_RETRY_ATTEMPTS`] fetches with exponential back-off.
    ///
    /// Back-off schedule: attempt 1 → 0 ms, attempt 2 → 100 ms, attempt 3 → 200 ms.
    fn fetch_with_retry(&mut self) -> Result<TravelData, String> {
        let mut last_err = String::new();

        for attempt in 0..MAX_RETRY_ATTEMPTS {
            // Exponential back-off: 0, 100, 200 ms.
            if attempt > 0 {
                let sleep_ms = (attempt as u64) * 100;
                tracing::debug!(attempt, sleep_ms, "retrying fetch after back-off");
                thread::sleep(Duration::from_millis(sleep_ms));
            }

            match self.fetch_fresh() {
                Ok(data) => return Ok(data),
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "fetch attempt failed");
                    last_err = e;
                }
            }
        }

        Err(last_err)
    }

    /// Run the full pipeline with this manager's configuration.
    ///
    /// A feed failure is an error; a zones failure only logs a warning and
    /// yields an empty overlay, since zones never affect the data model.
    fn fetch_fresh(&self) -> Result<TravelData, String> {
        let records = load_records(&self.data_path).map_err(|e| e.to_string())?;
        let snapshot = TripAggregator::build(records);

        let zones = match &self.zones_path {
            Some(path) => match load_zones(path) {
                Ok(zones) => zones,
                Err(e) => {
                    tracing::warn!(error = %e, "zones overlay unavailable; continuing without it");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Ok(TravelData {
            snapshot,
            zones,
            generated_at: Local::now(),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
