//! Async refresh orchestrator.
//!
//! Runs the [`DataManager`] in a tokio task, sending periodic [`TravelData`]
//! snapshots through an `mpsc` channel so the TUI event loop can consume
//! them without any shared mutable state.

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;

use crate::data_manager::{DataManager, DEFAULT_CACHE_TTL_SECS};

pub use crate::data_manager::TravelData;

// ── RefreshOrchestrator ───────────────────────────────────────────────────────

/// Background refresh coordinator.
///
/// Call [`RefreshOrchestrator::start`] to spin up the refresh loop in a
/// dedicated tokio task and receive a channel endpoint for [`TravelData`]
/// updates.
pub struct RefreshOrchestrator {
    /// How often to re-run the pipeline.
    update_interval: Duration,
    /// Path to the trip feed file.
    data_path: PathBuf,
    /// Optional path to the zones overlay.
    zones_path: Option<PathBuf>,
}

impl RefreshOrchestrator {
    /// Create a new orchestrator.
    ///
    /// # Parameters
    /// - `update_interval_secs` – seconds between pipeline refreshes.
    /// - `data_path`            – trip feed file.
    /// - `zones_path`           – optional zones overlay file.
    pub fn new(update_interval_secs: u64, data_path: PathBuf, zones_path: Option<PathBuf>) -> Self {
        Self {
            update_interval: Duration::from_secs(update_interval_secs),
            data_path,
            zones_path,
        }
    }

    /// Start the refresh loop.
    ///
    /// Spawns a tokio task that runs the refresh loop. Returns:
    /// - An `mpsc::Receiver<TravelData>` for the caller to poll.
    /// - A [`RefreshHandle`] that can be used to abort the loop.
    pub fn start(self) -> (mpsc::Receiver<TravelData>, RefreshHandle) {
        // Buffer a modest number of snapshots so slow consumers don't stall the loop.
        let (tx, rx) = mpsc::channel(16);

        let handle = tokio::spawn(async move {
            self.refresh_loop(tx).await;
        });

        (rx, RefreshHandle { handle })
    }

    // ── Private implementation ────────────────────────────────────────────

    /// The main refresh loop.
    ///
    /// Performs an immediate fetch on startup, then repeats on `update_interval`.
    /// The loop exits when the receiver side of the channel is closed.
    async fn refresh_loop(self, tx: mpsc::Sender<TravelData>) {
        let mut data_manager = DataManager::new(
            DEFAULT_CACHE_TTL_SECS,
            self.data_path.clone(),
            self.zones_path.clone(),
        );

        // Initial fetch (force refresh to populate immediately).
        self.fetch_and_send(&mut data_manager, &tx, true).await;

        let mut interval = time::interval(self.update_interval);
        // Consume the first tick which fires immediately; we already fetched above.
        interval.tick().await;

        loop {
            interval.tick().await;

            if tx.is_closed() {
                tracing::debug!("refresh channel closed; exiting loop");
                break;
            }

            self.fetch_and_send(&mut data_manager, &tx, false).await;
        }
    }

    /// Fetch fresh data and send a [`TravelData`] snapshot to the channel.
    async fn fetch_and_send(
        &self,
        data_manager: &mut DataManager,
        tx: &mpsc::Sender<TravelData>,
        force: bool,
    ) {
        // Clone so the snapshot is owned by the channel message.
        let data = match data_manager.get_data(force) {
            Some(d) => d.clone(),
            None => {
                tracing::warn!("no pipeline data available; skipping send");
                return;
            }
        };

        if let Err(e) = tx.send(data).await {
            tracing::warn!(error = %e, "failed to send refresh snapshot; receiver dropped");
        }
    }
}

// ── RefreshHandle ─────────────────────────────────────────────────────────────

/// A handle to the background refresh task.
///
/// Drop or call [`RefreshHandle::abort`] to stop the loop.
pub struct RefreshHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl RefreshHandle {
    /// Immediately abort the refresh loop.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
