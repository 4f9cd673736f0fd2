//! Runtime orchestration layer for Travelog.
//!
//! Coordinates the data-ingestion and UI layers, manages the refresh loop,
//! and handles caching of pipeline results.

pub mod data_manager;
pub mod orchestrator;

pub use travelog_core as core;
pub use travelog_data as data;
