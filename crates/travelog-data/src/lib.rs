//! Data ingestion layer for Travelog.
//!
//! Responsible for reading and parsing the trip feed and the optional
//! GeoJSON zones overlay, and for running the aggregation pipeline that
//! turns raw records into the derived city / transport / stay collections
//! and rollup statistics.

pub mod aggregator;
pub mod reader;
pub mod zones;

pub use travelog_core as core;
