//! Domain layer for Travelog.
//!
//! Holds the typed data model for trip records and their derived entities,
//! the string/date normalization helpers, the record classifier, the
//! presenter boundary trait, display formatting, settings, and the shared
//! error type.

pub mod classifier;
pub mod error;
pub mod formatting;
pub mod models;
pub mod normalize;
pub mod presenter;
pub mod settings;
