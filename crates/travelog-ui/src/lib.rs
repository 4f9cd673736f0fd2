//! Terminal UI layer for Travelog.
//!
//! Provides themes, the header component, the presentation-state panel,
//! trip and stay table views, and the main application event loop built on
//! top of [`ratatui`] for rendering the travel log in the terminal.

pub mod app;
pub mod components;
pub mod panel;
pub mod themes;
pub mod trip_view;

pub use travelog_core as core;
