//! Reusable UI components shared between views.

pub mod header;
