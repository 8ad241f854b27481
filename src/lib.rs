//! blanklint library — Go function span extraction and empty-line detection.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod telemetry;
