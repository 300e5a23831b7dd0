#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation engine for the arrests dashboard.
//!
//! Every chart is a pure function of the loaded [`Datasets`] and a
//! [`Selection`](la_arrests_analytics_models::Selection).
//! [`dashboard::compute_dashboard`] runs all of them in one pass and is
//! re-invoked whole whenever any input changes.
//!
//! [`Datasets`]: la_arrests_dataset::Datasets

pub mod dashboard;
pub mod detail;
pub mod regional;
pub mod selection;

#[cfg(test)]
pub(crate) mod fixtures;

use thiserror::Error;

pub use selection::SelectionError;

/// Errors that can occur while computing dashboard frames.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The selection failed validation against the loaded data.
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Rounds to two decimal places, half away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
