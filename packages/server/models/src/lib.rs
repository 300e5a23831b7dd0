#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the arrests dashboard server.
//!
//! These types are serialized to JSON for the REST API. Chart frames are
//! reused from the analytics models as-is; only the envelopes live here.

use la_arrests_analytics_models::{Dashboard, Selection, SelectionEvent};
use la_arrests_crime_models::CrimeGroup;
use la_arrests_dataset_models::{Metric, YearBounds};
use la_arrests_geography_models::{MapView, Precinct};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Everything a client needs to build the dashboard controls.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOptions {
    /// Metric dropdown values.
    pub metrics: Vec<Metric>,
    /// Crime-group multiselect values.
    pub crime_groups: Vec<CrimeGroup>,
    /// Groups that occur in the summary table.
    pub present_crime_groups: Vec<CrimeGroup>,
    /// Year slider bounds.
    pub year_bounds: YearBounds,
    /// Precinct shown before any map click.
    pub default_precinct: String,
    /// Every precinct with its boundary id, area and population.
    pub precincts: Vec<Precinct>,
    /// Initial map camera.
    pub map_view: MapView,
}

/// Query parameters for the dashboard endpoint. Omitted parameters take
/// their initial-selection values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQueryParams {
    /// Metric column name, e.g. `Arrests_Per_10k_Pop`.
    pub metric: Option<String>,
    /// Comma-separated crime-group labels.
    pub groups: Option<String>,
    /// First year, inclusive.
    pub from: Option<i32>,
    /// Last year, inclusive.
    pub to: Option<i32>,
    /// Clicked precinct name or boundary id.
    pub precinct: Option<String>,
}

/// Body of `POST /api/dashboard/events`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardEventRequest {
    /// The client's current selection.
    pub selection: Selection,
    /// The input change to apply.
    pub event: SelectionEvent,
}

/// Response of `POST /api/dashboard/events`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardEventResponse {
    /// The selection after the event, to send with the next event.
    pub selection: Selection,
    /// Every chart for the new selection.
    pub dashboard: Dashboard,
}

/// Error body for rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}
