#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Precinct and boundary types.
//!
//! A precinct is an LAPD division polygon, the unit of geographic
//! aggregation for every regional chart. These types are independent of
//! the arrest tables; the dataset loader joins them in by name.

use serde::{Deserialize, Serialize};

/// Name of the precinct the detail panel shows before any map click.
pub const DEFAULT_PRECINCT: &str = "TOPANGA";

/// Static attributes of one precinct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Precinct {
    /// Normalized upper-case precinct name (e.g. "NORTH HOLLYWOOD").
    pub name: String,
    /// Boundary id of the polygon this precinct is drawn with.
    pub id: String,
    /// Land area in square miles.
    pub sq_mile: f64,
    /// Resident population.
    pub population: f64,
}

/// Which `GeoJSON` feature properties identify a precinct polygon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryFields {
    /// Property holding the precinct's alternate (table-facing) name.
    #[serde(default = "default_name_property")]
    pub name_property: String,
    /// Property holding the precinct id that becomes the feature `id`.
    #[serde(default = "default_id_property")]
    pub id_property: String,
}

fn default_name_property() -> String {
    "APREC".to_string()
}

fn default_id_property() -> String {
    "PREC".to_string()
}

impl Default for BoundaryFields {
    fn default() -> Self {
        Self {
            name_property: default_name_property(),
            id_property: default_id_property(),
        }
    }
}

/// Initial camera for the choropleth map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Center latitude.
    pub center_lat: f64,
    /// Center longitude.
    pub center_lon: f64,
    /// Web-mercator zoom level.
    pub zoom: f64,
    /// Fill opacity of precinct polygons.
    pub opacity: f64,
}

impl MapView {
    /// The Los Angeles city view.
    pub const LOS_ANGELES: Self = Self {
        center_lat: 34.0,
        center_lon: -118.5,
        zoom: 8.3,
        opacity: 0.7,
    };
}
