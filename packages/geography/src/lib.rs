#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Precinct boundary loading and name-to-id lookup.
//!
//! Reads the LAPD division boundary `GeoJSON`, stamps each feature with its
//! precinct id, and builds the lookup table the dataset loader uses to
//! attach boundary ids to every summary row. Precinct names from every
//! source pass through the same [`names::NameNormalizer`] so that alias
//! spellings resolve to a single polygon.

pub mod boundaries;
pub mod names;

use thiserror::Error;

/// Errors that can occur while loading or resolving boundaries.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Reading the boundary file failed.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File that could not be read.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The boundary file is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// A feature lacks the property needed to identify its precinct.
    #[error("Boundary feature {index} has no usable '{property}' property")]
    MissingProperty {
        /// Position of the feature in the collection.
        index: usize,
        /// Name of the missing property.
        property: String,
    },

    /// Two features claim the same precinct name with different ids.
    #[error("Precinct '{name}' maps to both boundary id {first} and {second}")]
    ConflictingId {
        /// Normalized precinct name.
        name: String,
        /// Id seen first.
        first: String,
        /// Conflicting id.
        second: String,
    },

    /// Data conversion error.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
