#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Row types for the two in-memory tables the dashboard aggregates over.
//!
//! [`IncidentRecord`] is one arrest from the partitioned arrest tables.
//! [`PrecinctSummary`] is one precinct × crime group × year row with
//! pre-computed counts and rates. Both are immutable after load.

use std::ops::AddAssign;

use chrono::{NaiveDate, NaiveTime};
use la_arrests_crime_models::{CrimeGroup, DayNight, Sex, Weekday};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Selectable measure that drives the map coloring and the ranked charts.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Metric {
    /// Raw arrest count
    #[default]
    #[serde(rename = "Arrests")]
    #[strum(serialize = "Arrests")]
    Arrests,
    /// Arrests per 10,000 residents
    #[serde(rename = "Arrests_Per_10k_Pop")]
    #[strum(serialize = "Arrests_Per_10k_Pop")]
    ArrestsPer10kPop,
    /// Arrests per square mile
    #[serde(rename = "Arrests_Per_SqMile")]
    #[strum(serialize = "Arrests_Per_SqMile")]
    ArrestsPerSqMile,
}

impl Metric {
    /// Returns all selectable metrics in dropdown order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Arrests, Self::ArrestsPer10kPop, Self::ArrestsPerSqMile]
    }
}

/// The six summed measures of a summary row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricTotals {
    pub arrests: f64,
    pub reports: f64,
    pub arrests_per_sq_mile: f64,
    pub arrests_per_10k_pop: f64,
    pub reports_per_sq_mile: f64,
    pub reports_per_10k_pop: f64,
}

impl MetricTotals {
    /// Returns the measure backing `metric`.
    #[must_use]
    pub const fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Arrests => self.arrests,
            Metric::ArrestsPer10kPop => self.arrests_per_10k_pop,
            Metric::ArrestsPerSqMile => self.arrests_per_sq_mile,
        }
    }
}

impl AddAssign for MetricTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.arrests += rhs.arrests;
        self.reports += rhs.reports;
        self.arrests_per_sq_mile += rhs.arrests_per_sq_mile;
        self.arrests_per_10k_pop += rhs.arrests_per_10k_pop;
        self.reports_per_sq_mile += rhs.reports_per_sq_mile;
        self.reports_per_10k_pop += rhs.reports_per_10k_pop;
    }
}

/// One arrest event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// Unique arrest identifier.
    pub id: String,
    /// Normalized precinct name.
    pub precinct: String,
    pub crime_group: CrimeGroup,
    pub year: i32,
    pub date: NaiveDate,
    /// Time of arrest, when recorded.
    pub time: Option<NaiveTime>,
    pub weekday: Weekday,
    /// Age of the arrestee, when recorded.
    pub age: Option<u16>,
    /// Age bracket label from the source table (e.g. "25-34").
    pub age_group: String,
    pub sex: Sex,
    pub day_night: DayNight,
    pub charge_description: String,
}

/// One precinct × crime group × year row of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecinctSummary {
    /// Normalized precinct name.
    pub precinct: String,
    /// Boundary id joined in from the boundary file.
    pub precinct_id: String,
    pub crime_group: CrimeGroup,
    pub year: i32,
    pub metrics: MetricTotals,
    /// Precinct land area in square miles.
    pub sq_mile: f64,
    /// Precinct population.
    pub population: f64,
}

/// Inclusive range of years covered by the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    /// Whether `year` falls inside the bounds.
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }
}
