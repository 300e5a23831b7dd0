#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Selection state and chart frame types for the arrests dashboard.
//!
//! A [`Selection`] is the complete set of dashboard inputs. It is an
//! immutable value: each [`SelectionEvent`] produces a new selection, and
//! every recomputation receives the whole selection rather than reading
//! ambient state. The remaining types are the aggregated frames handed to
//! the presentation layer, one per chart.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use la_arrests_crime_models::{CrimeGroup, DayNight, Sex, Weekday};
use la_arrests_dataset_models::{Metric, MetricTotals, YearBounds};
use la_arrests_geography_models::DEFAULT_PRECINCT;
use serde::{Deserialize, Serialize};

/// Inclusive range of years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// Whether `year` falls inside the range.
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }
}

impl From<YearBounds> for YearRange {
    fn from(bounds: YearBounds) -> Self {
        Self {
            start: bounds.min,
            end: bounds.max,
        }
    }
}

/// Every live dashboard input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Measure driving the map and ranked charts.
    pub metric: Metric,
    /// Crime groups to include. Ordered and deduplicated by construction.
    pub crime_groups: BTreeSet<CrimeGroup>,
    /// Years to include.
    pub years: YearRange,
    /// Precinct from the most recent map click.
    #[serde(default)]
    pub clicked_precinct: Option<String>,
}

impl Selection {
    /// The initial selection: raw arrests, every crime group, the full
    /// year range, and no map click.
    #[must_use]
    pub fn initial(bounds: YearBounds) -> Self {
        Self {
            metric: Metric::default(),
            crime_groups: CrimeGroup::all().iter().copied().collect(),
            years: bounds.into(),
            clicked_precinct: None,
        }
    }

    /// Precinct the detail panel is scoped to.
    #[must_use]
    pub fn selected_precinct(&self) -> &str {
        self.clicked_precinct.as_deref().unwrap_or(DEFAULT_PRECINCT)
    }

    /// Whether a row with this group and year passes the group and year
    /// filters.
    #[must_use]
    pub fn includes(&self, group: CrimeGroup, year: i32) -> bool {
        self.years.contains(year) && self.crime_groups.contains(&group)
    }
}

/// A single change to one dashboard input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SelectionEvent {
    /// New metric dropdown value.
    #[serde(rename_all = "camelCase")]
    SetMetric { metric: Metric },
    /// New crime-group multiselect value.
    #[serde(rename_all = "camelCase")]
    SetCrimeGroups { crime_groups: Vec<CrimeGroup> },
    /// New year slider handles.
    #[serde(rename_all = "camelCase")]
    SetYears { start: i32, end: i32 },
    /// A click on a precinct polygon.
    #[serde(rename_all = "camelCase")]
    MapClick { precinct: String },
    /// Return the detail panel to the default precinct.
    ClearClick,
}

/// The selection as actually applied, with the selected precinct resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSelection {
    pub metric: Metric,
    pub crime_groups: Vec<CrimeGroup>,
    pub years: YearRange,
    pub clicked_precinct: Option<String>,
    /// Clicked precinct, or the default when nothing has been clicked.
    pub selected_precinct: String,
}

impl From<&Selection> for ResolvedSelection {
    fn from(selection: &Selection) -> Self {
        Self {
            metric: selection.metric,
            crime_groups: selection.crime_groups.iter().copied().collect(),
            years: selection.years,
            clicked_precinct: selection.clicked_precinct.clone(),
            selected_precinct: selection.selected_precinct().to_string(),
        }
    }
}

/// Summed summary measures for one precinct. Drives the choropleth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalAggregate {
    pub precinct: String,
    /// Boundary id the map joins on.
    pub precinct_id: String,
    pub sq_mile: f64,
    pub population: f64,
    /// All six summed measures.
    pub totals: MetricTotals,
    /// The selected metric's sum.
    pub value: f64,
}

/// One bar of the ranked totals chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedValue {
    pub precinct: String,
    pub value: f64,
}

/// Sign class of a percent change, used to color its bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeDirection {
    /// Strictly positive change.
    Increase,
    /// Zero or negative change.
    Decrease,
    /// The start-year value was zero, so no percentage exists.
    Undefined,
}

impl ChangeDirection {
    /// Bar color for this direction.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Increase => "Red",
            Self::Decrease => "Blue",
            Self::Undefined => "Gray",
        }
    }
}

/// Change in the selected metric between the first and last selected year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentChange {
    pub precinct: String,
    /// Metric sum in the start year.
    pub start_value: f64,
    /// Metric sum in the end year.
    pub end_value: f64,
    /// Rounded to two decimals; `None` when `start_value` is zero.
    pub percent_change: Option<f64>,
    pub direction: ChangeDirection,
    /// Bar color derived from `direction`.
    pub color: String,
}

/// Count of arrests at one age for one sex and age bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeSexCount {
    pub age: u16,
    pub sex: Sex,
    pub age_group: String,
    pub count: u64,
}

/// Count of arrests in one time-of-day bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOfDayBin {
    /// Bucket number, starting from midnight.
    pub bin: u16,
    /// First minute after midnight covered by the bucket.
    pub start_minute: u16,
    /// Minute after midnight where the next bucket starts.
    pub end_minute: u16,
    pub day_night: DayNight,
    pub count: u64,
}

/// One bar of the weekday chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayCount {
    pub weekday: Weekday,
    /// ISO weekday number, the bar's x position (Monday = 1).
    pub position: u8,
    pub count: u64,
}

/// The weekday chart: bars sorted by count plus the fixed axis labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayDistribution {
    /// Tick labels for positions 1..=7.
    pub labels: Vec<String>,
    /// One bar per weekday, ascending by count.
    pub bars: Vec<WeekdayCount>,
}

/// Arrest count for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    /// Last day of the month.
    pub month_end: NaiveDate,
    pub count: u64,
}

/// Share of the area's arrests in one crime group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub crime_group: CrimeGroup,
    pub count: u64,
    /// Percentage of the subset total, rounded to two decimals.
    pub percentage: f64,
}

/// Chart headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTitles {
    /// Header above the map and ranked charts.
    pub overview: String,
    /// Header above the precinct detail panel.
    pub detail: String,
}

/// Every chart frame for one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub selection: ResolvedSelection,
    pub titles: DashboardTitles,
    /// Per-precinct sums, by precinct name.
    pub regional: Vec<RegionalAggregate>,
    /// Selected metric per precinct, ascending.
    pub totals: Vec<RankedValue>,
    /// Start-to-end year change per precinct, ascending.
    pub percent_change: Vec<PercentChange>,
    pub age_sex: Vec<AgeSexCount>,
    pub time_of_day: Vec<TimeOfDayBin>,
    pub weekdays: WeekdayDistribution,
    pub monthly: Vec<MonthlyPoint>,
    pub categories: Vec<CategoryShare>,
    /// Word-cloud input: charge description → occurrences.
    pub descriptions: BTreeMap<String, u64>,
}
