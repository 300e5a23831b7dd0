//! Validation of selections and application of input events.

use std::collections::BTreeSet;

use la_arrests_analytics_models::{Selection, SelectionEvent, YearRange};
use la_arrests_crime_models::CrimeGroup;
use la_arrests_dataset::Datasets;
use la_arrests_dataset_models::{Metric, YearBounds};
use thiserror::Error;

/// A dashboard input that cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// No precinct with this name or id exists.
    #[error("Unknown precinct: {name}")]
    UnknownPrecinct { name: String },

    /// Label is not one of the fixed crime groups.
    #[error("Unknown crime group: {label}")]
    UnknownCrimeGroup { label: String },

    /// Name is not one of the selectable metrics.
    #[error("Unknown metric: {name}")]
    UnknownMetric { name: String },

    /// The start year is after the end year.
    #[error("Invalid year range: {start} is after {end}")]
    InvertedYears { start: i32, end: i32 },

    /// A year falls outside the data.
    #[error("Year {year} is outside the available range {min}-{max}")]
    YearOutOfBounds { year: i32, min: i32, max: i32 },
}

/// Parses a metric dropdown value.
///
/// # Errors
///
/// Returns [`SelectionError::UnknownMetric`] for anything other than the
/// three metric column names.
pub fn parse_metric(name: &str) -> Result<Metric, SelectionError> {
    name.trim()
        .parse()
        .map_err(|_| SelectionError::UnknownMetric {
            name: name.to_string(),
        })
}

/// Parses a comma-separated list of crime-group labels. Blank entries are
/// ignored, so an empty string yields an empty set.
///
/// # Errors
///
/// Returns [`SelectionError::UnknownCrimeGroup`] for the first label that
/// is not a crime group.
pub fn parse_crime_groups(list: &str) -> Result<BTreeSet<CrimeGroup>, SelectionError> {
    list.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(|label| {
            label
                .parse::<CrimeGroup>()
                .map_err(|_| SelectionError::UnknownCrimeGroup {
                    label: label.to_string(),
                })
        })
        .collect()
}

/// Checks that a year range is ordered and inside the data.
///
/// # Errors
///
/// Returns [`SelectionError::InvertedYears`] or
/// [`SelectionError::YearOutOfBounds`].
pub fn validate_years(years: YearRange, bounds: YearBounds) -> Result<(), SelectionError> {
    if years.start > years.end {
        return Err(SelectionError::InvertedYears {
            start: years.start,
            end: years.end,
        });
    }
    match [years.start, years.end]
        .into_iter()
        .find(|year| !bounds.contains(*year))
    {
        Some(year) => Err(SelectionError::YearOutOfBounds {
            year,
            min: bounds.min,
            max: bounds.max,
        }),
        None => Ok(()),
    }
}

/// Checks a selection against the loaded data.
///
/// The clicked precinct, when present, must be a known precinct name. The
/// default precinct is not checked; a default with no data simply yields
/// empty detail charts.
///
/// # Errors
///
/// Returns the first [`SelectionError`] found.
pub fn validate(selection: &Selection, datasets: &Datasets) -> Result<(), SelectionError> {
    validate_years(selection.years, datasets.year_bounds())?;
    match &selection.clicked_precinct {
        Some(name) if datasets.precinct(name).is_none() => {
            Err(SelectionError::UnknownPrecinct { name: name.clone() })
        }
        _ => Ok(()),
    }
}

/// Resolves a map-click target to a canonical precinct name.
///
/// Accepts a precinct name in any case or a boundary id.
///
/// # Errors
///
/// Returns [`SelectionError::UnknownPrecinct`] if nothing matches.
pub fn resolve_precinct(target: &str, datasets: &Datasets) -> Result<String, SelectionError> {
    let name = target.trim().to_uppercase();
    if let Some(precinct) = datasets.precinct(&name) {
        return Ok(precinct.name.clone());
    }
    datasets
        .precincts()
        .iter()
        .find(|p| p.id == target.trim())
        .map(|p| p.name.clone())
        .ok_or_else(|| SelectionError::UnknownPrecinct {
            name: target.to_string(),
        })
}

/// Applies one input event, returning the next selection. `selection` is
/// left untouched.
///
/// # Errors
///
/// Returns [`SelectionError`] if the resulting selection would be invalid.
pub fn apply_event(
    selection: &Selection,
    event: SelectionEvent,
    datasets: &Datasets,
) -> Result<Selection, SelectionError> {
    let mut next = selection.clone();
    match event {
        SelectionEvent::SetMetric { metric } => next.metric = metric,
        SelectionEvent::SetCrimeGroups { crime_groups } => {
            next.crime_groups = crime_groups.into_iter().collect();
        }
        SelectionEvent::SetYears { start, end } => {
            let years = YearRange { start, end };
            validate_years(years, datasets.year_bounds())?;
            next.years = years;
        }
        SelectionEvent::MapClick { precinct } => {
            next.clicked_precinct = Some(resolve_precinct(&precinct, datasets)?);
        }
        SelectionEvent::ClearClick => next.clicked_precinct = None,
    }
    log::debug!("Applied selection event: {next:?}");
    Ok(next)
}
