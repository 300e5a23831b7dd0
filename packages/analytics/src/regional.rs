//! Precinct-level frames computed from the summary table.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use la_arrests_analytics_models::{
    ChangeDirection, PercentChange, RankedValue, RegionalAggregate, Selection,
};
use la_arrests_dataset_models::{MetricTotals, PrecinctSummary};
use la_arrests_geography_models::Precinct;

use crate::round2;

/// Sums every summary measure per precinct over the selected years and
/// crime groups.
///
/// Every precinct in `precincts` gets a row, with zero sums when no summary
/// row matches. Rows come out in the order of `precincts`.
#[must_use]
pub fn regional_aggregate(
    precincts: &[Precinct],
    summary: &[PrecinctSummary],
    selection: &Selection,
) -> Vec<RegionalAggregate> {
    let mut sums: BTreeMap<&str, MetricTotals> = BTreeMap::new();
    for row in summary
        .iter()
        .filter(|row| selection.includes(row.crime_group, row.year))
    {
        *sums.entry(row.precinct.as_str()).or_default() += row.metrics;
    }

    precincts
        .iter()
        .map(|precinct| {
            let totals = sums
                .get(precinct.name.as_str())
                .copied()
                .unwrap_or_default();
            RegionalAggregate {
                precinct: precinct.name.clone(),
                precinct_id: precinct.id.clone(),
                sq_mile: precinct.sq_mile,
                population: precinct.population,
                totals,
                value: totals.value(selection.metric),
            }
        })
        .collect()
}

/// Orders the regional rows by their selected metric, ascending. Ties keep
/// their input order.
#[must_use]
pub fn totals_ranking(regional: &[RegionalAggregate]) -> Vec<RankedValue> {
    let mut ranked: Vec<RankedValue> = regional
        .iter()
        .map(|row| RankedValue {
            precinct: row.precinct.clone(),
            value: row.value,
        })
        .collect();
    ranked.sort_by(|a, b| a.value.total_cmp(&b.value));
    ranked
}

/// Compares each precinct's selected metric in the first and last selected
/// year. Years in between are ignored.
///
/// A precinct with a zero start-year sum has no percentage and is tagged
/// [`ChangeDirection::Undefined`]; those rows rank after every defined row,
/// by name. Defined rows are ranked ascending by percent change.
///
/// A precinct with start-year rows but no end-year rows counts as zero at
/// the end and reports -100%, rather than being left undefined.
#[must_use]
pub fn percent_change(
    precincts: &[Precinct],
    summary: &[PrecinctSummary],
    selection: &Selection,
) -> Vec<PercentChange> {
    let year_sums = |year: i32| {
        let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
        for row in summary
            .iter()
            .filter(|row| row.year == year && selection.crime_groups.contains(&row.crime_group))
        {
            *sums.entry(row.precinct.as_str()).or_default() += row.metrics.value(selection.metric);
        }
        sums
    };
    let start = year_sums(selection.years.start);
    let end = year_sums(selection.years.end);

    let mut changes: Vec<PercentChange> = precincts
        .iter()
        .map(|precinct| {
            let name = precinct.name.as_str();
            let start_value = start.get(name).copied().unwrap_or_default();
            let end_value = end.get(name).copied().unwrap_or_default();

            let percent_change = (start_value != 0.0)
                .then(|| round2((end_value - start_value) / start_value * 100.0));
            let direction = match percent_change {
                Some(pct) if pct > 0.0 => ChangeDirection::Increase,
                Some(_) => ChangeDirection::Decrease,
                None => ChangeDirection::Undefined,
            };

            PercentChange {
                precinct: precinct.name.clone(),
                start_value,
                end_value,
                percent_change,
                direction,
                color: direction.color().to_string(),
            }
        })
        .collect();

    changes.sort_by(|a, b| match (a.percent_change, b.percent_change) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.precinct.cmp(&b.precinct),
    });
    changes
}
