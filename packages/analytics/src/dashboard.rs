//! The whole dashboard as one pure function of the data and a selection.

use la_arrests_analytics_models::{Dashboard, DashboardTitles, ResolvedSelection, Selection};
use la_arrests_dataset::Datasets;

use crate::AnalyticsError;
use crate::{detail, regional, selection};

/// Builds the chart headers for a selection.
#[must_use]
pub fn titles(selection: &Selection) -> DashboardTitles {
    let metric = selection.metric.as_ref();
    let (start, end) = (selection.years.start, selection.years.end);
    DashboardTitles {
        overview: format!("Data: {metric} in LA from {start} to {end}"),
        detail: format!(
            "Data: {metric} in {} from {start} to {end}",
            selection.selected_precinct()
        ),
    }
}

/// Computes every chart frame for `selection`.
///
/// # Errors
///
/// Returns [`AnalyticsError::Selection`] if the selection does not fit the
/// loaded data. An empty filter result is not an error.
pub fn compute_dashboard(
    datasets: &Datasets,
    selection: &Selection,
) -> Result<Dashboard, AnalyticsError> {
    selection::validate(selection, datasets)?;

    let regional =
        regional::regional_aggregate(datasets.precincts(), datasets.summary(), selection);
    let totals = regional::totals_ranking(&regional);
    let percent_change =
        regional::percent_change(datasets.precincts(), datasets.summary(), selection);

    let subset = detail::area_subset(datasets.incidents(), selection);
    log::debug!(
        "Computing dashboard for {} ({} arrests in subset)",
        selection.selected_precinct(),
        subset.len()
    );

    Ok(Dashboard {
        selection: ResolvedSelection::from(selection),
        titles: titles(selection),
        regional,
        totals,
        percent_change,
        age_sex: detail::age_sex_distribution(&subset),
        time_of_day: detail::time_of_day_distribution(&subset),
        weekdays: detail::weekday_distribution(&subset),
        monthly: detail::monthly_trend(&subset),
        categories: detail::category_breakdown(&subset),
        descriptions: detail::description_frequencies(&subset),
    })
}
