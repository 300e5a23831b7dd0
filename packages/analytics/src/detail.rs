//! Detail-panel frames computed from the arrests in one precinct.
//!
//! Everything here takes the area-scoped subset produced by
//! [`area_subset`]. An empty subset is never an error: each frame simply
//! comes out empty, except the weekday chart which keeps its seven bars.

use std::collections::BTreeMap;

use chrono::{Datelike as _, Months, NaiveDate, Timelike as _};
use la_arrests_analytics_models::{
    AgeSexCount, CategoryShare, MonthlyPoint, Selection, TimeOfDayBin, WeekdayCount,
    WeekdayDistribution,
};
use la_arrests_crime_models::{CrimeGroup, DayNight, Sex, Weekday};
use la_arrests_dataset_models::IncidentRecord;

use crate::round2;

/// Number of time-of-day buckets. They split the full 24-hour clock into
/// equal slices from midnight, regardless of when arrests occurred.
pub const TIME_OF_DAY_BINS: u16 = 72;

/// Width of one time-of-day bucket.
pub const MINUTES_PER_BIN: u16 = 24 * 60 / TIME_OF_DAY_BINS;

/// A charge description must occur more often than this to appear in the
/// word cloud.
pub const DESCRIPTION_MIN_FREQUENCY: u64 = 200;

/// Arrests in the selected precinct that pass the year and crime-group
/// filters, in table order.
#[must_use]
pub fn area_subset<'a>(
    incidents: &'a [IncidentRecord],
    selection: &Selection,
) -> Vec<&'a IncidentRecord> {
    let precinct = selection.selected_precinct();
    incidents
        .iter()
        .filter(|i| i.precinct == precinct && selection.includes(i.crime_group, i.year))
        .collect()
}

/// Counts per (age, sex, age group), ordered by age, then sex, then age
/// group. Arrests without an age are left out.
#[must_use]
pub fn age_sex_distribution(subset: &[&IncidentRecord]) -> Vec<AgeSexCount> {
    let mut counts: BTreeMap<(u16, Sex, &str), u64> = BTreeMap::new();
    for incident in subset {
        if let Some(age) = incident.age {
            *counts
                .entry((age, incident.sex, incident.age_group.as_str()))
                .or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|((age, sex, age_group), count)| AgeSexCount {
            age,
            sex,
            age_group: age_group.to_string(),
            count,
        })
        .collect()
}

/// Counts per twenty-minute bucket and day/night flag. Only non-empty
/// buckets are emitted, ordered by bucket then flag.
#[must_use]
pub fn time_of_day_distribution(subset: &[&IncidentRecord]) -> Vec<TimeOfDayBin> {
    let mut counts: BTreeMap<(u16, DayNight), u64> = BTreeMap::new();
    for incident in subset {
        let Some(time) = incident.time else {
            continue;
        };
        let minute = time.hour() * 60 + time.minute();
        let Ok(bin) = u16::try_from(minute / u32::from(MINUTES_PER_BIN)) else {
            continue;
        };
        *counts.entry((bin, incident.day_night)).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|((bin, day_night), count)| TimeOfDayBin {
            bin,
            start_minute: bin * MINUTES_PER_BIN,
            end_minute: (bin + 1) * MINUTES_PER_BIN,
            day_night,
            count,
        })
        .collect()
}

/// One bar per weekday, sorted ascending by count. Ties keep Monday-first
/// order.
#[must_use]
pub fn weekday_distribution(subset: &[&IncidentRecord]) -> WeekdayDistribution {
    let mut counts: BTreeMap<Weekday, u64> =
        Weekday::all().iter().map(|&day| (day, 0)).collect();
    for incident in subset {
        *counts.entry(incident.weekday).or_default() += 1;
    }

    let mut bars: Vec<WeekdayCount> = counts
        .into_iter()
        .map(|(weekday, count)| WeekdayCount {
            weekday,
            position: weekday.number(),
            count,
        })
        .collect();
    bars.sort_by_key(|bar| bar.count);

    WeekdayDistribution {
        labels: Weekday::all()
            .iter()
            .map(|day| day.label().to_string())
            .collect(),
        bars,
    }
}

/// Arrests per calendar month, labeled with the month's last day.
///
/// The series runs continuously from the first to the last month with any
/// arrests; months in between with none are reported as zero.
#[must_use]
pub fn monthly_trend(subset: &[&IncidentRecord]) -> Vec<MonthlyPoint> {
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for incident in subset {
        if let Some(first) = incident.date.with_day(1) {
            *counts.entry(first).or_default() += 1;
        }
    }

    let (Some(&first), Some(&last)) = (counts.keys().next(), counts.keys().next_back()) else {
        return Vec::new();
    };

    let mut points = Vec::new();
    let mut month = first;
    while month <= last {
        let Some(next) = month.checked_add_months(Months::new(1)) else {
            break;
        };
        if let Some(month_end) = next.pred_opt() {
            points.push(MonthlyPoint {
                month_end,
                count: counts.get(&month).copied().unwrap_or_default(),
            });
        }
        month = next;
    }
    points
}

/// Count and share of each crime group, sorted ascending by count. Ties
/// keep crime-group order. Percentages are rounded to two decimals.
#[must_use]
pub fn category_breakdown(subset: &[&IncidentRecord]) -> Vec<CategoryShare> {
    let mut counts: BTreeMap<CrimeGroup, u64> = BTreeMap::new();
    for incident in subset {
        *counts.entry(incident.crime_group).or_default() += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    let total = subset.len() as f64;
    let mut shares: Vec<CategoryShare> = counts
        .into_iter()
        .map(|(crime_group, count)| {
            #[allow(clippy::cast_precision_loss)]
            let percentage = round2(count as f64 / total * 100.0);
            CategoryShare {
                crime_group,
                count,
                percentage,
            }
        })
        .collect();
    shares.sort_by_key(|share| share.count);
    shares
}

/// Charge descriptions occurring more than
/// [`DESCRIPTION_MIN_FREQUENCY`] times.
#[must_use]
pub fn description_frequencies(subset: &[&IncidentRecord]) -> BTreeMap<String, u64> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for incident in subset {
        if !incident.charge_description.is_empty() {
            *counts.entry(incident.charge_description.as_str()).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .filter(|&(_, count)| count > DESCRIPTION_MIN_FREQUENCY)
        .map(|(term, count)| (term.to_string(), count))
        .collect()
}
