//! Small in-memory datasets shared by the engine's tests.
//!
//! Three precincts (CENTRAL, HOLLYWOOD, TOPANGA) with Robbery and Burglary
//! summary rows for 2017-2020. HOLLYWOOD has no Burglary rows and no
//! arrests; CENTRAL has zero Robbery arrests in 2018.

use chrono::{Datelike as _, NaiveDate};
use la_arrests_crime_models::{CrimeGroup, DayNight, Sex, Weekday};
use la_arrests_dataset::Datasets;
use la_arrests_dataset::records::SummaryRow;
use la_arrests_dataset_models::{IncidentRecord, MetricTotals};
use la_arrests_geography::boundaries::PrecinctBoundaries;
use la_arrests_geography::names::NameNormalizer;
use la_arrests_geography_models::BoundaryFields;

const BOUNDARIES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        { "type": "Feature", "properties": { "APREC": "CENTRAL", "PREC": 1 }, "geometry": null },
        { "type": "Feature", "properties": { "APREC": "HOLLYWOOD", "PREC": 6 }, "geometry": null },
        { "type": "Feature", "properties": { "APREC": "TOPANGA", "PREC": 21 }, "geometry": null }
    ]
}"#;

/// `(precinct, sq_mile, population, group, [arrests for 2017..=2020])`
const SUMMARY: &[(&str, f64, f64, CrimeGroup, [f64; 4])] = &[
    ("CENTRAL", 4.5, 40_000.0, CrimeGroup::Robbery, [10.0, 0.0, 5.0, 8.0]),
    ("CENTRAL", 4.5, 40_000.0, CrimeGroup::Burglary, [20.0, 30.0, 25.0, 15.0]),
    ("HOLLYWOOD", 13.5, 150_000.0, CrimeGroup::Robbery, [40.0, 50.0, 45.0, 60.0]),
    ("TOPANGA", 53.8, 200_000.0, CrimeGroup::Robbery, [12.0, 20.0, 18.0, 10.0]),
    ("TOPANGA", 53.8, 200_000.0, CrimeGroup::Burglary, [30.0, 40.0, 44.0, 50.0]),
];

pub fn summary_rows() -> Vec<SummaryRow> {
    let mut rows = Vec::new();
    for &(precinct, sq_mile, population, crime_group, arrests) in SUMMARY {
        for (year, arrests) in (2017..).zip(arrests) {
            rows.push(SummaryRow {
                precinct: precinct.to_string(),
                crime_group,
                year,
                metrics: MetricTotals {
                    arrests,
                    reports: arrests * 3.0,
                    arrests_per_sq_mile: arrests / sq_mile,
                    arrests_per_10k_pop: arrests / population * 10_000.0,
                    reports_per_sq_mile: arrests * 3.0 / sq_mile,
                    reports_per_10k_pop: arrests * 3.0 / population * 10_000.0,
                },
                sq_mile,
                population,
            });
        }
    }
    rows
}

pub fn boundaries() -> PrecinctBoundaries {
    PrecinctBoundaries::from_geojson_str(
        BOUNDARIES,
        &BoundaryFields::default(),
        &NameNormalizer::default(),
    )
    .unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A 30-year-old male daytime Larceny arrest with no recorded time.
pub fn incident(id: usize, precinct: &str, year: i32, month: u32, day: u32) -> IncidentRecord {
    let date = date(year, month, day);
    IncidentRecord {
        id: id.to_string(),
        precinct: precinct.to_string(),
        crime_group: CrimeGroup::Larceny,
        year,
        date,
        time: None,
        weekday: Weekday::from_number(u8::try_from(date.weekday().number_from_monday()).unwrap())
            .unwrap(),
        age: Some(30),
        age_group: "30-39".to_string(),
        sex: Sex::Male,
        day_night: DayNight::Day,
        charge_description: "PETTY THEFT".to_string(),
    }
}

/// 205 TOPANGA Larceny arrests in Jan and Mar 2019, 3 TOPANGA Robbery
/// arrests in 2018, and 2 CENTRAL Burglary arrests in 2020.
pub fn incidents() -> Vec<IncidentRecord> {
    let mut incidents = Vec::new();
    for i in 0..205 {
        let month = if i % 2 == 0 { 1 } else { 3 };
        let day = u32::try_from(i % 28).unwrap() + 1;
        incidents.push(incident(i, "TOPANGA", 2019, month, day));
    }
    for i in 0..3 {
        incidents.push(IncidentRecord {
            crime_group: CrimeGroup::Robbery,
            charge_description: "ROBBERY".to_string(),
            ..incident(1000 + i, "TOPANGA", 2018, 6, 10)
        });
    }
    for i in 0..2 {
        incidents.push(IncidentRecord {
            crime_group: CrimeGroup::Burglary,
            charge_description: "BURGLARY".to_string(),
            ..incident(2000 + i, "CENTRAL", 2020, 2, 14)
        });
    }
    incidents
}

pub fn datasets() -> Datasets {
    Datasets::new(incidents(), summary_rows(), boundaries()).unwrap()
}
