#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Startup loader for the arrests dashboard.
//!
//! Reads the partitioned arrest table, the precinct summary table, and the
//! precinct boundary file once, normalizes precinct names, joins boundary
//! ids into the summary, and hands back an immutable [`Datasets`]. Any
//! inconsistency is a fatal error: a precinct name that does not resolve
//! to a boundary would otherwise leave an unmappable region on the map.

pub mod config;
pub mod parsing;
pub mod partitions;
pub mod records;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use la_arrests_crime_models::CrimeGroup;
use la_arrests_dataset_models::{IncidentRecord, PrecinctSummary, YearBounds};
use la_arrests_geography::GeoError;
use la_arrests_geography::boundaries::PrecinctBoundaries;
use la_arrests_geography::names::NameNormalizer;
use la_arrests_geography_models::Precinct;
use thiserror::Error;

use crate::config::DatasetConfig;
use crate::records::{RawIncident, RawSummary, SummaryRow};

/// Errors that can occur while loading the datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset manifest is malformed.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// A file could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// File that could not be read.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A CSV file could not be parsed.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// File being parsed.
        path: String,
        /// Underlying error.
        source: csv::Error,
    },

    /// Boundary loading failed.
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// Arrest partitions do not line up.
    #[error("Partition {path} does not match: {message}")]
    PartitionMismatch {
        /// Offending partition file.
        path: String,
        /// Description of the mismatch.
        message: String,
    },

    /// A row could not be interpreted.
    #[error("Invalid record in {path} at row {row}: {message}")]
    InvalidRecord {
        /// File containing the row.
        path: String,
        /// One-based data row number.
        row: usize,
        /// Description of what went wrong.
        message: String,
    },

    /// A precinct name in a table has no boundary polygon.
    #[error("Precinct '{name}' in the {table} table has no boundary id")]
    UnmappedPrecinct {
        /// Table the name came from.
        table: &'static str,
        /// Normalized precinct name.
        name: String,
    },

    /// A required input had no rows.
    #[error("No data in {what}")]
    Empty {
        /// Description of the empty input.
        what: &'static str,
    },
}

/// The read-only tables every aggregation runs over.
#[derive(Debug, Clone)]
pub struct Datasets {
    incidents: Vec<IncidentRecord>,
    summary: Vec<PrecinctSummary>,
    boundaries: PrecinctBoundaries,
    precincts: Vec<Precinct>,
    year_bounds: YearBounds,
}

impl Datasets {
    /// Loads every file named by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if any file is missing or malformed, or if
    /// any precinct name fails to resolve to a boundary.
    pub fn load(config: &DatasetConfig) -> Result<Self, DatasetError> {
        let names = config.name_normalizer();

        let boundaries =
            PrecinctBoundaries::load(&config.boundary_path(), &config.boundary, &names)?;

        let partitions = config
            .incident_paths()
            .iter()
            .map(|path| partitions::read_partition(path))
            .collect::<Result<Vec<_>, _>>()?;
        let incidents = read_incidents(&partitions, &names)?;
        log::info!(
            "Loaded {} arrest records from {} partitions",
            incidents.len(),
            partitions.len()
        );

        let summary = read_summary(&config.summary_path(), &names)?;
        log::info!("Loaded {} summary rows", summary.len());

        Self::new(incidents, summary, boundaries)
    }

    /// Assembles the datasets from already-parsed parts, joining boundary
    /// ids into the summary rows.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::UnmappedPrecinct`] if any incident or summary
    /// precinct has no boundary, and [`DatasetError::Empty`] if the summary
    /// has no rows.
    pub fn new(
        incidents: Vec<IncidentRecord>,
        summary: Vec<SummaryRow>,
        boundaries: PrecinctBoundaries,
    ) -> Result<Self, DatasetError> {
        let unmapped = |table, name: &str| DatasetError::UnmappedPrecinct {
            table,
            name: name.to_string(),
        };

        if let Some(incident) = incidents
            .iter()
            .find(|i| boundaries.id_for(&i.precinct).is_none())
        {
            return Err(unmapped("arrest", &incident.precinct));
        }

        let summary = summary
            .into_iter()
            .map(|row| {
                let precinct_id = boundaries
                    .id_for(&row.precinct)
                    .ok_or_else(|| unmapped("summary", &row.precinct))?
                    .to_string();
                Ok(PrecinctSummary {
                    precinct: row.precinct,
                    precinct_id,
                    crime_group: row.crime_group,
                    year: row.year,
                    metrics: row.metrics,
                    sq_mile: row.sq_mile,
                    population: row.population,
                })
            })
            .collect::<Result<Vec<_>, DatasetError>>()?;

        let year_bounds = YearBounds {
            min: summary
                .iter()
                .map(|row| row.year)
                .min()
                .ok_or(DatasetError::Empty {
                    what: "summary table",
                })?,
            max: summary.iter().map(|row| row.year).max().unwrap_or_default(),
        };

        let mut catalogue: BTreeMap<&str, Precinct> = BTreeMap::new();
        for row in &summary {
            catalogue
                .entry(row.precinct.as_str())
                .or_insert_with(|| Precinct {
                    name: row.precinct.clone(),
                    id: row.precinct_id.clone(),
                    sq_mile: row.sq_mile,
                    population: row.population,
                });
        }
        let precincts: Vec<Precinct> = catalogue.into_values().collect();

        log::info!(
            "Dataset covers {} precincts, years {}-{}",
            precincts.len(),
            year_bounds.min,
            year_bounds.max
        );

        Ok(Self {
            incidents,
            summary,
            boundaries,
            precincts,
            year_bounds,
        })
    }

    /// Every arrest record.
    #[must_use]
    pub fn incidents(&self) -> &[IncidentRecord] {
        &self.incidents
    }

    /// Every summary row, each with its boundary id.
    #[must_use]
    pub fn summary(&self) -> &[PrecinctSummary] {
        &self.summary
    }

    /// The boundary polygons and name lookup.
    #[must_use]
    pub const fn boundaries(&self) -> &PrecinctBoundaries {
        &self.boundaries
    }

    /// Precincts present in the summary table, sorted by name.
    #[must_use]
    pub fn precincts(&self) -> &[Precinct] {
        &self.precincts
    }

    /// Looks up a precinct by normalized name.
    #[must_use]
    pub fn precinct(&self, name: &str) -> Option<&Precinct> {
        self.precincts
            .binary_search_by(|p| p.name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.precincts[idx])
    }

    /// First and last year of the summary table.
    #[must_use]
    pub const fn year_bounds(&self) -> YearBounds {
        self.year_bounds
    }

    /// Crime groups that occur in the summary table, in label order.
    #[must_use]
    pub fn crime_groups(&self) -> Vec<CrimeGroup> {
        self.summary
            .iter()
            .map(|row| row.crime_group)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Joins the arrest partitions and converts every row.
///
/// # Errors
///
/// Returns [`DatasetError`] if the partitions do not line up or any row
/// is malformed.
pub fn read_incidents(
    partitions: &[partitions::Partition],
    names: &NameNormalizer,
) -> Result<Vec<IncidentRecord>, DatasetError> {
    let table = partitions::join_partitions(partitions)?;
    let origin = table
        .sources
        .first()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    table
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let invalid = |message: String| DatasetError::InvalidRecord {
                path: origin.clone(),
                row: idx + 1,
                message,
            };
            row.deserialize::<RawIncident>(Some(&table.headers))
                .map_err(|e| invalid(e.to_string()))?
                .normalize(names)
                .map_err(invalid)
        })
        .collect()
}

/// Reads the summary table.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file is missing or any row is malformed.
pub fn read_summary(path: &Path, names: &NameNormalizer) -> Result<Vec<SummaryRow>, DatasetError> {
    let display = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .from_path(path)
        .map_err(|source| DatasetError::Csv {
            path: display.clone(),
            source,
        })?;

    reader
        .deserialize::<RawSummary>()
        .enumerate()
        .map(|(idx, result)| {
            let invalid = |message: String| DatasetError::InvalidRecord {
                path: display.clone(),
                row: idx + 1,
                message,
            };
            result
                .map_err(|e| invalid(e.to_string()))?
                .normalize(names)
                .map_err(invalid)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::NaiveDate;
    use la_arrests_crime_models::{DayNight, Sex, Weekday};
    use la_arrests_dataset_models::MetricTotals;

    use super::*;

    const BOUNDARIES: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"APREC":"TOPANGA","PREC":21},"geometry":null},
        {"type":"Feature","properties":{"APREC":"WEST LOS ANGELES","PREC":8},"geometry":null},
        {"type":"Feature","properties":{"APREC":"CENTRAL","PREC":1},"geometry":null}
    ]}"#;

    const SUMMARY: &str = "\
AREA_NAME,CRIME_GROUP,YEAR,Arrests,Reports,Arrests_Per_SqMile,Arrests_Per_10k_Pop,Reports_Per_SqMile,Reports_Per_10k_Pop,SqMile,Population
Topanga,Robbery,2016,10,20,0.1,0.5,0.2,1.0,60.0,200000
Topanga,Larceny,2018,5,8,0.05,0.25,0.08,0.4,60.0,200000
West LA,Robbery,2017,3,4,0.05,0.1,0.06,0.2,65.0,230000
";

    fn write_fixture(dir: &Path, summary: &str, partition_b: &str) -> DatasetConfig {
        std::fs::write(dir.join("LAPD_Divisions.geojson"), BOUNDARIES).unwrap();
        std::fs::write(dir.join("summary.csv"), summary).unwrap();
        std::fs::write(
            dir.join("a.csv"),
            ",ID,AREA_NAME,CRIME_GROUP,YEAR,DATE\n\
             0,1,Topanga,Robbery,2016,2016-02-01\n\
             1,2,West LA,Larceny,2018,2018-07-14\n",
        )
        .unwrap();
        std::fs::write(dir.join("b.csv"), partition_b).unwrap();

        DatasetConfig {
            data_dir: PathBuf::new(),
            incident_partitions: vec!["a.csv".to_string(), "b.csv".to_string()],
            summary_file: "summary.csv".to_string(),
            boundary_file: "LAPD_Divisions.geojson".to_string(),
            boundary: la_arrests_geography_models::BoundaryFields::default(),
            aliases: [("WEST LA".to_string(), "WEST LOS ANGELES".to_string())]
                .into_iter()
                .collect(),
        }
        .with_data_dir(dir)
    }

    const PARTITION_B: &str = ",TIME,WEEKDAY,AGE,AGE_GROUP,SEX,DAY_NIGHT,CHARGE_DESCRIPTION\n\
        0,1300,1,22,18-24,M,Day,ROBBERY\n\
        1,2330,6,35,35-44,F,Night,PETTY THEFT\n";

    #[test]
    fn loads_and_joins_all_files() {
        let tmp = tempfile::tempdir().unwrap();
        let config = write_fixture(tmp.path(), SUMMARY, PARTITION_B);

        let datasets = Datasets::load(&config).unwrap();

        assert_eq!(datasets.incidents().len(), 2);
        assert_eq!(datasets.incidents()[1].precinct, "WEST LOS ANGELES");
        assert_eq!(datasets.incidents()[1].weekday, Weekday::Saturday);
        assert_eq!(datasets.summary().len(), 3);
        assert_eq!(datasets.summary()[0].precinct_id, "21");
        assert_eq!(datasets.summary()[2].precinct_id, "8");
        assert_eq!(
            datasets.year_bounds(),
            YearBounds {
                min: 2016,
                max: 2018
            }
        );
        assert_eq!(
            datasets.crime_groups(),
            vec![CrimeGroup::Larceny, CrimeGroup::Robbery]
        );

        let names: Vec<&str> = datasets.precincts().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["TOPANGA", "WEST LOS ANGELES"]);
        let topanga = datasets.precinct("TOPANGA").unwrap();
        assert_eq!(topanga.id, "21");
        assert!((topanga.population - 200_000.0).abs() < f64::EPSILON);
        assert!(datasets.precinct("CENTRAL").is_none());
    }

    #[test]
    fn unmapped_summary_precinct_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let summary = format!("{SUMMARY}Hollenbeck,Robbery,2017,1,1,0,0,0,0,15.0,200000\n");
        let config = write_fixture(tmp.path(), &summary, PARTITION_B);

        let err = Datasets::load(&config).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::UnmappedPrecinct { table: "summary", ref name } if name == "HOLLENBECK"
        ));
    }

    #[test]
    fn missing_file_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let config = write_fixture(tmp.path(), SUMMARY, PARTITION_B);
        std::fs::remove_file(tmp.path().join("b.csv")).unwrap();

        assert!(matches!(
            Datasets::load(&config).unwrap_err(),
            DatasetError::Csv { .. }
        ));
    }

    #[test]
    fn malformed_row_reports_position() {
        let tmp = tempfile::tempdir().unwrap();
        let summary = format!("{SUMMARY}Topanga,Jaywalking,2017,1,1,0,0,0,0,60.0,200000\n");
        let config = write_fixture(tmp.path(), &summary, PARTITION_B);

        let err = Datasets::load(&config).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidRecord { row: 4, .. }));
    }

    fn boundaries() -> PrecinctBoundaries {
        PrecinctBoundaries::from_geojson_str(
            BOUNDARIES,
            &la_arrests_geography_models::BoundaryFields::default(),
            &NameNormalizer::default(),
        )
        .unwrap()
    }

    fn summary_row(precinct: &str) -> SummaryRow {
        SummaryRow {
            precinct: precinct.to_string(),
            crime_group: CrimeGroup::Robbery,
            year: 2019,
            metrics: MetricTotals::default(),
            sq_mile: 60.0,
            population: 200_000.0,
        }
    }

    fn arrest(precinct: &str) -> IncidentRecord {
        IncidentRecord {
            id: "1".to_string(),
            precinct: precinct.to_string(),
            crime_group: CrimeGroup::Robbery,
            year: 2019,
            date: NaiveDate::from_ymd_opt(2019, 5, 6).unwrap(),
            time: None,
            weekday: Weekday::Monday,
            age: Some(30),
            age_group: "25-34".to_string(),
            sex: Sex::Male,
            day_night: DayNight::Day,
            charge_description: "ROBBERY".to_string(),
        }
    }

    #[test]
    fn unmapped_arrest_precinct_is_fatal() {
        let err = Datasets::new(
            vec![arrest("TOPANGA"), arrest("HOLLENBECK")],
            vec![summary_row("TOPANGA")],
            boundaries(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DatasetError::UnmappedPrecinct { table: "arrest", ref name } if name == "HOLLENBECK"
        ));
    }

    #[test]
    fn mapped_arrests_and_summary_assemble() {
        let datasets = Datasets::new(
            vec![arrest("TOPANGA")],
            vec![summary_row("TOPANGA")],
            boundaries(),
        )
        .unwrap();
        assert_eq!(datasets.incidents().len(), 1);
        assert_eq!(datasets.summary()[0].precinct_id, "21");
    }

    #[test]
    fn empty_summary_is_fatal() {
        assert!(matches!(
            Datasets::new(Vec::new(), Vec::new(), boundaries()).unwrap_err(),
            DatasetError::Empty { .. }
        ));
    }
}
