//! Raw table rows and their conversion into typed records.

use chrono::Datelike as _;
use la_arrests_crime_models::{CrimeGroup, DayNight, Sex, Weekday};
use la_arrests_dataset_models::{IncidentRecord, MetricTotals};
use la_arrests_geography::names::NameNormalizer;
use serde::Deserialize;

use crate::parsing::{parse_date, parse_int, parse_time};

/// One row of the joined arrest table, exactly as written by pandas.
#[derive(Debug, Deserialize)]
pub struct RawIncident {
    #[serde(rename = "ID", default)]
    id: Option<String>,
    #[serde(rename = "AREA_NAME", default)]
    area_name: Option<String>,
    #[serde(rename = "CRIME_GROUP", default)]
    crime_group: Option<String>,
    #[serde(rename = "YEAR", default)]
    year: Option<String>,
    #[serde(rename = "DATE", default)]
    date: Option<String>,
    #[serde(rename = "TIME", default)]
    time: Option<String>,
    #[serde(rename = "WEEKDAY", default)]
    weekday: Option<String>,
    #[serde(rename = "AGE", default)]
    age: Option<String>,
    #[serde(rename = "AGE_GROUP", default)]
    age_group: Option<String>,
    #[serde(rename = "SEX", default)]
    sex: Option<String>,
    #[serde(rename = "DAY_NIGHT", default)]
    day_night: Option<String>,
    #[serde(rename = "CHARGE_DESCRIPTION", default)]
    charge_description: Option<String>,
}

impl RawIncident {
    /// Converts the raw row into an [`IncidentRecord`].
    ///
    /// `YEAR` and `WEEKDAY` fall back to the values implied by `DATE` when
    /// absent. A missing or unparseable `TIME` or `AGE` is kept as `None`.
    ///
    /// # Errors
    ///
    /// Returns a description of the first field that could not be
    /// interpreted.
    pub fn normalize(self, names: &NameNormalizer) -> Result<IncidentRecord, String> {
        let id = required(self.id, "ID")?;
        let precinct = names.normalize(&required(self.area_name, "AREA_NAME")?);
        let crime_group = parse_group(&required(self.crime_group, "CRIME_GROUP")?)?;

        let raw_date = required(self.date, "DATE")?;
        let date = parse_date(&raw_date).ok_or_else(|| format!("invalid DATE '{raw_date}'"))?;

        let year = match self.year {
            Some(raw) => parse_int(&raw)
                .and_then(|y| i32::try_from(y).ok())
                .ok_or_else(|| format!("invalid YEAR '{raw}'"))?,
            None => date.year(),
        };

        let weekday = self
            .weekday
            .as_deref()
            .and_then(Weekday::parse)
            .or_else(|| {
                u8::try_from(date.weekday().number_from_monday())
                    .ok()
                    .and_then(Weekday::from_number)
            })
            .ok_or_else(|| format!("no weekday for {date}"))?;

        Ok(IncidentRecord {
            id,
            precinct,
            crime_group,
            year,
            date,
            time: self.time.as_deref().and_then(parse_time),
            weekday,
            age: self
                .age
                .as_deref()
                .and_then(parse_int)
                .and_then(|a| u16::try_from(a).ok()),
            age_group: self.age_group.unwrap_or_default().trim().to_owned(),
            sex: Sex::from_code(self.sex.as_deref().unwrap_or_default()),
            day_night: DayNight::from_flag(self.day_night.as_deref().unwrap_or_default()),
            charge_description: self
                .charge_description
                .unwrap_or_default()
                .trim()
                .to_owned(),
        })
    }
}

/// One row of the summary table before its boundary id is attached.
#[derive(Debug, Deserialize)]
pub struct RawSummary {
    #[serde(rename = "AREA_NAME")]
    area_name: String,
    #[serde(rename = "CRIME_GROUP")]
    crime_group: String,
    #[serde(rename = "YEAR")]
    year: String,
    #[serde(rename = "Arrests", default)]
    arrests: Option<f64>,
    #[serde(rename = "Reports", default)]
    reports: Option<f64>,
    #[serde(rename = "Arrests_Per_SqMile", default)]
    arrests_per_sq_mile: Option<f64>,
    #[serde(rename = "Arrests_Per_10k_Pop", default)]
    arrests_per_10k_pop: Option<f64>,
    #[serde(rename = "Reports_Per_SqMile", default)]
    reports_per_sq_mile: Option<f64>,
    #[serde(rename = "Reports_Per_10k_Pop", default)]
    reports_per_10k_pop: Option<f64>,
    #[serde(rename = "SqMile", default)]
    sq_mile: Option<f64>,
    #[serde(rename = "Population", default)]
    population: Option<f64>,
}

/// A summary row with its name normalized, awaiting a boundary id.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub precinct: String,
    pub crime_group: CrimeGroup,
    pub year: i32,
    pub metrics: MetricTotals,
    pub sq_mile: f64,
    pub population: f64,
}

impl RawSummary {
    /// Converts the raw row, treating blank measures as zero.
    ///
    /// # Errors
    ///
    /// Returns a description of the first field that could not be
    /// interpreted.
    pub fn normalize(self, names: &NameNormalizer) -> Result<SummaryRow, String> {
        let year = parse_int(&self.year)
            .and_then(|y| i32::try_from(y).ok())
            .ok_or_else(|| format!("invalid YEAR '{}'", self.year))?;

        Ok(SummaryRow {
            precinct: names.normalize(&self.area_name),
            crime_group: parse_group(&self.crime_group)?,
            year,
            metrics: MetricTotals {
                arrests: self.arrests.unwrap_or_default(),
                reports: self.reports.unwrap_or_default(),
                arrests_per_sq_mile: self.arrests_per_sq_mile.unwrap_or_default(),
                arrests_per_10k_pop: self.arrests_per_10k_pop.unwrap_or_default(),
                reports_per_sq_mile: self.reports_per_sq_mile.unwrap_or_default(),
                reports_per_10k_pop: self.reports_per_10k_pop.unwrap_or_default(),
            },
            sq_mile: self.sq_mile.unwrap_or_default(),
            population: self.population.unwrap_or_default(),
        })
    }
}

fn required(value: Option<String>, column: &str) -> Result<String, String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| format!("missing {column}"))
}

fn parse_group(raw: &str) -> Result<CrimeGroup, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("unknown CRIME_GROUP '{raw}'"))
}
