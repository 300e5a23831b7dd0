#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Arrest classification types shared across the dashboard.
//!
//! Defines the fixed 28-label LAPD crime group taxonomy along with the
//! demographic and temporal labels carried by each arrest record. The
//! string forms match the labels used in the cleaned arrest tables, so
//! parsing a table cell and rendering a chart label use the same text.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Crime group assigned to an arrest.
#[derive(
    Debug,
    Clone,
    Copy,
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
pub enum CrimeGroup {
    /// Offenses against family members or children
    #[serde(rename = "Against Family/Child")]
    #[strum(serialize = "Against Family/Child")]
    AgainstFamilyChild,
    #[serde(rename = "Aggravated Assault")]
    #[strum(serialize = "Aggravated Assault")]
    AggravatedAssault,
    #[serde(rename = "Burglary")]
    #[strum(serialize = "Burglary")]
    Burglary,
    #[serde(rename = "Disorderly Conduct")]
    #[strum(serialize = "Disorderly Conduct")]
    DisorderlyConduct,
    #[serde(rename = "Disturbing the Peace")]
    #[strum(serialize = "Disturbing the Peace")]
    DisturbingThePeace,
    #[serde(rename = "Driving Under Influence")]
    #[strum(serialize = "Driving Under Influence")]
    DrivingUnderInfluence,
    /// Public drunkenness (the source data spells it "Drunkeness")
    #[serde(rename = "Drunkeness")]
    #[strum(serialize = "Drunkeness")]
    Drunkeness,
    #[serde(rename = "Federal Offenses")]
    #[strum(serialize = "Federal Offenses")]
    FederalOffenses,
    #[serde(rename = "Forgery/Counterfeit")]
    #[strum(serialize = "Forgery/Counterfeit")]
    ForgeryCounterfeit,
    #[serde(rename = "Fraud/Embezzlement")]
    #[strum(serialize = "Fraud/Embezzlement")]
    FraudEmbezzlement,
    #[serde(rename = "Gambling")]
    #[strum(serialize = "Gambling")]
    Gambling,
    #[serde(rename = "Homicide")]
    #[strum(serialize = "Homicide")]
    Homicide,
    #[serde(rename = "Larceny")]
    #[strum(serialize = "Larceny")]
    Larceny,
    #[serde(rename = "Liquor Laws")]
    #[strum(serialize = "Liquor Laws")]
    LiquorLaws,
    #[serde(rename = "Miscellaneous Other Violations")]
    #[strum(serialize = "Miscellaneous Other Violations")]
    MiscellaneousOtherViolations,
    #[serde(rename = "Moving Traffic Violations")]
    #[strum(serialize = "Moving Traffic Violations")]
    MovingTrafficViolations,
    #[serde(rename = "Narcotic Drug Laws")]
    #[strum(serialize = "Narcotic Drug Laws")]
    NarcoticDrugLaws,
    #[serde(rename = "Non-Criminal Detention")]
    #[strum(serialize = "Non-Criminal Detention")]
    NonCriminalDetention,
    #[serde(rename = "Other Assaults")]
    #[strum(serialize = "Other Assaults")]
    OtherAssaults,
    /// Juvenile status offenses
    #[serde(rename = "Pre-Delinquency")]
    #[strum(serialize = "Pre-Delinquency")]
    PreDelinquency,
    #[serde(rename = "Prostitution/Allied")]
    #[strum(serialize = "Prostitution/Allied")]
    ProstitutionAllied,
    #[serde(rename = "Rape")]
    #[strum(serialize = "Rape")]
    Rape,
    #[serde(rename = "Receive Stolen Property")]
    #[strum(serialize = "Receive Stolen Property")]
    ReceiveStolenProperty,
    #[serde(rename = "Robbery")]
    #[strum(serialize = "Robbery")]
    Robbery,
    /// Sex offenses other than rape and prostitution
    #[serde(rename = "Sex (except rape/prst)")]
    #[strum(serialize = "Sex (except rape/prst)")]
    SexExceptRapeProstitution,
    /// Arrests with no recorded charge group
    #[serde(rename = "Unknown")]
    #[strum(serialize = "Unknown")]
    Unknown,
    #[serde(rename = "Vehicle Theft")]
    #[strum(serialize = "Vehicle Theft")]
    VehicleTheft,
    #[serde(rename = "Weapon (carry/poss)")]
    #[strum(serialize = "Weapon (carry/poss)")]
    WeaponCarryPossession,
}

impl CrimeGroup {
    /// Returns all 28 crime groups in label order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::AgainstFamilyChild,
            Self::AggravatedAssault,
            Self::Burglary,
            Self::DisorderlyConduct,
            Self::DisturbingThePeace,
            Self::DrivingUnderInfluence,
            Self::Drunkeness,
            Self::FederalOffenses,
            Self::ForgeryCounterfeit,
            Self::FraudEmbezzlement,
            Self::Gambling,
            Self::Homicide,
            Self::Larceny,
            Self::LiquorLaws,
            Self::MiscellaneousOtherViolations,
            Self::MovingTrafficViolations,
            Self::NarcoticDrugLaws,
            Self::NonCriminalDetention,
            Self::OtherAssaults,
            Self::PreDelinquency,
            Self::ProstitutionAllied,
            Self::Rape,
            Self::ReceiveStolenProperty,
            Self::Robbery,
            Self::SexExceptRapeProstitution,
            Self::Unknown,
            Self::VehicleTheft,
            Self::WeaponCarryPossession,
        ]
    }
}

/// Sex of the arrestee as recorded in the arrest table.
#[derive(
    Debug,
    Clone,
    Copy,
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
pub enum Sex {
    #[serde(rename = "M")]
    #[strum(serialize = "M")]
    Male,
    #[serde(rename = "F")]
    #[strum(serialize = "F")]
    Female,
    /// Anything other than `M`/`F`, including blanks
    #[serde(rename = "X")]
    #[strum(serialize = "X")]
    Unknown,
}

impl Sex {
    /// Parses a raw table cell. Unrecognized codes map to [`Sex::Unknown`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "M" | "MALE" => Self::Male,
            "F" | "FEMALE" => Self::Female,
            _ => Self::Unknown,
        }
    }
}

/// Whether an arrest happened during the day or at night.
#[derive(
    Debug,
    Clone,
    Copy,
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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DayNight {
    Day,
    Night,
    Unknown,
}

impl DayNight {
    /// Parses a raw table cell (`Day`, `NIGHT`, `D`, `N`, ...).
    #[must_use]
    pub fn from_flag(flag: &str) -> Self {
        match flag.trim().to_ascii_uppercase().as_str() {
            "D" | "DAY" | "DAYTIME" => Self::Day,
            "N" | "NIGHT" | "NIGHTTIME" => Self::Night,
            _ => Self::Unknown,
        }
    }
}

/// Day of the week, Monday first.
#[derive(
    Debug,
    Clone,
    Copy,
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
pub enum Weekday {
    #[serde(rename = "Mon")]
    #[strum(serialize = "Mon")]
    Monday = 1,
    #[serde(rename = "Tues")]
    #[strum(serialize = "Tues")]
    Tuesday = 2,
    #[serde(rename = "Wed")]
    #[strum(serialize = "Wed")]
    Wednesday = 3,
    #[serde(rename = "Thurs")]
    #[strum(serialize = "Thurs")]
    Thursday = 4,
    #[serde(rename = "Fri")]
    #[strum(serialize = "Fri")]
    Friday = 5,
    #[serde(rename = "Sat")]
    #[strum(serialize = "Sat")]
    Saturday = 6,
    #[serde(rename = "Sun")]
    #[strum(serialize = "Sun")]
    Sunday = 7,
}

impl Weekday {
    /// Returns the ISO weekday number (Monday = 1, Sunday = 7).
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Creates a weekday from its ISO number.
    #[must_use]
    pub const fn from_number(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Monday),
            2 => Some(Self::Tuesday),
            3 => Some(Self::Wednesday),
            4 => Some(Self::Thursday),
            5 => Some(Self::Friday),
            6 => Some(Self::Saturday),
            7 => Some(Self::Sunday),
            _ => None,
        }
    }

    /// Parses a raw table cell: an ISO number (`"3"`, `"3.0"`) or a day
    /// name in any case, full or abbreviated.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(n) = raw.parse::<f64>() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            return (n.fract() == 0.0 && (1.0..=7.0).contains(&n))
                .then(|| Self::from_number(n as u8))
                .flatten();
        }
        let lower = raw.to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|day| lower.len() >= 3 && day.full_name().starts_with(&lower))
    }

    /// Lower-case English day name.
    const fn full_name(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Axis label used by the weekday chart.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monday => "Mon",
            Self::Tuesday => "Tues",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thurs",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
            Self::Sunday => "Sun",
        }
    }

    /// Returns all weekdays, Monday first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
            Self::Sunday,
        ]
    }
}
