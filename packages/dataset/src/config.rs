//! Dataset file manifest.
//!
//! The default manifest is embedded at compile time from
//! `config/default.toml`. Deployments point `LA_ARRESTS_CONFIG` at their
//! own file or just move the data with `LA_ARRESTS_DATA_DIR`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use la_arrests_geography::names::{LAPD_ALIASES, NameNormalizer};
use la_arrests_geography_models::BoundaryFields;
use serde::Deserialize;

use crate::DatasetError;

/// Manifest embedded at compile time.
const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Environment variable naming a replacement manifest file.
pub const CONFIG_ENV: &str = "LA_ARRESTS_CONFIG";

/// Environment variable overriding the manifest's `data_dir`.
pub const DATA_DIR_ENV: &str = "LA_ARRESTS_DATA_DIR";

/// Where the input files live and how to interpret them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetConfig {
    /// Directory the file names below are relative to.
    pub data_dir: PathBuf,
    /// Column-wise partitions of the arrest table, in join order.
    pub incident_partitions: Vec<String>,
    /// Precinct × crime group × year summary table.
    pub summary_file: String,
    /// Precinct boundary `GeoJSON`.
    pub boundary_file: String,
    /// Boundary feature properties carrying precinct name and id.
    #[serde(default)]
    pub boundary: BoundaryFields,
    /// Precinct name aliases, alias → canonical name.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl DatasetConfig {
    /// Parses a TOML manifest.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Config`] if the TOML is malformed.
    pub fn parse(body: &str) -> Result<Self, DatasetError> {
        Ok(toml::from_str(body)?)
    }

    /// The manifest embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Config`] if the embedded TOML is malformed.
    pub fn embedded() -> Result<Self, DatasetError> {
        Self::parse(DEFAULT_CONFIG)
    }

    /// Resolves the manifest from the environment, falling back to the
    /// embedded default.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the configured manifest cannot be read
    /// or parsed.
    pub fn from_env() -> Result<Self, DatasetError> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                log::info!("Reading dataset manifest from {path}");
                let body = std::fs::read_to_string(&path).map_err(|source| DatasetError::Io {
                    path: path.clone(),
                    source,
                })?;
                Self::parse(&body)?
            }
            Err(_) => Self::embedded()?,
        };

        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Returns a copy of this manifest rooted at `dir`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = dir.to_path_buf();
        self
    }

    /// Full paths of the arrest table partitions.
    #[must_use]
    pub fn incident_paths(&self) -> Vec<PathBuf> {
        self.incident_partitions
            .iter()
            .map(|file| self.data_dir.join(file))
            .collect()
    }

    /// Full path of the summary table.
    #[must_use]
    pub fn summary_path(&self) -> PathBuf {
        self.data_dir.join(&self.summary_file)
    }

    /// Full path of the boundary file.
    #[must_use]
    pub fn boundary_path(&self) -> PathBuf {
        self.data_dir.join(&self.boundary_file)
    }

    /// Builds the precinct name normalizer.
    ///
    /// The built-in LAPD aliases always apply; configured aliases are
    /// layered on top and win on conflict.
    #[must_use]
    pub fn name_normalizer(&self) -> NameNormalizer {
        let builtin = LAPD_ALIASES
            .iter()
            .map(|&(alias, canonical)| (alias.to_string(), canonical.to_string()));
        let configured = self
            .aliases
            .iter()
            .map(|(alias, canonical)| (alias.clone(), canonical.clone()));
        NameNormalizer::new(builtin.chain(configured))
    }
}
