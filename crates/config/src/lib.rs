//! Configuration models and loaders for custom orbits and analysis settings.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use three_body_catalog::{Catalog, CatalogError, OrbitConfig};

/// Orbit definition parsed from user-supplied YAML or TOML files.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OrbitRecord {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    pub masses: [f64; 3],
    pub positions: [[f64; 2]; 3],
    pub velocities: [[f64; 2]; 3],
}

impl OrbitRecord {
    /// Split into a catalog key and its config; the key doubles as the name when none is given.
    pub fn into_entry(self) -> (String, OrbitConfig) {
        let name = self.name.unwrap_or_else(|| self.key.clone());
        (
            self.key,
            OrbitConfig {
                name,
                masses: self.masses,
                positions: self.positions,
                velocities: self.velocities,
            },
        )
    }
}

/// Settings for the period search.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PeriodSearch {
    pub dt: f64,
    pub max_time: f64,
    pub threshold: f64,
    pub transient: f64,
}

impl Default for PeriodSearch {
    fn default() -> Self {
        Self {
            dt: 0.0001,
            max_time: 200.0,
            threshold: 0.01,
            transient: 1.0,
        }
    }
}

/// Settings for the energy conservation run.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EnergyCheck {
    pub dt: f64,
    pub total_time: f64,
}

impl Default for EnergyCheck {
    fn default() -> Self {
        Self {
            dt: 0.001,
            total_time: 100.0,
        }
    }
}

/// Settings for the perturbed-trajectory stability estimate.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StabilityCheck {
    pub dt: f64,
    pub total_time: f64,
    pub perturbation: f64,
}

impl Default for StabilityCheck {
    fn default() -> Self {
        Self {
            dt: 0.001,
            total_time: 100.0,
            perturbation: 1e-8,
        }
    }
}

/// Complete analysis configuration; every section is optional in files.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AnalysisSettings {
    pub period: PeriodSearch,
    pub energy: EnergyCheck,
    pub stability: StabilityCheck,
}

impl AnalysisSettings {
    /// Reject step sizes and spans the fixed-step analysis loops cannot finish with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("period.dt", self.period.dt)?;
        positive("period.max_time", self.period.max_time)?;
        positive("period.threshold", self.period.threshold)?;
        if !(self.period.transient.is_finite() && self.period.transient >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "period.transient must be finite and non-negative (got {})",
                self.period.transient
            )));
        }
        positive("energy.dt", self.energy.dt)?;
        positive("energy.total_time", self.energy.total_time)?;
        positive("stability.dt", self.stability.dt)?;
        positive("stability.total_time", self.stability.total_time)?;
        if !self.stability.perturbation.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "stability.perturbation must be finite (got {})",
                self.stability.perturbation
            )));
        }
        Ok(())
    }
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{field} must be positive and finite (got {value})"
        )))
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("invalid analysis settings: {0}")]
    Invalid(String),
}

/// Load orbit records from a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_orbits<P: AsRef<Path>>(path: P) -> Result<Vec<OrbitRecord>, ConfigError> {
    let path = path.as_ref();
    let records: Vec<OrbitRecord> = if path.is_dir() {
        read_dir_records(path)?
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        vec![toml::from_str(&contents)?]
    } else {
        let reader = File::open(path)?;
        serde_yaml::from_reader(reader)?
    };
    log::debug!("loaded {} orbit record(s) from {}", records.len(), path.display());
    Ok(records)
}

/// Load orbit records and assemble them into a validated [`Catalog`].
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, ConfigError> {
    let records = load_orbits(path)?;
    Ok(Catalog::from_entries(records.into_iter().map(OrbitRecord::into_entry))?)
}

/// Load analysis settings from YAML or TOML; missing fields take defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<AnalysisSettings, ConfigError> {
    let path = path.as_ref();
    let settings: AnalysisSettings = if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)?
    } else {
        let reader = File::open(path)?;
        serde_yaml::from_reader(reader)?
    };
    settings.validate()?;
    Ok(settings)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
