//! Orbit catalog: named initial conditions for planar three-body periodic solutions.
//!
//! A [`Catalog`] is an insertion-ordered, immutable mapping from string keys to
//! [`OrbitConfig`] records. Two process-wide catalogs are built lazily and then
//! shared by reference: [`builtin`] holds the presets that stay numerically
//! stable under fixed-step RK4 at the default step, [`experimental`] holds
//! published coefficients that do not.

use std::sync::OnceLock;

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;
use three_body_core::constants::BODY_COUNT;
use three_body_core::vector::{self, Vector2};

pub mod presets;

/// Immutable initial-condition record for one orbit family member.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitConfig {
    pub name: String,
    pub masses: [f64; BODY_COUNT],
    pub positions: [Vector2; BODY_COUNT],
    pub velocities: [Vector2; BODY_COUNT],
}

impl OrbitConfig {
    /// Equal-mass collinear choreography seed: bodies at `(-1,0)`, `(1,0)`, `(0,0)`
    /// with velocities `v, v, -2v`, so the total momentum is zero.
    pub fn choreography(name: impl Into<String>, vx: f64, vy: f64) -> Self {
        Self {
            name: name.into(),
            masses: [1.0, 1.0, 1.0],
            positions: [[-1.0, 0.0], [1.0, 0.0], [0.0, 0.0]],
            velocities: [[vx, vy], [vx, vy], [-2.0 * vx, -2.0 * vy]],
        }
    }

    /// Check that every mass is strictly positive and every component finite.
    pub fn validate(&self) -> Result<(), InvalidOrbit> {
        if let Some(body) = self.masses.iter().position(|m| !(m.is_finite() && *m > 0.0)) {
            return Err(InvalidOrbit::Mass {
                body,
                mass: self.masses[body],
            });
        }
        let all_finite = self
            .positions
            .iter()
            .chain(self.velocities.iter())
            .all(vector::is_finite);
        if !all_finite {
            return Err(InvalidOrbit::NonFiniteState);
        }
        Ok(())
    }

    /// Sum of the body masses.
    pub fn total_mass(&self) -> f64 {
        self.masses.iter().sum()
    }

    /// Net linear momentum Σ mᵢ vᵢ.
    pub fn net_momentum(&self) -> Vector2 {
        self.masses
            .iter()
            .zip(self.velocities.iter())
            .fold([0.0, 0.0], |acc, (m, v)| vector::add(&acc, &vector::scale(v, *m)))
    }
}

/// Why an [`OrbitConfig`] cannot be simulated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidOrbit {
    #[error("mass of body {body} must be positive and finite (got {mass})")]
    Mass { body: usize, mass: f64 },
    #[error("positions and velocities must be finite")]
    NonFiniteState,
}

/// Errors raised by catalog lookups and construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    #[error("unknown orbit configuration key '{0}'")]
    UnknownConfigKey(String),
    #[error("duplicate orbit configuration key '{0}'")]
    DuplicateKey(String),
    #[error("invalid orbit configuration '{key}': {reason}")]
    InvalidConfig { key: String, reason: InvalidOrbit },
}

/// Insertion-ordered, immutable mapping from key to [`OrbitConfig`].
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<(String, OrbitConfig)>,
}

impl Catalog {
    /// Build a catalog from owned entries, preserving their order.
    pub fn from_entries<I>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (String, OrbitConfig)>,
    {
        let mut collected: Vec<(String, OrbitConfig)> = Vec::new();
        for (key, config) in entries {
            if collected.iter().any(|(existing, _)| *existing == key) {
                return Err(CatalogError::DuplicateKey(key));
            }
            if let Err(reason) = config.validate() {
                return Err(CatalogError::InvalidConfig { key, reason });
            }
            collected.push((key, config));
        }
        Ok(Self { entries: collected })
    }

    /// Look up a configuration by key.
    pub fn get(&self, key: &str) -> Result<&OrbitConfig, CatalogError> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, config)| config)
            .ok_or_else(|| CatalogError::UnknownConfigKey(key.to_string()))
    }

    /// Resolve a key to the catalog-owned `&str` alongside its config.
    pub fn entry(&self, key: &str) -> Result<(&str, &OrbitConfig), CatalogError> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(k, config)| (k.as_str(), config))
            .ok_or_else(|| CatalogError::UnknownConfigKey(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Keys in definition order.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Iterate `(key, config)` pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OrbitConfig)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Uniformly random key, `None` for an empty catalog.
    pub fn random_key<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.entries.choose(rng).map(|(k, _)| k.as_str())
    }

    /// Uniformly random key different from `current`.
    ///
    /// Falls back to `current` itself when it is the only entry.
    pub fn random_key_except<R: Rng + ?Sized>(&self, rng: &mut R, current: &str) -> Option<&str> {
        let others: Vec<&str> = self
            .entries
            .iter()
            .map(|(k, _)| k.as_str())
            .filter(|k| *k != current)
            .collect();
        match others.choose(rng) {
            Some(key) => Some(*key),
            None => self.entries.iter().map(|(k, _)| k.as_str()).find(|k| *k == current),
        }
    }
}

/// Validated presets shared across the process.
pub fn builtin() -> &'static Catalog {
    static BUILTIN: OnceLock<Catalog> = OnceLock::new();
    BUILTIN.get_or_init(|| {
        log::debug!("building validated orbit catalog");
        Catalog {
            entries: presets::validated(),
        }
    })
}

/// Published choreographies that diverge under RK4 at the default step.
pub fn experimental() -> &'static Catalog {
    static EXPERIMENTAL: OnceLock<Catalog> = OnceLock::new();
    EXPERIMENTAL.get_or_init(|| {
        log::debug!("building experimental orbit catalog");
        Catalog {
            entries: presets::experimental(),
        }
    })
}

/// Look a key up in the validated catalog first, then the experimental one.
pub fn find(key: &str) -> Result<&'static OrbitConfig, CatalogError> {
    builtin().get(key).or_else(|_| experimental().get(key))
}
