//! Fixed-step three-body simulation driven by classical RK4.
//!
//! A [`Simulation`] copies one catalog entry into a packed state and then only
//! changes through [`Simulation::step`], [`Simulation::step_by`],
//! [`Simulation::advance`] and [`Simulation::reset`]. Each step replaces the
//! whole state vector at once.

pub mod dynamics;

use rand::Rng;
use three_body_catalog::{Catalog, CatalogError, OrbitConfig};
use three_body_core::constants::{BODY_COUNT, DEFAULT_STEP};
use three_body_core::vector::Vector2;

pub use dynamics::{Masses, StateVector};

/// Mutable simulation state bound to the catalog it was created from.
#[derive(Debug, Clone)]
pub struct Simulation<'c> {
    catalog: &'c Catalog,
    key: &'c str,
    config: &'c OrbitConfig,
    state: StateVector,
    masses: Masses,
    time: f64,
    default_step: f64,
}

impl Simulation<'static> {
    /// Load `key` from the built-in validated catalog.
    pub fn new(key: &str) -> Result<Self, CatalogError> {
        Simulation::with_catalog(three_body_catalog::builtin(), key)
    }
}

impl<'c> Simulation<'c> {
    /// Load `key` from an arbitrary catalog.
    pub fn with_catalog(catalog: &'c Catalog, key: &str) -> Result<Self, CatalogError> {
        let (key, config) = catalog.entry(key)?;
        log::debug!("loading orbit '{key}' ({})", config.name);
        Ok(Self {
            catalog,
            key,
            config,
            state: dynamics::initial_state(config),
            masses: config.masses,
            time: 0.0,
            default_step: DEFAULT_STEP,
        })
    }

    /// Load a uniformly random entry of `catalog`.
    pub fn random<R: Rng + ?Sized>(catalog: &'c Catalog, rng: &mut R) -> Result<Self, CatalogError> {
        let key = catalog
            .random_key(rng)
            .ok_or_else(|| CatalogError::UnknownConfigKey(String::new()))?;
        Simulation::with_catalog(catalog, key)
    }

    /// Override the default step; non-positive or non-finite values are ignored.
    pub fn with_default_step(mut self, step: f64) -> Self {
        if step.is_finite() && step > 0.0 {
            self.default_step = step;
        } else {
            log::warn!("ignoring invalid default step {step}");
        }
        self
    }

    /// One RK4 step of the default size.
    pub fn step(&mut self) {
        self.step_by(self.default_step);
    }

    /// One RK4 step of size `dt`.
    pub fn step_by(&mut self, dt: f64) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        self.state = dynamics::rk4_step(&self.state, &self.masses, dt);
        self.time += dt;
    }

    /// Advance by `total` using `ceil(total / default_step)` equal sub-steps.
    ///
    /// The sub-step is `total / n`, so the requested span is covered exactly and
    /// time is credited once at the end.
    pub fn advance(&mut self, total: f64) {
        if !(total.is_finite() && total > 0.0) {
            return;
        }
        let steps = (total / self.default_step).ceil().max(1.0) as usize;
        let h = total / steps as f64;
        let mut state = self.state;
        for _ in 0..steps {
            state = dynamics::rk4_step(&state, &self.masses, h);
        }
        self.state = state;
        self.time += total;
    }

    /// Restart the current orbit, or switch to `key` when given.
    ///
    /// An unknown key leaves the simulation untouched.
    pub fn reset(&mut self, key: Option<&str>) -> Result<(), CatalogError> {
        let (key, config) = self.catalog.entry(key.unwrap_or(self.key))?;
        log::debug!("resetting simulation to '{key}'");
        self.key = key;
        self.config = config;
        self.state = dynamics::initial_state(config);
        self.masses = config.masses;
        self.time = 0.0;
        Ok(())
    }

    pub fn positions(&self) -> [Vector2; BODY_COUNT] {
        std::array::from_fn(|body| dynamics::position(&self.state, body))
    }

    pub fn velocities(&self) -> [Vector2; BODY_COUNT] {
        std::array::from_fn(|body| dynamics::velocity(&self.state, body))
    }

    /// Total kinetic plus potential energy of the current state.
    pub fn total_energy(&self) -> f64 {
        dynamics::total_energy(&self.state, &self.masses)
    }

    /// False once the integration has produced a NaN or infinity.
    pub fn is_finite(&self) -> bool {
        self.state.iter().all(|v| v.is_finite())
    }

    pub fn state(&self) -> &StateVector {
        &self.state
    }

    pub fn masses(&self) -> &Masses {
        &self.masses
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn key(&self) -> &str {
        self.key
    }

    pub fn default_step(&self) -> f64 {
        self.default_step
    }

    /// The catalog entry currently loaded.
    pub fn config(&self) -> &'c OrbitConfig {
        self.config
    }
}
