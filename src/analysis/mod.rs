//! Periodicity, energy conservation, and stability checks for orbit presets.
//!
//! Each check integrates a fresh copy of the initial conditions with plain
//! fixed-step RK4 at the step size given in its settings, independent of any
//! [`crate::simulation::Simulation`] default step. Settings are expected to
//! have passed [`AnalysisSettings::validate`]; a non-positive `dt` never ends.

use std::fmt;

use three_body_catalog::OrbitConfig;
use three_body_config::{AnalysisSettings, EnergyCheck, PeriodSearch, StabilityCheck};
use three_body_export::report::OrbitSummary;

use crate::simulation::dynamics::{
    self, StateVector, position_distance, rk4_step, state_distance, total_energy,
};

/// Outcome of the return-to-start search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodResult {
    /// First time after the transient at which positions came back within the threshold.
    pub period: Option<f64>,
    pub min_return_distance: f64,
    pub energy_drift_percent: f64,
}

/// Energy drift over a fixed-length run, in percent of the initial energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyResult {
    pub initial_energy: f64,
    pub max_drift_percent: f64,
    pub final_drift_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyRating {
    Excellent,
    Good,
    Warning,
}

impl EnergyRating {
    pub fn from_drift_percent(max_drift_percent: f64) -> Self {
        if max_drift_percent < 0.01 {
            EnergyRating::Excellent
        } else if max_drift_percent < 0.1 {
            EnergyRating::Good
        } else {
            EnergyRating::Warning
        }
    }
}

impl fmt::Display for EnergyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EnergyRating::Excellent => "EXCELLENT",
            EnergyRating::Good => "GOOD",
            EnergyRating::Warning => "WARNING",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilityRating {
    Stable,
    Marginal,
    Unstable,
}

impl StabilityRating {
    pub fn from_lyapunov(lyapunov: f64) -> Self {
        if lyapunov < 0.01 {
            StabilityRating::Stable
        } else if lyapunov < 0.1 {
            StabilityRating::Marginal
        } else {
            StabilityRating::Unstable
        }
    }
}

impl fmt::Display for StabilityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StabilityRating::Stable => "STABLE",
            StabilityRating::Marginal => "MARGINAL",
            StabilityRating::Unstable => "UNSTABLE",
        };
        f.write_str(label)
    }
}

/// Combined result of every check for one orbit.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitReport {
    pub key: String,
    pub name: String,
    pub period: PeriodResult,
    pub energy: EnergyResult,
    pub lyapunov: f64,
}

impl OrbitReport {
    pub fn is_periodic(&self) -> bool {
        self.period.period.is_some()
    }

    pub fn energy_rating(&self) -> EnergyRating {
        EnergyRating::from_drift_percent(self.energy.max_drift_percent)
    }

    pub fn stability_rating(&self) -> StabilityRating {
        StabilityRating::from_lyapunov(self.lyapunov)
    }

    /// Serializable form for JSON reports.
    pub fn to_summary(&self) -> OrbitSummary {
        OrbitSummary {
            key: self.key.clone(),
            name: self.name.clone(),
            periodic: self.is_periodic(),
            period: self.period.period,
            min_return_distance: self.period.min_return_distance,
            initial_energy: self.energy.initial_energy,
            max_energy_drift_percent: self.energy.max_drift_percent,
            final_energy_drift_percent: self.energy.final_drift_percent,
            energy_rating: self.energy_rating().to_string(),
            lyapunov_estimate: self.lyapunov,
            stability_rating: self.stability_rating().to_string(),
        }
    }
}

fn drift_percent(current: f64, initial: f64) -> f64 {
    ((current - initial) / initial).abs() * 100.0
}

/// Search for the first return of all three positions to their initial values.
pub fn find_period(config: &OrbitConfig, search: &PeriodSearch) -> PeriodResult {
    let initial = dynamics::initial_state(config);
    let masses = &config.masses;
    let initial_energy = total_energy(&initial, masses);

    let mut state: StateVector = initial;
    let mut t = 0.0;
    while t < search.transient {
        state = rk4_step(&state, masses, search.dt);
        t += search.dt;
    }

    let mut min_distance = f64::INFINITY;
    while t < search.max_time {
        state = rk4_step(&state, masses, search.dt);
        t += search.dt;

        let distance = position_distance(&state, &initial);
        if distance < min_distance {
            min_distance = distance;
        }
        if distance < search.threshold {
            return PeriodResult {
                period: Some(t),
                min_return_distance: min_distance,
                energy_drift_percent: drift_percent(total_energy(&state, masses), initial_energy),
            };
        }
    }

    PeriodResult {
        period: None,
        min_return_distance: min_distance,
        energy_drift_percent: drift_percent(total_energy(&state, masses), initial_energy),
    }
}

/// Track the energy drift at every step of a fixed-length run.
pub fn energy_conservation(config: &OrbitConfig, check: &EnergyCheck) -> EnergyResult {
    let masses = &config.masses;
    let mut state = dynamics::initial_state(config);
    let initial_energy = total_energy(&state, masses);

    let mut max_drift: f64 = 0.0;
    let mut t = 0.0;
    while t < check.total_time {
        state = rk4_step(&state, masses, check.dt);
        t += check.dt;
        max_drift = max_drift.max(drift_percent(total_energy(&state, masses), initial_energy));
    }

    EnergyResult {
        initial_energy,
        max_drift_percent: max_drift,
        final_drift_percent: drift_percent(total_energy(&state, masses), initial_energy),
    }
}

/// Finite-time Lyapunov exponent estimated from a trajectory whose first
/// coordinate is offset by `perturbation`.
///
/// Returns 0 when either separation is zero.
pub fn lyapunov_estimate(config: &OrbitConfig, check: &StabilityCheck) -> f64 {
    let masses = &config.masses;
    let mut state = dynamics::initial_state(config);
    let mut perturbed = state;
    perturbed[0] += check.perturbation;

    let initial_separation = state_distance(&state, &perturbed);

    let mut t = 0.0;
    while t < check.total_time {
        state = rk4_step(&state, masses, check.dt);
        perturbed = rk4_step(&perturbed, masses, check.dt);
        t += check.dt;
    }

    let final_separation = state_distance(&state, &perturbed);
    if final_separation > 0.0 && initial_separation > 0.0 {
        (final_separation / initial_separation).ln() / check.total_time
    } else {
        0.0
    }
}

/// Run every check on one orbit.
pub fn analyze(key: &str, config: &OrbitConfig, settings: &AnalysisSettings) -> OrbitReport {
    log::debug!("analysing orbit '{key}'");
    let period = find_period(config, &settings.period);
    let energy = energy_conservation(config, &settings.energy);
    let lyapunov = lyapunov_estimate(config, &settings.stability);

    let report = OrbitReport {
        key: key.to_string(),
        name: config.name.clone(),
        period,
        energy,
        lyapunov,
    };
    log::info!(
        "{key}: period={:?} drift={:.6}% lyapunov={:.6}",
        report.period.period,
        report.energy.max_drift_percent,
        report.lyapunov
    );
    report
}
