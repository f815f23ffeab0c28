use three_body::analysis::{
    self, EnergyRating, StabilityRating, energy_conservation, find_period, lyapunov_estimate,
};
use three_body::catalog::{builtin, experimental};
use three_body::config::{AnalysisSettings, EnergyCheck, PeriodSearch, StabilityCheck};
use three_body::OrbitConfig;

fn coarse_search(max_time: f64) -> PeriodSearch {
    PeriodSearch {
        dt: 0.001,
        max_time,
        threshold: 0.01,
        transient: 1.0,
    }
}

#[test]
fn figure_eight_period_is_found() {
    let config = builtin().get("figureEight").unwrap();
    let result = find_period(config, &coarse_search(10.0));
    let period = result.period.expect("figure eight should close within 10 time units");
    assert!((period - 6.32).abs() < 0.05, "period {period}");
    assert!(result.min_return_distance < 0.01);
    assert!(result.energy_drift_percent < 0.01);
}

#[test]
fn short_search_reports_closest_approach_only() {
    let config = builtin().get("moth").unwrap();
    let result = find_period(config, &coarse_search(5.0));
    assert_eq!(result.period, None);
    assert!(result.min_return_distance.is_finite());
    assert!(result.min_return_distance > 0.01);
}

#[test]
fn validated_orbits_conserve_energy() {
    let check = EnergyCheck {
        dt: 0.001,
        total_time: 5.0,
    };
    for key in ["figureEight", "euler", "hierarchical"] {
        let result = energy_conservation(builtin().get(key).unwrap(), &check);
        assert!(result.initial_energy < 0.0, "{key}");
        assert!(result.max_drift_percent < 0.01, "{key}: {}", result.max_drift_percent);
        assert!(result.final_drift_percent <= result.max_drift_percent);
        assert_eq!(
            EnergyRating::from_drift_percent(result.max_drift_percent),
            EnergyRating::Excellent
        );
    }
}

#[test]
fn butterfly_drifts_at_the_default_step() {
    let check = EnergyCheck {
        dt: 0.001,
        total_time: 10.0,
    };
    let result = energy_conservation(experimental().get("butterflyI").unwrap(), &check);
    assert_eq!(
        EnergyRating::from_drift_percent(result.max_drift_percent),
        EnergyRating::Warning
    );
}

#[test]
fn lyapunov_estimate_is_finite() {
    let check = StabilityCheck {
        dt: 0.001,
        total_time: 2.0,
        perturbation: 1e-8,
    };
    for key in ["figureEight", "moth"] {
        let lambda = lyapunov_estimate(builtin().get(key).unwrap(), &check);
        assert!(lambda.is_finite(), "{key}: {lambda}");
    }
}

#[test]
fn analyze_builds_a_serializable_summary() {
    let settings = AnalysisSettings {
        period: coarse_search(10.0),
        energy: EnergyCheck {
            dt: 0.001,
            total_time: 2.0,
        },
        stability: StabilityCheck {
            dt: 0.001,
            total_time: 2.0,
            perturbation: 1e-8,
        },
    };
    let config = OrbitConfig::choreography("Custom", 0.347111, 0.532728);
    let report = analysis::analyze("custom", &config, &settings);
    assert!(report.is_periodic());
    assert_eq!(report.energy_rating(), EnergyRating::Excellent);
    assert_eq!(
        report.stability_rating(),
        StabilityRating::from_lyapunov(report.lyapunov)
    );

    let summary = report.to_summary();
    assert_eq!(summary.key, "custom");
    assert_eq!(summary.name, "Custom");
    assert!(summary.periodic);
    assert_eq!(summary.energy_rating, "EXCELLENT");
    assert_eq!(summary.period, report.period.period);
}
