use three_body::catalog::builtin;
use three_body::simulation::dynamics::position_distance;
use three_body::{CatalogError, Simulation};

const MOTH_PERIOD: f64 = 14.8939;

#[test]
fn identical_runs_are_bitwise_identical() {
    for key in builtin().keys() {
        let mut a = Simulation::new(key).unwrap();
        let mut b = Simulation::new(key).unwrap();
        for _ in 0..500 {
            a.step();
            b.step();
        }
        a.advance(0.37);
        b.advance(0.37);
        assert_eq!(a.state(), b.state(), "{key}");
        assert_eq!(a.time(), b.time(), "{key}");
    }
}

#[test]
fn advance_credits_exactly_the_requested_time() {
    let mut sim = Simulation::new("moth").unwrap();
    sim.advance(0.123_456_7);
    assert_eq!(sim.time(), 0.123_456_7);

    let mut expected = sim.time();
    for total in [0.016, 0.5, 0.0004, 1.25] {
        sim.advance(total);
        expected += total;
        assert!((sim.time() - expected).abs() < 1e-12);
    }
}

#[test]
fn step_uses_default_step_and_step_by_overrides_it() {
    let mut sim = Simulation::new("figureEight").unwrap();
    sim.step();
    assert_eq!(sim.time(), 0.001);
    sim.step_by(0.01);
    assert!((sim.time() - 0.011).abs() < 1e-15);

    let mut custom = Simulation::new("figureEight").unwrap().with_default_step(0.005);
    assert_eq!(custom.default_step(), 0.005);
    custom.step();
    assert_eq!(custom.time(), 0.005);
}

#[test]
fn non_positive_spans_leave_state_untouched() {
    let mut sim = Simulation::new("moth").unwrap();
    let before = *sim.state();
    sim.step_by(0.0);
    sim.step_by(-0.01);
    sim.advance(0.0);
    sim.advance(-1.0);
    sim.advance(f64::NAN);
    assert_eq!(sim.state(), &before);
    assert_eq!(sim.time(), 0.0);

    let sim = Simulation::new("moth").unwrap().with_default_step(-1.0);
    assert_eq!(sim.default_step(), 0.001);
}

#[test]
fn advance_by_a_multiple_of_the_step_matches_repeated_steps() {
    let mut stepped = Simulation::new("mothII").unwrap();
    let mut advanced = Simulation::new("mothII").unwrap();
    for _ in 0..1000 {
        stepped.step();
    }
    advanced.advance(1.0);
    assert_eq!(stepped.state(), advanced.state());
    assert_eq!(advanced.time(), 1.0);
}

#[test]
fn advance_with_uneven_span_only_shifts_results_slightly() {
    // 0.0105 / 0.001 rounds up to 11 sub-steps of ~0.000955 instead of 10.5 default steps
    let mut stepped = Simulation::new("moth").unwrap();
    let mut advanced = Simulation::new("moth").unwrap();
    for _ in 0..10 {
        stepped.step();
    }
    stepped.step_by(0.0005);
    advanced.advance(0.0105);

    assert_ne!(stepped.state(), advanced.state());
    assert!(position_distance(stepped.state(), advanced.state()) < 1e-9);
}

#[test]
fn reset_restores_the_initial_state() {
    for key in builtin().keys() {
        let fresh = Simulation::new(key).unwrap();
        let mut sim = Simulation::new(key).unwrap();
        for _ in 0..250 {
            sim.step();
        }
        sim.advance(0.75);
        sim.reset(None).unwrap();
        assert_eq!(sim.state(), fresh.state(), "{key}");
        assert_eq!(sim.time(), 0.0);
        assert_eq!(sim.key(), key);
    }
}

#[test]
fn reset_to_new_key_matches_fresh_construction() {
    let mut sim = Simulation::new("moth").unwrap();
    sim.advance(2.0);
    sim.reset(Some("hierarchical")).unwrap();

    let fresh = Simulation::new("hierarchical").unwrap();
    assert_eq!(sim.key(), "hierarchical");
    assert_eq!(sim.state(), fresh.state());
    assert_eq!(sim.masses(), &[1.0, 1.0, 0.5]);
    assert_eq!(sim.config().name, "Hierarchical Triple");
    assert_eq!(sim.time(), 0.0);
}

#[test]
fn unknown_keys_fail_without_partial_state() {
    match Simulation::new("nonexistent") {
        Err(CatalogError::UnknownConfigKey(key)) => assert_eq!(key, "nonexistent"),
        other => panic!("expected UnknownConfigKey, got {other:?}"),
    }

    let mut sim = Simulation::new("moth").unwrap();
    sim.advance(0.5);
    let before = *sim.state();
    let err = sim.reset(Some("nonexistent")).unwrap_err();
    assert_eq!(err, CatalogError::UnknownConfigKey("nonexistent".to_string()));
    assert_eq!(sim.state(), &before);
    assert_eq!(sim.key(), "moth");
    assert_eq!(sim.time(), 0.5);
}

#[test]
fn energy_is_conserved_for_validated_presets() {
    for key in ["moth", "mothII", "hierarchical"] {
        let mut sim = Simulation::new(key).unwrap();
        let initial = sim.total_energy();
        assert!(initial < 0.0, "{key} should be bound");
        for n in 1..=10_000 {
            sim.step();
            if n % 1_000 == 0 {
                let drift = ((sim.total_energy() - initial) / initial).abs();
                assert!(drift < 0.01, "{key}: drift {drift} after {n} steps");
            }
        }
        assert!(sim.is_finite());
    }
}

#[test]
fn total_energy_is_a_pure_read() {
    let mut sim = Simulation::new("euler").unwrap();
    sim.advance(0.2);
    let before = *sim.state();
    let e1 = sim.total_energy();
    let e2 = sim.total_energy();
    assert_eq!(e1, e2);
    assert_eq!(sim.state(), &before);
}

#[test]
fn moth_returns_to_its_start_after_one_period() {
    let mut sim = Simulation::new("moth").unwrap();
    let initial = *sim.state();
    sim.advance(MOTH_PERIOD);
    let distance = position_distance(sim.state(), &initial);
    assert!(distance < 0.01, "return distance {distance}");

    let start = Simulation::new("moth").unwrap().positions();
    for (now, then) in sim.positions().iter().zip(start.iter()) {
        assert!((now[0] - then[0]).abs() < 0.01 && (now[1] - then[1]).abs() < 0.01);
    }
}

#[test]
fn independent_simulations_share_the_catalog_across_threads() {
    let keys = builtin().keys();
    std::thread::scope(|scope| {
        let handles: Vec<_> = keys
            .iter()
            .map(|key| {
                scope.spawn(move || {
                    let mut sim = Simulation::new(key).unwrap();
                    sim.advance(0.5);
                    *sim.state()
                })
            })
            .collect();
        for (key, handle) in keys.iter().zip(handles) {
            let threaded = handle.join().unwrap();
            let mut local = Simulation::new(key).unwrap();
            local.advance(0.5);
            assert_eq!(&threaded, local.state(), "{key}");
        }
    });
}
