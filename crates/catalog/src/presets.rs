//! Preset tables backing [`crate::builtin`] and [`crate::experimental`].
//!
//! Choreography coefficients are the initial velocities `(vx, vy)` of the
//! Šuvakov–Dmitrašinović collinear seed (see [`OrbitConfig::choreography`]).

use three_body_core::constants::G;

use crate::OrbitConfig;

/// Tangential velocity excess applied to the Euler collinear orbit.
pub const EULER_VELOCITY_SCALE: f64 = 1.20;
/// Spacing between neighbouring bodies in the Euler configuration.
pub const EULER_SPACING: f64 = 1.0;
/// Mass of every body in the Euler configuration.
pub const EULER_MASS: f64 = 1.0;

/// Angular velocity of the rigidly rotating equal-mass collinear solution:
/// ω = sqrt(G·m·5 / (4·d³)).
pub fn euler_angular_velocity(mass: f64, spacing: f64) -> f64 {
    (G * mass * 5.0 / (4.0 * spacing.powi(3))).sqrt()
}

/// Pulsating Euler collinear orbit: the outer bodies start with 20% more than
/// the circular tangential speed.
pub fn euler() -> OrbitConfig {
    let omega = euler_angular_velocity(EULER_MASS, EULER_SPACING);
    let v = omega * EULER_SPACING * EULER_VELOCITY_SCALE;
    OrbitConfig {
        name: "Euler Collinear".to_string(),
        masses: [EULER_MASS; 3],
        positions: [[-EULER_SPACING, 0.0], [0.0, 0.0], [EULER_SPACING, 0.0]],
        velocities: [[0.0, -v], [0.0, 0.0], [0.0, v]],
    }
}

/// Tight equal-mass binary (separation 0.5) with a light companion at
/// distance 4 from the binary barycenter, zero total momentum.
pub fn hierarchical() -> OrbitConfig {
    OrbitConfig {
        name: "Hierarchical Triple".to_string(),
        masses: [1.0, 1.0, 0.5],
        positions: [[-1.05, 0.0], [-0.55, 0.0], [3.2, 0.0]],
        velocities: [[0.0, -1.158114], [0.0, 0.841886], [0.0, 0.632456]],
    }
}

pub(crate) fn validated() -> Vec<(String, OrbitConfig)> {
    vec![
        (
            "figureEight".to_string(),
            OrbitConfig::choreography("Figure Eight", 0.347111, 0.532728),
        ),
        (
            "moth".to_string(),
            OrbitConfig::choreography("Moth I", 0.464445, 0.396060),
        ),
        (
            "mothII".to_string(),
            OrbitConfig::choreography("Moth II", 0.439166, 0.452968),
        ),
        ("hierarchical".to_string(), hierarchical()),
        ("euler".to_string(), euler()),
    ]
}

// Close encounters in these families need a much smaller step than the default.
pub(crate) fn experimental() -> Vec<(String, OrbitConfig)> {
    [
        ("butterflyI", "Butterfly I", 0.306893, 0.125507),
        ("butterflyII", "Butterfly II", 0.392955, 0.097579),
        ("butterflyIII", "Butterfly III", 0.405916, 0.230163),
        ("mothIII", "Moth III", 0.383444, 0.377364),
        ("goggles", "Goggles", 0.083300, 0.127889),
        ("yinYangIa", "Yin-Yang Ia", 0.513938, 0.304736),
        ("yinYangIb", "Yin-Yang Ib", 0.282699, 0.327209),
    ]
    .into_iter()
    .map(|(key, name, vx, vy)| (key.to_string(), OrbitConfig::choreography(name, vx, vy)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euler_omega_matches_closed_form() {
        let omega = euler_angular_velocity(1.0, 1.0);
        assert!((omega - 1.25f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn hierarchical_is_in_barycentric_frame() {
        let cfg = hierarchical();
        let p = cfg.net_momentum();
        assert!(p[0].abs() < 1e-6 && p[1].abs() < 1e-6, "momentum {p:?}");
        let com_x: f64 = cfg
            .masses
            .iter()
            .zip(cfg.positions.iter())
            .map(|(m, x)| m * x[0])
            .sum::<f64>()
            / cfg.total_mass();
        assert!(com_x.abs() < 1e-12);
    }
}
