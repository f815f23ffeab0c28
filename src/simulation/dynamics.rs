//! Newtonian point-mass dynamics on the packed three-body state.
//!
//! The state is a flat `[f64; 12]` holding `(x, y, vx, vy)` for each body in
//! catalog order. Every function here is pure: masses are parameters, not part
//! of the integrated state.

use three_body_catalog::OrbitConfig;
use three_body_core::constants::{BODY_COUNT, COMPONENTS_PER_BODY, G, STATE_LEN};
use three_body_core::vector::{self, Vector2};

/// Packed `(x, y, vx, vy)` per body.
pub type StateVector = [f64; STATE_LEN];

/// Body masses in catalog order.
pub type Masses = [f64; BODY_COUNT];

#[inline]
fn base(body: usize) -> usize {
    body * COMPONENTS_PER_BODY
}

/// Position of `body` in the packed state.
#[inline]
pub fn position(state: &StateVector, body: usize) -> Vector2 {
    let i = base(body);
    [state[i], state[i + 1]]
}

/// Velocity of `body` in the packed state.
#[inline]
pub fn velocity(state: &StateVector, body: usize) -> Vector2 {
    let i = base(body);
    [state[i + 2], state[i + 3]]
}

/// Pack a config's initial positions and velocities.
pub fn initial_state(config: &OrbitConfig) -> StateVector {
    let mut state = [0.0; STATE_LEN];
    for body in 0..BODY_COUNT {
        let i = base(body);
        state[i] = config.positions[body][0];
        state[i + 1] = config.positions[body][1];
        state[i + 2] = config.velocities[body][0];
        state[i + 3] = config.velocities[body][1];
    }
    state
}

/// Time derivative of the packed state.
///
/// Position derivatives copy the velocities; velocity derivatives are the summed
/// pairwise accelerations `G m_j (p_j - p_i) / |p_j - p_i|^3`. No softening is
/// applied, so coincident bodies produce non-finite output.
pub fn derivatives(state: &StateVector, masses: &Masses) -> StateVector {
    let mut ds = [0.0; STATE_LEN];

    for i in 0..BODY_COUNT {
        let bi = base(i);
        ds[bi] = state[bi + 2];
        ds[bi + 1] = state[bi + 3];

        let (xi, yi) = (state[bi], state[bi + 1]);
        let mut ax = 0.0;
        let mut ay = 0.0;
        for (j, mass_j) in masses.iter().enumerate() {
            if j == i {
                continue;
            }
            let bj = base(j);
            let dx = state[bj] - xi;
            let dy = state[bj + 1] - yi;
            let r2 = dx * dx + dy * dy;
            let r = r2.sqrt();
            let f = G * mass_j / (r2 * r);
            ax += f * dx;
            ay += f * dy;
        }
        ds[bi + 2] = ax;
        ds[bi + 3] = ay;
    }

    ds
}

/// `state + h * k`, component-wise.
#[inline]
fn offset(state: &StateVector, k: &StateVector, h: f64) -> StateVector {
    let mut out = *state;
    for (o, d) in out.iter_mut().zip(k.iter()) {
        *o += h * d;
    }
    out
}

/// One classical fourth-order Runge-Kutta step of size `dt` over the whole state.
pub fn rk4_step(state: &StateVector, masses: &Masses, dt: f64) -> StateVector {
    let half_dt = 0.5 * dt;

    let k1 = derivatives(state, masses);
    let k2 = derivatives(&offset(state, &k1, half_dt), masses);
    let k3 = derivatives(&offset(state, &k2, half_dt), masses);
    let k4 = derivatives(&offset(state, &k3, dt), masses);

    let sixth = dt / 6.0;
    let mut next = *state;
    for n in 0..STATE_LEN {
        next[n] += sixth * (k1[n] + 2.0 * k2[n] + 2.0 * k3[n] + k4[n]);
    }
    next
}

/// Kinetic plus potential energy; each pair contributes `-G m_i m_j / r_ij` once.
pub fn total_energy(state: &StateVector, masses: &Masses) -> f64 {
    let mut kinetic = 0.0;
    let mut potential = 0.0;

    for i in 0..BODY_COUNT {
        let v = velocity(state, i);
        kinetic += 0.5 * masses[i] * vector::norm_squared(&v);

        let pi = position(state, i);
        for j in (i + 1)..BODY_COUNT {
            let pj = position(state, j);
            let r = vector::distance(&pi, &pj);
            potential -= G * masses[i] * masses[j] / r;
        }
    }

    kinetic + potential
}

/// Euclidean distance between two full states (positions and velocities).
pub fn state_distance(a: &StateVector, b: &StateVector) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Euclidean distance over the position components only.
pub fn position_distance(a: &StateVector, b: &StateVector) -> f64 {
    (0..BODY_COUNT)
        .map(|body| {
            vector::norm_squared(&vector::sub(&position(a, body), &position(b, body)))
        })
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_close_one_far() -> (StateVector, Masses) {
        let config = OrbitConfig {
            name: "pair".to_string(),
            masses: [2.0, 3.0, 1.0],
            positions: [[-0.5, 0.0], [0.5, 0.0], [0.0, 100.0]],
            velocities: [[0.0, 0.1], [0.0, -0.2], [0.3, 0.0]],
        };
        (initial_state(&config), config.masses)
    }

    #[test]
    fn position_derivative_copies_velocity() {
        let (state, masses) = two_close_one_far();
        let ds = derivatives(&state, &masses);
        for body in 0..BODY_COUNT {
            assert_eq!(position(&ds, body), velocity(&state, body));
        }
    }

    #[test]
    fn forces_conserve_momentum() {
        let (state, masses) = two_close_one_far();
        let ds = derivatives(&state, &masses);
        let mut net = [0.0, 0.0];
        for body in 0..BODY_COUNT {
            let a = velocity(&ds, body);
            net[0] += masses[body] * a[0];
            net[1] += masses[body] * a[1];
        }
        assert!(net[0].abs() < 1e-12 && net[1].abs() < 1e-12, "net {net:?}");
    }

    #[test]
    fn acceleration_points_toward_partner() {
        let (state, masses) = two_close_one_far();
        let ds = derivatives(&state, &masses);
        // body 0 at x=-0.5 is pulled toward +x by body 1
        assert!(velocity(&ds, 0)[0] > 0.0);
        assert!(velocity(&ds, 1)[0] < 0.0);
    }

    #[test]
    fn coincident_bodies_are_not_finite() {
        let config = OrbitConfig::choreography("collide", 0.0, 0.0);
        let mut state = initial_state(&config);
        state[4] = state[0];
        state[5] = state[1];
        let ds = derivatives(&state, &config.masses);
        assert!(ds.iter().any(|v| !v.is_finite()));
    }

    #[test]
    fn energy_of_static_pair() {
        let config = OrbitConfig {
            name: "static".to_string(),
            masses: [1.0, 1.0, 1.0],
            positions: [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
            velocities: [[0.0, 0.0]; 3],
        };
        let energy = total_energy(&initial_state(&config), &config.masses);
        let expected = -(1.0 + 1.0 + 1.0 / 2f64.sqrt());
        assert!((energy - expected).abs() < 1e-12);
    }
}
