//! Core constants and shared primitives for the three-body workspace.

/// Normalized physical and numerical constants.
pub mod constants {
    /// Gravitational constant in normalized units.
    pub const G: f64 = 1.0;
    /// Number of bodies in every simulation.
    pub const BODY_COUNT: usize = 3;
    /// Components per body in the packed state: x, y, vx, vy.
    pub const COMPONENTS_PER_BODY: usize = 4;
    /// Length of the packed state vector.
    pub const STATE_LEN: usize = BODY_COUNT * COMPONENTS_PER_BODY;
    /// Default fixed integration step in simulation time units.
    pub const DEFAULT_STEP: f64 = 0.001;
}

/// Minimal planar vector helpers to avoid ad-hoc `[f64; 2]` math everywhere.
pub mod vector {
    /// Alias for a 2D vector (position or velocity depending on context).
    pub type Vector2 = [f64; 2];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector2) -> f64 {
        dot(v, v).sqrt()
    }

    /// Squared Euclidean norm.
    #[inline]
    pub fn norm_squared(v: &Vector2) -> f64 {
        dot(v, v)
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector2, b: &Vector2) -> f64 {
        a[0] * b[0] + a[1] * b[1]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector2, b: &Vector2) -> Vector2 {
        [a[0] + b[0], a[1] + b[1]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector2, b: &Vector2) -> Vector2 {
        [a[0] - b[0], a[1] - b[1]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector2, s: f64) -> Vector2 {
        [v[0] * s, v[1] * s]
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(a: &Vector2, b: &Vector2) -> f64 {
        norm(&sub(a, b))
    }

    /// True when both components are finite.
    #[inline]
    pub fn is_finite(v: &Vector2) -> bool {
        v[0].is_finite() && v[1].is_finite()
    }
}
