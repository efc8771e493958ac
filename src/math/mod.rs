mod vector;
mod ray;

pub use vector::{Vector2, Point2, normalize, length, dot, distance};
pub use ray::Ray;

/// Constant for a very small number, used for comparisons
pub const EPSILON: f64 = 1.0e-9;

/// Determinant magnitude below which a ray and a segment are treated as parallel
pub const PARALLEL_EPSILON: f64 = 1.0e-10;

/// Returns true if the two floating point values are approximately equal
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Returns true if the value is approximately zero
#[inline]
pub fn approx_zero(a: f64) -> bool {
    a.abs() < EPSILON
}

/// Clamps a value between a minimum and maximum value
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}
