use nalgebra::{Matrix2, Vector2 as NaVector2};

use crate::geometry::Axis;
use crate::math::{Point2, Vector2, PARALLEL_EPSILON};

/// A bounded ray/segment intersection with its solved parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The intersection point
    pub point: Point2,

    /// Parameter along the ray (`start + u · direction`)
    pub u: f64,

    /// Fraction along the mirror segment, in `[0, 1]`
    pub v: f64,
}

/// Solves `start + u · direction = p1 + v · d` for a ray against the finite
/// segment of `axis`.
///
/// Returns `None` when the ray is parallel to the segment, when the hit lies
/// behind the ray origin, or when it falls outside the segment.
pub fn ray_to_line_hit(ray_start: Point2, ray_direction: Vector2, axis: &Axis) -> Option<RayHit> {
    let d = axis.direction();

    // columns: ray direction, negated segment direction
    let system = Matrix2::new(
        ray_direction.x, -d.x,
        ray_direction.y, -d.y,
    );

    let det = system.determinant();
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }

    let rhs = NaVector2::new(axis.p1.x - ray_start.x, axis.p1.y - ray_start.y);

    // Cramer's rule
    let u = (rhs.x * system[(1, 1)] - system[(0, 1)] * rhs.y) / det;
    let v = (system[(0, 0)] * rhs.y - rhs.x * system[(1, 0)]) / det;

    if u < 0.0 || !(0.0..=1.0).contains(&v) {
        return None;
    }

    Some(RayHit {
        point: ray_start + ray_direction * u,
        u,
        v,
    })
}

/// Bounded ray/segment intersection point, see [`ray_to_line_hit`]
#[inline]
pub fn ray_to_line_intersection(ray_start: Point2, ray_direction: Vector2, axis: &Axis) -> Option<Point2> {
    ray_to_line_hit(ray_start, ray_direction, axis).map(|hit| hit.point)
}
