use crate::geometry::Axis;
use crate::math::{Point2, Vector2};

/// Mirrors `point` across the infinite line through `axis`.
///
/// The point is projected onto the line with `t = ((point - p1) · d) / |d|²`,
/// and the image is `2 · closest - point`. A degenerate axis leaves the point
/// unchanged.
pub fn reflect_point_over_axis(point: Point2, axis: &Axis) -> Point2 {
    let d = axis.direction();
    let len_sq = d.length_squared();
    if len_sq == 0.0 {
        return point;
    }

    let t = (point - axis.p1).dot(&d) / len_sq;
    let closest = axis.p1 + d * t;
    closest * 2.0 - point
}

/// Mirrors every vertex of a polygon, preserving vertex order and count
pub fn reflect_polygon_over_axis(vertices: &[Point2], axis: &Axis) -> Vec<Point2> {
    vertices
        .iter()
        .map(|&vertex| reflect_point_over_axis(vertex, axis))
        .collect()
}

/// Mirrors a direction (not a position) across the line direction of `axis`.
///
/// Used to bend a ray after it bounces off a mirror: `v' = v - 2(v · n)n` with
/// `n` the unit normal of the axis. A degenerate axis yields a zero normal,
/// so the vector comes back unchanged.
pub fn reflect_vector_over_axis(vector: Vector2, axis: &Axis) -> Vector2 {
    let normal = axis.direction().perpendicular().normalize();
    vector - normal * (2.0 * vector.dot(&normal))
}
