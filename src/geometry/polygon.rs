use crate::math::{Point2, Vector2};

/// Arithmetic mean of the vertices. An empty slice yields the origin.
pub fn centroid(vertices: &[Point2]) -> Point2 {
    if vertices.is_empty() {
        return Point2::zero();
    }

    let sum = vertices
        .iter()
        .fold(Vector2::zero(), |acc, &vertex| acc + vertex);
    sum / vertices.len() as f64
}

/// Even-odd point-in-polygon test
pub fn contains_point(vertices: &[Point2], point: Point2) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Shifts every vertex by `offset`
pub fn translate(vertices: &mut [Point2], offset: Vector2) {
    for vertex in vertices.iter_mut() {
        *vertex += offset;
    }
}
