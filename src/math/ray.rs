use crate::math::{Point2, Vector2};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Half-line used to cast light beams through the mirror set
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Ray {
    /// Origin of the ray
    pub origin: Point2,

    /// Direction of the ray (not necessarily normalized)
    pub direction: Vector2,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    #[inline]
    pub fn new(origin: Point2, direction: Vector2) -> Self {
        Self { origin, direction }
    }

    /// Creates a new ray with the given origin and direction, ensuring the direction is normalized
    #[inline]
    pub fn new_normalized(origin: Point2, direction: Vector2) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Returns the point at a given distance along the ray
    #[inline]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.origin + self.direction * t
    }

    /// Moves the origin forward to `point` and replaces the direction
    #[inline]
    pub fn redirect(&mut self, point: Point2, direction: Vector2) {
        self.origin = point;
        self.direction = direction;
    }

    /// Returns the closest point on the ray to a given point
    pub fn closest_point(&self, point: Point2) -> Point2 {
        let dir = self.direction.normalize();
        let project_length = (point - self.origin).dot(&dir);

        if project_length < 0.0 {
            return self.origin;
        }

        self.origin + dir * project_length
    }

    /// Returns the distance from the ray to a point
    #[inline]
    pub fn distance_to_point(&self, point: Point2) -> f64 {
        self.closest_point(point).distance(&point)
    }
}
