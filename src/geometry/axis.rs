use crate::math::{Point2, Vector2};
use crate::geometry::reflect_point_over_axis;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// The line segment carried by a mirror.
///
/// Ray intersection only considers the finite segment between `p1` and `p2`,
/// while point and vector reflection treat it as an infinite line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Axis {
    /// First endpoint (`x1`, `y1`)
    pub p1: Point2,

    /// Second endpoint (`x2`, `y2`)
    pub p2: Point2,
}

impl Axis {
    /// Creates an axis from its two endpoints
    #[inline]
    pub fn new(p1: Point2, p2: Point2) -> Self {
        Self { p1, p2 }
    }

    /// Creates an axis from raw endpoint coordinates
    #[inline]
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    /// Direction vector `p2 - p1`
    #[inline]
    pub fn direction(&self) -> Vector2 {
        self.p2 - self.p1
    }

    /// True when both endpoints coincide, in which case no line is defined
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.p1.x == self.p2.x && self.p1.y == self.p2.y
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    #[inline]
    pub fn midpoint(&self) -> Point2 {
        self.p1.lerp(&self.p2, 0.5)
    }

    /// Shifts both endpoints by `offset`
    #[inline]
    pub fn translate(&mut self, offset: Vector2) {
        self.p1 += offset;
        self.p2 += offset;
    }

    /// Returns this segment mirrored across the infinite line of `other`
    #[inline]
    pub fn reflected_over(&self, other: &Axis) -> Self {
        Self::new(
            reflect_point_over_axis(self.p1, other),
            reflect_point_over_axis(self.p2, other),
        )
    }

    /// Distance from `point` to the finite segment
    pub fn distance_to_point(&self, point: Point2) -> f64 {
        let d = self.direction();
        let len_sq = d.length_squared();
        if len_sq == 0.0 {
            return self.p1.distance(&point);
        }
        let t = crate::math::clamp((point - self.p1).dot(&d) / len_sq, 0.0, 1.0);
        (self.p1 + d * t).distance(&point)
    }
}

impl From<[f64; 4]> for Axis {
    #[inline]
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self::from_coords(x1, y1, x2, y2)
    }
}
