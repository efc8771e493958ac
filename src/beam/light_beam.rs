use crate::beam::TraceSettings;
use crate::beam::tracer::propagate;
use crate::geometry::Axis;
use crate::math::{Point2, Vector2};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A traced light beam: its emission parameters and resulting polyline
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct LightBeam {
    /// Where the beam leaves its source
    pub emission_point: Point2,

    /// Unit emission direction
    pub direction: Vector2,

    /// Total length budget of the beam
    pub max_length: f64,

    /// `[emission_point, bounce1, ..., endpoint]`
    pub path: Vec<Point2>,

    /// Number of mirror hits along the path
    pub bounces: usize,
}

impl LightBeam {
    /// Traces a beam through `mirrors`. The direction is normalized here.
    pub fn trace<'a>(
        emission_point: Point2,
        direction: Vector2,
        mirrors: impl IntoIterator<Item = &'a Axis> + Clone,
        max_length: f64,
        settings: &TraceSettings,
    ) -> Self {
        let direction = direction.normalize();
        let (path, bounces) = propagate(emission_point, direction, mirrors, max_length, settings);
        Self {
            emission_point,
            direction,
            max_length,
            path,
            bounces,
        }
    }

    /// A straight, unreflected beam from `from` to `to`
    pub fn straight(from: Point2, to: Point2) -> Self {
        Self {
            emission_point: from,
            direction: (to - from).normalize(),
            max_length: from.distance(&to),
            path: vec![from, to],
            bounces: 0,
        }
    }

    /// Last point of the path
    #[inline]
    pub fn endpoint(&self) -> Point2 {
        self.path.last().copied().unwrap_or(self.emission_point)
    }

    #[inline]
    pub fn bounce_count(&self) -> usize {
        self.bounces
    }

    /// Consecutive `(start, end)` pairs of the polyline
    pub fn segments(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        self.path.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Sum of the segment lengths
    pub fn traveled_length(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance(&b)).sum()
    }
}
