use log::trace;

use crate::geometry::{ray_to_line_intersection, reflect_vector_over_axis, Axis};
use crate::math::{Point2, Ray, Vector2};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Number of bounces traced when the caller does not say otherwise
pub const DEFAULT_MAX_REFLECTIONS: usize = 10;

/// Hits closer than this to the current point are ignored, so a ray does not
/// immediately re-hit the mirror it just bounced off
pub const SELF_INTERSECTION_EPSILON: f64 = 0.1;

/// Tunables for the ray tracer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct TraceSettings {
    /// Maximum number of mirror bounces
    pub max_reflections: usize,

    /// Minimum distance a ray must travel before it can hit a mirror again
    pub self_intersection_epsilon: f64,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            max_reflections: DEFAULT_MAX_REFLECTIONS,
            self_intersection_epsilon: SELF_INTERSECTION_EPSILON,
        }
    }
}

/// Traces a beam through `mirrors` and returns its polyline.
///
/// `direction` must already be normalized. The path starts at `emission_point`
/// and holds between 2 and `max_reflections + 1` points. When two mirrors are
/// hit at exactly the same distance, the first one in iteration order wins.
pub fn calculate_reflection_path<'a>(
    emission_point: Point2,
    direction: Vector2,
    mirrors: impl IntoIterator<Item = &'a Axis> + Clone,
    max_length: f64,
    max_reflections: usize,
) -> Vec<Point2> {
    let settings = TraceSettings {
        max_reflections,
        ..TraceSettings::default()
    };
    trace_path(emission_point, direction, mirrors, max_length, &settings)
}

/// [`calculate_reflection_path`] with explicit settings
pub fn trace_path<'a>(
    emission_point: Point2,
    direction: Vector2,
    mirrors: impl IntoIterator<Item = &'a Axis> + Clone,
    max_length: f64,
    settings: &TraceSettings,
) -> Vec<Point2> {
    propagate(emission_point, direction, mirrors, max_length, settings).0
}

/// Runs the bounce loop, returning the path and the number of mirror hits
pub(crate) fn propagate<'a>(
    emission_point: Point2,
    direction: Vector2,
    mirrors: impl IntoIterator<Item = &'a Axis> + Clone,
    max_length: f64,
    settings: &TraceSettings,
) -> (Vec<Point2>, usize) {
    let mut path = Vec::with_capacity(settings.max_reflections + 2);
    path.push(emission_point);

    let mut ray = Ray::new(emission_point, direction);
    let mut remaining_length = max_length;
    let mut bounces = 0;

    while bounces < settings.max_reflections {
        let closest = closest_hit(&ray, mirrors.clone(), settings.self_intersection_epsilon);

        match closest {
            Some((hit, distance, axis)) if distance <= remaining_length => {
                bounces += 1;
                trace!("bounce {} at {} after {:.3} units", bounces, hit, distance);
                path.push(hit);
                let reflected = reflect_vector_over_axis(ray.direction, axis);
                ray.redirect(hit, reflected);
                remaining_length -= distance;
            }
            _ => {
                path.push(ray.point_at(remaining_length));
                return (path, bounces);
            }
        }
    }

    // zero bounces allowed still yields a straight beam
    if path.len() < 2 {
        path.push(ray.point_at(remaining_length));
    }

    (path, bounces)
}

/// Nearest hit along `ray` that is at least `epsilon` away from its origin
fn closest_hit<'a>(
    ray: &Ray,
    mirrors: impl IntoIterator<Item = &'a Axis>,
    epsilon: f64,
) -> Option<(Point2, f64, &'a Axis)> {
    let mut closest: Option<(Point2, f64, &'a Axis)> = None;

    for axis in mirrors {
        let Some(hit) = ray_to_line_intersection(ray.origin, ray.direction, axis) else {
            continue;
        };

        let distance = ray.origin.distance(&hit);
        if distance < epsilon {
            continue;
        }

        if closest.map_or(true, |(_, best, _)| distance < best) {
            closest = Some((hit, distance, axis));
        }
    }

    closest
}
