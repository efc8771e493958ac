//! Analytical geometry on mirror axes: reflections across a line and
//! bounded ray/segment intersection.

mod axis;
mod reflection;
mod intersection;
pub mod polygon;

pub use axis::Axis;
pub use reflection::{reflect_point_over_axis, reflect_polygon_over_axis, reflect_vector_over_axis};
pub use intersection::{ray_to_line_intersection, ray_to_line_hit, RayHit};
pub use polygon::{centroid, contains_point};
