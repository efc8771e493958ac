use crate::beam::{trace_path, LightBeam, TraceSettings};
use crate::geometry::Axis;
use crate::math::{Point2, Vector2};
use crate::scene::Polygon;

/// Default distance within which a real projection counts as reaching the viewer
pub const DEFAULT_PROJECTION_TOLERANCE: f64 = 10.0;

/// Where and how a real projection beam is emitted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionEmission {
    pub point: Point2,

    /// Unit direction
    pub direction: Vector2,

    /// Beam length, equal to the unfolded virtual-to-viewer distance
    pub length: f64,
}

/// Straight beam from the virtual polygon's centroid to the viewer
pub fn virtual_projection(virtual_polygon: &Polygon, viewer: Point2) -> LightBeam {
    LightBeam::straight(virtual_polygon.centroid(), viewer)
}

/// Finds the emission direction for a beam leaving `real_centroid` that
/// reaches `viewer` through the same mirrors the virtual image was seen in.
///
/// A ray is cast backwards from the viewer toward `virtual_centroid`; the
/// direction of its final segment, reversed, is the emission direction. The
/// length is the straight viewer-to-image distance, which reflection preserves.
/// Returns `None` if the viewer sits on the image or the trace collapses.
pub fn real_projection_emission<'a>(
    virtual_centroid: Point2,
    real_centroid: Point2,
    viewer: Point2,
    mirrors: impl IntoIterator<Item = &'a Axis> + Clone,
    settings: &TraceSettings,
) -> Option<ProjectionEmission> {
    let length = viewer.distance(&virtual_centroid);
    if length == 0.0 {
        return None;
    }

    let backward = trace_path(
        viewer,
        (virtual_centroid - viewer).normalize(),
        mirrors,
        length,
        settings,
    );

    let [.., before_last, last] = backward.as_slice() else {
        return None;
    };
    let final_segment = *last - *before_last;
    if final_segment.length() == 0.0 {
        return None;
    }

    Some(ProjectionEmission {
        point: real_centroid,
        direction: -final_segment.normalize(),
        length,
    })
}

/// Beam leaving the real polygon and bouncing toward the viewer.
///
/// The result is not validated; see [`is_valid_projection`].
pub fn real_projection<'a>(
    virtual_polygon: &Polygon,
    real_polygon: &Polygon,
    viewer: Point2,
    mirrors: impl IntoIterator<Item = &'a Axis> + Clone,
    settings: &TraceSettings,
) -> Option<LightBeam> {
    let emission = real_projection_emission(
        virtual_polygon.centroid(),
        real_polygon.centroid(),
        viewer,
        mirrors.clone(),
        settings,
    )?;

    Some(LightBeam::trace(
        emission.point,
        emission.direction,
        mirrors,
        emission.length,
        settings,
    ))
}

/// A beam is valid when its endpoint lands within `tolerance` of the viewer
#[inline]
pub fn is_valid_projection(beam: &LightBeam, viewer: Point2, tolerance: f64) -> bool {
    beam.endpoint().distance(&viewer) <= tolerance
}
