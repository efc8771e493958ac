use crate::core::PolygonHandle;
use crate::error::OpticsError;
use crate::geometry::{self, Axis};
use crate::math::{Point2, Vector2};
use crate::scene::{MirrorRef, PolygonRef, ViewerRef};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Display attributes carried through for the renderer; geometry never reads them
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Style {
    /// Fill color, in whatever notation the renderer understands
    pub fill: Option<String>,

    /// Stroke color
    pub stroke: Option<String>,

    /// Stroke width in scene units
    pub stroke_width: f64,
}

impl Style {
    pub fn filled(fill: impl Into<String>) -> Self {
        Self {
            fill: Some(fill.into()),
            ..Self::default()
        }
    }

    pub fn stroked(stroke: impl Into<String>, stroke_width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke.into()),
            stroke_width,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
        }
    }
}

/// Provenance of a virtual object.
///
/// Only virtual objects carry this, so "is this virtual?" is a presence check.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ReflectionMetadata<R> {
    /// The object (real or virtual) that was reflected to produce this one
    pub source_object: R,

    /// For polygons, the real polygon at the root of the reflection chain
    pub source_real_object: Option<PolygonHandle>,

    /// The mirror this object was reflected across
    pub source_mirror: MirrorRef,

    /// Render opacity in `(0, 1]`
    pub opacity: f64,

    /// Number of reflections between this object and the real scene
    pub depth: u32,
}

/// A closed polygon, real or virtual
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Polygon {
    pub vertices: Vec<Point2>,
    pub style: Style,
    pub reflection: Option<ReflectionMetadata<PolygonRef>>,
}

impl Polygon {
    /// Creates a real polygon. At least three vertices are required.
    pub fn new(vertices: Vec<Point2>, style: Style) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(OpticsError::InvalidParameter(format!(
                "a polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }

        Ok(Self {
            vertices,
            style,
            reflection: None,
        })
    }

    /// Creates a real polygon with the default style
    pub fn from_vertices(vertices: Vec<Point2>) -> Result<Self> {
        Self::new(vertices, Style::default())
    }

    pub(crate) fn reflected(
        vertices: Vec<Point2>,
        style: Style,
        metadata: ReflectionMetadata<PolygonRef>,
    ) -> Self {
        Self {
            vertices,
            style,
            reflection: Some(metadata),
        }
    }

    #[inline]
    pub fn is_virtual(&self) -> bool {
        self.reflection.is_some()
    }

    /// Opacity to render with; real polygons are fully opaque
    #[inline]
    pub fn opacity(&self) -> f64 {
        self.reflection.as_ref().map_or(1.0, |meta| meta.opacity)
    }

    /// Arithmetic mean of the vertices
    #[inline]
    pub fn centroid(&self) -> Point2 {
        geometry::centroid(&self.vertices)
    }

    #[inline]
    pub fn contains_point(&self, point: Point2) -> bool {
        geometry::contains_point(&self.vertices, point)
    }

    pub fn translate(&mut self, offset: Vector2) {
        geometry::polygon::translate(&mut self.vertices, offset);
    }
}

/// A reflective segment, real or virtual
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Mirror {
    pub axis: Axis,
    pub style: Style,
    pub reflection: Option<ReflectionMetadata<MirrorRef>>,
}

impl Mirror {
    /// Creates a real mirror.
    ///
    /// A degenerate axis is accepted: it never reflects anything and rays never hit it.
    pub fn new(axis: Axis, style: Style) -> Self {
        Self {
            axis,
            style,
            reflection: None,
        }
    }

    pub fn from_axis(axis: Axis) -> Self {
        Self::new(axis, Style::default())
    }

    pub(crate) fn reflected(axis: Axis, style: Style, metadata: ReflectionMetadata<MirrorRef>) -> Self {
        Self {
            axis,
            style,
            reflection: Some(metadata),
        }
    }

    #[inline]
    pub fn is_virtual(&self) -> bool {
        self.reflection.is_some()
    }

    #[inline]
    pub fn opacity(&self) -> f64 {
        self.reflection.as_ref().map_or(1.0, |meta| meta.opacity)
    }

    pub fn translate(&mut self, offset: Vector2) {
        self.axis.translate(offset);
    }
}

/// The eye that light beams are aimed at, real or virtual
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Viewer {
    pub position: Point2,
    pub radius: f64,
    pub style: Style,
    pub reflection: Option<ReflectionMetadata<ViewerRef>>,
}

impl Viewer {
    pub fn new(position: Point2, radius: f64) -> Self {
        Self {
            position,
            radius,
            style: Style::default(),
            reflection: None,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub(crate) fn reflected(
        position: Point2,
        radius: f64,
        style: Style,
        metadata: ReflectionMetadata<ViewerRef>,
    ) -> Self {
        Self {
            position,
            radius,
            style,
            reflection: Some(metadata),
        }
    }

    #[inline]
    pub fn is_virtual(&self) -> bool {
        self.reflection.is_some()
    }

    #[inline]
    pub fn opacity(&self) -> f64 {
        self.reflection.as_ref().map_or(1.0, |meta| meta.opacity)
    }

    #[inline]
    pub fn contains_point(&self, point: Point2) -> bool {
        self.position.distance(&point) <= self.radius
    }

    pub fn translate(&mut self, offset: Vector2) {
        self.position += offset;
    }
}
