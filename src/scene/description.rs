use crate::geometry::Axis;
use crate::math::Point2;
use crate::scene::{Mirror, Polygon, Style, Viewer};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Plain-data description of a scene, as handed over by a scene loader.
///
/// No validation beyond the polygon vertex count is performed; non-finite
/// coordinates simply propagate through the geometry as NaN.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SceneDescription {
    #[cfg_attr(feature = "serialize", serde(default))]
    pub polygons: Vec<PolygonDescription>,

    #[cfg_attr(feature = "serialize", serde(default))]
    pub mirrors: Vec<MirrorDescription>,

    #[cfg_attr(feature = "serialize", serde(default))]
    pub viewers: Vec<ViewerDescription>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PolygonDescription {
    pub vertices: Vec<[f64; 2]>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct MirrorDescription {
    /// `[x1, y1, x2, y2]`
    pub axis: [f64; 4],
    pub stroke: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ViewerDescription {
    pub position: [f64; 2],
    pub radius: f64,
}

impl PolygonDescription {
    pub fn new(vertices: Vec<[f64; 2]>) -> Self {
        Self {
            vertices,
            fill: None,
            stroke: None,
        }
    }

    pub fn to_polygon(&self) -> Result<Polygon> {
        let style = Style {
            fill: self.fill.clone(),
            stroke: self.stroke.clone(),
            ..Style::default()
        };
        Polygon::new(self.vertices.iter().copied().map(Point2::from).collect(), style)
    }
}

impl MirrorDescription {
    pub fn new(axis: [f64; 4]) -> Self {
        Self { axis, stroke: None }
    }

    pub fn to_mirror(&self) -> Mirror {
        let style = Style {
            stroke: self.stroke.clone(),
            ..Style::default()
        };
        Mirror::new(Axis::from(self.axis), style)
    }
}

impl ViewerDescription {
    pub fn new(position: [f64; 2], radius: f64) -> Self {
        Self { position, radius }
    }

    pub fn to_viewer(&self) -> Viewer {
        Viewer::new(Point2::from(self.position), self.radius)
    }
}
