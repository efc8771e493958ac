mod objects;
mod refs;
mod description;

pub use self::objects::{Style, ReflectionMetadata, Polygon, Mirror, Viewer};
pub use self::refs::{
    PolygonRef, MirrorRef, ViewerRef, VirtualPolygonId, VirtualMirrorId, VirtualViewerId,
};
pub use self::description::{SceneDescription, PolygonDescription, MirrorDescription, ViewerDescription};

use crate::core::{MirrorHandle, ObjectStorage, PolygonHandle, Storage, ViewerHandle};
use crate::geometry::Axis;
use crate::Result;

/// The real, user-manipulable objects of a sandbox
#[derive(Debug, Clone, Default)]
pub struct Scene {
    polygons: ObjectStorage<PolygonHandle, Polygon>,
    mirrors: ObjectStorage<MirrorHandle, Mirror>,
    viewers: ObjectStorage<ViewerHandle, Viewer>,
}

impl Scene {
    /// Creates an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a scene from plain configuration data
    pub fn from_description(description: &SceneDescription) -> Result<Self> {
        let mut scene = Self::new();
        for polygon in &description.polygons {
            scene.add_polygon(polygon.to_polygon()?);
        }
        for mirror in &description.mirrors {
            scene.add_mirror(mirror.to_mirror());
        }
        for viewer in &description.viewers {
            scene.add_viewer(viewer.to_viewer());
        }
        Ok(scene)
    }

    pub fn add_polygon(&mut self, polygon: Polygon) -> PolygonHandle {
        self.polygons.add(polygon)
    }

    pub fn add_mirror(&mut self, mirror: Mirror) -> MirrorHandle {
        self.mirrors.add(mirror)
    }

    pub fn add_viewer(&mut self, viewer: Viewer) -> ViewerHandle {
        self.viewers.add(viewer)
    }

    pub fn remove_polygon(&mut self, handle: PolygonHandle) -> Option<Polygon> {
        self.polygons.remove(handle)
    }

    pub fn remove_mirror(&mut self, handle: MirrorHandle) -> Option<Mirror> {
        self.mirrors.remove(handle)
    }

    pub fn remove_viewer(&mut self, handle: ViewerHandle) -> Option<Viewer> {
        self.viewers.remove(handle)
    }

    pub fn polygon(&self, handle: PolygonHandle) -> Result<&Polygon> {
        self.polygons.get_object(handle)
    }

    pub fn polygon_mut(&mut self, handle: PolygonHandle) -> Result<&mut Polygon> {
        self.polygons.get_object_mut(handle)
    }

    pub fn mirror(&self, handle: MirrorHandle) -> Result<&Mirror> {
        self.mirrors.get_object(handle)
    }

    pub fn mirror_mut(&mut self, handle: MirrorHandle) -> Result<&mut Mirror> {
        self.mirrors.get_object_mut(handle)
    }

    pub fn viewer(&self, handle: ViewerHandle) -> Result<&Viewer> {
        self.viewers.get_object(handle)
    }

    pub fn viewer_mut(&mut self, handle: ViewerHandle) -> Result<&mut Viewer> {
        self.viewers.get_object_mut(handle)
    }

    pub fn polygons(&self) -> impl Iterator<Item = (PolygonHandle, &Polygon)> + '_ {
        self.polygons.iter()
    }

    pub fn mirrors(&self) -> impl Iterator<Item = (MirrorHandle, &Mirror)> + '_ {
        self.mirrors.iter()
    }

    pub fn viewers(&self) -> impl Iterator<Item = (ViewerHandle, &Viewer)> + '_ {
        self.viewers.iter()
    }

    pub fn polygon_handles(&self) -> Vec<PolygonHandle> {
        self.polygons.handles()
    }

    pub fn mirror_handles(&self) -> Vec<MirrorHandle> {
        self.mirrors.handles()
    }

    pub fn viewer_handles(&self) -> Vec<ViewerHandle> {
        self.viewers.handles()
    }

    /// Axes of the real mirrors, in insertion order
    pub fn mirror_axes(&self) -> Vec<Axis> {
        self.mirrors.values().map(|mirror| mirror.axis).collect()
    }

    /// The viewer that projections aim at: the first one added
    pub fn primary_viewer(&self) -> Option<(ViewerHandle, &Viewer)> {
        self.viewers.iter().next()
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn mirror_count(&self) -> usize {
        self.mirrors.len()
    }

    pub fn viewer_count(&self) -> usize {
        self.viewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty() && self.mirrors.is_empty() && self.viewers.is_empty()
    }

    /// Removes every object
    pub fn clear(&mut self) {
        self.polygons.clear();
        self.mirrors.clear();
        self.viewers.clear();
    }
}
