//! Virtual objects produced by reflecting the scene across its mirrors.
//!
//! Two strategies share the [`ReflectionEngine`] seam: the depth-bounded
//! [`ReflectionTree`], which repositions virtual objects incrementally, and the
//! experimental [`InfiniteReflections`], which clears and rebuilds on every refresh.

pub mod tree;
pub mod infinite;

pub use self::tree::{ReflectionTree, ReflectionNode, NodeId, NodeObjects};
pub use self::infinite::{InfiniteReflections, InfiniteReflectionConfig};

use bitflags::bitflags;

use crate::error::OpticsError;
use crate::scene::{
    Mirror, MirrorRef, Polygon, PolygonRef, Scene, Viewer, ViewerRef, VirtualMirrorId,
    VirtualPolygonId, VirtualViewerId,
};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

bitflags! {
    /// Which kinds of scene objects get virtual counterparts
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
    pub struct ObjectKinds: u8 {
        const POLYGONS = 0b001;

        const VIEWERS  = 0b010;

        /// Without mirrors nothing can be reflected twice
        const MIRRORS  = 0b100;
    }
}

impl Default for ObjectKinds {
    fn default() -> Self {
        Self::all()
    }
}

/// Read access to a flattened set of virtual objects
pub trait ReflectionSet {
    fn virtual_polygons(&self) -> &[Polygon];

    fn virtual_viewers(&self) -> &[Viewer];

    fn virtual_mirrors(&self) -> &[Mirror];

    fn virtual_polygon(&self, id: VirtualPolygonId) -> Option<&Polygon> {
        self.virtual_polygons().get(id.index())
    }

    fn virtual_viewer(&self, id: VirtualViewerId) -> Option<&Viewer> {
        self.virtual_viewers().get(id.index())
    }

    fn virtual_mirror(&self, id: VirtualMirrorId) -> Option<&Mirror> {
        self.virtual_mirrors().get(id.index())
    }

    /// Total number of virtual objects of every kind
    fn object_count(&self) -> usize {
        self.virtual_polygons().len() + self.virtual_viewers().len() + self.virtual_mirrors().len()
    }

    /// Ids of all virtual polygons, in creation order
    fn polygon_ids(&self) -> Vec<VirtualPolygonId> {
        (0..self.virtual_polygons().len())
            .map(VirtualPolygonId::from_index)
            .collect()
    }
}

/// A reflection strategy the sandbox can drive
pub trait ReflectionEngine: ReflectionSet {
    /// Discards every virtual object and recreates them from `scene`
    fn rebuild(&mut self, scene: &Scene) -> Result<()>;

    /// Brings virtual objects in line with moved real objects.
    ///
    /// Fails with [`OpticsError::ResourceNotFound`] or [`OpticsError::StaleReflection`]
    /// when the scene's structure no longer matches; callers then rebuild.
    fn refresh(&mut self, scene: &Scene) -> Result<()>;

    /// The engine's virtual objects as a plain [`ReflectionSet`]
    fn as_set(&self) -> &dyn ReflectionSet;

    /// Short name used in log output
    fn name(&self) -> &'static str;
}

fn stale(what: &str, index: usize) -> OpticsError {
    OpticsError::StaleReflection(format!("virtual {what} #{index} does not exist"))
}

/// Looks a polygon reference up in the scene or the reflection set
pub fn resolve_polygon<'a, S: ReflectionSet + ?Sized>(
    scene: &'a Scene,
    set: &'a S,
    reference: PolygonRef,
) -> Result<&'a Polygon> {
    match reference {
        PolygonRef::Real(handle) => scene.polygon(handle),
        PolygonRef::Virtual(id) => set
            .virtual_polygon(id)
            .ok_or_else(|| stale("polygon", id.index())),
    }
}

/// Looks a mirror reference up in the scene or the reflection set
pub fn resolve_mirror<'a, S: ReflectionSet + ?Sized>(
    scene: &'a Scene,
    set: &'a S,
    reference: MirrorRef,
) -> Result<&'a Mirror> {
    match reference {
        MirrorRef::Real(handle) => scene.mirror(handle),
        MirrorRef::Virtual(id) => set
            .virtual_mirror(id)
            .ok_or_else(|| stale("mirror", id.index())),
    }
}

/// Looks a viewer reference up in the scene or the reflection set
pub fn resolve_viewer<'a, S: ReflectionSet + ?Sized>(
    scene: &'a Scene,
    set: &'a S,
    reference: ViewerRef,
) -> Result<&'a Viewer> {
    match reference {
        ViewerRef::Real(handle) => scene.viewer(handle),
        ViewerRef::Virtual(id) => set
            .virtual_viewer(id)
            .ok_or_else(|| stale("viewer", id.index())),
    }
}
