use std::collections::BTreeMap;

use log::debug;

use crate::beam::{LightBeam, TraceSettings};
use crate::geometry::Axis;
use crate::math::Point2;
use crate::projection::{is_valid_projection, real_projection, virtual_projection, ProjectionKind};
use crate::reflection::{resolve_polygon, ReflectionSet};
use crate::scene::{PolygonRef, Scene, VirtualPolygonId};
use crate::Result;

/// A beam tracked for one clicked virtual polygon
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub key: VirtualPolygonId,
    pub kind: ProjectionKind,
    pub beam: LightBeam,
}

/// Everything needed to (re)compute projections against the current scene
pub struct ProjectionContext<'a> {
    pub scene: &'a Scene,
    pub reflections: &'a dyn ReflectionSet,

    /// Target viewer position
    pub viewer: Point2,

    /// Axes of the real mirrors, in scene order
    pub mirrors: Vec<Axis>,

    pub settings: TraceSettings,

    /// Maximum endpoint-to-viewer distance for a valid real projection
    pub tolerance: f64,
}

impl<'a> ProjectionContext<'a> {
    pub fn new(
        scene: &'a Scene,
        reflections: &'a dyn ReflectionSet,
        viewer: Point2,
        settings: TraceSettings,
        tolerance: f64,
    ) -> Self {
        Self {
            scene,
            reflections,
            viewer,
            mirrors: scene.mirror_axes(),
            settings,
            tolerance,
        }
    }
}

/// Keyed lifecycle of one projection kind.
///
/// At most one projection exists per virtual polygon; implementors only
/// decide how a beam is computed and whether it is still valid.
pub trait ProjectionManager {
    fn kind(&self) -> ProjectionKind;

    /// Computes the beam for `key`, or `None` if it should not be shown
    fn compute(&self, key: VirtualPolygonId, ctx: &ProjectionContext) -> Result<Option<LightBeam>>;

    fn projections(&self) -> &BTreeMap<VirtualPolygonId, Projection>;

    fn projections_mut(&mut self) -> &mut BTreeMap<VirtualPolygonId, Projection>;

    /// Computes and stores a projection, replacing any previous one for `key`.
    ///
    /// Returns whether a projection is now stored.
    fn create_projection(&mut self, key: VirtualPolygonId, ctx: &ProjectionContext) -> Result<bool> {
        let kind = self.kind();
        match self.compute(key, ctx)? {
            Some(beam) => {
                debug!("{:?} projection created for {:?}", kind, key);
                self.projections_mut().insert(key, Projection { key, kind, beam });
                Ok(true)
            }
            None => {
                self.projections_mut().remove(&key);
                Ok(false)
            }
        }
    }

    /// Recomputes an existing projection, removing it if it became invalid.
    ///
    /// Returns whether the projection still exists afterwards.
    fn update_projection(&mut self, key: VirtualPolygonId, ctx: &ProjectionContext) -> Result<bool> {
        if !self.has_projection(key) {
            return Ok(false);
        }

        match self.compute(key, ctx)? {
            Some(beam) => {
                if let Some(projection) = self.projections_mut().get_mut(&key) {
                    projection.beam = beam;
                }
                Ok(true)
            }
            None => {
                debug!("{:?} projection for {:?} no longer valid", self.kind(), key);
                self.projections_mut().remove(&key);
                Ok(false)
            }
        }
    }

    fn remove_projection(&mut self, key: VirtualPolygonId) -> Option<Projection> {
        self.projections_mut().remove(&key)
    }

    fn has_projection(&self, key: VirtualPolygonId) -> bool {
        self.projections().contains_key(&key)
    }

    /// Removes every projection, returning how many there were
    fn clear_all(&mut self) -> usize {
        let count = self.projections().len();
        self.projections_mut().clear();
        count
    }

    fn get(&self, key: VirtualPolygonId) -> Option<&Projection> {
        self.projections().get(&key)
    }

    fn keys(&self) -> Vec<VirtualPolygonId> {
        self.projections().keys().copied().collect()
    }

    fn len(&self) -> usize {
        self.projections().len()
    }

    fn is_empty(&self) -> bool {
        self.projections().is_empty()
    }

    /// Updates every projection and returns the keys that were dropped.
    ///
    /// A projection whose virtual polygon can no longer be resolved is dropped too.
    fn update_all(&mut self, ctx: &ProjectionContext) -> Vec<VirtualPolygonId> {
        let mut removed = Vec::new();
        for key in self.keys() {
            match self.update_projection(key, ctx) {
                Ok(true) => {}
                Ok(false) => removed.push(key),
                Err(err) => {
                    debug!("dropping {:?} projection for {:?}: {}", self.kind(), key, err);
                    self.projections_mut().remove(&key);
                    removed.push(key);
                }
            }
        }
        removed
    }
}

/// Straight virtual-polygon-to-viewer beams. They are always valid.
#[derive(Debug, Default)]
pub struct VirtualProjectionManager {
    projections: BTreeMap<VirtualPolygonId, Projection>,
}

impl VirtualProjectionManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectionManager for VirtualProjectionManager {
    fn kind(&self) -> ProjectionKind {
        ProjectionKind::Virtual
    }

    fn compute(&self, key: VirtualPolygonId, ctx: &ProjectionContext) -> Result<Option<LightBeam>> {
        let polygon = resolve_polygon(ctx.scene, ctx.reflections, PolygonRef::Virtual(key))?;
        Ok(Some(virtual_projection(polygon, ctx.viewer)))
    }

    fn projections(&self) -> &BTreeMap<VirtualPolygonId, Projection> {
        &self.projections
    }

    fn projections_mut(&mut self) -> &mut BTreeMap<VirtualPolygonId, Projection> {
        &mut self.projections
    }
}

/// Bounced beams from the real source polygon, kept only while they reach the viewer
#[derive(Debug, Default)]
pub struct RealProjectionManager {
    projections: BTreeMap<VirtualPolygonId, Projection>,
}

impl RealProjectionManager {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectionManager for RealProjectionManager {
    fn kind(&self) -> ProjectionKind {
        ProjectionKind::Real
    }

    fn compute(&self, key: VirtualPolygonId, ctx: &ProjectionContext) -> Result<Option<LightBeam>> {
        let virtual_polygon = resolve_polygon(ctx.scene, ctx.reflections, PolygonRef::Virtual(key))?;
        let Some(real_handle) = virtual_polygon
            .reflection
            .and_then(|meta| meta.source_real_object)
        else {
            return Ok(None);
        };
        let real_polygon = ctx.scene.polygon(real_handle)?;

        let beam = real_projection(
            virtual_polygon,
            real_polygon,
            ctx.viewer,
            &ctx.mirrors,
            &ctx.settings,
        );

        Ok(beam.filter(|beam| is_valid_projection(beam, ctx.viewer, ctx.tolerance)))
    }

    fn projections(&self) -> &BTreeMap<VirtualPolygonId, Projection> {
        &self.projections
    }

    fn projections_mut(&mut self) -> &mut BTreeMap<VirtualPolygonId, Projection> {
        &mut self.projections
    }
}
