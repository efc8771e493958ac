use log::{debug, trace};

use crate::core::{
    EventQueue, MirrorHandle, PolygonHandle, ProjectionKind, ReflectionMode, RemovalReason,
    SandboxConfig, SandboxEvent, ViewerHandle,
};
use crate::error::OpticsError;
use crate::geometry::Axis;
use crate::math::{Point2, Vector2};
use crate::projection::{
    ProjectionContext, ProjectionManager, RealProjectionManager, VirtualProjectionManager,
};
use crate::reflection::{InfiniteReflections, ReflectionEngine, ReflectionSet, ReflectionTree};
use crate::scene::{Mirror, Polygon, Scene, SceneDescription, Viewer, VirtualPolygonId};
use crate::Result;

/// What a click on a virtual polygon did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Projections were created. The virtual one always is; the real one only
    /// when its beam actually reaches the viewer.
    Created { real_valid: bool },

    /// Existing projections were removed
    Removed,
}

/// The host-facing optics sandbox that owns the scene and everything derived from it
pub struct OpticsSandbox {
    /// Real objects
    scene: Scene,

    /// Configuration for reflections and projections
    config: SandboxConfig,

    /// Produces and refreshes the virtual objects
    reflections: Box<dyn ReflectionEngine>,

    virtual_projections: VirtualProjectionManager,

    real_projections: RealProjectionManager,

    /// Queue of sandbox events
    events: EventQueue,

    /// Set when objects were added or removed since the last rebuild
    structure_dirty: bool,
}

fn create_engine(config: &SandboxConfig) -> Box<dyn ReflectionEngine> {
    match config.reflection_mode {
        ReflectionMode::FixedDepth => Box::new(ReflectionTree::new(
            config.recursive_reflection_depth,
            config.reflected_kinds,
        )),
        ReflectionMode::InfiniteFade => {
            Box::new(InfiniteReflections::new(config.infinite, config.reflected_kinds))
        }
    }
}

impl OpticsSandbox {
    /// Creates an empty sandbox with default settings
    pub fn new() -> Self {
        Self::from_parts(Scene::new(), SandboxConfig::default())
    }

    /// Creates an empty sandbox with the given configuration
    pub fn with_config(config: SandboxConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(Scene::new(), config))
    }

    /// Creates a sandbox from plain scene data and builds its reflections
    pub fn from_description(description: &SceneDescription, config: SandboxConfig) -> Result<Self> {
        config.validate()?;
        let scene = Scene::from_description(description)?;
        let mut sandbox = Self::from_parts(scene, config);
        sandbox.rebuild_reflections()?;
        Ok(sandbox)
    }

    fn from_parts(scene: Scene, config: SandboxConfig) -> Self {
        let structure_dirty = !scene.is_empty();
        Self {
            reflections: create_engine(&config),
            scene,
            config,
            virtual_projections: VirtualProjectionManager::new(),
            real_projections: RealProjectionManager::new(),
            events: EventQueue::new(),
            structure_dirty,
        }
    }

    /// Returns a reference to the sandbox configuration
    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Replaces the configuration. Reflections are rebuilt on the next update.
    pub fn set_config(&mut self, config: SandboxConfig) -> Result<()> {
        config.validate()?;
        self.reflections = create_engine(&config);
        self.config = config;
        self.structure_dirty = true;
        Ok(())
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Current virtual objects. They may lag behind the scene until the next update.
    pub fn reflections(&self) -> &dyn ReflectionSet {
        self.reflections.as_set()
    }

    pub fn reflection_engine_name(&self) -> &'static str {
        self.reflections.name()
    }

    pub fn virtual_projections(&self) -> &VirtualProjectionManager {
        &self.virtual_projections
    }

    pub fn real_projections(&self) -> &RealProjectionManager {
        &self.real_projections
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// True when objects were added or removed since reflections were last built
    pub fn is_structure_dirty(&self) -> bool {
        self.structure_dirty
    }

    /// Adds a polygon to the scene and returns its handle
    pub fn add_polygon(&mut self, polygon: Polygon) -> PolygonHandle {
        self.structure_dirty = true;
        self.scene.add_polygon(polygon)
    }

    /// Adds a mirror to the scene and returns its handle
    pub fn add_mirror(&mut self, mirror: Mirror) -> MirrorHandle {
        self.structure_dirty = true;
        self.scene.add_mirror(mirror)
    }

    /// Adds a viewer to the scene and returns its handle
    pub fn add_viewer(&mut self, viewer: Viewer) -> ViewerHandle {
        self.structure_dirty = true;
        self.scene.add_viewer(viewer)
    }

    pub fn remove_polygon(&mut self, handle: PolygonHandle) -> Result<Polygon> {
        let polygon = self.scene.remove_polygon(handle).ok_or_else(|| {
            OpticsError::ResourceNotFound(format!("Polygon with handle {:?} not found", handle))
        })?;
        self.structure_dirty = true;
        Ok(polygon)
    }

    pub fn remove_mirror(&mut self, handle: MirrorHandle) -> Result<Mirror> {
        let mirror = self.scene.remove_mirror(handle).ok_or_else(|| {
            OpticsError::ResourceNotFound(format!("Mirror with handle {:?} not found", handle))
        })?;
        self.structure_dirty = true;
        Ok(mirror)
    }

    pub fn remove_viewer(&mut self, handle: ViewerHandle) -> Result<Viewer> {
        let viewer = self.scene.remove_viewer(handle).ok_or_else(|| {
            OpticsError::ResourceNotFound(format!("Viewer with handle {:?} not found", handle))
        })?;
        self.structure_dirty = true;
        Ok(viewer)
    }

    /// Drags a polygon by `offset`
    pub fn move_polygon(&mut self, handle: PolygonHandle, offset: Vector2) -> Result<()> {
        self.scene.polygon_mut(handle)?.translate(offset);
        Ok(())
    }

    /// Drags a mirror by `offset`
    pub fn move_mirror(&mut self, handle: MirrorHandle, offset: Vector2) -> Result<()> {
        self.scene.mirror_mut(handle)?.translate(offset);
        Ok(())
    }

    /// Drags a viewer by `offset`
    pub fn move_viewer(&mut self, handle: ViewerHandle, offset: Vector2) -> Result<()> {
        self.scene.viewer_mut(handle)?.translate(offset);
        Ok(())
    }

    pub fn set_mirror_axis(&mut self, handle: MirrorHandle, axis: Axis) -> Result<()> {
        self.scene.mirror_mut(handle)?.axis = axis;
        Ok(())
    }

    pub fn set_viewer_position(&mut self, handle: ViewerHandle, position: Point2) -> Result<()> {
        self.scene.viewer_mut(handle)?.position = position;
        Ok(())
    }

    /// Position projections aim at: the first viewer added
    pub fn primary_viewer_position(&self) -> Option<Point2> {
        self.scene.primary_viewer().map(|(_, viewer)| viewer.position)
    }

    /// Recreates every virtual object from scratch.
    ///
    /// Virtual polygon ids change, so every projection is dropped first.
    pub fn rebuild_reflections(&mut self) -> Result<()> {
        self.drop_projections(RemovalReason::Rebuilt);
        self.reflections.rebuild(&self.scene)?;
        self.structure_dirty = false;

        let set = self.reflections.as_set();
        let (polygons, viewers, mirrors) = (
            set.virtual_polygons().len(),
            set.virtual_viewers().len(),
            set.virtual_mirrors().len(),
        );
        debug!(
            "{} reflections rebuilt: {} polygons, {} viewers, {} mirrors",
            self.reflections.name(),
            polygons,
            viewers,
            mirrors
        );
        self.events.push(SandboxEvent::ReflectionsRebuilt {
            polygons,
            viewers,
            mirrors,
        });
        Ok(())
    }

    /// Brings virtual objects in line with the scene after a drag.
    ///
    /// Falls back to a full rebuild when objects were added or removed, or when
    /// the engine finds a reference that no longer resolves. Projections are not
    /// touched unless a rebuild happens; call [`Self::update_all_projections`] next.
    pub fn update_reflections(&mut self) -> Result<()> {
        if self.structure_dirty {
            debug!("scene structure changed, rebuilding reflections");
            return self.rebuild_reflections();
        }

        match self.reflections.refresh(&self.scene) {
            Ok(()) => Ok(()),
            Err(err @ (OpticsError::ResourceNotFound(_) | OpticsError::StaleReflection(_))) => {
                debug!("reflection refresh failed ({}), rebuilding", err);
                self.rebuild_reflections()
            }
            Err(err) => Err(err),
        }
    }

    /// Toggles the projections of a virtual polygon.
    ///
    /// If either projection exists, both are removed. Otherwise the virtual
    /// projection is created, and the real one too if it reaches the viewer.
    pub fn handle_virtual_polygon_click(&mut self, id: VirtualPolygonId) -> Result<ClickOutcome> {
        if self.virtual_projections.has_projection(id) || self.real_projections.has_projection(id) {
            if self.virtual_projections.remove_projection(id).is_some() {
                self.push_removed(id, ProjectionKind::Virtual, RemovalReason::Toggled);
            }
            if self.real_projections.remove_projection(id).is_some() {
                self.push_removed(id, ProjectionKind::Real, RemovalReason::Toggled);
            }
            return Ok(ClickOutcome::Removed);
        }

        let viewer = self
            .primary_viewer_position()
            .ok_or_else(|| OpticsError::ResourceNotFound("the scene has no viewer".into()))?;

        let ctx = ProjectionContext::new(
            &self.scene,
            self.reflections.as_set(),
            viewer,
            self.config.trace,
            self.config.projection_tolerance,
        );

        if !self.virtual_projections.create_projection(id, &ctx)? {
            return Err(OpticsError::InternalError(format!(
                "virtual projection for {:?} could not be created",
                id
            )));
        }
        // A failed real projection must not leave the virtual one behind unannounced
        let real_valid = match self.real_projections.create_projection(id, &ctx) {
            Ok(valid) => valid,
            Err(err) => {
                self.virtual_projections.remove_projection(id);
                return Err(err);
            }
        };

        self.events.push(SandboxEvent::ProjectionCreated {
            id,
            kind: ProjectionKind::Virtual,
        });
        if real_valid {
            self.events.push(SandboxEvent::ProjectionCreated {
                id,
                kind: ProjectionKind::Real,
            });
        }

        Ok(ClickOutcome::Created { real_valid })
    }

    /// Recomputes every projection against the current scene.
    ///
    /// Real projections that no longer reach the viewer are removed; so is
    /// everything when the scene has lost its last viewer. A virtual projection
    /// without a real partner gets one again as soon as the real beam is valid.
    /// Returns the ids whose real projection was dropped.
    pub fn update_all_projections(&mut self) -> Vec<VirtualPolygonId> {
        let Some(viewer) = self.primary_viewer_position() else {
            let removed = self.real_projections.keys();
            self.drop_projections(RemovalReason::Invalidated);
            return removed;
        };

        let ctx = ProjectionContext::new(
            &self.scene,
            self.reflections.as_set(),
            viewer,
            self.config.trace,
            self.config.projection_tolerance,
        );

        let removed_virtual = self.virtual_projections.update_all(&ctx);
        let removed_real = self.real_projections.update_all(&ctx);

        // Real projections come back once their beam reaches the viewer again
        let mut restored = Vec::new();
        for id in self.virtual_projections.keys() {
            if self.real_projections.has_projection(id) || removed_real.contains(&id) {
                continue;
            }
            match self.real_projections.create_projection(id, &ctx) {
                Ok(true) => restored.push(id),
                Ok(false) => {}
                Err(err) => trace!("real projection for {:?} not restored: {}", id, err),
            }
        }

        for &id in &removed_virtual {
            self.push_removed(id, ProjectionKind::Virtual, RemovalReason::Invalidated);
        }
        for &id in &removed_real {
            self.push_removed(id, ProjectionKind::Real, RemovalReason::Invalidated);
        }
        for id in restored {
            self.events.push(SandboxEvent::ProjectionCreated {
                id,
                kind: ProjectionKind::Real,
            });
        }
        removed_real
    }

    /// Removes every projection and returns how many were removed
    pub fn clear_projections(&mut self) -> usize {
        self.drop_projections(RemovalReason::Cleared)
    }

    /// The topmost virtual polygon under `point`, if any.
    ///
    /// Later reflections are drawn above earlier ones, so the search runs backwards.
    pub fn resolve_click_target(&self, point: Point2) -> Option<VirtualPolygonId> {
        self.reflections
            .as_set()
            .virtual_polygons()
            .iter()
            .rposition(|polygon| polygon.contains_point(point))
            .map(VirtualPolygonId::from_index)
    }

    fn drop_projections(&mut self, reason: RemovalReason) -> usize {
        let virtual_keys = self.virtual_projections.keys();
        let real_keys = self.real_projections.keys();
        let count = self.virtual_projections.clear_all() + self.real_projections.clear_all();

        for id in virtual_keys {
            self.push_removed(id, ProjectionKind::Virtual, reason);
        }
        for id in real_keys {
            self.push_removed(id, ProjectionKind::Real, reason);
        }
        count
    }

    fn push_removed(&mut self, id: VirtualPolygonId, kind: ProjectionKind, reason: RemovalReason) {
        debug!("{:?} projection for {:?} removed: {:?}", kind, id, reason);
        self.events.push(SandboxEvent::ProjectionRemoved { id, kind, reason });
    }
}

impl Default for OpticsSandbox {
    fn default() -> Self {
        Self::new()
    }
}
