use log::{debug, warn};

use crate::core::MirrorHandle;
use crate::error::OpticsError;
use crate::geometry::{reflect_point_over_axis, reflect_polygon_over_axis, Axis};
use crate::reflection::{ObjectKinds, ReflectionEngine, ReflectionSet};
use crate::scene::{
    Mirror, MirrorRef, Polygon, PolygonRef, ReflectionMetadata, Scene, Viewer, ViewerRef,
    VirtualMirrorId, VirtualPolygonId, VirtualViewerId,
};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Limits for the opacity-fading reflection variant
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct InfiniteReflectionConfig {
    /// Opacity multiplier applied per reflection, in `(0, 1)`
    pub fade_rate: f64,

    /// Reflections fainter than this are not created
    pub min_opacity: f64,

    /// Hard cap on the number of virtual objects
    pub max_objects: usize,
}

impl Default for InfiniteReflectionConfig {
    fn default() -> Self {
        Self {
            fade_rate: 0.8,
            min_opacity: 0.05,
            max_objects: 1000,
        }
    }
}

impl InfiniteReflectionConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.fade_rate > 0.0 && self.fade_rate < 1.0) {
            return Err(OpticsError::InvalidParameter(format!(
                "fade_rate must lie in (0, 1), got {}",
                self.fade_rate
            )));
        }
        if !(self.min_opacity > 0.0) {
            return Err(OpticsError::InvalidParameter(format!(
                "min_opacity must be positive, got {}",
                self.min_opacity
            )));
        }
        if self.max_objects == 0 {
            return Err(OpticsError::InvalidParameter("max_objects must be at least 1".into()));
        }
        Ok(())
    }

    /// Opacity of an object `depth` reflections away from the real scene
    #[inline]
    pub fn opacity_at(&self, depth: u32) -> f64 {
        self.fade_rate.powi(depth as i32)
    }

    /// Deepest reflection level whose opacity still reaches `min_opacity`
    pub fn max_visible_depth(&self) -> u32 {
        let mut depth = 0;
        while self.opacity_at(depth + 1) >= self.min_opacity {
            depth += 1;
        }
        depth
    }
}

#[derive(Debug, Clone, Copy)]
enum Seed {
    Polygon(PolygonRef),
    Viewer(ViewerRef),
    Mirror(MirrorRef),
}

/// An object waiting to be reflected, with the state its reflections inherit
#[derive(Debug, Clone, Copy)]
struct LayerEntry {
    seed: Seed,
    /// Mirror that produced this entry; reflecting back across it is the identity
    last_mirror: Option<MirrorHandle>,
    /// For real mirrors, the mirror itself, which must not reflect itself
    own_mirror: Option<MirrorHandle>,
    opacity: f64,
    depth: u32,
}

/// Experimental layered reflections whose depth is bounded by visibility.
///
/// Each layer reflects the previous one across every real mirror, fading by
/// `fade_rate` per bounce, until objects drop below `min_opacity` or the object
/// cap is reached. Refreshing always clears and rebuilds everything: simpler
/// than patching parent/child links, but O(layer size) on every drag frame.
#[derive(Debug, Clone)]
pub struct InfiniteReflections {
    config: InfiniteReflectionConfig,
    kinds: ObjectKinds,
    polygons: Vec<Polygon>,
    viewers: Vec<Viewer>,
    mirrors: Vec<Mirror>,
    truncated: bool,
}

impl InfiniteReflections {
    pub fn new(config: InfiniteReflectionConfig, kinds: ObjectKinds) -> Self {
        Self {
            config,
            kinds,
            polygons: Vec::new(),
            viewers: Vec::new(),
            mirrors: Vec::new(),
            truncated: false,
        }
    }

    /// Builds the layers for `scene`
    pub fn build(scene: &Scene, config: InfiniteReflectionConfig, kinds: ObjectKinds) -> Result<Self> {
        config.validate()?;
        let mut reflections = Self::new(config, kinds);
        reflections.regenerate(scene)?;
        Ok(reflections)
    }

    #[inline]
    pub fn config(&self) -> &InfiniteReflectionConfig {
        &self.config
    }

    /// True when the last build stopped at `max_objects`
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    fn clear(&mut self) {
        self.polygons.clear();
        self.viewers.clear();
        self.mirrors.clear();
        self.truncated = false;
    }

    fn object_total(&self) -> usize {
        self.polygons.len() + self.viewers.len() + self.mirrors.len()
    }

    fn regenerate(&mut self, scene: &Scene) -> Result<()> {
        self.clear();

        let reflectors: Vec<(MirrorHandle, Axis)> = scene
            .mirrors()
            .map(|(handle, mirror)| (handle, mirror.axis))
            .collect();

        let mut layer = self.real_layer(scene);

        'layers: while !layer.is_empty() {
            let mut next_layer = Vec::new();

            for entry in &layer {
                let opacity = entry.opacity * self.config.fade_rate;
                if opacity < self.config.min_opacity {
                    continue;
                }

                for &(handle, axis) in &reflectors {
                    if entry.last_mirror == Some(handle) || entry.own_mirror == Some(handle) {
                        continue;
                    }
                    if self.object_total() >= self.config.max_objects {
                        warn!(
                            "infinite reflections capped at {} objects",
                            self.config.max_objects
                        );
                        self.truncated = true;
                        break 'layers;
                    }

                    let seed = self.reflect_seed(scene, entry, handle, &axis, opacity)?;
                    next_layer.push(LayerEntry {
                        seed,
                        last_mirror: Some(handle),
                        own_mirror: None,
                        opacity,
                        depth: entry.depth + 1,
                    });
                }
            }

            layer = next_layer;
        }

        debug!(
            "infinite reflections rebuilt: {} polygons, {} viewers, {} mirrors{}",
            self.polygons.len(),
            self.viewers.len(),
            self.mirrors.len(),
            if self.truncated { " (truncated)" } else { "" }
        );
        Ok(())
    }

    fn real_layer(&self, scene: &Scene) -> Vec<LayerEntry> {
        let entry = |seed, own_mirror| LayerEntry {
            seed,
            last_mirror: None,
            own_mirror,
            opacity: 1.0,
            depth: 0,
        };

        let mut layer = Vec::new();
        if self.kinds.contains(ObjectKinds::POLYGONS) {
            layer.extend(
                scene
                    .polygon_handles()
                    .into_iter()
                    .map(|handle| entry(Seed::Polygon(PolygonRef::Real(handle)), None)),
            );
        }
        if self.kinds.contains(ObjectKinds::VIEWERS) {
            layer.extend(
                scene
                    .viewer_handles()
                    .into_iter()
                    .map(|handle| entry(Seed::Viewer(ViewerRef::Real(handle)), None)),
            );
        }
        if self.kinds.contains(ObjectKinds::MIRRORS) {
            layer.extend(
                scene
                    .mirror_handles()
                    .into_iter()
                    .map(|handle| entry(Seed::Mirror(MirrorRef::Real(handle)), Some(handle))),
            );
        }
        layer
    }

    /// Reflects one layer entry across a real mirror and stores the result
    fn reflect_seed(
        &mut self,
        scene: &Scene,
        entry: &LayerEntry,
        handle: MirrorHandle,
        axis: &Axis,
        opacity: f64,
    ) -> Result<Seed> {
        let source_mirror = MirrorRef::Real(handle);
        let depth = entry.depth + 1;

        let seed = match entry.seed {
            Seed::Polygon(source) => {
                let polygon = super::resolve_polygon(scene, &*self, source)?;
                let source_real_object = match source {
                    PolygonRef::Real(real) => Some(real),
                    PolygonRef::Virtual(_) => polygon.reflection.and_then(|meta| meta.source_real_object),
                };
                let reflected = Polygon::reflected(
                    reflect_polygon_over_axis(&polygon.vertices, axis),
                    polygon.style.clone(),
                    ReflectionMetadata {
                        source_object: source,
                        source_real_object,
                        source_mirror,
                        opacity,
                        depth,
                    },
                );
                let id = VirtualPolygonId::from_index(self.polygons.len());
                self.polygons.push(reflected);
                Seed::Polygon(PolygonRef::Virtual(id))
            }
            Seed::Viewer(source) => {
                let viewer = super::resolve_viewer(scene, &*self, source)?;
                let reflected = Viewer::reflected(
                    reflect_point_over_axis(viewer.position, axis),
                    viewer.radius,
                    viewer.style.clone(),
                    ReflectionMetadata {
                        source_object: source,
                        source_real_object: None,
                        source_mirror,
                        opacity,
                        depth,
                    },
                );
                let id = VirtualViewerId::from_index(self.viewers.len());
                self.viewers.push(reflected);
                Seed::Viewer(ViewerRef::Virtual(id))
            }
            Seed::Mirror(source) => {
                let mirror = super::resolve_mirror(scene, &*self, source)?;
                let reflected = Mirror::reflected(
                    mirror.axis.reflected_over(axis),
                    mirror.style.clone(),
                    ReflectionMetadata {
                        source_object: source,
                        source_real_object: None,
                        source_mirror,
                        opacity,
                        depth,
                    },
                );
                let id = VirtualMirrorId::from_index(self.mirrors.len());
                self.mirrors.push(reflected);
                Seed::Mirror(MirrorRef::Virtual(id))
            }
        };

        Ok(seed)
    }
}

impl ReflectionSet for InfiniteReflections {
    fn virtual_polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    fn virtual_viewers(&self) -> &[Viewer] {
        &self.viewers
    }

    fn virtual_mirrors(&self) -> &[Mirror] {
        &self.mirrors
    }
}

impl ReflectionEngine for InfiniteReflections {
    fn rebuild(&mut self, scene: &Scene) -> Result<()> {
        self.regenerate(scene)
    }

    fn refresh(&mut self, scene: &Scene) -> Result<()> {
        self.regenerate(scene)
    }

    fn as_set(&self) -> &dyn ReflectionSet {
        self
    }

    fn name(&self) -> &'static str {
        "opacity-fading infinite"
    }
}
