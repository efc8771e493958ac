use log::debug;

use crate::geometry::{reflect_point_over_axis, reflect_polygon_over_axis};
use crate::reflection::{
    resolve_mirror, resolve_polygon, resolve_viewer, ObjectKinds, ReflectionEngine, ReflectionSet,
};
use crate::scene::{
    Mirror, MirrorRef, Polygon, PolygonRef, ReflectionMetadata, Scene, Viewer, ViewerRef,
    VirtualMirrorId, VirtualPolygonId, VirtualViewerId,
};
use crate::Result;

/// Index of a node in a [`ReflectionTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node, which stands for the real scene
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// The objects a node hands to its parent mirror for reflection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeObjects {
    pub polygons: Vec<PolygonRef>,
    pub viewers: Vec<ViewerRef>,
    pub mirrors: Vec<MirrorRef>,
}

impl NodeObjects {
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty() && self.viewers.is_empty() && self.mirrors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.polygons.len() + self.viewers.len() + self.mirrors.len()
    }
}

/// One reflection operation: `children_objects` mirrored across `parent_mirror`
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectionNode {
    /// `None` only for the root
    pub parent_mirror: Option<MirrorRef>,

    /// Objects to reflect across `parent_mirror`
    pub children_objects: NodeObjects,

    /// Nodes one level deeper, one per virtual mirror this node produced
    pub children_nodes: Vec<NodeId>,

    /// 0 for the root, 1 for reflections of the real scene, and so on
    pub depth: u32,
}

/// Breadth-first tree of reflections of reflections, bounded by a fixed depth.
///
/// A node at depth `k` reflects its objects across its parent mirror. Each
/// virtual mirror it creates becomes the parent of a depth `k + 1` node that
/// sees exactly the objects this node created, never the cumulative history.
/// A mirror is never reflected across itself.
#[derive(Debug, Clone)]
pub struct ReflectionTree {
    nodes: Vec<ReflectionNode>,
    polygons: Vec<Polygon>,
    viewers: Vec<Viewer>,
    mirrors: Vec<Mirror>,
    max_depth: u32,
    kinds: ObjectKinds,
}

impl ReflectionTree {
    /// Creates a tree holding only the root, with no virtual objects
    pub fn new(max_depth: u32, kinds: ObjectKinds) -> Self {
        Self {
            nodes: vec![ReflectionNode {
                parent_mirror: None,
                children_objects: NodeObjects::default(),
                children_nodes: Vec::new(),
                depth: 0,
            }],
            polygons: Vec::new(),
            viewers: Vec::new(),
            mirrors: Vec::new(),
            max_depth,
            kinds,
        }
    }

    /// Builds the tree for `scene` down to `max_depth` levels
    pub fn build(scene: &Scene, max_depth: u32, kinds: ObjectKinds) -> Result<Self> {
        let mut tree = Self::new(max_depth, kinds);
        tree.populate(scene)?;
        Ok(tree)
    }

    fn populate(&mut self, scene: &Scene) -> Result<()> {
        if self.max_depth == 0 {
            return Ok(());
        }

        let real_objects = self.real_objects(scene);

        let mut frontier: Vec<NodeId> = scene
            .mirror_handles()
            .into_iter()
            .map(|handle| self.push_node(NodeId::ROOT, MirrorRef::Real(handle), real_objects.clone(), 1))
            .collect();

        // every node of one level is processed before any node of the next
        for depth in 1..=self.max_depth {
            let mut next_level = Vec::new();

            for node_id in frontier {
                let created = self.process_node(scene, node_id)?;
                if depth == self.max_depth {
                    continue;
                }
                for &mirror in &created.mirrors {
                    next_level.push(self.push_node(node_id, mirror, created.clone(), depth + 1));
                }
            }

            debug!(
                "reflection tree level {}: {} nodes queued for level {}",
                depth,
                next_level.len(),
                depth + 1
            );
            frontier = next_level;
        }

        debug!(
            "reflection tree built: {} nodes, {} polygons, {} viewers, {} mirrors",
            self.nodes.len(),
            self.polygons.len(),
            self.viewers.len(),
            self.mirrors.len()
        );
        Ok(())
    }

    fn real_objects(&self, scene: &Scene) -> NodeObjects {
        let mut objects = NodeObjects::default();
        if self.kinds.contains(ObjectKinds::POLYGONS) {
            objects.polygons = scene.polygon_handles().into_iter().map(PolygonRef::Real).collect();
        }
        if self.kinds.contains(ObjectKinds::VIEWERS) {
            objects.viewers = scene.viewer_handles().into_iter().map(ViewerRef::Real).collect();
        }
        if self.kinds.contains(ObjectKinds::MIRRORS) {
            objects.mirrors = scene.mirror_handles().into_iter().map(MirrorRef::Real).collect();
        }
        objects
    }

    fn push_node(&mut self, parent: NodeId, mirror: MirrorRef, objects: NodeObjects, depth: u32) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ReflectionNode {
            parent_mirror: Some(mirror),
            children_objects: objects,
            children_nodes: Vec::new(),
            depth,
        });
        self.nodes[parent.0].children_nodes.push(id);
        id
    }

    /// Reflects a node's objects across its parent mirror and returns what was created
    fn process_node(&mut self, scene: &Scene, node_id: NodeId) -> Result<NodeObjects> {
        let node = &self.nodes[node_id.0];
        let depth = node.depth;
        let objects = node.children_objects.clone();
        let Some(parent) = node.parent_mirror else {
            return Ok(NodeObjects::default());
        };

        let axis = resolve_mirror(scene, &*self, parent)?.axis;
        let mut created = NodeObjects::default();

        for source in objects.polygons {
            let polygon = resolve_polygon(scene, &*self, source)?;
            let source_real_object = match source {
                PolygonRef::Real(handle) => Some(handle),
                PolygonRef::Virtual(_) => polygon.reflection.and_then(|meta| meta.source_real_object),
            };
            let reflected = Polygon::reflected(
                reflect_polygon_over_axis(&polygon.vertices, &axis),
                polygon.style.clone(),
                ReflectionMetadata {
                    source_object: source,
                    source_real_object,
                    source_mirror: parent,
                    opacity: 1.0,
                    depth,
                },
            );
            let id = VirtualPolygonId::from_index(self.polygons.len());
            self.polygons.push(reflected);
            created.polygons.push(PolygonRef::Virtual(id));
        }

        for source in objects.viewers {
            let viewer = resolve_viewer(scene, &*self, source)?;
            let reflected = Viewer::reflected(
                reflect_point_over_axis(viewer.position, &axis),
                viewer.radius,
                viewer.style.clone(),
                ReflectionMetadata {
                    source_object: source,
                    source_real_object: None,
                    source_mirror: parent,
                    opacity: 1.0,
                    depth,
                },
            );
            let id = VirtualViewerId::from_index(self.viewers.len());
            self.viewers.push(reflected);
            created.viewers.push(ViewerRef::Virtual(id));
        }

        for source in objects.mirrors {
            if source == parent {
                continue;
            }
            let mirror = resolve_mirror(scene, &*self, source)?;
            let reflected = Mirror::reflected(
                mirror.axis.reflected_over(&axis),
                mirror.style.clone(),
                ReflectionMetadata {
                    source_object: source,
                    source_real_object: None,
                    source_mirror: parent,
                    opacity: 1.0,
                    depth,
                },
            );
            let id = VirtualMirrorId::from_index(self.mirrors.len());
            self.mirrors.push(reflected);
            created.mirrors.push(MirrorRef::Virtual(id));
        }

        Ok(created)
    }

    /// Recomputes every virtual object from its source's current geometry.
    ///
    /// Objects are visited in creation order, so sources at shallower depths
    /// are always up to date before their reflections are recomputed. Mirrors
    /// go first because polygons and viewers at a level reflect across them.
    pub fn update(&mut self, scene: &Scene) -> Result<()> {
        for index in 0..self.mirrors.len() {
            let Some(meta) = self.mirrors[index].reflection else {
                continue;
            };
            let axis = resolve_mirror(scene, &*self, meta.source_mirror)?.axis;
            let source_axis = resolve_mirror(scene, &*self, meta.source_object)?.axis;
            self.mirrors[index].axis = source_axis.reflected_over(&axis);
        }

        for index in 0..self.polygons.len() {
            let Some(meta) = self.polygons[index].reflection else {
                continue;
            };
            let axis = resolve_mirror(scene, &*self, meta.source_mirror)?.axis;
            let vertices = reflect_polygon_over_axis(
                &resolve_polygon(scene, &*self, meta.source_object)?.vertices,
                &axis,
            );
            self.polygons[index].vertices = vertices;
        }

        for index in 0..self.viewers.len() {
            let Some(meta) = self.viewers[index].reflection else {
                continue;
            };
            let axis = resolve_mirror(scene, &*self, meta.source_mirror)?.axis;
            let source = resolve_viewer(scene, &*self, meta.source_object)?;
            let (position, radius) = (reflect_point_over_axis(source.position, &axis), source.radius);
            let viewer = &mut self.viewers[index];
            viewer.position = position;
            viewer.radius = radius;
        }

        Ok(())
    }

    #[inline]
    pub fn root(&self) -> &ReflectionNode {
        &self.nodes[0]
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&ReflectionNode> {
        self.nodes.get(id.0)
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Ids of all nodes at `depth`, in breadth-first order
    pub fn nodes_at_depth(&self, depth: u32) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.depth == depth)
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[inline]
    pub fn kinds(&self) -> ObjectKinds {
        self.kinds
    }
}

impl ReflectionSet for ReflectionTree {
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

impl ReflectionEngine for ReflectionTree {
    fn rebuild(&mut self, scene: &Scene) -> Result<()> {
        *self = Self::build(scene, self.max_depth, self.kinds)?;
        Ok(())
    }

    fn refresh(&mut self, scene: &Scene) -> Result<()> {
        self.update(scene)
    }

    fn as_set(&self) -> &dyn ReflectionSet {
        self
    }

    fn name(&self) -> &'static str {
        "fixed-depth tree"
    }
}
