use crate::scene::VirtualPolygonId;
use std::collections::VecDeque;

pub use crate::projection::ProjectionKind;

/// Why a projection went away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    /// The virtual polygon was clicked a second time
    Toggled,

    /// The beam stopped reaching the viewer after the scene moved
    Invalidated,

    /// All projections were cleared on request
    Cleared,

    /// Reflections were rebuilt, invalidating virtual polygon ids
    Rebuilt,
}

/// Something the renderer may want to react to
#[derive(Debug, Clone, PartialEq)]
pub enum SandboxEvent {
    /// Virtual objects were recreated from scratch
    ReflectionsRebuilt {
        polygons: usize,
        viewers: usize,
        mirrors: usize,
    },

    /// A projection started being tracked
    ProjectionCreated {
        id: VirtualPolygonId,
        kind: ProjectionKind,
    },

    /// A projection stopped being tracked
    ProjectionRemoved {
        id: VirtualPolygonId,
        kind: ProjectionKind,
        reason: RemovalReason,
    },
}

impl SandboxEvent {
    /// Virtual polygon the event is about, if any
    pub fn virtual_polygon(&self) -> Option<VirtualPolygonId> {
        match self {
            Self::ReflectionsRebuilt { .. } => None,
            Self::ProjectionCreated { id, .. } | Self::ProjectionRemoved { id, .. } => Some(*id),
        }
    }
}

/// A FIFO queue of sandbox events
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<SandboxEvent>,
}

impl EventQueue {
    /// Creates a new empty event queue
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    pub fn push(&mut self, event: SandboxEvent) {
        self.events.push_back(event);
    }

    /// Gets the next event from the queue
    pub fn next_event(&mut self) -> Option<SandboxEvent> {
        self.events.pop_front()
    }

    /// Takes every queued event, oldest first
    pub fn drain(&mut self) -> Vec<SandboxEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Gets all queued events concerning a given virtual polygon
    pub fn events_for(&self, id: VirtualPolygonId) -> Vec<&SandboxEvent> {
        self.events
            .iter()
            .filter(|event| event.virtual_polygon() == Some(id))
            .collect()
    }

    /// Gets all queued projection events of one kind
    pub fn events_of_kind(&self, kind: ProjectionKind) -> Vec<&SandboxEvent> {
        self.events
            .iter()
            .filter(|event| match event {
                SandboxEvent::ProjectionCreated { kind: k, .. }
                | SandboxEvent::ProjectionRemoved { kind: k, .. } => *k == kind,
                SandboxEvent::ReflectionsRebuilt { .. } => false,
            })
            .collect()
    }
}
