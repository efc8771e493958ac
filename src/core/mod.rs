pub mod sandbox;
pub mod config;
pub mod storage;
pub mod events;

pub use self::sandbox::{OpticsSandbox, ClickOutcome};
pub use self::config::{SandboxConfig, ReflectionMode};
pub use self::storage::{ObjectStorage, Storage, Handle};
pub use self::events::{EventQueue, SandboxEvent, ProjectionKind, RemovalReason};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

macro_rules! scene_handle {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
        pub struct $name(pub(crate) u32);

        impl Handle for $name {
            const KIND: &'static str = $kind;

            #[inline]
            fn from_raw(id: u32) -> Self {
                Self(id)
            }

            #[inline]
            fn raw(self) -> u32 {
                self.0
            }
        }
    };
}

scene_handle!(
    /// A unique identifier for a real polygon in the scene
    PolygonHandle,
    "Polygon"
);

scene_handle!(
    /// A unique identifier for a real mirror in the scene
    MirrorHandle,
    "Mirror"
);

scene_handle!(
    /// A unique identifier for a real viewer in the scene
    ViewerHandle,
    "Viewer"
);
