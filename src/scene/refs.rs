use crate::core::{MirrorHandle, PolygonHandle, ViewerHandle};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

macro_rules! virtual_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
        pub struct $name(pub(crate) u32);

        impl $name {
            /// Position of the object in its reflection set's flattened list
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub(crate) fn from_index(index: usize) -> Self {
                Self(index as u32)
            }
        }
    };
}

virtual_id!(
    /// Index of a virtual polygon within the reflection set that created it.
    ///
    /// Ids are only meaningful until that set is rebuilt.
    VirtualPolygonId
);

virtual_id!(
    /// Index of a virtual mirror within the reflection set that created it
    VirtualMirrorId
);

virtual_id!(
    /// Index of a virtual viewer within the reflection set that created it
    VirtualViewerId
);

/// Either a real polygon in the scene or a virtual one in a reflection set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum PolygonRef {
    Real(PolygonHandle),
    Virtual(VirtualPolygonId),
}

/// Either a real mirror in the scene or a virtual one in a reflection set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum MirrorRef {
    Real(MirrorHandle),
    Virtual(VirtualMirrorId),
}

/// Either a real viewer in the scene or a virtual one in a reflection set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ViewerRef {
    Real(ViewerHandle),
    Virtual(VirtualViewerId),
}

impl PolygonRef {
    #[inline]
    pub fn is_real(&self) -> bool {
        matches!(self, Self::Real(_))
    }
}

impl MirrorRef {
    #[inline]
    pub fn is_real(&self) -> bool {
        matches!(self, Self::Real(_))
    }
}

impl ViewerRef {
    #[inline]
    pub fn is_real(&self) -> bool {
        matches!(self, Self::Real(_))
    }
}

impl From<PolygonHandle> for PolygonRef {
    fn from(handle: PolygonHandle) -> Self {
        Self::Real(handle)
    }
}

impl From<VirtualPolygonId> for PolygonRef {
    fn from(id: VirtualPolygonId) -> Self {
        Self::Virtual(id)
    }
}

impl From<MirrorHandle> for MirrorRef {
    fn from(handle: MirrorHandle) -> Self {
        Self::Real(handle)
    }
}

impl From<VirtualMirrorId> for MirrorRef {
    fn from(id: VirtualMirrorId) -> Self {
        Self::Virtual(id)
    }
}

impl From<ViewerHandle> for ViewerRef {
    fn from(handle: ViewerHandle) -> Self {
        Self::Real(handle)
    }
}

impl From<VirtualViewerId> for ViewerRef {
    fn from(id: VirtualViewerId) -> Self {
        Self::Virtual(id)
    }
}
