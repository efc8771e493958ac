//! Light paths between a clicked virtual polygon and the viewer.
//!
//! The *virtual* projection is a straight line from the virtual polygon to the
//! viewer. The *real* projection leaves the real polygon and bounces off the
//! real mirrors; it is only kept while it actually reaches the viewer.

pub mod geometry;
pub mod manager;

pub use self::geometry::{
    virtual_projection, real_projection, real_projection_emission, is_valid_projection,
    ProjectionEmission, DEFAULT_PROJECTION_TOLERANCE,
};
pub use self::manager::{
    Projection, ProjectionContext, ProjectionManager, VirtualProjectionManager,
    RealProjectionManager,
};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// The two flavors of projection tracked per virtual polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ProjectionKind {
    /// Straight line from the virtual polygon to the viewer
    Virtual,

    /// Bounced path from the real polygon to the viewer
    Real,
}
