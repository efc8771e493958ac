use crate::beam::TraceSettings;
use crate::error::OpticsError;
use crate::projection::DEFAULT_PROJECTION_TOLERANCE;
use crate::reflection::{InfiniteReflectionConfig, ObjectKinds};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// How virtual objects are produced and kept up to date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ReflectionMode {
    /// Depth-bounded reflection tree, repositioned incrementally after drags
    #[default]
    FixedDepth,

    /// Opacity-fading layers, cleared and rebuilt on every refresh
    InfiniteFade,
}

/// Configuration parameters for an optics sandbox
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SandboxConfig {
    /// Number of reflection levels built in [`ReflectionMode::FixedDepth`]
    pub recursive_reflection_depth: u32,

    /// The reflection strategy
    pub reflection_mode: ReflectionMode,

    /// Which object kinds get virtual counterparts
    pub reflected_kinds: ObjectKinds,

    /// Ray tracer limits used for projections
    pub trace: TraceSettings,

    /// Maximum distance between a real projection's endpoint and the viewer
    pub projection_tolerance: f64,

    /// Limits for [`ReflectionMode::InfiniteFade`]
    pub infinite: InfiniteReflectionConfig,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            recursive_reflection_depth: 2,
            reflection_mode: ReflectionMode::FixedDepth,
            reflected_kinds: ObjectKinds::all(),
            trace: TraceSettings::default(),
            projection_tolerance: DEFAULT_PROJECTION_TOLERANCE,
            infinite: InfiniteReflectionConfig::default(),
        }
    }
}

impl SandboxConfig {
    /// Checks every parameter, naming the first one out of range
    pub fn validate(&self) -> Result<()> {
        if !(self.projection_tolerance >= 0.0) {
            return Err(OpticsError::InvalidParameter(format!(
                "projection_tolerance must be non-negative, got {}",
                self.projection_tolerance
            )));
        }
        if !(self.trace.self_intersection_epsilon >= 0.0) {
            return Err(OpticsError::InvalidParameter(format!(
                "self_intersection_epsilon must be non-negative, got {}",
                self.trace.self_intersection_epsilon
            )));
        }
        if self.reflection_mode == ReflectionMode::InfiniteFade {
            self.infinite.validate()?;
        }
        Ok(())
    }
}
