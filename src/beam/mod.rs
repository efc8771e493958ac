//! Multi-bounce light beam propagation through a set of mirrors.

pub(crate) mod tracer;
mod light_beam;

pub use tracer::{
    calculate_reflection_path, trace_path, TraceSettings, DEFAULT_MAX_REFLECTIONS,
    SELF_INTERSECTION_EPSILON,
};
pub use light_beam::LightBeam;
