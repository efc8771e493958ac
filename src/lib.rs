pub mod math;
pub mod geometry;
pub mod beam;
pub mod scene;
pub mod reflection;
pub mod projection;
pub mod core;

/// Re-export common types for easier usage
pub use crate::core::{OpticsSandbox, SandboxConfig, ReflectionMode, ClickOutcome};
pub use crate::core::{PolygonHandle, MirrorHandle, ViewerHandle};
pub use crate::scene::{Scene, Polygon, Mirror, Viewer, Style, SceneDescription};
pub use crate::geometry::Axis;
pub use crate::math::{Vector2, Point2};

/// Error types for the optics core
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum OpticsError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),

        #[error("Stale reflection reference: {0}")]
        StaleReflection(String),

        #[error("Internal error: {0}")]
        InternalError(String),
    }
}

/// Result type for optics operations
pub type Result<T> = std::result::Result<T, error::OpticsError>;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
