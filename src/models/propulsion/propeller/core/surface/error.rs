use thiserror::Error;

/// Errors that can occur while building a [`PerformanceSurface`](super::PerformanceSurface).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// Too few distinct (airspeed, thrust) samples to span a surface.
    #[error("need at least 3 distinct samples, found {found}")]
    InsufficientSamples {
        /// Number of distinct, finite samples available.
        found: usize,
    },

    /// All samples lie on a single line, so no triangle can be formed.
    #[error("all {count} samples are collinear")]
    Collinear {
        /// Number of distinct, finite samples available.
        count: usize,
    },
}
