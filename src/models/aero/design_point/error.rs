use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors that can occur while constructing a [`DesignPoint`](super::DesignPoint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DesignPointError {
    /// An input violates its numeric constraint.
    #[error("invalid {field}: {source}")]
    InvalidInput {
        /// Name of the offending [`DesignPointConfig`](super::DesignPointConfig) field.
        field: &'static str,

        #[source]
        source: ConstraintError,
    },
}
