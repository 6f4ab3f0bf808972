use thiserror::Error;

use super::{FetchError, InvalidModelName, SurfaceError, UnitError};

/// Errors that can occur while building a [`PropellerModel`](super::PropellerModel).
#[derive(Debug, Error)]
pub enum PropellerError {
    /// The model name carries no propeller size.
    #[error(transparent)]
    Name(#[from] InvalidModelName),

    /// The data source could not supply the performance file.
    #[error("data source failed")]
    Fetch(#[from] FetchError),

    /// A table column could not be converted to internal units.
    #[error("unit normalization failed")]
    Units(#[from] UnitError),

    /// The performance data cannot support an interpolation surface.
    #[error("performance surface construction failed")]
    Surface(#[from] SurfaceError),
}
