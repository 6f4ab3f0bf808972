use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::{Power, Velocity};

use crate::models::aero::design_point::DesignPointError;

/// Errors that can occur while solving for the maximum level-flight airspeed.
#[derive(Debug, Error)]
pub enum LevelSpeedError {
    /// A design point along the search could not be built.
    #[error("design point rejected")]
    DesignPoint(#[from] DesignPointError),

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// Even the slowest flyable airspeed needs more than the available power.
    #[error("available power {available:?} is below the minimum required {required:?}")]
    InsufficientPower { available: Power, required: Power },

    /// The available power exceeds what is required at the search limit.
    #[error("level speed exceeds {max_airspeed:?}, where only {required:?} is required")]
    OutOfRange {
        max_airspeed: Velocity,
        required: Power,
    },

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Smallest power residual encountered during iteration.
        residual: Power,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
