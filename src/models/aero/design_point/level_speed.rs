//! Iterative solver for the maximum level-flight airspeed.
//!
//! Finds the airspeed at which the drag power [`DesignPoint::required_power`]
//! equals a given available power, searching upward from the slowest
//! flyable speed where required power is increasing.

mod config;
mod error;
mod problem;

pub use config::LevelSpeedConfig;
pub use error::LevelSpeedError;

use log::debug;
use twine_solvers::equation::bisection;
use uom::si::{
    f64::{Power, Velocity},
    power::watt,
    velocity::meter_per_second,
};

use super::DesignPoint;

use problem::{LevelFlightModel, LevelSpeedProblem};

/// An airspeed and the power needed to hold it in level flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelFlight {
    pub airspeed: Velocity,
    pub required_power: Power,
}

impl DesignPoint {
    /// Solves for the fastest level-flight airspeed sustainable with `available` power.
    ///
    /// The search starts at the larger of the stall and minimum-power speeds
    /// and ends at [`LevelSpeedConfig::max_airspeed`].
    ///
    /// # Errors
    ///
    /// Returns [`LevelSpeedError::InsufficientPower`] if the aircraft cannot
    /// fly level at all, [`LevelSpeedError::OutOfRange`] if the solution lies
    /// beyond the search limit, [`LevelSpeedError::DesignPoint`] if the search
    /// limit is not a valid airspeed, or a solver error if bisection fails.
    pub fn max_level_speed(
        &self,
        available: Power,
        config: LevelSpeedConfig,
    ) -> Result<LevelFlight, LevelSpeedError> {
        let slowest = if self.min_power_speed() > self.stall_speed() {
            self.min_power_speed()
        } else {
            self.stall_speed()
        };

        let required_at =
            |airspeed: Velocity| self.with_airspeed(airspeed).map(|at| at.required_power());

        let minimum = required_at(slowest)?;
        if minimum > available {
            return Err(LevelSpeedError::InsufficientPower {
                available,
                required: minimum,
            });
        }

        if config.max_airspeed <= slowest {
            return Err(LevelSpeedError::OutOfRange {
                max_airspeed: config.max_airspeed,
                required: minimum,
            });
        }

        let limit = required_at(config.max_airspeed)?;
        if limit < available {
            return Err(LevelSpeedError::OutOfRange {
                max_airspeed: config.max_airspeed,
                required: limit,
            });
        }

        let model = LevelFlightModel::new(self);
        let problem = LevelSpeedProblem::new(available);

        let solution = bisection::solve(
            &model,
            &problem,
            [
                slowest.get::<meter_per_second>(),
                config.max_airspeed.get::<meter_per_second>(),
            ],
            &config.bisection(),
            |event: &bisection::Event<'_, _, _>| {
                // An airspeed the design point rejects is treated as too fast.
                if event.result().is_err() {
                    return Some(bisection::Action::assume_positive());
                }
                None
            },
        )?;

        if solution.status != bisection::Status::Converged {
            return Err(LevelSpeedError::MaxIters {
                residual: Power::new::<watt>(solution.residual),
                iters: solution.iters,
            });
        }

        debug!(
            "level speed {:.3} m/s for {:.1} W after {} iterations",
            solution.snapshot.output.airspeed.get::<meter_per_second>(),
            available.get::<watt>(),
            solution.iters
        );

        Ok(solution.snapshot.output)
    }
}
