use twine_solvers::equation::bisection;
use uom::si::{
    f64::{Power, Velocity},
    power::watt,
    velocity::meter_per_second,
};

/// Solver configuration for the maximum level-flight airspeed.
#[derive(Debug, Clone, Copy)]
pub struct LevelSpeedConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance for the airspeed search variable.
    pub speed_tol: Velocity,

    /// Absolute tolerance for the power residual (required - available).
    pub power_tol: Power,

    /// Upper end of the airspeed search.
    pub max_airspeed: Velocity,
}

impl Default for LevelSpeedConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            speed_tol: Velocity::new::<meter_per_second>(1e-9),
            power_tol: Power::new::<watt>(1e-9),
            max_airspeed: Velocity::new::<meter_per_second>(100.0),
        }
    }
}

impl LevelSpeedConfig {
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.speed_tol.get::<meter_per_second>(),
            x_rel_tol: 0.0,
            residual_tol: self.power_tol.get::<watt>(),
        }
    }
}
