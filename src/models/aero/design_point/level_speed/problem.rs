use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{
    f64::{Power, Velocity},
    power::watt,
    velocity::meter_per_second,
};

use super::LevelFlight;
use crate::models::aero::design_point::{DesignPoint, DesignPointError};

/// Required power of a design point as a function of airspeed.
pub(super) struct LevelFlightModel<'a> {
    design: &'a DesignPoint,
}

impl<'a> LevelFlightModel<'a> {
    pub(super) fn new(design: &'a DesignPoint) -> Self {
        Self { design }
    }
}

impl Model for LevelFlightModel<'_> {
    type Input = Velocity;
    type Output = LevelFlight;
    type Error = DesignPointError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let at = self.design.with_airspeed(*input)?;
        Ok(LevelFlight {
            airspeed: *input,
            required_power: at.required_power(),
        })
    }
}

/// Residual is `required - available`, increasing with airspeed above the
/// minimum-power speed.
pub(super) struct LevelSpeedProblem {
    available: Power,
}

impl LevelSpeedProblem {
    pub(super) fn new(available: Power) -> Self {
        Self { available }
    }
}

impl EquationProblem<1> for LevelSpeedProblem {
    type Input = Velocity;
    type Output = LevelFlight;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Velocity::new::<meter_per_second>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        let required = output.required_power.get::<watt>();
        Ok([required - self.available.get::<watt>()])
    }
}
