//! Unit conversion for tabulated measurements.
//!
//! Typed quantities throughout this crate use [`uom`].
//! Raw data files, however, arrive as bare numbers whose units are only known
//! by convention, so this module names those units with [`Unit`] and converts
//! plain magnitudes between them through [`uom`]'s unit definitions:
//!
//! ```
//! use twine_aero::support::units::{Unit, convert};
//!
//! let mps = convert(60.0, Unit::MilePerHour, Unit::MeterPerSecond).unwrap();
//! assert!((mps - 26.8224).abs() < 1e-9);
//!
//! // Units of different kinds never convert.
//! assert!(convert(1.0, Unit::Horsepower, Unit::Newton).is_err());
//! ```

use std::fmt;

use thiserror::Error;
use uom::si::{
    angular_velocity::{radian_per_second, revolution_per_minute, revolution_per_second},
    f64::{AngularVelocity, Force, Power, Torque, Velocity},
    force::{newton, pound_force},
    power::{horsepower, kilowatt, watt},
    torque::{newton_meter, pound_force_foot, pound_force_inch},
    velocity::{foot_per_second, kilometer_per_hour, knot, meter_per_second, mile_per_hour},
};

/// A unit of measure for a column of tabulated data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Unit {
    /// Pure number (ratios and coefficients).
    Dimensionless,

    RevolutionPerMinute,
    RevolutionPerSecond,
    RadianPerSecond,

    MeterPerSecond,
    KilometerPerHour,
    MilePerHour,
    FootPerSecond,
    Knot,

    Watt,
    Kilowatt,
    Horsepower,

    NewtonMeter,
    PoundForceInch,
    PoundForceFoot,

    Newton,
    PoundForce,
}

/// The physical quantity a [`Unit`] measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Ratio,
    RotationalSpeed,
    Velocity,
    Power,
    Torque,
    Force,
}

impl Unit {
    /// Returns the kind of quantity this unit measures.
    #[must_use]
    pub fn kind(self) -> Kind {
        match self {
            Self::Dimensionless => Kind::Ratio,
            Self::RevolutionPerMinute | Self::RevolutionPerSecond | Self::RadianPerSecond => {
                Kind::RotationalSpeed
            }
            Self::MeterPerSecond
            | Self::KilometerPerHour
            | Self::MilePerHour
            | Self::FootPerSecond
            | Self::Knot => Kind::Velocity,
            Self::Watt | Self::Kilowatt | Self::Horsepower => Kind::Power,
            Self::NewtonMeter | Self::PoundForceInch | Self::PoundForceFoot => Kind::Torque,
            Self::Newton | Self::PoundForce => Kind::Force,
        }
    }

    /// Returns the conventional abbreviation for this unit.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Dimensionless => "-",
            Self::RevolutionPerMinute => "rpm",
            Self::RevolutionPerSecond => "rev/s",
            Self::RadianPerSecond => "rad/s",
            Self::MeterPerSecond => "m/s",
            Self::KilometerPerHour => "km/h",
            Self::MilePerHour => "mph",
            Self::FootPerSecond => "ft/s",
            Self::Knot => "kn",
            Self::Watt => "W",
            Self::Kilowatt => "kW",
            Self::Horsepower => "hp",
            Self::NewtonMeter => "N·m",
            Self::PoundForceInch => "in·lbf",
            Self::PoundForceFoot => "ft·lbf",
            Self::Newton => "N",
            Self::PoundForce => "lbf",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when converting between units of different kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot convert {from} to {to}")]
pub struct IncompatibleUnits {
    pub from: Unit,
    pub to: Unit,
}

/// Converts a magnitude expressed in `from` units into `to` units.
///
/// # Errors
///
/// Returns [`IncompatibleUnits`] if the two units measure different quantities.
pub fn convert(value: f64, from: Unit, to: Unit) -> Result<f64, IncompatibleUnits> {
    let converted = match from.kind() {
        Kind::Ratio => (to == Unit::Dimensionless).then_some(value),
        Kind::RotationalSpeed => {
            rotational_speed(value, from).and_then(|q| rotational_speed_in(q, to))
        }
        Kind::Velocity => velocity(value, from).and_then(|q| velocity_in(q, to)),
        Kind::Power => power(value, from).and_then(|q| power_in(q, to)),
        Kind::Torque => torque(value, from).and_then(|q| torque_in(q, to)),
        Kind::Force => force(value, from).and_then(|q| force_in(q, to)),
    };

    converted.ok_or(IncompatibleUnits { from, to })
}

fn rotational_speed(value: f64, unit: Unit) -> Option<AngularVelocity> {
    match unit {
        Unit::RevolutionPerMinute => Some(AngularVelocity::new::<revolution_per_minute>(value)),
        Unit::RevolutionPerSecond => Some(AngularVelocity::new::<revolution_per_second>(value)),
        Unit::RadianPerSecond => Some(AngularVelocity::new::<radian_per_second>(value)),
        _ => None,
    }
}

fn rotational_speed_in(quantity: AngularVelocity, unit: Unit) -> Option<f64> {
    match unit {
        Unit::RevolutionPerMinute => Some(quantity.get::<revolution_per_minute>()),
        Unit::RevolutionPerSecond => Some(quantity.get::<revolution_per_second>()),
        Unit::RadianPerSecond => Some(quantity.get::<radian_per_second>()),
        _ => None,
    }
}

fn velocity(value: f64, unit: Unit) -> Option<Velocity> {
    match unit {
        Unit::MeterPerSecond => Some(Velocity::new::<meter_per_second>(value)),
        Unit::KilometerPerHour => Some(Velocity::new::<kilometer_per_hour>(value)),
        Unit::MilePerHour => Some(Velocity::new::<mile_per_hour>(value)),
        Unit::FootPerSecond => Some(Velocity::new::<foot_per_second>(value)),
        Unit::Knot => Some(Velocity::new::<knot>(value)),
        _ => None,
    }
}

fn velocity_in(quantity: Velocity, unit: Unit) -> Option<f64> {
    match unit {
        Unit::MeterPerSecond => Some(quantity.get::<meter_per_second>()),
        Unit::KilometerPerHour => Some(quantity.get::<kilometer_per_hour>()),
        Unit::MilePerHour => Some(quantity.get::<mile_per_hour>()),
        Unit::FootPerSecond => Some(quantity.get::<foot_per_second>()),
        Unit::Knot => Some(quantity.get::<knot>()),
        _ => None,
    }
}

fn power(value: f64, unit: Unit) -> Option<Power> {
    match unit {
        Unit::Watt => Some(Power::new::<watt>(value)),
        Unit::Kilowatt => Some(Power::new::<kilowatt>(value)),
        Unit::Horsepower => Some(Power::new::<horsepower>(value)),
        _ => None,
    }
}

fn power_in(quantity: Power, unit: Unit) -> Option<f64> {
    match unit {
        Unit::Watt => Some(quantity.get::<watt>()),
        Unit::Kilowatt => Some(quantity.get::<kilowatt>()),
        Unit::Horsepower => Some(quantity.get::<horsepower>()),
        _ => None,
    }
}

fn torque(value: f64, unit: Unit) -> Option<Torque> {
    match unit {
        Unit::NewtonMeter => Some(Torque::new::<newton_meter>(value)),
        Unit::PoundForceInch => Some(Torque::new::<pound_force_inch>(value)),
        Unit::PoundForceFoot => Some(Torque::new::<pound_force_foot>(value)),
        _ => None,
    }
}

fn torque_in(quantity: Torque, unit: Unit) -> Option<f64> {
    match unit {
        Unit::NewtonMeter => Some(quantity.get::<newton_meter>()),
        Unit::PoundForceInch => Some(quantity.get::<pound_force_inch>()),
        Unit::PoundForceFoot => Some(quantity.get::<pound_force_foot>()),
        _ => None,
    }
}

fn force(value: f64, unit: Unit) -> Option<Force> {
    match unit {
        Unit::Newton => Some(Force::new::<newton>(value)),
        Unit::PoundForce => Some(Force::new::<pound_force>(value)),
        _ => None,
    }
}

fn force_in(quantity: Force, unit: Unit) -> Option<f64> {
    match unit {
        Unit::Newton => Some(quantity.get::<newton>()),
        Unit::PoundForce => Some(quantity.get::<pound_force>()),
        _ => None,
    }
}
