//! Steady-flight performance of a fixed-wing electric aircraft.
//!
//! A [`DesignPoint`] pairs an aircraft configuration with a shared
//! [`PropellerModel`] and derives drag, power, endurance, and range at the
//! configured airspeed. Every derived quantity is recomputed from the inputs,
//! except propulsive power, which is evaluated once per instance.
//!
//! Design points are immutable. Changing an input produces a new design point
//! with nothing memoized:
//!
//! ```
//! # use std::sync::Arc;
//! # use twine_aero::models::aero::{DesignPoint, DesignPointConfig};
//! # use twine_aero::models::propulsion::propeller::{ModelName, PropellerModel, UnitMap};
//! use uom::si::{f64::Velocity, velocity::meter_per_second};
//! # let text = "PROP RPM = 3000\n\
//! #     0 0 0 .1 .06 .4 8 5\n30 .5 .4 .04 .05 .3 7 2\n\
//! #     PROP RPM = 6000\n0 0 0 .1 .06 3 35 22\n60 .5 .4 .04 .05 2.8 30 8\n";
//! # let name = ModelName::new("PER3_20x13E")?;
//! # let prop = Arc::new(PropellerModel::from_text(name, text, &UnitMap::apc())?);
//!
//! let cruise = DesignPoint::new(DesignPointConfig::default(), prop)?;
//! let dash = cruise.with_airspeed(Velocity::new::<meter_per_second>(28.0))?;
//!
//! assert!(dash.drag() > cruise.drag());
//! assert!(!cruise.is_stalled());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod level_speed;
mod snapshot;

pub use config::DesignPointConfig;
pub use error::DesignPointError;
pub use level_speed::{LevelFlight, LevelSpeedConfig, LevelSpeedError};
pub use snapshot::Snapshot;

use std::{
    f64::consts::PI,
    sync::{Arc, OnceLock},
};

use num_traits::Zero;
use uom::si::{
    area::square_meter,
    electric_charge::coulomb,
    electric_potential::volt,
    f64::{Force, Length, Power, Pressure, Time, Velocity},
    force::newton,
    length::meter,
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    power::watt,
    pressure::pascal,
    time::second,
    velocity::meter_per_second,
};

use crate::{
    models::propulsion::propeller::PropellerModel,
    support::constraint::{
        Constrained, Constraint, NonNegative, StrictlyPositive, UnitIntervalLowerOpen,
    },
};

/// Gravitational acceleration used for weight, in m/s².
pub const GRAVITY: f64 = 9.81;

/// An aircraft configuration at one airspeed, with its derived performance.
#[derive(Debug)]
pub struct DesignPoint {
    config: DesignPointConfig,
    propeller: Arc<PropellerModel>,
    power: OnceLock<Power>,
}

/// Copies share the propeller but start with nothing memoized.
impl Clone for DesignPoint {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            propeller: Arc::clone(&self.propeller),
            power: OnceLock::new(),
        }
    }
}

impl DesignPoint {
    /// Creates a design point flying `propeller`.
    ///
    /// # Errors
    ///
    /// Returns [`DesignPointError::InvalidInput`] if a dimension, mass,
    /// coefficient, battery rating, airspeed, or density is not strictly
    /// positive, a drag term is negative, or the propulsive efficiency is
    /// outside `(0, 1]`.
    pub fn new(
        config: DesignPointConfig,
        propeller: Arc<PropellerModel>,
    ) -> Result<Self, DesignPointError> {
        validate(&config)?;
        Ok(Self {
            config,
            propeller,
            power: OnceLock::new(),
        })
    }

    /// Returns a new design point with the inputs changed by `update`.
    ///
    /// # Errors
    ///
    /// Returns [`DesignPointError::InvalidInput`] if the updated inputs are invalid.
    pub fn with_changes(
        &self,
        update: impl FnOnce(&mut DesignPointConfig),
    ) -> Result<Self, DesignPointError> {
        let mut config = self.config;
        update(&mut config);
        Self::new(config, Arc::clone(&self.propeller))
    }

    /// Returns a new design point flying at `airspeed`.
    ///
    /// # Errors
    ///
    /// Returns [`DesignPointError::InvalidInput`] if the airspeed is not strictly positive.
    pub fn with_airspeed(&self, airspeed: Velocity) -> Result<Self, DesignPointError> {
        self.with_changes(|config| config.airspeed = airspeed)
    }

    /// Yields a design point for each airspeed, in order.
    pub fn sweep<I>(&self, airspeeds: I) -> impl Iterator<Item = Result<Self, DesignPointError>>
    where
        I: IntoIterator<Item = Velocity>,
    {
        airspeeds
            .into_iter()
            .map(|airspeed| self.with_airspeed(airspeed))
    }

    #[must_use]
    pub fn config(&self) -> &DesignPointConfig {
        &self.config
    }

    #[must_use]
    pub fn propeller(&self) -> &Arc<PropellerModel> {
        &self.propeller
    }

    /// Induced-drag factor `k = 1/(π·AR) + profile_drag`.
    #[must_use]
    pub fn induced_drag_factor(&self) -> f64 {
        1.0 / (PI * self.config.aspect_ratio) + self.config.profile_drag
    }

    /// Dynamic pressure `q = ½·ρ·U²`.
    #[must_use]
    pub fn dynamic_pressure(&self) -> Pressure {
        Pressure::new::<pascal>(self.q())
    }

    /// Lift coefficient needed to carry the weight, `cl = g·m/(q·S)`.
    #[must_use]
    pub fn lift_coefficient(&self) -> f64 {
        self.weight() / (self.q() * self.area())
    }

    /// Drag coefficient `cd = cd0 + k·cl²`.
    #[must_use]
    pub fn drag_coefficient(&self) -> f64 {
        self.config.cd0 + self.induced_drag_factor() * self.lift_coefficient().powi(2)
    }

    /// Drag force `q·S·cd`.
    #[must_use]
    pub fn drag(&self) -> Force {
        Force::new::<newton>(self.drag_newtons())
    }

    /// Power required to overcome drag at the baseline propulsive efficiency,
    /// `q·U·cd·S/pe`.
    #[must_use]
    pub fn required_power(&self) -> Power {
        Power::new::<watt>(self.required_watts())
    }

    /// Speed at which the maximum lift coefficient just carries the weight.
    #[must_use]
    pub fn stall_speed(&self) -> Velocity {
        let rho = self.rho();
        let v = (2.0 * self.weight() / (rho * self.area() * self.config.cl_max)).sqrt();
        Velocity::new::<meter_per_second>(v)
    }

    /// True if the airspeed is below the stall speed.
    #[must_use]
    pub fn is_stalled(&self) -> bool {
        self.config.airspeed < self.stall_speed()
    }

    /// Speed that minimizes [`required_power`](Self::required_power),
    /// where `U⁴ = 4·k·W²/(3·ρ²·S²·cd0)`.
    ///
    /// This may lie below the stall speed.
    #[must_use]
    pub fn min_power_speed(&self) -> Velocity {
        let rho = self.rho();
        let s = self.area();
        let w = self.weight();
        let u4 = 4.0 * self.induced_drag_factor() * w * w
            / (3.0 * rho * rho * s * s * self.config.cd0);
        Velocity::new::<meter_per_second>(u4.powf(0.25))
    }

    /// Propulsive power drawn from the battery.
    ///
    /// Computed as `drag·U / (pe · P(U, drag/2))`, where `P` is read once from
    /// the propeller's performance surface at half the drag. The result is
    /// memoized for the lifetime of this design point.
    pub fn power(&self) -> Power {
        *self.power.get_or_init(|| {
            let drag = self.drag_newtons();
            let u = self.u();
            let delivered = self
                .propeller
                .power(self.config.airspeed, Force::new::<newton>(0.5 * drag))
                .get::<watt>();
            Power::new::<watt>(drag * u / (self.config.propulsive_efficiency * delivered))
        })
    }

    /// Flight time on one battery, from a Peukert-type discharge law.
    ///
    /// Zero when stalled; otherwise `(V·C/P)^n · Rt^(1-n)`.
    pub fn endurance(&self) -> Time {
        if self.is_stalled() {
            return Time::zero();
        }

        let energy = self.config.voltage.get::<volt>() * self.config.capacity.get::<coulomb>();
        let n = self.config.discharge_exponent;
        let rt = self.config.discharge_time.get::<second>();
        let t = (energy / self.power().get::<watt>()).powf(n) * rt.powf(1.0 - n);
        Time::new::<second>(t)
    }

    /// Distance covered in [`endurance`](Self::endurance) at the configured airspeed.
    pub fn range(&self) -> Length {
        Length::new::<meter>(self.endurance().get::<second>() * self.u())
    }

    /// Records every input and derived quantity.
    pub fn snapshot(&self) -> Snapshot {
        let c = &self.config;
        Snapshot {
            mass: c.mass.get::<kilogram>(),
            span: c.span.get::<meter>(),
            wing_area: self.area(),
            aspect_ratio: c.aspect_ratio,
            cd0: c.cd0,
            profile_drag: c.profile_drag,
            cl_max: c.cl_max,
            discharge_exponent: c.discharge_exponent,
            propulsive_efficiency: c.propulsive_efficiency,
            capacity: c.capacity.get::<coulomb>(),
            voltage: c.voltage.get::<volt>(),
            discharge_time: c.discharge_time.get::<second>(),
            airspeed: self.u(),
            air_density: self.rho(),
            propeller: self.propeller.name().to_string(),
            induced_drag_factor: self.induced_drag_factor(),
            dynamic_pressure: self.q(),
            stall_speed: self.stall_speed().get::<meter_per_second>(),
            is_stalled: self.is_stalled(),
            lift_coefficient: self.lift_coefficient(),
            drag_coefficient: self.drag_coefficient(),
            drag: self.drag_newtons(),
            required_power: self.required_watts(),
            power: self.power().get::<watt>(),
            endurance: self.endurance().get::<second>(),
            range: self.range().get::<meter>(),
        }
    }

    fn u(&self) -> f64 {
        self.config.airspeed.get::<meter_per_second>()
    }

    fn rho(&self) -> f64 {
        self.config.air_density.get::<kilogram_per_cubic_meter>()
    }

    fn area(&self) -> f64 {
        self.config.wing_area.get::<square_meter>()
    }

    fn weight(&self) -> f64 {
        GRAVITY * self.config.mass.get::<kilogram>()
    }

    fn q(&self) -> f64 {
        0.5 * self.rho() * self.u().powi(2)
    }

    fn drag_newtons(&self) -> f64 {
        self.q() * self.area() * self.drag_coefficient()
    }

    fn required_watts(&self) -> f64 {
        self.q() * self.u() * self.drag_coefficient() * self.area()
            / self.config.propulsive_efficiency
    }
}

fn validate(config: &DesignPointConfig) -> Result<(), DesignPointError> {
    check::<_, StrictlyPositive>("span", config.span)?;
    check::<_, StrictlyPositive>("mass", config.mass)?;
    check::<_, StrictlyPositive>("wing_area", config.wing_area)?;
    check::<_, StrictlyPositive>("aspect_ratio", config.aspect_ratio)?;
    check::<_, NonNegative>("cd0", config.cd0)?;
    check::<_, NonNegative>("profile_drag", config.profile_drag)?;
    check::<_, StrictlyPositive>("cl_max", config.cl_max)?;
    check::<_, StrictlyPositive>("discharge_exponent", config.discharge_exponent)?;
    check::<_, UnitIntervalLowerOpen>("propulsive_efficiency", config.propulsive_efficiency)?;
    check::<_, StrictlyPositive>("capacity", config.capacity)?;
    check::<_, StrictlyPositive>("voltage", config.voltage)?;
    check::<_, StrictlyPositive>("discharge_time", config.discharge_time)?;
    check::<_, StrictlyPositive>("airspeed", config.airspeed)?;
    check::<_, StrictlyPositive>("air_density", config.air_density)?;
    Ok(())
}

fn check<T, C: Constraint<T>>(field: &'static str, value: T) -> Result<(), DesignPointError> {
    Constrained::<T, C>::new(value)
        .map(|_| ())
        .map_err(|source| DesignPointError::InvalidInput { field, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Mass, length::kilometer, time::hour};

    use crate::models::propulsion::propeller::{
        ModelName, UnitMap,
        test_support::{FIXTURE, FIXTURE_NAME},
    };

    fn propeller() -> Arc<PropellerModel> {
        let name = ModelName::new(FIXTURE_NAME).unwrap();
        Arc::new(PropellerModel::from_text(name, FIXTURE, &UnitMap::apc()).unwrap())
    }

    fn reference() -> DesignPoint {
        DesignPoint::new(DesignPointConfig::default(), propeller()).unwrap()
    }

    fn mps(v: f64) -> Velocity {
        Velocity::new::<meter_per_second>(v)
    }

    #[test]
    fn reference_aerodynamics() {
        let dp = reference();

        assert_relative_eq!(dp.dynamic_pressure().get::<pascal>(), 245.0, max_relative = 1e-6);
        assert_relative_eq!(dp.induced_drag_factor(), 0.047_588_736, max_relative = 1e-6);
        assert_relative_eq!(dp.lift_coefficient(), 0.799_305_269_3, max_relative = 1e-6);
        assert_relative_eq!(dp.drag_coefficient(), 0.060_403_915_7, max_relative = 1e-6);
        assert_relative_eq!(dp.required_power().get::<watt>(), 621.408_302_9, max_relative = 1e-6);
        assert_relative_eq!(
            dp.drag().get::<newton>(),
            245.0 * 0.682_337_5 * 0.060_403_915_7,
            max_relative = 1e-6
        );
    }

    #[test]
    fn published_reference_coefficients() {
        // The published lift, drag, and power figures for the reference
        // airframe correspond to cl = 0.73872085 with no propulsive loss.
        let base = DesignPointConfig::default();
        let q = 245.0;
        let s = base.wing_area.get::<square_meter>();
        let dp = DesignPoint::new(
            DesignPointConfig {
                mass: Mass::new::<kilogram>(0.738_720_85 * q * s / GRAVITY),
                propulsive_efficiency: 1.0,
                ..base
            },
            propeller(),
        )
        .unwrap();

        assert_relative_eq!(dp.dynamic_pressure().get::<pascal>(), 245.0, max_relative = 1e-6);
        assert_relative_eq!(dp.induced_drag_factor(), 0.047_588_736, max_relative = 1e-6);
        assert_relative_eq!(dp.lift_coefficient(), 0.738_720_85, max_relative = 1e-6);
        assert_relative_eq!(dp.drag_coefficient(), 0.055_969_58, max_relative = 1e-6);
        assert_relative_eq!(dp.required_power().get::<watt>(), 187.131_695_5, max_relative = 1e-6);
    }

    #[test]
    fn stall() {
        let dp = reference();
        let stall = dp.stall_speed().get::<meter_per_second>();
        assert_relative_eq!(stall, 15.682_477, max_relative = 1e-6);
        assert!(!dp.is_stalled());
        assert!(dp.endurance() > Time::zero());

        let slow = dp.with_airspeed(mps(stall - 0.5)).unwrap();
        assert!(slow.is_stalled());
        assert_eq!(slow.endurance(), Time::zero());
        assert_eq!(slow.range(), Length::zero());

        // Exactly at the stall speed the aircraft still flies.
        let edge = dp.with_airspeed(dp.stall_speed()).unwrap();
        assert!(!edge.is_stalled());
    }

    #[test]
    fn power_reads_the_propeller_at_half_drag() {
        let dp = reference();
        let drag = dp.drag();
        let delivered = dp
            .propeller()
            .power(dp.config().airspeed, drag * 0.5)
            .get::<watt>();
        let expected = drag.get::<newton>() * 20.0 / (0.325 * delivered);

        assert_relative_eq!(dp.power().get::<watt>(), expected, max_relative = 1e-12);
        assert!(
            !dp.propeller()
                .surface()
                .evaluate(dp.config().airspeed, drag * 0.5)
                .extrapolated
        );
    }

    #[test]
    fn endurance_and_range() {
        let dp = reference();
        let p = dp.power().get::<watt>();
        let expected = (37.0 * 34.0 * 3600.0 / p).powf(1.3) * 3600_f64.powf(-0.3);

        assert_relative_eq!(dp.endurance().get::<second>(), expected, max_relative = 1e-9);
        assert_relative_eq!(
            dp.range().get::<kilometer>(),
            expected * 20.0 / 1000.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn peukert_exponent_of_one_is_ideal() {
        let dp = reference()
            .with_changes(|c| c.discharge_exponent = 1.0)
            .unwrap();
        let p = dp.power().get::<watt>();
        assert_relative_eq!(
            dp.endurance().get::<hour>(),
            37.0 * 34.0 / p,
            max_relative = 1e-9
        );
    }

    #[test]
    fn copies_start_without_memoized_power() {
        let original = reference();
        let original_power = original.power();
        assert_eq!(original.power.get(), Some(&original_power));

        let copy = original.clone();
        assert!(copy.power.get().is_none());
        assert!(Arc::ptr_eq(copy.propeller(), original.propeller()));
        assert_eq!(copy.power(), original_power);

        let faster = copy.with_airspeed(mps(25.0)).unwrap();
        assert!(faster.power.get().is_none());
        assert_ne!(faster.power(), original_power);

        assert_eq!(original.power.get(), Some(&original_power));
        assert_eq!(original.config().airspeed, mps(20.0));
    }

    #[test]
    fn derived_values_follow_inputs() {
        let light = reference();
        let heavy = light
            .with_changes(|c| c.mass = Mass::new::<kilogram>(20.0))
            .unwrap();

        assert!(heavy.lift_coefficient() > light.lift_coefficient());
        assert!(heavy.stall_speed() > light.stall_speed());
        assert!(heavy.required_power() > light.required_power());
    }

    #[test]
    fn sweep_builds_one_point_per_airspeed() {
        let dp = reference();
        let points: Vec<DesignPoint> = dp
            .sweep((18..33).map(|v| mps(f64::from(v))))
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(points.len(), 15);
        assert_eq!(points[0].config().airspeed, mps(18.0));
        assert_eq!(points[14].config().airspeed, mps(32.0));

        let min = dp.min_power_speed().get::<meter_per_second>();
        assert!(min < 18.0);
        for pair in points.windows(2) {
            assert!(pair[1].required_power() > pair[0].required_power());
        }
    }

    #[test]
    fn min_power_speed_minimizes_required_power() {
        let dp = reference();
        let best = dp.min_power_speed();
        let at = |v: Velocity| dp.with_airspeed(v).unwrap().required_power();

        assert!(at(best) < at(best * 0.95));
        assert!(at(best) < at(best * 1.05));
    }

    #[test]
    fn rejects_invalid_inputs() {
        let dp = reference();

        assert_eq!(
            dp.with_airspeed(mps(0.0)).unwrap_err(),
            DesignPointError::InvalidInput {
                field: "airspeed",
                source: crate::support::constraint::ConstraintError::Zero,
            }
        );

        let err = dp
            .with_changes(|c| c.propulsive_efficiency = 1.5)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid propulsive_efficiency: value is above the maximum allowed"
        );

        let err = dp.with_changes(|c| c.cd0 = -0.01).unwrap_err();
        assert!(matches!(err, DesignPointError::InvalidInput { field: "cd0", .. }));

        assert!(dp.with_changes(|c| c.profile_drag = 0.0).is_ok());
    }

    #[test]
    fn snapshot_is_flat_and_complete() {
        let dp = reference();
        let snapshot = dp.snapshot();

        assert_eq!(snapshot.propeller, "PER3_20x13E");
        assert_relative_eq!(snapshot.capacity, 122_400.0, max_relative = 1e-12);
        assert_relative_eq!(snapshot.discharge_time, 3600.0, max_relative = 1e-12);
        assert_relative_eq!(
            snapshot.range,
            snapshot.endurance * snapshot.airspeed,
            max_relative = 1e-12
        );
        assert_eq!(snapshot.power, dp.power().get::<watt>());

        let json = serde_json::to_value(&snapshot).unwrap();
        let fields = json.as_object().unwrap();
        assert_eq!(fields.len(), 26);
        assert!(fields.values().all(|v| !v.is_object() && !v.is_array()));
        for key in ["mass", "propeller", "stall_speed", "is_stalled", "power", "range"] {
            assert!(fields.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn design_points_share_one_propeller() {
        let prop = propeller();
        let a = DesignPoint::new(DesignPointConfig::default(), Arc::clone(&prop)).unwrap();
        let b = a.with_airspeed(mps(24.0)).unwrap();

        assert_eq!(Arc::strong_count(&prop), 3);
        assert!(Arc::ptr_eq(a.propeller(), b.propeller()));
    }
}
