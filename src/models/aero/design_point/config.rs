use uom::si::{
    area::square_meter,
    electric_charge::ampere_hour,
    electric_potential::volt,
    f64::{Area, ElectricCharge, ElectricPotential, Length, Mass, MassDensity, Time, Velocity},
    length::meter,
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    time::hour,
    velocity::meter_per_second,
};

/// Inputs describing an aircraft at one operating point.
///
/// The default is the reference airframe: a 2.6 m span, 13.6 kg electric
/// aircraft with a 34 Ah, 37 V battery flying at 20 m/s at sea level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignPointConfig {
    /// Wing reference dimension (span).
    pub span: Length,

    pub mass: Mass,

    /// Wing reference area.
    pub wing_area: Area,

    pub aspect_ratio: f64,

    /// Zero-lift drag coefficient.
    pub cd0: f64,

    /// Profile-drag increment added to the induced-drag factor.
    pub profile_drag: f64,

    /// Maximum lift coefficient.
    pub cl_max: f64,

    /// Peukert exponent of the battery.
    pub discharge_exponent: f64,

    /// Baseline propulsive efficiency, in `(0, 1]`.
    pub propulsive_efficiency: f64,

    /// Rated battery capacity.
    pub capacity: ElectricCharge,

    pub voltage: ElectricPotential,

    /// Discharge time at which the capacity is rated.
    pub discharge_time: Time,

    pub airspeed: Velocity,

    pub air_density: MassDensity,
}

impl Default for DesignPointConfig {
    fn default() -> Self {
        let span = 2.6;
        Self {
            span: Length::new::<meter>(span),
            mass: Mass::new::<kilogram>(13.621),
            wing_area: Area::new::<square_meter>(0.100_937_5 * span * span),
            aspect_ratio: 8.0,
            cd0: 0.03,
            profile_drag: 0.0078,
            cl_max: 1.3,
            discharge_exponent: 1.3,
            propulsive_efficiency: 0.325,
            capacity: ElectricCharge::new::<ampere_hour>(34.0),
            voltage: ElectricPotential::new::<volt>(37.0),
            discharge_time: Time::new::<hour>(1.0),
            airspeed: Velocity::new::<meter_per_second>(20.0),
            air_density: MassDensity::new::<kilogram_per_cubic_meter>(1.225),
        }
    }
}
