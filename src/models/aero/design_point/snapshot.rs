use serde::Serialize;

/// Flat record of a design point's inputs and derived quantities.
///
/// All values are in SI units (capacity in ampere-seconds).
/// A snapshot is a copy; it does not follow later changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub mass: f64,
    pub span: f64,
    pub wing_area: f64,
    pub aspect_ratio: f64,
    pub cd0: f64,
    pub profile_drag: f64,
    pub cl_max: f64,
    pub discharge_exponent: f64,
    pub propulsive_efficiency: f64,
    pub capacity: f64,
    pub voltage: f64,
    pub discharge_time: f64,
    pub airspeed: f64,
    pub air_density: f64,

    /// Model name of the propeller.
    pub propeller: String,

    pub induced_drag_factor: f64,
    pub dynamic_pressure: f64,
    pub stall_speed: f64,
    pub is_stalled: bool,
    pub lift_coefficient: f64,
    pub drag_coefficient: f64,
    pub drag: f64,
    pub required_power: f64,
    pub power: f64,
    pub endurance: f64,
    pub range: f64,
}
