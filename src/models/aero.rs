//! Aerodynamic performance of fixed-wing electric aircraft.

pub mod design_point;
mod flight_performance;

pub use design_point::{
    DesignPoint, DesignPointConfig, DesignPointError, LevelFlight, LevelSpeedConfig,
    LevelSpeedError, Snapshot,
};
pub use flight_performance::FlightPerformance;
