//! # Twine Aero
//!
//! Propeller and fixed-wing flight performance models for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! ## Crate layout
//!
//! - [`models`]: Propeller performance from manufacturer data and aircraft
//!   design-point performance built on it.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Typical use
//!
//! 1. Build a [`PropellerModel`](models::propulsion::propeller::PropellerModel)
//!    once from a performance file.
//! 2. Share it behind an [`Arc`](std::sync::Arc) across any number of
//!    [`DesignPoint`](models::aero::DesignPoint)s.
//! 3. Read drag, power, endurance, and range from each design point, or
//!    take a flat [`Snapshot`](models::aero::Snapshot) of all of them.
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable.

pub mod models;
pub mod support;
