//! Propulsion models.
//!
//! Propellers are modeled from tabulated test-stand data rather than from
//! blade geometry; see [`propeller`].

pub mod propeller;
