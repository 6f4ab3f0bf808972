//! Public Twine models.
//!
//! # Organization
//!
//! - [`propulsion`]: propeller performance surfaces fit to tabulated data.
//! - [`aero`]: steady-flight performance of an aircraft flying a propeller.
//!
//! # Model structure
//!
//! Models with non-trivial internals keep them in a private `core` submodule,
//! re-exporting only the types callers need. The [`twine_core::Model`]
//! implementations are thin adapters over those APIs.

pub mod aero;
pub mod propulsion;
