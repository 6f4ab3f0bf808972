//! Propeller performance from manufacturer test-stand data.
//!
//! A [`PropellerModel`] is built once from a performance file:
//!
//! 1. The file is retrieved from a [`DataSource`].
//! 2. Its text is parsed into a [`PerformanceTable`] ([`parse_table`]).
//! 3. Every column is converted to internal units ([`normalize`]) using the
//!    source's [`UnitMap`].
//! 4. A [`PerformanceSurface`] is fit to the (airspeed, thrust, power) samples.
//!
//! The model is immutable afterwards and is meant to be shared, typically
//! behind an [`Arc`](std::sync::Arc), by every design point that flies it.
//!
//! ```no_run
//! use twine_aero::models::propulsion::propeller::{Directory, PropellerModel, UnitMap};
//! use uom::si::{f64::{Force, Velocity}, force::newton, power::watt, velocity::meter_per_second};
//!
//! let source = Directory::new("data/apc");
//! let prop = PropellerModel::fetch("PER3_20x13E", &source, &UnitMap::apc())?;
//!
//! let power = prop.power(
//!     Velocity::new::<meter_per_second>(20.0),
//!     Force::new::<newton>(5.0),
//! );
//! println!("{} W", power.get::<watt>());
//! # Ok::<(), twine_aero::models::propulsion::propeller::PropellerError>(())
//! ```

mod core;
mod error;
mod name;
mod source;

pub use self::core::{
    Column, MIN_DATA_VALUES, PerformanceRow, PerformanceSurface, PerformanceTable, PowerEstimate,
    SECTION_MARKER, SurfaceError, UnitError, UnitMap, normalize, parse_table, target_unit,
};
pub use error::PropellerError;
pub use name::{InvalidModelName, ModelName};
pub use source::{APC_FILES_URL, DataSource, Directory, FetchError};

#[cfg(test)]
pub(crate) use self::core::test_support;

use log::debug;
use uom::si::f64::{Force, Power, Velocity};

/// Performance of one propeller, in internal units.
#[derive(Debug, Clone)]
pub struct PropellerModel {
    name: ModelName,
    table: PerformanceTable,
    surface: PerformanceSurface,
}

impl PropellerModel {
    /// Retrieves the performance file for `name` and builds a model from it.
    ///
    /// A failed fetch is returned as-is; nothing is parsed.
    ///
    /// # Errors
    ///
    /// Returns a [`PropellerError`] if the name has no size, the fetch fails,
    /// a column has no unit mapping, or the data cannot support a surface.
    pub fn fetch(
        name: &str,
        source: &impl DataSource,
        units: &UnitMap,
    ) -> Result<Self, PropellerError> {
        let name = ModelName::new(name)?;
        let bytes = source.fetch(name.file_name())?;
        Self::from_bytes(name, &bytes, units)
    }

    /// Builds a model from the raw contents of a performance file.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected;
    /// the parser already skips any line it cannot read.
    ///
    /// # Errors
    ///
    /// Returns a [`PropellerError`] if a column has no unit mapping or the
    /// data cannot support a surface.
    pub fn from_bytes(
        name: ModelName,
        bytes: &[u8],
        units: &UnitMap,
    ) -> Result<Self, PropellerError> {
        Self::from_text(name, &String::from_utf8_lossy(bytes), units)
    }

    /// Builds a model from the text of a performance file.
    ///
    /// # Errors
    ///
    /// Returns a [`PropellerError`] if a column has no unit mapping or the
    /// data cannot support a surface.
    pub fn from_text(name: ModelName, text: &str, units: &UnitMap) -> Result<Self, PropellerError> {
        let table = normalize(&parse_table(text), units)?;
        let surface = PerformanceSurface::new(&table)?;

        debug!(
            "built propeller model {name}: {} rows across {} rpm sections",
            table.len(),
            table.rpms().len()
        );

        Ok(Self {
            name,
            table,
            surface,
        })
    }

    #[must_use]
    pub fn name(&self) -> &ModelName {
        &self.name
    }

    /// Diameter label parsed from the model name.
    #[must_use]
    pub fn diameter(&self) -> &str {
        self.name.diameter()
    }

    /// Pitch label parsed from the model name.
    #[must_use]
    pub fn pitch(&self) -> &str {
        self.name.pitch()
    }

    /// The normalized performance table.
    #[must_use]
    pub fn table(&self) -> &PerformanceTable {
        &self.table
    }

    #[must_use]
    pub fn surface(&self) -> &PerformanceSurface {
        &self.surface
    }

    /// Power from the performance surface at the given airspeed and thrust.
    ///
    /// See [`PerformanceSurface::evaluate`] to learn whether the value was
    /// extrapolated.
    #[must_use]
    pub fn power(&self, airspeed: Velocity, thrust: Force) -> Power {
        self.surface.power(airspeed, thrust)
    }
}
