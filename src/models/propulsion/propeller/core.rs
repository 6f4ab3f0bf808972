//! Propeller data pipeline: text → table → internal units → surface.

mod normalize;
mod parse;
mod surface;
mod table;

#[cfg(test)]
pub(crate) mod test_support;

pub use normalize::{UnitError, UnitMap, normalize, target_unit};
pub use parse::{MIN_DATA_VALUES, SECTION_MARKER, parse_table};
pub use surface::{PerformanceSurface, PowerEstimate, SurfaceError};
pub use table::{Column, PerformanceRow, PerformanceTable};
