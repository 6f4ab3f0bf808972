//! Conversion of raw table columns into the crate's internal units.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::support::units::{IncompatibleUnits, Unit, convert};

use super::table::{Column, PerformanceTable};

/// Source units for the columns of a performance table.
///
/// Target units are fixed per column (see [`target_unit`]); a `UnitMap`
/// only describes where a particular data source starts from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitMap {
    source: BTreeMap<Column, Unit>,
}

impl UnitMap {
    /// Creates a map with no columns registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The convention used by APC performance files.
    ///
    /// Airspeed is in mph, power in hp, torque in in·lbf and thrust in lbf.
    #[must_use]
    pub fn apc() -> Self {
        Column::ALL
            .into_iter()
            .fold(Self::new(), |map, column| {
                map.with(column, target_unit(column))
            })
            .with(Column::Airspeed, Unit::MilePerHour)
            .with(Column::Power, Unit::Horsepower)
            .with(Column::Torque, Unit::PoundForceInch)
            .with(Column::Thrust, Unit::PoundForce)
    }

    /// Registers (or replaces) the source unit for `column`.
    #[must_use]
    pub fn with(mut self, column: Column, unit: Unit) -> Self {
        self.source.insert(column, unit);
        self
    }

    /// Returns the source unit registered for `column`.
    #[must_use]
    pub fn source(&self, column: Column) -> Option<Unit> {
        self.source.get(&column).copied()
    }
}

/// Returns the internal unit every table is normalized into.
#[must_use]
pub const fn target_unit(column: Column) -> Unit {
    match column {
        Column::Rpm => Unit::RevolutionPerMinute,
        Column::Airspeed => Unit::MeterPerSecond,
        Column::Power => Unit::Watt,
        Column::Torque => Unit::NewtonMeter,
        Column::Thrust => Unit::Newton,
        Column::AdvanceRatio
        | Column::Efficiency
        | Column::ThrustCoeff
        | Column::PowerCoeff => Unit::Dimensionless,
    }
}

/// Errors that can occur while normalizing a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// No source unit was registered for a column.
    #[error("no unit registered for column {column}")]
    UnmappedColumn { column: Column },

    /// The registered source unit cannot be converted to the column's target unit.
    #[error("column {column}: {source}")]
    Incompatible {
        column: Column,
        #[source]
        source: IncompatibleUnits,
    },
}

/// Converts every column of `table` from its source unit in `units` to its target unit.
///
/// Row count and order are preserved.
///
/// # Errors
///
/// Returns [`UnitError`] if any column lacks a mapping or maps to an
/// incompatible unit. Coverage is checked before any value is converted.
pub fn normalize(table: &PerformanceTable, units: &UnitMap) -> Result<PerformanceTable, UnitError> {
    let plan = Column::ALL
        .into_iter()
        .map(|column| {
            let from = units
                .source(column)
                .ok_or(UnitError::UnmappedColumn { column })?;
            let to = target_unit(column);
            convert(1.0, from, to)
                .map_err(|source| UnitError::Incompatible { column, source })?;
            Ok((column, from, to))
        })
        .collect::<Result<Vec<_>, UnitError>>()?;

    let mut normalized = table.clone();
    for (column, from, to) in plan {
        if from == to {
            continue;
        }
        normalized.try_map_column(column, |value| {
            convert(value, from, to).map_err(|source| UnitError::Incompatible { column, source })
        })?;
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::propulsion::propeller::core::{
        PerformanceRow, parse_table, test_support::FIXTURE,
    };

    fn imperial_row() -> PerformanceRow {
        PerformanceRow::from_values([
            3000.0, 10.0, 0.176, 0.2835, 0.0952, 0.0591, 0.41, 8.621, 4.363,
        ])
    }

    #[test]
    fn converts_apc_columns() {
        let table = PerformanceTable::new(vec![imperial_row()]);
        let normalized = normalize(&table, &UnitMap::apc()).unwrap();
        let row = normalized.rows()[0];

        assert_relative_eq!(row.rpm, 3000.0, max_relative = 1e-12);
        assert_relative_eq!(row.airspeed, 4.4704, max_relative = 1e-12);
        assert_relative_eq!(row.power, 0.41 * 745.699_871_582_270_2, max_relative = 1e-6);
        assert_relative_eq!(row.torque, 8.621 * 0.112_984_829_027_616_7, max_relative = 1e-6);
        assert_relative_eq!(row.thrust, 4.363 * 4.448_221_615_260_5, max_relative = 1e-6);

        // Dimensionless columns are untouched.
        assert_eq!(row.advance_ratio, 0.176);
        assert_eq!(row.efficiency, 0.2835);
        assert_eq!(row.thrust_coeff, 0.0952);
        assert_eq!(row.power_coeff, 0.0591);
    }

    #[test]
    fn preserves_row_count_and_order() {
        let table = parse_table(FIXTURE);
        let normalized = normalize(&table, &UnitMap::apc()).unwrap();

        assert_eq!(normalized.len(), table.len());
        for (raw, si) in table.rows().iter().zip(normalized.rows()) {
            assert_eq!(raw.rpm, si.rpm);
            assert_relative_eq!(si.airspeed, raw.airspeed * 0.447_04, max_relative = 1e-12);
        }
    }

    #[test]
    fn already_normalized_data_is_unchanged() {
        let units = Column::ALL
            .into_iter()
            .fold(UnitMap::new(), |map, column| map.with(column, target_unit(column)));
        let table = PerformanceTable::new(vec![imperial_row()]);

        assert_eq!(normalize(&table, &units).unwrap(), table);
    }

    #[test]
    fn rejects_unmapped_column() {
        let units = UnitMap::new()
            .with(Column::Rpm, Unit::RevolutionPerMinute)
            .with(Column::Airspeed, Unit::MilePerHour);
        let table = PerformanceTable::new(vec![imperial_row()]);

        assert_eq!(
            normalize(&table, &units),
            Err(UnitError::UnmappedColumn {
                column: Column::AdvanceRatio
            })
        );
    }

    #[test]
    fn rejects_incompatible_unit() {
        let units = UnitMap::apc().with(Column::Thrust, Unit::Horsepower);
        let table = PerformanceTable::new(vec![imperial_row()]);

        let err = normalize(&table, &units).unwrap_err();
        assert_eq!(
            err,
            UnitError::Incompatible {
                column: Column::Thrust,
                source: IncompatibleUnits {
                    from: Unit::Horsepower,
                    to: Unit::Newton,
                },
            }
        );
        assert_eq!(err.to_string(), "column Thrust: cannot convert hp to N");
    }

    #[test]
    fn empty_table_still_requires_mappings() {
        let table = PerformanceTable::default();
        assert!(normalize(&table, &UnitMap::new()).is_err());
        assert!(normalize(&table, &UnitMap::apc()).unwrap().is_empty());
    }
}
