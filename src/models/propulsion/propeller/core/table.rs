use std::fmt;

/// A column of a propeller performance table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Rpm,
    Airspeed,
    AdvanceRatio,
    Efficiency,
    ThrustCoeff,
    PowerCoeff,
    Power,
    Torque,
    Thrust,
}

impl Column {
    /// Every column, in the order values appear on a data line.
    pub const ALL: [Column; 9] = [
        Column::Rpm,
        Column::Airspeed,
        Column::AdvanceRatio,
        Column::Efficiency,
        Column::ThrustCoeff,
        Column::PowerCoeff,
        Column::Power,
        Column::Torque,
        Column::Thrust,
    ];

    /// Returns the column heading used in APC data files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Rpm => "rpm",
            Self::Airspeed => "V",
            Self::AdvanceRatio => "J",
            Self::Efficiency => "Pe",
            Self::ThrustCoeff => "Ct",
            Self::PowerCoeff => "Cp",
            Self::Power => "PWR",
            Self::Torque => "Torque",
            Self::Thrust => "Thrust",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One measured operating point of a propeller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceRow {
    pub rpm: f64,
    pub airspeed: f64,
    pub advance_ratio: f64,
    pub efficiency: f64,
    pub thrust_coeff: f64,
    pub power_coeff: f64,
    pub power: f64,
    pub torque: f64,
    pub thrust: f64,
}

impl PerformanceRow {
    /// Builds a row from values in [`Column::ALL`] order.
    #[must_use]
    pub fn from_values(values: [f64; 9]) -> Self {
        let [
            rpm,
            airspeed,
            advance_ratio,
            efficiency,
            thrust_coeff,
            power_coeff,
            power,
            torque,
            thrust,
        ] = values;

        Self {
            rpm,
            airspeed,
            advance_ratio,
            efficiency,
            thrust_coeff,
            power_coeff,
            power,
            torque,
            thrust,
        }
    }

    /// Returns the value stored in `column`.
    #[must_use]
    pub fn get(&self, column: Column) -> f64 {
        match column {
            Column::Rpm => self.rpm,
            Column::Airspeed => self.airspeed,
            Column::AdvanceRatio => self.advance_ratio,
            Column::Efficiency => self.efficiency,
            Column::ThrustCoeff => self.thrust_coeff,
            Column::PowerCoeff => self.power_coeff,
            Column::Power => self.power,
            Column::Torque => self.torque,
            Column::Thrust => self.thrust,
        }
    }

    fn get_mut(&mut self, column: Column) -> &mut f64 {
        match column {
            Column::Rpm => &mut self.rpm,
            Column::Airspeed => &mut self.airspeed,
            Column::AdvanceRatio => &mut self.advance_ratio,
            Column::Efficiency => &mut self.efficiency,
            Column::ThrustCoeff => &mut self.thrust_coeff,
            Column::PowerCoeff => &mut self.power_coeff,
            Column::Power => &mut self.power,
            Column::Torque => &mut self.torque,
            Column::Thrust => &mut self.thrust,
        }
    }
}

/// Ordered rows of a propeller performance file.
///
/// Rows keep the order in which they were read, so rows measured at the same
/// rpm stay contiguous.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceTable {
    rows: Vec<PerformanceRow>,
}

impl PerformanceTable {
    #[must_use]
    pub fn new(rows: Vec<PerformanceRow>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[PerformanceRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over the values of one column.
    pub fn column(&self, column: Column) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |row| row.get(column))
    }

    /// Returns the distinct rpm values in the order their sections appear.
    #[must_use]
    pub fn rpms(&self) -> Vec<f64> {
        let mut rpms: Vec<f64> = Vec::new();
        for rpm in self.column(Column::Rpm) {
            if rpms.last() != Some(&rpm) {
                rpms.push(rpm);
            }
        }
        rpms
    }

    /// Applies `f` to every value of `column`.
    ///
    /// # Errors
    ///
    /// Stops at the first error returned by `f` and returns it.
    pub(super) fn try_map_column<E>(
        &mut self,
        column: Column,
        mut f: impl FnMut(f64) -> Result<f64, E>,
    ) -> Result<(), E> {
        for row in &mut self.rows {
            let value = row.get_mut(column);
            *value = f(*value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(rpm: f64, airspeed: f64) -> PerformanceRow {
        PerformanceRow::from_values([rpm, airspeed, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7])
    }

    #[test]
    fn values_follow_column_order() {
        let r = row(3000.0, 10.0);
        let values: Vec<f64> = Column::ALL.iter().map(|c| r.get(*c)).collect();
        assert_eq!(values, [3000.0, 10.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7]);
        assert_eq!(r.thrust, 0.7);
    }

    #[test]
    fn rpm_sections_in_order() {
        let table = PerformanceTable::new(vec![
            row(3000.0, 0.0),
            row(3000.0, 10.0),
            row(1000.0, 0.0),
            row(2000.0, 0.0),
        ]);
        assert_eq!(table.rpms(), [3000.0, 1000.0, 2000.0]);
    }

    #[test]
    fn map_column_touches_only_that_column() {
        let mut table = PerformanceTable::new(vec![row(3000.0, 10.0), row(3000.0, 20.0)]);
        table
            .try_map_column::<()>(Column::Airspeed, |v| Ok(v * 2.0))
            .unwrap();

        assert_eq!(table.column(Column::Airspeed).collect::<Vec<_>>(), [20.0, 40.0]);
        assert_eq!(table.column(Column::Rpm).collect::<Vec<_>>(), [3000.0, 3000.0]);
    }
}
