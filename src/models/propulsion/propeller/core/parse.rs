//! Reader for APC-style propeller performance files.
//!
//! A file is a series of sections, each opened by a `PROP RPM = <n>` header
//! and followed by whitespace-separated data lines. Free text is interleaved
//! everywhere (titles, column headings, unit lines, footnotes), so any line
//! that does not yield a full row is dropped rather than reported.

use std::sync::LazyLock;

use log::{debug, trace};
use regex::Regex;

use super::table::{PerformanceRow, PerformanceTable};

/// Literal that marks a section header line.
pub const SECTION_MARKER: &str = "PROP RPM =";

/// Number of data values a line must yield, not counting the carried rpm.
pub const MIN_DATA_VALUES: usize = 8;

static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PROP RPM =\s*(\d+)").expect("valid header pattern"));

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?(?:[0-9]*\.[0-9]+|[0-9]+)").expect("valid number pattern"));

/// Parses the text of a performance file into a [`PerformanceTable`].
///
/// Each row carries the rpm of the most recent section header.
/// Lines before the first header, blank lines, and lines that yield fewer
/// than [`MIN_DATA_VALUES`] numbers are skipped.
#[must_use]
pub fn parse_table(text: &str) -> PerformanceTable {
    let mut rpm = 0.0;
    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for line in text.lines() {
        if line.contains(SECTION_MARKER) {
            if let Some(value) = header_rpm(line) {
                rpm = value;
            } else {
                trace!("section header without rpm: {line:?}");
            }
            continue;
        }

        if rpm <= 0.0 || line.trim().is_empty() {
            continue;
        }

        match data_row(rpm, line) {
            Some(row) => rows.push(row),
            None => {
                trace!("dropped line: {line:?}");
                dropped += 1;
            }
        }
    }

    debug!("parsed {} performance rows, dropped {dropped} lines", rows.len());
    PerformanceTable::new(rows)
}

fn header_rpm(line: &str) -> Option<f64> {
    let digits = HEADER.captures(line)?.get(1)?.as_str();
    digits.parse::<u32>().ok().map(f64::from)
}

/// Recovers one number per whitespace token and builds a row from the first nine.
fn data_row(rpm: f64, line: &str) -> Option<PerformanceRow> {
    let mut values = [0.0; 9];
    values[0] = rpm;

    let mut count = 0;
    for number in line.split_whitespace().filter_map(token_value) {
        if count == MIN_DATA_VALUES {
            break;
        }
        values[count + 1] = number;
        count += 1;
    }

    (count == MIN_DATA_VALUES).then(|| PerformanceRow::from_values(values))
}

/// Returns the first number embedded in a token, such as `0.505` in `0.505*`.
fn token_value(token: &str) -> Option<f64> {
    NUMBER.find(token)?.as_str().parse().ok()
}
