//! Table orientation detection.
//!
//! Size charts are printed both ways: sizes down the first column with
//! measurement names across the top, or sizes across the top with
//! measurement names down the side. The canonical layout is the former.
//! Orientation is guessed by counting known size labels in the first row
//! and in the first column; only those two header lines are inspected, so
//! multi-row headers are not understood.

use crate::model::Table;

/// Labels recognized as garment sizes (compared trimmed and uppercased).
const SIZE_LABELS: &[&str] = &[
    "XS", "S", "SM", "M", "MD", "L", "LG", "XL", "2XL", "3XL", "4XL", "5XL", "6XL", "7XL", "8XL",
    "9XL", "10XL", "XXS", "XXL", "XXXL", "XXXXL", "XXXXXL", "ONE SIZE", "FREE SIZE", "0", "2", "4",
    "6", "8", "10", "12", "14", "16", "18",
];

/// Labels recognized as body measurements (compared trimmed and uppercased).
const MEASUREMENT_LABELS: &[&str] = &[
    "CHEST",
    "WAIST",
    "HIP",
    "SHOULDER",
    "SLEEVE",
    "LENGTH",
    "INSEAM",
    "ARM",
    "NECK",
    "BUST",
    "THIGH",
    "KNEE",
    "CALF",
    "ANKLE",
    "SLEEVE LENGTH",
    "INSEAM (SHORT)",
    "INSEAM (REGULAR)",
    "INSEAM (TALL)",
];

/// Check if a cell reads as a size label such as `"XL"` or `"one size"`.
pub fn is_size_label(text: &str) -> bool {
    matches_vocabulary(SIZE_LABELS, text)
}

/// Check if a cell reads as a measurement name such as `"Chest"`.
pub fn is_measurement_label(text: &str) -> bool {
    matches_vocabulary(MEASUREMENT_LABELS, text)
}

fn matches_vocabulary(vocabulary: &[&str], text: &str) -> bool {
    let normalized = text.trim().to_uppercase();
    vocabulary.iter().any(|label| *label == normalized)
}

/// Label counts over the header row and header column of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrientationReport {
    /// Size labels in row 0, excluding column 0
    pub sizes_in_header_row: usize,
    /// Size labels in column 0, excluding row 0
    pub sizes_in_header_column: usize,
    /// Measurement labels in row 0, excluding column 0
    pub measurements_in_header_row: usize,
    /// Measurement labels in column 0, excluding row 0
    pub measurements_in_header_column: usize,
}

impl OrientationReport {
    /// Count labels in the header row and column of `table`.
    ///
    /// Returns `None` for tables smaller than 2x2.
    pub fn analyze(table: &Table) -> Option<Self> {
        if table.rows() < 2 || table.cols() < 2 {
            return None;
        }

        let header_row = table.header().map(|r| &r[1..]).unwrap_or(&[]);
        let header_column: Vec<&str> = table.first_column().skip(1).collect();

        Some(Self {
            sizes_in_header_row: header_row.iter().filter(|s| is_size_label(s)).count(),
            sizes_in_header_column: header_column.iter().filter(|s| is_size_label(s)).count(),
            measurements_in_header_row: header_row
                .iter()
                .filter(|s| is_measurement_label(s))
                .count(),
            measurements_in_header_column: header_column
                .iter()
                .filter(|s| is_measurement_label(s))
                .count(),
        })
    }

    /// Sizes run along the header row: strictly more size labels there than
    /// in the header column. Ties keep the table as it is.
    pub fn sizes_in_header_row(&self) -> bool {
        self.sizes_in_header_row > self.sizes_in_header_column
    }
}

/// Bring a table into canonical orientation (sizes down column 0).
///
/// Tables smaller than 2x2 and tables already in canonical orientation are
/// returned unchanged.
pub fn normalize(table: Table) -> Table {
    match OrientationReport::analyze(&table) {
        Some(report) if report.sizes_in_header_row() => {
            log::debug!(
                "Orientation: transposing {}x{} table ({} size labels in header row vs {} in header column)",
                table.rows(),
                table.cols(),
                report.sizes_in_header_row,
                report.sizes_in_header_column
            );
            table.transpose()
        }
        _ => table,
    }
}
