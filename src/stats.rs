//! Extraction statistics.

use serde::{Deserialize, Serialize};

use crate::batch::Batch;
use crate::error::DiagnosticKind;

/// Counts collected over a processed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of images processed
    pub image_count: u32,

    /// Number of tables assembled
    pub table_count: u32,

    /// Number of titles resolved
    pub title_count: u32,

    /// Number of sizes mapped
    pub size_count: u32,

    /// Number of measurements mapped
    pub measurement_count: u32,

    /// Block collections that were not arrays
    pub malformed_input_count: u32,

    /// Blocks that could not be decoded
    pub malformed_block_count: u32,

    /// Tables dropped during assembly (no cells, bad dimensions or oversized grid)
    pub dropped_table_count: u32,

    /// Cells skipped during assembly
    pub skipped_cell_count: u32,

    /// Tables skipped during mapping (smaller than 2x2)
    pub skipped_table_count: u32,

    /// Measurement cells that were not numeric
    pub skipped_measurement_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from a processed batch.
    pub fn from_batch(batch: &Batch) -> Self {
        let diags = &batch.diagnostics;
        let count = |kind| diags.count_of(kind) as u32;

        Self {
            image_count: batch.images.len() as u32,
            table_count: batch.all_tables().count() as u32,
            title_count: batch.all_titles().count() as u32,
            size_count: batch.charts.iter().map(|c| c.sizes.len()).sum::<usize>() as u32,
            measurement_count: batch
                .charts
                .iter()
                .map(|c| c.measurement_count())
                .sum::<usize>() as u32,
            malformed_input_count: count(DiagnosticKind::MalformedInput),
            malformed_block_count: count(DiagnosticKind::MalformedBlock),
            dropped_table_count: count(DiagnosticKind::MissingCells)
                + count(DiagnosticKind::InvalidDimensions)
                + count(DiagnosticKind::OversizedGrid),
            skipped_cell_count: count(DiagnosticKind::OutOfBoundsCell),
            skipped_table_count: count(DiagnosticKind::InsufficientTableShape),
            skipped_measurement_count: count(DiagnosticKind::UnparseableMeasurement),
        }
    }

    /// Total number of diagnostics counted.
    pub fn issue_count(&self) -> u32 {
        self.malformed_input_count
            + self.malformed_block_count
            + self.dropped_table_count
            + self.skipped_cell_count
            + self.skipped_table_count
            + self.skipped_measurement_count
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.image_count += other.image_count;
        self.table_count += other.table_count;
        self.title_count += other.title_count;
        self.size_count += other.size_count;
        self.measurement_count += other.measurement_count;
        self.malformed_input_count += other.malformed_input_count;
        self.malformed_block_count += other.malformed_block_count;
        self.dropped_table_count += other.dropped_table_count;
        self.skipped_cell_count += other.skipped_cell_count;
        self.skipped_table_count += other.skipped_table_count;
        self.skipped_measurement_count += other.skipped_measurement_count;
    }
}
