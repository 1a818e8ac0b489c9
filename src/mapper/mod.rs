//! Mapping of assembled tables to the sizing chart model.
//!
//! Each image result becomes one [`SizingChart`]. Every table of the image
//! contributes one [`Size`](crate::model::Size) per body row, labelled by
//! column 0, with one [`Measurement`](crate::model::Measurement) per
//! numeric cell, labelled by the header row.

mod number;
mod options;

pub use number::parse_measurement;
pub use options::MapOptions;

use chrono::Utc;
use rayon::prelude::*;

use crate::error::{Diagnostic, Diagnostics};
use crate::model::{ProcessedImage, SizingChart, Table};

/// Converts processed images into sizing charts.
#[derive(Debug, Clone, Default)]
pub struct SizingChartMapper {
    options: MapOptions,
}

impl SizingChartMapper {
    /// Create a mapper with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapper with custom options.
    pub fn with_options(options: MapOptions) -> Self {
        Self { options }
    }

    /// Get the mapping options.
    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Map every image result to a chart.
    ///
    /// The output always holds exactly one chart per input result, in
    /// input order, with ids starting at 1.
    pub fn map(&self, results: &[ProcessedImage]) -> Vec<SizingChart> {
        self.map_with_diagnostics(results).0
    }

    /// Map every image result to a chart, returning the diagnostics
    /// reported along the way.
    pub fn map_with_diagnostics(&self, results: &[ProcessedImage]) -> (Vec<SizingChart>, Diagnostics) {
        let mapped: Vec<(SizingChart, Diagnostics)> = if self.options.parallel {
            results
                .par_iter()
                .enumerate()
                .map(|(index, image)| self.map_collecting(index, image))
                .collect()
        } else {
            results
                .iter()
                .enumerate()
                .map(|(index, image)| self.map_collecting(index, image))
                .collect()
        };

        let mut diagnostics = Diagnostics::new();
        let mut charts = Vec::with_capacity(mapped.len());
        for (chart, local) in mapped {
            diagnostics.extend(local);
            charts.push(chart);
        }

        log::debug!(
            "SizingChartMapper: {} charts, {} sizes",
            charts.len(),
            charts.iter().map(|c| c.sizes.len()).sum::<usize>()
        );

        (charts, diagnostics)
    }

    fn map_collecting(&self, index: usize, image: &ProcessedImage) -> (SizingChart, Diagnostics) {
        let mut local = Diagnostics::new();
        let chart = self.map_image(index, image, &mut local);
        (chart, local)
    }

    /// Map the result at 0-based batch position `index`.
    pub fn map_image(
        &self,
        index: usize,
        image: &ProcessedImage,
        diagnostics: &mut Diagnostics,
    ) -> SizingChart {
        let timestamp = self.options.timestamp.unwrap_or_else(Utc::now);
        let mut chart = SizingChart::new(index as u32 + 1, timestamp);

        for (table_index, table) in image.tables.iter().enumerate() {
            self.add_table(&mut chart, table_index, table, diagnostics);
        }

        chart
    }

    fn add_table(
        &self,
        chart: &mut SizingChart,
        table_index: usize,
        table: &Table,
        diagnostics: &mut Diagnostics,
    ) {
        let header = match table.header() {
            Some(header) if table.rows() >= 2 && table.cols() >= 2 => header,
            _ => {
                diagnostics.report(Diagnostic::InsufficientTableShape {
                    chart_id: chart.id,
                    table_index,
                    rows: table.rows(),
                    cols: table.cols(),
                });
                return;
            }
        };

        let chart_id = chart.id;
        for (offset, row) in table.body().iter().enumerate() {
            let size_label = row.first().cloned().unwrap_or_default();
            let size = chart.push_size(size_label);

            for (col, cell) in row.iter().enumerate().skip(1) {
                match parse_measurement(cell) {
                    Some(value) => {
                        size.push_measurement(header[col].clone(), value, self.options.unit.clone());
                    }
                    None => diagnostics.report(Diagnostic::UnparseableMeasurement {
                        chart_id,
                        table_index,
                        row: offset + 1,
                        col,
                        value: cell.clone(),
                    }),
                }
            }
        }
    }
}
