//! # sizechart
//!
//! Sizing chart extraction from OCR document-analysis output.
//!
//! This library takes the block graph produced by a document-analysis
//! service for a photographed size chart, rebuilds the detected tables as
//! rectangular string grids, turns them so that sizes run down the first
//! column, resolves table titles, and maps everything to a
//! sizing-chart / size / measurement model.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sizechart::{process_file, render};
//!
//! fn main() -> sizechart::Result<()> {
//!     // Process an upload response saved to disk
//!     let batch = process_file("upload.json")?;
//!
//!     // Show the tables as Markdown
//!     let options = render::RenderOptions::default();
//!     println!("{}", render::to_markdown(&batch.images, &options));
//!
//!     // And the charts as JSON
//!     println!("{}", render::to_json(&batch.charts, render::JsonFormat::Pretty)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Lenient decoding**: malformed blocks are reported, never fatal
//! - **Orientation normalization**: size labels always end up in column 0
//! - **Parallel processing**: uses Rayon across tables and images
//! - **Several input shapes**: upload envelopes, single documents, bare block lists

pub mod batch;
pub mod envelope;
pub mod error;
pub mod mapper;
pub mod model;
pub mod parser;
pub mod render;
pub mod stats;

// Re-export commonly used types
pub use batch::Batch;
pub use envelope::{
    detect_input, parse_response_bytes, parse_response_file, parse_response_reader, InputKind,
    UploadResponse,
};
pub use error::{Diagnostic, DiagnosticKind, Diagnostics, Error, Result};
pub use mapper::{MapOptions, SizingChartMapper};
pub use model::{Block, Measurement, ProcessedImage, Size, SizingChart, Table};
pub use parser::{BlockProcessor, ProcessOptions};
pub use render::{JsonFormat, RenderOptions};
pub use stats::ExtractionStats;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Process the block collection of one image.
///
/// Malformed input never fails: problems are logged and the affected
/// blocks, cells or tables are left out of the result.
///
/// # Example
///
/// ```
/// use serde_json::json;
///
/// let image = sizechart::process_blocks(&json!([]));
/// assert!(image.tables.is_empty());
/// assert!(image.titles.is_empty());
/// ```
pub fn process_blocks(blocks: &Value) -> ProcessedImage {
    BlockProcessor::new().process(blocks)
}

/// Process the block collection of one image with custom options.
pub fn process_blocks_with_options(blocks: &Value, options: ProcessOptions) -> ProcessedImage {
    BlockProcessor::with_options(options).process(blocks)
}

/// Process the block collection of one image, returning the diagnostics
/// reported along the way.
pub fn process_blocks_with_diagnostics(blocks: &Value) -> (ProcessedImage, Diagnostics) {
    BlockProcessor::new().process_with_diagnostics(blocks)
}

/// Map processed images to sizing charts, one chart per image.
///
/// # Example
///
/// ```
/// use sizechart::{map_to_sizing_charts, ProcessedImage, Table};
///
/// let image = ProcessedImage {
///     tables: vec![Table::from_strings(vec![vec!["", "Chest"], vec!["S", "36"]])],
///     titles: Vec::new(),
/// };
/// let charts = map_to_sizing_charts(&[image]);
/// assert_eq!(charts[0].sizes[0].measurements[0].value, 36.0);
/// ```
pub fn map_to_sizing_charts(images: &[ProcessedImage]) -> Vec<SizingChart> {
    SizingChartMapper::new().map(images)
}

/// Map processed images to sizing charts with custom options.
pub fn map_to_sizing_charts_with_options(
    images: &[ProcessedImage],
    options: MapOptions,
) -> Vec<SizingChart> {
    SizingChartMapper::with_options(options).map(images)
}

/// Map processed images to sizing charts, returning the diagnostics
/// reported along the way.
pub fn map_to_sizing_charts_with_diagnostics(
    images: &[ProcessedImage],
) -> (Vec<SizingChart>, Diagnostics) {
    SizingChartMapper::new().map_with_diagnostics(images)
}

/// Process every image of an upload response and map the results.
pub fn process_response(response: &UploadResponse, options: &ProcessOptions) -> Batch {
    Batch::process(response, options, &MapOptions::default())
}

/// Process every image of an upload response with custom mapping options.
pub fn process_response_with_options(
    response: &UploadResponse,
    process_options: &ProcessOptions,
    map_options: &MapOptions,
) -> Batch {
    Batch::process(response, process_options, map_options)
}

/// Process a JSON file holding an upload envelope, a single document or a
/// block list.
///
/// # Example
///
/// ```no_run
/// let batch = sizechart::process_file("upload.json").unwrap();
/// println!("Charts: {}", batch.charts.len());
/// ```
pub fn process_file<P: AsRef<Path>>(path: P) -> Result<Batch> {
    Sizechart::new().process_file(path)
}

/// Process JSON bytes holding an upload envelope, a single document or a
/// block list.
pub fn process_bytes(data: &[u8]) -> Result<Batch> {
    Sizechart::new().process_bytes(data)
}

/// Builder for processing upload responses.
///
/// # Example
///
/// ```no_run
/// use sizechart::Sizechart;
///
/// let batch = Sizechart::new()
///     .sequential()
///     .without_orientation()
///     .with_unit("in")
///     .process_file("upload.json")?;
/// # Ok::<(), sizechart::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sizechart {
    process_options: ProcessOptions,
    map_options: MapOptions,
}

impl Sizechart {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.process_options = self.process_options.sequential();
        self.map_options = self.map_options.sequential();
        self
    }

    /// Keep tables in the orientation they were detected in.
    pub fn without_orientation(mut self) -> Self {
        self.process_options = self.process_options.with_orientation(false);
        self
    }

    /// Set the unit attached to every measurement.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.map_options = self.map_options.with_unit(unit);
        self
    }

    /// Stamp every chart with a fixed time instead of the current one.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.map_options = self.map_options.with_timestamp(timestamp);
        self
    }

    /// Process an already decoded JSON input.
    pub fn process_value(&self, value: Value) -> Result<Batch> {
        let response = UploadResponse::from_value(value)?;
        Ok(self.process_response(&response))
    }

    /// Process an upload response.
    pub fn process_response(&self, response: &UploadResponse) -> Batch {
        Batch::process(response, &self.process_options, &self.map_options)
    }

    /// Process a JSON file.
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> Result<Batch> {
        let response = parse_response_file(path)?;
        Ok(self.process_response(&response))
    }

    /// Process JSON bytes.
    pub fn process_bytes(&self, data: &[u8]) -> Result<Batch> {
        let response = parse_response_bytes(data)?;
        Ok(self.process_response(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn chart_blocks() -> Value {
        json!([
            {"BlockType": "TABLE", "Id": "t", "EntityTypes": ["STRUCTURED_TABLE"],
             "Relationships": [{"Type": "CHILD", "Ids": ["c1", "c2", "c3", "c4"]}]},
            {"BlockType": "CELL", "Id": "c1", "RowIndex": 1, "ColumnIndex": 1},
            {"BlockType": "CELL", "Id": "c2", "RowIndex": 1, "ColumnIndex": 2,
             "Relationships": [{"Type": "CHILD", "Ids": ["w1"]}]},
            {"BlockType": "CELL", "Id": "c3", "RowIndex": 2, "ColumnIndex": 1,
             "Relationships": [{"Type": "CHILD", "Ids": ["w2"]}]},
            {"BlockType": "CELL", "Id": "c4", "RowIndex": 2, "ColumnIndex": 2,
             "Relationships": [{"Type": "CHILD", "Ids": ["w3"]}]},
            {"BlockType": "WORD", "Id": "w1", "Text": "Chest"},
            {"BlockType": "WORD", "Id": "w2", "Text": "S"},
            {"BlockType": "WORD", "Id": "w3", "Text": "36"}
        ])
    }

    #[test]
    fn test_sizechart_builder() {
        let builder = Sizechart::new().sequential().without_orientation().with_unit("in");

        assert!(!builder.process_options.parallel);
        assert!(!builder.process_options.normalize_orientation);
        assert!(!builder.map_options.parallel);
        assert_eq!(builder.map_options.unit, "in");
    }

    #[test]
    fn test_sizechart_builder_default() {
        let builder = Sizechart::default();
        assert!(builder.process_options.parallel);
        assert!(builder.process_options.normalize_orientation);
        assert_eq!(builder.map_options.unit, "cm");
        assert!(builder.map_options.timestamp.is_none());
    }

    #[test]
    fn test_process_blocks_empty() {
        let image = process_blocks(&json!([]));
        assert_eq!(image, ProcessedImage::new());
    }

    #[test]
    fn test_process_blocks_not_an_array() {
        let (image, diags) = process_blocks_with_diagnostics(&json!({"Blocks": 3}));
        assert!(image.is_empty());
        assert_eq!(diags.count_of(DiagnosticKind::MalformedInput), 1);
    }

    #[test]
    fn test_process_and_map() {
        let image = process_blocks(&chart_blocks());
        assert_eq!(image.tables.len(), 1);

        let charts = map_to_sizing_charts(&[image]);
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].sizes[0].label, "S");
        assert_eq!(charts[0].sizes[0].measurements[0].label, "Chest");
    }

    #[test]
    fn test_process_value_document_shape() {
        let time = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let batch = Sizechart::new()
            .sequential()
            .with_unit("in")
            .with_timestamp(time)
            .process_value(json!({"Blocks": chart_blocks()}))
            .unwrap();

        assert_eq!(batch.charts.len(), 1);
        assert_eq!(batch.charts[0].created_at, time);
        assert_eq!(batch.charts[0].sizes[0].measurements[0].unit, "in");
    }

    #[test]
    fn test_process_bytes_invalid_json() {
        let result = process_bytes(b"{not json");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_process_bytes_unknown_shape() {
        let result = process_bytes(b"42");
        assert!(matches!(result, Err(Error::UnknownInput)));
    }

    #[test]
    fn test_process_response_envelope() {
        let response = UploadResponse::from_block_lists([chart_blocks(), json!([])]);
        let batch = process_response(&response, &ProcessOptions::new().sequential());

        assert_eq!(batch.images.len(), 2);
        assert_eq!(batch.charts.len(), 2);
        assert_eq!(batch.charts[1].id, 2);
        assert!(batch.charts[1].is_empty());
    }
}
