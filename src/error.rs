//! Error types for the sizechart library.
//!
//! Two kinds of failure exist. [`Error`] covers problems outside the table
//! pipeline (reading files, JSON syntax, unrecognized input shapes) and is
//! returned to the caller. [`Diagnostic`] covers malformed OCR data inside
//! the pipeline: it is logged and collected, and the pipeline carries on
//! with whatever survived.

use std::io;
use thiserror::Error;

/// Result type alias for sizechart operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur outside the table pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON input is neither an upload envelope, an OCR document nor a
    /// block list.
    #[error("Unknown input: expected an upload envelope, a document with Blocks, or a block array")]
    UnknownInput,

    /// Error during rendering (Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

/// A non-fatal problem found while processing a block graph or mapping
/// tables to sizing charts.
///
/// Each variant names the smallest unit of data that was dropped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The block collection is not a sequence; nothing was processed.
    #[error("Malformed input: block collection is not an array (found {found})")]
    MalformedInput {
        /// JSON type that was found instead of an array
        found: &'static str,
    },

    /// One element of the block collection could not be decoded.
    #[error("Malformed block at index {index}: {reason}")]
    MalformedBlock {
        /// Position in the input collection
        index: usize,
        /// Decoder message
        reason: String,
    },

    /// A structured table references no CELL blocks.
    #[error("No cells found for table {table_id}")]
    MissingCells {
        /// Id of the dropped TABLE block
        table_id: String,
    },

    /// A table has no usable row/column indices.
    #[error("Invalid row or column indices for table {table_id}")]
    InvalidDimensions {
        /// Id of the dropped TABLE block
        table_id: String,
    },

    /// A table's indices describe a grid larger than the assembler allocates.
    #[error("Grid of {rows}x{cols} cells for table {table_id} exceeds the size limit")]
    OversizedGrid {
        /// Id of the dropped TABLE block
        table_id: String,
        /// Largest row index
        rows: usize,
        /// Largest column index
        cols: usize,
    },

    /// A cell lies outside the grid computed for its table.
    #[error("Invalid cell indices: row={row:?}, col={col:?} for table {table_id}")]
    OutOfBoundsCell {
        /// Id of the TABLE block
        table_id: String,
        /// Id of the skipped CELL block
        cell_id: String,
        /// 1-based row index, if the cell carried one
        row: Option<i64>,
        /// 1-based column index, if the cell carried one
        col: Option<i64>,
    },

    /// A measurement cell does not start with a number.
    #[error("Invalid measurement value {value:?} in chart {chart_id}, table {table_index}, row {row}, column {col}")]
    UnparseableMeasurement {
        /// Chart the table belongs to
        chart_id: u32,
        /// 0-based table position within its image result
        table_index: usize,
        /// 0-based grid row
        row: usize,
        /// 0-based grid column
        col: usize,
        /// Raw cell text
        value: String,
    },

    /// A table is too small to hold a header row and a size column.
    #[error("Table {table_index} in chart {chart_id} does not have enough data ({rows}x{cols})")]
    InsufficientTableShape {
        /// Chart the table belongs to
        chart_id: u32,
        /// 0-based table position within its image result
        table_index: usize,
        /// Row count of the skipped table
        rows: usize,
        /// Column count of the skipped table
        cols: usize,
    },
}

/// Discriminant of a [`Diagnostic`], used for counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// See [`Diagnostic::MalformedInput`]
    MalformedInput,
    /// See [`Diagnostic::MalformedBlock`]
    MalformedBlock,
    /// See [`Diagnostic::MissingCells`]
    MissingCells,
    /// See [`Diagnostic::InvalidDimensions`]
    InvalidDimensions,
    /// See [`Diagnostic::OversizedGrid`]
    OversizedGrid,
    /// See [`Diagnostic::OutOfBoundsCell`]
    OutOfBoundsCell,
    /// See [`Diagnostic::UnparseableMeasurement`]
    UnparseableMeasurement,
    /// See [`Diagnostic::InsufficientTableShape`]
    InsufficientTableShape,
}

impl Diagnostic {
    /// Get the kind of this diagnostic.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Diagnostic::MalformedInput { .. } => DiagnosticKind::MalformedInput,
            Diagnostic::MalformedBlock { .. } => DiagnosticKind::MalformedBlock,
            Diagnostic::MissingCells { .. } => DiagnosticKind::MissingCells,
            Diagnostic::InvalidDimensions { .. } => DiagnosticKind::InvalidDimensions,
            Diagnostic::OversizedGrid { .. } => DiagnosticKind::OversizedGrid,
            Diagnostic::OutOfBoundsCell { .. } => DiagnosticKind::OutOfBoundsCell,
            Diagnostic::UnparseableMeasurement { .. } => DiagnosticKind::UnparseableMeasurement,
            Diagnostic::InsufficientTableShape { .. } => DiagnosticKind::InsufficientTableShape,
        }
    }
}

/// Ordered collection of diagnostics gathered during one call.
///
/// Every diagnostic is logged at `warn` level when it is recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and record a diagnostic.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
        self.items.push(diagnostic);
    }

    /// Append already-reported diagnostics without logging them again.
    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over diagnostics in the order they were reported.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Count diagnostics of one kind.
    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|d| d.kind() == kind).count()
    }

}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
