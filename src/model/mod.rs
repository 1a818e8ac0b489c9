//! Data model for OCR input and derived output.
//!
//! Blocks are the input graph as delivered by the OCR service. Tables,
//! titles and sizing charts are derived from them and never mutated once
//! built.

mod block;
mod sizing;
mod table;

pub use block::{
    Block, CellBlock, EntityType, Relationship, RelationshipType, TableBlock, TitleBlock,
    WordBlock,
};
pub use sizing::{Measurement, Size, SizingChart, DEFAULT_UNIT};
pub use table::Table;

use serde::{Deserialize, Serialize};

/// Tables and titles recovered from one uploaded image.
///
/// Titles and tables are independent lists; the position of a title says
/// nothing about which table it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessedImage {
    /// Assembled tables in structured-table order
    #[serde(default)]
    pub tables: Vec<Table>,

    /// Resolved titles in TABLE_TITLE block order
    #[serde(default)]
    pub titles: Vec<String>,
}

impl ProcessedImage {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if neither tables nor titles were found.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.titles.is_empty()
    }
}
