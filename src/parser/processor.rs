//! Block graph processing: tables and titles for one image.

use serde_json::Value;

use crate::error::Diagnostics;
use crate::model::{Block, ProcessedImage};

use super::assembler::TableAssembler;
use super::graph::BlockGraph;
use super::options::ProcessOptions;
use super::title::TitleResolver;

/// Turns the block collection of one image into tables and titles.
///
/// Processing never fails: malformed data is reported as diagnostics and
/// the result holds whatever could be recovered.
#[derive(Debug, Clone, Default)]
pub struct BlockProcessor {
    options: ProcessOptions,
}

impl BlockProcessor {
    /// Create a processor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with custom options.
    pub fn with_options(options: ProcessOptions) -> Self {
        Self { options }
    }

    /// Get the processing options.
    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// Process a raw JSON block collection.
    pub fn process(&self, blocks: &Value) -> ProcessedImage {
        self.process_with_diagnostics(blocks).0
    }

    /// Process a raw JSON block collection, returning the diagnostics
    /// reported along the way.
    pub fn process_with_diagnostics(&self, blocks: &Value) -> (ProcessedImage, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let graph = BlockGraph::from_value(blocks, &mut diagnostics);
        let image = self.process_graph(&graph, &mut diagnostics);
        (image, diagnostics)
    }

    /// Process already decoded blocks.
    pub fn process_blocks(&self, blocks: Vec<Block>) -> (ProcessedImage, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let graph = BlockGraph::from_blocks(blocks);
        let image = self.process_graph(&graph, &mut diagnostics);
        (image, diagnostics)
    }

    /// Process an indexed graph.
    pub fn process_graph(&self, graph: &BlockGraph, diagnostics: &mut Diagnostics) -> ProcessedImage {
        let tables =
            TableAssembler::with_options(graph, self.options.clone()).assemble_all(diagnostics);
        let titles = TitleResolver::new(graph).resolve_all();

        log::debug!(
            "BlockProcessor: {} tables, {} titles",
            tables.len(),
            titles.len()
        );

        ProcessedImage { tables, titles }
    }
}
