//! Block graph index.
//!
//! Owns the blocks of one OCR response and indexes them by type and by id,
//! so the assembler never has to rescan the flat block list.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Diagnostic, Diagnostics};
use crate::model::{Block, CellBlock, TableBlock, TitleBlock, WordBlock};

/// Indexed view over the blocks of one image.
#[derive(Debug, Clone, Default)]
pub struct BlockGraph {
    blocks: Vec<Block>,
    /// Positions of every block carrying a given id, ascending
    by_id: HashMap<String, Vec<usize>>,
    /// WORD id → text; a repeated id keeps the later text
    word_index: HashMap<String, String>,
    tables: Vec<usize>,
    cells: Vec<usize>,
    titles: Vec<usize>,
}

impl BlockGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a raw JSON block collection.
    ///
    /// A value that is not an array yields an empty graph and a
    /// [`Diagnostic::MalformedInput`]. Elements that do not decode as blocks
    /// are skipped with a [`Diagnostic::MalformedBlock`] each.
    pub fn from_value(value: &Value, diagnostics: &mut Diagnostics) -> Self {
        let Some(elements) = value.as_array() else {
            diagnostics.report(Diagnostic::MalformedInput {
                found: json_type_name(value),
            });
            return Self::new();
        };

        let mut blocks = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            match Block::deserialize(element) {
                Ok(block) => blocks.push(block),
                Err(e) => diagnostics.report(Diagnostic::MalformedBlock {
                    index,
                    reason: e.to_string(),
                }),
            }
        }

        Self::from_blocks(blocks)
    }

    /// Build a graph from decoded blocks.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut graph = Self {
            blocks: Vec::new(),
            by_id: HashMap::with_capacity(blocks.len()),
            word_index: HashMap::new(),
            tables: Vec::new(),
            cells: Vec::new(),
            titles: Vec::new(),
        };

        for (pos, block) in blocks.iter().enumerate() {
            if let Some(id) = block.id() {
                graph.by_id.entry(id.to_string()).or_default().push(pos);
            }
            match block {
                Block::Word(word) => {
                    graph
                        .word_index
                        .insert(word.id.clone(), word.text.clone());
                }
                Block::Table(table) if table.is_structured() => graph.tables.push(pos),
                Block::Cell(_) => graph.cells.push(pos),
                Block::TableTitle(_) => graph.titles.push(pos),
                Block::Table(_) | Block::Other => {}
            }
        }
        graph.blocks = blocks;

        log::debug!(
            "BlockGraph: {} blocks, {} words, {} structured tables, {} cells, {} titles",
            graph.blocks.len(),
            graph.word_index.len(),
            graph.tables.len(),
            graph.cells.len(),
            graph.titles.len()
        );

        graph
    }

    /// Get the number of decoded blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the graph has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get all blocks in input order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Get the first block with the given id.
    pub fn get(&self, id: &str) -> Option<&Block> {
        self.by_id
            .get(id)
            .and_then(|positions| positions.first())
            .map(|&pos| &self.blocks[pos])
    }

    /// Look up the text of a WORD block.
    pub fn word_text(&self, id: &str) -> Option<&str> {
        self.word_index.get(id).map(String::as_str)
    }

    /// Get the number of distinct WORD ids.
    pub fn word_count(&self) -> usize {
        self.word_index.len()
    }

    /// TABLE blocks tagged `STRUCTURED_TABLE`, in input order.
    pub fn structured_tables(&self) -> impl Iterator<Item = &TableBlock> {
        self.tables.iter().filter_map(|&pos| match &self.blocks[pos] {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }

    /// CELL blocks, in input order.
    pub fn cells(&self) -> impl Iterator<Item = &CellBlock> {
        self.cells.iter().filter_map(|&pos| match &self.blocks[pos] {
            Block::Cell(cell) => Some(cell),
            _ => None,
        })
    }

    /// TABLE_TITLE blocks, in input order.
    pub fn titles(&self) -> impl Iterator<Item = &TitleBlock> {
        self.titles.iter().filter_map(|&pos| match &self.blocks[pos] {
            Block::TableTitle(title) => Some(title),
            _ => None,
        })
    }

    /// CELL blocks whose id is among `ids`, in block-list order.
    ///
    /// Each block appears at most once, however often it is referenced.
    /// Ids that name no block are ignored.
    pub fn cells_among<'a, 'i>(&'a self, ids: impl IntoIterator<Item = &'i str>) -> Vec<&'a CellBlock> {
        self.positions_among(ids)
            .into_iter()
            .filter_map(|pos| match &self.blocks[pos] {
                Block::Cell(cell) => Some(cell),
                _ => None,
            })
            .collect()
    }

    /// WORD blocks whose id is among `ids`, in block-list order.
    pub fn words_among<'a, 'i>(&'a self, ids: impl IntoIterator<Item = &'i str>) -> Vec<&'a WordBlock> {
        self.positions_among(ids)
            .into_iter()
            .filter_map(|pos| match &self.blocks[pos] {
                Block::Word(word) => Some(word),
                _ => None,
            })
            .collect()
    }

    fn positions_among<'i>(&self, ids: impl IntoIterator<Item = &'i str>) -> Vec<usize> {
        let mut positions: Vec<usize> = ids
            .into_iter()
            .filter_map(|id| self.by_id.get(id))
            .flatten()
            .copied()
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticKind;
    use serde_json::json;

    #[test]
    fn test_not_an_array() {
        let mut diags = Diagnostics::new();
        let graph = BlockGraph::from_value(&json!({"Blocks": []}), &mut diags);

        assert!(graph.is_empty());
        assert_eq!(graph.structured_tables().count(), 0);
        assert_eq!(
            diags.iter().next(),
            Some(&Diagnostic::MalformedInput { found: "object" })
        );
    }

    #[test]
    fn test_null_input() {
        let mut diags = Diagnostics::new();
        let graph = BlockGraph::from_value(&Value::Null, &mut diags);
        assert!(graph.is_empty());
        assert_eq!(diags.count_of(DiagnosticKind::MalformedInput), 1);
    }

    #[test]
    fn test_malformed_block_is_skipped() {
        let mut diags = Diagnostics::new();
        let graph = BlockGraph::from_value(
            &json!([
                {"BlockType": "WORD", "Id": "w1", "Text": "S"},
                42,
                {"BlockType": "WORD", "Text": "no id"},
                {"BlockType": "WORD", "Id": "w2", "Text": "M"}
            ]),
            &mut diags,
        );

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.word_text("w2"), Some("M"));
        assert_eq!(diags.count_of(DiagnosticKind::MalformedBlock), 2);
        assert!(matches!(
            diags.iter().next(),
            Some(Diagnostic::MalformedBlock { index: 1, .. })
        ));
    }

    #[test]
    fn test_subsets_preserve_order() {
        let graph = BlockGraph::from_blocks(vec![
            Block::Other,
            Block::structured_table("t2", ["c1"]),
            Block::cell("c2", 1, 2, ["w2"]),
            Block::word("w1", "S"),
            Block::table_title("tt1", ["w1"]),
            Block::cell("c1", 1, 1, ["w1"]),
            Block::structured_table("t1", ["c2"]),
        ]);

        let tables: Vec<_> = graph.structured_tables().map(|t| t.id.as_str()).collect();
        assert_eq!(tables, vec!["t2", "t1"]);
        let cells: Vec<_> = graph.cells().map(|c| c.id.as_str()).collect();
        assert_eq!(cells, vec!["c2", "c1"]);
        assert_eq!(graph.titles().count(), 1);
        assert_eq!(graph.word_count(), 1);
    }

    #[test]
    fn test_unstructured_tables_are_not_indexed() {
        let mut diags = Diagnostics::new();
        let graph = BlockGraph::from_value(
            &json!([
                {"BlockType": "TABLE", "Id": "t1", "EntityTypes": ["SEMI_STRUCTURED_TABLE"]},
                {"BlockType": "TABLE", "Id": "t2"}
            ]),
            &mut diags,
        );

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.structured_tables().count(), 0);
        assert!(graph.get("t1").is_some());
        assert!(diags.is_empty());
    }

    #[test]
    fn test_cells_among_uses_block_order() {
        let graph = BlockGraph::from_blocks(vec![
            Block::cell("c1", 1, 1, Vec::<String>::new()),
            Block::word("c0", "not a cell"),
            Block::cell("c2", 1, 2, Vec::<String>::new()),
        ]);

        let cells = graph.cells_among(["c2", "missing", "c1", "c0", "c2"]);
        let ids: Vec<_> = cells.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2"]);
    }

    #[test]
    fn test_words_among_uses_block_order() {
        let graph = BlockGraph::from_blocks(vec![
            Block::word("w1", "Inseam"),
            Block::word("w2", "(Tall)"),
        ]);

        let words = graph.words_among(["w2", "w1"]);
        let texts: Vec<_> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["Inseam", "(Tall)"]);
    }

    #[test]
    fn test_word_index_last_write_wins() {
        let graph = BlockGraph::from_blocks(vec![
            Block::word("w1", "first"),
            Block::word("w1", "second"),
        ]);
        assert_eq!(graph.word_text("w1"), Some("second"));
        assert!(matches!(graph.get("w1"), Some(Block::Word(w)) if w.text == "first"));
    }
}
