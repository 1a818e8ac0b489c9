//! Table reconstruction from the cell/word sub-graph of a TABLE block.
//!
//! Cells are found by following every edge of the table, whatever its type.
//! Cell text, on the other hand, only follows `CHILD` edges of the cell.
//! The two lookups differ on purpose and must stay that way: unifying them
//! changes which text ends up in the grid.

use rayon::prelude::*;

use crate::error::{Diagnostic, Diagnostics};
use crate::model::{CellBlock, Table, TableBlock};

use super::graph::BlockGraph;
use super::orientation;
use super::options::ProcessOptions;

/// Largest grid (rows x cols) the assembler will allocate for one table.
pub const MAX_GRID_CELLS: usize = 1_000_000;

/// Rebuilds dense tables from a [`BlockGraph`].
pub struct TableAssembler<'g> {
    graph: &'g BlockGraph,
    options: ProcessOptions,
}

impl<'g> TableAssembler<'g> {
    /// Create an assembler with default options.
    pub fn new(graph: &'g BlockGraph) -> Self {
        Self::with_options(graph, ProcessOptions::default())
    }

    /// Create an assembler with custom options.
    pub fn with_options(graph: &'g BlockGraph, options: ProcessOptions) -> Self {
        Self { graph, options }
    }

    /// Assemble every structured table of the graph.
    ///
    /// Tables that cannot be built are left out; the rest keep the order of
    /// their TABLE blocks.
    pub fn assemble_all(&self, diagnostics: &mut Diagnostics) -> Vec<Table> {
        let blocks: Vec<&TableBlock> = self.graph.structured_tables().collect();
        log::debug!("TableAssembler: {} structured tables", blocks.len());

        let assembled: Vec<(Option<Table>, Diagnostics)> = if self.options.parallel {
            blocks
                .par_iter()
                .map(|block| self.assemble_collecting(block))
                .collect()
        } else {
            blocks
                .iter()
                .map(|block| self.assemble_collecting(block))
                .collect()
        };

        let mut tables = Vec::with_capacity(assembled.len());
        for (table, local) in assembled {
            diagnostics.extend(local);
            tables.extend(table);
        }
        tables
    }

    fn assemble_collecting(&self, block: &TableBlock) -> (Option<Table>, Diagnostics) {
        let mut local = Diagnostics::new();
        let table = self.assemble(block, &mut local);
        (table, local)
    }

    /// Assemble one table, applying orientation normalization if enabled.
    pub fn assemble(&self, block: &TableBlock, diagnostics: &mut Diagnostics) -> Option<Table> {
        let table = self.build_grid(block, diagnostics)?;
        if self.options.normalize_orientation {
            Some(orientation::normalize(table))
        } else {
            Some(table)
        }
    }

    fn build_grid(&self, block: &TableBlock, diagnostics: &mut Diagnostics) -> Option<Table> {
        let cells = self.graph.cells_among(block.related_ids());
        if cells.is_empty() {
            diagnostics.report(Diagnostic::MissingCells {
                table_id: block.id.clone(),
            });
            return None;
        }

        let Some((rows, cols)) = dimensions(&cells) else {
            diagnostics.report(Diagnostic::InvalidDimensions {
                table_id: block.id.clone(),
            });
            return None;
        };
        if rows.checked_mul(cols).map_or(true, |n| n > MAX_GRID_CELLS) {
            diagnostics.report(Diagnostic::OversizedGrid {
                table_id: block.id.clone(),
                rows,
                cols,
            });
            return None;
        }

        let mut table = Table::new(rows, cols);
        for cell in cells {
            let Some((row, col)) = grid_position(cell, rows, cols) else {
                diagnostics.report(Diagnostic::OutOfBoundsCell {
                    table_id: block.id.clone(),
                    cell_id: cell.id.clone(),
                    row: cell.row_index,
                    col: cell.column_index,
                });
                continue;
            };
            table.set(row, col, self.cell_text(cell));
        }

        log::debug!(
            "TableAssembler: table {} assembled as {}x{}",
            block.id,
            rows,
            cols
        );
        Some(table)
    }

    /// Text of the WORD blocks under the cell's `CHILD` edges, in block-list
    /// order, joined by single spaces.
    fn cell_text(&self, cell: &CellBlock) -> String {
        self.graph
            .words_among(cell.child_ids())
            .iter()
            .map(|word| word.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Grid size from the largest row and column index among `cells`.
///
/// `None` when no cell carries a row index, no cell carries a column index,
/// or either maximum is below 1.
fn dimensions(cells: &[&CellBlock]) -> Option<(usize, usize)> {
    let rows = cells.iter().filter_map(|c| c.row_index).max()?;
    let cols = cells.iter().filter_map(|c| c.column_index).max()?;
    if rows <= 0 || cols <= 0 {
        return None;
    }
    Some((usize::try_from(rows).ok()?, usize::try_from(cols).ok()?))
}

/// 0-based position of a cell, if it lies inside a `rows` x `cols` grid.
fn grid_position(cell: &CellBlock, rows: usize, cols: usize) -> Option<(usize, usize)> {
    let row = usize::try_from(cell.row_index?.checked_sub(1)?).ok()?;
    let col = usize::try_from(cell.column_index?.checked_sub(1)?).ok()?;
    (row < rows && col < cols).then_some((row, col))
}
