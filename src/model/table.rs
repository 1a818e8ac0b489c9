//! Table types.

use serde::{Deserialize, Serialize};

/// A dense table grid reconstructed from OCR cells.
///
/// `data` always holds exactly `rows` rows of exactly `cols` strings.
/// Positions no cell covered hold the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TableRepr")]
pub struct Table {
    rows: usize,
    cols: usize,
    data: Vec<Vec<String>>,
}

impl Table {
    /// Create a `rows` x `cols` table filled with empty strings.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![vec![String::new(); cols]; rows],
        }
    }

    /// Create a table from row data, padding short rows with empty strings.
    pub fn from_rows(data: Vec<Vec<String>>) -> Self {
        let rows = data.len();
        let cols = data.iter().map(Vec::len).max().unwrap_or(0);
        let data = data
            .into_iter()
            .map(|mut row| {
                row.resize(cols, String::new());
                row
            })
            .collect();
        Self { rows, cols, data }
    }

    /// Create a table from string slices.
    pub fn from_strings<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    /// Get the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the grid, row-major.
    pub fn data(&self) -> &[Vec<String>] {
        &self.data
    }

    /// Get one row.
    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.data.get(row).map(Vec::as_slice)
    }

    /// Get the text at a 0-based position.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.data.get(row)?.get(col).map(String::as_str)
    }

    /// Overwrite the text at a 0-based position.
    ///
    /// Returns `false` (and leaves the table untouched) when the position
    /// is outside the grid.
    pub fn set(&mut self, row: usize, col: usize, text: impl Into<String>) -> bool {
        match self.data.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }

    /// Column 0 of every row.
    pub fn first_column(&self) -> impl Iterator<Item = &str> {
        self.data
            .iter()
            .filter_map(|row| row.first().map(String::as_str))
    }

    /// Get the header row (row 0).
    pub fn header(&self) -> Option<&[String]> {
        self.row(0)
    }

    /// Get body rows (everything after row 0).
    pub fn body(&self) -> &[Vec<String>] {
        self.data.get(1..).unwrap_or(&[])
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Table {
        let data = (0..self.cols)
            .map(|c| self.data.iter().map(|row| row[c].clone()).collect())
            .collect();
        Table {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Check if the table has no cells.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

/// Wire shape of a table; `rows`/`cols` are recomputed from `data`.
#[derive(Deserialize)]
struct TableRepr {
    #[serde(default)]
    data: Vec<Vec<String>>,
}

impl From<TableRepr> for Table {
    fn from(repr: TableRepr) -> Self {
        Table::from_rows(repr.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = Table::new(2, 3);
        assert_eq!(table.rows(), 2);
        assert_eq!(table.cols(), 3);
        assert!(table.data().iter().all(|r| r.len() == 3));
        assert!(table.data().iter().flatten().all(String::is_empty));
    }

    #[test]
    fn test_table_empty() {
        let table = Table::new(0, 0);
        assert!(table.is_empty());
        assert!(table.header().is_none());
        assert!(table.body().is_empty());
    }

    #[test]
    fn test_from_rows_pads_ragged_rows() {
        let table = Table::from_strings(vec![vec!["a", "b", "c"], vec!["d"]]);
        assert_eq!(table.rows(), 2);
        assert_eq!(table.cols(), 3);
        assert_eq!(table.row(1).unwrap(), &["d", "", ""]);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut table = Table::new(1, 1);
        assert!(table.set(0, 0, "x"));
        assert!(!table.set(1, 0, "y"));
        assert!(!table.set(0, 1, "z"));
        assert_eq!(table.get(0, 0), Some("x"));
    }

    #[test]
    fn test_transpose() {
        let table = Table::from_strings(vec![vec!["", "S", "M"], vec!["Chest", "36", "38"]]);
        let t = table.transpose();

        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 2);
        assert_eq!(
            t.data(),
            &[
                vec!["".to_string(), "Chest".to_string()],
                vec!["S".to_string(), "36".to_string()],
                vec!["M".to_string(), "38".to_string()],
            ]
        );
        assert_eq!(t.transpose(), table);
    }

    #[test]
    fn test_header_and_body() {
        let table = Table::from_strings(vec![vec!["", "Chest"], vec!["S", "36"], vec!["M", "38"]]);
        assert_eq!(table.header().unwrap(), &["", "Chest"]);
        assert_eq!(table.body().len(), 2);
        assert_eq!(table.first_column().collect::<Vec<_>>(), vec!["", "S", "M"]);
    }

    #[test]
    fn test_serde_shape() {
        let table = Table::from_strings(vec![vec!["S", "10"]]);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"rows": 1, "cols": 2, "data": [["S", "10"]]})
        );

        // Declared dimensions are ignored in favour of the grid itself
        let decoded: Table = serde_json::from_value(serde_json::json!({
            "rows": 9, "cols": 9, "data": [["a"], ["b", "c"]]
        }))
        .unwrap();
        assert_eq!(decoded.rows(), 2);
        assert_eq!(decoded.cols(), 2);
    }
}
