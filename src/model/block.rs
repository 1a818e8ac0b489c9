//! OCR block types.
//!
//! Blocks arrive as the `Blocks` array of a document-analysis response.
//! Only the four block types the table pipeline reads are modelled; every
//! other `BlockType` decodes to [`Block::Other`].

use serde::{Deserialize, Deserializer, Serialize};

/// One node of the OCR block graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "BlockType")]
pub enum Block {
    /// A single recognized word
    #[serde(rename = "WORD")]
    Word(WordBlock),

    /// A table region
    #[serde(rename = "TABLE")]
    Table(TableBlock),

    /// One cell of a table
    #[serde(rename = "CELL")]
    Cell(CellBlock),

    /// A title attached to a table
    #[serde(rename = "TABLE_TITLE")]
    TableTitle(TitleBlock),

    /// Any block type the pipeline ignores (PAGE, LINE, MERGED_CELL, ...)
    #[serde(other)]
    Other,
}

impl Block {
    /// Create a WORD block.
    pub fn word(id: impl Into<String>, text: impl Into<String>) -> Self {
        Block::Word(WordBlock {
            id: id.into(),
            text: text.into(),
            relationships: Vec::new(),
        })
    }

    /// Create a CELL block whose CHILD edge lists the given word ids.
    pub fn cell<S: Into<String>>(
        id: impl Into<String>,
        row_index: i64,
        column_index: i64,
        word_ids: impl IntoIterator<Item = S>,
    ) -> Self {
        Block::Cell(CellBlock {
            id: id.into(),
            row_index: Some(row_index),
            column_index: Some(column_index),
            relationships: vec![Relationship::child(word_ids)],
        })
    }

    /// Create a TABLE block tagged `STRUCTURED_TABLE` whose CHILD edge lists
    /// the given cell ids.
    pub fn structured_table<S: Into<String>>(
        id: impl Into<String>,
        cell_ids: impl IntoIterator<Item = S>,
    ) -> Self {
        Block::Table(TableBlock {
            id: id.into(),
            entity_types: vec![EntityType::StructuredTable],
            relationships: vec![Relationship::child(cell_ids)],
        })
    }

    /// Create a TABLE_TITLE block whose CHILD edge lists the given word ids.
    pub fn table_title<S: Into<String>>(
        id: impl Into<String>,
        word_ids: impl IntoIterator<Item = S>,
    ) -> Self {
        Block::TableTitle(TitleBlock {
            id: id.into(),
            relationships: vec![Relationship::child(word_ids)],
        })
    }

    /// Get the block id (`None` for ignored block types).
    pub fn id(&self) -> Option<&str> {
        match self {
            Block::Word(b) => Some(&b.id),
            Block::Table(b) => Some(&b.id),
            Block::Cell(b) => Some(&b.id),
            Block::TableTitle(b) => Some(&b.id),
            Block::Other => None,
        }
    }

    /// Get the outgoing edges of this block.
    pub fn relationships(&self) -> &[Relationship] {
        match self {
            Block::Word(b) => &b.relationships,
            Block::Table(b) => &b.relationships,
            Block::Cell(b) => &b.relationships,
            Block::TableTitle(b) => &b.relationships,
            Block::Other => &[],
        }
    }

    /// Get the wire name of the block type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Block::Word(_) => "WORD",
            Block::Table(_) => "TABLE",
            Block::Cell(_) => "CELL",
            Block::TableTitle(_) => "TABLE_TITLE",
            Block::Other => "OTHER",
        }
    }
}

/// A WORD block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WordBlock {
    /// Block id
    pub id: String,

    /// Recognized text (empty when the service omitted it)
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,

    /// Outgoing edges
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

/// A TABLE block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableBlock {
    /// Block id
    pub id: String,

    /// Entity tags such as `STRUCTURED_TABLE`
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub entity_types: Vec<EntityType>,

    /// Outgoing edges (cells, merged cells, titles, footers)
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

impl TableBlock {
    /// Check if the table is tagged `STRUCTURED_TABLE`.
    pub fn is_structured(&self) -> bool {
        self.entity_types.contains(&EntityType::StructuredTable)
    }

    /// Ids referenced by any edge, in edge-list order, regardless of edge type.
    pub fn related_ids(&self) -> impl Iterator<Item = &str> {
        flatten_ids(&self.relationships)
    }
}

/// A CELL block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CellBlock {
    /// Block id
    pub id: String,

    /// 1-based row index; `None` when missing or not an integer
    #[serde(default, deserialize_with = "lenient_index")]
    pub row_index: Option<i64>,

    /// 1-based column index; `None` when missing or not an integer
    #[serde(default, deserialize_with = "lenient_index")]
    pub column_index: Option<i64>,

    /// Outgoing edges (words, selection elements)
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

impl CellBlock {
    /// Ids referenced by `CHILD` edges only, in edge-list order.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(|rel| rel.kind == RelationshipType::Child)
            .flat_map(|rel| rel.ids.iter().map(String::as_str))
    }
}

/// A TABLE_TITLE block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TitleBlock {
    /// Block id
    pub id: String,

    /// Outgoing edges (words)
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

impl TitleBlock {
    /// Ids referenced by any edge, in edge-list order, regardless of edge type.
    pub fn related_ids(&self) -> impl Iterator<Item = &str> {
        flatten_ids(&self.relationships)
    }
}

/// A typed, ordered edge from one block to others.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Edge type (`Other` when missing, null or not a string)
    #[serde(rename = "Type", default, deserialize_with = "lenient_kind")]
    pub kind: RelationshipType,

    /// Target block ids; entries that are not strings are dropped
    #[serde(rename = "Ids", default, deserialize_with = "lenient_ids")]
    pub ids: Vec<String>,
}

impl Relationship {
    /// Create an edge of the given type.
    pub fn new<S: Into<String>>(kind: RelationshipType, ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            kind,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a `CHILD` edge.
    pub fn child<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self::new(RelationshipType::Child, ids)
    }
}

/// Edge type tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    /// Containment (table → cell, cell → word)
    Child,
    /// Key → value link
    Value,
    /// Value → answer link
    Answer,
    /// Table → merged cell
    MergedCell,
    /// Table → title
    TableTitle,
    /// Table → footer
    TableFooter,
    /// Title link
    Title,
    /// Complex feature link
    ComplexFeatures,
    /// Any other or missing edge type
    #[default]
    #[serde(other)]
    Other,
}

/// Entity tag carried by TABLE and CELL blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// A table with a regular grid
    StructuredTable,
    /// A table without a regular grid
    SemiStructuredTable,
    /// Column header cell
    ColumnHeader,
    /// Table title cell
    TableTitle,
    /// Table footer cell
    TableFooter,
    /// Section title cell
    TableSectionTitle,
    /// Summary cell
    TableSummary,
    /// Any other entity tag
    #[serde(other)]
    Other,
}

fn flatten_ids(relationships: &[Relationship]) -> impl Iterator<Item = &str> {
    relationships
        .iter()
        .flat_map(|rel| rel.ids.iter().map(String::as_str))
}

/// Decode `null` as the type's default value.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode an edge type, falling back to `Other` for anything but a string.
fn lenient_kind<'de, D>(deserializer: D) -> Result<RelationshipType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}

/// Decode an id list, keeping only string entries.
fn lenient_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(id) => Some(id),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Decode an index that may be missing, null, fractional or not a number.
fn lenient_index<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        _ => None,
    }))
}
