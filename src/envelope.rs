//! Upload response envelope and input shape detection.
//!
//! The upload endpoint answers with one OCR result per uploaded image:
//!
//! ```json
//! { "results": [ { "tableData": { "Blocks": [ ... ] } } ] }
//! ```
//!
//! Files handed to the library may also hold a single OCR document
//! (`{ "Blocks": [...] }`) or a bare block array. [`detect_input`] tells
//! the three apart and [`UploadResponse::from_value`] accepts all of them.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Shape of a JSON input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// `{ "results": [ { "tableData": { "Blocks": [...] } } ] }`
    Envelope,
    /// `{ "Blocks": [...] }`, the OCR output for one image
    Document,
    /// `[ ... ]`, a bare block collection
    BlockList,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Envelope => write!(f, "upload envelope"),
            InputKind::Document => write!(f, "OCR document"),
            InputKind::BlockList => write!(f, "block list"),
        }
    }
}

/// Detect the shape of a JSON input.
///
/// # Returns
/// * `Ok(InputKind)` when the value looks like one of the known shapes
/// * `Err(Error::UnknownInput)` otherwise
pub fn detect_input(value: &Value) -> Result<InputKind> {
    match value {
        Value::Array(_) => Ok(InputKind::BlockList),
        Value::Object(map) if map.get("results").is_some_and(Value::is_array) => {
            Ok(InputKind::Envelope)
        }
        Value::Object(map) if map.contains_key("Blocks") => Ok(InputKind::Document),
        _ => Err(Error::UnknownInput),
    }
}

/// Response of the upload endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// One entry per uploaded image, in upload order
    #[serde(default)]
    pub results: Vec<UploadResult>,
}

/// OCR output for one uploaded image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Document analysis payload
    #[serde(rename = "tableData", default)]
    pub table_data: TableData,
}

/// Document analysis payload of one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    /// Raw block collection, kept undecoded so that a malformed list only
    /// affects its own image
    #[serde(rename = "Blocks", default)]
    pub blocks: Value,
}

impl UploadResponse {
    /// Wrap per-image block collections in an envelope.
    pub fn from_block_lists(lists: impl IntoIterator<Item = Value>) -> Self {
        Self {
            results: lists
                .into_iter()
                .map(|blocks| UploadResult {
                    table_data: TableData { blocks },
                })
                .collect(),
        }
    }

    /// Build an envelope from any supported input shape.
    ///
    /// A single document or block list becomes a one-image envelope.
    pub fn from_value(value: Value) -> Result<Self> {
        match detect_input(&value)? {
            InputKind::Envelope => Ok(serde_json::from_value(value)?),
            InputKind::BlockList => Ok(Self::from_block_lists([value])),
            InputKind::Document => {
                let blocks = match value {
                    Value::Object(mut map) => map.remove("Blocks").unwrap_or(Value::Null),
                    _ => Value::Null,
                };
                Ok(Self::from_block_lists([blocks]))
            }
        }
    }

    /// Number of images in the response.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if the response holds no images.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Block collections in image order.
    pub fn block_lists(&self) -> impl Iterator<Item = &Value> {
        self.results.iter().map(|r| &r.table_data.blocks)
    }
}

/// Parse an upload response (or document, or block list) from bytes.
pub fn parse_response_bytes(data: &[u8]) -> Result<UploadResponse> {
    let value: Value = serde_json::from_slice(data)?;
    UploadResponse::from_value(value)
}

/// Parse an upload response from a reader.
pub fn parse_response_reader<R: Read>(reader: R) -> Result<UploadResponse> {
    let value: Value = serde_json::from_reader(reader)?;
    UploadResponse::from_value(value)
}

/// Parse an upload response from a file.
pub fn parse_response_file<P: AsRef<Path>>(path: P) -> Result<UploadResponse> {
    let file = File::open(path)?;
    parse_response_reader(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_envelope() {
        let value = json!({"results": [{"tableData": {"Blocks": []}}]});
        assert_eq!(detect_input(&value).unwrap(), InputKind::Envelope);
    }

    #[test]
    fn test_detect_document() {
        let value = json!({"DocumentMetadata": {"Pages": 1}, "Blocks": []});
        assert_eq!(detect_input(&value).unwrap(), InputKind::Document);
    }

    #[test]
    fn test_detect_block_list() {
        assert_eq!(detect_input(&json!([])).unwrap(), InputKind::BlockList);
    }

    #[test]
    fn test_detect_unknown() {
        assert!(matches!(detect_input(&json!({"foo": 1})), Err(Error::UnknownInput)));
        assert!(matches!(detect_input(&json!("text")), Err(Error::UnknownInput)));
        assert!(matches!(
            detect_input(&json!({"results": "nope"})),
            Err(Error::UnknownInput)
        ));
    }

    #[test]
    fn test_envelope_keeps_malformed_blocks_raw() {
        let response = UploadResponse::from_value(json!({
            "results": [
                {"tableData": {"Blocks": [{"BlockType": "WORD", "Id": "w1", "Text": "S"}]}},
                {"tableData": {"Blocks": "oops"}},
                {"tableData": {}},
                {}
            ]
        }))
        .unwrap();

        assert_eq!(response.len(), 4);
        let lists: Vec<_> = response.block_lists().collect();
        assert!(lists[0].is_array());
        assert_eq!(lists[1], &json!("oops"));
        assert!(lists[2].is_null());
        assert!(lists[3].is_null());
    }

    #[test]
    fn test_document_becomes_single_result() {
        let response =
            UploadResponse::from_value(json!({"Blocks": [{"BlockType": "PAGE", "Id": "p"}]}))
                .unwrap();
        assert_eq!(response.len(), 1);
        assert!(response.results[0].table_data.blocks.is_array());
    }

    #[test]
    fn test_parse_response_bytes() {
        let response = parse_response_bytes(br#"[{"BlockType": "PAGE", "Id": "p"}]"#).unwrap();
        assert_eq!(response.len(), 1);

        assert!(matches!(parse_response_bytes(b"{"), Err(Error::Json(_))));
        assert!(matches!(parse_response_bytes(b"42"), Err(Error::UnknownInput)));
    }

    #[test]
    fn test_envelope_serializes_wire_names() {
        let response = UploadResponse::from_block_lists([json!([])]);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, json!({"results": [{"tableData": {"Blocks": []}}]}));
    }
}
