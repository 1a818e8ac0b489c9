//! Whole-upload processing: every image of an upload response, then charts.

use crate::envelope::UploadResponse;
use crate::error::Diagnostics;
use crate::mapper::{MapOptions, SizingChartMapper};
use crate::model::{ProcessedImage, SizingChart, Table};
use crate::parser::{BlockProcessor, ProcessOptions};
use crate::stats::ExtractionStats;

/// Everything derived from one upload response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    /// Tables and titles per image, in upload order
    pub images: Vec<ProcessedImage>,

    /// One sizing chart per image, in upload order
    pub charts: Vec<SizingChart>,

    /// Diagnostics from processing and mapping, in the order reported
    pub diagnostics: Diagnostics,
}

impl Batch {
    /// Process every image of a response and map the results to charts.
    pub fn process(
        response: &UploadResponse,
        process_options: &ProcessOptions,
        map_options: &MapOptions,
    ) -> Self {
        let processor = BlockProcessor::with_options(process_options.clone());
        let mut diagnostics = Diagnostics::new();

        let images: Vec<ProcessedImage> = response
            .block_lists()
            .enumerate()
            .map(|(index, blocks)| {
                log::debug!("Batch: processing image {}", index + 1);
                let (image, local) = processor.process_with_diagnostics(blocks);
                diagnostics.extend(local);
                image
            })
            .collect();

        let (charts, local) =
            SizingChartMapper::with_options(map_options.clone()).map_with_diagnostics(&images);
        diagnostics.extend(local);

        Self {
            images,
            charts,
            diagnostics,
        }
    }

    /// Every table of every image, in upload order.
    pub fn all_tables(&self) -> impl Iterator<Item = &Table> {
        self.images.iter().flat_map(|image| image.tables.iter())
    }

    /// Every title of every image, in upload order.
    pub fn all_titles(&self) -> impl Iterator<Item = &str> {
        self.images
            .iter()
            .flat_map(|image| image.titles.iter().map(String::as_str))
    }

    /// Summarize the batch.
    pub fn stats(&self) -> ExtractionStats {
        ExtractionStats::from_batch(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticKind;
    use serde_json::json;

    fn image_blocks(size: &str, chest: &str) -> serde_json::Value {
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
            {"BlockType": "WORD", "Id": "w2", "Text": size},
            {"BlockType": "WORD", "Id": "w3", "Text": chest},
            {"BlockType": "TABLE_TITLE", "Id": "tt",
             "Relationships": [{"Type": "CHILD", "Ids": ["w1"]}]}
        ])
    }

    #[test]
    fn test_batch_process() {
        let response = UploadResponse::from_block_lists([
            image_blocks("S", "36"),
            json!({"not": "a list"}),
            image_blocks("M", "n/a"),
        ]);
        let batch = Batch::process(
            &response,
            &ProcessOptions::new().sequential(),
            &MapOptions::new().sequential(),
        );

        assert_eq!(batch.images.len(), 3);
        assert_eq!(batch.charts.len(), 3);
        assert_eq!(batch.all_tables().count(), 2);
        assert_eq!(batch.all_titles().collect::<Vec<_>>(), vec!["Chest", "Chest"]);

        assert_eq!(batch.charts[0].sizes[0].measurements[0].value, 36.0);
        assert!(batch.charts[1].is_empty());
        assert!(batch.charts[2].sizes[0].measurements.is_empty());

        let kinds: Vec<_> = batch.diagnostics.iter().map(|d| d.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::MalformedInput,
                DiagnosticKind::UnparseableMeasurement
            ]
        );
    }

    #[test]
    fn test_empty_response() {
        let batch = Batch::process(
            &UploadResponse::default(),
            &ProcessOptions::default(),
            &MapOptions::default(),
        );
        assert!(batch.images.is_empty());
        assert!(batch.charts.is_empty());
        assert!(batch.diagnostics.is_empty());
    }
}
