//! Sizing chart types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit assigned to measurements when nothing else is configured.
pub const DEFAULT_UNIT: &str = "cm";

/// A garment sizing chart built from one uploaded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizingChart {
    /// 1-based position of the image within the processed batch
    pub id: u32,

    /// Sizes in table/row order
    pub sizes: Vec<Size>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl SizingChart {
    /// Create an empty chart stamped with the given time.
    pub fn new(id: u32, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            sizes: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Append a size, assigning the next chart-local id.
    pub fn push_size(&mut self, label: impl Into<String>) -> &mut Size {
        let size = Size::new(self.sizes.len() as u32 + 1, label, self.id);
        self.sizes.push(size);
        let last = self.sizes.len() - 1;
        &mut self.sizes[last]
    }

    /// Find the first size with the given label.
    pub fn size(&self, label: &str) -> Option<&Size> {
        self.sizes.iter().find(|s| s.label == label)
    }

    /// Total number of measurements across all sizes.
    pub fn measurement_count(&self) -> usize {
        self.sizes.iter().map(|s| s.measurements.len()).sum()
    }

    /// Check if the chart has no sizes.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// One size (a table row) of a sizing chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    /// 1-based id within the chart
    pub id: u32,

    /// Size label as printed (e.g. "S", "XL", "10")
    pub label: String,

    /// Measurements in column order
    pub measurements: Vec<Measurement>,

    /// Owning chart id
    pub sizing_chart_id: u32,
}

impl Size {
    /// Create a size with no measurements.
    pub fn new(id: u32, label: impl Into<String>, sizing_chart_id: u32) -> Self {
        Self {
            id,
            label: label.into(),
            measurements: Vec::new(),
            sizing_chart_id,
        }
    }

    /// Append a measurement, assigning the next size-local id.
    pub fn push_measurement(
        &mut self,
        label: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
    ) -> &Measurement {
        let measurement = Measurement {
            id: self.measurements.len() as u32 + 1,
            label: label.into(),
            value,
            unit: unit.into(),
            size_id: self.id,
        };
        self.measurements.push(measurement);
        let last = self.measurements.len() - 1;
        &self.measurements[last]
    }

    /// Find the first measurement with the given label.
    pub fn measurement(&self, label: &str) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.label == label)
    }
}

/// One numeric measurement of a size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// 1-based id within the size
    pub id: u32,

    /// Measurement name from the header row (e.g. "Chest")
    pub label: String,

    /// Parsed value
    pub value: f64,

    /// Unit of `value`
    pub unit: String,

    /// Owning size id
    pub size_id: u32,
}
