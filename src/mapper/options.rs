//! Mapping options and configuration.

use chrono::{DateTime, Utc};

use crate::model::DEFAULT_UNIT;

/// Options for mapping tables to sizing charts.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Unit recorded on every measurement
    pub unit: String,

    /// Whether to map image results in parallel
    pub parallel: bool,

    /// Fixed creation time for every chart (current time when `None`)
    pub timestamp: Option<DateTime<Utc>>,
}

impl MapOptions {
    /// Create new map options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the measurement unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Stamp every chart with a fixed time instead of the current time.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            unit: DEFAULT_UNIT.to_string(),
            parallel: true,
            timestamp: None,
        }
    }
}
