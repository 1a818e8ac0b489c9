//! Processing options and configuration.

/// Options for turning a block graph into tables and titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Whether to assemble tables in parallel
    pub parallel: bool,

    /// Whether to transpose tables whose sizes run along the header row
    pub normalize_orientation: bool,
}

impl ProcessOptions {
    /// Create new process options with defaults.
    pub fn new() -> Self {
        Self::default()
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

    /// Enable or disable orientation normalization.
    pub fn with_orientation(mut self, normalize: bool) -> Self {
        self.normalize_orientation = normalize;
        self
    }
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            normalize_orientation: true,
        }
    }
}
