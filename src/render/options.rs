//! Rendering options and configuration.

/// Options for rendering processed tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// List table titles before the tables of each image
    pub include_titles: bool,

    /// Start each image with a `## Image N` heading
    pub include_image_headings: bool,

    /// Escape special Markdown characters in cell text
    pub escape_special_chars: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the title list.
    pub fn with_titles(mut self, include: bool) -> Self {
        self.include_titles = include;
        self
    }

    /// Enable or disable per-image headings.
    pub fn with_image_headings(mut self, include: bool) -> Self {
        self.include_image_headings = include;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_titles: true,
            include_image_headings: true,
            escape_special_chars: true,
        }
    }
}
