//! Markdown rendering for processed tables.

use crate::model::{ProcessedImage, Table};

use super::RenderOptions;

/// Render processed images as Markdown.
pub fn to_markdown(images: &[ProcessedImage], options: &RenderOptions) -> String {
    MarkdownRenderer::new(options.clone()).render(images)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render processed images to Markdown.
    pub fn render(&self, images: &[ProcessedImage]) -> String {
        if images.is_empty() {
            return "No data available".to_string();
        }

        let mut output = String::new();
        for (index, image) in images.iter().enumerate() {
            self.render_image(&mut output, index + 1, image);
        }

        output.trim().to_string()
    }

    fn render_image(&self, output: &mut String, number: usize, image: &ProcessedImage) {
        if self.options.include_image_headings {
            output.push_str(&format!("## Image {}\n\n", number));
        }

        if self.options.include_titles && !image.titles.is_empty() {
            output.push_str("**Table titles**\n\n");
            for title in &image.titles {
                output.push_str(&format!("- {}\n", self.escape(title)));
            }
            output.push('\n');
        }

        if image.tables.is_empty() {
            output.push_str("No data available\n\n");
            return;
        }

        for table in &image.tables {
            self.render_table(output, table);
        }
    }

    fn render_table(&self, output: &mut String, table: &Table) {
        if table.is_empty() {
            return;
        }

        // Row 0 is always rendered as the header
        for (i, row) in table.data().iter().enumerate() {
            output.push('|');
            for cell in row {
                let content = cell.replace('\n', " ");
                output.push_str(&format!(" {} |", self.escape(content.trim())));
            }
            output.push('\n');

            if i == 0 {
                output.push('|');
                for _ in row {
                    output.push_str(" --- |");
                }
                output.push('\n');
            }
        }

        output.push('\n');
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Escape characters that would break table cells or inline formatting.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
