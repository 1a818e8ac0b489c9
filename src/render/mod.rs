//! Rendering module for handing results to a display layer.

mod json;
mod markdown;
mod options;

pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::RenderOptions;
