//! Minimal rich-text document model and its `.docx` packaging.
//!
//! The renderer only talks to [`DocumentSink`]; [`Document`] is the in-memory
//! implementation and knows how to save itself as Office Open XML.

mod document;
mod package;

pub use document::{Document, Inline, Paragraph};
pub use package::write_package;

use anyhow::Result;
use std::path::Path;

/// Handle to a paragraph previously added to a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphId(pub(crate) usize);

/// A run of plain or bold text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Underline {
    None,
    Single,
}

/// Visual style applied to a hyperlink run only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStyle {
    /// RGB hex without `#`, e.g. `0000FF`.
    pub color: String,
    pub underline: Underline,
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            color: "0000FF".to_string(),
            underline: Underline::Single,
        }
    }
}

/// Write side of a rich-text document.
pub trait DocumentSink {
    fn add_paragraph(&mut self, runs: Vec<TextRun>) -> ParagraphId;

    fn add_run(&mut self, paragraph: ParagraphId, run: TextRun) -> Result<()>;

    fn add_hyperlink_run(
        &mut self,
        paragraph: ParagraphId,
        url: &str,
        text: &str,
        style: &LinkStyle,
    ) -> Result<()>;

    /// Writes the document to `path`, replacing any existing file. On failure no file
    /// is left at `path` other than what was there before.
    fn save(&self, path: &Path) -> Result<()>;
}
