//! Inline text spans.

use serde::{Deserialize, Serialize};

/// A run of text with uniform weight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    /// Text content, without emphasis markers
    pub text: String,

    /// Rendered bold
    pub bold: bool,
}

impl TextSpan {
    /// Create a regular span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    /// Create a bold span.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// One paragraph of a text box. An empty paragraph is a vertical spacer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Spans in reading order
    pub spans: Vec<TextSpan>,
}

impl Paragraph {
    /// Create an empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph from spans.
    pub fn from_spans(spans: Vec<TextSpan>) -> Self {
        Self { spans }
    }

    /// Create a paragraph holding one regular span.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            spans: vec![TextSpan::plain(text)],
        }
    }

    /// Check if the paragraph has no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Concatenated text of all spans.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}
