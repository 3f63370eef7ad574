//! Markdown deck sources.
//!
//! A deck is written in a two-level dialect: `# ` headings are slides and
//! `## ` headings are the modules on them. `**bold**` is the only inline
//! markup recognized.

mod inline;
mod parser;
mod writer;

pub use inline::{plain_paragraphs, split_bold, to_paragraphs, BoldPattern};
pub use parser::{parse_markdown, parse_markdown_file};
pub use writer::to_markdown;
