//! `.pptx` package writer.
//!
//! Produces a minimal PresentationML package: one master, one blank layout,
//! one theme and a slide part per [`SlideLayout`](crate::layout::SlideLayout).
//! Text boxes and filled bars are written as plain `p:sp` shapes.

mod package;
mod parts;
mod slide;
mod xml;

pub use package::{to_pptx_bytes, write_pptx, PptxWriter};
pub use parts::DeckMetadata;
pub use slide::slide_xml;
pub use xml::escape_xml;
