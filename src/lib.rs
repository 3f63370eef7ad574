//! # paperdeck
//!
//! Two pipelines for turning research papers into presentation material:
//!
//! - **Slides**: a two-level Markdown outline (`#` slides, `##` modules) is
//!   laid out on a 16:9 canvas and written as a `.pptx` deck.
//! - **Figures**: figure regions are detected on PDF pages, merged, and
//!   cropped into JPEG files.
//!
//! ## Quick Start
//!
//! ```no_run
//! use paperdeck::{markdown_to_pptx, LayoutOptions};
//!
//! fn main() -> paperdeck::Result<()> {
//!     let slides = markdown_to_pptx("paper.md", "paper.pptx", &LayoutOptions::default())?;
//!     println!("{} slides", slides);
//!     Ok(())
//! }
//! ```
//!
//! ```no_run
//! # #[cfg(feature = "pdfium")]
//! # fn main() -> paperdeck::Result<()> {
//! use paperdeck::{extract_figures, Dpi, ExtractOptions};
//!
//! let options = ExtractOptions::new().with_dpi(Dpi::High);
//! let report = extract_figures("paper.pdf", "paper_figures", &options)?;
//! println!("{} figures", report.figure_count());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "pdfium"))]
//! # fn main() {}
//! ```
//!
//! ## Features
//!
//! - **Tolerant input decoding**: UTF-8, GBK and legacy code pages
//! - **Deterministic layout**: fixed or estimated module heights
//! - **Three-way figure detection**: embedded images, vector drawings, edge contours
//! - **Parallel encoding**: crops are JPEG-encoded with Rayon

pub mod detect;
pub mod encoding;
pub mod error;
pub mod figures;
pub mod layout;
pub mod markdown;
pub mod model;
pub mod pptx;
pub mod render;

// Re-export commonly used types
pub use detect::{
    detect_format_from_bytes, detect_format_from_path, detect_input_kind, InputKind, PdfFormat,
};
pub use encoding::{
    decode_bytes, decode_with_fallbacks, read_text_file, DecodeMethod, DecodedText,
};
pub use error::{Error, Result};
pub use figures::{
    BatchReport, DocumentSource, Dpi, ExtractOptions, ExtractionReport, FigureExtractor,
    PageSelection, PageSource, RegionDetector, RegionMerger,
};
pub use layout::{compute_deck, compute_layout, HeightPolicy, LayoutOptions, SlideLayout, Theme};
pub use markdown::{parse_markdown, parse_markdown_file};
pub use model::{ModuleRecord, Paragraph, Region, SlideRecord, TextSpan};
pub use pptx::{to_pptx_bytes, write_pptx, DeckMetadata, PptxWriter};
pub use render::{to_json, JsonFormat};

#[cfg(feature = "pdfium")]
pub use figures::{extract_batch, extract_figures};

use std::path::Path;

/// Parse a Markdown file and lay out every slide.
///
/// # Example
///
/// ```no_run
/// use paperdeck::{markdown_to_layouts, LayoutOptions};
///
/// let layouts = markdown_to_layouts("paper.md", &LayoutOptions::default()).unwrap();
/// println!("Slides: {}", layouts.len());
/// ```
pub fn markdown_to_layouts<P: AsRef<Path>>(
    input: P,
    options: &LayoutOptions,
) -> Result<Vec<SlideLayout>> {
    let slides = parse_markdown_file(input)?;
    Ok(compute_deck(&slides, options))
}

/// Convert a Markdown file to a `.pptx` deck and return the slide count.
///
/// A source without any `# ` heading produces a deck with no slides.
///
/// # Example
///
/// ```no_run
/// use paperdeck::{markdown_to_pptx, HeightPolicy, LayoutOptions};
///
/// let options = LayoutOptions::default().with_height_policy(HeightPolicy::Estimated);
/// markdown_to_pptx("paper.md", "paper.pptx", &options).unwrap();
/// ```
pub fn markdown_to_pptx<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &LayoutOptions,
) -> Result<usize> {
    let layouts = markdown_to_layouts(input, options)?;
    if layouts.is_empty() {
        log::warn!("No slides found; writing an empty deck");
    }
    write_pptx(&layouts, options, output)?;
    Ok(layouts.len())
}
