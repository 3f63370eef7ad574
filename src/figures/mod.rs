//! Figure-region extraction from PDF pages.
//!
//! Three detectors run on each page (embedded raster images, clustered
//! vector drawings, and edge contours on a text-masked rendering). Their
//! regions are merged, optionally joined into rows, and cropped from a page
//! rendering into JPEG files.
//!
//! Page access goes through [`DocumentSource`]/[`PageSource`]; the `pdfium`
//! feature provides the PDFium-backed implementation.

mod detector;
mod drawing;
mod extract;
mod merge;
mod options;
mod source;
mod visual;

#[cfg(feature = "pdfium")]
mod pdfium;

pub use detector::{PageDetection, RegionDetector};
pub use drawing::{
    cluster_drawings, drawing_regions, DEFAULT_DISTANCE_THRESHOLD, DEFAULT_MIN_GROUP_SIZE,
};
pub use extract::{
    batch_output_dir, figure_file_name, find_pdfs, run_batch, BatchEntry, BatchReport,
    ExtractedFigure, ExtractionReport, FigureExtractor, PixelBox, PlannedRegion,
};
pub use merge::{
    merge_rows, sort_top_to_bottom, was_merged, RegionMerger, RowRule, SameRowRule,
    DEFAULT_CONTAINMENT_TOLERANCE, DEFAULT_OVERLAP_THRESHOLD,
};
pub use options::{Dpi, ExtractOptions, PageSelection};
pub use source::{pixel_scale, DocumentSource, PageSource, POINTS_PER_INCH};
pub use visual::{detect_visual_regions, find_visual_regions, VisualOptions};

#[cfg(feature = "pdfium")]
pub use extract::{extract_batch, extract_figures};
#[cfg(feature = "pdfium")]
pub use pdfium::{PdfiumDocument, PdfiumLibrary};
