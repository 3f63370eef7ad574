//! Page access abstraction.
//!
//! The detectors need four things from a page: where its embedded images sit,
//! the boxes of its vector drawings, the boxes of its text blocks, and a
//! raster rendering. These traits expose exactly that, without any concrete
//! PDF library types, so the pipeline can run against synthetic pages.

use image::DynamicImage;

use crate::error::Result;
use crate::model::Region;

/// One page of a document.
///
/// All regions use page coordinates in points with a top-left origin.
pub trait PageSource {
    /// 1-based page number.
    fn number(&self) -> u32;

    /// Page box; usually `(0, 0, width, height)`.
    fn bounds(&self) -> Region;

    /// Placement rectangles of embedded raster images.
    fn image_placements(&self) -> Result<Vec<Region>>;

    /// Bounding boxes of individual vector-drawing primitives.
    fn drawing_bounds(&self) -> Result<Vec<Region>>;

    /// Bounding boxes of text blocks.
    fn text_blocks(&self) -> Result<Vec<Region>>;

    /// Render the page at `dpi` dots per inch.
    fn rasterize(&self, dpi: u32) -> Result<DynamicImage>;
}

/// A paged document.
pub trait DocumentSource {
    /// Number of pages.
    fn page_count(&self) -> u32;

    /// Open a page by 0-based index.
    fn page(&self, index: u32) -> Result<Box<dyn PageSource + '_>>;

    /// Display name used in reports (usually the file name).
    fn name(&self) -> String {
        "document".to_string()
    }
}

/// Points per inch of PDF user space.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Scale factors from page points to the pixels of `image`.
pub fn pixel_scale(page: &Region, image: &DynamicImage) -> (f32, f32) {
    let sx = if page.width() > 0.0 {
        image.width() as f32 / page.width()
    } else {
        1.0
    };
    let sy = if page.height() > 0.0 {
        image.height() as f32 / page.height()
    } else {
        1.0
    };
    (sx, sy)
}
