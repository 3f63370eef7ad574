//! Edge/contour figure detector.
//!
//! The page is rendered, text blocks are masked out, and the remaining edges
//! are closed into blobs whose outer contours become candidate regions.

use image::{DynamicImage, GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use imageproc::distance_transform::Norm;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::edges::canny;
use imageproc::morphology::{dilate, erode};
use imageproc::rect::Rect;

use super::source::{pixel_scale, PageSource};
use crate::error::Result;
use crate::model::Region;

/// Tunables for the visual detector.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualOptions {
    /// Rendering resolution
    pub dpi: u32,

    /// Canny low threshold
    pub canny_low: f32,

    /// Canny high threshold
    pub canny_high: f32,

    /// Structuring element radius (L-infinity); 2 gives a 5x5 square
    pub kernel_radius: u8,

    /// Dilation passes
    pub dilate_iterations: u32,

    /// Erosion passes
    pub erode_iterations: u32,

    /// Blobs must be wider and taller than this, in pixels
    pub min_size_px: u32,
}

impl VisualOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rendering resolution.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the minimum blob size.
    pub fn with_min_size(mut self, px: u32) -> Self {
        self.min_size_px = px;
        self
    }
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            dpi: 300,
            canny_low: 50.0,
            canny_high: 150.0,
            kernel_radius: 2,
            dilate_iterations: 2,
            erode_iterations: 1,
            min_size_px: 100,
        }
    }
}

/// Render `page` and detect visual regions on it.
///
/// A failure to read text blocks only disables the exclusion mask; a
/// rendering failure is returned to the caller.
pub fn detect_visual_regions(page: &dyn PageSource, options: &VisualOptions) -> Result<Vec<Region>> {
    let image = page.rasterize(options.dpi)?;
    let text_blocks = page.text_blocks().unwrap_or_else(|e| {
        log::warn!(
            "Page {}: text blocks unavailable, no exclusion mask: {}",
            page.number(),
            e
        );
        Vec::new()
    });
    Ok(find_visual_regions(
        &image,
        &page.bounds(),
        &text_blocks,
        options,
    ))
}

/// Detect visual regions on an already rendered page image.
pub fn find_visual_regions(
    image: &DynamicImage,
    page: &Region,
    text_blocks: &[Region],
    options: &VisualOptions,
) -> Vec<Region> {
    let gray = image.to_luma8();
    let (sx, sy) = pixel_scale(page, image);

    let mask = text_mask(gray.width(), gray.height(), page, text_blocks, sx, sy);
    let mut edges = canny(&gray, options.canny_low, options.canny_high);
    for (edge, masked) in edges.pixels_mut().zip(mask.pixels()) {
        if masked.0[0] > 0 {
            edge.0[0] = 0;
        }
    }

    let mut closed = edges;
    for _ in 0..options.dilate_iterations {
        closed = dilate(&closed, Norm::LInf, options.kernel_radius);
    }
    for _ in 0..options.erode_iterations {
        closed = erode(&closed, Norm::LInf, options.kernel_radius);
    }

    let min = options.min_size_px;
    let mut regions = Vec::new();
    for contour in find_contours::<i32>(&closed) {
        if contour.border_type != BorderType::Outer || contour.parent.is_some() {
            continue;
        }
        let Some((x0, y0, x1, y1)) = bounding_box(&contour.points) else {
            continue;
        };
        let w = (x1 - x0 + 1) as u32;
        let h = (y1 - y0 + 1) as u32;
        if w <= min || h <= min {
            continue;
        }
        regions.push(Region::new(
            x0 as f32 / sx + page.x0,
            y0 as f32 / sy + page.y0,
            (x1 + 1) as f32 / sx + page.x0,
            (y1 + 1) as f32 / sy + page.y0,
        ));
    }

    log::debug!("Visual detector found {} regions", regions.len());
    regions
}

/// Filled text-block rectangles in image pixels; 255 marks text.
fn text_mask(
    width: u32,
    height: u32,
    page: &Region,
    text_blocks: &[Region],
    sx: f32,
    sy: f32,
) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    for block in text_blocks {
        let x0 = ((block.x0 - page.x0) * sx).floor() as i32;
        let y0 = ((block.y0 - page.y0) * sy).floor() as i32;
        let x1 = ((block.x1 - page.x0) * sx).floor() as i32;
        let y1 = ((block.y1 - page.y0) * sy).floor() as i32;
        if x1 < x0 || y1 < y0 {
            continue;
        }
        // Corners are inclusive
        let rect = Rect::at(x0, y0).of_size((x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32);
        draw_filled_rect_mut(&mut mask, rect, Luma([255u8]));
    }
    mask
}

fn bounding_box(points: &[imageproc::point::Point<i32>]) -> Option<(i32, i32, i32, i32)> {
    let first = points.first()?;
    Some(points.iter().fold(
        (first.x, first.y, first.x, first.y),
        |(x0, y0, x1, y1), p| (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use imageproc::drawing::draw_filled_rect_mut as fill;

    fn page_with_block(x: i32, y: i32, w: u32, h: u32) -> DynamicImage {
        let mut img = image::RgbImage::from_pixel(600, 600, Rgb([255, 255, 255]));
        fill(&mut img, Rect::at(x, y).of_size(w, h), Rgb([0, 0, 0]));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_finds_block() {
        let image = page_with_block(100, 100, 300, 200);
        let page = Region::new(0.0, 0.0, 600.0, 600.0);
        let regions = find_visual_regions(&image, &page, &[], &VisualOptions::default());
        assert_eq!(regions.len(), 1);

        let r = regions[0];
        // Closing grows the blob by a few pixels around the block edges
        assert!(r.x0 > 90.0 && r.x0 <= 100.0, "x0 = {}", r.x0);
        assert!(r.y0 > 90.0 && r.y0 <= 100.0, "y0 = {}", r.y0);
        assert!(r.x1 >= 400.0 && r.x1 < 410.0, "x1 = {}", r.x1);
        assert!(r.y1 >= 300.0 && r.y1 < 310.0, "y1 = {}", r.y1);
    }

    #[test]
    fn test_small_blob_dropped() {
        let image = page_with_block(100, 100, 60, 60);
        let page = Region::new(0.0, 0.0, 600.0, 600.0);
        let regions = find_visual_regions(&image, &page, &[], &VisualOptions::default());
        assert!(regions.is_empty());
    }

    #[test]
    fn test_text_mask_excludes_block() {
        let image = page_with_block(100, 100, 300, 200);
        let page = Region::new(0.0, 0.0, 600.0, 600.0);
        let text = [Region::new(80.0, 80.0, 420.0, 320.0)];
        let regions = find_visual_regions(&image, &page, &text, &VisualOptions::default());
        assert!(regions.is_empty());
    }

    #[test]
    fn test_scales_to_page_coordinates() {
        // Image rendered at twice the page size
        let mut big = image::RgbImage::from_pixel(1200, 1200, Rgb([255, 255, 255]));
        fill(&mut big, Rect::at(200, 200).of_size(600, 400), Rgb([0, 0, 0]));
        let image = DynamicImage::ImageRgb8(big);
        let page = Region::new(0.0, 0.0, 600.0, 600.0);
        let regions = find_visual_regions(&image, &page, &[], &VisualOptions::default());
        assert_eq!(regions.len(), 1);
        assert!((regions[0].x0 - 100.0).abs() < 5.0);
        assert!((regions[0].x1 - 400.0).abs() < 5.0);
    }

    #[test]
    fn test_bounding_box() {
        use imageproc::point::Point;
        let points = [Point::new(5, 9), Point::new(2, 11), Point::new(7, 3)];
        assert_eq!(bounding_box(&points), Some((2, 3, 7, 11)));
        assert_eq!(bounding_box(&[]), None);
    }
}
