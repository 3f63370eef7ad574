//! Three-way figure detection on one page.

use serde::Serialize;

use super::drawing::{drawing_regions, DEFAULT_DISTANCE_THRESHOLD, DEFAULT_MIN_GROUP_SIZE};
use super::merge::RegionMerger;
use super::source::PageSource;
use super::visual::{detect_visual_regions, VisualOptions};
use crate::error::Result;
use crate::model::Region;

/// Regions found on one page, per detector and merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageDetection {
    /// 1-based page number
    pub page: u32,

    /// Embedded raster image placements
    pub embedded: Vec<Region>,

    /// Clustered vector drawings
    pub drawings: Vec<Region>,

    /// Edge/contour blobs
    pub visual: Vec<Region>,

    /// Union of the above after overlap merging
    pub merged: Vec<Region>,
}

impl PageDetection {
    /// All raw detector output, in detector order.
    pub fn raw(&self) -> Vec<Region> {
        self.embedded
            .iter()
            .chain(&self.drawings)
            .chain(&self.visual)
            .copied()
            .collect()
    }
}

/// Runs the embedded-image, drawing and visual detectors and merges their output.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionDetector {
    /// Centre distance linking two drawing primitives
    pub drawing_threshold: f32,

    /// Minimum drawing cluster size in points
    pub min_group_size: f32,

    /// Visual detector tunables
    pub visual: VisualOptions,

    /// Overlap merging
    pub merger: RegionMerger,
}

impl RegionDetector {
    /// Create a detector with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the visual detector options.
    pub fn with_visual(mut self, visual: VisualOptions) -> Self {
        self.visual = visual;
        self
    }

    /// Set the merger.
    pub fn with_merger(mut self, merger: RegionMerger) -> Self {
        self.merger = merger;
        self
    }

    /// Set the drawing clustering parameters.
    pub fn with_drawing_clustering(mut self, threshold: f32, min_size: f32) -> Self {
        self.drawing_threshold = threshold;
        self.min_group_size = min_size;
        self
    }

    /// Detect figure regions on `page`.
    ///
    /// Each detector runs independently; one that fails is logged and
    /// contributes nothing.
    pub fn detect(&self, page: &dyn PageSource) -> PageDetection {
        let number = page.number();

        let embedded = recover(number, "embedded image", page.image_placements());
        let drawings = recover(
            number,
            "drawing",
            page.drawing_bounds().map(|d| {
                drawing_regions(&d, self.drawing_threshold, self.min_group_size)
            }),
        );
        let visual = recover(number, "visual", detect_visual_regions(page, &self.visual));

        let mut detection = PageDetection {
            page: number,
            embedded,
            drawings,
            visual,
            merged: Vec::new(),
        };
        detection.merged = self.merger.merge(&detection.raw());

        log::debug!(
            "Page {}: {} embedded, {} drawing, {} visual -> {} merged",
            number,
            detection.embedded.len(),
            detection.drawings.len(),
            detection.visual.len(),
            detection.merged.len()
        );
        detection
    }
}

impl Default for RegionDetector {
    fn default() -> Self {
        Self {
            drawing_threshold: DEFAULT_DISTANCE_THRESHOLD,
            min_group_size: DEFAULT_MIN_GROUP_SIZE,
            visual: VisualOptions::default(),
            merger: RegionMerger::default(),
        }
    }
}

fn recover(page: u32, detector: &str, result: Result<Vec<Region>>) -> Vec<Region> {
    result.unwrap_or_else(|e| {
        log::warn!("Page {}: {} detector failed: {}", page, detector, e);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image::DynamicImage;

    struct BrokenPage;

    impl PageSource for BrokenPage {
        fn number(&self) -> u32 {
            7
        }

        fn bounds(&self) -> Region {
            Region::new(0.0, 0.0, 200.0, 200.0)
        }

        fn image_placements(&self) -> Result<Vec<Region>> {
            Ok(vec![Region::new(10.0, 10.0, 110.0, 110.0)])
        }

        fn drawing_bounds(&self) -> Result<Vec<Region>> {
            Err(Error::Pdf("no path objects".to_string()))
        }

        fn text_blocks(&self) -> Result<Vec<Region>> {
            Ok(Vec::new())
        }

        fn rasterize(&self, _dpi: u32) -> Result<DynamicImage> {
            Err(Error::Pdf("render failed".to_string()))
        }
    }

    #[test]
    fn test_failing_detectors_contribute_nothing() {
        let detection = RegionDetector::default().detect(&BrokenPage);
        assert_eq!(detection.page, 7);
        assert_eq!(detection.embedded.len(), 1);
        assert!(detection.drawings.is_empty());
        assert!(detection.visual.is_empty());
        assert_eq!(detection.merged, vec![Region::new(10.0, 10.0, 110.0, 110.0)]);
    }

    #[test]
    fn test_raw_order() {
        let detection = PageDetection {
            page: 1,
            embedded: vec![Region::new(0.0, 0.0, 1.0, 1.0)],
            drawings: vec![Region::new(2.0, 2.0, 3.0, 3.0)],
            visual: vec![Region::new(4.0, 4.0, 5.0, 5.0)],
            merged: Vec::new(),
        };
        let raw = detection.raw();
        assert_eq!(raw.len(), 3);
        assert_eq!(raw[0].x0, 0.0);
        assert_eq!(raw[2].x0, 4.0);
    }
}
