//! Options for figure extraction.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::Serialize;

use super::detector::RegionDetector;
use super::merge::{RowRule, DEFAULT_CONTAINMENT_TOLERANCE};
use crate::error::{Error, Result};

/// Rendering resolution for page rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Dpi {
    /// 150 dpi
    Standard,
    /// 300 dpi
    #[default]
    High,
    /// 600 dpi
    Ultra,
}

impl Dpi {
    /// Dots per inch.
    pub fn value(self) -> u32 {
        match self {
            Dpi::Standard => 150,
            Dpi::High => 300,
            Dpi::Ultra => 600,
        }
    }
}

impl TryFrom<u32> for Dpi {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            150 => Ok(Dpi::Standard),
            300 => Ok(Dpi::High),
            600 => Ok(Dpi::Ultra),
            other => Err(Error::InvalidDpi(other)),
        }
    }
}

impl FromStr for Dpi {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| Error::Other(format!("Invalid DPI value: {}", s)))?;
        Dpi::try_from(value)
    }
}

impl fmt::Display for Dpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Page selection (1-indexed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Every page
    #[default]
    All,
    /// A range of pages (inclusive)
    Range(RangeInclusive<u32>),
    /// Specific pages
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let (start, end) = (page_number(start, s)?, page_number(end, s)?);
                if start > end {
                    return Err(Error::InvalidPageRange(s.to_string()));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let (start, end) = (page_number(start, s)?, page_number(end, s)?);
                if start > end {
                    return Err(Error::InvalidPageRange(s.to_string()));
                }
                pages.extend(start..=end);
            } else {
                pages.push(page_number(part, s)?);
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

impl FromStr for PageSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PageSelection::parse(s)
    }
}

fn page_number(part: &str, whole: &str) -> Result<u32> {
    match part.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidPageRange(whole.to_string())),
        Ok(n) => Ok(n),
    }
}

/// Options for [`FigureExtractor`](super::FigureExtractor).
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Rasterization resolution for cropping
    pub dpi: Dpi,

    /// Join side-by-side figures into one crop
    pub merge_same_row: bool,

    /// Row grouping used when `merge_same_row` is on
    pub row_rule: RowRule,

    /// Tolerance for labelling a crop as a merged row
    pub containment_tolerance: f32,

    /// Pages to process
    pub pages: PageSelection,

    /// Crops narrower or shorter than this (pixels) are dropped
    pub min_crop_px: u32,

    /// JPEG quality (1-100)
    pub jpeg_quality: u8,

    /// Encode crops in parallel
    pub parallel: bool,

    /// Detector tunables
    pub detector: RegionDetector,
}

impl ExtractOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rendering resolution.
    pub fn with_dpi(mut self, dpi: Dpi) -> Self {
        self.dpi = dpi;
        self
    }

    /// Enable or disable same-row merging.
    pub fn with_merge_same_row(mut self, merge: bool) -> Self {
        self.merge_same_row = merge;
        self
    }

    /// Set the page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.pages = selection;
        self
    }

    /// Set a page range.
    pub fn with_page_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.pages = PageSelection::Range(range);
        self
    }

    /// Set the minimum crop size.
    pub fn with_min_crop(mut self, px: u32) -> Self {
        self.min_crop_px = px;
        self
    }

    /// Set the JPEG quality, clamped to 1-100.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Enable or disable parallel encoding.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the detector.
    pub fn with_detector(mut self, detector: RegionDetector) -> Self {
        self.detector = detector;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            dpi: Dpi::High,
            merge_same_row: true,
            row_rule: RowRule::default(),
            containment_tolerance: DEFAULT_CONTAINMENT_TOLERANCE,
            pages: PageSelection::All,
            min_crop_px: 50,
            jpeg_quality: 95,
            parallel: true,
            detector: RegionDetector::default(),
        }
    }
}
