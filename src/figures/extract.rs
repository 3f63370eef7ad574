//! Crop stage: turn detected regions into JPEG files.

use std::fs;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{imageops, RgbImage};
use rayon::prelude::*;
use serde::Serialize;

use super::detector::RegionDetector;
use super::merge::{merge_rows, sort_top_to_bottom, was_merged};
use super::options::ExtractOptions;
use super::source::{pixel_scale, DocumentSource, PageSource};
use crate::error::{Error, Result};
use crate::model::Region;

/// Crop rectangle in page-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelBox {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// One written figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedFigure {
    /// 1-based index across the document
    pub index: usize,

    /// 1-based page number
    pub page: u32,

    /// 1-based position among the page's regions, top to bottom
    pub region_index: usize,

    /// Region in page points
    pub region: Region,

    /// Crop in pixels at the rendering resolution
    pub pixels: PixelBox,

    /// Physical size `(width, height)` in centimetres
    pub size_cm: (f32, f32),

    /// Whether the crop joins several side-by-side figures
    pub merged: bool,

    /// Output file
    pub path: PathBuf,
}

/// Manifest of one document's extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionReport {
    /// Document name
    pub source: String,

    /// Folder the figures were written to
    pub output_dir: PathBuf,

    /// Rendering resolution
    pub dpi: u32,

    /// Pages that went through detection and cropping
    pub pages_processed: u32,

    /// Pages skipped because they could not be opened or rendered
    pub pages_failed: u32,

    /// Written figures, in file order
    pub figures: Vec<ExtractedFigure>,
}

impl ExtractionReport {
    /// Number of figures written.
    pub fn figure_count(&self) -> usize {
        self.figures.len()
    }
}

/// A region selected for cropping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedRegion {
    /// Region in page points
    pub region: Region,
    /// Whether the region came from a same-row merge
    pub merged: bool,
}

/// Detects, crops and writes figures.
#[derive(Debug, Clone)]
pub struct FigureExtractor {
    options: ExtractOptions,
    detector: RegionDetector,
}

impl FigureExtractor {
    /// Create an extractor. The visual detector renders at the extraction DPI.
    pub fn new(options: ExtractOptions) -> Self {
        let visual = options.detector.visual.clone().with_dpi(options.dpi.value());
        let detector = options.detector.clone().with_visual(visual);
        Self { options, detector }
    }

    /// Get the options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Regions to crop on `page`, top to bottom.
    pub fn plan_page(&self, page: &dyn PageSource) -> Vec<PlannedRegion> {
        let detection = self.detector.detect(page);
        let raw = detection.merged;

        let mut regions = if self.options.merge_same_row {
            let rows = merge_rows(&raw, &self.options.row_rule);
            log::info!(
                "Page {}: {} regions, {} after row merging",
                page.number(),
                raw.len(),
                rows.len()
            );
            rows
        } else {
            log::info!("Page {}: {} regions", page.number(), raw.len());
            raw.clone()
        };
        sort_top_to_bottom(&mut regions);

        regions
            .into_iter()
            .map(|region| PlannedRegion {
                region,
                merged: self.options.merge_same_row
                    && was_merged(&raw, &region, self.options.containment_tolerance),
            })
            .collect()
    }

    /// Extract every selected page of `document` into `out_dir`.
    pub fn extract_document(
        &self,
        document: &dyn DocumentSource,
        out_dir: &Path,
    ) -> Result<ExtractionReport> {
        fs::create_dir_all(out_dir).map_err(|e| Error::from_io(e, out_dir))?;

        let dpi = self.options.dpi.value();
        let page_count = document.page_count();
        log::info!(
            "Extracting figures from {} ({} pages, {} dpi, row merging {})",
            document.name(),
            page_count,
            dpi,
            if self.options.merge_same_row { "on" } else { "off" }
        );

        let mut report = ExtractionReport {
            source: document.name(),
            output_dir: out_dir.to_path_buf(),
            dpi,
            pages_processed: 0,
            pages_failed: 0,
            figures: Vec::new(),
        };

        for index in 0..page_count {
            let number = index + 1;
            if !self.options.pages.includes(number) {
                continue;
            }

            let page = match document.page(index) {
                Ok(page) => page,
                Err(e) => {
                    log::warn!("Page {}: cannot open, skipped: {}", number, e);
                    report.pages_failed += 1;
                    continue;
                }
            };

            match self.extract_page(page.as_ref(), out_dir, report.figures.len())? {
                Some(figures) => {
                    report.pages_processed += 1;
                    report.figures.extend(figures);
                }
                None => report.pages_failed += 1,
            }
        }

        log::info!(
            "Extracted {} figures from {} pages ({} failed)",
            report.figures.len(),
            report.pages_processed,
            report.pages_failed
        );
        Ok(report)
    }

    /// Crop one page. `None` means the page could not be rendered.
    fn extract_page(
        &self,
        page: &dyn PageSource,
        out_dir: &Path,
        numbered: usize,
    ) -> Result<Option<Vec<ExtractedFigure>>> {
        let plan = self.plan_page(page);
        if plan.is_empty() {
            return Ok(Some(Vec::new()));
        }

        let dpi = self.options.dpi.value();
        let image = match page.rasterize(dpi) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Page {}: rendering failed, skipped: {}", page.number(), e);
                return Ok(None);
            }
        };
        let bounds = page.bounds();
        let (sx, sy) = pixel_scale(&bounds, &image);
        let rgb = image.to_rgb8();

        let mut crops: Vec<(ExtractedFigure, RgbImage)> = Vec::new();
        for (i, planned) in plan.iter().enumerate() {
            let Some(pixels) = to_pixels(&planned.region, &bounds, sx, sy, &rgb) else {
                continue;
            };
            if pixels.width < self.options.min_crop_px || pixels.height < self.options.min_crop_px {
                log::debug!(
                    "Page {}: crop {}x{} below minimum, dropped",
                    page.number(),
                    pixels.width,
                    pixels.height
                );
                continue;
            }

            let index = numbered + crops.len() + 1;
            let region_index = i + 1;
            let path = out_dir.join(figure_file_name(index, page.number(), region_index, planned.merged));
            let crop = imageops::crop_imm(&rgb, pixels.x, pixels.y, pixels.width, pixels.height).to_image();

            crops.push((
                ExtractedFigure {
                    index,
                    page: page.number(),
                    region_index,
                    region: planned.region,
                    pixels,
                    size_cm: (
                        pixels.width as f32 * 2.54 / dpi as f32,
                        pixels.height as f32 * 2.54 / dpi as f32,
                    ),
                    merged: planned.merged,
                    path,
                },
                crop,
            ));
        }

        let quality = self.options.jpeg_quality;
        let encoded: Vec<Vec<u8>> = if self.options.parallel {
            crops
                .par_iter()
                .map(|(_, crop)| encode_jpeg(crop, quality))
                .collect::<Result<_>>()?
        } else {
            crops
                .iter()
                .map(|(_, crop)| encode_jpeg(crop, quality))
                .collect::<Result<_>>()?
        };

        let mut figures = Vec::with_capacity(crops.len());
        for ((figure, _), bytes) in crops.into_iter().zip(encoded) {
            fs::write(&figure.path, bytes)?;
            log::info!(
                "Saved {} ({}x{} px, {:.1}x{:.1} cm)",
                figure.path.display(),
                figure.pixels.width,
                figure.pixels.height,
                figure.size_cm.0,
                figure.size_cm.1
            );
            figures.push(figure);
        }

        Ok(Some(figures))
    }
}

impl Default for FigureExtractor {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}

/// Output file name for a figure.
pub fn figure_file_name(index: usize, page: u32, region_index: usize, merged: bool) -> String {
    let kind = if merged { "merged_row" } else { "region" };
    format!("figure_{:03}_page{:03}_{}{:02}.jpg", index, page, kind, region_index)
}

/// Convert a page region to a clamped pixel box; `None` when nothing is left.
fn to_pixels(region: &Region, page: &Region, sx: f32, sy: f32, image: &RgbImage) -> Option<PixelBox> {
    let to_px = |v: f32, origin: f32, scale: f32, max: u32| -> u32 {
        ((v - origin) * scale).floor().clamp(0.0, max as f32) as u32
    };
    let x0 = to_px(region.x0, page.x0, sx, image.width());
    let y0 = to_px(region.y0, page.y0, sy, image.height());
    let x1 = to_px(region.x1, page.x0, sx, image.width());
    let y1 = to_px(region.y1, page.y0, sy, image.height());

    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(PixelBox {
        x: x0,
        y: y0,
        width: x1 - x0,
        height: y1 - y0,
    })
}

fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    encoder.encode_image(image)?;
    Ok(bytes)
}

/// One document of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    /// Input PDF
    pub source: PathBuf,

    /// Output folder
    pub output_dir: PathBuf,

    /// Figures written (0 on failure)
    pub figures: usize,

    /// Failure message, if the document failed
    pub error: Option<String>,
}

/// Outcome of a folder batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    /// One entry per PDF, in file name order
    pub documents: Vec<BatchEntry>,
}

impl BatchReport {
    /// Documents that completed.
    pub fn succeeded(&self) -> usize {
        self.documents.iter().filter(|d| d.error.is_none()).count()
    }

    /// Documents that failed.
    pub fn failed(&self) -> usize {
        self.documents.len() - self.succeeded()
    }

    /// Figures across all documents.
    pub fn total_figures(&self) -> usize {
        self.documents.iter().map(|d| d.figures).sum()
    }
}

/// PDF files in `folder` (extension matched case-insensitively), sorted by name.
pub fn find_pdfs(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(Error::FileNotFound(folder.to_path_buf()));
    }

    let mut pdfs = Vec::new();
    for entry in fs::read_dir(folder).map_err(|e| Error::from_io(e, folder))? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}

/// Output folder for one PDF of a batch: `{out_base}/{stem}_figures`.
pub fn batch_output_dir(out_base: &Path, pdf: &Path) -> PathBuf {
    let stem = pdf
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    out_base.join(format!("{}_figures", stem))
}

/// Run `extract` over every PDF in `folder`.
///
/// A failing document is logged and recorded; the batch continues.
pub fn run_batch<F>(folder: &Path, out_base: &Path, mut extract: F) -> Result<BatchReport>
where
    F: FnMut(&Path, &Path) -> Result<ExtractionReport>,
{
    let pdfs = find_pdfs(folder)?;
    if pdfs.is_empty() {
        log::warn!("No PDF files in {}", folder.display());
        return Ok(BatchReport::default());
    }
    log::info!("Found {} PDF files in {}", pdfs.len(), folder.display());

    let mut report = BatchReport::default();
    for (i, pdf) in pdfs.iter().enumerate() {
        let output_dir = batch_output_dir(out_base, pdf);
        log::info!("[{}/{}] {}", i + 1, pdfs.len(), pdf.display());

        let entry = match extract(pdf, &output_dir) {
            Ok(result) => BatchEntry {
                source: pdf.clone(),
                output_dir,
                figures: result.figure_count(),
                error: None,
            },
            Err(e) => {
                log::warn!("Failed to process {}: {}", pdf.display(), e);
                BatchEntry {
                    source: pdf.clone(),
                    output_dir,
                    figures: 0,
                    error: Some(e.to_string()),
                }
            }
        };
        report.documents.push(entry);
    }

    Ok(report)
}

#[cfg(feature = "pdfium")]
mod pdf {
    use std::path::Path;

    use super::{run_batch, BatchReport, ExtractionReport, FigureExtractor};
    use crate::error::Result;
    use crate::figures::options::ExtractOptions;
    use crate::figures::pdfium::PdfiumLibrary;

    /// Extract figures from a PDF file into `out_dir`.
    pub fn extract_figures(
        pdf: impl AsRef<Path>,
        out_dir: impl AsRef<Path>,
        options: &ExtractOptions,
    ) -> Result<ExtractionReport> {
        let library = PdfiumLibrary::bind()?;
        let document = library.open(pdf)?;
        FigureExtractor::new(options.clone()).extract_document(&document, out_dir.as_ref())
    }

    /// Extract figures from every PDF in `folder`, each into `{stem}_figures/`.
    pub fn extract_batch(
        folder: impl AsRef<Path>,
        out_base: impl AsRef<Path>,
        options: &ExtractOptions,
    ) -> Result<BatchReport> {
        let library = PdfiumLibrary::bind()?;
        let extractor = FigureExtractor::new(options.clone());
        run_batch(folder.as_ref(), out_base.as_ref(), |pdf, out_dir| {
            let document = library.open(pdf)?;
            extractor.extract_document(&document, out_dir)
        })
    }
}

#[cfg(feature = "pdfium")]
pub use pdf::{extract_batch, extract_figures};
