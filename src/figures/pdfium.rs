//! [`DocumentSource`] backed by PDFium.
//!
//! PDFium reports geometry with a bottom-left origin; every rectangle is
//! flipped to the top-left convention here.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use pdfium_render::prelude::*;

use super::source::{DocumentSource, PageSource, POINTS_PER_INCH};
use crate::detect::detect_format_from_path;
use crate::error::{Error, Result};
use crate::model::Region;

/// A bound PDFium library.
pub struct PdfiumLibrary {
    pdfium: Pdfium,
}

impl PdfiumLibrary {
    /// Bind PDFium from the working directory, then from the system library path.
    pub fn bind() -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| Error::Pdf(format!("Failed to bind pdfium library: {:?}", e)))?;
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    /// Open a PDF file.
    ///
    /// The header is checked first so a non-PDF input yields
    /// [`Error::UnknownFormat`] instead of an opaque backend error.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<PdfiumDocument<'_>> {
        let path = path.as_ref();
        let format = detect_format_from_path(path)?;
        log::debug!("Opening {} ({})", path.display(), format);

        let document = self.pdfium.load_pdf_from_file(path, None)?;
        Ok(PdfiumDocument {
            document,
            path: path.to_path_buf(),
        })
    }
}

/// An open PDF document.
pub struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
    path: PathBuf,
}

impl DocumentSource for PdfiumDocument<'_> {
    fn page_count(&self) -> u32 {
        self.document.pages().len() as u32
    }

    fn page(&self, index: u32) -> Result<Box<dyn PageSource + '_>> {
        let count = self.page_count();
        if index >= count {
            return Err(Error::PageOutOfRange(index + 1, count));
        }
        let page_index = index
            .try_into()
            .map_err(|_| Error::PageOutOfRange(index + 1, count))?;
        let page = self.document.pages().get(page_index)?;
        Ok(Box::new(PdfiumPage {
            page,
            number: index + 1,
        }))
    }

    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

struct PdfiumPage<'a> {
    page: PdfPage<'a>,
    number: u32,
}

impl PdfiumPage<'_> {
    fn height(&self) -> f32 {
        self.page.height().value
    }

    fn flip(&self, left: f32, top: f32, right: f32, bottom: f32) -> Region {
        let h = self.height();
        Region::new(left, h - top, right, h - bottom)
    }

    fn object_bounds(&self, wanted: PdfPageObjectType) -> Result<Vec<Region>> {
        let mut regions = Vec::new();
        for object in self.page.objects().iter() {
            if object.object_type() != wanted {
                continue;
            }
            let bounds = object.bounds()?;
            regions.push(self.flip(
                bounds.left().value,
                bounds.top().value,
                bounds.right().value,
                bounds.bottom().value,
            ));
        }
        Ok(regions)
    }
}

impl PageSource for PdfiumPage<'_> {
    fn number(&self) -> u32 {
        self.number
    }

    fn bounds(&self) -> Region {
        Region::new(0.0, 0.0, self.page.width().value, self.height())
    }

    fn image_placements(&self) -> Result<Vec<Region>> {
        self.object_bounds(PdfPageObjectType::Image)
    }

    fn drawing_bounds(&self) -> Result<Vec<Region>> {
        self.object_bounds(PdfPageObjectType::Path)
    }

    fn text_blocks(&self) -> Result<Vec<Region>> {
        let text = self.page.text()?;
        let mut blocks = Vec::new();
        for segment in text.segments().iter() {
            if segment.text().trim().is_empty() {
                continue;
            }
            let bounds = segment.bounds();
            blocks.push(self.flip(
                bounds.left().value,
                bounds.top().value,
                bounds.right().value,
                bounds.bottom().value,
            ));
        }
        Ok(blocks)
    }

    fn rasterize(&self, dpi: u32) -> Result<DynamicImage> {
        let scale = dpi as f32 / POINTS_PER_INCH;
        let config = PdfRenderConfig::new().scale_page_by_factor(scale);
        let bitmap = self.page.render_with_config(&config)?;
        Ok(bitmap.as_image())
    }
}
