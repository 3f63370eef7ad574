//! OPC zip assembly.

use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::parts::{self, DeckMetadata};
use super::slide::slide_xml;
use crate::error::{Error, Result};
use crate::layout::{cm_to_emu, LayoutOptions, SlideLayout};

/// Writes slide layouts as a `.pptx` package.
///
/// # Example
///
/// ```no_run
/// use paperdeck::layout::{compute_deck, LayoutOptions};
/// use paperdeck::markdown::parse_markdown;
/// use paperdeck::pptx::PptxWriter;
///
/// let options = LayoutOptions::default();
/// let slides = parse_markdown("# Hello\n## World\ntext\n");
/// let layouts = compute_deck(&slides, &options);
/// PptxWriter::new(&options).write(&layouts, "deck.pptx")?;
/// # Ok::<(), paperdeck::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PptxWriter<'a> {
    options: &'a LayoutOptions,
    metadata: DeckMetadata,
}

impl<'a> PptxWriter<'a> {
    /// Create a writer for the given layout options.
    pub fn new(options: &'a LayoutOptions) -> Self {
        Self {
            options,
            metadata: DeckMetadata::default(),
        }
    }

    /// Set document properties.
    pub fn with_metadata(mut self, metadata: DeckMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Write the package to a file.
    pub fn write<P: AsRef<Path>>(&self, layouts: &[SlideLayout], path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes(layouts)?;
        std::fs::write(path, bytes)?;
        log::info!("Wrote {} slides to {}", layouts.len(), path.display());
        Ok(())
    }

    /// Serialize the package to bytes.
    pub fn to_bytes(&self, layouts: &[SlideLayout]) -> Result<Vec<u8>> {
        let mut metadata = self.metadata.clone();
        if metadata.title.is_empty() {
            if let Some(first) = layouts.first() {
                metadata.title = first.title.clone();
            }
        }

        let count = layouts.len();
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut add = |name: &str, content: String| -> Result<()> {
            zip.start_file(name, options)?;
            zip.write_all(content.as_bytes())?;
            Ok(())
        };

        add("[Content_Types].xml", parts::content_types_xml(count)?)?;
        add("_rels/.rels", parts::package_rels_xml()?)?;
        add("docProps/core.xml", parts::core_props_xml(&metadata)?)?;
        add("docProps/app.xml", parts::app_props_xml(count)?)?;
        add(
            "ppt/presentation.xml",
            parts::presentation_xml(
                count,
                cm_to_emu(self.options.canvas_width),
                cm_to_emu(self.options.canvas_height),
            )?,
        )?;
        add(
            "ppt/_rels/presentation.xml.rels",
            parts::presentation_rels_xml(count)?,
        )?;
        add("ppt/slideMasters/slideMaster1.xml", parts::slide_master_xml()?)?;
        add(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            parts::slide_master_rels_xml()?,
        )?;
        add("ppt/slideLayouts/slideLayout1.xml", parts::slide_layout_xml()?)?;
        add(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            parts::slide_layout_rels_xml()?,
        )?;
        add("ppt/theme/theme1.xml", parts::theme_xml(&self.options.theme)?)?;

        for (i, layout) in layouts.iter().enumerate() {
            let n = i + 1;
            add(&format!("ppt/slides/slide{}.xml", n), slide_xml(layout)?)?;
            add(
                &format!("ppt/slides/_rels/slide{}.xml.rels", n),
                parts::slide_rels_xml()?,
            )?;
        }

        let cursor = zip.finish().map_err(Error::from)?;
        log::debug!("Packaged {} slides ({} bytes)", count, cursor.get_ref().len());
        Ok(cursor.into_inner())
    }
}

/// Write slide layouts to a `.pptx` file.
pub fn write_pptx<P: AsRef<Path>>(
    layouts: &[SlideLayout],
    options: &LayoutOptions,
    path: P,
) -> Result<()> {
    PptxWriter::new(options).write(layouts, path)
}

/// Serialize slide layouts to `.pptx` bytes.
pub fn to_pptx_bytes(layouts: &[SlideLayout], options: &LayoutOptions) -> Result<Vec<u8>> {
    PptxWriter::new(options).to_bytes(layouts)
}
