//! Input format detection.
//!
//! The CLI accepts either a Markdown deck or a PDF paper as its bare argument,
//! and the figure extractor refuses anything that is not a PDF before handing
//! the file to the PDF backend.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"
const HEADER_LEN: u64 = 16;

/// PDF header information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// Kind of input the pipelines understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Two-level Markdown deck source
    Markdown,
    /// PDF document for figure extraction
    Pdf,
}

/// Read the PDF header of a file.
///
/// A missing file is reported as [`Error::FileNotFound`].
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<PdfFormat> {
    let path = path.as_ref();
    let header = read_header(path)?;
    detect_format_from_bytes(&header)
}

/// Detect PDF format from the leading bytes of a file.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<PdfFormat> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(PdfFormat { version })
}

/// Decide whether a path is a PDF or a Markdown deck.
///
/// Magic bytes win over the extension, so a PDF saved as `paper.bin` is still
/// routed to figure extraction. Anything that is not a PDF is treated as
/// Markdown text, which the permissive parser always accepts.
pub fn detect_input_kind<P: AsRef<Path>>(path: P) -> Result<InputKind> {
    let path = path.as_ref();
    let header = read_header(path)?;
    if header.starts_with(PDF_MAGIC) {
        return Ok(InputKind::Pdf);
    }

    let is_pdf_ext = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if is_pdf_ext {
        return Err(Error::UnknownFormat);
    }

    Ok(InputKind::Markdown)
}

fn read_header(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| Error::from_io(e, path))?;
    let mut header = Vec::with_capacity(HEADER_LEN as usize);
    file.take(HEADER_LEN).read_to_end(&mut header)?;
    Ok(header)
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_detect_valid_pdf() {
        let data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
        let format = detect_format_from_bytes(data).unwrap();
        assert_eq!(format.version, "1.7");
        assert_eq!(format.to_string(), "PDF 1.7");
    }

    #[test]
    fn test_detect_invalid_format() {
        assert!(matches!(
            detect_format_from_bytes(b"# Slide\n"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            detect_format_from_bytes(b"%PDF"),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_detect_bad_version() {
        assert!(matches!(
            detect_format_from_bytes(b"%PDF-x.y\n"),
            Err(Error::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_version_validation() {
        assert!(is_valid_version("1.4"));
        assert!(is_valid_version("2.0"));
        assert!(!is_valid_version("10.0"));
        assert!(!is_valid_version("abc"));
    }

    #[test]
    fn test_detect_input_kind() {
        let dir = tempfile::tempdir().unwrap();

        let md = dir.path().join("deck.md");
        std::fs::write(&md, "# Title\n").unwrap();
        assert_eq!(detect_input_kind(&md).unwrap(), InputKind::Markdown);

        let pdf = dir.path().join("paper.bin");
        let mut file = File::create(&pdf).unwrap();
        file.write_all(b"%PDF-1.5\n").unwrap();
        assert_eq!(detect_input_kind(&pdf).unwrap(), InputKind::Pdf);

        let fake = dir.path().join("fake.pdf");
        std::fs::write(&fake, "hello").unwrap();
        assert!(matches!(detect_input_kind(&fake), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_missing_file() {
        let result = detect_format_from_path("/nonexistent/paper.pdf");
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
