//! Error types for the paperdeck library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for paperdeck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building decks or extracting figures.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An input file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error reported by the PDF backend.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Error decoding, processing or encoding raster images.
    #[error("Image error: {0}")]
    Image(String),

    /// Error assembling the slide-deck package.
    #[error("Package error: {0}")]
    Package(String),

    /// Error during rendering (XML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Rendering resolution outside the supported set.
    #[error("Unsupported DPI {0} (expected 150, 300 or 600)")]
    InvalidDpi(u32),

    /// Malformed page range string.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map an I/O error on `path` to [`Error::FileNotFound`] when the file is absent.
    pub fn from_io(err: io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Error::FileNotFound(path.into())
        } else {
            Error::Io(err)
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Package(err.to_string()),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Error::Io(e),
            _ => Error::Image(err.to_string()),
        }
    }
}

#[cfg(feature = "pdfium")]
impl From<pdfium_render::prelude::PdfiumError> for Error {
    fn from(err: pdfium_render::prelude::PdfiumError) -> Self {
        Error::Pdf(format!("{:?}", err))
    }
}
