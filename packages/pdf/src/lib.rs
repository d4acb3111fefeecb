#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Page text acquisition for campaign-finance disclosure PDFs.
//!
//! Digital filings carry a text layer that [`pdf_extract`] reads directly.
//! Scanned filings do not, so pages whose native text is too short are
//! rasterized with `pdftoppm` and recognized with `tesseract`.
//!
//! Both strategies implement [`PageTextProvider`]; [`FallbackTextProvider`]
//! chains them so the parsing engine only ever sees plain page text.

pub mod download;
pub mod fallback;
pub mod native;
pub mod ocr;

pub use fallback::FallbackTextProvider;
pub use native::NativeTextProvider;
pub use ocr::OcrTextProvider;

/// Errors specific to PDF text acquisition.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// The document could not be opened or its text layer read.
    #[error("Failed to open PDF: {0}")]
    Open(String),

    /// Rasterizing or recognizing a page failed.
    #[error("OCR error: {0}")]
    Ocr(String),

    /// The requested page does not exist.
    #[error("Page index {index} out of range (document has {count} pages)")]
    PageOutOfRange {
        /// Zero-based page index that was requested.
        index: usize,
        /// Number of pages in the document.
        count: usize,
    },

    /// An HTTP request to download a PDF failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A source of per-page text.
///
/// Implementations must be `Send + Sync` so a provider can be moved into a
/// blocking task.
pub trait PageTextProvider: Send + Sync {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Returns the text of the zero-based page `page_index`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the text cannot be produced.
    fn page_text(&self, page_index: usize) -> Result<String, PdfError>;
}
