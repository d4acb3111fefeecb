//! Native text-layer extraction via [`pdf_extract`].

use crate::{PageTextProvider, PdfError};

/// Serves page text read from the document's embedded text layer.
///
/// The whole document is extracted up front. Only a document that cannot be
/// parsed at all is an error; if it opens but its text layer cannot be
/// decoded (unsupported fonts or encodings), every page is served as empty
/// text so the OCR fallback takes over.
#[derive(Debug, Clone)]
pub struct NativeTextProvider {
    pages: Vec<String>,
}

impl NativeTextProvider {
    /// Extracts the text of every page in `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::Open`] if the document cannot be parsed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PdfError> {
        let document = lopdf::Document::load_mem(bytes)
            .map_err(|e| PdfError::Open(format!("failed to parse PDF: {e}")))?;
        let page_count = document.get_pages().len();

        let pages = pages_or_blank(
            page_count,
            pdf_extract::extract_text_from_mem_by_pages(bytes),
        );

        log::debug!(
            "Extracted native text for {} pages ({} bytes)",
            pages.len(),
            bytes.len()
        );

        Ok(Self { pages })
    }

    /// Wraps text that was already split into pages.
    #[must_use]
    pub const fn from_pages(pages: Vec<String>) -> Self {
        Self { pages }
    }
}

/// Falls back to `page_count` empty pages when text extraction failed.
fn pages_or_blank<E: std::fmt::Display>(
    page_count: usize,
    extracted: Result<Vec<String>, E>,
) -> Vec<String> {
    extracted.unwrap_or_else(|e| {
        log::warn!("Native text extraction failed for all {page_count} pages: {e}");
        vec![String::new(); page_count]
    })
}

impl PageTextProvider for NativeTextProvider {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page_index: usize) -> Result<String, PdfError> {
        self.pages
            .get(page_index)
            .cloned()
            .ok_or(PdfError::PageOutOfRange {
                index: page_index,
                count: self.pages.len(),
            })
    }
}
