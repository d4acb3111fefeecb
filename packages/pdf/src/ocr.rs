//! OCR page text via `pdftoppm` (poppler-utils) and `tesseract`.
//!
//! Each page is rasterized on its own into a scratch directory, then
//! recognized with page segmentation mode 6 (a single uniform block of
//! text), which suits the tabular layout of the disclosure schedules.

use std::path::Path;
use std::process::Command;

use tempfile::NamedTempFile;

use crate::{PageTextProvider, PdfError};

/// Default rasterization resolution.
pub const DEFAULT_DPI: u32 = 300;

/// Tesseract page segmentation mode: assume a single uniform block.
pub const DEFAULT_PSM: u8 = 6;

/// Rasterizes and recognizes single pages of a document.
#[derive(Debug)]
pub struct OcrTextProvider {
    document: NamedTempFile,
    page_count: usize,
    dpi: u32,
    psm: u8,
}

impl OcrTextProvider {
    /// Writes `bytes` to a temporary file so the external tools can read
    /// it page by page.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::Io`] if the temporary file cannot be written.
    pub fn new(bytes: &[u8], page_count: usize) -> Result<Self, PdfError> {
        let document = tempfile::Builder::new()
            .prefix("ethics-extract-")
            .suffix(".pdf")
            .tempfile()?;
        std::fs::write(document.path(), bytes)?;

        Ok(Self {
            document,
            page_count,
            dpi: DEFAULT_DPI,
            psm: DEFAULT_PSM,
        })
    }

    /// Overrides the rasterization resolution.
    #[must_use]
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Returns `true` if both `pdftoppm` and `tesseract` can be launched.
    #[must_use]
    pub fn is_available() -> bool {
        let pdftoppm = Command::new("pdftoppm").arg("-v").output().is_ok();
        let tesseract = Command::new("tesseract").arg("--version").output().is_ok();

        if !pdftoppm {
            log::debug!("pdftoppm not found - install poppler-utils for OCR support");
        }
        if !tesseract {
            log::debug!("tesseract not found - install tesseract-ocr for OCR support");
        }

        pdftoppm && tesseract
    }

    fn rasterize(&self, page: usize, output_prefix: &Path) -> Result<(), PdfError> {
        let page = page.to_string();
        let output = Command::new("pdftoppm")
            .arg("-f")
            .arg(&page)
            .arg("-l")
            .arg(&page)
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-png")
            .arg("-singlefile")
            .arg(self.document.path())
            .arg(output_prefix)
            .output()
            .map_err(|e| {
                PdfError::Ocr(format!(
                    "Failed to run pdftoppm (is poppler-utils installed?): {e}"
                ))
            })?;

        if !output.status.success() {
            return Err(PdfError::Ocr(format!(
                "pdftoppm exited with status {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }

    fn recognize(&self, image: &Path) -> Result<String, PdfError> {
        let output = Command::new("tesseract")
            .arg(image)
            .arg("stdout")
            .arg("--psm")
            .arg(self.psm.to_string())
            .output()
            .map_err(|e| {
                PdfError::Ocr(format!(
                    "Failed to run tesseract (is tesseract-ocr installed?): {e}"
                ))
            })?;

        if !output.status.success() {
            return Err(PdfError::Ocr(format!(
                "tesseract exited with status {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl PageTextProvider for OcrTextProvider {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_text(&self, page_index: usize) -> Result<String, PdfError> {
        if page_index >= self.page_count {
            return Err(PdfError::PageOutOfRange {
                index: page_index,
                count: self.page_count,
            });
        }

        let scratch = tempfile::tempdir()?;
        let prefix = scratch.path().join("page");

        // pdftoppm pages are 1-based
        self.rasterize(page_index + 1, &prefix)?;
        let text = self.recognize(&prefix.with_extension("png"))?;

        log::debug!(
            "OCR page {}: {} characters at {} dpi",
            page_index + 1,
            text.len(),
            self.dpi
        );

        Ok(text)
    }
}
