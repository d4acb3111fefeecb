#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Document-level Schedule A1 contribution extraction.
//!
//! Ties page text acquisition ([`ethics_extract_pdf`]) to the parsing engine
//! ([`ethics_extract_parser`]): pages are read in ascending order, gated on
//! the schedule marker, scanned, and the combined records deduplicated.
//! Processing is sequential and blocking; callers on an async runtime
//! should run [`extract_document`] on a blocking task.

pub mod progress;

use std::sync::Arc;

use ethics_extract_contribution_models::ContributionRecord;
use ethics_extract_parser::PageScanner;
use ethics_extract_parser::dedup::dedup;
use ethics_extract_pdf::fallback::DEFAULT_MIN_NATIVE_CHARS;
use ethics_extract_pdf::ocr::DEFAULT_DPI;
use ethics_extract_pdf::{
    FallbackTextProvider, NativeTextProvider, OcrTextProvider, PageTextProvider, PdfError,
};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::progress::ProgressCallback;

/// Errors that abort an extraction run.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The document could not be opened.
    #[error(transparent)]
    Pdf(#[from] PdfError),
}

/// Whether pages with little native text are sent through OCR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum OcrMode {
    /// OCR pages whose native text is too short, if the tools are installed.
    #[default]
    Auto,
    /// Never run OCR.
    Disabled,
}

/// Tuning for [`extract_document`].
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub ocr: OcrMode,
    /// Native text at or below this many trimmed characters triggers OCR.
    pub min_native_chars: usize,
    /// Rasterization resolution for OCR.
    pub dpi: u32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            ocr: OcrMode::Auto,
            min_native_chars: DEFAULT_MIN_NATIVE_CHARS,
            dpi: DEFAULT_DPI,
        }
    }
}

/// Outcome of an extraction run.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Deduplicated records in page order.
    pub records: Vec<ContributionRecord>,
    /// Pages in the document.
    pub page_count: usize,
    /// Pages that carried a schedule marker.
    pub schedule_pages: usize,
    /// Records found before deduplication.
    pub raw_record_count: usize,
}

/// Runs the page loop over `provider` and deduplicates the result.
///
/// A page whose text cannot be acquired is logged and treated as empty.
pub fn extract_contributions(
    provider: &dyn PageTextProvider,
    scanner: &PageScanner,
    progress: &Arc<dyn ProgressCallback>,
) -> ExtractionReport {
    let page_count = provider.page_count();
    progress.set_total(page_count as u64);

    let mut raw = Vec::new();
    let mut schedule_pages = 0;

    for page_index in 0..page_count {
        let page_number = u32::try_from(page_index + 1).unwrap_or(u32::MAX);
        progress.set_message(format!("Processing page {page_number} of {page_count}"));

        let text = provider.page_text(page_index).unwrap_or_else(|e| {
            log::warn!("Failed to read page {page_number}: {e}");
            String::new()
        });

        if scanner.markers().is_schedule_page(&text) {
            schedule_pages += 1;
            let records = scanner.scan_page(&text, page_number);
            log::info!(
                "Page {page_number}/{page_count}: {} records (total: {})",
                records.len(),
                raw.len() + records.len()
            );
            raw.extend(records);
        } else {
            log::debug!("Page {page_number}/{page_count}: not a contributions schedule");
        }

        progress.inc(1);
    }

    let raw_record_count = raw.len();
    let records = dedup(raw);

    log::info!(
        "Extraction complete: {} records ({raw_record_count} before dedup) from {schedule_pages} of {page_count} pages",
        records.len()
    );
    progress.finish(format!("Extracted {} records", records.len()));

    ExtractionReport {
        records,
        page_count,
        schedule_pages,
        raw_record_count,
    }
}

/// Builds the native/OCR provider chain for a document.
///
/// # Errors
///
/// Returns [`PdfError::Open`] if the document cannot be opened, or
/// [`PdfError::Io`] if the OCR scratch copy cannot be written.
pub fn build_provider(
    bytes: &[u8],
    options: &ExtractOptions,
) -> Result<FallbackTextProvider, PdfError> {
    let native = NativeTextProvider::from_bytes(bytes)?;
    let page_count = native.page_count();

    let ocr: Option<Box<dyn PageTextProvider>> = match options.ocr {
        OcrMode::Disabled => None,
        OcrMode::Auto if OcrTextProvider::is_available() => Some(Box::new(
            OcrTextProvider::new(bytes, page_count)?.with_dpi(options.dpi),
        )),
        OcrMode::Auto => {
            log::warn!("OCR tools not found; scanned pages will yield no records");
            None
        }
    };

    Ok(FallbackTextProvider::new(Box::new(native), ocr)
        .with_min_native_chars(options.min_native_chars))
}

/// Extracts deduplicated contribution records from PDF bytes.
///
/// # Errors
///
/// Returns [`ExtractError::Pdf`] if the document cannot be opened. No
/// partial results are returned in that case.
pub fn extract_document(
    bytes: &[u8],
    scanner: &PageScanner,
    options: &ExtractOptions,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<ExtractionReport, ExtractError> {
    log::info!(
        "Extracting contributions from {} byte document (ocr: {})",
        bytes.len(),
        options.ocr
    );

    let provider = build_provider(bytes, options)?;
    Ok(extract_contributions(&provider, scanner, progress))
}
