//! Native-then-OCR provider chain.

use crate::{PageTextProvider, PdfError};

/// Native text at or below this many trimmed characters triggers OCR.
pub const DEFAULT_MIN_NATIVE_CHARS: usize = 50;

/// Tries a primary provider first and falls back to a secondary one when
/// the primary text is too short.
///
/// Each strategy is attempted at most once per page. Failures are logged
/// and absorbed: a page that cannot be read by either strategy yields an
/// empty string so the run can continue.
pub struct FallbackTextProvider {
    primary: Box<dyn PageTextProvider>,
    fallback: Option<Box<dyn PageTextProvider>>,
    min_native_chars: usize,
}

impl FallbackTextProvider {
    #[must_use]
    pub fn new(
        primary: Box<dyn PageTextProvider>,
        fallback: Option<Box<dyn PageTextProvider>>,
    ) -> Self {
        Self {
            primary,
            fallback,
            min_native_chars: DEFAULT_MIN_NATIVE_CHARS,
        }
    }

    /// Overrides the native text length threshold.
    #[must_use]
    pub fn with_min_native_chars(mut self, min_native_chars: usize) -> Self {
        self.min_native_chars = min_native_chars;
        self
    }

    fn is_substantial(&self, text: &str) -> bool {
        text.trim().chars().count() > self.min_native_chars
    }
}

impl std::fmt::Debug for FallbackTextProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackTextProvider")
            .field("page_count", &self.primary.page_count())
            .field("has_fallback", &self.fallback.is_some())
            .field("min_native_chars", &self.min_native_chars)
            .finish()
    }
}

impl PageTextProvider for FallbackTextProvider {
    fn page_count(&self) -> usize {
        self.primary.page_count()
    }

    fn page_text(&self, page_index: usize) -> Result<String, PdfError> {
        let page_number = page_index + 1;

        let native = self.primary.page_text(page_index).unwrap_or_else(|e| {
            log::warn!("Native text extraction failed for page {page_number}: {e}");
            String::new()
        });

        if self.is_substantial(&native) {
            return Ok(native);
        }

        let Some(fallback) = &self.fallback else {
            return Ok(native);
        };

        log::info!(
            "Page {page_number}: native text has {} characters, falling back to OCR",
            native.trim().chars().count()
        );

        match fallback.page_text(page_index) {
            Ok(text) => Ok(text),
            Err(e) => {
                log::warn!("OCR failed for page {page_number}: {e}");
                Ok(String::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct FixedText {
        text: Option<String>,
        calls: Arc<AtomicUsize>,
    }

    impl FixedText {
        fn boxed(text: Option<&str>, calls: &Arc<AtomicUsize>) -> Box<dyn PageTextProvider> {
            Box::new(Self {
                text: text.map(str::to_owned),
                calls: Arc::clone(calls),
            })
        }
    }

    impl PageTextProvider for FixedText {
        fn page_count(&self) -> usize {
            1
        }

        fn page_text(&self, _page_index: usize) -> Result<String, PdfError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.text
                .clone()
                .ok_or_else(|| PdfError::Ocr("tesseract missing".to_owned()))
        }
    }

    fn long_text() -> String {
        "SCHEDULE A1 ".repeat(10)
    }

    #[test]
    fn keeps_substantial_native_text() {
        let ocr_calls = Arc::new(AtomicUsize::new(0));
        let provider = FallbackTextProvider::new(
            FixedText::boxed(Some(&long_text()), &Arc::new(AtomicUsize::new(0))),
            Some(FixedText::boxed(Some("ocr"), &ocr_calls)),
        );

        assert_eq!(provider.page_text(0).unwrap(), long_text());
        assert_eq!(ocr_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn short_native_text_uses_ocr_once() {
        let ocr_calls = Arc::new(AtomicUsize::new(0));
        let provider = FallbackTextProvider::new(
            FixedText::boxed(Some("  short  "), &Arc::new(AtomicUsize::new(0))),
            Some(FixedText::boxed(Some("ocr text"), &ocr_calls)),
        );

        assert_eq!(provider.page_text(0).unwrap(), "ocr text");
        assert_eq!(ocr_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn exactly_threshold_is_not_substantial() {
        let provider = FallbackTextProvider::new(
            FixedText::boxed(Some(&"x".repeat(50)), &Arc::new(AtomicUsize::new(0))),
            Some(FixedText::boxed(Some("ocr"), &Arc::new(AtomicUsize::new(0)))),
        );
        assert_eq!(provider.page_text(0).unwrap(), "ocr");
    }

    #[test]
    fn ocr_failure_becomes_empty_text() {
        let provider = FallbackTextProvider::new(
            FixedText::boxed(Some(""), &Arc::new(AtomicUsize::new(0))),
            Some(FixedText::boxed(None, &Arc::new(AtomicUsize::new(0)))),
        );
        assert_eq!(provider.page_text(0).unwrap(), "");
    }

    #[test]
    fn native_failure_still_tries_ocr() {
        let provider = FallbackTextProvider::new(
            FixedText::boxed(None, &Arc::new(AtomicUsize::new(0))),
            Some(FixedText::boxed(Some("ocr"), &Arc::new(AtomicUsize::new(0)))),
        );
        assert_eq!(provider.page_text(0).unwrap(), "ocr");
    }

    #[test]
    fn without_fallback_returns_short_native_text() {
        let provider = FallbackTextProvider::new(
            FixedText::boxed(Some("tiny"), &Arc::new(AtomicUsize::new(0))),
            None,
        )
        .with_min_native_chars(100);
        assert_eq!(provider.page_text(0).unwrap(), "tiny");
        assert_eq!(provider.page_count(), 1);
    }
}
