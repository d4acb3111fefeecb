//! PDF download and input loading utilities.
//!
//! Reports are usually saved locally, but the Ethics Commission also serves
//! them over HTTP; [`load_document`] accepts either a path or a URL.

use std::path::Path;

/// Returns `true` if `input` should be fetched over HTTP.
///
/// # Example
///
/// ```
/// use ethics_extract_pdf::download::is_url;
///
/// assert!(is_url("https://www.ethics.state.tx.us/reports/123.pdf"));
/// assert!(!is_url("reports/123.pdf"));
/// ```
#[must_use]
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Downloads a PDF and returns its bytes.
///
/// # Errors
///
/// Returns [`PdfError::Http`](crate::PdfError::Http) if the request fails
/// or the server responds with an error status.
pub async fn fetch_document(url: &str) -> Result<Vec<u8>, crate::PdfError> {
    let client = reqwest::Client::builder().build()?;
    let response = client.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;

    log::debug!("Downloaded {} bytes from {url}", bytes.len());

    Ok(bytes.to_vec())
}

/// Reads a PDF from a local path or downloads it from a URL.
///
/// # Errors
///
/// Returns [`PdfError::Io`](crate::PdfError::Io) if the file cannot be
/// read, or [`PdfError::Http`](crate::PdfError::Http) if the download
/// fails.
pub async fn load_document(input: &str) -> Result<Vec<u8>, crate::PdfError> {
    if is_url(input) {
        return fetch_document(input).await;
    }

    let bytes = std::fs::read(Path::new(input))?;
    log::debug!("Read {} bytes from {input}", bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_urls() {
        assert!(is_url("http://example.com/report.pdf"));
        assert!(is_url("https://example.com/report.pdf"));
        assert!(!is_url("/tmp/report.pdf"));
        assert!(!is_url("httpfile.pdf"));
    }
}
