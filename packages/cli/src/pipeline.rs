//! Extraction run shared by the subcommands and the interactive flow.
//!
//! Loads the document (downloading it when given a URL), runs the blocking
//! extractor on a `spawn_blocking` task with a page progress bar, and
//! renders the preview table and summary.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ethics_extract::progress::ProgressCallback;
use ethics_extract::{ExtractOptions, ExtractionReport, extract_document};
use ethics_extract_cli_utils::{IndicatifProgress, MultiProgress};
use ethics_extract_contribution_models::ContributionRecord;
use ethics_extract_export::{COLUMNS, ExportFormat, Summary, export_row, sort_for_export};
use ethics_extract_parser::{ConfigError, Markers, PageScanner};
use ethics_extract_pdf::download::{is_url, load_document};

/// Widest a preview cell may grow before it is truncated.
const PREVIEW_CELL_WIDTH: usize = 24;

/// What to extract and how.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Local path or `http(s)` URL.
    pub input: String,
    /// Custom marker configuration. The embedded Texas Ethics
    /// Commission set is used when `None`.
    pub markers: Option<PathBuf>,
    pub extract: ExtractOptions,
}

/// Where and how to write results.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub out_dir: PathBuf,
    pub stem: String,
    pub formats: Vec<ExportFormat>,
    /// Rows shown before writing. Zero disables the preview.
    pub preview: usize,
}

/// Builds the page scanner from a marker file, or the embedded default.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or its patterns do
/// not compile.
pub fn load_scanner(markers: Option<&Path>) -> Result<PageScanner, ConfigError> {
    let Some(path) = markers else {
        return Ok(PageScanner::default());
    };

    log::info!("Loading marker config from {}", path.display());
    Ok(PageScanner::new(Markers::from_path(path)?))
}

/// Loads the input and extracts its contributions.
///
/// # Errors
///
/// Returns an error if the marker config is invalid, the input cannot be
/// read or downloaded, or the document cannot be opened.
pub async fn extract(
    multi: &MultiProgress,
    options: &RunOptions,
) -> Result<ExtractionReport, Box<dyn std::error::Error>> {
    let scanner = load_scanner(options.markers.as_deref())?;

    let bytes = if is_url(&options.input) {
        let spinner = IndicatifProgress::spinner(multi, &format!("Downloading {}", options.input));
        let bytes = load_document(&options.input).await?;
        spinner.finish(format!("Downloaded {} bytes", bytes.len()));
        bytes
    } else {
        load_document(&options.input).await?
    };

    let progress = IndicatifProgress::pages_bar(multi, "Opening document...");
    let extract_options = options.extract.clone();
    let start = Instant::now();

    let report = tokio::task::spawn_blocking(move || {
        extract_document(&bytes, &scanner, &extract_options, &progress)
    })
    .await??;

    log::info!(
        "Extracted {} records from {} pages in {:.1}s",
        report.records.len(),
        report.page_count,
        start.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Runs an extraction and writes the requested export files.
///
/// # Errors
///
/// See [`extract`]. Also returns an error if an export file cannot be
/// written.
pub async fn run(
    multi: &MultiProgress,
    options: &RunOptions,
    output: &OutputOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = extract(multi, options).await?;

    if report.records.is_empty() {
        println!(
            "No contributions found in {} ({} of {} pages were Schedule A1).",
            options.input, report.schedule_pages, report.page_count
        );
        return Ok(());
    }

    let sorted = sort_for_export(report.records);

    if output.preview > 0 {
        println!();
        println!("{}", preview_table(&sorted, output.preview));
    }

    println!();
    println!("{}", Summary::from_records(&sorted));
    println!();

    let now = chrono::Local::now().naive_local();
    let written = ethics_extract_export::export(
        &sorted,
        &output.out_dir,
        &output.stem,
        &output.formats,
        now,
    )?;

    for path in written {
        println!("Saved {}", path.display());
    }

    Ok(())
}

/// Runs an extraction and prints only the summary metrics.
///
/// # Errors
///
/// See [`extract`].
pub async fn summarize(
    multi: &MultiProgress,
    options: &RunOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = extract(multi, options).await?;

    println!();
    println!("{}", Summary::from_records(&report.records));
    println!(
        "Pages:         {} ({} Schedule A1)",
        report.page_count, report.schedule_pages
    );
    println!(
        "Duplicates:    {}",
        report.raw_record_count - report.records.len()
    );

    Ok(())
}

/// Renders the first `limit` records as a fixed-width text table.
#[must_use]
pub fn preview_table(records: &[ContributionRecord], limit: usize) -> String {
    let rows: Vec<[String; 8]> = records
        .iter()
        .take(limit)
        .map(|r| export_row(r).map(truncate))
        .collect();

    let mut widths = COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_row(&mut out, &COLUMNS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(&mut out, &rule, &widths);
    for row in &rows {
        write_row(&mut out, row, &widths);
    }

    if records.len() > limit {
        let _ = write!(out, "... {} more", records.len() - limit);
    }

    out.trim_end().to_owned()
}

fn write_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize; 8]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= PREVIEW_CELL_WIDTH {
        return value.to_owned();
    }
    let mut cut: String = value.chars().take(PREVIEW_CELL_WIDTH - 3).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use ethics_extract_contribution_models::NO_DATA;

    use super::*;

    fn record(name: &str) -> ContributionRecord {
        ContributionRecord {
            date: "01/15/2024".to_owned(),
            contributor_name: name.to_owned(),
            city: "Houston".to_owned(),
            state: "TX".to_owned(),
            zip_code: "77002".to_owned(),
            amount: "$500.00".to_owned(),
            occupation: "Attorney".to_owned(),
            employer: NO_DATA.to_owned(),
            page_number: 1,
        }
    }

    #[test]
    fn preview_limits_rows() {
        let records = vec![record("A"), record("B"), record("C")];
        let table = preview_table(&records, 2);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Date"));
        assert!(lines[1].starts_with("----------"));
        assert!(lines[2].contains("A"));
        assert_eq!(lines[4], "... 1 more");
    }

    #[test]
    fn preview_truncates_long_cells() {
        let table = preview_table(&[record("Bartholomew Fitzgerald Worthington III")], 10);
        assert!(table.contains("Bartholomew Fitzgeral..."));
        assert!(!table.contains("Worthington"));
    }

    #[test]
    fn default_scanner_without_marker_file() {
        let scanner = load_scanner(None).unwrap();
        assert!(scanner.markers().is_schedule_page("Schedule A1"));
    }

    #[test]
    fn missing_marker_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_scanner(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
