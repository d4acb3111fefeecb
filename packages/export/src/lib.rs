#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Export of extracted contribution records.
//!
//! Records are sorted by `(date, page)` with unparseable dates last, the
//! internal page column is dropped, and the result is written as CSV
//! and/or a single-sheet XLSX workbook under timestamped filenames.

pub mod delimited;
pub mod filename;
pub mod sort;
pub mod summary;
pub mod workbook;

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use ethics_extract_contribution_models::ContributionRecord;
use strum_macros::{AsRefStr, Display, EnumString};

pub use filename::timestamped_filename;
pub use sort::sort_for_export;
pub use summary::Summary;

/// Filename stem used when the caller has no better name.
pub const DEFAULT_STEM: &str = "Schedule_A1_Data";

/// Exported column headers, in order.
pub const COLUMNS: [&str; 8] = [
    "Date",
    "Contributor Name",
    "City",
    "State",
    "Zip",
    "Amount",
    "Occupation",
    "Employer",
];

/// Errors that can occur while writing export files.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Supported output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub const ALL: &[Self] = &[Self::Csv, Self::Xlsx];

    /// File extension without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

/// Projects a record onto [`COLUMNS`].
///
/// A date that is not a real calendar day is exported as an empty cell;
/// the rest of the row is kept.
#[must_use]
pub fn export_row(record: &ContributionRecord) -> [&str; 8] {
    let date = if record.parsed_date().is_some() {
        record.date.as_str()
    } else {
        ""
    };

    [
        date,
        &record.contributor_name,
        &record.city,
        &record.state,
        &record.zip_code,
        &record.amount,
        &record.occupation,
        &record.employer,
    ]
}

/// Sorts `records` and writes one file per requested format into
/// `out_dir`, named `<stem>_<YYYYMMDD_HHMMSS>.<ext>`.
///
/// Returns the paths written, in the order of `formats`.
///
/// # Errors
///
/// Returns [`ExportError`] if the output directory cannot be created or any
/// file cannot be written.
pub fn export(
    records: &[ContributionRecord],
    out_dir: &Path,
    stem: &str,
    formats: &[ExportFormat],
    now: NaiveDateTime,
) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(out_dir)?;

    let sorted = sort_for_export(records.to_vec());
    let mut written = Vec::with_capacity(formats.len());

    for format in formats {
        let path = out_dir.join(timestamped_filename(stem, format.extension(), now));

        match format {
            ExportFormat::Csv => delimited::write_csv_file(&sorted, &path)?,
            ExportFormat::Xlsx => workbook::write_xlsx(&sorted, &path)?,
        }

        log::info!("Wrote {} records to {}", sorted.len(), path.display());
        written.push(path);
    }

    Ok(written)
}
