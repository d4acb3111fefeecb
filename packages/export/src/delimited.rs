//! CSV output.

use std::io::Write;
use std::path::Path;

use ethics_extract_contribution_models::ContributionRecord;

use crate::{COLUMNS, ExportError, export_row};

/// Writes a header row followed by one row per record.
///
/// Records are written in the order given; callers sort first.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if a row cannot be serialized or
/// [`ExportError::Io`] if flushing the writer fails.
pub fn write_csv<W: Write>(records: &[ContributionRecord], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(COLUMNS)?;
    for record in records {
        csv_writer.write_record(export_row(record))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Creates `path` and writes `records` to it as CSV.
///
/// # Errors
///
/// See [`write_csv`]. Also returns [`ExportError::Io`] if the file cannot
/// be created.
pub fn write_csv_file(records: &[ContributionRecord], path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_csv(records, std::io::BufWriter::new(file))
}
