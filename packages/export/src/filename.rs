use chrono::NaiveDateTime;

/// Timestamp layout appended to export filenames.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Returns `<stem>_<YYYYMMDD_HHMMSS>.<ext>`.
#[must_use]
pub fn timestamped_filename(stem: &str, ext: &str, now: NaiveDateTime) -> String {
    format!("{stem}_{}.{ext}", now.format(TIMESTAMP_FORMAT))
}
