//! Export ordering.

use chrono::NaiveDate;
use ethics_extract_contribution_models::ContributionRecord;

/// Sorts records by `(date, page_number)` for export.
///
/// Dates that do not parse as a calendar day sort after every valid date
/// but are kept. The sort is stable, so records tied on both keys keep
/// their extraction order.
#[must_use]
pub fn sort_for_export(mut records: Vec<ContributionRecord>) -> Vec<ContributionRecord> {
    records.sort_by_cached_key(sort_key);
    records
}

fn sort_key(record: &ContributionRecord) -> (bool, Option<NaiveDate>, u32) {
    let date = record.parsed_date();
    if date.is_none() {
        log::debug!(
            "Unparseable date '{}' for {}; sorting last",
            record.date,
            record.contributor_name
        );
    }
    (date.is_none(), date, record.page_number)
}
