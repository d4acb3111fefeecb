//! Document-wide duplicate removal.

use std::collections::BTreeSet;

use ethics_extract_contribution_models::ContributionRecord;

/// Keeps the first record for each `(date, contributor_name, amount)` key,
/// preserving first-seen order.
///
/// Input must be page-ascending for "first occurrence wins" to be
/// deterministic.
#[must_use]
pub fn dedup(records: Vec<ContributionRecord>) -> Vec<ContributionRecord> {
    let before = records.len();
    let mut seen = BTreeSet::new();

    let unique: Vec<ContributionRecord> = records
        .into_iter()
        .filter(|record| seen.insert(record.key()))
        .collect();

    if unique.len() < before {
        log::debug!("Dropped {} duplicate records", before - unique.len());
    }

    unique
}
