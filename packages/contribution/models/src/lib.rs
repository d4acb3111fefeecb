#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Contribution record types shared across the ethics-extract toolchain.
//!
//! A [`ContributionRecord`] is one row of a Schedule A1 (monetary political
//! contributions) disclosure. Every textual field either holds a parsed
//! value or the [`NO_DATA`] sentinel; the empty string is never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel stored in any field that could not be resolved from the page.
pub const NO_DATA: &str = "No Data";

/// Date format used on the disclosure forms (`MM/DD/YYYY`).
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// A single monetary contribution parsed from a disclosure page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRecord {
    /// Contribution date exactly as printed (`MM/DD/YYYY`).
    pub date: String,
    /// Contributor name with any `(ID#: ...)` suffix removed.
    pub contributor_name: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    /// Amount normalized to carry a leading `$` (e.g. `"$1,250.00"`).
    pub amount: String,
    pub occupation: String,
    pub employer: String,
    /// 1-based page the record was found on. Only used for ordering.
    pub page_number: u32,
}

/// Composite key used to drop duplicate records across a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub date: String,
    pub contributor_name: String,
    pub amount: String,
}

impl ContributionRecord {
    /// Returns the `(date, contributor_name, amount)` deduplication key.
    #[must_use]
    pub fn key(&self) -> RecordKey {
        RecordKey {
            date: self.date.clone(),
            contributor_name: self.contributor_name.clone(),
            amount: self.amount.clone(),
        }
    }

    /// Parses [`Self::date`] into a calendar date.
    ///
    /// Returns `None` for strings that have the right shape but name an
    /// impossible day (e.g. `13/45/2024`).
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    /// Returns the amount in cents, or `None` if it cannot be read.
    #[must_use]
    pub fn amount_cents(&self) -> Option<i64> {
        parse_cents(&self.amount)
    }
}

/// Parses a currency string such as `"$1,234.56"` into cents.
#[must_use]
pub fn parse_cents(amount: &str) -> Option<i64> {
    let digits: String = amount
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    let (whole, fraction) = digits.split_once('.')?;
    if whole.is_empty() || fraction.len() != 2 {
        return None;
    }

    let whole = whole.parse::<i64>().ok()?;
    let fraction = fraction.parse::<i64>().ok()?;

    whole.checked_mul(100)?.checked_add(fraction)
}

/// Returns `value` unless it is empty after trimming, in which case the
/// [`NO_DATA`] sentinel is returned.
#[must_use]
pub fn or_no_data(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        NO_DATA.to_owned()
    } else {
        trimmed.to_owned()
    }
}
