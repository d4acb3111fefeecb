//! Summary metrics shown after an extraction.

use chrono::NaiveDate;
use ethics_extract_contribution_models::{ContributionRecord, DATE_FORMAT};

/// Placeholder shown when no record carries a parseable date.
pub const NOT_AVAILABLE: &str = "N/A";

/// Record count, total amount and date range of a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub record_count: usize,
    /// Sum of every readable amount, in cents. Wider than a single
    /// amount so garbled OCR digits cannot overflow it.
    pub total_cents: i128,
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
}

impl Summary {
    #[must_use]
    pub fn from_records(records: &[ContributionRecord]) -> Self {
        let mut summary = Self {
            record_count: records.len(),
            ..Self::default()
        };

        for record in records {
            match record.amount_cents() {
                Some(cents) => summary.total_cents += i128::from(cents),
                None => log::debug!("Unreadable amount '{}' left out of total", record.amount),
            }

            if let Some(date) = record.parsed_date() {
                summary.earliest = Some(summary.earliest.map_or(date, |d| d.min(date)));
                summary.latest = Some(summary.latest.map_or(date, |d| d.max(date)));
            }
        }

        summary
    }

    /// Total formatted as currency, e.g. `$1,234.56`.
    #[must_use]
    pub fn total_amount(&self) -> String {
        format_currency(self.total_cents)
    }

    /// `MM/DD/YYYY to MM/DD/YYYY`, or [`NOT_AVAILABLE`].
    #[must_use]
    pub fn date_range(&self) -> String {
        match (self.earliest, self.latest) {
            (Some(start), Some(end)) => format!(
                "{} to {}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            ),
            _ => NOT_AVAILABLE.to_owned(),
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total Records: {}", self.record_count)?;
        writeln!(f, "Total Amount:  {}", self.total_amount())?;
        write!(f, "Date Range:    {}", self.date_range())
    }
}

/// Formats cents as dollars with thousands separators.
#[must_use]
pub fn format_currency(cents: i128) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{:02}", cents % 100)
}
