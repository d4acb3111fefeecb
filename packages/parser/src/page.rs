//! Page-level scanning.
//!
//! Walks a page's immutable line array with an explicit cursor. Each call to
//! [`scan_record`] is a pure function from `(lines, index)` to the record it
//! found and the index to resume from.

use ethics_extract_contribution_models::ContributionRecord;

use crate::address::{collect_address, parse_address};
use crate::anchor::{find_next_anchor, match_anchor_at};
use crate::attributes::resolve_attributes;
use crate::markers::Markers;

/// Lines past the anchor searched for the next contribution when
/// advancing the cursor.
pub const CURSOR_LOOKAHEAD: usize = 10;

/// Splits page text into trimmed, non-empty lines.
#[must_use]
pub fn page_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parses the record anchored at `index`, if any.
///
/// Returns the record and the index to resume scanning from. Returns `None`
/// when `lines[index]` is not an anchor; the caller then advances by one.
#[must_use]
pub fn scan_record(
    markers: &Markers,
    lines: &[String],
    index: usize,
    page_number: u32,
) -> Option<(ContributionRecord, usize)> {
    let anchor = match_anchor_at(markers, lines, index)?;

    let address_lines = collect_address(markers, lines, index);
    let address = parse_address(markers, &address_lines);
    let attributes = resolve_attributes(markers, lines, index, &address_lines);

    let record = ContributionRecord {
        date: anchor.date,
        contributor_name: anchor.name,
        city: address.city,
        state: address.state,
        zip_code: address.zip_code,
        amount: anchor.amount,
        occupation: attributes.occupation,
        employer: attributes.employer,
        page_number,
    };

    let mut next = index + (address_lines.len() + 1).max(1);
    if let Some(found) = find_next_anchor(markers, lines, next, index + CURSOR_LOOKAHEAD) {
        next = found;
    }

    Some((record, next))
}

/// Scans every line of a page, emitting one record per anchor.
#[must_use]
pub fn scan_lines(markers: &Markers, lines: &[String], page_number: u32) -> Vec<ContributionRecord> {
    let mut records = Vec::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        if let Some((record, next)) = scan_record(markers, lines, cursor, page_number) {
            records.push(record);
            cursor = next;
        } else {
            cursor += 1;
        }
    }

    records
}

/// Scans a page's raw text.
///
/// Pages without a schedule marker produce no records, regardless of any
/// anchor-shaped lines they contain.
#[must_use]
pub fn scan_page(markers: &Markers, text: &str, page_number: u32) -> Vec<ContributionRecord> {
    if !markers.is_schedule_page(text) {
        log::trace!("Page {page_number}: no schedule marker, skipping");
        return Vec::new();
    }

    let lines = page_lines(text);
    let records = scan_lines(markers, &lines, page_number);

    log::debug!(
        "Page {page_number}: {} lines, {} records",
        lines.len(),
        records.len()
    );

    records
}

/// Owns a compiled [`Markers`] set and scans pages with it.
#[derive(Debug, Clone, Default)]
pub struct PageScanner {
    markers: Markers,
}

impl PageScanner {
    #[must_use]
    pub const fn new(markers: Markers) -> Self {
        Self { markers }
    }

    #[must_use]
    pub const fn markers(&self) -> &Markers {
        &self.markers
    }

    /// See [`scan_page`].
    #[must_use]
    pub fn scan_page(&self, text: &str, page_number: u32) -> Vec<ContributionRecord> {
        scan_page(&self.markers, text, page_number)
    }
}

#[cfg(test)]
mod tests {
    use ethics_extract_contribution_models::NO_DATA;

    use super::*;

    const HEADER: &str = "SCHEDULE A1: MONETARY POLITICAL CONTRIBUTIONS";

    fn page(body: &[&str]) -> String {
        let mut text = vec![HEADER];
        text.extend_from_slice(body);
        text.join("\n")
    }

    #[test]
    fn splits_and_trims_lines() {
        assert_eq!(
            page_lines("  a \n\n   \r\n b\n"),
            vec!["a".to_owned(), "b".to_owned()]
        );
    }

    #[test]
    fn full_record_with_address_and_attributes() {
        let text = page(&[
            "01/15/2024 John Smith $500.00",
            "123 Main St",
            "Houston, TX 77002",
            "Attorney SelfEmployed",
        ]);
        let records = scan_page(&Markers::default(), &text, 3);

        assert_eq!(
            records,
            vec![ContributionRecord {
                date: "01/15/2024".to_owned(),
                contributor_name: "John Smith".to_owned(),
                city: "Houston".to_owned(),
                state: "TX".to_owned(),
                zip_code: "77002".to_owned(),
                amount: "$500.00".to_owned(),
                occupation: "Attorney".to_owned(),
                employer: "SelfEmployed".to_owned(),
                page_number: 3,
            }]
        );
    }

    #[test]
    fn single_word_attribute_without_address() {
        let text = page(&["01/15/2024 John Smith $500.00", "Engineer"]);
        let records = scan_page(&Markers::default(), &text, 1);

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.occupation, "Engineer");
        assert_eq!(r.employer, NO_DATA);
        assert_eq!(r.city, NO_DATA);
        assert_eq!(r.state, NO_DATA);
        assert_eq!(r.zip_code, NO_DATA);
    }

    #[test]
    fn two_attribute_lines() {
        let text = page(&["01/15/2024 John Smith $500.00", "Teacher", "ISD Austin"]);
        let records = scan_page(&Markers::default(), &text, 1);

        assert_eq!(records[0].occupation, "Teacher");
        assert_eq!(records[0].employer, "ISD Austin");
    }

    #[test]
    fn consecutive_records_each_get_their_own_attributes() {
        let text = page(&[
            "01/15/2024 John Smith $500.00",
            "Austin, TX 78701",
            "Lawyer",
            "02/01/2024 Jane Doe (ID#: 42) 25.00",
            "Dallas, TX 75201",
            "Nurse Baylor",
        ]);
        let records = scan_page(&Markers::default(), &text, 1);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].occupation, "Lawyer");
        assert_eq!(records[0].employer, NO_DATA);
        assert_eq!(records[1].contributor_name, "Jane Doe");
        assert_eq!(records[1].amount, "$25.00");
        assert_eq!(records[1].city, "Dallas");
        assert_eq!(records[1].occupation, "Nurse");
        assert_eq!(records[1].employer, "Baylor");
    }

    #[test]
    fn cursor_jumps_to_next_anchor() {
        let m = Markers::default();
        let lines = page_lines(
            "01/15/2024 John Smith $500.00\nRetired\nNone\n02/01/2024 Jane Doe $25.00",
        );
        let (_, next) = scan_record(&m, &lines, 0, 1).unwrap();
        assert_eq!(next, 3);
    }

    #[test]
    fn cursor_skips_address_when_no_anchor_follows() {
        let m = Markers::default();
        let lines = page_lines("01/15/2024 John Smith $500.00\n123 Main St\nAustin, TX 78701\nRetired");
        let (_, next) = scan_record(&m, &lines, 0, 1).unwrap();
        assert_eq!(next, 3);
    }

    #[test]
    fn page_without_marker_yields_nothing() {
        let text = "SCHEDULE F: EXPENDITURES\n01/15/2024 John Smith $500.00\nEngineer";
        assert!(scan_page(&Markers::default(), text, 1).is_empty());
    }

    #[test]
    fn schedule_a1_marker_also_gates() {
        let text = "Schedule A1\n01/15/2024 John Smith $500.00";
        assert_eq!(scan_page(&Markers::default(), text, 1).len(), 1);
    }

    #[test]
    fn scanner_wraps_markers() {
        let scanner = PageScanner::default();
        let text = page(&["01/15/2024 John Smith $500.00"]);
        assert_eq!(scanner.scan_page(&text, 2)[0].page_number, 2);
    }
}
