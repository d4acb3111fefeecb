//! Contribution anchor matching.
//!
//! An anchor is a line carrying a date, the contributor name and an amount,
//! e.g. `01/15/2024 John Smith (ID#: 00123) $500.00`. The currency symbol
//! is optional because OCR frequently drops it.

use ethics_extract_contribution_models::or_no_data;

use crate::markers::Markers;

/// The three fields captured from an anchor line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Date as printed (`MM/DD/YYYY`).
    pub date: String,
    /// Contributor name with ID suffixes stripped.
    pub name: String,
    /// Amount with a guaranteed leading `$`.
    pub amount: String,
}

/// Attempts to match an anchor on `line`.
#[must_use]
pub fn match_anchor(markers: &Markers, line: &str) -> Option<Anchor> {
    let caps = markers.anchor.captures(line)?;

    let date = caps.get(1)?.as_str();
    let raw_name = caps.get(2)?.as_str();
    let raw_amount = caps.get(3)?.as_str();

    let name = markers.id_suffix.replace_all(raw_name, "");

    Some(Anchor {
        date: date.to_owned(),
        name: or_no_data(&name),
        amount: format!("${raw_amount}"),
    })
}

/// Attempts to match an anchor at `lines[index]`.
#[must_use]
pub fn match_anchor_at(markers: &Markers, lines: &[String], index: usize) -> Option<Anchor> {
    lines.get(index).and_then(|line| match_anchor(markers, line))
}

/// Returns `true` if `line` has the date-then-amount shape of a
/// contribution line. Looser than [`match_anchor`].
#[must_use]
pub fn looks_like_anchor(markers: &Markers, line: &str) -> bool {
    markers.next_anchor.is_match(line)
}

/// Returns the index of the first anchor-shaped line in
/// `lines[start..end]`, with `end` clamped to the slice length.
#[must_use]
pub fn find_next_anchor(
    markers: &Markers,
    lines: &[String],
    start: usize,
    end: usize,
) -> Option<usize> {
    let end = end.min(lines.len());
    (start..end).find(|&i| looks_like_anchor(markers, &lines[i]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn matches_basic_anchor() {
        let m = Markers::default();
        let anchor = match_anchor(&m, "01/15/2024 John Smith $500.00").unwrap();
        assert_eq!(
            anchor,
            Anchor {
                date: "01/15/2024".to_owned(),
                name: "John Smith".to_owned(),
                amount: "$500.00".to_owned(),
            }
        );
    }

    #[test]
    fn tolerates_missing_currency_symbol() {
        let m = Markers::default();
        let anchor = match_anchor(&m, "03/02/2024 Jane Q. Public 1,250.00").unwrap();
        assert_eq!(anchor.name, "Jane Q. Public");
        assert_eq!(anchor.amount, "$1,250.00");
    }

    #[test]
    fn strips_id_suffix() {
        let m = Markers::default();
        let anchor =
            match_anchor(&m, "12/01/2023 Acme PAC (ID#: 00012345) $2,000.00").unwrap();
        assert_eq!(anchor.name, "Acme PAC");
    }

    #[test]
    fn name_is_non_greedy() {
        let m = Markers::default();
        let anchor = match_anchor(&m, "01/15/2024 Bob 10.00 extra 20.00").unwrap();
        assert_eq!(anchor.name, "Bob");
        assert_eq!(anchor.amount, "$10.00");
    }

    #[test]
    fn amount_must_start_with_a_digit() {
        let m = Markers::default();
        assert!(match_anchor(&m, "01/15/2024 John Smith ,500.00").is_none());

        let anchor = match_anchor(&m, "01/15/2024 John Smith $1,500.00").unwrap();
        assert_eq!(anchor.amount, "$1,500.00");
    }

    #[test]
    fn id_only_name_becomes_sentinel() {
        let m = Markers::default();
        let anchor = match_anchor(&m, "01/15/2024 (ID#: 99) $5.00").unwrap();
        assert_eq!(anchor.name, "No Data");
    }

    #[test]
    fn rejects_lines_without_amount() {
        let m = Markers::default();
        assert!(match_anchor(&m, "01/15/2024 John Smith").is_none());
        assert!(match_anchor(&m, "Attorney SelfEmployed").is_none());
    }

    #[test]
    fn finds_next_anchor_within_bounds() {
        let m = Markers::default();
        let page = lines(&[
            "01/15/2024 John Smith $500.00",
            "Attorney",
            "02/01/2024 Jane Doe $25.00",
        ]);
        assert_eq!(find_next_anchor(&m, &page, 1, 10), Some(2));
        assert_eq!(find_next_anchor(&m, &page, 1, 2), None);
        assert!(match_anchor_at(&m, &page, 3).is_none());
    }
}
