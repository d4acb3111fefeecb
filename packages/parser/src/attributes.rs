//! Occupation/employer resolution from the lines after an address block.
//!
//! The window starts after the collected address and ends 15 lines past the
//! anchor or at the next contribution line, whichever comes first. Lines
//! that are noise or address-shaped are dropped; the first one or two
//! survivors become occupation and employer.
//!
//! This is a heuristic. On unusual layouts a stray address remnant can end
//! up as the occupation, and a combined single line is always split on its
//! first whitespace run.

use ethics_extract_contribution_models::NO_DATA;

use crate::anchor::find_next_anchor;
use crate::classify::{has_address_signature, is_noise};
use crate::markers::Markers;

/// Lines past the anchor that may hold occupation/employer text.
pub const ATTRIBUTE_WINDOW: usize = 15;

/// Lines past the anchor searched for the next contribution.
pub const NEXT_ANCHOR_LOOKAHEAD: usize = 20;

/// Resolved occupation and employer values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attributes {
    pub occupation: String,
    pub employer: String,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            occupation: NO_DATA.to_owned(),
            employer: NO_DATA.to_owned(),
        }
    }
}

/// Collects the candidate occupation/employer lines for the anchor at
/// `anchor_index` whose address block is `address`.
#[must_use]
pub fn candidate_lines<'a>(
    markers: &Markers,
    lines: &'a [String],
    anchor_index: usize,
    address: &[&str],
) -> Vec<&'a str> {
    let search_start = anchor_index + address.len() + 1;
    let mut search_end = (anchor_index + ATTRIBUTE_WINDOW).min(lines.len());

    if let Some(next) = find_next_anchor(
        markers,
        lines,
        search_start,
        anchor_index + NEXT_ANCHOR_LOOKAHEAD,
    ) {
        search_end = search_end.min(next);
    }

    if search_start >= search_end {
        return Vec::new();
    }

    lines[search_start..search_end]
        .iter()
        .map(String::as_str)
        .filter(|line| !is_noise(markers, line))
        .filter(|line| !address.iter().any(|a| a == line))
        .filter(|line| !(markers.date.is_match(line) && markers.amount.is_match(line)))
        .filter(|line| !has_address_signature(markers, line))
        .collect()
}

/// Resolves occupation and employer for the anchor at `anchor_index`.
#[must_use]
pub fn resolve_attributes(
    markers: &Markers,
    lines: &[String],
    anchor_index: usize,
    address: &[&str],
) -> Attributes {
    let candidates = candidate_lines(markers, lines, anchor_index, address);

    let (occupation, employer) = match candidates.as_slice() {
        [] => (NO_DATA, NO_DATA),
        [single] => single
            .split_once(char::is_whitespace)
            .map_or((*single, NO_DATA), |(occupation, employer)| {
                (occupation, employer.trim_start())
            }),
        [first, second, ..] => (*first, *second),
    };

    Attributes {
        occupation: clean_field(markers, occupation),
        employer: clean_field(markers, employer),
    }
}

/// Strips header fragments and normalizes placeholder values to
/// [`NO_DATA`].
fn clean_field(markers: &Markers, value: &str) -> String {
    let mut cleaned = value.trim().to_owned();
    for marker in markers.header_markers() {
        cleaned = cleaned.replace(marker.as_str(), "").trim().to_owned();
    }

    match cleaned.as_str() {
        "" | "(" | ")" | "()" | NO_DATA => NO_DATA.to_owned(),
        _ => cleaned,
    }
}
