//! Multi-line mailing address collection and parsing.

use ethics_extract_contribution_models::{NO_DATA, or_no_data};

use crate::classify::is_address_fragment;
use crate::markers::Markers;

/// Maximum number of lines examined after an anchor.
pub const MAX_ADDRESS_LINES: usize = 5;

/// City, state and zip derived from an address block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl Default for ParsedAddress {
    fn default() -> Self {
        Self {
            city: NO_DATA.to_owned(),
            state: NO_DATA.to_owned(),
            zip_code: NO_DATA.to_owned(),
        }
    }
}

/// Greedily collects the address block following the anchor at
/// `anchor_index`.
///
/// Collection stops at the first line that is not an address fragment.
/// If that line comes before any fragment, nothing is collected and the
/// line is left for attribute resolution.
#[must_use]
pub fn collect_address<'a>(
    markers: &Markers,
    lines: &'a [String],
    anchor_index: usize,
) -> Vec<&'a str> {
    let mut block = Vec::new();

    for line in lines.iter().skip(anchor_index + 1).take(MAX_ADDRESS_LINES) {
        if line.trim().is_empty() {
            if block.is_empty() {
                continue;
            }
            break;
        }

        if !is_address_fragment(markers, line) {
            break;
        }

        block.push(line.as_str());
    }

    block
}

/// Derives city/state/zip from a collected address block.
///
/// Tries the combined "City, ST 12345" pattern first, then falls back to
/// splitting on commas. Unresolved fields stay [`NO_DATA`].
#[must_use]
pub fn parse_address(markers: &Markers, block: &[&str]) -> ParsedAddress {
    let mut parsed = ParsedAddress::default();
    if block.is_empty() {
        return parsed;
    }

    let address = block.join(" ");

    if let Some(caps) = markers.city_state_zip.captures(&address) {
        let group = |i| caps.get(i).map_or("", |m| m.as_str());
        if let Some(city) = caps.get(1) {
            let start = city.start().max(line_start(block, city.end()));
            let clamped = address[start..city.end()].trim();
            // A city alone on its line ends at the join separator, so the
            // clamp lands past it; keep the whole match then.
            parsed.city = or_no_data(if clamped.is_empty() {
                city.as_str()
            } else {
                clamped
            });
        }
        parsed.state = or_no_data(group(2));
        parsed.zip_code = or_no_data(group(3));
        return parsed;
    }

    let parts: Vec<&str> = address.split(',').collect();
    if parts.len() >= 2 {
        parsed.city = or_no_data(parts[0]);

        let tokens: Vec<&str> = parts[1].split_whitespace().collect();
        if tokens.len() >= 2 {
            parsed.state = tokens[0].to_owned();
            parsed.zip_code = tokens[1].to_owned();
        }
    }

    parsed
}

/// Returns the offset, within `block.join(" ")`, of the start of the line
/// containing `offset`. Keeps a matched city from reaching back into the
/// street line before it.
fn line_start(block: &[&str], offset: usize) -> usize {
    let mut start = 0;
    for line in block {
        let next = start + line.len() + 1;
        if offset < next {
            break;
        }
        start = next;
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn collects_street_and_city_lines() {
        let m = Markers::default();
        let page = lines(&[
            "01/15/2024 John Smith $500.00",
            "123 Main St",
            "Houston, TX 77002",
            "Attorney SelfEmployed",
        ]);
        assert_eq!(
            collect_address(&m, &page, 0),
            vec!["123 Main St", "Houston, TX 77002"]
        );
    }

    #[test]
    fn stops_on_first_non_address_line() {
        let m = Markers::default();
        let page = lines(&[
            "01/15/2024 John Smith $500.00",
            "Engineer",
            "123 Main St",
        ]);
        assert!(collect_address(&m, &page, 0).is_empty());
    }

    #[test]
    fn examines_at_most_five_lines() {
        let m = Markers::default();
        let page = lines(&[
            "01/15/2024 John Smith $500.00",
            "1 A St",
            "2 B St",
            "3 C St",
            "4 D St",
            "5 E St",
            "6 F St",
        ]);
        assert_eq!(collect_address(&m, &page, 0).len(), MAX_ADDRESS_LINES);
    }

    #[test]
    fn blank_lines_before_block_are_skipped() {
        let m = Markers::default();
        let page = lines(&["anchor", "", "Austin, TX 78701", "", "9 Late St"]);
        assert_eq!(collect_address(&m, &page, 0), vec!["Austin, TX 78701"]);
    }

    #[test]
    fn stops_at_page_end() {
        let m = Markers::default();
        let page = lines(&["01/15/2024 John Smith $500.00", "123 Main St"]);
        assert_eq!(collect_address(&m, &page, 0), vec!["123 Main St"]);
    }

    #[test]
    fn parses_city_state_zip() {
        let m = Markers::default();
        let parsed = parse_address(&m, &["123 Main St", "Houston, TX 77002"]);
        assert_eq!(
            parsed,
            ParsedAddress {
                city: "Houston".to_owned(),
                state: "TX".to_owned(),
                zip_code: "77002".to_owned(),
            }
        );
    }

    #[test]
    fn city_on_same_line_as_street_is_kept_whole() {
        let m = Markers::default();
        let parsed = parse_address(&m, &["PO Box Austin, TX 78701"]);
        assert_eq!(parsed.city, "PO Box Austin");
    }

    #[test]
    fn city_on_its_own_line_before_state_zip() {
        let m = Markers::default();
        let parsed = parse_address(&m, &["Houston", ", TX 77002"]);
        assert_eq!(
            parsed,
            ParsedAddress {
                city: "Houston".to_owned(),
                state: "TX".to_owned(),
                zip_code: "77002".to_owned(),
            }
        );
    }

    #[test]
    fn parses_zip_plus_four() {
        let m = Markers::default();
        let parsed = parse_address(&m, &["El Paso, TX 79901-1234"]);
        assert_eq!(parsed.city, "El Paso");
        assert_eq!(parsed.zip_code, "79901-1234");
    }

    #[test]
    fn falls_back_to_comma_split() {
        let m = Markers::default();
        let parsed = parse_address(&m, &["Ciudad Juarez, CH 3200"]);
        assert_eq!(parsed.city, "Ciudad Juarez");
        assert_eq!(parsed.state, "CH");
        assert_eq!(parsed.zip_code, "3200");
    }

    #[test]
    fn comma_split_with_single_token_keeps_city_only() {
        let m = Markers::default();
        let parsed = parse_address(&m, &["Austin, TX"]);
        assert_eq!(parsed.city, "Austin");
        assert_eq!(parsed.state, NO_DATA);
        assert_eq!(parsed.zip_code, NO_DATA);
    }

    #[test]
    fn empty_block_is_all_sentinel() {
        let m = Markers::default();
        assert_eq!(parse_address(&m, &[]), ParsedAddress::default());
    }
}
