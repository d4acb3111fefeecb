//! Line classification predicates.
//!
//! Decides whether a line is page noise (headers, footers, page stamps,
//! stray address pieces) or a candidate mailing-address fragment.

use crate::markers::Markers;

/// Returns `true` if `line` matches any configured footer marker,
/// ignoring case.
#[must_use]
pub fn is_footer(markers: &Markers, line: &str) -> bool {
    let lower = line.to_lowercase();
    markers
        .footer_markers
        .iter()
        .any(|m| lower.contains(m.as_str()))
}

/// Returns `true` if `line` contains any configured header marker.
#[must_use]
pub fn is_header(markers: &Markers, line: &str) -> bool {
    markers
        .header_markers
        .iter()
        .any(|m| line.contains(m.as_str()))
}

/// Returns `true` for lines that can never carry occupation or employer
/// text: blanks, headers, footers, page stamps and address-shaped lines.
#[must_use]
pub fn is_noise(markers: &Markers, line: &str) -> bool {
    if line.trim().is_empty() || is_footer(markers, line) || is_header(markers, line) {
        return true;
    }

    markers.noise_lines.iter().any(|re| re.is_match(line))
        || markers.street_start.is_match(line)
        || markers.city_state.is_match(line)
        || markers.state_zip.is_match(line)
}

/// Returns `true` if `line` contains a comma followed somewhere by a
/// state-and-digit signature (e.g. `"Houston, TX 77002"`).
#[must_use]
pub fn has_address_signature(markers: &Markers, line: &str) -> bool {
    line.contains(',') && markers.address_signature.is_match(line)
}

/// Returns `true` if `line` looks like part of a mailing address.
#[must_use]
pub fn is_address_fragment(markers: &Markers, line: &str) -> bool {
    has_address_signature(markers, line)
        || markers.street_start.is_match(line)
        || markers.city_state.is_match(line)
        || markers.state_zip.is_match(line)
}
