//! Marker substrings and line patterns used by the parsing engine.
//!
//! The default Texas Ethics Commission configuration is baked into the
//! binary at compile time via [`include_str!`]. Custom variants are loaded
//! from TOML with [`MarkerConfig::from_toml_str`] or
//! [`MarkerConfig::from_path`] and compiled once into [`Markers`].

use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::ConfigError;

/// Embedded default configuration for Schedule A1 pages.
const DEFAULT_MARKERS_TOML: &str = include_str!("../config/markers.toml");

/// Raw, serializable marker configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkerConfig {
    /// Footer fragments, matched case-insensitively.
    pub footer_markers: Vec<String>,
    /// Header fragments, matched case-sensitively and stripped from
    /// occupation/employer values.
    pub header_markers: Vec<String>,
    /// Substrings that mark a page as a contributions schedule.
    pub page_markers: Vec<String>,
    /// Regex patterns driving line classification and anchor matching.
    pub patterns: PatternConfig,
}

/// Regex sources for every line rule.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternConfig {
    /// Contribution line with date, name and amount capture groups.
    pub anchor: String,
    /// Looser date-then-amount shape used to find the next contribution.
    pub next_anchor: String,
    pub date: String,
    pub amount: String,
    /// Contributor ID suffix removed from names.
    pub id_suffix: String,
    /// Combined "City, ST 12345" pattern with three capture groups.
    pub city_state_zip: String,
    /// Searched on lines containing a comma ("ST 1...").
    pub address_signature: String,
    pub street_start: String,
    pub city_state: String,
    pub state_zip: String,
    /// Page numbers, report stamps and similar standalone noise.
    pub noise_lines: Vec<String>,
}

impl MarkerConfig {
    /// Parses a marker configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the document is malformed.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(toml_str)?)
    }

    /// Reads and parses a marker configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Toml`] if it is malformed.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        log::debug!("Loaded marker config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Returns the embedded Texas Ethics Commission configuration.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed (this is a compile-time
    /// guarantee since the config is embedded).
    #[must_use]
    pub fn texas_ethics() -> Self {
        Self::from_toml_str(DEFAULT_MARKERS_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse markers.toml: {e}"))
    }
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self::texas_ethics()
    }
}

/// Compiled form of a [`MarkerConfig`], borrowed by every parsing step.
#[derive(Debug, Clone)]
pub struct Markers {
    pub(crate) footer_markers: Vec<String>,
    pub(crate) header_markers: Vec<String>,
    pub(crate) page_markers: Vec<String>,
    pub(crate) anchor: Regex,
    pub(crate) next_anchor: Regex,
    pub(crate) date: Regex,
    pub(crate) amount: Regex,
    pub(crate) id_suffix: Regex,
    pub(crate) city_state_zip: Regex,
    pub(crate) address_signature: Regex,
    pub(crate) street_start: Regex,
    pub(crate) city_state: Regex,
    pub(crate) state_zip: Regex,
    pub(crate) noise_lines: Vec<Regex>,
}

fn compile(name: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::Regex {
        name: name.to_owned(),
        source,
    })
}

impl Markers {
    /// Compiles every pattern in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Regex`] naming the first pattern that fails
    /// to compile, or [`ConfigError::AnchorGroups`] if the anchor pattern
    /// does not expose exactly three capture groups.
    pub fn compile(config: &MarkerConfig) -> Result<Self, ConfigError> {
        let p = &config.patterns;

        let anchor = compile("anchor", &p.anchor)?;
        // captures_len() counts the implicit whole-match group
        let groups = anchor.captures_len() - 1;
        if groups != 3 {
            return Err(ConfigError::AnchorGroups(groups));
        }

        let noise_lines = p
            .noise_lines
            .iter()
            .enumerate()
            .map(|(i, pattern)| compile(&format!("noise_lines[{i}]"), pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            footer_markers: config
                .footer_markers
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
            header_markers: config.header_markers.clone(),
            page_markers: config.page_markers.clone(),
            anchor,
            next_anchor: compile("next_anchor", &p.next_anchor)?,
            date: compile("date", &p.date)?,
            amount: compile("amount", &p.amount)?,
            id_suffix: compile("id_suffix", &p.id_suffix)?,
            city_state_zip: compile("city_state_zip", &p.city_state_zip)?,
            address_signature: compile("address_signature", &p.address_signature)?,
            street_start: compile("street_start", &p.street_start)?,
            city_state: compile("city_state", &p.city_state)?,
            state_zip: compile("state_zip", &p.state_zip)?,
            noise_lines,
        })
    }

    /// Loads and compiles a marker config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed or
    /// compiled.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        Self::compile(&MarkerConfig::from_path(path)?)
    }

    /// Header fragments stripped from resolved attribute values.
    #[must_use]
    pub fn header_markers(&self) -> &[String] {
        &self.header_markers
    }

    /// Returns `true` if `text` contains any configured page marker.
    #[must_use]
    pub fn is_schedule_page(&self, text: &str) -> bool {
        self.page_markers.iter().any(|m| text.contains(m.as_str()))
    }
}

impl Default for Markers {
    /// Compiles the embedded Texas Ethics Commission configuration.
    ///
    /// # Panics
    ///
    /// Panics if an embedded pattern fails to compile.
    fn default() -> Self {
        Self::compile(&MarkerConfig::texas_ethics())
            .unwrap_or_else(|e| panic!("Failed to compile embedded markers: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn embedded_config_compiles() {
        let config = MarkerConfig::texas_ethics();
        assert_eq!(config.footer_markers.len(), 5);
        assert_eq!(config.header_markers.len(), 12);
        assert!(Markers::compile(&config).is_ok());
    }

    #[test]
    fn footer_markers_are_lowercased() {
        let markers = Markers::default();
        assert!(
            markers
                .footer_markers
                .contains(&"www.ethics.state.tx.us".to_owned())
        );
        assert!(
            markers
                .footer_markers
                .contains(&"texas ethics commission".to_owned())
        );
    }

    #[test]
    fn page_gate_uses_either_marker() {
        let markers = Markers::default();
        assert!(markers.is_schedule_page("SCHEDULE A1: MONETARY POLITICAL CONTRIBUTIONS"));
        assert!(markers.is_schedule_page("Schedule A1 continued"));
        assert!(!markers.is_schedule_page("SCHEDULE F: EXPENDITURES"));
    }

    #[test]
    fn bad_regex_names_the_pattern() {
        let mut config = MarkerConfig::texas_ethics();
        config.patterns.street_start = "(unclosed".to_owned();
        let err = Markers::compile(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Regex { ref name, .. } if name == "street_start"));
    }

    #[test]
    fn anchor_needs_three_groups() {
        let mut config = MarkerConfig::texas_ethics();
        config.patterns.anchor = r"(\d{2}/\d{2}/\d{4})\s+(.+)".to_owned();
        let err = Markers::compile(&config).unwrap_err();
        assert!(matches!(err, ConfigError::AnchorGroups(2)));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let err = MarkerConfig::from_toml_str("footer_markers = [").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn loads_custom_config_from_file() {
        let custom = DEFAULT_MARKERS_TOML.replace(
            r#"page_markers = ["MONETARY POLITICAL CONTRIBUTIONS", "Schedule A1"]"#,
            r#"page_markers = ["Schedule A2"]"#,
        );
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(custom.as_bytes()).unwrap();

        let markers = Markers::from_path(file.path()).unwrap();
        assert!(markers.is_schedule_page("Schedule A2"));
        assert!(!markers.is_schedule_page("Schedule A1"));
    }
}
