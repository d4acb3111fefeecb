#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Line-based contribution parsing engine for Schedule A1 disclosure pages.
//!
//! Given the plain text of one page (native PDF text or OCR output), the
//! engine walks the trimmed lines with an explicit cursor:
//!
//! 1. [`anchor`] matches a contribution line (date, name, amount)
//! 2. [`address`] greedily collects up to five address fragment lines and
//!    derives city/state/zip from them
//! 3. [`attributes`] resolves occupation/employer from the residual window
//!    that ends at the next anchor
//! 4. [`page`] advances the cursor and emits a [`ContributionRecord`]
//!
//! Every step is a pure function of `(lines, index)`. Marker substrings and
//! regex patterns are injected through [`markers::Markers`] so other form
//! variants can be handled without code changes. Records from all pages are
//! merged by [`dedup::dedup`].
//!
//! [`ContributionRecord`]: ethics_extract_contribution_models::ContributionRecord

pub mod address;
pub mod anchor;
pub mod attributes;
pub mod classify;
pub mod dedup;
pub mod markers;
pub mod page;

pub use markers::{MarkerConfig, Markers};
pub use page::PageScanner;

/// Errors raised while loading or compiling a marker configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML document could not be deserialized.
    #[error("Invalid marker config: {0}")]
    Toml(#[from] toml::de::Error),

    /// One of the configured patterns failed to compile.
    #[error("Invalid pattern '{name}': {source}")]
    Regex {
        /// Config key of the offending pattern.
        name: String,
        #[source]
        source: regex::Error,
    },

    /// The anchor pattern must expose date, name and amount groups.
    #[error("Anchor pattern must have 3 capture groups, found {0}")]
    AnchorGroups(usize),

    /// Reading a marker config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
