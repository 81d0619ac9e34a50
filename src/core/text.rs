//! Tolerant parsing of on-screen text and chat messages
//!
//! Every parser returns `None` on malformed input; callers keep the previous
//! value in that case.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Markup tags such as <col=ff0000> or </col>
    static ref RE_TAGS: Regex = Regex::new(r"<[^>]*>").unwrap();

    /// "current/max", surrounding whitespace allowed
    static ref RE_FRACTION: Regex = Regex::new(r"^\s*(\d+)\s*/\s*(\d+)\s*$").unwrap();

    /// Plain non-negative integer, thousands separators allowed
    static ref RE_INTEGER: Regex = Regex::new(r"^\s*(\d[\d,]*)\s*$").unwrap();
}

/// Remove markup tags
pub fn strip_tags(text: &str) -> String {
    RE_TAGS.replace_all(text, "").into_owned()
}

/// Message text as compared against known notices: tags stripped, trimmed
pub fn normalize_message(text: &str) -> String {
    strip_tags(text).trim().to_string()
}

/// Parse "current/max" into a pair
pub fn parse_fraction(text: &str) -> Option<(u32, u32)> {
    let clean = strip_tags(text);
    let caps = RE_FRACTION.captures(&clean)?;
    let current = caps[1].parse().ok()?;
    let max = caps[2].parse().ok()?;
    Some((current, max))
}

/// Parse a plain integer field
pub fn parse_count(text: &str) -> Option<u32> {
    let clean = strip_tags(text);
    let caps = RE_INTEGER.captures(&clean)?;
    caps[1].replace(',', "").parse().ok()
}

// =============================================================================
// TESTS
// =============================================================================
