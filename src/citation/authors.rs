//! Display formatting for raw author lists.

use once_cell::sync::Lazy;
use regex::Regex;

/// Shown when no author could be extracted
pub const UNKNOWN_AUTHORS: &str = "Unknown";

static ET_AL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+et\s+al\.?").unwrap());
static AND_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\band\b").unwrap());
static COMMA_SPACING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+,\s+").unwrap());
static MULTI_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());
static MULTI_COMMA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",+").unwrap());

/// Split a raw author string into individual names
///
/// "and" is treated as a separator, so "A, B and C" and "A, B, and C" give
/// the same three names.
pub fn split_authors(raw: &str) -> Vec<String> {
    let cleaned = ET_AL_RE.replace(raw, " et al.");
    let cleaned = AND_RE.replace_all(&cleaned, ",");
    let cleaned = COMMA_SPACING_RE.replace_all(&cleaned, ", ");
    let cleaned = MULTI_SPACE_RE.replace_all(&cleaned, " ");
    let cleaned = MULTI_COMMA_RE.replace_all(&cleaned, ",");

    cleaned
        .trim()
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Format a raw author list for display
///
/// One name is returned as is, two are joined with " and ", longer lists
/// read "A, B, and C". Formatting its own output is a no-op.
pub fn format_authors(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return UNKNOWN_AUTHORS.to_string();
    };

    let mut names = split_authors(raw);
    match names.len() {
        0 => UNKNOWN_AUTHORS.to_string(),
        1 => names.remove(0),
        2 => format!("{} and {}", names[0], names[1]),
        _ => {
            let last = names.pop().unwrap_or_default();
            format!("{}, and {}", names.join(", "), last)
        }
    }
}
