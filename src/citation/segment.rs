//! Splitting raw citation blocks into individual citation lines.

/// Split a multi-line citation block into trimmed, non-blank lines.
///
/// CR, LF and CRLF all end a line; runs of terminators never produce empty
/// entries. Order is preserved.
pub fn split_citations(text: &str) -> Vec<&str> {
    text.split(['\r', '\n'].as_slice())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Like [`split_citations`] for an optional field; absent yields nothing
pub fn split_optional(text: Option<&str>) -> Vec<&str> {
    text.map(split_citations).unwrap_or_default()
}
