//! Heuristic field extraction from a single free-text citation line.
//!
//! Each field has its own ordered rule list (see [`super::rules`]):
//!
//! | Field   | Rules, in priority order |
//! |---------|--------------------------|
//! | DOI     | `doi-url` |
//! | Year    | `parenthesized-year`, `bare-year`, `volume-year` |
//! | Authors | `leading-name-run`, `before-parenthesis`, `before-year`, `first-clause` |
//! | Type    | `chapter-marker`, `isbn`, `publisher-mention` |
//! | Venue   | `published-by`, `press-imprint`, `publisher-imprint`, `quoted-phrase`, `in-phrase` |
//! | Title   | `quoted-after-authors`, `clause-after-authors` (books and chapters only) |
//!
//! Extraction never fails: a field with no matching rule is simply absent.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::rules::{first_match, non_empty, Rule};
use crate::models::PublicationType;

/// Author candidates longer than this without a comma are rejected
const MAX_COMMALESS_AUTHORS_LEN: usize = 100;

/// Offset (in characters) a parenthesis or year must lie beyond for the
/// text before it to be considered an author list
const AUTHOR_PREFIX_MIN: usize = 10;

/// Fields recovered from one citation line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedCitationFields {
    pub authors_raw: Option<String>,
    pub title: Option<String>,
    pub venue: Option<String>,
    /// Four-digit year as written
    pub year: Option<String>,
    /// DOI without the `https://doi.org/` prefix
    pub doi: Option<String>,
    /// Type hint found in the text itself
    pub explicit_type: Option<PublicationType>,
    /// Which rule produced each field
    pub provenance: Provenance,
}

/// Names of the rules that produced each extracted field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Provenance {
    pub doi: Option<&'static str>,
    pub year: Option<&'static str>,
    pub authors: Option<&'static str>,
    pub explicit_type: Option<&'static str>,
    pub venue: Option<&'static str>,
    pub title: Option<&'static str>,
}

/// A year together with where its match starts in the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearMatch {
    pub year: String,
    /// Byte offset of the start of the whole match
    pub start: usize,
}

/// Input to the author rules: the line plus the already-resolved year
#[derive(Debug, Clone, Copy)]
pub struct AuthorScan<'a> {
    pub line: &'a str,
    pub year: Option<&'a YearMatch>,
}

// ========== DOI ==========

static DOI_URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://doi\.org/(\S+)").unwrap());

fn doi_url(line: &str) -> Option<String> {
    DOI_URL_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// DOI rules
pub const DOI_RULES: &[Rule<str, String>] = &[Rule::new("doi-url", doi_url)];

// ========== YEAR ==========

static PAREN_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d{4})\)").unwrap());
static BARE_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})").unwrap());
static VOLUME_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Volume \d+.* (\d{4})").unwrap());

fn capture_year(re: &Regex, line: &str) -> Option<YearMatch> {
    let caps = re.captures(line)?;
    let whole = caps.get(0)?;
    let year = caps.get(1)?;
    Some(YearMatch {
        year: year.as_str().to_string(),
        start: whole.start(),
    })
}

fn parenthesized_year(line: &str) -> Option<YearMatch> {
    capture_year(&PAREN_YEAR_RE, line)
}

fn bare_year(line: &str) -> Option<YearMatch> {
    capture_year(&BARE_YEAR_RE, line)
}

fn volume_year(line: &str) -> Option<YearMatch> {
    capture_year(&VOLUME_YEAR_RE, line)
}

/// Year rules
pub const YEAR_RULES: &[Rule<str, YearMatch>] = &[
    Rule::new("parenthesized-year", parenthesized_year),
    Rule::new("bare-year", bare_year),
    Rule::new("volume-year", volume_year),
];

// ========== AUTHORS ==========

/// Words that mark a segment as part of a title or venue rather than a name
const NON_NAME_WORDS: &[&str] = &[
    "a", "an", "and", "the", "of", "for", "on", "in", "with", "to", "using", "via", "from",
    "press", "publisher", "publishers", "publishing", "journal", "transactions", "proceedings",
    "conference", "symposium", "workshop", "international", "university", "handbook",
    "edition", "chapter", "volume", "vol", "springer", "elsevier", "wiley", "ieee", "acm",
    "review", "letters", "systems", "analysis", "book",
];

/// Lower-case particles allowed inside personal names
const NAME_PARTICLES: &[&str] = &["van", "von", "de", "der", "den", "da", "del", "di", "le", "la"];

fn is_initial(token: &str) -> bool {
    // "K", "K.", "K.R." and "K.-R."
    let letters: Vec<char> = token.chars().filter(|c| *c != '.' && *c != '-').collect();
    !letters.is_empty()
        && letters.len() <= 3
        && letters.iter().all(|c| c.is_uppercase())
        && (letters.len() == 1 || token.contains('.'))
}

fn is_name_word(token: &str) -> bool {
    let word = token.trim_end_matches('.');
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_uppercase()
        && word.chars().count() >= 2
        && chars.all(|c| c.is_alphabetic() || c == '\'' || c == '-')
        && !NON_NAME_WORDS.contains(&word.to_lowercase().as_str())
}

/// Strip a leading "and " joining the last name of a list
fn strip_leading_and(segment: &str) -> (&str, bool) {
    let trimmed = segment.trim_start();
    match trimmed.get(..4) {
        Some(head) if head.eq_ignore_ascii_case("and ") => (trimmed[4..].trim_start(), true),
        _ => (trimmed, false),
    }
}

/// Whether `segment` looks like a single personal name
///
/// Accepts one to four tokens, each an initial or a capitalised name word.
/// Three or more full words without any initial read as a title instead.
fn is_name_like(segment: &str, require_full_word: bool) -> bool {
    let tokens: Vec<&str> = segment.split_whitespace().collect();
    if tokens.is_empty() || tokens.len() > 4 {
        return false;
    }

    let mut initials = 0;
    let mut words = 0;
    for token in &tokens {
        if NAME_PARTICLES.contains(token) {
            continue;
        }
        if is_initial(token) {
            initials += 1;
        } else if is_name_word(token) {
            words += 1;
        } else {
            return false;
        }
    }

    if require_full_word && words == 0 {
        return false;
    }
    words <= 3 && (initials > 0 || words <= 2)
}

/// A run of comma-separated names at the start of the line, closed by a
/// comma or period: "A B, C. D, and E F, Title..." yields "A B, C. D, and E F"
fn leading_name_run(scan: &AuthorScan<'_>) -> Option<String> {
    let line = scan.line;

    let mut pieces = Vec::new();
    let mut start = 0;
    for (i, _) in line.match_indices(',') {
        pieces.push((start, i));
        start = i + 1;
    }
    pieces.push((start, line.len()));

    let mut names = 0;
    let mut run_end = 0;
    for (index, &(s, e)) in pieces.iter().enumerate() {
        let piece = &line[s..e];
        let (candidate, joined) = strip_leading_and(piece);
        if joined && index == 0 {
            break;
        }

        // Whole piece is a name and a comma follows it
        if e < line.len() && is_name_like(candidate.trim_end(), false) {
            names += 1;
            run_end = e;
            continue;
        }

        // Name closed by a period, e.g. "Doe A. Title of the paper"
        let closed = piece
            .match_indices('.')
            .map(|(dot, _)| dot)
            .find(|&dot| {
                let (head, _) = strip_leading_and(&piece[..dot]);
                is_name_like(head.trim_end(), true)
            });
        if let Some(dot) = closed {
            names += 1;
            run_end = s + dot;
        }
        break;
    }

    if names >= 2 {
        non_empty(&line[..run_end])
    } else {
        None
    }
}

fn chars_before(line: &str, byte_index: usize) -> usize {
    line[..byte_index].chars().count()
}

/// Everything before an opening parenthesis, when that prefix contains a comma
fn before_parenthesis(scan: &AuthorScan<'_>) -> Option<String> {
    let line = scan.line;
    let paren = line.find('(')?;
    if chars_before(line, paren) <= AUTHOR_PREFIX_MIN {
        return None;
    }
    let prefix = line[..paren].trim();
    if !prefix.contains(',') {
        return None;
    }
    non_empty(prefix.strip_suffix(',').unwrap_or(prefix))
}

/// Everything up to the last comma before the year
fn before_year(scan: &AuthorScan<'_>) -> Option<String> {
    let year = scan.year?;
    if chars_before(scan.line, year.start) <= AUTHOR_PREFIX_MIN {
        return None;
    }
    let prefix = scan.line[..year.start].trim();
    let last_comma = prefix.rfind(',')?;
    non_empty(&prefix[..last_comma])
}

static FIRST_PERIOD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)\.").unwrap());
static FIRST_COMMA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?),").unwrap());

/// Text up to the first period, or the first comma when there is no period
fn first_clause(scan: &AuthorScan<'_>) -> Option<String> {
    FIRST_PERIOD_RE
        .captures(scan.line)
        .or_else(|| FIRST_COMMA_RE.captures(scan.line))
        .and_then(|c| c.get(1))
        .and_then(|m| non_empty(m.as_str()))
}

/// Author rules
pub fn author_rules<'a>() -> [Rule<AuthorScan<'a>, String>; 4] {
    [
        Rule::new("leading-name-run", leading_name_run),
        Rule::new("before-parenthesis", before_parenthesis),
        Rule::new("before-year", before_year),
        Rule::new("first-clause", first_clause),
    ]
}

static TRAILING_AND_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+and\s*$").unwrap());

/// Strip dangling "and" and a final period; reject long comma-free text
fn clean_authors(raw: &str) -> Option<String> {
    let without_and = TRAILING_AND_RE.replace(raw, "");
    let cleaned = without_and
        .strip_suffix('.')
        .unwrap_or(&without_and)
        .trim();

    if cleaned.is_empty() {
        return None;
    }
    if cleaned.chars().count() > MAX_COMMALESS_AUTHORS_LEN && !cleaned.contains(',') {
        return None;
    }
    Some(cleaned.to_string())
}

// ========== TYPE HINTS ==========

static IN_COLON_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)in:\s+(.+?)[.,]").unwrap());
static PUBLISHED_BY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)published by\s+(.+?)[,.]").unwrap());
static PRESS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)([^,.;]+?)\s+press\b").unwrap());
static PUBLISHER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([^,.;]+?)\s+publishers?\b").unwrap());

fn chapter_marker(line: &str) -> Option<PublicationType> {
    if IN_COLON_RE.is_match(line) || line.to_lowercase().contains("chapter") {
        Some(PublicationType::Chapter)
    } else {
        None
    }
}

fn isbn(line: &str) -> Option<PublicationType> {
    line.to_lowercase()
        .contains("isbn")
        .then_some(PublicationType::Book)
}

fn publisher_mention(line: &str) -> Option<PublicationType> {
    let mentioned = published_by(line).is_some()
        || press_imprint(line).is_some()
        || publisher_imprint(line).is_some();
    mentioned.then_some(PublicationType::Book)
}

/// Type-hint rules; a chapter marker outranks any book signal
pub const TYPE_HINT_RULES: &[Rule<str, PublicationType>] = &[
    Rule::new("chapter-marker", chapter_marker),
    Rule::new("isbn", isbn),
    Rule::new("publisher-mention", publisher_mention),
];

// ========== VENUE ==========

fn capture_first(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| non_empty(m.as_str()))
}

fn published_by(line: &str) -> Option<String> {
    capture_first(&PUBLISHED_BY_RE, line)
}

fn press_imprint(line: &str) -> Option<String> {
    capture_first(&PRESS_RE, line)
}

fn publisher_imprint(line: &str) -> Option<String> {
    capture_first(&PUBLISHER_RE, line)
}

static QUOTED_AFTER_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[.,]\s*["'](.+?)["']"#).unwrap());
static IN_PHRASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bin\s+(.+?),").unwrap());

fn quoted_phrase(line: &str) -> Option<String> {
    capture_first(&QUOTED_AFTER_PUNCT_RE, line)
}

fn in_phrase(line: &str) -> Option<String> {
    capture_first(&IN_PHRASE_RE, line)
}

/// Venue rules; publisher patterns outrank the generic phrase patterns
pub const VENUE_RULES: &[Rule<str, String>] = &[
    Rule::new("published-by", published_by),
    Rule::new("press-imprint", press_imprint),
    Rule::new("publisher-imprint", publisher_imprint),
    Rule::new("quoted-phrase", quoted_phrase),
    Rule::new("in-phrase", in_phrase),
];

// ========== TITLE ==========

static CLAUSE_AFTER_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,.]\s*(.+?)[,.]").unwrap());

fn quoted_after_authors(rest: &str) -> Option<String> {
    capture_first(&QUOTED_AFTER_PUNCT_RE, rest)
}

fn clause_after_authors(rest: &str) -> Option<String> {
    capture_first(&CLAUSE_AFTER_PUNCT_RE, rest)
}

/// Title rules, applied to the text following the author list
pub const TITLE_RULES: &[Rule<str, String>] = &[
    Rule::new("quoted-after-authors", quoted_after_authors),
    Rule::new("clause-after-authors", clause_after_authors),
];

// ========== EXTRACTION ==========

/// Extract every recognisable field from one citation line
pub fn extract_fields(line: &str) -> ParsedCitationFields {
    let mut fields = ParsedCitationFields::default();

    if let Some(hit) = first_match(DOI_RULES, line) {
        fields.doi = Some(hit.value);
        fields.provenance.doi = Some(hit.rule);
    }

    let year = first_match(YEAR_RULES, line);
    if let Some(hit) = &year {
        fields.year = Some(hit.value.year.clone());
        fields.provenance.year = Some(hit.rule);
    }

    let scan = AuthorScan {
        line,
        year: year.as_ref().map(|hit| &hit.value),
    };
    if let Some(hit) = first_match(&author_rules(), &scan) {
        if let Some(authors) = clean_authors(&hit.value) {
            fields.authors_raw = Some(authors);
            fields.provenance.authors = Some(hit.rule);
        }
    }

    if let Some(hit) = first_match(TYPE_HINT_RULES, line) {
        fields.explicit_type = Some(hit.value);
        fields.provenance.explicit_type = Some(hit.rule);
    }

    if let Some(hit) = first_match(VENUE_RULES, line) {
        fields.venue = Some(hit.value);
        fields.provenance.venue = Some(hit.rule);
    }

    let book_like = fields.explicit_type.is_some_and(|t| t.is_book_like());
    if book_like {
        if let Some(authors) = fields.authors_raw.as_deref() {
            let rest = match line.find(authors) {
                Some(pos) => &line[pos + authors.len()..],
                None => line,
            };
            if let Some(hit) = first_match(TITLE_RULES, rest) {
                fields.provenance.title = Some(hit.rule);
                fields.title = Some(hit.value);
            }
        }
    }

    fields
}
