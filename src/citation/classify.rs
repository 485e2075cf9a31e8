//! Keyword classifier assigning a [`PublicationType`] to a citation.
//!
//! Used only when field extraction produced no explicit type hint.

use once_cell::sync::Lazy;
use regex::Regex;

use super::rules::{first_match, Rule};
use crate::models::PublicationType;

/// Lower-cased citation text and resolved venue
#[derive(Debug, Clone)]
pub struct Signals {
    citation: String,
    venue: String,
}

impl Signals {
    pub fn new(citation: &str, venue: &str) -> Self {
        Self {
            citation: citation.to_lowercase(),
            venue: venue.to_lowercase(),
        }
    }
}

const BOOK_WORDS: &[&str] = &[
    "book",
    "publisher",
    "press",
    "edition",
    "isbn",
    "published by",
    "publishing",
];
const JOURNAL_WORDS: &[&str] = &["journal", "transactions", "review", "letters"];
const CONFERENCE_WORDS: &[&str] = &["conference", "proceedings", "symposium", "workshop"];

static VOLUME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"vol(\.|ume)").unwrap());

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

fn book_indicator(s: &Signals) -> Option<PublicationType> {
    if !contains_any(&s.citation, BOOK_WORDS) {
        return None;
    }
    if s.citation.contains("chapter") || s.citation.contains("in:") {
        Some(PublicationType::Chapter)
    } else {
        Some(PublicationType::Book)
    }
}

fn journal_venue(s: &Signals) -> Option<PublicationType> {
    (contains_any(&s.venue, JOURNAL_WORDS) || VOLUME_RE.is_match(&s.venue))
        .then_some(PublicationType::Journal)
}

fn conference_indicator(s: &Signals) -> Option<PublicationType> {
    (contains_any(&s.venue, CONFERENCE_WORDS) || contains_any(&s.citation, CONFERENCE_WORDS))
        .then_some(PublicationType::Conference)
}

/// Classifier rules; anything unmatched is a conference paper
pub const CLASSIFIER_RULES: &[Rule<Signals, PublicationType>] = &[
    Rule::new("book-indicator", book_indicator),
    Rule::new("journal-venue", journal_venue),
    Rule::new("conference-indicator", conference_indicator),
];

/// Classify a citation line given its resolved venue
pub fn classify(citation: &str, venue: &str) -> PublicationType {
    first_match(CLASSIFIER_RULES, &Signals::new(citation, venue))
        .map(|hit| hit.value)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isbn_is_book_unless_chapter() {
        assert_eq!(classify("Foo, ISBN 1234, 2019", "X"), PublicationType::Book);
        assert_eq!(classify("Foo, isbn 1234, chapter 3", "X"), PublicationType::Chapter);
        assert_eq!(classify("Foo. In: Bar, ISBN 1234", "X"), PublicationType::Chapter);
    }

    #[test]
    fn test_book_outranks_journal_venue() {
        assert_eq!(
            classify("A, B. Title, Oxford University Press, 2010", "Journal of Things"),
            PublicationType::Book
        );
    }

    #[test]
    fn test_journal_venue() {
        assert_eq!(
            classify("A, B. Title. 2019", "IEEE Transactions on Image Processing"),
            PublicationType::Journal
        );
        assert_eq!(classify("A, B. Title. 2019", "Pattern Recognition Letters"), PublicationType::Journal);
        assert_eq!(classify("A, B. Title. 2019", "Vol. 12, pp 1-9"), PublicationType::Journal);
        assert_eq!(classify("A, B. Title. 2019", "Volume 3"), PublicationType::Journal);
    }

    #[test]
    fn test_journal_words_only_checked_in_venue() {
        assert_eq!(
            classify("A, B. Title, Journal of Things, 2019", "Unknown Venue"),
            PublicationType::Conference
        );
    }

    #[test]
    fn test_conference_and_default() {
        assert_eq!(
            classify("A. Title, Proceedings of ICVGIP, 2018", "Unknown Venue"),
            PublicationType::Conference
        );
        assert_eq!(classify("A. Something entirely plain", "Somewhere"), PublicationType::Conference);
        assert_eq!(classify("", ""), PublicationType::Conference);
    }
}
