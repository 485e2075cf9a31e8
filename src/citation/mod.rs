//! Citation pipeline: segmentation, field extraction, type classification,
//! author formatting and per-faculty aggregation.
//!
//! Every stage is infallible. Unrecognised input degrades to absent fields
//! and defaults; a bad line never stops the remaining lines from being read.

mod aggregate;
mod authors;
mod classify;
mod extract;
pub mod rules;
mod segment;

pub use aggregate::{
    source_fields, type_counts, FieldKind, PublicationAggregator, SourceField,
    UNKNOWN_CITATION_VENUE, UNKNOWN_PUBLISHER, UNKNOWN_VENUE,
};
pub use authors::{format_authors, split_authors, UNKNOWN_AUTHORS};
pub use classify::{classify, Signals, CLASSIFIER_RULES};
pub use extract::{
    author_rules, extract_fields, AuthorScan, ParsedCitationFields, Provenance, YearMatch,
    DOI_RULES, TITLE_RULES, TYPE_HINT_RULES, VENUE_RULES, YEAR_RULES,
};
pub use segment::{split_citations, split_optional};
