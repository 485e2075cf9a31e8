//! Build the publication list for one faculty detail record.

use std::collections::BTreeMap;

use super::authors::format_authors;
use super::classify::classify;
use super::extract::extract_fields;
use super::segment::split_optional;
use crate::config::PublicationsConfig;
use crate::models::{
    split_list_field, FacultyDetailInfo, PublicationBuilder, PublicationRecord, PublicationType,
};

/// Venue used for journal/conference citations with no recognisable venue
pub const UNKNOWN_CITATION_VENUE: &str = "Unknown Journal/Conference";
/// Venue used for book fields with no recognisable publisher
pub const UNKNOWN_PUBLISHER: &str = "Book Publisher";
/// Venue used for the extra `pubCite*` fields
pub const UNKNOWN_VENUE: &str = "Unknown Venue";

const ABSTRACT_PLACEHOLDER: &str = "Abstract not available";

/// Dedicated book list, always typed as books
const BOOK_PUBLICATIONS_FIELD: &str = "bookPublications";

/// Named book/report fields in processing order
const BOOK_FIELDS: &[&str] = &[
    "books",
    "bookChapters",
    "bookPublished",
    "publishedBooks",
    "editedBooks",
    "technicalReports",
];

/// How lines from one source field become records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Type comes from the extractor hint or the classifier
    Citation { default_venue: &'static str },
    /// Type is fixed by the field name
    Book { pub_type: PublicationType },
}

impl FieldKind {
    fn default_venue(&self) -> &'static str {
        match self {
            FieldKind::Citation { default_venue } => *default_venue,
            FieldKind::Book { .. } => UNKNOWN_PUBLISHER,
        }
    }
}

/// A citation-bearing field of the detail record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceField {
    pub name: String,
    pub kind: FieldKind,
}

impl SourceField {
    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Source fields of `info` in processing order
///
/// Primary and secondary citation groups first, then the dedicated book
/// list, then the named book fields, then any other `pubCite*` field.
/// Fields missing from the record are skipped.
pub fn source_fields(info: &FacultyDetailInfo) -> Vec<SourceField> {
    let citation = FieldKind::Citation {
        default_venue: UNKNOWN_CITATION_VENUE,
    };
    let book = FieldKind::Book {
        pub_type: PublicationType::Book,
    };

    let mut fields = vec![
        SourceField::new(FacultyDetailInfo::PRIMARY_CITATIONS, citation),
        SourceField::new(FacultyDetailInfo::SECONDARY_CITATIONS, citation),
        SourceField::new(BOOK_PUBLICATIONS_FIELD, book),
    ];

    for name in BOOK_FIELDS {
        let pub_type = if *name == "bookChapters" {
            PublicationType::Chapter
        } else {
            PublicationType::Book
        };
        fields.push(SourceField::new(*name, FieldKind::Book { pub_type }));
    }

    for name in info.field_names() {
        if name.starts_with(FacultyDetailInfo::CITATION_PREFIX)
            && name != FacultyDetailInfo::PRIMARY_CITATIONS
            && name != FacultyDetailInfo::SECONDARY_CITATIONS
        {
            fields.push(SourceField::new(
                name,
                FieldKind::Citation {
                    default_venue: UNKNOWN_VENUE,
                },
            ));
        }
    }

    fields.retain(|field| info.get_str(&field.name).is_some());
    fields
}

/// Stable placeholder citation count derived from the citation text
fn placeholder_citations(line: &str, kind: FieldKind) -> u32 {
    let digest = md5::compute(line.as_bytes());
    let n = u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]);
    match kind {
        FieldKind::Citation { .. } => n % 10,
        FieldKind::Book { .. } => n % 15 + 5,
    }
}

/// Turns detail records into publication lists
#[derive(Debug, Clone)]
pub struct PublicationAggregator {
    default_year: i32,
    default_keyword: String,
}

impl Default for PublicationAggregator {
    fn default() -> Self {
        Self::from_config(&PublicationsConfig::default())
    }
}

impl PublicationAggregator {
    pub fn new(default_year: i32, default_keyword: impl Into<String>) -> Self {
        Self {
            default_year,
            default_keyword: default_keyword.into(),
        }
    }

    pub fn from_config(config: &PublicationsConfig) -> Self {
        Self::new(config.default_year, config.default_keyword.clone())
    }

    /// Keywords shared by every record of one faculty member
    pub fn keywords(&self, info: &FacultyDetailInfo) -> Vec<String> {
        let keywords = info.teaching().map(split_list_field).unwrap_or_default();
        if keywords.is_empty() {
            vec![self.default_keyword.clone()]
        } else {
            keywords
        }
    }

    /// Build one record from a citation line
    pub fn build_record(
        &self,
        id: u32,
        line: &str,
        kind: FieldKind,
        keywords: &[String],
    ) -> PublicationRecord {
        let fields = extract_fields(line);

        let venue = fields
            .venue
            .clone()
            .unwrap_or_else(|| kind.default_venue().to_string());

        let pub_type = match kind {
            FieldKind::Book { pub_type } => pub_type,
            FieldKind::Citation { .. } => fields
                .explicit_type
                .unwrap_or_else(|| classify(line, &venue)),
        };

        let year = fields
            .year
            .as_deref()
            .and_then(|y| y.parse().ok())
            .unwrap_or(self.default_year);

        let title = fields.title.clone().unwrap_or_else(|| line.trim().to_string());

        PublicationBuilder::new(id, title)
            .authors(format_authors(fields.authors_raw.as_deref()))
            .venue(venue)
            .year(year)
            .pub_type(pub_type)
            .doi(fields.doi.unwrap_or_default())
            .citations(placeholder_citations(line, kind))
            .abstract_text(ABSTRACT_PLACEHOLDER)
            .keywords(keywords.to_vec())
            .build()
    }

    /// Aggregate every citation line of `info` into publication records
    ///
    /// Ids come from one counter shared by all fields, starting at 0.
    /// Identical citations in different fields produce separate records.
    pub fn aggregate(&self, info: &FacultyDetailInfo) -> Vec<PublicationRecord> {
        let keywords = self.keywords(info);
        let mut publications = Vec::new();
        let mut next_id = 0u32;

        for field in source_fields(info) {
            let lines = split_optional(info.get_str(&field.name));
            tracing::debug!("Found {} publications in {}", lines.len(), field.name);

            for line in lines {
                let record = self.build_record(next_id, line, field.kind, &keywords);
                next_id += 1;

                if record.pub_type.is_book_like() {
                    tracing::debug!(
                        "Found {} in {}: {}",
                        record.pub_type,
                        field.name,
                        line.chars().take(80).collect::<String>()
                    );
                }
                publications.push(record);
            }
        }

        let counts = type_counts(&publications);
        tracing::info!(
            "Aggregated {} publications for {} ({} books, {} chapters)",
            publications.len(),
            info.name().unwrap_or("unknown faculty"),
            counts.get(&PublicationType::Book).copied().unwrap_or(0),
            counts.get(&PublicationType::Chapter).copied().unwrap_or(0)
        );

        publications
    }
}

/// Number of publications of each type
pub fn type_counts(publications: &[PublicationRecord]) -> BTreeMap<PublicationType, usize> {
    let mut counts = BTreeMap::new();
    for publication in publications {
        *counts.entry(publication.pub_type).or_insert(0) += 1;
    }
    counts
}
