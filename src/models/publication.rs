//! Publication model produced by the citation aggregator.

use serde::{Deserialize, Serialize};

/// Kind of outlet a publication appeared in
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PublicationType {
    Book,
    Chapter,
    Journal,
    #[default]
    Conference,
}

impl PublicationType {
    /// Returns the identifier used in payloads and filters
    pub fn id(&self) -> &'static str {
        match self {
            PublicationType::Book => "book",
            PublicationType::Chapter => "chapter",
            PublicationType::Journal => "journal",
            PublicationType::Conference => "conference",
        }
    }

    /// Returns the display name
    pub fn name(&self) -> &'static str {
        match self {
            PublicationType::Book => "Book",
            PublicationType::Chapter => "Book Chapter",
            PublicationType::Journal => "Journal Article",
            PublicationType::Conference => "Conference Paper",
        }
    }

    /// Book-like publications get title extraction and higher placeholder counts
    pub fn is_book_like(&self) -> bool {
        matches!(self, PublicationType::Book | PublicationType::Chapter)
    }
}

impl std::fmt::Display for PublicationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for PublicationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "book" => Ok(PublicationType::Book),
            "chapter" => Ok(PublicationType::Chapter),
            "journal" => Ok(PublicationType::Journal),
            "conference" => Ok(PublicationType::Conference),
            other => Err(format!("unknown publication type: {}", other)),
        }
    }
}

/// One publication extracted from a faculty member's citation fields
///
/// `citations` and `r#abstract` are placeholders: the faculty profile API
/// carries neither, so the aggregator synthesises them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationRecord {
    /// Position in the faculty member's aggregated list
    pub id: u32,

    /// Title (the whole citation line when no title could be extracted)
    pub title: String,

    /// Display author list, e.g. "A, B, and C"
    pub authors: String,

    /// Journal, proceedings or publisher
    pub venue: String,

    /// Publication year
    pub year: i32,

    /// Publication type
    #[serde(rename = "type")]
    pub pub_type: PublicationType,

    /// DOI without the resolver prefix, empty when absent
    pub doi: String,

    /// Synthetic citation count
    pub citations: u32,

    /// Placeholder abstract
    pub r#abstract: String,

    /// Keywords taken from the faculty member's teaching/interest field
    pub keywords: Vec<String>,
}

impl PublicationRecord {
    /// Resolver URL for the DOI, if any
    pub fn doi_url(&self) -> Option<String> {
        if self.doi.is_empty() {
            None
        } else {
            Some(format!("https://doi.org/{}", self.doi))
        }
    }

    /// Case-insensitive match against title or authors
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.authors.to_lowercase().contains(&query)
    }
}

/// Builder for constructing PublicationRecord values
#[derive(Debug, Clone)]
pub struct PublicationBuilder {
    record: PublicationRecord,
}

impl PublicationBuilder {
    /// Create a new builder with the required fields
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            record: PublicationRecord {
                id,
                title: title.into(),
                authors: "Unknown".to_string(),
                venue: String::new(),
                year: 0,
                pub_type: PublicationType::default(),
                doi: String::new(),
                citations: 0,
                r#abstract: String::new(),
                keywords: Vec::new(),
            },
        }
    }

    /// Set authors
    pub fn authors(mut self, authors: impl Into<String>) -> Self {
        self.record.authors = authors.into();
        self
    }

    /// Set venue
    pub fn venue(mut self, venue: impl Into<String>) -> Self {
        self.record.venue = venue.into();
        self
    }

    /// Set year
    pub fn year(mut self, year: i32) -> Self {
        self.record.year = year;
        self
    }

    /// Set publication type
    pub fn pub_type(mut self, pub_type: PublicationType) -> Self {
        self.record.pub_type = pub_type;
        self
    }

    /// Set DOI
    pub fn doi(mut self, doi: impl Into<String>) -> Self {
        self.record.doi = doi.into();
        self
    }

    /// Set citation count
    pub fn citations(mut self, count: u32) -> Self {
        self.record.citations = count;
        self
    }

    /// Set abstract
    pub fn abstract_text(mut self, abstract_text: impl Into<String>) -> Self {
        self.record.r#abstract = abstract_text.into();
        self
    }

    /// Set keywords
    pub fn keywords(mut self, keywords: Vec<String>) -> Self {
        self.record.keywords = keywords;
        self
    }

    /// Build the record
    pub fn build(self) -> PublicationRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publication_builder() {
        let record = PublicationBuilder::new(3, "Image Processing Handbook")
            .authors("Masilamani V and K. Patel")
            .venue("Springer")
            .year(2021)
            .pub_type(PublicationType::Book)
            .doi("10.1/xyz")
            .citations(7)
            .build();

        assert_eq!(record.id, 3);
        assert_eq!(record.pub_type, PublicationType::Book);
        assert_eq!(record.doi_url(), Some("https://doi.org/10.1/xyz".to_string()));
        assert_eq!(record.citations, 7);
    }

    #[test]
    fn test_default_type_is_conference() {
        assert_eq!(PublicationType::default(), PublicationType::Conference);
        assert_eq!(PublicationBuilder::new(0, "T").build().pub_type, PublicationType::Conference);
    }

    #[test]
    fn test_type_serializes_as_lowercase_type_field() {
        let record = PublicationBuilder::new(0, "T")
            .pub_type(PublicationType::Chapter)
            .build();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "chapter");
    }

    #[test]
    fn test_matches_query() {
        let record = PublicationBuilder::new(0, "Biometric Authentication Systems")
            .authors("Masilamani V and S. Kumar")
            .build();

        assert!(record.matches_query(""));
        assert!(record.matches_query("biometric"));
        assert!(record.matches_query("KUMAR"));
        assert!(!record.matches_query("vlsi"));
    }

    #[test]
    fn test_type_from_str() {
        assert_eq!("Journal".parse::<PublicationType>(), Ok(PublicationType::Journal));
        assert!("poster".parse::<PublicationType>().is_err());
    }
}
