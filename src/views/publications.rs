//! Publications directory: every faculty member with their aggregated
//! publication list, plus search and paging over one member's list.

use futures_util::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

use super::pagination::{paginate, FilterState, Page};
use crate::api::DetailSource;
use crate::citation::{format_authors, type_counts, PublicationAggregator};
use crate::config::Config;
use crate::models::{
    split_list_field, FacultyListEntry, PublicationBuilder, PublicationRecord, PublicationType,
};

/// Default research area for members with no teaching field
pub const DEFAULT_AREA: &str = "Computer Science";

/// One faculty member on the publications page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacultyPublications {
    /// 1-based position in the faculty list
    pub id: u32,
    pub name: String,
    pub title: String,
    pub area: String,
    pub image: String,
    pub email: Option<String>,
    pub publications: Vec<PublicationRecord>,
}

impl FacultyPublications {
    fn from_entry(id: u32, entry: &FacultyListEntry, publications: Vec<PublicationRecord>) -> Self {
        Self {
            id,
            name: entry
                .nickname
                .clone()
                .unwrap_or_else(|| "Unknown Faculty".to_string()),
            title: entry.desig.clone().unwrap_or_else(|| "Faculty".to_string()),
            area: entry
                .school_name1
                .clone()
                .unwrap_or_else(|| DEFAULT_AREA.to_string()),
            image: entry.resolved_image(),
            email: entry.email.clone(),
            publications,
        }
    }

    pub fn publication_count(&self) -> usize {
        self.publications.len()
    }
}

/// All faculty with their publications
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PublicationDirectory {
    pub faculty: Vec<FacultyPublications>,
    /// Set when the faculty list could not be fetched and built-in data is shown
    pub error: Option<String>,
}

impl PublicationDirectory {
    /// Fetch the faculty list and every member's primary detail record
    ///
    /// Detail fetches run concurrently, each bounded by the bulk timeout. A
    /// failed fetch leaves that member with no publications. If the list
    /// itself fails, the built-in directory is returned with the error set.
    pub async fn load(source: &dyn DetailSource, config: &Config) -> Self {
        let entries = match source.list_faculty().await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!("Error fetching faculty data: {}", err);
                let mut directory = Self::fallback();
                directory.error = Some(err.to_string());
                return directory;
            }
        };

        let aggregator = PublicationAggregator::from_config(&config.publications);
        let timeout = config.timeouts.bulk_detail();

        let members = entries.iter().enumerate().map(|(index, entry)| {
            let aggregator = &aggregator;
            async move {
                let publications = match entry.email.as_deref() {
                    Some(email) if !email.trim().is_empty() => {
                        fetch_publications(source, aggregator, email, timeout).await
                    }
                    _ => Vec::new(),
                };
                FacultyPublications::from_entry(index as u32 + 1, entry, publications)
            }
        });

        let faculty = join_all(members).await;
        tracing::info!(
            "Loaded publications for {} faculty ({} total)",
            faculty.len(),
            faculty.iter().map(|f| f.publication_count()).sum::<usize>()
        );

        Self {
            faculty,
            error: None,
        }
    }

    /// Built-in sample directory shown when the faculty list is unavailable
    pub fn fallback() -> Self {
        let sample = |id: u32, title: &str, authors: &str, pub_type: PublicationType, area: &str| {
            PublicationBuilder::new(id, title)
                .authors(format_authors(Some(authors)))
                .pub_type(pub_type)
                .year(2023)
                .abstract_text("Abstract not available")
                .keywords(split_list_field(area))
                .build()
        };

        let masilamani_area = "Image Processing, Biometrics, Pattern Recognition";
        let noor_area = "High Performance Architectures, VLSI Design, High Speed Networks";

        Self {
            faculty: vec![
                FacultyPublications {
                    id: 1,
                    name: "Dr. Masilamani V".to_string(),
                    title: "Professor".to_string(),
                    area: masilamani_area.to_string(),
                    image: "/placeholder.svg?height=300&width=300".to_string(),
                    email: None,
                    publications: vec![
                        sample(
                            101,
                            "Recent Advances in Image Processing Techniques",
                            "Masilamani V, K. Patel",
                            PublicationType::Journal,
                            masilamani_area,
                        ),
                        sample(
                            102,
                            "Biometric Authentication Systems: A Survey",
                            "Masilamani V, S. Kumar",
                            PublicationType::Journal,
                            masilamani_area,
                        ),
                        sample(
                            103,
                            "Computer Vision and Image Processing: Fundamentals and Applications",
                            "Masilamani V, R. Jain",
                            PublicationType::Book,
                            masilamani_area,
                        ),
                    ],
                },
                FacultyPublications {
                    id: 2,
                    name: "Dr. Noor Mahammad".to_string(),
                    title: "Associate Professor".to_string(),
                    area: noor_area.to_string(),
                    image: "/placeholder.svg?height=300&width=300".to_string(),
                    email: None,
                    publications: vec![
                        sample(
                            201,
                            "High Performance Computing Architectures for Edge Computing",
                            "Noor Mahammad, R. Singh",
                            PublicationType::Conference,
                            noor_area,
                        ),
                        sample(
                            202,
                            "VLSI Design Optimization for IoT Devices",
                            "Noor Mahammad, P. Reddy",
                            PublicationType::Conference,
                            noor_area,
                        ),
                        sample(
                            203,
                            "Advances in Computer Architecture Design: Chapter 5 - Network-on-Chip Architectures",
                            "Noor Mahammad, J. Lee, S. Patel",
                            PublicationType::Chapter,
                            noor_area,
                        ),
                    ],
                },
            ],
            error: None,
        }
    }

    pub fn get(&self, id: u32) -> Option<&FacultyPublications> {
        self.faculty.iter().find(|f| f.id == id)
    }

    /// Faculty whose name or area contains `query`, case-insensitively
    pub fn search_faculty(&self, query: &str) -> Vec<&FacultyPublications> {
        let query = query.to_lowercase();
        self.faculty
            .iter()
            .filter(|f| {
                f.name.to_lowercase().contains(&query) || f.area.to_lowercase().contains(&query)
            })
            .collect()
    }
}

async fn fetch_publications(
    source: &dyn DetailSource,
    aggregator: &PublicationAggregator,
    email: &str,
    timeout: Duration,
) -> Vec<PublicationRecord> {
    match tokio::time::timeout(timeout, source.fetch_primary(email)).await {
        Ok(Ok(info)) => aggregator.aggregate(&info),
        Ok(Err(err)) => {
            tracing::warn!("Error fetching details for faculty {}: {}", email, err);
            Vec::new()
        }
        Err(_) => {
            tracing::warn!("Timed out fetching details for faculty {} after {:?}", email, timeout);
            Vec::new()
        }
    }
}

/// Publications matching `query` in title or authors
pub fn filter_publications<'a>(
    publications: &'a [PublicationRecord],
    query: &str,
) -> Vec<&'a PublicationRecord> {
    publications.iter().filter(|p| p.matches_query(query)).collect()
}

/// Filters of the publications page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationFilters {
    /// Selected faculty id
    pub faculty: Option<u32>,
    pub query: String,
}

/// Selection, search text and page of the publications page
#[derive(Debug, Clone)]
pub struct PublicationView {
    state: FilterState<PublicationFilters>,
    page_size: usize,
}

impl PublicationView {
    pub fn new(page_size: usize) -> Self {
        Self {
            state: FilterState::new(PublicationFilters::default()),
            page_size,
        }
    }

    pub fn select_faculty(&mut self, id: Option<u32>) {
        self.state.update(|f| f.faculty = id);
    }

    pub fn set_query(&mut self, query: &str) {
        self.state.update(|f| f.query = query.to_string());
    }

    pub fn set_page(&mut self, page: usize) {
        self.state.set_page(page);
    }

    pub fn page(&self) -> usize {
        self.state.page()
    }

    pub fn filters(&self) -> &PublicationFilters {
        self.state.filters()
    }

    /// The selected member's publications matching the query
    fn matching(&self, directory: &PublicationDirectory) -> Option<Vec<PublicationRecord>> {
        let filters = self.state.filters();
        let member = directory.get(filters.faculty?)?;
        Some(
            filter_publications(&member.publications, &filters.query)
                .into_iter()
                .cloned()
                .collect(),
        )
    }

    /// Current page of the selected member's filtered publications
    pub fn current_page(&self, directory: &PublicationDirectory) -> Option<Page<PublicationRecord>> {
        let matching = self.matching(directory)?;
        Some(paginate(&matching, self.state.page(), self.page_size))
    }

    /// Type summary for the selected member's filtered publications
    pub fn type_summary(
        &self,
        directory: &PublicationDirectory,
    ) -> Option<BTreeMap<PublicationType, usize>> {
        self.matching(directory).map(|matching| type_counts(&matching))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockDetailSource, MockResponse, Tier};
    use crate::models::FacultyDetailInfo;

    fn entry(email: Option<&str>, nickname: Option<&str>) -> FacultyListEntry {
        FacultyListEntry {
            email: email.map(String::from),
            nickname: nickname.map(String::from),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_load_aggregates_each_member() {
        let mock = MockDetailSource::new();
        mock.set_list(Ok(vec![
            entry(Some("a@x.in"), Some("Dr. A")),
            entry(Some("b@x.in"), None),
            entry(None, Some("Dr. C")),
        ]));
        mock.set_response(
            Tier::Primary,
            "a@x.in",
            MockResponse::ok(
                FacultyDetailInfo::new()
                    .with_field("pubCite3", "A Rao, B Iyer. First paper, 2020\nA Rao. Second paper, 2021"),
            ),
        );
        mock.set_response(Tier::Primary, "b@x.in", MockResponse::err(ApiError::EmptyResult));

        let directory = PublicationDirectory::load(&mock, &Config::default()).await;
        assert!(directory.error.is_none());
        assert_eq!(directory.faculty.len(), 3);

        let a = directory.get(1).unwrap();
        assert_eq!(a.name, "Dr. A");
        assert_eq!(a.title, "Faculty");
        assert_eq!(a.area, DEFAULT_AREA);
        assert_eq!(a.publication_count(), 2);

        let b = directory.get(2).unwrap();
        assert_eq!(b.name, "Unknown Faculty");
        assert!(b.publications.is_empty());

        assert!(directory.get(3).unwrap().publications.is_empty());
        assert_eq!(mock.primary_calls(), 2);
        assert_eq!(mock.backup_calls(), 0);
    }

    #[tokio::test]
    async fn test_load_falls_back_when_list_fails() {
        let mock = MockDetailSource::new();
        mock.set_list(Err(ApiError::Status(502)));

        let directory = PublicationDirectory::load(&mock, &Config::default()).await;
        assert_eq!(directory.error.as_deref(), Some("HTTP status 502"));
        assert_eq!(directory.faculty.len(), 2);
        assert_eq!(
            directory.faculty[0].publications[0].authors,
            "Masilamani V and K. Patel"
        );
        assert_eq!(
            directory.faculty[1].publications[2].authors,
            "Noor Mahammad, J. Lee, and S. Patel"
        );
    }

    #[tokio::test]
    async fn test_slow_detail_fetch_times_out() {
        let mock = MockDetailSource::new();
        mock.set_list(Ok(vec![entry(Some("slow@x.in"), Some("Dr. Slow"))]));
        mock.set_response(
            Tier::Primary,
            "slow@x.in",
            MockResponse::ok(FacultyDetailInfo::new().with_field("pubCite3", "A. Paper, 2020"))
                .delayed(Duration::from_secs(5)),
        );
        let mut config = Config::default();
        config.timeouts.bulk_detail_secs = 1;

        let directory = PublicationDirectory::load(&mock, &config).await;
        assert!(directory.faculty[0].publications.is_empty());
    }

    #[test]
    fn test_search_faculty_by_name_or_area() {
        let directory = PublicationDirectory::fallback();
        assert_eq!(directory.search_faculty("noor").len(), 1);
        assert_eq!(directory.search_faculty("biometrics").len(), 1);
        assert_eq!(directory.search_faculty("").len(), 2);
    }

    #[test]
    fn test_view_search_and_reset() {
        let directory = PublicationDirectory::fallback();
        let mut view = PublicationView::new(2);
        assert!(view.current_page(&directory).is_none());

        view.select_faculty(Some(1));
        view.set_page(2);
        let page = view.current_page(&directory).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 2);

        // search matches authors as well as titles
        view.set_query("kumar");
        assert_eq!(view.page(), 1);
        let page = view.current_page(&directory).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, 102);

        view.set_page(2);
        view.select_faculty(Some(2));
        assert_eq!(view.page(), 1);

        // "kumar" matches nothing of the second member
        assert!(view.type_summary(&directory).unwrap().is_empty());

        view.set_query("");
        let summary = view.type_summary(&directory).unwrap();
        assert_eq!(
            summary.into_iter().collect::<Vec<_>>(),
            vec![(PublicationType::Chapter, 1), (PublicationType::Conference, 2)]
        );

        view.select_faculty(Some(1));
        let summary = view.type_summary(&directory).unwrap();
        assert_eq!(
            summary.into_iter().collect::<Vec<_>>(),
            vec![(PublicationType::Book, 1), (PublicationType::Journal, 2)]
        );

        view.set_query("kumar");
        let summary = view.type_summary(&directory).unwrap();
        assert_eq!(summary.get(&PublicationType::Journal), Some(&1));
        assert_eq!(summary.values().sum::<usize>(), 1);
    }
}
