//! Integration tests for the CS department data layer
//!
//! These run the HTTP client against local mock servers and drive the
//! detail fallback chain, publication aggregation and listing views end to end.

use async_trait::async_trait;
use cs_department::api::{ApiError, DetailSource, FacultyApi, Tier};
use cs_department::config::{Config, TimeoutConfig};
use cs_department::detail::{
    DataOrigin, DetailCache, DetailFetcher, FetchState, BACKUP_ADVISORY, LOCAL_ADVISORY,
};
use cs_department::models::{
    FacultyDetailInfo, FacultyListEntry, FacultySummary, PublicationBuilder, PublicationType,
};
use cs_department::utils::HttpClient;
use cs_department::views::{FacultyPublications, PublicationDirectory, PublicationView};
use cs_department::PublicationAggregator;
use std::sync::Arc;
use std::time::Duration;

const EMAIL: &str = "masila@iiitdm.ac.in";
const PRIMARY_PATH: &str = "/api/faculty/masila%40iiitdm.ac.in";
const BACKUP_PATH: &str = "/api/faculty/backup/masila%40iiitdm.ac.in";

fn api(base_url: &str) -> FacultyApi {
    let timeouts = TimeoutConfig {
        primary_secs: 1,
        backup_secs: 2,
        list_secs: 2,
        bulk_detail_secs: 2,
    };
    FacultyApi::new(HttpClient::new().unwrap(), base_url, timeouts)
}

fn summary() -> FacultySummary {
    let mut faculty = FacultySummary::new(1, "Dr. Masilamani V", Some(EMAIL.to_string()));
    faculty.position = "Professor".to_string();
    faculty.interests = vec!["Image Processing".to_string()];
    faculty
}

/// Accepts connections and never answers, so every request to it times out
async fn unresponsive_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

/// Primary and backup tiers served by different hosts
#[derive(Debug)]
struct SplitSource {
    primary: FacultyApi,
    backup: FacultyApi,
}

#[async_trait]
impl DetailSource for SplitSource {
    async fn list_faculty(&self) -> Result<Vec<FacultyListEntry>, ApiError> {
        self.primary.list_faculty().await
    }

    async fn fetch_primary(&self, email: &str) -> Result<FacultyDetailInfo, ApiError> {
        self.primary.fetch_primary(email).await
    }

    async fn fetch_backup(&self, email: &str) -> Result<FacultyDetailInfo, ApiError> {
        self.backup.fetch_backup(email).await
    }
}

#[tokio::test]
async fn test_primary_timeout_falls_back_to_backup_and_caches() {
    let mut backup_server = mockito::Server::new_async().await;
    let backup = backup_server
        .mock("GET", BACKUP_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":true,"facinfo":[{"email":"masila@iiitdm.ac.in","nickname":"Dr. Masilamani V"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let primary_url = unresponsive_server().await;
    let source = SplitSource {
        primary: api(&primary_url),
        backup: api(&backup_server.url()),
    };

    // primary request times out on its own
    assert_eq!(
        source.fetch_primary(EMAIL).await,
        Err(ApiError::Timeout(Duration::from_secs(1)))
    );

    let fetcher = DetailFetcher::new(Arc::new(source), DetailCache::new());

    let outcome = fetcher.select(&summary()).await.unwrap();
    assert_eq!(outcome.state, FetchState::Success);
    assert_eq!(outcome.origin, DataOrigin::Backup);
    assert_eq!(outcome.advisory, Some(BACKUP_ADVISORY));
    assert_eq!(
        outcome.transitions,
        vec![
            FetchState::Idle,
            FetchState::Fetching(Tier::Primary),
            FetchState::Fetching(Tier::Backup),
            FetchState::Success,
        ]
    );
    assert_eq!(outcome.info.name(), Some("Dr. Masilamani V"));
    assert!(fetcher.cache().contains(EMAIL));

    // served from the cache without touching the network again
    let again = fetcher.select(&summary()).await.unwrap();
    assert_eq!(again.state, FetchState::Success);
    assert_eq!(again.origin, DataOrigin::Cache);
    assert_eq!(again.advisory, None);
    backup.assert_async().await;
}

#[tokio::test]
async fn test_both_endpoints_down_uses_local_data() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", PRIMARY_PATH)
        .with_status(500)
        .create_async()
        .await;
    server
        .mock("GET", BACKUP_PATH)
        .with_status(503)
        .create_async()
        .await;

    let fetcher = DetailFetcher::new(Arc::new(api(&server.url())), DetailCache::new());
    let outcome = fetcher.select(&summary()).await.unwrap();

    assert_eq!(outcome.state, FetchState::Fallback);
    assert_eq!(outcome.origin, DataOrigin::Local);
    assert_eq!(outcome.advisory, Some(LOCAL_ADVISORY));
    assert_eq!(outcome.info.name(), Some("Dr. Masilamani V"));
    assert_eq!(outcome.info.research_interest(), Some("Image Processing"));
}

#[tokio::test]
async fn test_fetched_citations_aggregate_into_publications() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", PRIMARY_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "status": true,
                "facinfo": [{
                    "email": EMAIL,
                    "nickname": "Dr. Masilamani V",
                    "schoolName1": "Image Processing, Biometrics",
                    "pubCite3": "Masilamani V, K. Patel, Image Processing Handbook, Springer Press, 2021, https://doi.org/10.1/xyz",
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let info = api(&server.url()).fetch_primary(EMAIL).await.unwrap();
    let publications = PublicationAggregator::default().aggregate(&info);

    assert_eq!(publications.len(), 1);
    let book = &publications[0];
    assert_eq!(book.id, 0);
    assert_eq!(book.authors, "Masilamani V and K. Patel");
    assert_eq!(book.pub_type, PublicationType::Book);
    assert_eq!(book.year, 2021);
    assert_eq!(book.doi, "10.1/xyz");
    assert_eq!(book.keywords, vec!["Image Processing", "Biometrics"]);
}

#[tokio::test]
async fn test_directory_load_from_server() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/faculty")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"faculty":[
                {"email":"masila@iiitdm.ac.in","nickname":"Dr. Masilamani V","desig":"Professor","pic":"masila.jpg"},
                {"nickname":"Dr. No Email","desig":"Assistant Professor"}
            ]}"#,
        )
        .create_async()
        .await;
    server
        .mock("GET", PRIMARY_PATH)
        .with_status(200)
        .with_body(r#"{"status":true,"facinfo":[{"pubCite3":"Masilamani V, S. Kumar. Biometric authentication, IEEE Transactions on Information Forensics, 2020"}]}"#)
        .create_async()
        .await;

    let api = api(&server.url());
    let directory = PublicationDirectory::load(&api, &Config::default()).await;
    assert!(directory.error.is_none());
    assert_eq!(directory.faculty.len(), 2);
    assert_eq!(directory.faculty[0].id, 1);
    assert_eq!(directory.faculty[0].publication_count(), 1);
    assert_eq!(directory.faculty[0].publications[0].pub_type, PublicationType::Journal);
    assert_eq!(directory.faculty[1].publication_count(), 0);
}

#[test]
fn test_last_page_of_publications() {
    let publications = (0..23)
        .map(|i| PublicationBuilder::new(i, format!("Paper {}", i)).build())
        .collect();
    let directory = PublicationDirectory {
        faculty: vec![FacultyPublications {
            id: 7,
            name: "Dr. Noor Mahammad".to_string(),
            title: "Associate Professor".to_string(),
            area: "VLSI".to_string(),
            image: String::new(),
            email: None,
            publications,
        }],
        error: None,
    };

    let mut view = PublicationView::new(9);
    view.select_faculty(Some(7));
    view.set_page(3);

    let page = view.current_page(&directory).unwrap();
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.items[0].id, 18);

    // a new search goes back to the first page
    view.set_query("paper 1");
    assert_eq!(view.page(), 1);
    let page = view.current_page(&directory).unwrap();
    // "Paper 1" and "Paper 10".."Paper 19"
    assert_eq!(page.total_items, 11);
    assert_eq!(page.total_pages, 2);
}
