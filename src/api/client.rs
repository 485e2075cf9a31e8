//! HTTP implementation of [`DetailSource`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{ApiError, DetailSource, Tier};
use crate::config::{ApiConfig, TimeoutConfig};
use crate::models::{FacultyDetailInfo, FacultyDetailResponse, FacultyListEntry, FacultyListResponse};
use crate::utils::HttpClient;

/// Client for the department's `/api/faculty` routes
#[derive(Debug, Clone)]
pub struct FacultyApi {
    client: HttpClient,
    base_url: String,
    timeouts: TimeoutConfig,
}

impl FacultyApi {
    pub fn new(client: HttpClient, base_url: &str, timeouts: TimeoutConfig) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeouts,
        }
    }

    /// Build a client from the `[api]` and `[timeouts]` config sections
    pub fn from_config(api: &ApiConfig, timeouts: &TimeoutConfig) -> Result<Self, ApiError> {
        let client = match &api.user_agent {
            Some(agent) => HttpClient::with_user_agent(agent)?,
            None => HttpClient::new()?,
        };
        Ok(Self::new(client, &api.base_url, timeouts.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the detail record for `email` on the given tier
    pub fn detail_url(&self, tier: Tier, email: &str) -> String {
        let email = urlencoding::encode(email);
        match tier {
            Tier::Primary => format!("{}/api/faculty/{}", self.base_url, email),
            Tier::Backup => format!("{}/api/faculty/backup/{}", self.base_url, email),
        }
    }

    /// GET `url` and decode the JSON body, all within `timeout`
    async fn get_json<T: DeserializeOwned>(&self, url: &str, timeout: Duration) -> Result<T, ApiError> {
        let request = async {
            let response = self.client.client().get(url).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(ApiError::Status(status.as_u16()));
            }

            let body = response.text().await?;
            Ok(serde_json::from_str::<T>(&body)?)
        };

        tokio::time::timeout(timeout, request)
            .await
            .map_err(|_| ApiError::Timeout(timeout))?
    }

    async fn fetch_detail(&self, tier: Tier, email: &str) -> Result<FacultyDetailInfo, ApiError> {
        if email.trim().is_empty() {
            return Err(ApiError::InvalidRequest("email is empty".to_string()));
        }

        let timeout = match tier {
            Tier::Primary => self.timeouts.primary(),
            Tier::Backup => self.timeouts.backup(),
        };
        let url = self.detail_url(tier, email);
        tracing::debug!("Fetching {} detail record: {}", tier, url);

        let response: FacultyDetailResponse = self.get_json(&url, timeout).await?;
        response.into_first().ok_or(ApiError::EmptyResult)
    }
}

#[async_trait]
impl DetailSource for FacultyApi {
    async fn list_faculty(&self) -> Result<Vec<FacultyListEntry>, ApiError> {
        let url = format!("{}/api/faculty", self.base_url);
        tracing::debug!("Fetching faculty list: {}", url);

        let response: FacultyListResponse = self.get_json(&url, self.timeouts.list()).await?;
        response
            .faculty
            .ok_or_else(|| ApiError::Parse("Invalid data structure returned from API".to_string()))
    }

    async fn fetch_primary(&self, email: &str) -> Result<FacultyDetailInfo, ApiError> {
        self.fetch_detail(Tier::Primary, email).await
    }

    async fn fetch_backup(&self, email: &str) -> Result<FacultyDetailInfo, ApiError> {
        self.fetch_detail(Tier::Backup, email).await
    }
}
