//! Faculty profile API access.
//!
//! The [`DetailSource`] trait covers the three endpoints the site reads:
//!
//! - `GET /api/faculty` - the faculty list
//! - `GET /api/faculty/:email` - primary detail record
//! - `GET /api/faculty/backup/:email` - backup detail record
//!
//! [`FacultyApi`] talks to a live server; [`MockDetailSource`] serves
//! scripted responses for tests and offline runs.

mod client;
mod mock;

pub use client::FacultyApi;
pub use mock::{MockDetailSource, MockResponse};

use async_trait::async_trait;

use crate::models::{FacultyDetailInfo, FacultyListEntry};

/// Which detail endpoint a record was fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Primary,
    Backup,
}

impl Tier {
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Primary => "primary",
            Tier::Backup => "backup",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of faculty list rows and detail records
#[async_trait]
pub trait DetailSource: Send + Sync + std::fmt::Debug {
    /// Fetch the faculty list
    async fn list_faculty(&self) -> Result<Vec<FacultyListEntry>, ApiError>;

    /// Fetch a detail record from the primary endpoint
    async fn fetch_primary(&self, email: &str) -> Result<FacultyDetailInfo, ApiError>;

    /// Fetch a detail record from the backup endpoint
    async fn fetch_backup(&self, email: &str) -> Result<FacultyDetailInfo, ApiError>;

    /// Fetch from the given tier
    async fn fetch(&self, tier: Tier, email: &str) -> Result<FacultyDetailInfo, ApiError> {
        match tier {
            Tier::Primary => self.fetch_primary(email).await,
            Tier::Backup => self.fetch_backup(email).await,
        }
    }
}

/// Errors that can occur when talking to the faculty profile API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Connection or transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not complete within its deadline
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Non-2xx response
    #[error("HTTP status {0}")]
    Status(u16),

    /// Body was not the expected JSON shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// 200 OK but `status` was not true or `facinfo` was empty
    #[error("Empty result")]
    EmptyResult,

    /// The request could not be built, e.g. a blank email
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Whether the next fallback tier should be tried
    ///
    /// Transport failures and logically empty payloads are both transient;
    /// only a malformed request is not.
    pub fn is_transient(&self) -> bool {
        !matches!(self, ApiError::InvalidRequest(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ApiError::Status(status.as_u16())
        } else if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(format!("JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_transient_classification() {
        assert!(ApiError::Network("reset".into()).is_transient());
        assert!(ApiError::Timeout(Duration::from_secs(5)).is_transient());
        assert!(ApiError::Status(503).is_transient());
        assert!(ApiError::Parse("bad".into()).is_transient());
        assert!(ApiError::EmptyResult.is_transient());
        assert!(!ApiError::InvalidRequest("blank email".into()).is_transient());
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Parse(_)));
    }
}
