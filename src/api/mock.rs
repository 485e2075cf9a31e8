//! Scripted [`DetailSource`] for tests and offline runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::{ApiError, DetailSource, Tier};
use crate::models::{FacultyDetailInfo, FacultyListEntry};

/// One scripted detail response
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub result: Result<FacultyDetailInfo, ApiError>,
    pub delay: Option<Duration>,
}

impl MockResponse {
    pub fn ok(info: FacultyDetailInfo) -> Self {
        Self {
            result: Ok(info),
            delay: None,
        }
    }

    pub fn err(error: ApiError) -> Self {
        Self {
            result: Err(error),
            delay: None,
        }
    }

    /// Respond only after `delay`
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A mock source that returns predefined responses
///
/// Emails without a scripted response get `ApiError::Status(404)`.
#[derive(Debug)]
pub struct MockDetailSource {
    list: Mutex<Result<Vec<FacultyListEntry>, ApiError>>,
    primary: Mutex<HashMap<String, MockResponse>>,
    backup: Mutex<HashMap<String, MockResponse>>,
    list_calls: AtomicUsize,
    primary_calls: AtomicUsize,
    backup_calls: AtomicUsize,
}

impl Default for MockDetailSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDetailSource {
    pub fn new() -> Self {
        Self {
            list: Mutex::new(Ok(Vec::new())),
            primary: Mutex::new(HashMap::new()),
            backup: Mutex::new(HashMap::new()),
            list_calls: AtomicUsize::new(0),
            primary_calls: AtomicUsize::new(0),
            backup_calls: AtomicUsize::new(0),
        }
    }

    /// Set the faculty list response
    pub fn set_list(&self, result: Result<Vec<FacultyListEntry>, ApiError>) {
        *self.list.lock().unwrap() = result;
    }

    /// Script the response for `email` on one tier
    pub fn set_response(&self, tier: Tier, email: &str, response: MockResponse) {
        let map = match tier {
            Tier::Primary => &self.primary,
            Tier::Backup => &self.backup,
        };
        map.lock().unwrap().insert(email.to_string(), response);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn primary_calls(&self) -> usize {
        self.primary_calls.load(Ordering::SeqCst)
    }

    pub fn backup_calls(&self) -> usize {
        self.backup_calls.load(Ordering::SeqCst)
    }

    async fn respond(
        map: &Mutex<HashMap<String, MockResponse>>,
        email: &str,
    ) -> Result<FacultyDetailInfo, ApiError> {
        let scripted = map.lock().unwrap().get(email).cloned();
        let Some(response) = scripted else {
            return Err(ApiError::Status(404));
        };
        if let Some(delay) = response.delay {
            tokio::time::sleep(delay).await;
        }
        response.result
    }
}

#[async_trait]
impl DetailSource for MockDetailSource {
    async fn list_faculty(&self) -> Result<Vec<FacultyListEntry>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.list.lock().unwrap().clone()
    }

    async fn fetch_primary(&self, email: &str) -> Result<FacultyDetailInfo, ApiError> {
        self.primary_calls.fetch_add(1, Ordering::SeqCst);
        Self::respond(&self.primary, email).await
    }

    async fn fetch_backup(&self, email: &str) -> Result<FacultyDetailInfo, ApiError> {
        self.backup_calls.fetch_add(1, Ordering::SeqCst);
        Self::respond(&self.backup, email).await
    }
}
