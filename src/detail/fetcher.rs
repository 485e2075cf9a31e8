//! Primary → backup → local fallback chain for faculty detail records.

use std::sync::Arc;

use super::{DetailCache, DetailError};
use crate::api::{ApiError, DetailSource, Tier};
use crate::models::{FacultyDetailInfo, FacultySummary};

/// Advisory shown when the record came from the backup endpoint
pub const BACKUP_ADVISORY: &str =
    "Using cached data. Couldn't connect to the faculty details server.";

/// Advisory shown when the record was built from list data
pub const LOCAL_ADVISORY: &str = "Using local data. Couldn't connect to the faculty details server.";

/// Where a selection currently is in the fetch sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Fetching(Tier),
    /// Record from the cache, primary or backup endpoint
    Success,
    /// Record derived locally from the list row
    Fallback,
    /// No tier produced a record
    Failed,
}

/// Where the record in a [`DetailOutcome`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Cache,
    Primary,
    Backup,
    Local,
}

/// Result of one selection
#[derive(Debug, Clone, PartialEq)]
pub struct DetailOutcome {
    /// Final state, `Success` or `Fallback`
    pub state: FetchState,
    pub info: FacultyDetailInfo,
    pub origin: DataOrigin,
    /// Non-fatal note about reduced freshness
    pub advisory: Option<&'static str>,
    /// Every state visited, starting at `Idle`
    pub transitions: Vec<FetchState>,
}

/// Runs the fetch sequence for one faculty selection
#[derive(Debug, Clone)]
pub struct DetailFetcher {
    source: Arc<dyn DetailSource>,
    cache: DetailCache,
    local_fallback: bool,
}

impl DetailFetcher {
    pub fn new(source: Arc<dyn DetailSource>, cache: DetailCache) -> Self {
        Self {
            source,
            cache,
            local_fallback: true,
        }
    }

    /// Disable the locally-derived tier; exhausting both endpoints is then terminal
    pub fn without_local_fallback(mut self) -> Self {
        self.local_fallback = false;
        self
    }

    pub fn cache(&self) -> &DetailCache {
        &self.cache
    }

    /// Resolve the detail record for `faculty`
    ///
    /// A cache hit returns immediately. Otherwise the primary endpoint is
    /// tried, then the backup, then a record derived from `faculty` itself.
    /// Whatever is produced is cached under the faculty email.
    pub async fn select(&self, faculty: &FacultySummary) -> Result<DetailOutcome, DetailError> {
        let email = faculty
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(DetailError::MissingEmail)?;

        let mut transitions = vec![FetchState::Idle];

        if let Some(info) = self.cache.get(email) {
            tracing::debug!("Detail cache hit for {}", email);
            transitions.push(FetchState::Success);
            return Ok(DetailOutcome {
                state: FetchState::Success,
                info,
                origin: DataOrigin::Cache,
                advisory: None,
                transitions,
            });
        }
        tracing::debug!("Detail cache miss for {}", email);

        let mut last_error = None;
        for tier in [Tier::Primary, Tier::Backup] {
            transitions.push(FetchState::Fetching(tier));
            match self.source.fetch(tier, email).await {
                Ok(info) => {
                    tracing::info!("Loaded details for {} from {} endpoint", email, tier);
                    self.cache.insert(email, info.clone());
                    transitions.push(FetchState::Success);
                    let (origin, advisory) = match tier {
                        Tier::Primary => (DataOrigin::Primary, None),
                        Tier::Backup => (DataOrigin::Backup, Some(BACKUP_ADVISORY)),
                    };
                    return Ok(DetailOutcome {
                        state: FetchState::Success,
                        info,
                        origin,
                        advisory,
                        transitions,
                    });
                }
                Err(err) => {
                    tracing::warn!("{} detail fetch failed for {}: {}", tier, email, err);
                    let transient = err.is_transient();
                    last_error = Some(err);
                    if !transient {
                        break;
                    }
                }
            }
        }

        let last_error = last_error.unwrap_or(ApiError::EmptyResult);
        if !self.local_fallback {
            transitions.push(FetchState::Failed);
            return Err(DetailError::Exhausted(last_error));
        }

        tracing::info!("Using local data for {} after {}", email, last_error);
        let info = FacultyDetailInfo::fallback_from(faculty);
        self.cache.insert(email, info.clone());
        transitions.push(FetchState::Fallback);

        Ok(DetailOutcome {
            state: FetchState::Fallback,
            info,
            origin: DataOrigin::Local,
            advisory: Some(LOCAL_ADVISORY),
            transitions,
        })
    }
}
