//! Faculty detail fetching with caching and tiered fallback.
//!
//! ```text
//! Idle ─▶ Fetching(primary) ─▶ Success
//!                │
//!                ▼
//!         Fetching(backup) ─▶ Success (advisory)
//!                │
//!                ▼
//!         Fallback (local data, advisory)
//! ```
//!
//! A cache hit goes straight from `Idle` to `Success`.

mod cache;
mod fetcher;
mod session;

pub use cache::DetailCache;
pub use fetcher::{
    DataOrigin, DetailFetcher, DetailOutcome, FetchState, BACKUP_ADVISORY, LOCAL_ADVISORY,
};
pub use session::{DetailSession, SelectionResult};

use crate::api::ApiError;

/// Terminal detail errors, shown with a retry action
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetailError {
    #[error("Faculty email not available")]
    MissingEmail,

    #[error("Failed to load faculty details: {0}")]
    Exhausted(ApiError),
}
