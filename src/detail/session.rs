//! Selection state for the faculty detail view.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{DetailError, DetailFetcher, DetailOutcome};
use crate::models::FacultySummary;

/// What a selection or retry produced
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionResult {
    Loaded(DetailOutcome),
    Failed(DetailError),
    /// The view was closed or another selection started while fetching
    Discarded,
}

#[derive(Debug, Default)]
struct SessionState {
    generation: u64,
    selected: Option<FacultySummary>,
    retry_count: u32,
    result: Option<Result<DetailOutcome, DetailError>>,
}

/// Tracks the open detail view: current faculty, last result and retries
///
/// Results that arrive after [`close`](Self::close) or after a newer
/// selection are dropped rather than shown.
#[derive(Debug)]
pub struct DetailSession {
    fetcher: DetailFetcher,
    max_retries: u32,
    state: Mutex<SessionState>,
}

impl DetailSession {
    pub fn new(fetcher: DetailFetcher, max_retries: u32) -> Self {
        Self {
            fetcher,
            max_retries,
            state: Mutex::new(SessionState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open the detail view for `faculty` and fetch its record
    pub async fn select(&self, faculty: FacultySummary) -> SelectionResult {
        let generation = {
            let mut state = self.state();
            state.generation += 1;
            state.selected = Some(faculty.clone());
            state.retry_count = 0;
            state.result = None;
            state.generation
        };
        self.run(generation, faculty).await
    }

    /// Re-run the whole fetch sequence for the current selection
    ///
    /// Returns `None` when retrying is not offered, see [`can_retry`](Self::can_retry).
    pub async fn retry(&self) -> Option<SelectionResult> {
        let (generation, faculty) = {
            let mut state = self.state();
            if !Self::retry_available(&state, self.max_retries) {
                return None;
            }
            let faculty = state.selected.clone()?;
            state.retry_count += 1;
            state.generation += 1;
            state.result = None;
            (state.generation, faculty)
        };
        tracing::info!(
            "Retrying detail fetch for {} ({}/{})",
            faculty.name,
            self.retry_count(),
            self.max_retries
        );
        Some(self.run(generation, faculty).await)
    }

    /// Whether the retry action should be shown
    ///
    /// Only after a terminal error, and only `max_retries` times per selection.
    pub fn can_retry(&self) -> bool {
        Self::retry_available(&self.state(), self.max_retries)
    }

    fn retry_available(state: &SessionState, max_retries: u32) -> bool {
        state.selected.is_some()
            && matches!(state.result, Some(Err(_)))
            && state.retry_count < max_retries
    }

    pub fn retry_count(&self) -> u32 {
        self.state().retry_count
    }

    /// Close the detail view; in-flight results for it will be discarded
    pub fn close(&self) {
        let mut state = self.state();
        state.generation += 1;
        state.selected = None;
        state.retry_count = 0;
        state.result = None;
    }

    pub fn selected(&self) -> Option<FacultySummary> {
        self.state().selected.clone()
    }

    /// Last result delivered for the current selection
    pub fn result(&self) -> Option<Result<DetailOutcome, DetailError>> {
        self.state().result.clone()
    }

    async fn run(&self, generation: u64, faculty: FacultySummary) -> SelectionResult {
        let result = self.fetcher.select(&faculty).await;

        let mut state = self.state();
        if state.generation != generation {
            tracing::debug!("Discarding stale detail result for {}", faculty.name);
            return SelectionResult::Discarded;
        }
        state.result = Some(result.clone());
        match result {
            Ok(outcome) => SelectionResult::Loaded(outcome),
            Err(err) => SelectionResult::Failed(err),
        }
    }
}
