//! Session-scoped detail record cache.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::models::FacultyDetailInfo;

/// Detail records keyed by faculty email
///
/// Clones share the same storage. Entries are never evicted; drop every
/// clone to end the session.
#[derive(Debug, Clone, Default)]
pub struct DetailCache {
    entries: Arc<RwLock<HashMap<String, FacultyDetailInfo>>>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, email: &str) -> Option<FacultyDetailInfo> {
        let guard = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(email).cloned()
    }

    pub fn insert(&self, email: impl Into<String>, info: FacultyDetailInfo) {
        let mut guard = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(email.into(), info);
    }

    pub fn contains(&self, email: &str) -> bool {
        let guard = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        guard.contains_key(email)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
