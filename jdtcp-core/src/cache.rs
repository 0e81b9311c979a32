//! Resolution result cache
//!
//! Results are keyed by the project's specified name and the two mode flags.
//! Entries are never evicted on their own; whoever refreshes project metadata
//! has to invalidate the affected project.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::model::ResolvedClasspath;

/// Cache key of one resolution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CacheKey {
    pub project: String,
    pub resolve_relative: bool,
    pub runtime_classpath: bool,
}

impl CacheKey {
    pub fn new(project: impl Into<String>, resolve_relative: bool, runtime_classpath: bool) -> Self {
        Self {
            project: project.into(),
            resolve_relative,
            runtime_classpath,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.project, self.resolve_relative, self.runtime_classpath
        )
    }
}

/// Thread-safe map from [`CacheKey`] to shared results.
///
/// A poisoned lock is treated as a miss; nothing is stored through it.
#[derive(Debug, Default)]
pub struct ClasspathCache {
    entries: RwLock<HashMap<CacheKey, Arc<ResolvedClasspath>>>,
}

impl ClasspathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<ResolvedClasspath>> {
        let entries = self.entries.read().ok()?;
        let hit = entries.get(key).cloned();
        tracing::trace!(target: "jdtcp::cache", key = %key, hit = hit.is_some(), "lookup");
        hit
    }

    /// Store `classpath` unless another caller stored a result for `key`
    /// first; returns whichever result ends up cached.
    pub fn insert(&self, key: CacheKey, classpath: Arc<ResolvedClasspath>) -> Arc<ResolvedClasspath> {
        match self.entries.write() {
            Ok(mut entries) => {
                tracing::debug!(target: "jdtcp::cache", key = %key, "storing resolved classpath");
                Arc::clone(entries.entry(key).or_insert(classpath))
            }
            Err(_) => classpath,
        }
    }

    /// Drop every cached result of `project`, in all modes
    pub fn invalidate_project(&self, project: &str) -> usize {
        let Ok(mut entries) = self.entries.write() else {
            return 0;
        };
        let before = entries.len();
        entries.retain(|key, _| key.project != project);
        let removed = before - entries.len();
        tracing::debug!(target: "jdtcp::cache", project, removed, "invalidated");
        removed
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
            tracing::debug!(target: "jdtcp::cache", "cleared");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
