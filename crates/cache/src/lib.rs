//! issue_warden in-memory version store.
//!
//! Implements the [`pipeline::VersionCache`] port over a concurrent map. The
//! store is an explicitly-owned handle injected into the change detector —
//! never a process-wide singleton — so every test gets a fresh, deterministic
//! instance.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. It supplies
//! the per-key atomic record operation the detector relies on; what a
//! recorded version *means* is the [`pipeline`] crate's business.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use pipeline::{CacheError, IssueNumber, Timestamp, VersionCache};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// A process-local version store backed by [`DashMap`].
///
/// `record` maps onto the map's per-key atomic insert, so concurrent
/// evaluations of different issues never interfere and concurrent evaluations
/// of the same issue resolve to last-writer-wins — both exactly the
/// guarantees the port asks for. Entries live for the process lifetime;
/// losing them (restart) only re-classifies issues as new on their next
/// sighting.
pub struct InMemoryVersionCache {
    /// Namespace label, used to tell instances apart in logs.
    namespace: String,
    entries: DashMap<IssueNumber, Timestamp>,
}

impl InMemoryVersionCache {
    /// Creates an empty store under the given namespace.
    pub fn new(namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        debug!(namespace = %namespace, "version cache ready");
        Self {
            namespace,
            entries: DashMap::new(),
        }
    }

    /// Returns the namespace label this instance was created with.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the number of issues currently tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no issue has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl VersionCache for InMemoryVersionCache {
    async fn record(
        &self,
        number: IssueNumber,
        updated_at: Timestamp,
    ) -> Result<Option<Timestamp>, CacheError> {
        Ok(self.entries.insert(number, updated_at))
    }
}
