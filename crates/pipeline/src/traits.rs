//! Port traits implemented by infrastructure crates.
//!
//! The domain defines *what* it needs from the outside world; the `github`
//! and `cache` crates supply *how*. Everything is injected by handle — there
//! are no hidden singletons, so tests substitute fresh in-memory
//! implementations per case.

use async_trait::async_trait;

use crate::{AddLabelRequest, ApplyError, CacheError, FetchError, Issue, IssueNumber, Timestamp};

/// Lists the current state of the upstream issue tracker.
///
/// One call per poll tick. The upstream has no cursor or since-token; every
/// call returns the full current list and change detection suppresses the
/// duplicates.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Fetches the current issue list.
    ///
    /// Returns every item the upstream reports, pull requests included; the
    /// change detector filters those out.
    async fn list_issues(&self) -> Result<Vec<Issue>, FetchError>;
}

/// Mutates the remote issue tracker's label collection.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Adds the requested label to the target issue.
    ///
    /// Implementations make exactly one attempt. The remote API returns
    /// success on repeat application of an already-present label, which is
    /// what makes at-least-once delivery safe here.
    async fn add_label(&self, request: &AddLabelRequest) -> Result<(), ApplyError>;
}

/// The key→version store backing change detection.
///
/// Holds at most one version per issue number. Purely a debouncer over a
/// stateless poll, not a durable store: losing an entry degrades to
/// re-treating that issue as new on its next sighting.
#[async_trait]
pub trait VersionCache: Send + Sync {
    /// Records `updated_at` as the last seen version for `number` and returns
    /// the previously recorded version, if any.
    ///
    /// This is the write-through evaluation: lookup and unconditional update
    /// are one operation, and implementations must make it atomic per key so
    /// overlapping ticks cannot corrupt other entries. Lost updates across
    /// overlapping ticks for the *same* issue are acceptable; the next tick
    /// re-observes the latest state.
    async fn record(
        &self,
        number: IssueNumber,
        updated_at: Timestamp,
    ) -> Result<Option<Timestamp>, CacheError>;
}
