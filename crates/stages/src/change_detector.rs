//! Change detection over the injected version cache.
//!
//! The cache converts a "list everything on every tick" upstream into a
//! "notify only on delta" pipeline: the upstream has no cursor or
//! since-token, so comparing each issue's `updated_at` against the last
//! recorded version is the only mechanism available for suppressing duplicate
//! notifications across ticks.

use std::sync::Arc;

use tracing::{debug, warn};

use pipeline::{ChangeDecision, Issue, TriagedIssue, VersionCache};

#[cfg(test)]
#[path = "change_detector_tests.rs"]
mod tests;

/// Outcome of one change-detection evaluation.
///
/// Only [`Evaluation::Actionable`] produces downstream work; the other two
/// variants are terminal, distinguished so the tick report can count them.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// The record is a pull request. Excluded from triage by definition; the
    /// cache was not touched.
    PullRequest,
    /// Seen before at this exact version. The cache was refreshed
    /// (write-through) but nothing flows downstream.
    Unchanged,
    /// New or changed. Carries the full original payload plus the decision.
    Actionable(TriagedIssue),
}

/// Decides whether an issue is worth classifying.
pub struct ChangeDetector {
    cache: Arc<dyn VersionCache>,
}

impl ChangeDetector {
    /// Creates a detector over the given version store.
    pub fn new(cache: Arc<dyn VersionCache>) -> Self {
        Self { cache }
    }

    /// Evaluates one issue against the version cache.
    ///
    /// The issue is taken by value and handed back unmodified inside
    /// [`Evaluation::Actionable`]: the payload the classifier sees is exactly
    /// the payload that entered the lookup.
    ///
    /// The cache write happens on every evaluation regardless of outcome
    /// (write-through), which keeps stale entries self-healing without a
    /// maintenance pass. An unavailable cache is treated as cold — the issue
    /// is classified as new rather than dropped, degrading to extra
    /// notifications, never missed ones.
    pub async fn evaluate(&self, issue: Issue) -> Evaluation {
        if issue.is_pull_request() {
            debug!(issue = %issue.number, "pull request, excluded from triage");
            return Evaluation::PullRequest;
        }

        let decision = match self.cache.record(issue.number, issue.updated_at).await {
            Ok(previous) => ChangeDecision::derive(previous, issue.updated_at),
            Err(error) => {
                warn!(issue = %issue.number, %error, "version cache unavailable, evaluating cold");
                ChangeDecision::New
            }
        };

        if !decision.is_actionable() {
            debug!(issue = %issue.number, "unchanged since last sighting");
            return Evaluation::Unchanged;
        }

        debug!(issue = %issue.number, %decision, "issue admitted for classification");
        Evaluation::Actionable(TriagedIssue { issue, decision })
    }
}
