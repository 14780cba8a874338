//! Label application.

use std::sync::Arc;

use tracing::{info, warn};

use pipeline::{AddLabelRequest, IssueTracker, LabelResult};

#[cfg(test)]
#[path = "applier_tests.rs"]
mod tests;

/// Performs the remote label mutation and reports a terminal outcome.
///
/// Exactly one attempt per request; the next upstream change to the issue is
/// the only retry mechanism. Failures are captured and reported, never
/// propagated — one issue's failed application must not stall the rest of
/// the tick.
pub struct Applier {
    tracker: Arc<dyn IssueTracker>,
}

impl Applier {
    /// Creates an applier over the given tracker.
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self { tracker }
    }

    /// Applies one label request. Always produces a [`LabelResult`].
    pub async fn apply(&self, request: &AddLabelRequest) -> LabelResult {
        match self.tracker.add_label(request).await {
            Ok(()) => {
                let message = format!(
                    "inclusion of label '{}' on issue #{} of repository {} was a SUCCESS",
                    request.label, request.number, request.url
                );
                info!(issue = %request.number, label = %request.label, "label applied");
                LabelResult::Success { message }
            }
            Err(error) => {
                let message = format!(
                    "inclusion of label '{}' on issue #{} of repository {} was a FAILURE: {}",
                    request.label, request.number, request.url, error
                );
                warn!(issue = %request.number, label = %request.label, %error, "label application failed");
                LabelResult::Failure { message }
            }
        }
    }
}
