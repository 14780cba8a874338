//! Kind-marker classification.
//!
//! An issue body may carry an informal classification signal of the form
//! `/kind <word>`. The classifier extracts it, resolves it through the
//! taxonomy, and suppresses the result when the label is already present —
//! the primary defense against duplicate label additions under at-least-once
//! delivery.

use regex::Regex;
use tracing::debug;

use pipeline::{AddLabelRequest, LabelEvent, TriagedIssue};

use crate::taxonomy::Taxonomy;

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;

/// Marker grammar: `/kind` followed by one or more spaces and an ASCII
/// alphabetic word, matched case-insensitively; first match wins.
const KIND_MARKER: &str = r"(?i)/kind[ ]+([a-zA-Z]+)";

/// Maps a triaged issue to zero or one label request.
pub struct Classifier {
    taxonomy: Taxonomy,
    kind_marker: Regex,
}

impl Classifier {
    /// Creates a classifier over the given taxonomy.
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            taxonomy,
            // The grammar is a fixed literal; compilation cannot fail.
            kind_marker: Regex::new(KIND_MARKER).expect("kind marker pattern is valid"),
        }
    }

    /// Classifies one triaged issue.
    ///
    /// Every early exit is a [`LabelEvent::NoOp`]: an empty body, a missing
    /// or unrecognised kind, or a label that is already applied. Submitting
    /// the same issue any number of times yields the same event.
    pub fn classify(&self, triaged: &TriagedIssue) -> LabelEvent {
        let issue = &triaged.issue;

        let Some(body) = issue.body.as_deref().filter(|b| !b.is_empty()) else {
            return LabelEvent::NoOp;
        };

        let Some(kind) = self
            .kind_marker
            .captures(body)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_ascii_lowercase())
        else {
            return LabelEvent::NoOp;
        };

        let Some(label) = self.taxonomy.resolve(&kind) else {
            debug!(issue = %issue.number, kind = %kind, "kind not in taxonomy");
            return LabelEvent::NoOp;
        };

        if issue.has_label(&label) {
            debug!(issue = %issue.number, label = %label, "label already present");
            return LabelEvent::NoOp;
        }

        debug!(issue = %issue.number, label = %label, "label request produced");
        LabelEvent::Request(AddLabelRequest {
            url: issue.repository_url.clone(),
            number: issue.number,
            label,
        })
    }
}
