//! Shared value types for the triage pipeline domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! meaningful values with invariants (e.g. a [`TriagedIssue`] only exists for
//! decisions that warrant downstream work) and participate in domain
//! computations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{IssueNumber, LabelName, RepositoryUrl};

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly. This is the version value held by the cache: change detection
/// compares the observed `updated_at` of an issue against the last recorded
/// [`Timestamp`] for equality, nothing more.
///
/// Wire form is RFC 3339, matching GitHub's `updated_at` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

// ---------------------------------------------------------------------------
// Issues (upstream wire form)
// ---------------------------------------------------------------------------

/// A label attached to an issue, as reported by the issue list endpoint.
///
/// The wire form carries more fields (color, description, ...); only the name
/// participates in triage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The name of the label.
    pub name: String,
}

/// The pull-request reference present on issue records that are really pull
/// requests.
///
/// GitHub's issue list endpoint returns pull requests alongside issues; the
/// presence of this object (with a non-null `url`) is the discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRef {
    /// The API URL of the pull request.
    #[serde(default)]
    pub url: Option<String>,
}

/// One issue-tracker item, in the snake_case wire shape of the upstream list
/// endpoint.
///
/// Immutable once fetched: produced by the poller, consumed read-only by every
/// downstream stage. The change detector threads the whole value through the
/// cache round trip, so the issue observed by the classifier is exactly the
/// issue that was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// API URL of the repository this issue belongs to.
    pub repository_url: RepositoryUrl,

    /// Issue number within the repository.
    pub number: IssueNumber,

    /// Issue title.
    #[serde(default)]
    pub title: String,

    /// Issue body. Absent or empty bodies carry no kind marker.
    #[serde(default)]
    pub body: Option<String>,

    /// Last-modified timestamp; the version value for change detection.
    pub updated_at: Timestamp,

    /// Labels currently applied to the issue.
    #[serde(default)]
    pub labels: Vec<Label>,

    /// Present (with a url) when this record is a pull request.
    #[serde(default)]
    pub pull_request: Option<PullRequestRef>,
}

impl Issue {
    /// Returns `true` if this record represents a pull request.
    ///
    /// Pull requests are excluded from triage by definition; they never reach
    /// the version cache or the classifier.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request
            .as_ref()
            .is_some_and(|r| r.url.is_some())
    }

    /// Returns `true` if `label` is already present on this issue's label set.
    pub fn has_label(&self, label: &LabelName) -> bool {
        self.labels.iter().any(|l| l.name == label.as_str())
    }
}

// ---------------------------------------------------------------------------
// Change detection
// ---------------------------------------------------------------------------

/// The outcome of comparing an issue's observed version against the cache.
///
/// Derived per evaluation, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDecision {
    /// The issue has not been seen before (or the cache entry was lost).
    New,
    /// The issue was seen before with a different `updated_at`.
    Changed,
    /// The issue was seen before with an identical `updated_at`.
    Unchanged,
}

impl ChangeDecision {
    /// Derives the decision from the previously cached version, if any.
    pub fn derive(previous: Option<Timestamp>, current: Timestamp) -> Self {
        match previous {
            None => Self::New,
            Some(seen) if seen == current => Self::Unchanged,
            Some(_) => Self::Changed,
        }
    }

    /// Returns `true` for decisions that warrant downstream classification.
    pub fn is_actionable(self) -> bool {
        matches!(self, Self::New | Self::Changed)
    }
}

impl std::fmt::Display for ChangeDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Changed => write!(f, "changed"),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// An issue that passed change detection, paired with the decision that let
/// it through.
///
/// Invariant: `decision` is always actionable ([`ChangeDecision::New`] or
/// [`ChangeDecision::Changed`]); unchanged issues terminate inside the
/// detector and never materialise as a [`TriagedIssue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriagedIssue {
    /// The full original issue payload, unmodified by the cache round trip.
    pub issue: Issue,
    /// Why the issue was let through.
    pub decision: ChangeDecision,
}

// ---------------------------------------------------------------------------
// Label application
// ---------------------------------------------------------------------------

/// A request to add one label to one issue.
///
/// Only ever constructed when change detection returned an actionable decision
/// **and** the resolved label is absent from the issue's current label set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLabelRequest {
    /// Repository API URL the mutation endpoint is derived from.
    pub url: RepositoryUrl,
    /// Target issue number.
    pub number: IssueNumber,
    /// The label to add.
    pub label: LabelName,
}

impl std::fmt::Display for AddLabelRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "add '{}' to issue #{} of {}",
            self.label, self.number, self.url
        )
    }
}

/// The classifier's verdict for one triaged issue.
///
/// Consumers match exhaustively; [`LabelEvent::NoOp`] is a valid terminal
/// outcome (no marker, unknown kind, or label already present), not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum LabelEvent {
    /// Nothing to do for this issue.
    NoOp,
    /// A label should be applied.
    Request(AddLabelRequest),
}

impl LabelEvent {
    /// Returns `true` if this event carries no work.
    pub fn is_no_op(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}

/// Terminal outcome of one label application attempt.
///
/// Always produced by the applier, never suppressed. The message is
/// human-readable and safe to log; failure causes are captured at the point
/// of failure, not propagated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LabelResult {
    /// The remote tracker accepted the label.
    Success {
        /// Human-readable description of what was applied.
        message: String,
    },
    /// The single attempt failed (transport, auth, or non-2xx response).
    Failure {
        /// Human-readable description of what failed.
        message: String,
    },
}

impl LabelResult {
    /// Returns `true` for [`LabelResult::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the outcome message.
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message } | Self::Failure { message } => message,
        }
    }
}
