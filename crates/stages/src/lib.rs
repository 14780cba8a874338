//! issue_warden per-issue pipeline stages.
//!
//! This crate provides the three stages one issue moves through after it is
//! fetched: change detection, kind classification, and label application.
//! The poller invokes them in order; each stage is independent per issue and
//! shares no mutable state with its peers beyond the injected version cache.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Stages sequence calls between the domain types in
//! the [`pipeline`] crate and the infrastructure ports. Each stage is a small
//! struct with its collaborators injected at construction, so tests
//! substitute fresh in-memory implementations per case.

pub mod applier;
pub mod change_detector;
pub mod classifier;
pub mod taxonomy;

pub use applier::Applier;
pub use change_detector::{ChangeDetector, Evaluation};
pub use classifier::Classifier;
pub use taxonomy::Taxonomy;
