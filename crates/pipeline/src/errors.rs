//! Per-boundary error types for the triage pipeline.
//!
//! Each external boundary gets its own error type so callers can state
//! exactly what can go wrong at that seam and handle nothing more:
//!
//! - [`FetchError`] — the upstream issue-list fetch. Logged, tick skipped;
//!   the next scheduled tick is the retry mechanism.
//! - [`CacheError`] — the version cache. Never fatal: an unavailable cache is
//!   treated as cold, degrading to extra notifications, never missed ones.
//! - [`ApplyError`] — the remote label mutation. Converted to a failure
//!   outcome at the applier boundary, never propagated further.
//!
//! None of these errors is allowed to halt the poller process.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Upstream issue list
// ---------------------------------------------------------------------------

/// The upstream issue list could not be fetched or understood.
///
/// A tick that hits any of these forwards no partial results.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum FetchError {
    /// The request never produced a response (connect, DNS, timeout).
    #[error("issue list request failed in transport: {reason}")]
    Transport {
        /// Description of the transport failure.
        reason: String,
    },

    /// The endpoint answered with a non-success status.
    #[error("issue list request returned status {status}")]
    Status {
        /// The HTTP status code received.
        status: u16,
    },

    /// The response body did not parse as a JSON issue array.
    #[error("issue list payload is malformed: {reason}")]
    Malformed {
        /// Description of the parse failure.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Version cache
// ---------------------------------------------------------------------------

/// The version cache could not serve a lookup or write.
///
/// The in-memory store never produces this; it exists for cache backends with
/// a failure mode of their own (an external cache service). Change detection
/// maps it to a cold-cache evaluation.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum CacheError {
    /// The cache backend is unreachable or refused the operation.
    #[error("version cache unavailable: {reason}")]
    Unavailable {
        /// Description of the cache failure.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Remote label mutation
// ---------------------------------------------------------------------------

/// The single label-mutation attempt failed.
///
/// There is exactly one attempt per request; no internal retry.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum ApplyError {
    /// The request never produced a response (connect, DNS, timeout).
    #[error("label request failed in transport: {reason}")]
    Transport {
        /// Description of the transport failure.
        reason: String,
    },

    /// The endpoint answered with a non-success status (auth, missing issue,
    /// server error — all terminal).
    #[error("label request returned status {status}")]
    Status {
        /// The HTTP status code received.
        status: u16,
    },
}
