//! Environment-driven runtime configuration.
//!
//! The core crates only ever receive constructed values; everything injected
//! from the outside is read and validated here, once, at startup. The process
//! never starts with an invalid configuration.

use std::time::Duration;

use thiserror::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Default API base used when only org/repo are configured.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default poll period in seconds.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Default version-cache namespace.
const DEFAULT_CACHE_NAMESPACE: &str = "issues";

/// The configuration could not be assembled from the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is absent.
    #[error("missing required environment variable {name}")]
    MissingVariable {
        /// The variable that was not set.
        name: &'static str,
    },

    /// A variable is present but unusable.
    #[error("invalid value for {name}: {reason}")]
    InvalidValue {
        /// The variable that failed validation.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

/// Validated runtime configuration.
///
/// | Variable | Meaning | Default |
/// |----------|---------|---------|
/// | `GITHUB_TOKEN` | API credential (never logged) | required |
/// | `GITHUB_ORG` / `GITHUB_REPO` | Repository to poll | required unless `ISSUES_URL` is set |
/// | `ISSUES_URL` | Full override of the issue-list URL | derived |
/// | `GITHUB_API_BASE` | API base for the derived URL | `https://api.github.com` |
/// | `POLL_INTERVAL_SECS` | Poll period | `30` |
/// | `CACHE_NAMESPACE` | Version-cache namespace label | `issues` |
#[derive(Debug, Clone)]
pub struct Config {
    /// API credential for both the list fetch and the label mutation.
    pub token: String,
    /// The issue-list URL the poller fetches every tick.
    pub issues_url: String,
    /// Poll period.
    pub poll_interval: Duration,
    /// Namespace label for the version cache.
    pub cache_namespace: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Assembles the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = require(&lookup, "GITHUB_TOKEN")?;

        let issues_url = match lookup("ISSUES_URL") {
            Some(url) if !url.is_empty() => url,
            _ => {
                let org = require(&lookup, "GITHUB_ORG")?;
                let repo = require(&lookup, "GITHUB_REPO")?;
                let base = lookup("GITHUB_API_BASE")
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
                format!("{}/repos/{}/{}/issues", base.trim_end_matches('/'), org, repo)
            }
        };

        let poll_interval = match lookup("POLL_INTERVAL_SECS") {
            None => Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    name: "POLL_INTERVAL_SECS",
                    reason: format!("'{raw}' is not a whole number of seconds"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        name: "POLL_INTERVAL_SECS",
                        reason: "the poll period must be at least one second".into(),
                    });
                }
                Duration::from_secs(secs)
            }
        };

        let cache_namespace = lookup("CACHE_NAMESPACE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_CACHE_NAMESPACE.to_string());

        Ok(Self {
            token,
            issues_url,
            poll_interval,
            cache_namespace,
        })
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVariable { name })
}
