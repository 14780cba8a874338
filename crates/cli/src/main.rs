//! issue_warden CLI entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration** — read and validate the environment (see
//!    [`config::Config`]); the process never starts with an invalid
//!    configuration.
//! 2. **Wire observability** — configure `tracing-subscriber` with an
//!    `EnvFilter` (RUST_LOG) and an optional JSON layer (`LOG_FORMAT=json`).
//!    All `tracing` spans and structured events emitted by every crate in the
//!    workspace flow through this layer.
//! 3. **Construct infrastructure** — one [`github::GitHubClient`] serves both
//!    ports, one [`cache::InMemoryVersionCache`] backs change detection; both
//!    are injected into the stages and the [`poller::Poller`].
//! 4. **Run** — drive the poll loop until a shutdown signal arrives.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cache::InMemoryVersionCache;
use github::GitHubClient;
use poller::Poller;
use stages::{Applier, ChangeDetector, Classifier, Taxonomy};

mod config;

use config::Config;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env().context("configuration is invalid")?;
    info!(
        issues_url = %config.issues_url,
        period_secs = config.poll_interval.as_secs(),
        cache_namespace = %config.cache_namespace,
        "issue_warden starting"
    );

    let client = Arc::new(
        GitHubClient::new(config.issues_url.clone(), config.token.clone())
            .context("failed to construct the GitHub client")?,
    );
    let cache = Arc::new(InMemoryVersionCache::new(config.cache_namespace.clone()));

    let poller = Poller::new(
        client.clone(),
        ChangeDetector::new(cache),
        Classifier::new(Taxonomy::default()),
        Applier::new(client),
    );

    tokio::select! {
        () = poller.run(config.poll_interval) => {}
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for the shutdown signal")?;
            info!("shutdown signal received, stopping");
        }
    }

    Ok(())
}
