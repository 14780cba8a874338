//! issue_warden trigger infrastructure.
//!
//! The fixed-interval poll is the only trigger this system has: the upstream
//! issue list supports no webhooks, cursors, or since-tokens, so every tick
//! fetches the full current list and relies on change detection downstream to
//! suppress the duplicates.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Scheduling, fan-out, and per-tick aggregation live
//! here. The [`pipeline`] crate sees only its own ports; the
//! [`stages`] crate sees one issue at a time.
//!
//! ## Delivery model
//!
//! At-least-once: a tick may re-deliver issues a previous (overlapping or
//! failed) tick already touched. Every downstream stage is idempotent, so
//! re-delivery is harmless by construction.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinSet;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, info_span, warn, Instrument};

use pipeline::{ChangeDecision, IssueSource, LabelEvent, LabelResult, TickId};
use stages::{Applier, ChangeDetector, Classifier, Evaluation};

/// What one tick saw and did.
///
/// Returned from [`Poller::tick`] and logged by the run loop; this is the
/// audit surface for outcome events. Note that `results` only holds outcomes
/// for issues that produced a label request — an issue that was admitted but
/// suppressed by the classifier contributes to the decision counters and
/// nothing else, which is how the "no outcome at all" case stays
/// distinguishable from a failure.
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    /// Correlates all log events of this tick.
    pub tick: TickId,
    /// Items returned by the upstream list fetch (zero when the fetch failed).
    pub polled: usize,
    /// Records excluded because they are pull requests.
    pub skipped_pull_requests: usize,
    /// Issues admitted as never seen before.
    pub new: usize,
    /// Issues admitted because their version moved.
    pub changed: usize,
    /// Issues suppressed as already seen at this version.
    pub unchanged: usize,
    /// Terminal outcomes of every label application attempted this tick.
    pub results: Vec<LabelResult>,
}

impl TickReport {
    fn empty(tick: TickId) -> Self {
        Self {
            tick,
            polled: 0,
            skipped_pull_requests: 0,
            new: 0,
            changed: 0,
            unchanged: 0,
            results: Vec::new(),
        }
    }

    fn absorb(&mut self, outcome: IssueOutcome) {
        match outcome {
            IssueOutcome::PullRequest => self.skipped_pull_requests += 1,
            IssueOutcome::Unchanged => self.unchanged += 1,
            IssueOutcome::Admitted { decision, result } => {
                match decision {
                    ChangeDecision::New => self.new += 1,
                    ChangeDecision::Changed => self.changed += 1,
                    // Unchanged issues terminate inside the detector.
                    ChangeDecision::Unchanged => {}
                }
                if let Some(result) = result {
                    self.results.push(result);
                }
            }
        }
    }
}

/// Result of one issue's trip through the stages.
enum IssueOutcome {
    PullRequest,
    Unchanged,
    Admitted {
        decision: ChangeDecision,
        result: Option<LabelResult>,
    },
}

/// Drives the triage pipeline on a fixed interval.
pub struct Poller {
    source: Arc<dyn IssueSource>,
    detector: Arc<ChangeDetector>,
    classifier: Arc<Classifier>,
    applier: Arc<Applier>,
}

impl Poller {
    /// Creates a poller over the given source and stages.
    pub fn new(
        source: Arc<dyn IssueSource>,
        detector: ChangeDetector,
        classifier: Classifier,
        applier: Applier,
    ) -> Self {
        Self {
            source,
            detector: Arc::new(detector),
            classifier: Arc::new(classifier),
            applier: Arc::new(applier),
        }
    }

    /// Runs the poll loop forever.
    ///
    /// The first tick fires immediately; subsequent ticks fire every
    /// `period`. A tick that outlives its period delays the next tick rather
    /// than bursting to catch up.
    pub async fn run(&self, period: Duration) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(period_secs = period.as_secs(), "poller started");
        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    /// Performs one poll: fetch, fan out per issue, aggregate.
    ///
    /// A fetch failure is logged and skips the tick — no partial results, no
    /// retry; the next scheduled tick is the retry mechanism. Per-issue work
    /// runs concurrently; issues are independent, order-insensitive units of
    /// work.
    pub async fn tick(&self) -> TickReport {
        let tick = TickId::new_random();
        self.run_tick(tick)
            .instrument(info_span!("tick", id = %tick))
            .await
    }

    async fn run_tick(&self, tick: TickId) -> TickReport {
        let mut report = TickReport::empty(tick);

        let issues = match self.source.list_issues().await {
            Ok(issues) => issues,
            Err(error) => {
                warn!(%error, "issue list fetch failed, skipping tick");
                return report;
            }
        };
        report.polled = issues.len();

        let mut tasks = JoinSet::new();
        for issue in issues {
            let detector = Arc::clone(&self.detector);
            let classifier = Arc::clone(&self.classifier);
            let applier = Arc::clone(&self.applier);
            let number = issue.number;

            tasks.spawn(
                async move {
                    match detector.evaluate(issue).await {
                        Evaluation::PullRequest => IssueOutcome::PullRequest,
                        Evaluation::Unchanged => IssueOutcome::Unchanged,
                        Evaluation::Actionable(triaged) => {
                            let decision = triaged.decision;
                            let result = match classifier.classify(&triaged) {
                                LabelEvent::NoOp => None,
                                LabelEvent::Request(request) => {
                                    Some(applier.apply(&request).await)
                                }
                            };
                            IssueOutcome::Admitted { decision, result }
                        }
                    }
                }
                .instrument(info_span!("issue", number = %number)),
            );
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => report.absorb(outcome),
                // A panicking task loses that issue's outcome for this tick;
                // the poller itself keeps going.
                Err(error) => warn!(%error, "issue task aborted"),
            }
        }

        info!(
            polled = report.polled,
            skipped_pull_requests = report.skipped_pull_requests,
            new = report.new,
            changed = report.changed,
            unchanged = report.unchanged,
            outcomes = report.results.len(),
            "tick complete"
        );
        report
    }
}
