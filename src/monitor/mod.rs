//! Periodic posture evaluation.
//!
//! # Responsibilities
//! - Re-run the evaluation cycle on a fixed interval
//! - Log checks that regress (PASS → FAIL) or recover (FAIL → PASS)
//! - Hand every report to a caller-supplied sink
//!
//! # Design Decisions
//! - No retries: a failed fetch is simply a failed cycle, the next tick tries again
//! - Missed ticks are skipped, never bunched up behind a slow API

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, MissedTickBehavior};

use crate::api::Fetch;
use crate::posture::{self, CheckId, PostureReport};

/// Change of a single check between two consecutive reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Regressed(CheckId),
    Recovered(CheckId),
}

/// Checks whose pass flag differs between `previous` and `current`.
pub fn transitions(previous: &PostureReport, current: &PostureReport) -> Vec<Transition> {
    previous
        .checks
        .iter()
        .zip(current.checks.iter())
        .filter(|(before, after)| before.pass != after.pass)
        .map(|(_, after)| {
            if after.pass {
                Transition::Recovered(after.id)
            } else {
                Transition::Regressed(after.id)
            }
        })
        .collect()
}

pub struct PostureMonitor<F> {
    fetcher: F,
    interval: Duration,
}

impl<F: Fetch> PostureMonitor<F> {
    pub fn new(fetcher: F, interval: Duration) -> Self {
        Self { fetcher, interval }
    }

    /// Evaluate every interval until `shutdown` fires.
    ///
    /// The first cycle runs immediately.
    pub async fn run<S>(self, mut shutdown: broadcast::Receiver<()>, mut sink: S)
    where
        S: FnMut(&PostureReport),
    {
        tracing::info!(interval_secs = self.interval.as_secs(), "Posture monitor starting");

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut previous: Option<PostureReport> = None;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let report = posture::collect(&self.fetcher).await;
                    if let Some(prev) = &previous {
                        log_transitions(prev, &report);
                    }
                    sink(&report);
                    previous = Some(report);
                }
                _ = shutdown.recv() => {
                    tracing::info!("Posture monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}

fn log_transitions(previous: &PostureReport, current: &PostureReport) {
    for transition in transitions(previous, current) {
        match transition {
            Transition::Regressed(id) => tracing::warn!(
                check = %id,
                detail = current.get(id).detail.as_deref().unwrap_or(""),
                "Check regressed to FAIL"
            ),
            Transition::Recovered(id) => tracing::info!(check = %id, "Check recovered to PASS"),
        }
    }
}
