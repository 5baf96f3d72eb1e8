// src/run/coordinator.rs
// =============================================================================
// This module runs one probe per target with bounded concurrency.
//
// How it works:
// 1. A semaphore holds `max_concurrency` permits
// 2. For each target (in input order) we wait for a permit, then spawn a
//    tokio task that owns the permit until its probe finishes
// 3. Each task returns (index, ProbeOutcome); the index is where the outcome
//    lands in the result, so completion order never matters
// 4. Once every task is joined, the slots are handed back as a ProbeRun
//
// Cancellation:
// - stops dispatching new probes
// - aborts tasks still in flight (their futures are dropped, which closes
//   their sockets)
// - keeps every outcome that had already finished
// - leaves the other slots empty, so the run is visibly incomplete
//
// Tasks never share mutable state. All bookkeeping happens here, after each
// join, on the coordinator's own task.
// =============================================================================

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::probe::{ErrorKind, ProbeOutcome, Prober};
use crate::targets::{Target, TargetList};

/// Result of one run: one slot per target, in input order.
#[derive(Debug, Clone)]
pub struct ProbeRun {
    slots: Vec<(Target, Option<ProbeOutcome>)>,
    cancelled: bool,
}

impl ProbeRun {
    /// True when every target produced an outcome.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|(_, outcome)| outcome.is_some())
    }

    /// True when the run was stopped by its cancellation token.
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The outcome for a target, if it finished.
    pub fn outcome(&self, target: &str) -> Option<&ProbeOutcome> {
        self.slots
            .iter()
            .find(|(t, _)| t.as_str() == target)
            .and_then(|(_, outcome)| outcome.as_ref())
    }

    /// Targets that never produced an outcome.
    pub fn missing(&self) -> impl Iterator<Item = &Target> {
        self.slots
            .iter()
            .filter(|(_, outcome)| outcome.is_none())
            .map(|(target, _)| target)
    }

    /// Finished outcomes, in input order.
    pub fn into_outcomes(self) -> Vec<ProbeOutcome> {
        self.slots
            .into_iter()
            .filter_map(|(_, outcome)| outcome)
            .collect()
    }
}

// Runs every target through `prober`
//
// Parameters:
//   prober: shared by all tasks (Arc so each spawned task can hold it)
//   targets: validated, duplicate-free list
//   timeout: passed unchanged to every probe
//   max_concurrency: upper bound on probes in flight (values below 1 act as 1)
//   cancel: cooperative stop signal
//
// Returns: ProbeRun with one slot per target
pub async fn run(
    prober: Arc<dyn Prober>,
    targets: &TargetList,
    timeout: Duration,
    max_concurrency: usize,
    cancel: &CancellationToken,
) -> ProbeRun {
    let started = Instant::now();
    let limit = max_concurrency.max(1);
    let semaphore = Arc::new(Semaphore::new(limit));

    log::info!(
        "probing {} target(s), {} at a time, timeout {:?}",
        targets.len(),
        limit,
        timeout
    );

    let mut slots: Vec<(Target, Option<ProbeOutcome>)> =
        targets.iter().map(|t| (t.clone(), None)).collect();

    // JoinSet aborts whatever is still running if it is dropped
    let mut tasks = JoinSet::new();
    let mut cancelled = false;

    for (index, target) in targets.iter().enumerate() {
        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                cancelled = true;
                break;
            }
            permit = semaphore.clone().acquire_owned() => match permit {
                Ok(permit) => permit,
                // only happens if the semaphore is closed, which we never do
                Err(_) => break,
            },
        };

        let prober = Arc::clone(&prober);
        let target = target.clone();

        tasks.spawn(async move {
            let _permit = permit;
            let outcome = AssertUnwindSafe(prober.probe(&target, timeout))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| {
                    log::error!("probe for {} panicked", target);
                    ProbeOutcome::failed(target.as_str(), ErrorKind::Unknown, "probe panicked")
                });
            (index, outcome)
        });
    }

    if cancelled {
        tasks.abort_all();
    }

    loop {
        let joined = tokio::select! {
            biased;
            _ = cancel.cancelled(), if !cancelled => {
                cancelled = true;
                tasks.abort_all();
                continue;
            }
            joined = tasks.join_next() => joined,
        };

        match joined {
            Some(Ok((index, outcome))) => slots[index].1 = Some(outcome),
            // aborted by cancellation: the slot stays empty
            Some(Err(e)) if e.is_cancelled() => {}
            Some(Err(e)) => log::error!("probe task failed: {}", e),
            None => break,
        }
    }

    let run = ProbeRun { slots, cancelled };

    if cancelled {
        log::warn!(
            "run cancelled after {:?}: {} of {} target(s) finished",
            started.elapsed(),
            run.len() - run.missing().count(),
            run.len()
        );
    } else {
        log::info!("probed {} target(s) in {:?}", run.len(), started.elapsed());
    }

    run
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Semaphore instead of buffer_unordered?
//    - buffer_unordered polls every probe on the caller's task
//    - Spawned tasks run in parallel on tokio's worker threads
//    - The semaphore keeps the "at most N at once" promise across tasks
//
// 2. Why does the task own the permit?
//    - `_permit` is dropped when the task ends, however it ends
//    - Finished, timed out, panicked or aborted: the slot is always freed
//
// 3. What does abort_all() do to a probe?
//    - The task's future is dropped at its next await point
//    - Dropping a reqwest future closes its connection; nothing is killed
//      mid-write
// -----------------------------------------------------------------------------
