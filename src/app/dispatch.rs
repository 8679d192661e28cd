use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinError, JoinSet};
use tokio::time::{Instant, sleep, timeout};
use tracing::{debug, warn};

use crate::domain::SubmissionResult;
use crate::http::JudgeApi;
use crate::metrics::RunMetrics;
use crate::workload::WorkloadGenerator;

use super::poller::before;
use super::queue::InFlightQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchPlan {
    pub concurrency: usize,
    pub duration: Duration,
    pub submit_interval: Duration,
    pub harvest_wait: Duration,
}

#[derive(Debug)]
pub struct DispatchOutcome {
    pub queue: InFlightQueue,
    pub peak_outstanding: usize,
}

/// Keeps at most `plan.concurrency` submit calls outstanding until
/// `plan.duration` has elapsed, then waits for every outstanding call.
///
/// Results are folded into `metrics` in harvest order; ok results with an
/// id are queued for polling in that same order.
pub async fn dispatch_submissions(
    api: &Arc<dyn JudgeApi>,
    generator: &mut WorkloadGenerator,
    plan: &DispatchPlan,
    metrics: &mut RunMetrics,
) -> DispatchOutcome {
    let mut queue = InFlightQueue::new();
    let mut outstanding: JoinSet<SubmissionResult> = JoinSet::new();
    let mut peak_outstanding = 0usize;
    let deadline = Instant::now().checked_add(plan.duration);

    loop {
        while before(deadline) && outstanding.len() < plan.concurrency {
            let item = generator.next_item();
            metrics.record_admission(item.case_kind);
            debug!(
                "Admitting {}/{} for {}.",
                item.language, item.case_kind, item.identity
            );
            let api = Arc::clone(api);
            outstanding.spawn(async move { api.submit(&item).await });
            peak_outstanding = peak_outstanding.max(outstanding.len());

            if !plan.submit_interval.is_zero() {
                sleep(plan.submit_interval).await;
            }
        }

        if outstanding.is_empty() {
            break;
        }

        if let Ok(Some(joined)) = timeout(plan.harvest_wait, outstanding.join_next()).await {
            harvest(joined, metrics, &mut queue);
        }
        while let Some(joined) = outstanding.try_join_next() {
            harvest(joined, metrics, &mut queue);
        }
    }

    DispatchOutcome {
        queue,
        peak_outstanding,
    }
}

fn harvest(
    joined: Result<SubmissionResult, JoinError>,
    metrics: &mut RunMetrics,
    queue: &mut InFlightQueue,
) {
    let result = joined.unwrap_or_else(|err| {
        warn!("Submit worker aborted: {}", err);
        SubmissionResult::failed(format!("worker aborted: {}", err), None)
    });
    metrics.record_submission(&result);

    match result.pollable_id() {
        Some(id) => {
            if !queue.push(id.to_owned()) {
                warn!("Submission id {} returned twice; polling it once.", id);
            }
        }
        None => {
            if let Some(detail) = result.error_detail.as_deref() {
                debug!("Submit failed: {}", detail);
            }
        }
    }
}
