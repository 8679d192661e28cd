use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use crate::domain::{PollResult, StatusCheck};
use crate::http::JudgeApi;
use crate::metrics::RunMetrics;

use super::queue::InFlightQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPlan {
    pub interval: Duration,
    /// Per-submission limit.
    pub timeout: Duration,
    /// Shared limit for the whole drain.
    pub phase_timeout: Duration,
    pub parallelism: usize,
}

/// Queries the status of one submission until it is COMPLETED, a query
/// fails, or `timeout` elapses.
pub async fn await_completion(
    api: &dyn JudgeApi,
    submission_id: &str,
    interval: Duration,
    timeout: Duration,
) -> PollResult {
    let started = Instant::now();
    let deadline = started.checked_add(timeout);

    while before(deadline) {
        match api.check_status(submission_id).await {
            StatusCheck::Completed { verdict, error } => {
                debug!(
                    "Submission {} completed with {}.",
                    submission_id,
                    verdict.as_deref().unwrap_or("no verdict")
                );
                return PollResult::completed(verdict, error, started.elapsed());
            }
            StatusCheck::Failed { detail } => {
                debug!("Polling {} failed: {}", submission_id, detail);
                return PollResult::failed(detail, started.elapsed());
            }
            StatusCheck::Pending { status } => {
                debug!(
                    "Submission {} still {}.",
                    submission_id,
                    status.as_deref().unwrap_or("pending")
                );
            }
        }

        let pause = deadline.map_or(interval, |deadline| {
            interval.min(deadline.saturating_duration_since(Instant::now()))
        });
        sleep(pause).await;
    }

    PollResult::timed_out(started.elapsed())
}

/// Polls queued ids in FIFO order, at most `plan.parallelism` at a time,
/// until the queue is empty or `plan.phase_timeout` has passed. Ids still
/// queued at the deadline are dropped.
pub async fn drain_in_flight(
    api: &Arc<dyn JudgeApi>,
    queue: &mut InFlightQueue,
    plan: &PollPlan,
    metrics: &mut RunMetrics,
) {
    let phase_deadline = Instant::now().checked_add(plan.phase_timeout);
    let mut active: JoinSet<PollResult> = JoinSet::new();
    let (interval, timeout) = (plan.interval, plan.timeout);

    loop {
        while active.len() < plan.parallelism && before(phase_deadline) {
            let Some(submission_id) = queue.pop_front() else {
                break;
            };
            let api = Arc::clone(api);
            active.spawn(async move {
                await_completion(api.as_ref(), &submission_id, interval, timeout).await
            });
        }

        match active.join_next().await {
            Some(Ok(result)) => metrics.record_poll(&result),
            Some(Err(err)) => {
                warn!("Poll worker aborted: {}", err);
                metrics.record_poll(&PollResult::failed(
                    format!("worker aborted: {}", err),
                    Duration::ZERO,
                ));
            }
            None => break,
        }
    }

    let unpolled = queue.drain_remaining();
    if !unpolled.is_empty() {
        warn!(
            "Poll phase deadline passed; {} submission(s) left unpolled.",
            unpolled.len()
        );
        debug!("Unpolled submission ids: {}", unpolled.join(", "));
        metrics.record_unpolled(unpolled.len());
    }
}

/// `None` stands for a deadline too far out to represent.
pub(super) fn before(deadline: Option<Instant>) -> bool {
    deadline.is_none_or(|deadline| Instant::now() < deadline)
}
