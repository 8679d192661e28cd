use std::collections::BTreeMap;
use std::time::Duration;

use tracing::warn;

use crate::domain::{PollResult, SubmissionResult};
use crate::error::MetricsError;
use crate::workload::CaseKind;

use super::histogram::LatencyHistogram;
use super::percentiles::{average_ms, nearest_rank};
use super::summary::{RunSummary, TurnaroundSummary};

/// Verdict bucket for a completed poll whose body had no verdict.
pub const UNKNOWN_VERDICT: &str = "UNKNOWN";
/// Verdict bucket for polls that failed or timed out.
pub const POLL_FAILED: &str = "POLL_FAILED";

const SUBMIT_LATENCY_PERCENTILE: u64 = 95;

/// Mutable aggregate for one run. Owned by the coordinating task; nothing
/// else writes to it.
#[derive(Debug)]
pub struct RunMetrics {
    submitted: u64,
    submit_failures: u64,
    completed: u64,
    poll_timeouts: u64,
    unpolled: u64,
    verdicts: BTreeMap<String, u64>,
    latencies_ms: Vec<u64>,
    case_mix: BTreeMap<CaseKind, u64>,
    turnaround: LatencyHistogram,
}

impl RunMetrics {
    /// Creates empty metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if the turnaround histogram cannot be allocated.
    pub fn new() -> Result<Self, MetricsError> {
        Ok(Self {
            submitted: 0,
            submit_failures: 0,
            completed: 0,
            poll_timeouts: 0,
            unpolled: 0,
            verdicts: BTreeMap::new(),
            latencies_ms: Vec::new(),
            case_mix: BTreeMap::new(),
            turnaround: LatencyHistogram::new()?,
        })
    }

    /// Counts one generated item. Called before the submit is dispatched.
    pub fn record_admission(&mut self, case_kind: CaseKind) {
        self.submitted = self.submitted.saturating_add(1);
        let entry = self.case_mix.entry(case_kind).or_insert(0);
        *entry = entry.saturating_add(1);
    }

    pub fn record_submission(&mut self, result: &SubmissionResult) {
        if let Some(latency_ms) = result.latency_ms {
            self.latencies_ms.push(latency_ms);
        }
        if !result.ok {
            self.submit_failures = self.submit_failures.saturating_add(1);
        }
    }

    pub fn record_poll(&mut self, result: &PollResult) {
        if result.ok {
            self.completed = self.completed.saturating_add(1);
            let verdict = result.verdict.as_deref().unwrap_or(UNKNOWN_VERDICT);
            self.bump_verdict(verdict);
            let waited_ms = u64::try_from(result.waited.as_millis()).unwrap_or(u64::MAX);
            if let Err(err) = self.turnaround.record(waited_ms) {
                warn!("Dropping turnaround sample: {}", err);
            }
        } else {
            if result.is_timeout() {
                self.poll_timeouts = self.poll_timeouts.saturating_add(1);
            }
            self.bump_verdict(POLL_FAILED);
        }
    }

    /// Counts ids left in the queue when the poll phase deadline passed.
    pub fn record_unpolled(&mut self, count: usize) {
        let count = u64::try_from(count).unwrap_or(u64::MAX);
        self.unpolled = self.unpolled.saturating_add(count);
    }

    fn bump_verdict(&mut self, verdict: &str) {
        let entry = self.verdicts.entry(verdict.to_owned()).or_insert(0);
        *entry = entry.saturating_add(1);
    }

    #[must_use]
    pub const fn submitted(&self) -> u64 {
        self.submitted
    }

    #[must_use]
    pub const fn submit_failures(&self) -> u64 {
        self.submit_failures
    }

    #[must_use]
    pub const fn completed(&self) -> u64 {
        self.completed
    }

    #[must_use]
    pub fn latencies_ms(&self) -> &[u64] {
        &self.latencies_ms
    }

    #[must_use]
    pub fn verdict_count(&self, verdict: &str) -> u64 {
        self.verdicts.get(verdict).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn summarize(&self, elapsed: Duration) -> RunSummary {
        let (p50_ms, p90_ms, p99_ms) = self.turnaround.percentiles();
        RunSummary {
            submitted: self.submitted,
            submit_failures: self.submit_failures,
            completed: self.completed,
            duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            avg_submit_latency_ms: average_ms(&self.latencies_ms),
            p95_submit_latency_ms: nearest_rank(&self.latencies_ms, SUBMIT_LATENCY_PERCENTILE),
            verdicts: self.verdicts.clone(),
            case_mix: self
                .case_mix
                .iter()
                .map(|(kind, count)| (kind.as_str().to_owned(), *count))
                .collect(),
            poll_timeouts: self.poll_timeouts,
            unpolled: self.unpolled,
            turnaround: TurnaroundSummary {
                count: self.turnaround.count(),
                p50_ms,
                p90_ms,
                p99_ms,
                max_ms: self.turnaround.max(),
            },
        }
    }
}
