use std::collections::BTreeMap;

use serde::Serialize;

/// Frozen view of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub submitted: u64,
    pub submit_failures: u64,
    pub completed: u64,
    pub duration_ms: u64,
    pub avg_submit_latency_ms: u64,
    pub p95_submit_latency_ms: u64,
    pub verdicts: BTreeMap<String, u64>,
    pub case_mix: BTreeMap<String, u64>,
    pub poll_timeouts: u64,
    pub unpolled: u64,
    pub turnaround: TurnaroundSummary,
}

/// Time from the first status query to a COMPLETED answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TurnaroundSummary {
    pub count: u64,
    pub p50_ms: u64,
    pub p90_ms: u64,
    pub p99_ms: u64,
    pub max_ms: u64,
}
