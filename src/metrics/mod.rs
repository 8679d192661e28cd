//! Run-level aggregation of submit latencies, verdicts and failure counts.
mod aggregator;
mod histogram;
mod percentiles;
mod summary;


pub use aggregator::{POLL_FAILED, RunMetrics, UNKNOWN_VERDICT};
pub use histogram::LatencyHistogram;
pub use percentiles::{average_ms, nearest_rank};
pub use summary::{RunSummary, TurnaroundSummary};
