//! Run orchestration: bounded-concurrency dispatch, completion polling
//! and the final report.
mod dispatch;
mod plan;
mod poller;
mod queue;
mod report;
mod runner;

#[cfg(test)]
mod test_support;

pub use dispatch::{DispatchOutcome, DispatchPlan, dispatch_submissions};
pub use poller::{PollPlan, await_completion, drain_in_flight};
pub use queue::InFlightQueue;
pub use report::{RunReport, emit_report};
pub use runner::{RunOutcome, RunPlan, execute_run, run_harness};
