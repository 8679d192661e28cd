//! HTTP side of the harness: the judge API seam and its reqwest
//! implementation.
mod auth;
mod client;
mod endpoints;
mod wire;

#[cfg(test)]
pub(crate) mod test_server;
#[cfg(test)]
mod tests;

use async_trait::async_trait;

use crate::domain::{StatusCheck, SubmissionResult};
use crate::workload::WorkloadItem;

pub use auth::{Credentials, obtain_token};
pub use client::{CallTimeouts, HttpJudgeClient, SubmissionTemplate, build_http_client};
pub use endpoints::Endpoints;

/// Operations the scheduler and poller need from the judging service.
///
/// Implementations never fail: transport and protocol problems are folded
/// into the returned records.
#[async_trait]
pub trait JudgeApi: Send + Sync {
    async fn submit(&self, item: &WorkloadItem) -> SubmissionResult;

    async fn check_status(&self, submission_id: &str) -> StatusCheck;
}
