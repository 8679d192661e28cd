use std::sync::Arc;

use tokio::time::Instant;
use tracing::info;

use crate::args::TesterArgs;
use crate::error::AppResult;
use crate::http::{Endpoints, HttpJudgeClient, JudgeApi, build_http_client, obtain_token};
use crate::metrics::{RunMetrics, RunSummary};
use crate::workload::{PayloadTable, WorkloadGenerator};

use super::dispatch::{DispatchOutcome, DispatchPlan, dispatch_submissions};
use super::plan;
use super::poller::{PollPlan, drain_in_flight};
use super::report::RunReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPlan {
    pub dispatch: DispatchPlan,
    pub poll: PollPlan,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub peak_outstanding: usize,
}

/// Dispatch phase followed by the poll phase, against any [`JudgeApi`].
///
/// # Errors
///
/// Returns an error only if the metrics aggregate cannot be created;
/// per-item failures are recorded, never returned.
pub async fn execute_run(
    api: Arc<dyn JudgeApi>,
    generator: &mut WorkloadGenerator,
    plan: &RunPlan,
) -> AppResult<RunOutcome> {
    let mut metrics = RunMetrics::new()?;
    let started = Instant::now();

    let DispatchOutcome {
        mut queue,
        peak_outstanding,
    } = dispatch_submissions(&api, generator, &plan.dispatch, &mut metrics).await;
    info!(
        "Dispatch finished: {} submitted, {} failed, {} queued for polling.",
        metrics.submitted(),
        metrics.submit_failures(),
        queue.len()
    );

    drain_in_flight(&api, &mut queue, &plan.poll, &mut metrics).await;
    info!("Polling finished: {} completed.", metrics.completed());

    Ok(RunOutcome {
        summary: metrics.summarize(started.elapsed()),
        peak_outstanding,
    })
}

/// Builds every collaborator from `args`, authenticates if asked to, and
/// runs the load test against the configured judge.
///
/// # Errors
///
/// Returns an error for invalid startup configuration or when
/// authentication fails. Nothing is submitted in either case.
pub async fn run_harness(args: &TesterArgs) -> AppResult<RunReport> {
    let started_at = chrono::Utc::now();
    let mut generator = WorkloadGenerator::new(
        &plan::workload_config(args),
        Arc::new(PayloadTable::builtin()),
    )?;
    let credentials = plan::credentials(args)?;
    let endpoints = Arc::new(Endpoints::new(
        &args.api_url,
        &args.submit_path,
        &args.status_path,
    )?);
    let client = build_http_client(args.connect_timeout, args.concurrency.get())?;

    let mut judge = HttpJudgeClient::new(
        client.clone(),
        Arc::clone(&endpoints),
        plan::submission_template(args),
        plan::call_timeouts(args),
    );
    if let Some(credentials) = credentials {
        let token = obtain_token(&client, &endpoints, &credentials, args.auth_timeout).await?;
        info!("Authenticated as {}.", credentials.email);
        judge = judge.with_token(&token);
    }

    info!(
        "Starting run against {} (problem {}, {} users, concurrency {}, duration {:?}).",
        endpoints.submit_url(),
        args.problem_id,
        args.users.get(),
        args.concurrency.get(),
        args.duration
    );
    info!(
        "Case mix: success={} tle={} mle={} compile_error={}",
        args.case_weights.success,
        args.case_weights.tle,
        args.case_weights.mle,
        args.case_weights.compile_error
    );

    let api: Arc<dyn JudgeApi> = Arc::new(judge);
    let outcome = execute_run(api, &mut generator, &plan::run_plan(args)).await?;
    Ok(RunReport::new(started_at, args, outcome))
}
