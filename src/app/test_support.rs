use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::args::PositiveUsize;
use crate::domain::{StatusCheck, SubmissionResult};
use crate::error::{AppError, AppResult};
use crate::http::JudgeApi;
use crate::workload::{CaseWeights, PayloadTable, WorkloadConfig, WorkloadGenerator, WorkloadItem};

type SubmitScript = dyn Fn(usize, &WorkloadItem) -> SubmissionResult + Send + Sync;
type StatusScript = dyn Fn(&str, usize) -> StatusCheck + Send + Sync;
type DelayScript = dyn Fn(usize) -> Duration + Send + Sync;

/// In-memory judge. Submit and status answers come from closures that see
/// the call index (submit) or the per-id attempt number (status).
pub(crate) struct ScriptedJudge {
    submit_delay: Box<DelayScript>,
    status_delay: Duration,
    on_submit: Box<SubmitScript>,
    on_status: Box<StatusScript>,
    submits: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    status_attempts: Mutex<HashMap<String, usize>>,
    status_order: Mutex<Vec<String>>,
}

impl ScriptedJudge {
    pub(crate) fn new<S, P>(on_submit: S, on_status: P) -> Self
    where
        S: Fn(usize, &WorkloadItem) -> SubmissionResult + Send + Sync + 'static,
        P: Fn(&str, usize) -> StatusCheck + Send + Sync + 'static,
    {
        Self {
            submit_delay: Box::new(|_| Duration::ZERO),
            status_delay: Duration::ZERO,
            on_submit: Box::new(on_submit),
            on_status: Box::new(on_status),
            submits: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
            status_attempts: Mutex::new(HashMap::new()),
            status_order: Mutex::new(Vec::new()),
        }
    }

    /// Every submit gets id `id-<n>` and every status query completes.
    pub(crate) fn accepting() -> Self {
        Self::new(
            |index, _| SubmissionResult::accepted(Some(format!("id-{}", index)), 5),
            |_, _| StatusCheck::Completed {
                verdict: Some("ACCEPTED".to_owned()),
                error: None,
            },
        )
    }

    pub(crate) fn with_submit_delay(self, delay: Duration) -> Self {
        self.with_submit_delay_by_call(move |_| delay)
    }

    /// Submit latency chosen per call index.
    pub(crate) fn with_submit_delay_by_call<D>(mut self, delay: D) -> Self
    where
        D: Fn(usize) -> Duration + Send + Sync + 'static,
    {
        self.submit_delay = Box::new(delay);
        self
    }

    pub(crate) const fn with_status_delay(mut self, delay: Duration) -> Self {
        self.status_delay = delay;
        self
    }

    pub(crate) fn submit_calls(&self) -> usize {
        self.submits.load(Ordering::SeqCst)
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn status_calls(&self, submission_id: &str) -> usize {
        self.status_attempts
            .lock()
            .map(|attempts| attempts.get(submission_id).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Ids in the order their first status query arrived.
    pub(crate) fn polled_ids(&self) -> Vec<String> {
        self.status_order
            .lock()
            .map(|order| order.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl JudgeApi for ScriptedJudge {
    async fn submit(&self, item: &WorkloadItem) -> SubmissionResult {
        let index = self.submits.fetch_add(1, Ordering::SeqCst);
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        self.peak_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);
        let delay = (self.submit_delay)(index);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        (self.on_submit)(index, item)
    }

    async fn check_status(&self, submission_id: &str) -> StatusCheck {
        let attempt = match self.status_attempts.lock() {
            Ok(mut attempts) => {
                let entry = attempts.entry(submission_id.to_owned()).or_insert(0);
                *entry = entry.saturating_add(1);
                *entry
            }
            Err(_poisoned) => 0,
        };
        if attempt == 1 {
            if let Ok(mut order) = self.status_order.lock() {
                order.push(submission_id.to_owned());
            }
        }
        if !self.status_delay.is_zero() {
            tokio::time::sleep(self.status_delay).await;
        }
        (self.on_status)(submission_id, attempt)
    }
}

pub(crate) fn generator(seed: u64, users: usize) -> AppResult<WorkloadGenerator> {
    let config = WorkloadConfig {
        seed,
        users: PositiveUsize::try_from(users)?,
        weights: CaseWeights::default(),
    };
    WorkloadGenerator::new(&config, std::sync::Arc::new(PayloadTable::builtin())).map_err(AppError::from)
}

pub(crate) fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}
