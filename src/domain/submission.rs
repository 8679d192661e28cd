/// Outcome of one submit call. Produced exactly once per workload item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub ok: bool,
    pub submission_id: Option<String>,
    /// `None` only when the worker task died before it could time the call.
    pub latency_ms: Option<u64>,
    pub error_detail: Option<String>,
}

impl SubmissionResult {
    #[must_use]
    pub const fn accepted(submission_id: Option<String>, latency_ms: u64) -> Self {
        Self {
            ok: true,
            submission_id,
            latency_ms: Some(latency_ms),
            error_detail: None,
        }
    }

    #[must_use]
    pub fn failed(detail: impl Into<String>, latency_ms: Option<u64>) -> Self {
        Self {
            ok: false,
            submission_id: None,
            latency_ms,
            error_detail: Some(detail.into()),
        }
    }

    /// Id to hand to the poller, if this submission can be polled at all.
    #[must_use]
    pub fn pollable_id(&self) -> Option<&str> {
        if self.ok {
            self.submission_id.as_deref()
        } else {
            None
        }
    }
}
