use std::time::Duration;

pub(crate) const TIMEOUT_DETAIL: &str = "timeout";

/// One status query, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusCheck {
    Completed {
        verdict: Option<String>,
        error: Option<String>,
    },
    Pending {
        status: Option<String>,
    },
    Failed {
        detail: String,
    },
}

/// Final outcome of polling one submission id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResult {
    pub ok: bool,
    pub verdict: Option<String>,
    pub error_detail: Option<String>,
    /// Time from the first status query to the terminal answer.
    pub waited: Duration,
}

impl PollResult {
    #[must_use]
    pub const fn completed(verdict: Option<String>, error: Option<String>, waited: Duration) -> Self {
        Self {
            ok: true,
            verdict,
            error_detail: error,
            waited,
        }
    }

    #[must_use]
    pub fn failed(detail: impl Into<String>, waited: Duration) -> Self {
        Self {
            ok: false,
            verdict: None,
            error_detail: Some(detail.into()),
            waited,
        }
    }

    #[must_use]
    pub fn timed_out(waited: Duration) -> Self {
        Self::failed(TIMEOUT_DETAIL, waited)
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        !self.ok && self.error_detail.as_deref() == Some(TIMEOUT_DETAIL)
    }
}
