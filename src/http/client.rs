use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;

use crate::args::DEFAULT_USER_AGENT;
use crate::domain::{StatusCheck, SubmissionResult};
use crate::error::HttpError;
use crate::workload::WorkloadItem;

use super::JudgeApi;
use super::endpoints::Endpoints;
use super::wire::{COMPLETED_STATUS, StatusBody, SubmissionAck, SubmitBody};

const ERROR_BODY_LIMIT: usize = 200;
const TIMEOUT_DETAIL: &str = "timeout";

/// Fields shared by every submission body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTemplate {
    pub problem_id: u64,
    /// `None` omits `input` from the body.
    pub test_input: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallTimeouts {
    pub submit: Duration,
    pub status: Duration,
}

/// Builds the shared connection pool.
///
/// # Errors
///
/// Returns an error if reqwest cannot build the client.
pub fn build_http_client(connect_timeout: Duration, max_idle_per_host: usize) -> Result<Client, HttpError> {
    Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .connect_timeout(connect_timeout)
        .pool_max_idle_per_host(max_idle_per_host)
        .build()
        .map_err(|err| HttpError::BuildClientFailed { source: err })
}

/// reqwest-backed [`JudgeApi`]. Cheap to clone; every clone shares the
/// same connection pool.
#[derive(Debug, Clone)]
pub struct HttpJudgeClient {
    client: Client,
    endpoints: Arc<Endpoints>,
    template: Arc<SubmissionTemplate>,
    timeouts: CallTimeouts,
    token: Option<Arc<str>>,
}

impl HttpJudgeClient {
    #[must_use]
    pub fn new(
        client: Client,
        endpoints: Arc<Endpoints>,
        template: SubmissionTemplate,
        timeouts: CallTimeouts,
    ) -> Self {
        Self {
            client,
            endpoints,
            template: Arc::new(template),
            timeouts,
            token: None,
        }
    }

    /// Attaches a bearer token to every subsequent call.
    #[must_use]
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(Arc::from(token));
        self
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl JudgeApi for HttpJudgeClient {
    async fn submit(&self, item: &WorkloadItem) -> SubmissionResult {
        let body = SubmitBody {
            language: item.language.as_str(),
            code: &item.payload,
            input: self.template.test_input.as_deref(),
            problem_id: self.template.problem_id,
            username: &item.identity,
        };
        let request = self
            .authorize(self.client.post(self.endpoints.submit_url().clone()))
            .timeout(self.timeouts.submit)
            .json(&body);

        let started = Instant::now();
        let outcome = match request.send().await {
            Ok(response) => read_submission(response).await,
            Err(err) => Err(describe_transport_error(&err)),
        };
        let latency_ms = elapsed_ms(started);

        match outcome {
            Ok(submission_id) => {
                if submission_id.is_none() {
                    debug!("Submission accepted without an id; it will not be polled.");
                }
                SubmissionResult::accepted(submission_id, latency_ms)
            }
            Err(detail) => SubmissionResult::failed(detail, Some(latency_ms)),
        }
    }

    async fn check_status(&self, submission_id: &str) -> StatusCheck {
        let url = match self.endpoints.status_url(submission_id) {
            Ok(url) => url,
            Err(err) => {
                return StatusCheck::Failed {
                    detail: err.to_string(),
                };
            }
        };
        let request = self
            .authorize(self.client.get(url))
            .timeout(self.timeouts.status);

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                return StatusCheck::Failed {
                    detail: describe_transport_error(&err),
                };
            }
        };
        let (status, text) = match read_body(response).await {
            Ok(parts) => parts,
            Err(detail) => return StatusCheck::Failed { detail },
        };
        if !status.is_success() {
            return StatusCheck::Failed {
                detail: http_failure(status, &text),
            };
        }

        match serde_json::from_str::<StatusBody>(&text) {
            Ok(body) if body.status.as_deref() == Some(COMPLETED_STATUS) => StatusCheck::Completed {
                verdict: body.verdict,
                error: body.error,
            },
            Ok(body) => StatusCheck::Pending {
                status: body.status,
            },
            Err(err) => StatusCheck::Failed {
                detail: format!("Invalid status body: {}", err),
            },
        }
    }
}

async fn read_submission(response: Response) -> Result<Option<String>, String> {
    let (status, text) = read_body(response).await?;
    if !status.is_success() {
        return Err(http_failure(status, &text));
    }
    Ok(serde_json::from_str::<SubmissionAck>(&text)
        .ok()
        .and_then(SubmissionAck::into_id))
}

async fn read_body(response: Response) -> Result<(reqwest::StatusCode, String), String> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|err| describe_transport_error(&err))?;
    Ok((status, text))
}

fn http_failure(status: reqwest::StatusCode, body: &str) -> String {
    format!("HTTP {}: {}", status.as_u16(), truncate_body(body))
}

pub(super) fn truncate_body(body: &str) -> String {
    let body = body.trim();
    let mut truncated: String = body.chars().take(ERROR_BODY_LIMIT).collect();
    if truncated.len() < body.len() {
        truncated.push_str("...");
    }
    truncated
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        TIMEOUT_DETAIL.to_owned()
    } else {
        err.to_string()
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
