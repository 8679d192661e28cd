use serde::{Deserialize, Serialize};
use serde_json::Value;

pub(super) const COMPLETED_STATUS: &str = "COMPLETED";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SubmitBody<'body> {
    pub language: &'body str,
    pub code: &'body str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<&'body str>,
    pub problem_id: u64,
    pub username: &'body str,
}

#[derive(Debug, Deserialize)]
pub(super) struct SubmissionAck {
    #[serde(default)]
    id: Option<Value>,
}

impl SubmissionAck {
    /// Accepts string and numeric ids; anything else means "no id".
    pub(super) fn into_id(self) -> Option<String> {
        match self.id? {
            Value::String(id) if !id.trim().is_empty() => Some(id),
            Value::Number(id) => Some(id.to_string()),
            Value::String(_) | Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct StatusBody {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct LoginBody<'body> {
    pub email: &'body str,
    pub password: &'body str,
}

#[derive(Debug, Serialize)]
pub(super) struct RegisterBody<'body> {
    pub username: &'body str,
    pub email: &'body str,
    pub password: &'body str,
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenBody {
    #[serde(default, alias = "accessToken", alias = "access_token")]
    pub token: Option<String>,
}
