use super::test_server::{Reply, TestServer, spawn_server};
use super::*;
use crate::domain::StatusCheck;
use crate::error::AuthError;
use crate::workload::{CaseKind, Language, WorkloadItem};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

fn sample_item() -> WorkloadItem {
    WorkloadItem {
        language: Language::Python,
        case_kind: CaseKind::Success,
        payload: Arc::from("x = int(input())\nprint(x + 1)\n"),
        identity: "user_3".to_owned(),
    }
}

fn judge_client(server: &TestServer, template: SubmissionTemplate, submit: Duration) -> Result<HttpJudgeClient, String> {
    let endpoints = Endpoints::new(&server.url("/api"), "submissions", "submissions")
        .map_err(|err| format!("endpoints failed: {}", err))?;
    let client = build_http_client(Duration::from_secs(2), 4)
        .map_err(|err| format!("client failed: {}", err))?;
    Ok(HttpJudgeClient::new(
        client,
        Arc::new(endpoints),
        template,
        CallTimeouts {
            submit,
            status: Duration::from_secs(2),
        },
    ))
}

fn default_template() -> SubmissionTemplate {
    SubmissionTemplate {
        problem_id: 1,
        test_input: Some("41\n".to_owned()),
    }
}

#[test]
fn submit_posts_body_and_reads_string_id() -> Result<(), String> {
    run_async_test(async {
        let server = spawn_server(|_| Reply::json(200, r#"{"id":"abc-1","status":"PENDING"}"#))?;
        let client = judge_client(&server, default_template(), Duration::from_secs(2))?;

        let result = client.submit(&sample_item()).await;
        if !result.ok || result.submission_id.as_deref() != Some("abc-1") {
            return Err(format!("Unexpected result: {:?}", result));
        }
        if result.latency_ms.is_none() {
            return Err("Expected latency to be recorded".to_owned());
        }

        let requests = server.requests()?;
        let request = requests.first().ok_or("Expected one request")?;
        if request.method != "POST" || request.path != "/api/submissions" {
            return Err(format!("Unexpected request line: {} {}", request.method, request.path));
        }
        let body = request.json()?;
        let expected = serde_json::json!({
            "language": "python",
            "code": "x = int(input())\nprint(x + 1)\n",
            "input": "41\n",
            "problemId": 1,
            "username": "user_3",
        });
        if body != expected {
            return Err(format!("Unexpected body: {}", body));
        }
        if request.header("authorization").is_some() {
            return Err("Expected no Authorization header".to_owned());
        }
        Ok(())
    })
}

#[test]
fn submit_accepts_numeric_id() -> Result<(), String> {
    run_async_test(async {
        let server = spawn_server(|_| Reply::json(200, r#"{"id":42}"#))?;
        let client = judge_client(&server, default_template(), Duration::from_secs(2))?;

        let result = client.submit(&sample_item()).await;
        if result.pollable_id() != Some("42") {
            return Err(format!("Unexpected result: {:?}", result));
        }
        Ok(())
    })
}

#[test]
fn submit_without_id_is_ok_but_not_pollable() -> Result<(), String> {
    run_async_test(async {
        let server = spawn_server(|request| {
            if request.body.contains("\"java\"") {
                Reply::json(201, "accepted")
            } else {
                Reply::json(200, r#"{"id":null}"#)
            }
        })?;
        let client = judge_client(&server, default_template(), Duration::from_secs(2))?;

        let result = client.submit(&sample_item()).await;
        if !result.ok || result.submission_id.is_some() {
            return Err(format!("Unexpected result for null id: {:?}", result));
        }

        let mut item = sample_item();
        item.language = Language::Java;
        let result = client.submit(&item).await;
        if !result.ok || result.submission_id.is_some() {
            return Err(format!("Unexpected result for plain body: {:?}", result));
        }
        Ok(())
    })
}

#[test]
fn submit_non_2xx_is_failure() -> Result<(), String> {
    run_async_test(async {
        let server = spawn_server(|_| Reply::json(500, "boom"))?;
        let client = judge_client(&server, default_template(), Duration::from_secs(2))?;

        let result = client.submit(&sample_item()).await;
        if result.ok || result.pollable_id().is_some() {
            return Err(format!("Expected failure: {:?}", result));
        }
        if result.error_detail.as_deref() != Some("HTTP 500: boom") {
            return Err(format!("Unexpected detail: {:?}", result.error_detail));
        }
        if result.latency_ms.is_none() {
            return Err("Failures still carry a latency".to_owned());
        }
        Ok(())
    })
}

#[test]
fn submit_timeout_is_failure() -> Result<(), String> {
    run_async_test(async {
        let server = spawn_server(|_| {
            Reply::json(200, r#"{"id":"late"}"#).delayed(Duration::from_millis(800))
        })?;
        let client = judge_client(&server, default_template(), Duration::from_millis(100))?;

        let result = client.submit(&sample_item()).await;
        if result.ok {
            return Err(format!("Expected timeout failure: {:?}", result));
        }
        if result.error_detail.as_deref() != Some("timeout") {
            return Err(format!("Unexpected detail: {:?}", result.error_detail));
        }
        Ok(())
    })
}

#[test]
fn submit_sends_bearer_token_and_omits_empty_input() -> Result<(), String> {
    run_async_test(async {
        let server = spawn_server(|_| Reply::json(200, r#"{"id":"1"}"#))?;
        let template = SubmissionTemplate {
            problem_id: 7,
            test_input: None,
        };
        let client = judge_client(&server, template, Duration::from_secs(2))?.with_token("tok-123");

        let result = client.submit(&sample_item()).await;
        if !result.ok {
            return Err(format!("Unexpected failure: {:?}", result));
        }
        let requests = server.requests()?;
        let request = requests.first().ok_or("Expected one request")?;
        if request.header("authorization") != Some("Bearer tok-123") {
            return Err(format!(
                "Unexpected Authorization header: {:?}",
                request.header("authorization")
            ));
        }
        let body = request.json()?;
        if body.get("input").is_some() {
            return Err(format!("Expected input to be omitted: {}", body));
        }
        if body.get("problemId") != Some(&serde_json::json!(7)) {
            return Err(format!("Unexpected problemId: {}", body));
        }
        Ok(())
    })
}

#[test]
fn check_status_classifies_responses() -> Result<(), String> {
    run_async_test(async {
        let server = spawn_server(|request| match request.path.as_str() {
            "/api/submissions/done" => Reply::json(
                200,
                r#"{"status":"COMPLETED","verdict":"WRONG_ANSWER","error":"expected 42"}"#,
            ),
            "/api/submissions/queued" => Reply::json(200, r#"{"status":"QUEUED"}"#),
            "/api/submissions/garbled" => Reply::json(200, "not json"),
            _ => Reply::json(404, r#"{"message":"not found"}"#),
        })?;
        let client = judge_client(&server, default_template(), Duration::from_secs(2))?;

        let done = client.check_status("done").await;
        let expected = StatusCheck::Completed {
            verdict: Some("WRONG_ANSWER".to_owned()),
            error: Some("expected 42".to_owned()),
        };
        if done != expected {
            return Err(format!("Unexpected completed check: {:?}", done));
        }

        let queued = client.check_status("queued").await;
        if queued
            != (StatusCheck::Pending {
                status: Some("QUEUED".to_owned()),
            })
        {
            return Err(format!("Unexpected pending check: {:?}", queued));
        }

        match client.check_status("missing").await {
            StatusCheck::Failed { detail } if detail.starts_with("HTTP 404") => {}
            other => return Err(format!("Unexpected 404 check: {:?}", other)),
        }
        match client.check_status("garbled").await {
            StatusCheck::Failed { .. } => {}
            other => return Err(format!("Unexpected garbled check: {:?}", other)),
        }
        Ok(())
    })
}

#[test]
fn endpoints_join_paths_onto_base() -> Result<(), String> {
    let with_slash = Endpoints::new("http://judge.test/api/", "/submissions", "submissions")
        .map_err(|err| err.to_string())?;
    let without_slash = Endpoints::new("http://judge.test/api", "submissions", "submissions/")
        .map_err(|err| err.to_string())?;

    for endpoints in [&with_slash, &without_slash] {
        if endpoints.submit_url().as_str() != "http://judge.test/api/submissions" {
            return Err(format!("Unexpected submit url: {}", endpoints.submit_url()));
        }
        let status = endpoints
            .status_url("42")
            .map_err(|err| err.to_string())?;
        if status.as_str() != "http://judge.test/api/submissions/42" {
            return Err(format!("Unexpected status url: {}", status));
        }
    }
    if with_slash.login_url().as_str() != "http://judge.test/api/auth/login" {
        return Err(format!("Unexpected login url: {}", with_slash.login_url()));
    }

    let encoded = with_slash
        .status_url("a b/c")
        .map_err(|err| err.to_string())?;
    if encoded.as_str() != "http://judge.test/api/submissions/a%20b%2Fc" {
        return Err(format!("Unexpected encoded url: {}", encoded));
    }
    Ok(())
}

#[test]
fn endpoints_reject_invalid_base() -> Result<(), String> {
    if Endpoints::new("not a url", "submissions", "submissions").is_ok() {
        return Err("Expected invalid URL to fail".to_owned());
    }
    if Endpoints::new("mailto:judge@test", "submissions", "submissions").is_ok() {
        return Err("Expected cannot-be-a-base URL to fail".to_owned());
    }
    Ok(())
}

fn auth_endpoints(server: &TestServer) -> Result<Endpoints, String> {
    Endpoints::new(&server.url("/api"), "submissions", "submissions").map_err(|err| err.to_string())
}

const AUTH_TIMEOUT: Duration = Duration::from_secs(2);

fn credentials() -> Credentials {
    Credentials {
        email: "load@judge.test".to_owned(),
        password: "secret1".to_owned(),
        username: "loadbot".to_owned(),
    }
}

#[test]
fn obtain_token_logs_in_directly() -> Result<(), String> {
    run_async_test(async {
        let server = spawn_server(|_| Reply::json(200, r#"{"token":"tok-1"}"#))?;
        let client = build_http_client(Duration::from_secs(2), 1).map_err(|err| err.to_string())?;

        let token = obtain_token(&client, &auth_endpoints(&server)?, &credentials(), AUTH_TIMEOUT)
            .await
            .map_err(|err| err.to_string())?;
        if token != "tok-1" {
            return Err(format!("Unexpected token: {}", token));
        }
        let requests = server.requests()?;
        if requests.len() != 1 {
            return Err(format!("Expected a single login, got {}", requests.len()));
        }
        let body = requests.first().ok_or("Expected one request")?.json()?;
        if body != serde_json::json!({"email": "load@judge.test", "password": "secret1"}) {
            return Err(format!("Unexpected login body: {}", body));
        }
        Ok(())
    })
}

#[test]
fn obtain_token_registers_then_retries_login() -> Result<(), String> {
    run_async_test(async {
        let logins = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&logins);
        let server = spawn_server(move |request| match request.path.as_str() {
            "/api/auth/login" => {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Reply::json(401, r#"{"message":"bad credentials"}"#)
                } else {
                    Reply::json(200, r#"{"accessToken":"tok-2"}"#)
                }
            }
            "/api/auth/register" => Reply::json(200, r#"{"username":"loadbot"}"#),
            _ => Reply::json(404, "{}"),
        })?;
        let client = build_http_client(Duration::from_secs(2), 1).map_err(|err| err.to_string())?;

        let token = obtain_token(&client, &auth_endpoints(&server)?, &credentials(), AUTH_TIMEOUT)
            .await
            .map_err(|err| err.to_string())?;
        if token != "tok-2" {
            return Err(format!("Unexpected token: {}", token));
        }

        let paths: Vec<String> = server
            .requests()?
            .into_iter()
            .map(|request| request.path)
            .collect();
        if paths != ["/api/auth/login", "/api/auth/register", "/api/auth/login"] {
            return Err(format!("Unexpected call order: {:?}", paths));
        }
        Ok(())
    })
}

#[test]
fn obtain_token_fails_when_login_never_succeeds() -> Result<(), String> {
    run_async_test(async {
        let server = spawn_server(|request| {
            if request.path == "/api/auth/login" {
                Reply::json(200, r#"{"username":"loadbot"}"#)
            } else {
                Reply::json(400, r#"{"message":"exists"}"#)
            }
        })?;
        let client = build_http_client(Duration::from_secs(2), 1).map_err(|err| err.to_string())?;

        match obtain_token(&client, &auth_endpoints(&server)?, &credentials(), AUTH_TIMEOUT).await {
            Err(AuthError::TokenUnavailable { email, .. }) if email == "load@judge.test" => Ok(()),
            other => Err(format!("Expected TokenUnavailable, got {:?}", other)),
        }
    })
}

#[test]
fn obtain_token_gives_up_on_a_silent_judge() -> Result<(), String> {
    run_async_test(async {
        let server = spawn_server(|_| {
            Reply::json(200, r#"{"token":"too-late"}"#).delayed(Duration::from_secs(10))
        })?;
        let client = build_http_client(Duration::from_secs(2), 1).map_err(|err| err.to_string())?;
        let endpoints = auth_endpoints(&server)?;

        let outcome = tokio::time::timeout(
            Duration::from_secs(5),
            obtain_token(&client, &endpoints, &credentials(), Duration::from_millis(150)),
        )
        .await
        .map_err(|_elapsed| "Handshake still blocked after 5s".to_owned())?;

        match outcome {
            Err(AuthError::TokenUnavailable { reason, .. }) if reason.contains("login request failed") => {}
            other => return Err(format!("Expected a timed-out login, got {:?}", other)),
        }
        let paths: Vec<String> = server
            .requests()?
            .into_iter()
            .map(|request| request.path)
            .collect();
        if paths != ["/api/auth/login", "/api/auth/register", "/api/auth/login"] {
            return Err(format!("Unexpected call order: {:?}", paths));
        }
        Ok(())
    })
}
