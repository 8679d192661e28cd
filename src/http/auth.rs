use std::time::Duration;

use reqwest::Client;
use tracing::{info, warn};

use crate::error::AuthError;

use super::client::truncate_body;
use super::endpoints::Endpoints;
use super::wire::{LoginBody, RegisterBody, TokenBody};

/// Account the harness logs in as.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    /// Used only when the account has to be registered first.
    pub username: String,
}

/// Logs in, registering the account once if the first login fails. Each
/// of the up to three calls is bounded by `request_timeout`, so a judge that
/// accepts connections but never answers still ends the handshake.
///
/// # Errors
///
/// Returns [`AuthError::TokenUnavailable`] when no token could be obtained
/// after login, register and a second login.
pub async fn obtain_token(
    client: &Client,
    endpoints: &Endpoints,
    credentials: &Credentials,
    request_timeout: Duration,
) -> Result<String, AuthError> {
    match login(client, endpoints, credentials, request_timeout).await {
        Ok(token) => return Ok(token),
        Err(err) => info!("Login as {} failed ({}); registering.", credentials.email, err),
    }

    if let Err(err) = register(client, endpoints, credentials, request_timeout).await {
        warn!("Register as {} failed: {}", credentials.email, err);
    }

    login(client, endpoints, credentials, request_timeout)
        .await
        .map_err(|err| AuthError::TokenUnavailable {
            email: credentials.email.clone(),
            reason: err.to_string(),
        })
}

async fn login(
    client: &Client,
    endpoints: &Endpoints,
    credentials: &Credentials,
    request_timeout: Duration,
) -> Result<String, AuthError> {
    let response = client
        .post(endpoints.login_url().clone())
        .timeout(request_timeout)
        .json(&LoginBody {
            email: &credentials.email,
            password: &credentials.password,
        })
        .send()
        .await
        .map_err(|err| AuthError::LoginTransport { source: err })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|err| AuthError::LoginTransport { source: err })?;
    if !status.is_success() {
        return Err(AuthError::LoginRejected {
            status: status.as_u16(),
            body: truncate_body(&text),
        });
    }

    serde_json::from_str::<TokenBody>(&text)
        .ok()
        .and_then(|body| body.token)
        .filter(|token| !token.trim().is_empty())
        .ok_or(AuthError::MissingToken)
}

async fn register(
    client: &Client,
    endpoints: &Endpoints,
    credentials: &Credentials,
    request_timeout: Duration,
) -> Result<(), AuthError> {
    let response = client
        .post(endpoints.register_url().clone())
        .timeout(request_timeout)
        .json(&RegisterBody {
            username: &credentials.username,
            email: &credentials.email,
            password: &credentials.password,
        })
        .send()
        .await
        .map_err(|err| AuthError::RegisterTransport { source: err })?;

    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let text = response.text().await.unwrap_or_default();
    Err(AuthError::RegisterRejected {
        status: status.as_u16(),
        body: truncate_body(&text),
    })
}
