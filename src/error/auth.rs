use thiserror::Error;

/// Failures of the login / register handshake. Every variant aborts the run.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("login request failed: {source}")]
    LoginTransport {
        #[source]
        source: reqwest::Error,
    },
    #[error("login rejected with HTTP {status}: {body}")]
    LoginRejected { status: u16, body: String },
    #[error("login response did not contain a token")]
    MissingToken,
    #[error("register request failed: {source}")]
    RegisterTransport {
        #[source]
        source: reqwest::Error,
    },
    #[error("register rejected with HTTP {status}: {body}")]
    RegisterRejected { status: u16, body: String },
    #[error("--email requires --password")]
    MissingPassword,
    #[error("unable to obtain a token for '{email}' after login and register ({reason})")]
    TokenUnavailable { email: String, reason: String },
}
