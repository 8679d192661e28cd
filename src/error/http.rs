use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid API URL '{url}': {source}")]
    InvalidApiUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API URL '{url}' cannot be used as a base URL.")]
    ApiUrlCannotBeBase { url: String },
    #[error("Failed to join '{path}' onto '{base}': {source}")]
    JoinUrlFailed {
        base: String,
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
}
