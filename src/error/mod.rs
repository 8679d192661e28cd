mod app;
mod auth;
mod config;
mod http;
mod metrics;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use auth::AuthError;
pub use config::ConfigError;
pub use http::HttpError;
pub use metrics::MetricsError;
pub use validation::ValidationError;
