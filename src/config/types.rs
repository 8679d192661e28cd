use std::time::Duration;

use serde::Deserialize;

use crate::args::OutputFormat;
use crate::args::parsers::parse_duration_value;
use crate::error::ValidationError;
use crate::workload::CaseWeights;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub api_url: Option<String>,
    pub submit_path: Option<String>,
    pub status_path: Option<String>,
    pub problem_id: Option<u64>,
    pub test_input: Option<String>,
    pub users: Option<usize>,
    pub concurrency: Option<usize>,
    pub duration: Option<DurationValue>,
    pub submit_interval: Option<DurationValue>,
    pub harvest_wait: Option<DurationValue>,
    pub submit_timeout: Option<DurationValue>,
    pub status_timeout: Option<DurationValue>,
    pub auth_timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub poll_interval: Option<DurationValue>,
    pub poll_timeout: Option<DurationValue>,
    pub poll_phase_timeout: Option<DurationValue>,
    pub poll_parallelism: Option<usize>,
    pub seed: Option<u64>,
    pub case_weights: Option<CaseWeightsConfig>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub register_username: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub output: Option<String>,
}

/// Durations in config files: whole seconds, fractional seconds, or a
/// string with an `ms`/`s`/`m`/`h` suffix.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Fractional(f64),
    Text(String),
}

impl DurationValue {
    /// Converts to a [`Duration`].
    ///
    /// # Errors
    ///
    /// Returns an error for negative, non-finite or malformed values.
    pub fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Fractional(secs) => Duration::try_from_secs_f64(*secs).map_err(|err| {
                ValidationError::InvalidDurationFormat {
                    value: format!("{} ({})", secs, err),
                }
            }),
            DurationValue::Text(text) => parse_duration_value(text),
        }
    }
}

/// `[case_weights]` table. Cases left out get weight zero.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CaseWeightsConfig {
    pub success: Option<f64>,
    pub tle: Option<f64>,
    pub mle: Option<f64>,
    #[serde(alias = "compile-error")]
    pub compile_error: Option<f64>,
}

impl CaseWeightsConfig {
    /// Resolves the table into validated weights.
    ///
    /// # Errors
    ///
    /// Returns an error when a weight is negative or every weight is zero.
    pub fn to_weights(self) -> Result<CaseWeights, ValidationError> {
        let weights = CaseWeights {
            success: self.success.unwrap_or(0.0),
            tle: self.tle.unwrap_or(0.0),
            mle: self.mle.unwrap_or(0.0),
            compile_error: self.compile_error.unwrap_or(0.0),
        };
        weights.validate()?;
        Ok(weights)
    }
}
