use std::time::Duration;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveUsize, TesterArgs};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI arguments. Options given on the
/// command line or through the environment keep their value.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(args: &mut TesterArgs, matches: &ArgMatches, config: &ConfigFile) -> AppResult<()> {
    if !is_explicit(matches, "api_url")
        && let Some(api_url) = config.api_url.as_ref()
    {
        args.api_url.clone_from(api_url);
    }
    if !is_explicit(matches, "submit_path")
        && let Some(path) = config.submit_path.as_ref()
    {
        args.submit_path.clone_from(path);
    }
    if !is_explicit(matches, "status_path")
        && let Some(path) = config.status_path.as_ref()
    {
        args.status_path.clone_from(path);
    }
    if !is_explicit(matches, "problem_id")
        && let Some(problem_id) = config.problem_id
    {
        args.problem_id = problem_id;
    }
    if !is_explicit(matches, "test_input")
        && let Some(test_input) = config.test_input.as_ref()
    {
        args.test_input.clone_from(test_input);
    }

    if !is_explicit(matches, "users")
        && let Some(users) = config.users
    {
        args.users = ensure_positive_usize(users, "users")?;
    }
    if !is_explicit(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = ensure_positive_usize(concurrency, "concurrency")?;
    }
    if !is_explicit(matches, "poll_parallelism")
        && let Some(parallelism) = config.poll_parallelism
    {
        args.poll_parallelism = ensure_positive_usize(parallelism, "poll_parallelism")?;
    }

    if !is_explicit(matches, "duration")
        && let Some(value) = config.duration.as_ref()
    {
        args.duration = duration_field(value, "duration")?;
    }
    if !is_explicit(matches, "submit_interval")
        && let Some(value) = config.submit_interval.as_ref()
    {
        args.submit_interval = duration_field(value, "submit_interval")?;
    }
    if !is_explicit(matches, "harvest_wait")
        && let Some(value) = config.harvest_wait.as_ref()
    {
        args.harvest_wait = positive_duration_field(value, "harvest_wait")?;
    }
    if !is_explicit(matches, "submit_timeout")
        && let Some(value) = config.submit_timeout.as_ref()
    {
        args.submit_timeout = positive_duration_field(value, "submit_timeout")?;
    }
    if !is_explicit(matches, "status_timeout")
        && let Some(value) = config.status_timeout.as_ref()
    {
        args.status_timeout = positive_duration_field(value, "status_timeout")?;
    }
    if !is_explicit(matches, "auth_timeout")
        && let Some(value) = config.auth_timeout.as_ref()
    {
        args.auth_timeout = positive_duration_field(value, "auth_timeout")?;
    }
    if !is_explicit(matches, "connect_timeout")
        && let Some(value) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = positive_duration_field(value, "connect_timeout")?;
    }
    if !is_explicit(matches, "poll_interval")
        && let Some(value) = config.poll_interval.as_ref()
    {
        args.poll_interval = positive_duration_field(value, "poll_interval")?;
    }
    if !is_explicit(matches, "poll_timeout")
        && let Some(value) = config.poll_timeout.as_ref()
    {
        args.poll_timeout = positive_duration_field(value, "poll_timeout")?;
    }
    if !is_explicit(matches, "poll_phase_timeout")
        && let Some(value) = config.poll_phase_timeout.as_ref()
    {
        args.poll_phase_timeout = Some(positive_duration_field(value, "poll_phase_timeout")?);
    }

    if !is_explicit(matches, "seed")
        && let Some(seed) = config.seed
    {
        args.seed = seed;
    }
    if !is_explicit(matches, "case_weights")
        && let Some(weights) = config.case_weights
    {
        args.case_weights = weights.to_weights().map_err(|err| {
            AppError::config(ConfigError::InvalidField {
                field: "case_weights",
                source: err,
            })
        })?;
    }

    if !is_explicit(matches, "email")
        && let Some(email) = config.email.as_ref()
    {
        args.email = Some(email.clone());
    }
    if !is_explicit(matches, "password")
        && let Some(password) = config.password.as_ref()
    {
        args.password = Some(password.clone());
    }
    if !is_explicit(matches, "register_username")
        && let Some(username) = config.register_username.as_ref()
    {
        args.register_username.clone_from(username);
    }

    if !is_explicit(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }
    if !is_explicit(matches, "output")
        && let Some(output) = config.output.as_ref()
    {
        args.output = Some(output.clone());
    }

    Ok(())
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn duration_field(value: &DurationValue, field: &'static str) -> AppResult<Duration> {
    value
        .to_duration()
        .map_err(|err| AppError::config(ConfigError::InvalidField { field, source: err }))
}

fn positive_duration_field(value: &DurationValue, field: &'static str) -> AppResult<Duration> {
    let duration = duration_field(value, field)?;
    if duration.is_zero() {
        return Err(AppError::config(ConfigError::InvalidField {
            field,
            source: ValidationError::DurationZero,
        }));
    }
    Ok(duration)
}
