use std::time::Duration;

use crate::error::{AppError, AppResult, ValidationError};
use crate::workload::CaseWeights;

use super::types::PositiveUsize;

const MILLIS_PER_SECOND: u64 = 1_000;
const FRACTION_DIGITS: usize = 3;

pub(super) fn parse_positive_usize(s: &str) -> AppResult<PositiveUsize> {
    s.parse::<PositiveUsize>().map_err(AppError::from)
}

pub(super) fn parse_case_weights(s: &str) -> AppResult<CaseWeights> {
    s.parse::<CaseWeights>().map_err(AppError::from)
}

pub(crate) fn parse_bool_env(s: &str) -> AppResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(AppError::validation(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        })),
    }
}

/// Parses `500ms`, `2s`, `1m`, `1h`, a bare number of seconds, or decimal
/// seconds such as `0.1` / `1.5s`. Zero is allowed.
pub(crate) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    parse_duration_value(s).map_err(AppError::from)
}

/// Same grammar as [`parse_duration_arg`] but rejects zero.
pub(crate) fn parse_positive_duration_arg(s: &str) -> AppResult<Duration> {
    let duration = parse_duration_value(s)?;
    if duration.is_zero() {
        return Err(AppError::validation(ValidationError::DurationZero));
    }
    Ok(duration)
}

pub(crate) fn parse_duration_value(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let number_len = value
        .find(|ch: char| !ch.is_ascii_digit() && ch != '.')
        .unwrap_or(value.len());
    let (num_part, unit_part) = value.split_at(number_len);
    if num_part.is_empty() || num_part.starts_with('.') {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    if let Some((whole, fraction)) = num_part.split_once('.') {
        if unit != "s" {
            return Err(ValidationError::InvalidDurationFormat {
                value: value.to_owned(),
            });
        }
        return parse_decimal_seconds(value, whole, fraction);
    }

    let number: u64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    match unit {
        "ms" => Ok(Duration::from_millis(number)),
        "s" => Ok(Duration::from_secs(number)),
        "m" => number
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or(ValidationError::DurationOverflow),
        "h" => number
            .checked_mul(60)
            .and_then(|minutes| minutes.checked_mul(60))
            .map(Duration::from_secs)
            .ok_or(ValidationError::DurationOverflow),
        _ => Err(ValidationError::InvalidDurationUnit {
            unit: unit.to_owned(),
        }),
    }
}

fn parse_decimal_seconds(value: &str, whole: &str, fraction: &str) -> Result<Duration, ValidationError> {
    if fraction.contains('.') || !fraction.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let secs: u64 = whole
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;
    let mut millis_text: String = fraction.chars().take(FRACTION_DIGITS).collect();
    while millis_text.len() < FRACTION_DIGITS {
        millis_text.push('0');
    }
    let millis: u64 = millis_text
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;
    secs.checked_mul(MILLIS_PER_SECOND)
        .and_then(|whole_ms| whole_ms.checked_add(millis))
        .map(Duration::from_millis)
        .ok_or(ValidationError::DurationOverflow)
}
