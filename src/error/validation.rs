use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid boolean '{value}'. Expected true/false, yes/no, on/off, or 1/0.")]
    InvalidBoolean { value: String },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid case weight entry '{value}'. Expected 'case=weight'.")]
    InvalidCaseWeightFormat { value: String },
    #[error("Unknown case kind '{value}'. Use success, tle, mle, or compile_error.")]
    UnknownCaseKind { value: String },
    #[error("Invalid weight for '{case}': {source}")]
    InvalidCaseWeightNumber {
        case: String,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("Weight for '{case}' must be a finite number >= 0.")]
    NegativeCaseWeight { case: String },
    #[error("At least one case weight must be > 0.")]
    NoPositiveCaseWeight,
    #[error("Case weights rejected: {reason}")]
    CaseWeightsRejected { reason: String },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
