use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Java,
    Cpp,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Python, Language::Java, Language::Cpp];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected outcome a generated program is written to provoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseKind {
    Success,
    Tle,
    Mle,
    CompileError,
}

impl CaseKind {
    pub const ALL: [CaseKind; 4] = [
        CaseKind::Success,
        CaseKind::Tle,
        CaseKind::Mle,
        CaseKind::CompileError,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CaseKind::Success => "success",
            CaseKind::Tle => "tle",
            CaseKind::Mle => "mle",
            CaseKind::CompileError => "compile_error",
        }
    }
}

impl fmt::Display for CaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CaseKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(CaseKind::Success),
            "tle" => Ok(CaseKind::Tle),
            "mle" => Ok(CaseKind::Mle),
            "compile_error" | "compile-error" | "ce" => Ok(CaseKind::CompileError),
            _ => Err(ValidationError::UnknownCaseKind {
                value: s.to_owned(),
            }),
        }
    }
}

/// Relative sampling weights per case kind.
///
/// Weights do not need to sum to one; the sampler normalizes them. Cases
/// left out of a `case=weight` list get weight zero.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CaseWeights {
    pub success: f64,
    pub tle: f64,
    pub mle: f64,
    pub compile_error: f64,
}

impl Default for CaseWeights {
    fn default() -> Self {
        Self {
            success: 0.70,
            tle: 0.10,
            mle: 0.10,
            compile_error: 0.10,
        }
    }
}

impl CaseWeights {
    const ZERO: CaseWeights = CaseWeights {
        success: 0.0,
        tle: 0.0,
        mle: 0.0,
        compile_error: 0.0,
    };

    #[must_use]
    pub const fn weight(&self, kind: CaseKind) -> f64 {
        match kind {
            CaseKind::Success => self.success,
            CaseKind::Tle => self.tle,
            CaseKind::Mle => self.mle,
            CaseKind::CompileError => self.compile_error,
        }
    }

    const fn set(&mut self, kind: CaseKind, weight: f64) {
        match kind {
            CaseKind::Success => self.success = weight,
            CaseKind::Tle => self.tle = weight,
            CaseKind::Mle => self.mle = weight,
            CaseKind::CompileError => self.compile_error = weight,
        }
    }

    /// Checks that every weight is finite and non-negative and that at
    /// least one case can be drawn.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending case.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut any_positive = false;
        for kind in CaseKind::ALL {
            let weight = self.weight(kind);
            if !weight.is_finite() || weight.is_sign_negative() {
                return Err(ValidationError::NegativeCaseWeight {
                    case: kind.as_str().to_owned(),
                });
            }
            if weight > 0.0 {
                any_positive = true;
            }
        }
        if any_positive {
            Ok(())
        } else {
            Err(ValidationError::NoPositiveCaseWeight)
        }
    }
}

impl std::str::FromStr for CaseWeights {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut weights = CaseWeights::ZERO;
        for entry in s.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let (case, weight) =
                entry
                    .split_once('=')
                    .ok_or_else(|| ValidationError::InvalidCaseWeightFormat {
                        value: entry.to_owned(),
                    })?;
            let kind: CaseKind = case.parse()?;
            let weight: f64 = weight.trim().parse().map_err(|err| {
                ValidationError::InvalidCaseWeightNumber {
                    case: case.trim().to_owned(),
                    source: err,
                }
            })?;
            weights.set(kind, weight);
        }
        weights.validate()?;
        Ok(weights)
    }
}

/// One synthesized submission. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadItem {
    pub language: Language,
    pub case_kind: CaseKind,
    pub payload: Arc<str>,
    pub identity: String,
}
