//! Engine error types
//!
//! Every failure the engine can report is one of three kinds:
//! - `Validation`: a request field is missing, malformed or out of range
//! - `Domain`: inputs are well-formed but physically invalid for a model
//! - `Fit`: the failure sample cannot support a Weibull fit
//!
//! All three are deterministic; re-issuing the same request yields the same
//! error, so callers fix the input rather than retry.

use std::fmt::Display;

use thiserror::Error;

/// Result alias used across the engine.
pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Invalid field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Domain error ({subject}): {message}")]
    Domain { subject: String, message: String },

    #[error("Weibull fit failed: {0}")]
    Fit(String),
}

impl EngineError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Domain error naming the offending stress type or field.
    pub fn domain(subject: impl Display, message: impl Into<String>) -> Self {
        Self::Domain {
            subject: subject.to_string(),
            message: message.into(),
        }
    }

    pub fn fit(message: impl Into<String>) -> Self {
        Self::Fit(message.into())
    }

    /// Short machine-readable kind, reported as `error_kind` in responses.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Domain { .. } => "domain",
            Self::Fit(_) => "fit",
        }
    }
}
