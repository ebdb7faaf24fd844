use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the completeness scan and its collaborators.
///
/// A scan that finds no qualifying cutoff is not an error; see
/// [`crate::domain::McEstimate::mc`].
#[derive(Debug, Error)]
pub enum McError {
    /// A caller-supplied parameter violates its contract.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("magnitude sample is empty")]
    EmptyInput,

    /// The exponentiality test cannot process the sample it was given.
    #[error("exponentiality test unavailable: {0}")]
    TestUnavailable(String),

    #[error("failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid estimate JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl McError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub fn test_unavailable(reason: impl Into<String>) -> Self {
        Self::TestUnavailable(reason.into())
    }
}

/// Require `value` to be finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, McError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(McError::invalid(name, format!("must be finite and > 0, got {value}")))
    }
}
