//! Error types for the board-insights crate.

use thiserror::Error;

/// Errors produced by the analysis engines and the service layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InsightsError {
    // Provider errors
    #[error("AI provider error: {reason}")]
    Provider { reason: String },

    #[error("Failed to render prompt '{template}': {reason}")]
    Prompt { template: String, reason: String },

    // Capability errors
    #[error("{capability} failed: {reason}")]
    AnalysisFailed { capability: String, reason: String },

    // Request errors
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    // Configuration errors
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

impl InsightsError {
    /// Wrap an error as the uniform failure of a capability.
    pub fn analysis_failed(capability: &str, err: impl std::fmt::Display) -> Self {
        Self::AnalysisFailed {
            capability: capability.to_string(),
            reason: err.to_string(),
        }
    }

    /// Whether this error came from the caller's payload rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

impl From<reqwest::Error> for InsightsError {
    fn from(err: reqwest::Error) -> Self {
        Self::Provider {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for board-insights operations.
pub type InsightsResult<T> = Result<T, InsightsError>;
