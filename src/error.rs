//! Public error taxonomy for the analysis core.
//!
//! Every user-visible failure carries a stable machine-readable `kind()`
//! plus a human message. Feature extraction never fails (it degrades to
//! zero/neutral defaults); only input validation, backend selection, and
//! unexpected scoring failures surface here.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalysisError {
    /// Length/range violation caught at the request boundary.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Backend name is not one of the recognized identifiers.
    #[error("unsupported backend '{0}', expected 'lexicon' or 'enhanced'")]
    UnsupportedBackend(String),

    /// Backend is recognized but did not finish loading successfully.
    #[error("backend '{0}' is not available")]
    BackendUnavailable(String),

    /// Unexpected failure during scoring; details are logged, not leaked.
    #[error("internal analysis error: {0}")]
    Internal(String),
}

impl AnalysisError {
    /// Stable machine-readable kind for transport-layer mapping.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InvalidInput(_) => "invalid_input",
            AnalysisError::UnsupportedBackend(_) => "unsupported_backend",
            AnalysisError::BackendUnavailable(_) => "backend_unavailable",
            AnalysisError::Internal(_) => "internal_error",
        }
    }

    /// True when the transport should answer with a client-error status.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AnalysisError::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(AnalysisError::InvalidInput("x".into()).kind(), "invalid_input");
        assert_eq!(
            AnalysisError::UnsupportedBackend("bert".into()).kind(),
            "unsupported_backend"
        );
        assert_eq!(
            AnalysisError::BackendUnavailable("enhanced".into()).kind(),
            "backend_unavailable"
        );
        assert_eq!(AnalysisError::Internal("boom".into()).kind(), "internal_error");
    }

    #[test]
    fn internal_is_the_only_server_error() {
        assert!(AnalysisError::InvalidInput("x".into()).is_client_error());
        assert!(AnalysisError::UnsupportedBackend("x".into()).is_client_error());
        assert!(AnalysisError::BackendUnavailable("x".into()).is_client_error());
        assert!(!AnalysisError::Internal("x".into()).is_client_error());
    }
}
