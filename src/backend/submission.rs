//! Submission responses and their classification into outcomes

use crate::state::ValidationErrors;
use serde::Deserialize;

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Employer saved successfully";
pub const DEFAULT_REJECTION_MESSAGE: &str = "Something went wrong!";
pub const CONNECTION_FAILURE_MESSAGE: &str = "Error connecting to the server!";

/// Raw answer to `POST /api/employers`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    /// HTTP status was 2xx
    pub ok: bool,
    /// `message` from the JSON body, if the body had one
    pub message: Option<String>,
}

/// JSON body of a submission response
#[derive(Debug, Deserialize)]
pub(crate) struct MessageBody {
    pub message: Option<String>,
}

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Backend accepted the posting
    Success { message: String },
    /// Local validation failed; nothing was sent
    Invalid { errors: ValidationErrors },
    /// Backend answered with a non-2xx status
    Rejected { message: String },
    /// The request never got an answer
    NetworkFailure { message: String },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success { .. })
    }

    /// Banner text for the outcome. Invalid outcomes show inline errors only.
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Success { message }
            | SubmissionOutcome::Rejected { message }
            | SubmissionOutcome::NetworkFailure { message } => Some(message),
            SubmissionOutcome::Invalid { .. } => None,
        }
    }
}

/// Convert a backend call result into an outcome. Transport errors are
/// logged here and never propagate further.
pub fn classify(result: anyhow::Result<SubmitResponse>) -> SubmissionOutcome {
    match result {
        Ok(SubmitResponse { ok: true, message }) => SubmissionOutcome::Success {
            message: message.unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
        },
        Ok(SubmitResponse { ok: false, message }) => SubmissionOutcome::Rejected {
            message: message.unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string()),
        },
        Err(e) => {
            tracing::warn!("submission failed: {e:#}");
            SubmissionOutcome::NetworkFailure {
                message: CONNECTION_FAILURE_MESSAGE.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_success_uses_server_message() {
        let outcome = classify(Ok(SubmitResponse {
            ok: true,
            message: Some("Employer created successfully".to_string()),
        }));
        assert_eq!(
            outcome,
            SubmissionOutcome::Success {
                message: "Employer created successfully".to_string()
            }
        );
        assert!(outcome.is_success());
    }

    #[test]
    fn test_success_without_message_uses_fallback() {
        let outcome = classify(Ok(SubmitResponse {
            ok: true,
            message: None,
        }));
        assert_eq!(outcome.message(), Some(DEFAULT_SUCCESS_MESSAGE));
    }

    #[test]
    fn test_rejection_uses_server_message() {
        let outcome = classify(Ok(SubmitResponse {
            ok: false,
            message: Some("Title invalid".to_string()),
        }));
        assert_eq!(
            outcome,
            SubmissionOutcome::Rejected {
                message: "Title invalid".to_string()
            }
        );
    }

    #[test]
    fn test_rejection_without_message_uses_fallback() {
        let outcome = classify(Ok(SubmitResponse {
            ok: false,
            message: None,
        }));
        assert_eq!(outcome.message(), Some("Something went wrong!"));
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_transport_error_is_network_failure() {
        let outcome = classify(Err(anyhow!("dns error: no such host")));
        assert_eq!(
            outcome,
            SubmissionOutcome::NetworkFailure {
                message: "Error connecting to the server!".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_has_no_banner() {
        let outcome = SubmissionOutcome::Invalid {
            errors: ValidationErrors::new(),
        };
        assert_eq!(outcome.message(), None);
    }
}
