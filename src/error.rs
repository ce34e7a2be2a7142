//! Error taxonomy for loading options and submitting questions

use crate::state::ErrorMap;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field errors reported by the backend, keyed by field name
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Failure talking to the question backend
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend rejected request with status {status}")]
    Rejected {
        status: u16,
        detail: Option<String>,
        field_errors: FieldErrors,
    },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure loading an option list
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("malformed {list} list: {source}")]
    Malformed {
        list: &'static str,
        source: serde_json::Error,
    },
}

/// Failure submitting the composed question
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(ErrorMap),

    #[error("backend rejected question: {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected {
        detail: Option<String>,
        field_errors: FieldErrors,
    },

    #[error("could not reach backend: {0}")]
    Transport(String),

    #[error("could not encode question: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(#[source] serde_json::Error),
}

/// Message shown when the backend gives no detail
pub const GENERIC_SUBMISSION_MESSAGE: &str = "Error al guardar la pregunta";

impl SubmissionError {
    /// Single top-level message for a notification
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Invalid(_) => {
                "Por favor corrige los errores antes de continuar".to_string()
            }
            SubmissionError::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            SubmissionError::Rejected { detail: None, .. }
            | SubmissionError::Transport(_)
            | SubmissionError::Encode(_)
            | SubmissionError::UnexpectedResponse(_) => GENERIC_SUBMISSION_MESSAGE.to_string(),
        }
    }
}

impl From<ApiError> for SubmissionError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Rejected {
                detail,
                field_errors,
                ..
            } => SubmissionError::Rejected {
                detail,
                field_errors,
            },
            ApiError::Transport(err) => SubmissionError::Transport(err.to_string()),
            ApiError::Decode(err) => SubmissionError::UnexpectedResponse(err),
        }
    }
}
