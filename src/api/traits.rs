//! Trait abstraction for the question backend to enable mocking in tests

use super::request::SubmitRequest;
use crate::error::ApiError;
use async_trait::async_trait;
use serde_json::Value;

/// Backend operations the form engine consumes
///
/// List endpoints return the raw JSON body; shape normalization is the
/// loader's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionApi: Send + Sync {
    /// List all subjects
    async fn fetch_subjects(&self) -> Result<Value, ApiError>;

    /// List competencies belonging to a subject
    async fn fetch_competencies(&self, subject_id: &str) -> Result<Value, ApiError>;

    /// Create or update a question, returning the persisted record
    async fn submit(&self, request: SubmitRequest) -> Result<Value, ApiError>;
}
