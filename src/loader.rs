//! Option loaders for subjects and their dependent competencies
//!
//! Both loaders degrade to an empty list on failure and report the failure
//! to the [`Notifier`] instead of returning an error.

use crate::api::QuestionApi;
use crate::error::LoadError;
use crate::notify::{Notice, Notifier};
use crate::state::{Competency, Subject};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// List endpoints answer with a bare array or a paginated envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum ListResponse<T> {
    Bare(Vec<T>),
    Page { results: Vec<T> },
}

/// Normalize either list shape into a plain sequence, preserving order
pub fn list_items<T: DeserializeOwned>(
    list: &'static str,
    body: Value,
) -> Result<Vec<T>, LoadError> {
    match serde_json::from_value(body) {
        Ok(ListResponse::Bare(items) | ListResponse::Page { results: items }) => Ok(items),
        Err(source) => Err(LoadError::Malformed { list, source }),
    }
}

/// Fetches option lists through the backend collaborator
pub struct OptionLoader<A: ?Sized> {
    api: Arc<A>,
    notifier: Arc<dyn Notifier>,
}

impl<A: ?Sized> Clone for OptionLoader<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<A: QuestionApi + ?Sized> OptionLoader<A> {
    pub fn new(api: Arc<A>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Load every subject
    pub async fn load_subjects(&self) -> Vec<Subject> {
        let result = match self.api.fetch_subjects().await {
            Ok(body) => list_items("subject", body),
            Err(err) => Err(err.into()),
        };
        self.degrade(result, "No se pudieron cargar las materias")
    }

    /// Load competencies of a subject; no subject means no competencies
    pub async fn load_competencies(&self, subject_id: Option<&str>) -> Vec<Competency> {
        let Some(subject_id) = subject_id.filter(|id| !id.is_empty()) else {
            return Vec::new();
        };

        let result = match self.api.fetch_competencies(subject_id).await {
            Ok(body) => list_items("competency", body),
            Err(err) => Err(err.into()),
        };
        self.degrade(result, "No se pudieron cargar las competencias")
    }

    fn degrade<T>(&self, result: Result<Vec<T>, LoadError>, title: &str) -> Vec<T> {
        match result {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!("{title}: {err}");
                self.notifier.notify(Notice::warning(title, err.to_string()));
                Vec::new()
            }
        }
    }
}
