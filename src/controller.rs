//! Form controller: the only writer of the question form state

use crate::api::QuestionApi;
use crate::compose::compose;
use crate::error::SubmissionError;
use crate::loader::OptionLoader;
use crate::notify::{Notice, Notifier};
use crate::resolver::{CompetencyRequest, DependencyResolver, DependentState, Resolution};
use crate::state::{Competency, FieldUpdate, FormState, OptionLetter, Question, Subject};
use crate::validate::validate;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

/// Whether the form creates a new question or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Competency list fetched for a request, waiting to be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedCompetencies {
    pub request: CompetencyRequest,
    pub competencies: Vec<Competency>,
}

/// Owns the [`FormState`] and wires edits, loads and submission together.
///
/// Competency fetches are split in two halves so several can be in flight:
/// [`FormController::fetch_competencies`] returns a detached future, and its
/// output goes back through [`FormController::apply_competencies`], where the
/// resolver drops anything stale.
pub struct FormController<A: ?Sized> {
    loader: OptionLoader<A>,
    state: FormState,
    subjects: Vec<Subject>,
    resolver: DependencyResolver,
    seed: Option<Question>,
}

impl<A: QuestionApi + ?Sized + 'static> FormController<A> {
    /// Create an empty form in create mode
    pub fn new(api: Arc<A>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            loader: OptionLoader::new(api, notifier),
            state: FormState::default(),
            subjects: Vec::new(),
            resolver: DependencyResolver::new(),
            seed: None,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn mode(&self) -> FormMode {
        match self.seed.as_ref().and_then(|seed| seed.id.clone()) {
            Some(id) => FormMode::Edit { id },
            None => FormMode::Create,
        }
    }

    /// Record being edited, if any
    pub fn seed(&self) -> Option<&Question> {
        self.seed.as_ref()
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn competencies(&self) -> &[Competency] {
        self.resolver.competencies()
    }

    pub fn dependent_state(&self) -> &DependentState {
        self.resolver.state()
    }

    /// Load (or reload) the subject list
    pub async fn load_subjects(&mut self) {
        self.subjects = self.loader.load_subjects().await;
    }

    /// Apply a single-field edit.
    ///
    /// Returns the competency fetch to run when the subject changed to a
    /// non-empty value.
    pub fn set_field(&mut self, update: FieldUpdate) -> Option<CompetencyRequest> {
        let previous_subject = self.state.subject_id.clone();
        let is_subject = matches!(update, FieldUpdate::Subject(_));

        if !self.state.apply(update) {
            tracing::debug!("ignored competency selection without subject");
            return None;
        }

        if is_subject && self.state.subject_id != previous_subject {
            return self.resolver.subject_changed(&mut self.state);
        }
        None
    }

    pub fn set_option(&mut self, letter: OptionLetter, text: String) {
        self.state.set_option(letter, text);
    }

    /// Replace the whole form with a record and start its subject cascade
    pub fn hydrate(&mut self, seed: Question) -> Option<CompetencyRequest> {
        tracing::debug!(id = ?seed.id, "hydrating form from record");
        self.state = FormState::from_question(&seed);
        self.resolver.set_seed(seed.competency.clone());
        self.seed = Some(seed);
        self.resolver.subject_changed(&mut self.state)
    }

    /// Fetch competencies for a request without borrowing the controller
    pub fn fetch_competencies(
        &self,
        request: CompetencyRequest,
    ) -> impl Future<Output = LoadedCompetencies> + Send + 'static {
        let loader = self.loader.clone();
        async move {
            let competencies = loader.load_competencies(Some(&request.subject_id)).await;
            LoadedCompetencies {
                request,
                competencies,
            }
        }
    }

    /// Apply a fetched list; stale lists are discarded
    pub fn apply_competencies(&mut self, loaded: LoadedCompetencies) -> Resolution {
        self.resolver
            .competencies_loaded(&mut self.state, &loaded.request, loaded.competencies)
    }

    /// Fetch and apply in one step
    pub async fn settle(&mut self, request: Option<CompetencyRequest>) -> Option<Resolution> {
        let request = request?;
        let loaded = self.fetch_competencies(request).await;
        Some(self.apply_competencies(loaded))
    }

    /// Validate and submit the form.
    ///
    /// Any accepted save discards the form and returns the saved record when
    /// the backend sent one it can read. On failure the form is left as is so
    /// the user can correct and retry.
    pub async fn submit(&mut self) -> Result<Option<Question>, SubmissionError> {
        self.state.errors = validate(&self.state);
        if !self.state.errors.is_empty() {
            let err = SubmissionError::Invalid(self.state.errors.clone());
            self.loader
                .notifier()
                .notify(Notice::error("Errores en el formulario", err.user_message()));
            return Err(err);
        }

        match self.send().await {
            Ok(body) => {
                let saved = saved_record(body);
                let id = saved.as_ref().and_then(|question| question.id.as_deref());
                tracing::info!(id = ?id, "question saved");
                self.loader.notifier().notify(Notice::info(
                    "Pregunta guardada",
                    "La pregunta se guardó correctamente",
                ));
                self.reset();
                Ok(saved)
            }
            Err(err) => {
                tracing::error!("failed to save question: {err}");
                self.loader
                    .notifier()
                    .notify(Notice::error("Error", err.user_message()));
                Err(err)
            }
        }
    }

    async fn send(&self) -> Result<Value, SubmissionError> {
        let record_id = self.seed.as_ref().and_then(|seed| seed.id.as_deref());
        let request = compose(&self.state, record_id).map_err(SubmissionError::Encode)?;
        Ok(self.loader.api().submit(request).await?)
    }

    /// Discard the form and return to an empty create form
    pub fn reset(&mut self) {
        self.state = FormState::default();
        self.seed = None;
        self.resolver.reset();
    }
}

/// Read the saved record out of an accepted response body
fn saved_record(body: Value) -> Option<Question> {
    if body.is_null() {
        return None;
    }
    match serde_json::from_value(body) {
        Ok(question) => Some(question),
        Err(err) => {
            tracing::warn!("saved question body not understood: {err}");
            None
        }
    }
}
