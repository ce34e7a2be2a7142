//! Subject → competency dependency resolution
//!
//! Every event that can affect the dependent competency field funnels
//! through [`DependencyResolver`]:
//!
//! - the subject changed (user edit or hydration from a record),
//! - a competency list finished loading,
//! - the record being edited changed.
//!
//! Each subject change bumps a generation counter and hands out a
//! [`CompetencyRequest`] tagged with it. A loaded list is only applied if its
//! tag still matches the current generation, so a slow response for a subject
//! the user already moved away from is discarded on arrival.

use crate::state::{Competency, FormState};

/// Ticket for one competency fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetencyRequest {
    pub subject_id: String,
    generation: u64,
}

impl CompetencyRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Where the dependent list stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DependentState {
    /// No subject selected
    #[default]
    Empty,
    /// Competencies for `subject` are in flight
    Loading { subject: String },
    /// Competencies for `subject` are loaded
    Ready { subject: String },
}

/// Outcome of applying a loaded competency list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The list was applied to the form
    Applied,
    /// The list belonged to an abandoned subject and was dropped
    Stale,
}

/// Reconciles the competency field with the selected subject
#[derive(Debug, Default)]
pub struct DependencyResolver {
    generation: u64,
    state: DependentState,
    competencies: Vec<Competency>,
    /// Competency of the record being edited, honored once its list loads
    seed_competency: Option<String>,
}

impl DependencyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DependentState {
        &self.state
    }

    /// Competencies selectable right now; empty until the current list loads
    pub fn competencies(&self) -> &[Competency] {
        match self.state {
            DependentState::Ready { .. } => &self.competencies,
            DependentState::Empty | DependentState::Loading { .. } => &[],
        }
    }

    /// Remember (or forget) the competency of the record being edited
    pub fn set_seed(&mut self, competency: Option<String>) {
        self.seed_competency = competency.filter(|id| !id.is_empty());
    }

    /// React to `form.subject_id` having changed.
    ///
    /// An empty subject clears the competency synchronously and needs no
    /// fetch. A non-empty subject returns the request to fetch; the current
    /// competency is kept until that list arrives.
    pub fn subject_changed(&mut self, form: &mut FormState) -> Option<CompetencyRequest> {
        self.generation += 1;
        self.competencies.clear();

        match &form.subject_id {
            None => {
                form.competency_id = None;
                self.state = DependentState::Empty;
                tracing::debug!(generation = self.generation, "subject cleared");
                None
            }
            Some(subject) => {
                tracing::debug!(generation = self.generation, %subject, "loading competencies");
                self.state = DependentState::Loading {
                    subject: subject.clone(),
                };
                Some(CompetencyRequest {
                    subject_id: subject.clone(),
                    generation: self.generation,
                })
            }
        }
    }

    /// Apply a loaded list if it still belongs to the current subject
    pub fn competencies_loaded(
        &mut self,
        form: &mut FormState,
        request: &CompetencyRequest,
        competencies: Vec<Competency>,
    ) -> Resolution {
        let current = form.subject_id.as_deref() == Some(request.subject_id.as_str());
        if request.generation != self.generation || !current {
            tracing::debug!(
                generation = request.generation,
                current = self.generation,
                subject = %request.subject_id,
                "discarding stale competency list"
            );
            return Resolution::Stale;
        }

        self.competencies = competencies;
        self.state = DependentState::Ready {
            subject: request.subject_id.clone(),
        };
        self.reconcile(form);
        Resolution::Applied
    }

    /// Forget everything; in-flight lists become stale
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = DependentState::Empty;
        self.competencies.clear();
        self.seed_competency = None;
    }

    fn contains(&self, id: &str) -> bool {
        self.competencies.iter().any(|competency| competency.id == id)
    }

    fn reconcile(&self, form: &mut FormState) {
        if let Some(seed) = self.seed_competency.as_deref() {
            if self.contains(seed) {
                if form.competency_id.as_deref() != Some(seed) {
                    tracing::debug!(competency = seed, "restoring competency from record");
                    form.competency_id = Some(seed.to_string());
                }
                return;
            }
        }

        if let Some(selected) = form.competency_id.as_deref() {
            if !self.contains(selected) {
                tracing::debug!(competency = selected, "competency not offered for subject");
                form.competency_id = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FieldUpdate, Question};

    fn competency(id: &str) -> Competency {
        Competency {
            id: id.to_string(),
            name: format!("Competencia {id}"),
        }
    }

    fn select(
        resolver: &mut DependencyResolver,
        form: &mut FormState,
        subject: &str,
    ) -> Option<CompetencyRequest> {
        form.apply(FieldUpdate::Subject(Some(subject.to_string())));
        resolver.subject_changed(form)
    }

    /// Hydrate the way the controller does: full reset, then the cascade
    fn hydrate(
        resolver: &mut DependencyResolver,
        question: &Question,
    ) -> (FormState, Option<CompetencyRequest>) {
        let mut form = FormState::from_question(question);
        resolver.set_seed(question.competency.clone());
        let request = resolver.subject_changed(&mut form);
        (form, request)
    }

    fn seed(subject: &str, competency: &str) -> Question {
        Question {
            id: Some("12".to_string()),
            subject: Some(subject.to_string()),
            competency: Some(competency.to_string()),
            ..Default::default()
        }
    }

    mod empty_subject {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_clearing_subject_clears_competency_synchronously() {
            for subject in ["1", "3", "42"] {
                let mut resolver = DependencyResolver::new();
                let mut form = FormState::default();
                let request = select(&mut resolver, &mut form, subject).unwrap();
                resolver.competencies_loaded(&mut form, &request, vec![competency("7")]);
                form.apply(FieldUpdate::Competency(Some("7".to_string())));

                form.apply(FieldUpdate::Subject(None));
                assert!(form.competency_id.is_none());
                assert!(resolver.subject_changed(&mut form).is_none());
                assert!(form.competency_id.is_none());
                assert_eq!(resolver.state(), &DependentState::Empty);
                assert!(resolver.competencies().is_empty());
            }
        }
    }

    mod loading {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_subject_keeps_competency_until_loaded() {
            let mut resolver = DependencyResolver::new();
            let (mut form, _) = hydrate(&mut resolver, &seed("3", "7"));
            let request = select(&mut resolver, &mut form, "4").unwrap();

            assert_eq!(form.competency_id.as_deref(), Some("7"));
            assert_eq!(
                resolver.state(),
                &DependentState::Loading {
                    subject: "4".to_string()
                }
            );
            assert!(resolver.competencies().is_empty());

            resolver.competencies_loaded(&mut form, &request, vec![competency("11")]);
            assert!(form.competency_id.is_none());
        }

        #[test]
        fn test_loaded_list_becomes_selectable() {
            let mut resolver = DependencyResolver::new();
            let mut form = FormState::default();
            let request = select(&mut resolver, &mut form, "3").unwrap();
            let outcome = resolver.competencies_loaded(
                &mut form,
                &request,
                vec![competency("7"), competency("9")],
            );

            assert_eq!(outcome, Resolution::Applied);
            assert_eq!(resolver.competencies().len(), 2);
            assert_eq!(
                resolver.state(),
                &DependentState::Ready {
                    subject: "3".to_string()
                }
            );
        }

        #[test]
        fn test_user_choice_survives_when_still_offered() {
            let mut resolver = DependencyResolver::new();
            let mut form = FormState::default();
            let request = select(&mut resolver, &mut form, "3").unwrap();
            resolver.competencies_loaded(
                &mut form,
                &request,
                vec![competency("7"), competency("9")],
            );
            form.apply(FieldUpdate::Competency(Some("9".to_string())));

            // re-selecting the same subject reloads the same list
            let request = select(&mut resolver, &mut form, "3").unwrap();
            resolver.competencies_loaded(
                &mut form,
                &request,
                vec![competency("7"), competency("9")],
            );
            assert_eq!(form.competency_id.as_deref(), Some("9"));
        }
    }

    mod staleness {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_later_subject_wins_when_earlier_resolves_last() {
            let mut resolver = DependencyResolver::new();
            let mut form = FormState::default();
            let request_a = select(&mut resolver, &mut form, "A").unwrap();
            let request_b = select(&mut resolver, &mut form, "B").unwrap();

            // B resolves first, then A's slow response arrives
            let b = resolver.competencies_loaded(&mut form, &request_b, vec![competency("b1")]);
            let a = resolver.competencies_loaded(&mut form, &request_a, vec![competency("a1")]);

            assert_eq!(b, Resolution::Applied);
            assert_eq!(a, Resolution::Stale);
            assert_eq!(resolver.competencies(), &[competency("b1")]);
        }

        #[test]
        fn test_earlier_subject_dropped_when_resolving_first() {
            let mut resolver = DependencyResolver::new();
            let mut form = FormState::default();
            let request_a = select(&mut resolver, &mut form, "A").unwrap();
            let request_b = select(&mut resolver, &mut form, "B").unwrap();

            assert_eq!(
                resolver.competencies_loaded(&mut form, &request_a, vec![competency("a1")]),
                Resolution::Stale
            );
            assert_eq!(
                resolver.state(),
                &DependentState::Loading {
                    subject: "B".to_string()
                }
            );
            resolver.competencies_loaded(&mut form, &request_b, vec![competency("b1")]);
            assert_eq!(resolver.competencies(), &[competency("b1")]);
        }

        #[test]
        fn test_returning_to_same_subject_still_invalidates_old_request() {
            let mut resolver = DependencyResolver::new();
            let mut form = FormState::default();
            let first = select(&mut resolver, &mut form, "A").unwrap();
            select(&mut resolver, &mut form, "B").unwrap();
            let second = select(&mut resolver, &mut form, "A").unwrap();

            assert!(second.generation() > first.generation());
            assert_eq!(
                resolver.competencies_loaded(&mut form, &first, vec![competency("old")]),
                Resolution::Stale
            );
            assert_eq!(
                resolver.competencies_loaded(&mut form, &second, vec![competency("new")]),
                Resolution::Applied
            );
        }

        #[test]
        fn test_reset_invalidates_in_flight() {
            let mut resolver = DependencyResolver::new();
            let mut form = FormState::default();
            let request = select(&mut resolver, &mut form, "A").unwrap();
            resolver.reset();

            assert_eq!(
                resolver.competencies_loaded(&mut form, &request, vec![competency("a1")]),
                Resolution::Stale
            );
        }
    }

    mod edit_reconciliation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_seed_competency_kept_when_offered() {
            let mut resolver = DependencyResolver::new();
            let (mut form, request) = hydrate(&mut resolver, &seed("3", "7"));
            let request = request.unwrap();
            assert_eq!(request.subject_id, "3");

            resolver.competencies_loaded(
                &mut form,
                &request,
                vec![competency("7"), competency("9")],
            );
            assert_eq!(form.competency_id.as_deref(), Some("7"));
        }

        #[test]
        fn test_seed_competency_dropped_when_not_offered() {
            let mut resolver = DependencyResolver::new();
            let (mut form, request) = hydrate(&mut resolver, &seed("3", "7"));

            resolver.competencies_loaded(&mut form, &request.unwrap(), vec![competency("9")]);
            assert!(form.competency_id.is_none());
        }

        #[test]
        fn test_seed_competency_dropped_when_subject_has_none() {
            let mut resolver = DependencyResolver::new();
            let (mut form, request) = hydrate(&mut resolver, &seed("3", "7"));

            let outcome = resolver.competencies_loaded(&mut form, &request.unwrap(), Vec::new());
            assert_eq!(outcome, Resolution::Applied);
            assert!(form.competency_id.is_none());
        }

        #[test]
        fn test_seed_restored_after_round_trip_through_other_subject() {
            let mut resolver = DependencyResolver::new();
            let (mut form, request) = hydrate(&mut resolver, &seed("3", "7"));
            resolver.competencies_loaded(&mut form, &request.unwrap(), vec![competency("7")]);

            let request = select(&mut resolver, &mut form, "4").unwrap();
            resolver.competencies_loaded(&mut form, &request, vec![competency("20")]);
            assert!(form.competency_id.is_none());

            let request = select(&mut resolver, &mut form, "3").unwrap();
            resolver.competencies_loaded(&mut form, &request, vec![competency("7")]);
            assert_eq!(form.competency_id.as_deref(), Some("7"));
        }

        #[test]
        fn test_seed_without_subject_has_no_competency() {
            let mut resolver = DependencyResolver::new();
            let question = Question {
                competency: Some("7".to_string()),
                ..Default::default()
            };
            let (form, request) = hydrate(&mut resolver, &question);

            assert!(request.is_none());
            assert!(form.competency_id.is_none());
        }
    }
}
