//! Form state for a single question being authored

use super::field::{split_tags, AttachmentState, FieldUpdate, OptionLetter, OptionTexts};
use crate::normalize::Difficulty;
use crate::state::Question;
use std::collections::BTreeMap;

/// Validation errors keyed by backend field name
pub type ErrorMap = BTreeMap<String, String>;

/// Estimated time used when a record carries none
pub const DEFAULT_ESTIMATED_SECONDS: i64 = 90;

/// The single source of truth for one question being authored
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub subject_id: Option<String>,
    /// Always `None` while `subject_id` is `None`
    pub competency_id: Option<String>,
    pub context: String,
    pub statement: String,
    pub options: OptionTexts,
    pub correct_option: OptionLetter,
    pub feedback: String,
    pub explanation: String,
    pub skill_assessed: String,
    pub incorrect_explanations: OptionTexts,
    pub strategies: String,
    pub common_mistakes: String,
    pub difficulty: Difficulty,
    pub estimated_seconds: i64,
    /// Raw comma-separated tag input, see [`FormState::tags`]
    pub tags_input: String,
    pub attachment: AttachmentState,
    pub errors: ErrorMap,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            subject_id: None,
            competency_id: None,
            context: String::new(),
            statement: String::new(),
            options: OptionTexts::default(),
            correct_option: OptionLetter::A,
            feedback: String::new(),
            explanation: String::new(),
            skill_assessed: String::new(),
            incorrect_explanations: OptionTexts::default(),
            strategies: String::new(),
            common_mistakes: String::new(),
            difficulty: Difficulty::Medium,
            estimated_seconds: DEFAULT_ESTIMATED_SECONDS,
            tags_input: String::new(),
            attachment: AttachmentState::default(),
            errors: ErrorMap::new(),
        }
    }
}

/// Empty ids mean "nothing selected"
fn non_empty(id: Option<String>) -> Option<String> {
    id.map(|id| id.trim().to_string()).filter(|id| !id.is_empty())
}

impl FormState {
    /// Build a complete state from a persisted record, filling defaults
    pub fn from_question(question: &Question) -> Self {
        let subject_id = non_empty(question.subject.clone());
        // the resolver drops the competency later if its list disagrees
        let competency_id = subject_id
            .as_ref()
            .and_then(|_| non_empty(question.competency.clone()));

        Self {
            subject_id,
            competency_id,
            context: question.context.clone().unwrap_or_default(),
            statement: question.statement.clone().unwrap_or_default(),
            options: question.options.clone().unwrap_or_default(),
            correct_option: question.correct_option.unwrap_or_default(),
            feedback: question.feedback.clone().unwrap_or_default(),
            explanation: question.explanation.clone().unwrap_or_default(),
            skill_assessed: question.skill_assessed.clone().unwrap_or_default(),
            incorrect_explanations: question.incorrect_explanations.clone().unwrap_or_default(),
            strategies: question.strategies.clone().unwrap_or_default(),
            common_mistakes: question.common_mistakes.clone().unwrap_or_default(),
            difficulty: question.difficulty.unwrap_or_default(),
            estimated_seconds: question
                .estimated_seconds
                .filter(|seconds| *seconds != 0)
                .unwrap_or(DEFAULT_ESTIMATED_SECONDS),
            tags_input: question.tags.join(", "),
            attachment: AttachmentState::Unchanged {
                existing_url: question.image_url.clone(),
            },
            errors: ErrorMap::new(),
        }
    }

    /// Tags derived from the raw input
    pub fn tags(&self) -> Vec<String> {
        split_tags(&self.tags_input)
    }

    /// Apply a single-field edit and clear that field's error.
    ///
    /// Subject changes only touch `subject_id` (and clear the competency when
    /// the subject becomes empty); list reconciliation belongs to the resolver.
    /// Returns `false` when the edit was refused.
    pub fn apply(&mut self, update: FieldUpdate) -> bool {
        let key = update.error_key();
        if let Some(difficulty) = update.difficulty() {
            self.difficulty = difficulty;
            self.errors.remove(key);
            return true;
        }

        match update {
            FieldUpdate::Subject(id) => {
                self.subject_id = non_empty(id);
                if self.subject_id.is_none() {
                    self.competency_id = None;
                }
            }
            FieldUpdate::Competency(id) => {
                let id = non_empty(id);
                if id.is_some() && self.subject_id.is_none() {
                    return false;
                }
                self.competency_id = id;
            }
            FieldUpdate::Context(text) => self.context = text,
            FieldUpdate::Statement(text) => self.statement = text,
            FieldUpdate::CorrectOption(letter) => self.correct_option = letter,
            FieldUpdate::Feedback(text) => self.feedback = text,
            FieldUpdate::Explanation(text) => self.explanation = text,
            FieldUpdate::SkillAssessed(text) => self.skill_assessed = text,
            FieldUpdate::IncorrectExplanation(letter, text) => {
                self.incorrect_explanations.set(letter, text);
            }
            FieldUpdate::Strategies(text) => self.strategies = text,
            FieldUpdate::CommonMistakes(text) => self.common_mistakes = text,
            FieldUpdate::Difficulty(_) => {}
            FieldUpdate::EstimatedSeconds(seconds) => self.estimated_seconds = seconds,
            FieldUpdate::Tags(raw) => self.tags_input = raw,
            FieldUpdate::Attachment(attachment) => {
                self.attachment = AttachmentState::Replace(attachment);
            }
        }
        self.errors.remove(key);
        true
    }

    /// Set one option's text and clear its error
    pub fn set_option(&mut self, letter: OptionLetter, text: String) {
        self.options.set(letter, text);
        self.errors.remove(letter.error_key());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::Attachment;

    fn create_test_question() -> Question {
        Question {
            id: Some("12".to_string()),
            subject: Some("3".to_string()),
            competency: Some("7".to_string()),
            statement: Some("¿Cuánto es 2+2?".to_string()),
            options: Some(OptionTexts {
                a: "3".to_string(),
                b: "4".to_string(),
                c: "5".to_string(),
                d: "6".to_string(),
            }),
            correct_option: Some(OptionLetter::B),
            feedback: Some("Suma básica".to_string()),
            difficulty: Some(Difficulty::Easy),
            estimated_seconds: Some(60),
            tags: vec!["aritmetica".to_string(), "suma".to_string()],
            image_url: Some("/media/preguntas/suma.png".to_string()),
            ..Default::default()
        }
    }

    mod defaults {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_form_defaults() {
            let form = FormState::default();
            assert!(form.subject_id.is_none());
            assert!(form.competency_id.is_none());
            assert_eq!(form.correct_option, OptionLetter::A);
            assert_eq!(form.difficulty, Difficulty::Medium);
            assert_eq!(form.estimated_seconds, 90);
            assert!(form.tags().is_empty());
            assert!(form.errors.is_empty());
        }
    }

    mod hydration {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_from_question_loads_values() {
            let form = FormState::from_question(&create_test_question());

            assert_eq!(form.subject_id.as_deref(), Some("3"));
            assert_eq!(form.competency_id.as_deref(), Some("7"));
            assert_eq!(form.options.get(OptionLetter::B), "4");
            assert_eq!(form.correct_option, OptionLetter::B);
            assert_eq!(form.difficulty, Difficulty::Easy);
            assert_eq!(form.estimated_seconds, 60);
            assert_eq!(form.tags_input, "aritmetica, suma");
            assert_eq!(
                form.attachment,
                AttachmentState::Unchanged {
                    existing_url: Some("/media/preguntas/suma.png".to_string())
                }
            );
        }

        #[test]
        fn test_from_question_fills_defaults() {
            let form = FormState::from_question(&Question {
                estimated_seconds: Some(0),
                ..Default::default()
            });
            assert_eq!(form, FormState::default());
        }

        #[test]
        fn test_competency_without_subject_is_dropped() {
            let form = FormState::from_question(&Question {
                competency: Some("7".to_string()),
                ..Default::default()
            });
            assert!(form.competency_id.is_none());
        }
    }

    mod edits {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_clearing_subject_clears_competency() {
            let mut form = FormState::from_question(&create_test_question());
            assert!(form.apply(FieldUpdate::Subject(Some("  ".to_string()))));
            assert!(form.subject_id.is_none());
            assert!(form.competency_id.is_none());
        }

        #[test]
        fn test_competency_refused_without_subject() {
            let mut form = FormState::default();
            assert!(!form.apply(FieldUpdate::Competency(Some("7".to_string()))));
            assert!(form.competency_id.is_none());
        }

        #[test]
        fn test_edit_clears_field_error() {
            let mut form = FormState::default();
            form.errors.insert("enunciado".to_string(), "required".to_string());
            form.errors.insert("materia".to_string(), "required".to_string());
            form.apply(FieldUpdate::Statement("Nuevo".to_string()));
            assert!(!form.errors.contains_key("enunciado"));
            assert!(form.errors.contains_key("materia"));
        }

        #[test]
        fn test_set_option_clears_option_error() {
            let mut form = FormState::default();
            form.errors.insert("opcion_C".to_string(), "required".to_string());
            form.set_option(OptionLetter::C, "texto".to_string());
            assert_eq!(form.options.get(OptionLetter::C), "texto");
            assert!(form.errors.is_empty());
        }

        #[test]
        fn test_difficulty_is_normalized() {
            let mut form = FormState::default();
            form.apply(FieldUpdate::Difficulty("Difícil".to_string()));
            assert_eq!(form.difficulty, Difficulty::Hard);
        }

        #[test]
        fn test_attachment_replaces() {
            let mut form = FormState::default();
            form.apply(FieldUpdate::Attachment(Attachment {
                file_name: "grafico.png".to_string(),
                content_type: "image/png".to_string(),
                bytes: vec![1, 2, 3],
            }));
            assert_eq!(
                form.attachment.replacement().map(|a| a.file_name.as_str()),
                Some("grafico.png")
            );
        }
    }
}
