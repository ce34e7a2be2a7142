//! Client-side validation of a question before submission

use crate::state::{ErrorMap, FormState, OptionLetter};

pub const MIN_ESTIMATED_SECONDS: i64 = 30;
pub const MAX_ESTIMATED_SECONDS: i64 = 300;

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Evaluate every rule and collect all failures.
///
/// An empty map means the form can be submitted.
pub fn validate(form: &FormState) -> ErrorMap {
    let mut errors = ErrorMap::new();
    let mut fail = |key: &str, message: String| {
        errors.insert(key.to_string(), message);
    };

    if form.subject_id.is_none() {
        fail("materia", "La materia es requerida".to_string());
    }
    if is_blank(&form.statement) {
        fail("enunciado", "El enunciado es requerido".to_string());
    }
    if is_blank(&form.feedback) {
        fail("retroalimentacion", "La retroalimentación es requerida".to_string());
    }

    for letter in OptionLetter::ALL {
        if is_blank(form.options.get(letter)) {
            fail(letter.error_key(), format!("La opción {letter} es requerida"));
        }
    }

    if is_blank(form.options.get(form.correct_option)) {
        fail(
            "respuesta_correcta",
            "La opción marcada como correcta debe tener contenido".to_string(),
        );
    }

    if !(MIN_ESTIMATED_SECONDS..=MAX_ESTIMATED_SECONDS).contains(&form.estimated_seconds) {
        fail(
            "tiempo_estimado",
            format!(
                "El tiempo debe estar entre {} y {} segundos",
                MIN_ESTIMATED_SECONDS, MAX_ESTIMATED_SECONDS
            ),
        );
    }

    errors
}
