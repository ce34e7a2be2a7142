//! Composition of the multipart submission payload

use crate::api::{SubmitRequest, SubmitTarget};
use crate::state::FormState;

/// Build the outbound request for the current form.
///
/// Nested values (`opciones`, `tags`, `explicacion_opciones_incorrectas`)
/// travel as JSON text parts. The `imagen` part is only present when a new
/// file was chosen. `record_id` selects update over create.
pub fn compose(
    form: &FormState,
    record_id: Option<&str>,
) -> Result<SubmitRequest, serde_json::Error> {
    let target = match record_id {
        Some(id) => SubmitTarget::Update { id: id.to_string() },
        None => SubmitTarget::Create,
    };
    let mut request = SubmitRequest::new(target);

    request.text("materia", form.subject_id.clone().unwrap_or_default());
    if let Some(competency) = &form.competency_id {
        request.text("competencia", competency.clone());
    }
    request.text("contexto", form.context.clone());
    request.text("enunciado", form.statement.clone());
    request.text("opciones", serde_json::to_string(&form.options)?);
    request.text("respuesta_correcta", form.correct_option.as_str());
    request.text("retroalimentacion", form.feedback.clone());
    request.text("explicacion", form.explanation.clone());
    request.text("habilidad_evaluada", form.skill_assessed.clone());
    request.text(
        "explicacion_opciones_incorrectas",
        serde_json::to_string(&form.incorrect_explanations)?,
    );
    request.text("estrategias_resolucion", form.strategies.clone());
    request.text("errores_comunes", form.common_mistakes.clone());
    request.text("dificultad", form.difficulty.as_str());
    request.text("tiempo_estimado", form.estimated_seconds.to_string());
    request.text("tags", serde_json::to_string(&form.tags())?);
    request.text("activa", "true");

    if let Some(attachment) = form.attachment.replacement() {
        request.file(
            "imagen",
            attachment.file_name.clone(),
            attachment.content_type.clone(),
            attachment.bytes.clone(),
        );
    }

    Ok(request)
}
