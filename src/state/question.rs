//! Persisted question record, used as the seed when editing

use super::catalog::{deserialize_optional_id, deserialize_reference};
use super::forms::{OptionLetter, OptionTexts};
use crate::normalize::Difficulty;
use serde::{Deserialize, Deserializer, Serialize};

fn deserialize_option_letter<'de, D>(deserializer: D) -> Result<Option<OptionLetter>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(OptionLetter::parse))
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Question as returned by the backend
///
/// Every field is optional on the wire; hydration fills in defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Question {
    #[serde(deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(rename = "materia", deserialize_with = "deserialize_reference")]
    pub subject: Option<String>,
    #[serde(rename = "competencia", deserialize_with = "deserialize_reference")]
    pub competency: Option<String>,
    #[serde(rename = "contexto")]
    pub context: Option<String>,
    #[serde(rename = "imagen_url")]
    pub image_url: Option<String>,
    #[serde(rename = "enunciado")]
    pub statement: Option<String>,
    #[serde(rename = "opciones")]
    pub options: Option<OptionTexts>,
    #[serde(rename = "respuesta_correcta", deserialize_with = "deserialize_option_letter")]
    pub correct_option: Option<OptionLetter>,
    #[serde(rename = "retroalimentacion")]
    pub feedback: Option<String>,
    #[serde(rename = "explicacion")]
    pub explanation: Option<String>,
    #[serde(rename = "habilidad_evaluada")]
    pub skill_assessed: Option<String>,
    #[serde(rename = "explicacion_opciones_incorrectas")]
    pub incorrect_explanations: Option<OptionTexts>,
    #[serde(rename = "estrategias_resolucion")]
    pub strategies: Option<String>,
    #[serde(rename = "errores_comunes")]
    pub common_mistakes: Option<String>,
    #[serde(rename = "dificultad")]
    pub difficulty: Option<Difficulty>,
    #[serde(rename = "tiempo_estimado")]
    pub estimated_seconds: Option<i64>,
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(rename = "activa")]
    pub active: Option<bool>,
}
