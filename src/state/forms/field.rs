//! Form field value objects

use crate::normalize::{normalize_difficulty, Difficulty};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One of the four answer options
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum OptionLetter {
    #[default]
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    pub const ALL: [OptionLetter; 4] = [Self::A, Self::B, Self::C, Self::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    /// Parse a letter, accepting lowercase and surrounding whitespace
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "A" | "a" => Some(Self::A),
            "B" | "b" => Some(Self::B),
            "C" | "c" => Some(Self::C),
            "D" | "d" => Some(Self::D),
            _ => None,
        }
    }

    /// Error-map key for this option's text
    pub fn error_key(&self) -> &'static str {
        match self {
            Self::A => "opcion_A",
            Self::B => "opcion_B",
            Self::C => "opcion_C",
            Self::D => "opcion_D",
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Option value as stored by the backend: plain text or a `{texto, imagen}` entry
#[derive(Deserialize)]
#[serde(untagged)]
enum OptionValue {
    Text(String),
    Entry {
        #[serde(default)]
        texto: Option<String>,
    },
}

fn deserialize_option_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OptionValue>::deserialize(deserializer)? {
        Some(OptionValue::Text(text)) => text,
        Some(OptionValue::Entry { texto }) => texto.unwrap_or_default(),
        None => String::new(),
    })
}

/// Text attached to each of the four options
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptionTexts {
    #[serde(rename = "A", default, deserialize_with = "deserialize_option_text")]
    pub a: String,
    #[serde(rename = "B", default, deserialize_with = "deserialize_option_text")]
    pub b: String,
    #[serde(rename = "C", default, deserialize_with = "deserialize_option_text")]
    pub c: String,
    #[serde(rename = "D", default, deserialize_with = "deserialize_option_text")]
    pub d: String,
}

impl OptionTexts {
    pub fn get(&self, letter: OptionLetter) -> &str {
        match letter {
            OptionLetter::A => &self.a,
            OptionLetter::B => &self.b,
            OptionLetter::C => &self.c,
            OptionLetter::D => &self.d,
        }
    }

    pub fn set(&mut self, letter: OptionLetter, text: String) {
        let slot = match letter {
            OptionLetter::A => &mut self.a,
            OptionLetter::B => &mut self.b,
            OptionLetter::C => &mut self.c,
            OptionLetter::D => &mut self.d,
        };
        *slot = text;
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionLetter, &str)> {
        OptionLetter::ALL.into_iter().map(move |letter| (letter, self.get(letter)))
    }
}

/// A new binary attachment chosen by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Attachment state of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentState {
    /// Keep whatever the record already has (if anything)
    Unchanged { existing_url: Option<String> },
    /// Replace with a freshly selected file
    Replace(Attachment),
}

impl Default for AttachmentState {
    fn default() -> Self {
        AttachmentState::Unchanged { existing_url: None }
    }
}

impl AttachmentState {
    /// The new file to upload, if one was chosen
    pub fn replacement(&self) -> Option<&Attachment> {
        match self {
            AttachmentState::Replace(attachment) => Some(attachment),
            AttachmentState::Unchanged { .. } => None,
        }
    }
}

/// A single-field edit coming from the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Subject(Option<String>),
    Competency(Option<String>),
    Context(String),
    Statement(String),
    CorrectOption(OptionLetter),
    Feedback(String),
    Explanation(String),
    SkillAssessed(String),
    IncorrectExplanation(OptionLetter, String),
    Strategies(String),
    CommonMistakes(String),
    /// Raw difficulty text; normalized when applied
    Difficulty(String),
    EstimatedSeconds(i64),
    /// Raw comma-separated tag input
    Tags(String),
    Attachment(Attachment),
}

impl FieldUpdate {
    /// Key under which this field reports validation errors
    pub fn error_key(&self) -> &'static str {
        match self {
            FieldUpdate::Subject(_) => "materia",
            FieldUpdate::Competency(_) => "competencia",
            FieldUpdate::Context(_) => "contexto",
            FieldUpdate::Statement(_) => "enunciado",
            FieldUpdate::CorrectOption(_) => "respuesta_correcta",
            FieldUpdate::Feedback(_) => "retroalimentacion",
            FieldUpdate::Explanation(_) => "explicacion",
            FieldUpdate::SkillAssessed(_) => "habilidad_evaluada",
            FieldUpdate::IncorrectExplanation(..) => "explicacion_opciones_incorrectas",
            FieldUpdate::Strategies(_) => "estrategias_resolucion",
            FieldUpdate::CommonMistakes(_) => "errores_comunes",
            FieldUpdate::Difficulty(_) => "dificultad",
            FieldUpdate::EstimatedSeconds(_) => "tiempo_estimado",
            FieldUpdate::Tags(_) => "tags",
            FieldUpdate::Attachment(_) => "imagen",
        }
    }

    /// Difficulty this update would store, if it is a difficulty update
    pub fn difficulty(&self) -> Option<Difficulty> {
        match self {
            FieldUpdate::Difficulty(raw) => Some(normalize_difficulty(raw)),
            _ => None,
        }
    }
}

/// Split raw comma-separated tag input, dropping blank entries
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
