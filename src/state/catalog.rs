//! Selectable categories: subjects and the competencies that depend on them

use serde::{Deserialize, Deserializer, Serialize};

/// Backend ids arrive as numbers or strings
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

/// Deserialize an id that may be numeric into its string form
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

/// Deserialize an optional id, treating `null` and `""` as absent
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.map(String::from).filter(|id| !id.is_empty()))
}

/// Reference to another record: either a bare id or an embedded object
#[derive(Deserialize)]
#[serde(untagged)]
enum RawReference {
    Id(RawId),
    Object { id: RawId },
}

/// Deserialize a reference field (`materia`, `competencia`) into its id
pub fn deserialize_reference<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawReference>::deserialize(deserializer)?;
    Ok(raw
        .map(|reference| match reference {
            RawReference::Id(id) | RawReference::Object { id } => String::from(id),
        })
        .filter(|id| !id.is_empty()))
}

/// Top-level category a question belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "nombre_display", default)]
    pub display_name: Option<String>,
}

impl Subject {
    /// Name to show in a selection control
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Category filtered by the selected subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competency {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "nombre", default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_subject_numeric_id() {
        let subject: Subject = serde_json::from_value(json!({
            "id": 3,
            "nombre": "matematicas",
            "nombre_display": "Matemáticas"
        }))
        .unwrap();
        assert_eq!(subject.id, "3");
        assert_eq!(subject.display_name(), "Matemáticas");
    }

    #[test]
    fn test_subject_display_falls_back_to_name() {
        let subject: Subject =
            serde_json::from_value(json!({"id": "4", "nombre": "ingles"})).unwrap();
        assert_eq!(subject.display_name(), "ingles");
    }

    #[test]
    fn test_competency_string_id() {
        let competency: Competency =
            serde_json::from_value(json!({"id": "7", "nombre": "Razonamiento"})).unwrap();
        assert_eq!(competency.id, "7");
        assert_eq!(competency.name, "Razonamiento");
    }
}
