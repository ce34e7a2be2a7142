//! Normalization of loosely-specified input values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty of a question, always in canonical form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Difficulty {
    #[serde(rename = "facil")]
    Easy,
    #[default]
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "dificil")]
    Hard,
}

impl Difficulty {
    /// Wire value understood by the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "facil",
            Self::Medium => "media",
            Self::Hard => "dificil",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Difficulty {
    fn from(raw: String) -> Self {
        normalize_difficulty(&raw)
    }
}

/// Map free-text difficulty (Spanish or English, any case) to a canonical value.
///
/// Unrecognized input falls back to [`Difficulty::Medium`].
pub fn normalize_difficulty(raw: &str) -> Difficulty {
    match raw.trim().to_lowercase().as_str() {
        "facil" | "fácil" | "baja" | "bajo" | "sencilla" | "easy" | "low" => Difficulty::Easy,
        "dificil" | "difícil" | "alta" | "alto" | "hard" | "high" => Difficulty::Hard,
        "media" | "medio" | "normal" | "intermedia" | "medium" => Difficulty::Medium,
        _ => Difficulty::Medium,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spanish_easy_synonyms() {
        for raw in ["fácil", "facil", "baja", "FACIL", "  Baja "] {
            assert_eq!(normalize_difficulty(raw), Difficulty::Easy, "{raw}");
        }
    }

    #[test]
    fn test_medium_and_hard_synonyms() {
        assert_eq!(normalize_difficulty("Medio"), Difficulty::Medium);
        assert_eq!(normalize_difficulty("normal"), Difficulty::Medium);
        assert_eq!(normalize_difficulty("Difícil"), Difficulty::Hard);
        assert_eq!(normalize_difficulty("ALTA"), Difficulty::Hard);
        assert_eq!(normalize_difficulty("hard"), Difficulty::Hard);
    }

    #[test]
    fn test_unknown_defaults_to_medium() {
        assert_eq!(normalize_difficulty(""), Difficulty::Medium);
        assert_eq!(normalize_difficulty("extreme"), Difficulty::Medium);
    }

    #[test]
    fn test_deserialize_normalizes() {
        let parsed: Difficulty = serde_json::from_str("\"Fácil\"").unwrap();
        assert_eq!(parsed, Difficulty::Easy);
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"dificil\"");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in ".*") {
            let once = normalize_difficulty(&raw);
            prop_assert_eq!(normalize_difficulty(once.as_str()), once);
        }
    }
}
