use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageId(pub String);

impl LanguageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn short(&self, len: usize) -> &str {
        match self.0.char_indices().nth(len) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: LanguageId,
    pub phonemes: Vec<String>,
    pub syllable_structure: Vec<String>,
    pub example_words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub original: String,
    pub translated: String,
    pub word_mapping: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_truncates_on_char_boundary() {
        let id = LanguageId::new("ä1b2c3d4e5");
        assert_eq!(id.short(8), "ä1b2c3d4");
        assert_eq!(LanguageId::new("abc").short(8), "abc");
    }

    #[test]
    fn language_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&LanguageId::new("abc123")).expect("serialize");
        assert_eq!(json, "\"abc123\"");
    }
}
