//! JSON bodies exchanged with the language service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Language, LanguageId, Translation};

pub const CREATE_LANGUAGE_SEGMENTS: [&str; 2] = ["api", "create-language"];
pub const TRANSLATE_SEGMENTS: [&str; 2] = ["api", "translate"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLanguageResponse {
    pub id: LanguageId,
    pub phonemes: Vec<String>,
    pub syllable_structure: Vec<String>,
    pub example_words: Vec<String>,
}

impl From<CreateLanguageResponse> for Language {
    fn from(value: CreateLanguageResponse) -> Self {
        Self {
            id: value.id,
            phonemes: value.phonemes,
            syllable_structure: value.syllable_structure,
            example_words: value.example_words,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub original: String,
    pub translated: String,
    pub word_mapping: BTreeMap<String, String>,
}

impl From<TranslationResponse> for Translation {
    fn from(value: TranslationResponse) -> Self {
        Self {
            original: value.original,
            translated: value.translated,
            word_mapping: value.word_mapping,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_language_response_rejects_missing_fields() {
        let raw = json!({ "id": "abc", "phonemes": ["p"], "syllable_structure": ["CV"] });
        assert!(serde_json::from_value::<CreateLanguageResponse>(raw).is_err());
    }

    #[test]
    fn create_language_response_rejects_mistyped_fields() {
        let raw = json!({
            "id": 7,
            "phonemes": ["p"],
            "syllable_structure": ["CV"],
            "example_words": ["pa"],
        });
        assert!(serde_json::from_value::<CreateLanguageResponse>(raw).is_err());
    }

    #[test]
    fn translation_response_tolerates_extra_fields() {
        let raw = json!({
            "original": "hello",
            "translated": "pa",
            "word_mapping": { "hello": "pa" },
            "elapsed_ms": 12,
        });
        let translation: Translation = serde_json::from_value::<TranslationResponse>(raw)
            .expect("decode")
            .into();
        assert_eq!(translation.word_mapping.get("hello").map(String::as_str), Some("pa"));
    }
}
