//! Pure projection of [`SessionState`] into what a renderer draws.

use crate::controller::{PendingOperation, SessionState};

const SHORT_ID_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageView {
    pub short_id: String,
    pub phonemes: Vec<String>,
    pub syllable_structure: Vec<String>,
    pub example_words: Vec<String>,
    pub draft_input: String,
    pub translate_button: ButtonView,
    pub translation: Option<TranslationView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationView {
    pub translated: String,
    pub word_mapping: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub create_button: ButtonView,
    pub error: Option<String>,
    pub language: Option<LanguageView>,
}

impl SessionView {
    pub fn project(state: &SessionState) -> Self {
        let idle = state.pending_operation == PendingOperation::None;

        let create_button = ButtonView {
            label: if state.pending_operation == PendingOperation::Creating {
                "Creating..."
            } else {
                "Create New Language"
            },
            enabled: idle,
        };

        let language = state.current_language.as_ref().map(|language| LanguageView {
            short_id: format!("{}...", language.id.short(SHORT_ID_LEN)),
            phonemes: language.phonemes.clone(),
            syllable_structure: language.syllable_structure.clone(),
            example_words: language.example_words.clone(),
            draft_input: state.draft_input.clone(),
            translate_button: ButtonView {
                label: if state.pending_operation == PendingOperation::Translating {
                    "Translating..."
                } else {
                    "Translate"
                },
                enabled: idle && !state.draft_input.is_empty(),
            },
            translation: state
                .current_translation
                .as_ref()
                .map(|translation| TranslationView {
                    translated: translation.translated.clone(),
                    word_mapping: translation
                        .word_mapping
                        .iter()
                        .map(|(original, translated)| (original.clone(), translated.clone()))
                        .collect(),
                }),
        });

        Self {
            create_button,
            error: state.last_error.clone(),
            language,
        }
    }
}
