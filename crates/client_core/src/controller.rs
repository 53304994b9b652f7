//! Session state and the two user-triggered commands that drive the language service.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shared::domain::{Language, LanguageId, Translation};
use tracing::{debug, info, warn};

use crate::{
    error::{Operation, ServiceErrorKind},
    service::LanguageService,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PendingOperation {
    #[default]
    None,
    Creating,
    Translating,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub current_language: Option<Language>,
    pub current_translation: Option<Translation>,
    pub pending_operation: PendingOperation,
    pub last_error: Option<String>,
    pub draft_input: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Busy(PendingOperation),
    NoLanguage,
    EmptyText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Skipped(SkipReason),
    Succeeded,
    Failed(ServiceErrorKind),
    Discarded,
}

/// Owns one session and serialises remote work for it: at most one
/// create or translate call is outstanding at any time.
pub struct InteractionController<S> {
    service: Arc<S>,
    state: Mutex<SessionState>,
}

impl<S: LanguageService> InteractionController<S> {
    pub fn new(service: S) -> Self {
        Self::with_shared_service(Arc::new(service))
    }

    pub fn with_shared_service(service: Arc<S>) -> Self {
        Self {
            service,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    pub fn set_draft_input(&self, text: impl Into<String>) {
        self.lock().draft_input = text.into();
    }

    pub async fn request_new_language(&self) -> CommandOutcome {
        let in_flight = {
            let mut state = self.lock();
            if let Err(reason) = begin(&mut state, PendingOperation::Creating) {
                return CommandOutcome::Skipped(reason);
            }
            InFlight::new(&self.state)
        };

        let result = self.service.create_language().await;

        let mut state = in_flight.finish();
        state.pending_operation = PendingOperation::None;
        match result {
            Ok(language) => {
                info!(
                    language_id = %language.id,
                    words = language.example_words.len(),
                    "language created"
                );
                state.current_language = Some(language);
                state.current_translation = None;
                state.last_error = None;
                CommandOutcome::Succeeded
            }
            Err(err) => {
                state.last_error = Some(err.user_message(Operation::CreateLanguage));
                CommandOutcome::Failed(err.kind())
            }
        }
    }

    pub async fn request_translation(&self, text: &str) -> CommandOutcome {
        let (language_id, in_flight) = {
            let mut state = self.lock();
            let Some(language) = state.current_language.as_ref() else {
                debug!("translation skipped: no active language");
                return CommandOutcome::Skipped(SkipReason::NoLanguage);
            };
            if text.is_empty() {
                debug!("translation skipped: empty text");
                return CommandOutcome::Skipped(SkipReason::EmptyText);
            }
            let language_id = language.id.clone();
            if let Err(reason) = begin(&mut state, PendingOperation::Translating) {
                return CommandOutcome::Skipped(reason);
            }
            (language_id, InFlight::new(&self.state))
        };

        let result = self.service.translate(&language_id, text).await;

        let mut state = in_flight.finish();
        state.pending_operation = PendingOperation::None;
        match result {
            Ok(translation) => {
                let still_active = state
                    .current_language
                    .as_ref()
                    .is_some_and(|language| language.id == language_id);
                if !still_active {
                    warn!(%language_id, "dropping translation for a replaced language");
                    return CommandOutcome::Discarded;
                }
                info!(%language_id, words = translation.word_mapping.len(), "text translated");
                state.current_translation = Some(translation);
                CommandOutcome::Succeeded
            }
            Err(err) => {
                state.last_error = Some(err.user_message(Operation::Translate));
                CommandOutcome::Failed(err.kind())
            }
        }
    }

    pub async fn translate_draft(&self) -> CommandOutcome {
        let draft = self.lock().draft_input.clone();
        self.request_translation(&draft).await
    }

    pub fn active_language_id(&self) -> Option<LanguageId> {
        self.lock()
            .current_language
            .as_ref()
            .map(|language| language.id.clone())
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn begin(state: &mut SessionState, operation: PendingOperation) -> Result<(), SkipReason> {
    if state.pending_operation != PendingOperation::None {
        debug!(
            requested = ?operation,
            pending = ?state.pending_operation,
            "command skipped: another request is in flight"
        );
        return Err(SkipReason::Busy(state.pending_operation));
    }
    state.pending_operation = operation;
    state.last_error = None;
    Ok(())
}

// Clears `pending_operation` if a command future is dropped mid-request.
struct InFlight<'a> {
    state: &'a Mutex<SessionState>,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a Mutex<SessionState>) -> Self {
        Self {
            state,
            finished: false,
        }
    }

    fn finish(mut self) -> MutexGuard<'a, SessionState> {
        self.finished = true;
        let state = self.state;
        state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        warn!(pending = ?state.pending_operation, "request abandoned before completion");
        state.pending_operation = PendingOperation::None;
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
