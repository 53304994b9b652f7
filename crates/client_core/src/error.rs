//! Failure taxonomy for the language service and its user-facing messages.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateLanguage,
    Translate,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::CreateLanguage => "create_language",
            Operation::Translate => "translate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    Reported,
    Malformed,
    Transport,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("service reported: {0}")]
    Reported(String),
    #[error("malformed response: {reason}")]
    Malformed { reason: String },
    #[error("transport failure: {reason}")]
    Transport { reason: String },
}

impl ServiceError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ServiceErrorKind {
        match self {
            ServiceError::Reported(_) => ServiceErrorKind::Reported,
            ServiceError::Malformed { .. } => ServiceErrorKind::Malformed,
            ServiceError::Transport { .. } => ServiceErrorKind::Transport,
        }
    }

    pub fn user_message(&self, operation: Operation) -> String {
        match (self, operation) {
            (ServiceError::Reported(message), _) => message.clone(),
            (ServiceError::Malformed { .. }, Operation::CreateLanguage) => {
                "Failed to create language.".to_string()
            }
            (ServiceError::Malformed { .. }, Operation::Translate) => {
                "Failed to translate text.".to_string()
            }
            (ServiceError::Transport { .. }, Operation::CreateLanguage) => {
                "Failed to create language. Please try again.".to_string()
            }
            (ServiceError::Transport { .. }, Operation::Translate) => {
                "Failed to translate text. Please try again.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(value: reqwest::Error) -> Self {
        let reason = if value.is_timeout() {
            format!("request timed out: {value}")
        } else if value.is_connect() {
            format!("failed to connect: {value}")
        } else {
            value.to_string()
        };
        Self::Transport { reason }
    }
}
