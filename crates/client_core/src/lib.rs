//! Client for the constructed-language service: the HTTP client, the session
//! controller that drives it, and the projection a renderer draws from.

pub mod config;
pub mod controller;
pub mod error;
pub mod service;
pub mod view;

pub use config::{load_settings, ConfigError, Settings};
pub use controller::{
    CommandOutcome, InteractionController, PendingOperation, SessionState, SkipReason,
};
pub use error::{Operation, ServiceError, ServiceErrorKind};
pub use service::{HttpLanguageService, LanguageService};
pub use shared::domain::{Language, LanguageId, Translation};
pub use view::{ButtonView, LanguageView, SessionView, TranslationView};
