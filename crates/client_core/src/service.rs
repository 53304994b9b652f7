//! HTTP client for the two language service endpoints.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    domain::{Language, LanguageId, Translation},
    protocol::{
        CreateLanguageResponse, TranslateRequest, TranslationResponse, CREATE_LANGUAGE_SEGMENTS,
        TRANSLATE_SEGMENTS,
    },
};
use tracing::{debug, warn};
use url::Url;

use crate::{
    config::{ConfigError, Settings},
    error::{Operation, ServiceError},
};

#[async_trait]
pub trait LanguageService: Send + Sync {
    async fn create_language(&self) -> Result<Language, ServiceError>;
    async fn translate(
        &self,
        language_id: &LanguageId,
        text: &str,
    ) -> Result<Translation, ServiceError>;
}

pub struct HttpLanguageService {
    http: Client,
    base_url: Url,
}

impl HttpLanguageService {
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&settings.api_url).map_err(|e| ConfigError::InvalidValue {
            key: "api_url".into(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                key: "api_url".into(),
                reason: format!("'{base_url}' cannot be used as a base address"),
            });
        }

        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn execute<T: DeserializeOwned + Send>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T, ServiceError> {
        let result = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            decode_response(status, &body)
        }
        .await;

        if let Err(err) = &result {
            warn!(
                operation = operation.name(),
                kind = ?err.kind(),
                error = %err,
                "language service request failed"
            );
        }
        result
    }
}

#[async_trait]
impl LanguageService for HttpLanguageService {
    async fn create_language(&self) -> Result<Language, ServiceError> {
        let url = self.endpoint(CREATE_LANGUAGE_SEGMENTS);
        debug!(operation = "create_language", %url, "sending request");

        let body: CreateLanguageResponse = self
            .execute(Operation::CreateLanguage, self.http.post(url))
            .await?;
        validate_language(body.into())
    }

    async fn translate(
        &self,
        language_id: &LanguageId,
        text: &str,
    ) -> Result<Translation, ServiceError> {
        if language_id.as_str().is_empty() || text.is_empty() {
            return Err(ServiceError::malformed(
                "translate requires a language id and non-empty text",
            ));
        }

        let mut segments = TRANSLATE_SEGMENTS.to_vec();
        segments.push(language_id.as_str());
        let url = self.endpoint(segments);
        debug!(operation = "translate", %url, chars = text.chars().count(), "sending request");

        let body: TranslationResponse = self
            .execute(
                Operation::Translate,
                self.http.post(url).json(&TranslateRequest {
                    text: text.to_string(),
                }),
            )
            .await?;
        validate_translation(body.into(), text)
    }
}

// A string `error` field wins over the status code. Non-JSON bodies and non-2xx
// without an error string are transport failures.
pub(crate) fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, ServiceError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        ServiceError::transport(format!("status {status}: response body is not JSON: {e}"))
    })?;

    match value.get("error") {
        Some(Value::String(message)) if !message.trim().is_empty() => {
            return Err(ServiceError::Reported(message.clone()));
        }
        None | Some(Value::Null) => {}
        Some(other) if status.is_success() => {
            return Err(ServiceError::malformed(format!(
                "unusable error field: {other}"
            )));
        }
        Some(_) => {}
    }

    if !status.is_success() {
        return Err(ServiceError::transport(format!("unexpected status {status}")));
    }

    serde_json::from_value(value).map_err(|e| ServiceError::malformed(e.to_string()))
}

fn validate_language(language: Language) -> Result<Language, ServiceError> {
    if language.id.as_str().is_empty() {
        return Err(ServiceError::malformed("language id is empty"));
    }
    Ok(language)
}

fn validate_translation(
    translation: Translation,
    submitted: &str,
) -> Result<Translation, ServiceError> {
    if translation.original != submitted {
        return Err(ServiceError::malformed(format!(
            "translation echoes {:?} instead of the submitted text",
            translation.original
        )));
    }
    Ok(translation)
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
