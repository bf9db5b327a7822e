use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use super::{TranslateRequest, TranslationBackend};

/// Google Cloud Translation (v2) client
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// API key, sent as the `key` query parameter
    api_key: String,
    /// Full URL of the translate method
    endpoint: String,
}

/// Translation response envelope
#[derive(Debug, Deserialize)]
pub struct GoogleResponse {
    /// Present on success
    #[serde(default)]
    pub data: Option<GoogleData>,
    /// Present when the service reports an error
    #[serde(default)]
    pub error: Option<GoogleErrorBody>,
}

/// Payload of a successful response
#[derive(Debug, Deserialize)]
pub struct GoogleData {
    /// One entry per `q` sent
    #[serde(default)]
    pub translations: Vec<GoogleTranslation>,
}

/// A single translation result
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleTranslation {
    /// The translated text
    pub translated_text: String,
}

/// Service-reported error
#[derive(Debug, Deserialize)]
pub struct GoogleErrorBody {
    /// HTTP-like status code, when the service sends one
    #[serde(default)]
    pub code: Option<u16>,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
}

impl GoogleTranslate {
    /// Create a new client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Create a client from the translation section of the configuration
    pub fn from_config(config: &TranslationConfig) -> Self {
        Self::new(&config.api_key, &config.endpoint, config.timeout_secs)
    }

    /// Turn a response body into the first translation or a provider error
    pub fn extract_translation(status_code: u16, body: &str) -> Result<String, ProviderError> {
        let parsed: GoogleResponse = match serde_json::from_str(body) {
            Ok(parsed) => parsed,
            Err(e) if (200..300).contains(&status_code) => {
                return Err(ProviderError::ParseError(e.to_string()));
            }
            Err(_) => {
                return Err(Self::status_error(status_code, body.trim().to_string()));
            }
        };

        if let Some(err) = parsed.error {
            let code = err.code.unwrap_or(status_code);
            return Err(Self::status_error(code, err.message));
        }

        if !(200..300).contains(&status_code) {
            return Err(Self::status_error(status_code, "unexpected status".to_string()));
        }

        parsed
            .data
            .and_then(|data| data.translations.into_iter().next())
            .map(|t| t.translated_text)
            .ok_or(ProviderError::EmptyResponse)
    }

    fn status_error(status_code: u16, message: String) -> ProviderError {
        match status_code {
            401 | 403 => ProviderError::AuthenticationError(message),
            _ => ProviderError::ApiError { status_code, message },
        }
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslate {
    async fn translate(&self, request: &TranslateRequest) -> Result<String, ProviderError> {
        let response = self.client.post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response.text().await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read response body: {}", e)))?;

        let result = Self::extract_translation(status.as_u16(), &body);
        if let Err(e) = &result {
            error!("Translation API error ({}): {}", status, e);
        }

        result
    }
}
