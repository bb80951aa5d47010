use crate::{
    config::GeminiConfig,
    error::{PokeMorphError, Result},
    models::{GenerateContentRequest, GenerateContentResponse},
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

const MAX_ERROR_BODY_CHARS: usize = 200;

/// One `generateContent` round trip against a model.
#[async_trait]
pub trait GenerativeTransport: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

pub struct HttpTransport {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                PokeMorphError::ConfigError(
                    "Gemini API key is required (set GEMINI_API_KEY)".into(),
                )
            })?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            PokeMorphError::ConfigError(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            api_key,
        })
    }

    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&self.api_key).map_err(|e| {
                PokeMorphError::ConfigError(format!("Invalid API key header: {}", e))
            })?,
        );
        Ok(headers)
    }
}

/// Pulls the human-readable message out of an error body, truncating anything unrecognised.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(status) => format!("{} ({})", envelope.error.message, status),
            None => envelope.error.message,
        },
        Err(_) => body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    }
}

#[async_trait]
impl GenerativeTransport for HttpTransport {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let request_id = Uuid::new_v4().to_string();
        let request_json = serde_json::to_string(request)
            .map_err(|e| PokeMorphError::SerializationError(e.to_string()))?;

        log::debug!(
            "[req:{}] POST {} ({} bytes)",
            request_id,
            self.endpoint(model),
            request_json.len()
        );

        let response = self
            .client
            .post(self.endpoint(model))
            .headers(self.build_headers()?)
            .body(request_json)
            .send()
            .await
            .map_err(|e| {
                log::error!("[req:{}] Gemini request failed: {}", request_id, e);
                PokeMorphError::RequestError(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PokeMorphError::ResponseError(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&body);
            log::error!("[req:{}] Gemini API error {}: {}", request_id, status, message);
            return Err(PokeMorphError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        log::debug!("[req:{}] Gemini responded with {} bytes", request_id, body.len());

        serde_json::from_str(&body).map_err(|e| PokeMorphError::ResponseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_api_key() {
        let err = HttpTransport::new(&GeminiConfig::new()).err().unwrap();
        assert!(matches!(err, PokeMorphError::ConfigError(_)));

        let err = HttpTransport::new(&GeminiConfig::new().with_api_key("  "))
            .err()
            .unwrap();
        assert!(matches!(err, PokeMorphError::ConfigError(_)));
    }

    #[test]
    fn test_endpoint() {
        let transport = HttpTransport::new(
            &GeminiConfig::new()
                .with_api_key("test-key-123")
                .with_base_url("http://localhost:9000/v1beta/"),
        )
        .unwrap();

        assert_eq!(
            transport.endpoint("gemini-2.5-flash-image"),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash-image:generateContent"
        );
    }

    #[test]
    fn test_error_message_from_envelope() {
        let body = r#"{"error":{"code":403,"message":"API key not valid.","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(error_message(body), "API key not valid. (PERMISSION_DENIED)");
    }

    #[test]
    fn test_error_message_truncates_raw_body() {
        let body = "x".repeat(500);
        assert_eq!(error_message(&body).len(), MAX_ERROR_BODY_CHARS);
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }
}
