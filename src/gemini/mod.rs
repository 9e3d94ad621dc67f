pub mod image_client;
pub mod text_client;
pub mod traits;

use crate::{
    config::GeminiConfig,
    error::{Result, TutorError},
    models::gemini::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse},
};
use async_trait::async_trait;
use reqwest::StatusCode;

pub use image_client::ImageClient;
pub use text_client::TextClient;
pub use traits::ContentGenerator;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Shared HTTP plumbing for the `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiTransport {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiTransport {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>, base_url: &str) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        log::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                log::error!("Gemini request to {} failed: {}", model, e);
                TutorError::HttpError(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TutorError::HttpError(e.without_url().to_string()))?;

        if !status.is_success() {
            return Err(map_error_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| TutorError::ResponseError(e.to_string()))
    }
}

/// Maps a non-success reply to an error, singling out rate limiting.
pub fn map_error_status(status: StatusCode, body: &str) -> TutorError {
    let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();

    let exhausted = envelope
        .as_ref()
        .map_or(false, |e| e.error.status == "RESOURCE_EXHAUSTED");
    if status == StatusCode::TOO_MANY_REQUESTS || exhausted {
        log::warn!("Gemini reported rate limiting ({})", status);
        return TutorError::RateLimited;
    }

    let message = envelope
        .map(|e| e.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());
    log::error!("Gemini service error {}: {}", status, message);
    TutorError::ServiceError {
        status: status.as_u16(),
        message,
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    text_client: TextClient,
    image_client: ImageClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        Self::with_http(config, reqwest::Client::new())
    }

    /// Builds a client over an existing connection pool.
    pub fn with_http(config: GeminiConfig, http: reqwest::Client) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| TutorError::ConfigError("Gemini API key is missing".into()))?;
        let transport = GeminiTransport::new(http, api_key, &config.base_url);

        Ok(Self {
            text_client: TextClient::new(transport.clone(), &config),
            image_client: ImageClient::new(transport, &config),
        })
    }

    pub fn text(&self) -> &TextClient {
        &self.text_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.text_client.generate(prompt).await
    }

    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>> {
        self.image_client.generate(prompt).await
    }
}
