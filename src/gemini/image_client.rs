use super::GeminiTransport;
use crate::{
    config::GeminiConfig,
    error::{Result, TutorError},
    models::gemini::{Content, GenerateContentRequest, GenerationConfig},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

#[derive(Clone)]
pub struct ImageClient {
    transport: GeminiTransport,
    model: String,
}

impl ImageClient {
    pub fn new(transport: GeminiTransport, config: &GeminiConfig) -> Self {
        Self {
            transport,
            model: config.image_model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user_text(format!("Generate an image: {}", prompt))],
            generation_config: Some(GenerationConfig {
                temperature: None,
                top_p: None,
                top_k: None,
                max_output_tokens: None,
                response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
            }),
            safety_settings: Vec::new(),
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<Vec<u8>> {
        log::info!("Generating image with model: {}", self.model);

        let request = self.build_request(prompt);
        let response = self.transport.generate_content(&self.model, &request).await?;

        let inline = response
            .first_inline_data()
            .ok_or_else(|| TutorError::ResponseError("No image in response".into()))?;
        log::debug!("Received inline {} payload", inline.mime_type);

        STANDARD
            .decode(inline.data.as_bytes())
            .map_err(|e| TutorError::ResponseError(format!("Invalid image payload: {}", e)))
    }
}
