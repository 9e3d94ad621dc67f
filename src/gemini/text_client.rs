use super::GeminiTransport;
use crate::{
    config::GeminiConfig,
    error::{Result, TutorError},
    models::gemini::{Content, GenerateContentRequest, GenerationConfig, SafetySetting},
};

#[derive(Clone)]
pub struct TextClient {
    transport: GeminiTransport,
    model: String,
    generation_config: GenerationConfig,
}

impl TextClient {
    pub fn new(transport: GeminiTransport, config: &GeminiConfig) -> Self {
        Self {
            transport,
            model: config.text_model.clone(),
            generation_config: GenerationConfig {
                temperature: Some(config.temperature),
                top_p: Some(config.top_p),
                top_k: Some(config.top_k),
                max_output_tokens: Some(config.max_output_tokens),
                response_modalities: None,
            },
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
            generation_config: Some(self.generation_config.clone()),
            safety_settings: SafetySetting::block_medium_and_above(),
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<String> {
        log::info!("Invoking model: {}", self.model);
        log::debug!("Prompt length: {} characters", prompt.len());

        let request = self.build_request(prompt);
        let response = self.transport.generate_content(&self.model, &request).await?;

        match response.text() {
            Some(text) => Ok(text),
            None => match response.block_reason() {
                Some(reason) => Err(TutorError::ResponseError(format!(
                    "Prompt blocked by safety filters: {}",
                    reason
                ))),
                None => Err(TutorError::ResponseError(
                    "Gemini returned no text".into(),
                )),
            },
        }
    }
}
