use crate::error::Result;
use async_trait::async_trait;

/// The two things this service needs from a hosted generative model.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Submits a prompt and returns the model's raw text answer.
    async fn generate_text(&self, prompt: &str) -> Result<String>;

    /// Returns the bytes of the first image the model produced for `prompt`.
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>>;
}
