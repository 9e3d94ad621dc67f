use crate::{
    gemini::ContentGenerator,
    models::{GeneratedImage, ImageBackend},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;

const EDUCATIONAL_STYLE: [&str; 6] = [
    "educational diagram style",
    "clean and professional",
    "technical illustration",
    "white background",
    "high contrast",
    "clear and readable",
];

const STYLE_KEYWORDS: [&str; 4] = ["style", "background", "diagram", "illustration"];

/// Appends the educational style phrases unless the prompt already talks
/// about style.
pub fn enhance_prompt(prompt: &str) -> String {
    let lower = prompt.to_lowercase();
    if STYLE_KEYWORDS.iter().any(|word| lower.contains(word)) {
        prompt.to_string()
    } else {
        format!("{}, {}", prompt, EDUCATIONAL_STYLE.join(", "))
    }
}

pub fn png_data_uri(bytes: &[u8]) -> GeneratedImage {
    GeneratedImage(format!("data:image/png;base64,{}", STANDARD.encode(bytes)))
}

pub struct ImageGenerator {
    generator: Arc<dyn ContentGenerator>,
}

impl ImageGenerator {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self { generator }
    }

    /// One image per prompt, in order. Prompts that fail are logged and
    /// skipped. `hf_key` only matters to the alternative backend.
    pub async fn generate(
        &self,
        prompts: &[String],
        backend: &ImageBackend,
        hf_key: Option<&str>,
    ) -> Vec<GeneratedImage> {
        if let ImageBackend::Alternative(label) = backend {
            if hf_key.is_none() {
                log::warn!("No Hugging Face API key provided for {}", label);
            }
            log::warn!("{} backend not implemented yet.", label);
            return Vec::new();
        }

        let total = prompts.len();
        let mut images = Vec::with_capacity(total);
        for (i, prompt) in prompts.iter().enumerate() {
            let enhanced = enhance_prompt(prompt);
            log::info!("Generating image {}/{} with Gemini...", i + 1, total);

            match self.generator.generate_image(&enhanced).await {
                Ok(bytes) => {
                    images.push(png_data_uri(&bytes));
                    log::info!("Image {} generated successfully.", i + 1);
                }
                Err(e) => log::error!("Error generating image {}: {}", i + 1, e),
            }
        }
        images
    }
}
