use serde::{Deserialize, Serialize};

pub const ALTERNATIVE_IMAGE_MODEL: &str = "stabilityai/stable-diffusion-xl-base-1.0";
pub const IMAGE_FALLBACK_MODEL: &str = "imagen-3.0-generate-002";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelInfo {
    pub text_model: String,
    pub gemini_model: String,
    pub gemini_fallback: String,
    pub hf_model: String,
    pub hf_info: AlternativeModelInfo,
}

/// Facts about the (not yet wired) alternative image backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlternativeModelInfo {
    pub parameters: String,
    pub architecture: String,
    pub features: Vec<String>,
    pub native_resolution: String,
    pub recommended_steps: String,
}

impl ModelInfo {
    pub fn new(text_model: impl Into<String>, image_model: impl Into<String>) -> Self {
        Self {
            text_model: text_model.into(),
            gemini_model: image_model.into(),
            gemini_fallback: IMAGE_FALLBACK_MODEL.to_string(),
            hf_model: ALTERNATIVE_IMAGE_MODEL.to_string(),
            hf_info: AlternativeModelInfo::default(),
        }
    }
}

impl Default for AlternativeModelInfo {
    fn default() -> Self {
        Self {
            parameters: "3.5B".to_string(),
            architecture: "Latent Diffusion Model".to_string(),
            features: vec![
                "High-resolution generation".to_string(),
                "Better prompt adherence".to_string(),
                "Enhanced image quality".to_string(),
            ],
            native_resolution: "1024x1024".to_string(),
            recommended_steps: "20-28".to_string(),
        }
    }
}
