//! JSON bodies of the HTTP API.

use super::{GeneratedImage, ImageBackend, Length};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Deserialize)]
pub struct TopicRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub length: Length,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageTopicRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub length: Length,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub hf_key: Option<String>,
    #[serde(default)]
    pub backend: ImageBackend,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub success: bool,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CodeResponse {
    pub success: bool,
    pub explanation: String,
    pub code: String,
    pub dependencies: BTreeSet<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AudioResponse {
    pub success: bool,
    pub explanation: String,
    pub audio_script: String,
}

#[derive(Debug, Serialize)]
pub struct ImagesResponse {
    pub success: bool,
    pub explanation: String,
    pub images: Vec<GeneratedImage>,
    pub prompts: Vec<String>,
}
