use serde::Deserialize;
use std::fmt;

/// How deep the explanation should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Length {
    #[default]
    #[serde(alias = "brief")]
    Brief,
    #[serde(alias = "detailed")]
    Detailed,
    #[serde(alias = "comprehensive")]
    Comprehensive,
}

/// Requested output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Text,
    Code,
    Audio,
    Image,
}

impl Length {
    pub fn as_str(&self) -> &'static str {
        match self {
            Length::Brief => "Brief",
            Length::Detailed => "Detailed",
            Length::Comprehensive => "Comprehensive",
        }
    }
}

impl Mode {
    /// Label embedded in the prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Text => "Text explanation",
            Mode::Code => "Code with explanation",
            Mode::Audio => "Audio",
            Mode::Image => "Image Explanation",
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub length: Length,
    pub mode: Mode,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>, length: Length, mode: Mode) -> Self {
        Self {
            topic: topic.into(),
            length,
            mode,
        }
    }
}

/// Structured fields parsed out of one model answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    pub explanation: String,
    pub code: Option<String>,
    pub audio_script: Option<String>,
    pub image_prompts: Vec<String>,
}

impl GenerationResult {
    pub fn explanation_only(text: impl Into<String>) -> Self {
        Self {
            explanation: text.into(),
            ..Default::default()
        }
    }

    /// Code text, empty when the answer carried no code block.
    pub fn code_text(&self) -> &str {
        self.code.as_deref().unwrap_or("")
    }

    pub fn audio_script_text(&self) -> &str {
        self.audio_script.as_deref().unwrap_or("")
    }
}
