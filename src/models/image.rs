use serde::{Deserialize, Serialize};

pub const GEMINI_BACKEND_LABEL: &str = "Google Gemini (Fast & Free)";

/// Image-generation provider selected by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImageBackend {
    #[default]
    Gemini,
    /// Any other provider. Not implemented; yields no images.
    Alternative(String),
}

impl ImageBackend {
    pub fn from_selector(selector: &str) -> Self {
        let trimmed = selector.trim();
        if trimmed == GEMINI_BACKEND_LABEL || trimmed.eq_ignore_ascii_case("gemini") {
            ImageBackend::Gemini
        } else {
            ImageBackend::Alternative(trimmed.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ImageBackend::Gemini => GEMINI_BACKEND_LABEL,
            ImageBackend::Alternative(label) => label,
        }
    }
}

impl From<String> for ImageBackend {
    fn from(selector: String) -> Self {
        ImageBackend::from_selector(&selector)
    }
}

impl From<ImageBackend> for String {
    fn from(backend: ImageBackend) -> Self {
        backend.label().to_string()
    }
}

/// A PNG image as a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GeneratedImage(pub String);

impl GeneratedImage {
    pub fn as_data_uri(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_selector() {
        assert_eq!(
            ImageBackend::from_selector("Google Gemini (Fast & Free)"),
            ImageBackend::Gemini
        );
        assert_eq!(ImageBackend::from_selector("GEMINI"), ImageBackend::Gemini);
        assert_eq!(
            ImageBackend::from_selector("Hugging Face"),
            ImageBackend::Alternative("Hugging Face".into())
        );
    }

    #[test]
    fn test_backend_deserializes_from_label() {
        let backend: ImageBackend = serde_json::from_str("\"Hugging Face\"").unwrap();
        assert_eq!(backend.label(), "Hugging Face");
        assert_eq!(ImageBackend::default(), ImageBackend::Gemini);
    }
}
