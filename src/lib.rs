//! ML Tutor: turns machine-learning topics into explanations, example code,
//! audio scripts and diagrams with Google Gemini, served over HTTP.

pub mod code;
pub mod config;
pub mod error;
pub mod gemini;
pub mod images;
pub mod logger;
pub mod models;
pub mod server;
pub mod tutor;

#[cfg(test)]
mod test_support;

pub use code::{detect_dependencies, CodePersister};
pub use config::{Config, GeminiConfig, OutputDirs};
pub use error::{Result, TutorError};
pub use gemini::{ContentGenerator, GeminiClient, ImageClient, TextClient};
pub use images::ImageGenerator;
pub use models::{
    GeneratedImage, GenerationRequest, GenerationResult, ImageBackend, Length, Mode, ModelInfo,
};
pub use tutor::{retry::RetryPolicy, Tutor};
