use crate::{error::Result, tutor::retry::RetryPolicy};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

/// Directories generated artifacts are written to and served from.
#[derive(Debug, Clone)]
pub struct OutputDirs {
    pub code_dir: PathBuf,
    pub audio_dir: PathBuf,
    pub upload_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub gemini: GeminiConfig,
    pub dirs: OutputDirs,
    pub retry: RetryPolicy,
    /// Default key for the Hugging Face image backend.
    pub hf_api_key: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            temperature: 0.7,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 2048,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        GeminiConfig {
            api_key: non_empty_var("GEMINI_API_KEY"),
            base_url: non_empty_var("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            text_model: non_empty_var("GEMINI_TEXT_MODEL").unwrap_or(defaults.text_model),
            image_model: non_empty_var("GEMINI_IMAGE_MODEL").unwrap_or(defaults.image_model),
            ..defaults
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_models(
        mut self,
        text_model: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Self {
        self.text_model = text_model.into();
        self.image_model = image_model.into();
        self
    }
}

impl Default for OutputDirs {
    fn default() -> Self {
        OutputDirs {
            code_dir: PathBuf::from("generated_code"),
            audio_dir: PathBuf::from("generated_audio"),
            upload_dir: PathBuf::from("uploads"),
        }
    }
}

impl OutputDirs {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        OutputDirs {
            code_dir: non_empty_var("CODE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.code_dir),
            audio_dir: non_empty_var("AUDIO_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.audio_dir),
            upload_dir: non_empty_var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
        }
    }

    /// Places all three directories under `root`.
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        OutputDirs {
            code_dir: root.join("generated_code"),
            audio_dir: root.join("generated_audio"),
            upload_dir: root.join("uploads"),
        }
    }

    /// Creates every directory that does not exist yet. Safe to call repeatedly.
    pub fn ensure(&self) -> Result<()> {
        for dir in [&self.code_dir, &self.audio_dir, &self.upload_dir] {
            std::fs::create_dir_all(dir)?;
            log::debug!("Output directory ready: {}", dir.display());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 5000,
            gemini: GeminiConfig::default(),
            dirs: OutputDirs::default(),
            retry: RetryPolicy::default(),
            hf_api_key: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = non_empty_var("HOST").unwrap_or(defaults.host);
        let port = env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(defaults.port);

        let retry = retry_policy(
            defaults.retry,
            env::var("RETRY_MAX_ATTEMPTS").ok().as_deref(),
            env::var("RETRY_BACKOFF_SECS").ok().as_deref(),
        );

        Config {
            host,
            port,
            gemini: GeminiConfig::from_env(),
            dirs: OutputDirs::from_env(),
            retry,
            hf_api_key: non_empty_var("HF_API_KEY"),
        }
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = config;
        self
    }

    pub fn with_dirs(mut self, dirs: OutputDirs) -> Self {
        self.dirs = dirs;
        self
    }

    /// Per-request key wins over the configured default. Blank keys count as absent.
    pub fn resolve_api_key(&self, requested: Option<&str>) -> Option<String> {
        resolve_key(requested, self.gemini.api_key.as_deref())
    }

    /// Same precedence as [`Config::resolve_api_key`], for the Hugging Face key.
    pub fn resolve_hf_key(&self, requested: Option<&str>) -> Option<String> {
        resolve_key(requested, self.hf_api_key.as_deref())
    }
}

fn resolve_key(requested: Option<&str>, fallback: Option<&str>) -> Option<String> {
    requested
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .or(fallback)
        .map(String::from)
}

/// Overrides `defaults` with whichever values parse. Attempts are clamped to
/// at least one.
fn retry_policy(
    defaults: RetryPolicy,
    attempts: Option<&str>,
    backoff: Option<&str>,
) -> RetryPolicy {
    let max_attempts = attempts
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(defaults.max_attempts);
    let backoff = backoff
        .and_then(|s| s.trim().parse().ok())
        .map(Duration::from_secs)
        .unwrap_or(defaults.backoff);
    RetryPolicy::new(max_attempts, backoff)
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.gemini.text_model, DEFAULT_TEXT_MODEL);
        assert_eq!(config.gemini.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.gemini.top_k, 40);
        assert_eq!(config.gemini.max_output_tokens, 2048);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.backoff, Duration::from_secs(60));
        assert_eq!(config.dirs.code_dir, PathBuf::from("generated_code"));
    }

    #[test]
    fn test_resolve_api_key_prefers_request() {
        let config = Config::new().with_gemini(GeminiConfig::new().with_api_key("env-key"));
        assert_eq!(
            config.resolve_api_key(Some("body-key")).as_deref(),
            Some("body-key")
        );
        assert_eq!(config.resolve_api_key(Some("  ")).as_deref(), Some("env-key"));
        assert_eq!(config.resolve_api_key(None).as_deref(), Some("env-key"));
        assert_eq!(Config::new().resolve_api_key(None), None);
    }

    #[test]
    fn test_resolve_hf_key() {
        let mut config = Config::new();
        assert_eq!(config.resolve_hf_key(None), None);

        config.hf_api_key = Some("hf-env".into());
        assert_eq!(config.resolve_hf_key(Some("")).as_deref(), Some("hf-env"));
        assert_eq!(config.resolve_hf_key(Some("hf-body")).as_deref(), Some("hf-body"));
    }

    #[test]
    fn test_retry_policy_from_vars() {
        let defaults = RetryPolicy::default();

        let zero = retry_policy(defaults, Some("0"), None);
        assert_eq!(zero.max_attempts, 1);
        assert_eq!(zero.backoff, Duration::from_secs(60));

        let custom = retry_policy(defaults, Some("5"), Some("2"));
        assert_eq!(custom, RetryPolicy::new(5, Duration::from_secs(2)));

        assert_eq!(retry_policy(defaults, Some("many"), Some("-1")), defaults);
    }

    #[test]
    fn test_ensure_dirs_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let dirs = OutputDirs::rooted_at(root.path());

        dirs.ensure().unwrap();
        dirs.ensure().unwrap();

        assert!(dirs.code_dir.is_dir());
        assert!(dirs.audio_dir.is_dir());
        assert!(dirs.upload_dir.is_dir());
    }
}
