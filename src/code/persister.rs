use chrono::Local;
use std::path::{Path, PathBuf};

const MAX_TOPIC_CHARS: usize = 30;
const CODE_EXTENSION: &str = "py";

/// Writes generated programs into one output directory.
#[derive(Debug, Clone)]
pub struct CodePersister {
    dir: PathBuf,
}

impl CodePersister {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saves `code` and returns the file name, or `None` when there is nothing
    /// to save or the write failed.
    pub async fn save(&self, code: &str, topic: &str) -> Option<String> {
        if code.trim().is_empty() {
            log::warn!("Cannot save empty code.");
            return None;
        }

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let filename = format!("{}_{}.{}", sanitize_topic(topic), timestamp, CODE_EXTENSION);

        if let Err(e) = tokio::fs::create_dir_all(&self.dir).await {
            log::error!("Error creating {}: {}", self.dir.display(), e);
            return None;
        }

        match tokio::fs::write(self.dir.join(&filename), code).await {
            Ok(()) => {
                log::info!("Code saved successfully: {}", filename);
                Some(filename)
            }
            Err(e) => {
                log::error!("Error saving code: {}", e);
                None
            }
        }
    }
}

/// Non-alphanumeric characters become `_`; keeps at most 30 characters.
pub fn sanitize_topic(topic: &str) -> String {
    topic
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .take(MAX_TOPIC_CHARS)
        .collect()
}
