pub mod parser;
pub mod prompt;
pub mod retry;

use crate::{
    error::{Result, TutorError},
    gemini::ContentGenerator,
    models::{GenerationRequest, GenerationResult},
};
use retry::{RetryOutcome, RetryPolicy, Sleeper, TokioSleeper};
use std::sync::Arc;

pub use parser::parse_response;
pub use prompt::build_prompt;

/// Turns a topic into parsed tutoring content through a [`ContentGenerator`].
#[derive(Clone)]
pub struct Tutor {
    generator: Arc<dyn ContentGenerator>,
    retry: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl Tutor {
    pub fn new(generator: Arc<dyn ContentGenerator>, retry: RetryPolicy) -> Self {
        Self {
            generator,
            retry,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let prompt = build_prompt(&request.topic, request.length, request.mode);
        log::info!(
            "Generating '{}' content for topic: {} ({})",
            request.mode,
            request.topic,
            request.length
        );

        let generator = self.generator.as_ref();
        let prompt = prompt.as_str();
        let outcome = self
            .retry
            .run(self.sleeper.as_ref(), TutorError::is_rate_limited, |attempt| {
                log::debug!("Gemini attempt {}/{}", attempt, self.retry.max_attempts);
                generator.generate_text(prompt)
            })
            .await;

        match outcome {
            RetryOutcome::Success(text) => Ok(parse_response(&text, request.mode)),
            RetryOutcome::Failed(err) => {
                log::error!("An unexpected error occurred during the Gemini API call: {}", err);
                Err(err)
            }
            RetryOutcome::Exhausted { attempts, .. } => {
                log::error!("API call failed after {} retries due to rate limiting.", attempts);
                Err(TutorError::RetriesExhausted { attempts })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Length, Mode};
    use crate::test_support::{FakeGenerator, RecordingSleeper};
    use std::time::Duration;

    fn tutor(fake: Arc<FakeGenerator>, sleeper: Arc<RecordingSleeper>) -> Tutor {
        Tutor::new(fake, RetryPolicy::default()).with_sleeper(sleeper)
    }

    #[tokio::test]
    async fn test_three_rate_limits_fail_after_two_pauses() {
        let fake = Arc::new(
            FakeGenerator::new()
                .then(Err(TutorError::RateLimited))
                .then(Err(TutorError::RateLimited))
                .then(Err(TutorError::RateLimited)),
        );
        let sleeper = Arc::new(RecordingSleeper::default());

        let result = tutor(fake.clone(), sleeper.clone())
            .generate(&GenerationRequest::new("CNNs", Length::Brief, Mode::Text))
            .await;

        assert!(matches!(
            result,
            Err(TutorError::RetriesExhausted { attempts: 3 })
        ));
        assert_eq!(fake.text_calls(), 3);
        assert_eq!(sleeper.pauses(), vec![Duration::from_secs(60); 2]);
    }

    #[tokio::test]
    async fn test_service_error_is_not_retried() {
        let fake = Arc::new(FakeGenerator::new().then(Err(TutorError::ServiceError {
            status: 403,
            message: "forbidden".into(),
        })));
        let sleeper = Arc::new(RecordingSleeper::default());

        let result = tutor(fake.clone(), sleeper.clone())
            .generate(&GenerationRequest::new("RNNs", Length::Brief, Mode::Text))
            .await;

        assert!(matches!(result, Err(TutorError::ServiceError { status: 403, .. })));
        assert_eq!(fake.text_calls(), 1);
        assert!(sleeper.pauses().is_empty());
    }

    #[tokio::test]
    async fn test_rate_limit_then_success_parses_code() {
        let fake = Arc::new(
            FakeGenerator::replying("Intro\n```python\nimport torch\n```\nDone")
                .then(Err(TutorError::RateLimited)),
        );
        let sleeper = Arc::new(RecordingSleeper::default());

        let result = tutor(fake.clone(), sleeper.clone())
            .generate(&GenerationRequest::new("Autograd", Length::Detailed, Mode::Code))
            .await
            .unwrap();

        assert_eq!(result.code.as_deref(), Some("import torch"));
        assert_eq!(result.explanation, "Intro\n\nDone");
        assert_eq!(fake.text_calls(), 2);
        assert_eq!(sleeper.pauses().len(), 1);
    }
}
