pub mod files;
pub mod handlers;


use crate::{
    config::Config,
    error::{Result, TutorError},
    gemini::{ContentGenerator, GeminiClient},
    images::ImageGenerator,
    tutor::{
        retry::{Sleeper, TokioSleeper},
        Tutor,
    },
};
use actix_web::{error::InternalError, middleware, web, App, HttpResponse, HttpServer};
use serde_json::json;
use std::sync::Arc;

/// Builds a model client for a resolved API key.
pub type GeneratorFactory =
    Arc<dyn Fn(&str) -> Result<Arc<dyn ContentGenerator>> + Send + Sync>;

/// Read-only state shared by every worker.
pub struct AppState {
    pub config: Config,
    generator_for: GeneratorFactory,
    sleeper: Arc<dyn Sleeper>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::new();
        let gemini = config.gemini.clone();
        let generator_for: GeneratorFactory = Arc::new(move |api_key: &str| {
            let client =
                GeminiClient::with_http(gemini.clone().with_api_key(api_key), http.clone())?;
            Ok(Arc::new(client) as Arc<dyn ContentGenerator>)
        });

        Self {
            config,
            generator_for,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_generator_factory(mut self, factory: GeneratorFactory) -> Self {
        self.generator_for = factory;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn generator(&self, requested_key: Option<&str>) -> Result<Arc<dyn ContentGenerator>> {
        let api_key = self
            .config
            .resolve_api_key(requested_key)
            .ok_or_else(|| TutorError::MissingInput("API key is required".into()))?;
        (self.generator_for)(&api_key)
    }

    pub fn tutor(&self, generator: Arc<dyn ContentGenerator>) -> Tutor {
        Tutor::new(generator, self.config.retry).with_sleeper(self.sleeper.clone())
    }

    pub fn images(&self, generator: Arc<dyn ContentGenerator>) -> ImageGenerator {
        ImageGenerator::new(generator)
    }
}

/// Malformed bodies get the same `{"error": ...}` shape as other failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        let response = HttpResponse::BadRequest().json(json!({ "error": message }));
        InternalError::from_response(err, response).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health)).service(
        web::scope("/api")
            .route("/generate-text", web::post().to(handlers::generate_text))
            .route("/generate-code", web::post().to(handlers::generate_code))
            .route("/generate-audio", web::post().to(handlers::generate_audio))
            .route("/generate-images", web::post().to(handlers::generate_images))
            .route("/model-info", web::get().to(handlers::model_info))
            .route("/download-code/{filename}", web::get().to(handlers::download_code))
            .route("/download-audio/{filename}", web::get().to(handlers::download_audio)),
    );
}

pub async fn run(config: Config) -> std::io::Result<()> {
    let bind = (config.host.clone(), config.port);
    let state = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(json_config())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await
}
