use super::{files, AppState};
use crate::{
    code::{detect_dependencies, CodePersister},
    error::{Result, TutorError},
    logger,
    models::{
        AudioResponse, CodeResponse, GenerationRequest, GenerationResult, ImageTopicRequest,
        ImagesResponse, Length, Mode, ModelInfo, TextResponse, TopicRequest,
    },
};
use actix_web::{web, HttpResponse};
use serde_json::json;
use std::collections::BTreeSet;

fn require_topic(topic: &str) -> Result<&str> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(TutorError::MissingInput("Topic is required".into()));
    }
    Ok(topic)
}

async fn run_tutor(
    state: &AppState,
    topic: &str,
    length: Length,
    mode: Mode,
    api_key: Option<&str>,
) -> Result<GenerationResult> {
    let topic = require_topic(topic)?;
    let generator = state.generator(api_key)?;
    state
        .tutor(generator)
        .generate(&GenerationRequest::new(topic, length, mode))
        .await
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub async fn generate_text(
    state: web::Data<AppState>,
    body: web::Json<TopicRequest>,
) -> Result<HttpResponse> {
    let _timer = logger::timer("POST /api/generate-text");
    let body = body.into_inner();

    let result = run_tutor(
        &state,
        &body.topic,
        body.length,
        Mode::Text,
        body.api_key.as_deref(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(TextResponse {
        success: true,
        content: result.explanation,
    }))
}

pub async fn generate_code(
    state: web::Data<AppState>,
    body: web::Json<TopicRequest>,
) -> Result<HttpResponse> {
    let _timer = logger::timer("POST /api/generate-code");
    let body = body.into_inner();

    let result = run_tutor(
        &state,
        &body.topic,
        body.length,
        Mode::Code,
        body.api_key.as_deref(),
    )
    .await?;
    let code = result.code.unwrap_or_default();

    let (dependencies, filename) = if code.trim().is_empty() {
        (BTreeSet::new(), None)
    } else {
        let persister = CodePersister::new(&state.config.dirs.code_dir);
        (
            detect_dependencies(&code),
            persister.save(&code, body.topic.trim()).await,
        )
    };

    Ok(HttpResponse::Ok().json(CodeResponse {
        success: true,
        explanation: result.explanation,
        code,
        dependencies,
        filename,
    }))
}

pub async fn generate_audio(
    state: web::Data<AppState>,
    body: web::Json<TopicRequest>,
) -> Result<HttpResponse> {
    let _timer = logger::timer("POST /api/generate-audio");
    let body = body.into_inner();

    let result = run_tutor(
        &state,
        &body.topic,
        body.length,
        Mode::Audio,
        body.api_key.as_deref(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(AudioResponse {
        success: true,
        explanation: result.explanation,
        audio_script: result.audio_script.unwrap_or_default(),
    }))
}

pub async fn generate_images(
    state: web::Data<AppState>,
    body: web::Json<ImageTopicRequest>,
) -> Result<HttpResponse> {
    let _timer = logger::timer("POST /api/generate-images");
    let body = body.into_inner();

    let topic = require_topic(&body.topic)?;
    let generator = state.generator(body.api_key.as_deref())?;
    let result = state
        .tutor(generator.clone())
        .generate(&GenerationRequest::new(topic, body.length, Mode::Image))
        .await?;

    let images = if result.image_prompts.is_empty() {
        Vec::new()
    } else {
        let hf_key = state.config.resolve_hf_key(body.hf_key.as_deref());
        state
            .images(generator)
            .generate(&result.image_prompts, &body.backend, hf_key.as_deref())
            .await
    };

    Ok(HttpResponse::Ok().json(ImagesResponse {
        success: true,
        explanation: result.explanation,
        images,
        prompts: result.image_prompts,
    }))
}

pub async fn model_info(state: web::Data<AppState>) -> HttpResponse {
    let gemini = &state.config.gemini;
    HttpResponse::Ok().json(ModelInfo::new(&gemini.text_model, &gemini.image_model))
}

pub async fn download_code(
    state: web::Data<AppState>,
    filename: web::Path<String>,
) -> Result<HttpResponse> {
    files::serve_attachment(&state.config.dirs.code_dir, &filename).await
}

pub async fn download_audio(
    state: web::Data<AppState>,
    filename: web::Path<String>,
) -> Result<HttpResponse> {
    files::serve_attachment(&state.config.dirs.audio_dir, &filename).await
}
