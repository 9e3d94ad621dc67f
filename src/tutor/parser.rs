use super::prompt::{AUDIO_SCRIPT_MARKER, IMAGE_PROMPT_MARKER};
use crate::models::{GenerationResult, Mode};
use once_cell::sync::Lazy;
use regex::Regex;

static PYTHON_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```python\n(.*?)```").expect("python fence pattern is valid")
});

/// Splits a raw model answer into the fields `mode` calls for. Missing
/// markers leave the optional fields empty.
pub fn parse_response(text: &str, mode: Mode) -> GenerationResult {
    match mode {
        Mode::Text => GenerationResult::explanation_only(text),
        Mode::Code => parse_code(text),
        Mode::Audio => parse_audio(text),
        Mode::Image => parse_image(text),
    }
}

fn parse_code(text: &str) -> GenerationResult {
    let Some(captures) = PYTHON_BLOCK.captures(text) else {
        return GenerationResult::explanation_only(text);
    };

    let (Some(block), Some(body)) = (captures.get(0), captures.get(1)) else {
        return GenerationResult::explanation_only(text);
    };

    let explanation = text.replace(block.as_str(), "").trim().to_string();
    GenerationResult {
        explanation,
        code: Some(body.as_str().trim().to_string()),
        ..Default::default()
    }
}

fn parse_audio(text: &str) -> GenerationResult {
    match text.split_once(AUDIO_SCRIPT_MARKER) {
        Some((explanation, script)) => GenerationResult {
            explanation: explanation.trim().to_string(),
            audio_script: Some(script.trim().to_string()),
            ..Default::default()
        },
        None => GenerationResult::explanation_only(text),
    }
}

fn parse_image(text: &str) -> GenerationResult {
    let Some(first) = text.find(IMAGE_PROMPT_MARKER) else {
        return GenerationResult::explanation_only(text);
    };

    let image_prompts = text[first..]
        .split(IMAGE_PROMPT_MARKER)
        .map(str::trim)
        .filter(|prompt| !prompt.is_empty())
        .map(String::from)
        .collect();

    GenerationResult {
        explanation: text[..first].trim().to_string(),
        image_prompts,
        ..Default::default()
    }
}
