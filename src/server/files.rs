use crate::error::{Result, TutorError};
use actix_web::{http::header, HttpResponse};
use std::io::ErrorKind;
use std::path::Path;

/// Reduces a client-supplied name to a plain file name: path separators and
/// whitespace become `_`, only `[A-Za-z0-9._-]` survive, and leading or
/// trailing dots and underscores are dropped.
pub fn secure_filename(name: &str) -> String {
    let spaced: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

fn content_type_for(filename: &str) -> &'static str {
    match Path::new(filename).extension().and_then(|ext| ext.to_str()) {
        Some("py") => "text/x-python",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Sends `dir/<sanitized name>` as an attachment.
pub async fn serve_attachment(dir: &Path, requested: &str) -> Result<HttpResponse> {
    let filename = secure_filename(requested);
    if filename.is_empty() {
        return Err(TutorError::NotFound("File not found".into()));
    }

    let bytes = tokio::fs::read(dir.join(&filename))
        .await
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => TutorError::NotFound("File not found".into()),
            _ => TutorError::IoError(e),
        })?;

    log::info!("Serving {} ({} bytes)", filename, bytes.len());
    Ok(HttpResponse::Ok()
        .content_type(content_type_for(&filename))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(bytes))
}
