use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::auth::RequireAuth;
use crate::documents::{extract_text, DocumentKind};
use crate::errors::AppError;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub char_count: usize,
}

/// POST /api/v1/documents/extract
///
/// Multipart upload with a single `file` field (PDF or plain text).
pub async fn handle_extract(
    _auth: RequireAuth,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResponse>, AppError> {
    let mut multipart = multipart?;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let kind = DocumentKind::detect(content_type.as_deref(), file_name.as_deref())
            .ok_or_else(|| {
                AppError::UnsupportedMediaType(format!(
                    "only PDF and plain text uploads are supported (got {})",
                    content_type.as_deref().unwrap_or("unknown")
                ))
            })?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("could not read upload: {e}")))?;
        info!("Extracting text from {:?} upload ({} bytes)", kind, data.len());

        let text = extract_text(kind, data).await?;
        let char_count = text.chars().count();
        return Ok(Json(ExtractResponse { text, char_count }));
    }

    Err(AppError::Validation(
        "multipart body must contain a 'file' field".to_string(),
    ))
}
