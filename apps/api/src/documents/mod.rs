//! Document text extraction for resume uploads: bytes in, plain text out.

pub mod handlers;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::errors::AppError;

/// Upload formats we can turn into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Resolves the kind from the declared content type, falling back to the file extension.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        let mime = content_type
            .map(|c| c.split(';').next().unwrap_or("").trim().to_lowercase())
            .unwrap_or_default();

        match mime.as_str() {
            "application/pdf" => return Some(DocumentKind::Pdf),
            "text/plain" => return Some(DocumentKind::PlainText),
            _ => {}
        }

        let extension = file_name
            .and_then(|n| n.rsplit_once('.'))
            .map(|(_, ext)| ext.to_lowercase());
        match extension.as_deref() {
            Some("pdf") => Some(DocumentKind::Pdf),
            Some("txt") => Some(DocumentKind::PlainText),
            _ => None,
        }
    }
}

/// Extracts plain text. PDF parsing is CPU-bound and may panic on hostile input, so
/// it runs on the blocking pool and a panic surfaces as an unreadable document.
pub async fn extract_text(kind: DocumentKind, data: Bytes) -> Result<String, AppError> {
    if data.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    let text = match kind {
        DocumentKind::PlainText => String::from_utf8(data.to_vec()).map_err(|_| {
            AppError::UnprocessableEntity("text file is not valid UTF-8".to_string())
        })?,
        DocumentKind::Pdf => {
            let joined = tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_from_mem(&data).map_err(|e| e.to_string())
            })
            .await;
            match joined {
                Ok(Ok(text)) => text,
                Ok(Err(e)) => {
                    warn!("PDF extraction failed: {e}");
                    return Err(AppError::UnprocessableEntity(
                        "could not read text from PDF".to_string(),
                    ));
                }
                Err(e) => {
                    warn!("PDF extraction task aborted: {e}");
                    return Err(AppError::UnprocessableEntity(
                        "could not read text from PDF".to_string(),
                    ));
                }
            }
        }
    };

    let text = normalize_whitespace(&text);
    debug!("Extracted {} characters from {:?}", text.chars().count(), kind);
    Ok(text)
}

/// Collapses runs of blank lines and trims trailing spaces left behind by PDF layout.
fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;
    for line in text.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim().to_string()
}
