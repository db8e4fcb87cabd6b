//! Request gate: every `/api` route requires `Authorization: Bearer <API_TOKEN>`.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum::http::header::AUTHORIZATION;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

/// Extractor that only succeeds for authorized requests.
pub struct RequireAuth;

#[async_trait]
impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token);

        if is_authorized(presented, &state.config.api_token) {
            Ok(RequireAuth)
        } else {
            warn!("Rejected unauthorized request to {}", parts.uri.path());
            Err(AppError::Unauthorized)
        }
    }
}

/// Token from a `Bearer` credential. The scheme name is case-insensitive.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim_start().split_once(' ')?;
    scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
}

fn is_authorized(presented: Option<&str>, expected: &str) -> bool {
    match presented {
        Some(token) if !expected.is_empty() => {
            token.as_bytes().ct_eq(expected.as_bytes()).into()
        }
        _ => false,
    }
}
