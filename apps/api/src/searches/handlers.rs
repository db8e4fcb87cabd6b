//! Axum route handlers for saved searches.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::RequireAuth;
use crate::errors::AppError;
use crate::models::saved_search::SavedSearchRow;
use crate::search::handlers::validate_query;
use crate::search::query_parser::parse_job_query;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSearchRequest {
    pub user_id: Uuid,
    pub query: String,
}

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// POST /api/v1/searches
pub async fn handle_create_search(
    _auth: RequireAuth,
    State(state): State<AppState>,
    payload: Result<Json<CreateSearchRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedSearchRow>), AppError> {
    let Json(req) = payload?;
    validate_query(&req.query)?;
    if req.query.trim().is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let parsed = parse_job_query(&req.query);
    let row = state.searches.create(req.user_id, &req.query, &parsed).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/searches?user_id=
pub async fn handle_list_searches(
    _auth: RequireAuth,
    State(state): State<AppState>,
    params: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<Vec<SavedSearchRow>>, AppError> {
    let Query(params) = params?;
    Ok(Json(state.searches.list_for_user(params.user_id).await?))
}

/// GET /api/v1/searches/:id
pub async fn handle_get_search(
    _auth: RequireAuth,
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SavedSearchRow>, AppError> {
    let Path(id) = id?;
    state
        .searches
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Saved search {id} not found")))
}
