pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::documents::handlers as documents;
use crate::search::handlers as search;
use crate::searches::handlers as searches;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job search
        .route("/api/v1/jobs/parse-query", post(search::handle_parse_query))
        .route("/api/v1/jobs/score", post(search::handle_score))
        .route("/api/v1/jobs/search", post(search::handle_search))
        // Saved searches
        .route(
            "/api/v1/searches",
            post(searches::handle_create_search).get(searches::handle_list_searches),
        )
        .route("/api/v1/searches/:id", get(searches::handle_get_search))
        // Documents
        .route("/api/v1/documents/extract", post(documents::handle_extract))
        .with_state(state)
}
