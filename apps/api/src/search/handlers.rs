//! Axum route handlers for the Job Search API.

use std::cmp::Reverse;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregator::AggregatedJob;
use crate::auth::RequireAuth;
use crate::errors::AppError;
use crate::search::description::generate_fallback_description;
use crate::search::match_scorer::{JobListing, ScoreBreakdown};
use crate::search::query_parser::{parse_job_query, ParsedQuery};
use crate::state::AppState;

pub const MAX_QUERY_CHARS: usize = 512;
pub const MAX_SEARCH_LIMIT: usize = 100;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseQueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ParseQueryResponse {
    pub parsed_query: ParsedQuery,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub parsed_query: ParsedQuery,
    pub listings: Vec<JobListing>,
}

#[derive(Debug, Serialize)]
pub struct ScoredListing {
    pub listing: JobListing,
    pub match_score: u8,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub results: Vec<ScoredListing>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct JobResult {
    #[serde(flatten)]
    pub job: AggregatedJob,
    /// Aggregator description, or the generated fallback when it had none.
    pub description: String,
    pub match_score: u8,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub parsed_query: ParsedQuery,
    pub jobs: Vec<JobResult>,
}

/// Rejects queries too long to be a search phrase. Emptiness is left to the caller:
/// the interpreter itself accepts "".
pub fn validate_query(query: &str) -> Result<(), AppError> {
    let chars = query.chars().count();
    if chars > MAX_QUERY_CHARS {
        return Err(AppError::Validation(format!(
            "query must be at most {MAX_QUERY_CHARS} characters (got {chars})"
        )));
    }
    Ok(())
}

/// Highest score first. Stable, so equal scores keep their input order.
fn sort_by_score_desc<T>(items: &mut [T], score: impl Fn(&T) -> u8) {
    items.sort_by_key(|item| Reverse(score(item)));
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/parse-query
pub async fn handle_parse_query(
    _auth: RequireAuth,
    payload: Result<Json<ParseQueryRequest>, JsonRejection>,
) -> Result<Json<ParseQueryResponse>, AppError> {
    let Json(request) = payload?;
    validate_query(&request.query)?;

    Ok(Json(ParseQueryResponse {
        parsed_query: parse_job_query(&request.query),
    }))
}

/// POST /api/v1/jobs/score
///
/// Scores caller-supplied listings against an already parsed query.
pub async fn handle_score(
    _auth: RequireAuth,
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, AppError> {
    let Json(request) = payload?;

    let mut results: Vec<ScoredListing> = request
        .listings
        .into_iter()
        .map(|listing| {
            let breakdown = state.match_scorer.score(&listing, &request.parsed_query);
            ScoredListing {
                listing,
                match_score: breakdown.total,
                breakdown,
            }
        })
        .collect();
    sort_by_score_desc(&mut results, |r| r.match_score);

    Ok(Json(ScoreResponse { results }))
}

/// POST /api/v1/jobs/search
///
/// Full pipeline: parse → fetch from aggregator → score → fill descriptions → sort.
pub async fn handle_search(
    _auth: RequireAuth,
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(request) = payload?;
    validate_query(&request.query)?;
    if request.query.trim().is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let limit = request
        .limit
        .unwrap_or(state.config.search_result_limit)
        .clamp(1, MAX_SEARCH_LIMIT);

    let parsed_query = parse_job_query(&request.query);
    let fetched = state.job_source.fetch(&parsed_query).await?;
    info!(
        "Aggregator returned {} jobs for \"{}\"",
        fetched.len(),
        parsed_query.job_title
    );

    let mut jobs: Vec<JobResult> = fetched
        .into_iter()
        .map(|mut job| {
            let match_score = state.match_scorer.score(&job.listing(), &parsed_query).total;
            let description = job
                .description
                .take()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| generate_fallback_description(&job.title, &job.company));
            JobResult {
                job,
                description,
                match_score,
            }
        })
        .collect();
    sort_by_score_desc(&mut jobs, |j| j.match_score);
    jobs.truncate(limit);

    Ok(Json(SearchResponse { parsed_query, jobs }))
}
