use std::sync::Arc;

use crate::aggregator::JobSource;
use crate::config::Config;
use crate::search::match_scorer::MatchScorer;
use crate::searches::store::SearchStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Saved-search persistence. Production: PostgreSQL.
    pub searches: Arc<dyn SearchStore>,
    /// External job-board aggregator.
    pub job_source: Arc<dyn JobSource>,
    /// Pluggable match scorer. Default: HeuristicMatchScorer.
    pub match_scorer: Arc<dyn MatchScorer>,
}
