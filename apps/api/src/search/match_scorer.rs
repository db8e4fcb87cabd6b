//! Match Scoring — additive heuristic that rates one job listing against a parsed query.
//!
//! Default: `HeuristicMatchScorer` (pure, deterministic, no I/O).
//! `AppState` holds an `Arc<dyn MatchScorer>` so handlers never name the backend.
//!
//! Points, applied in order and clamped once at the end:
//! 1. base 60
//! 2. title affinity +25
//! 3. skill affinity +5 per matched query skill, at most +25
//! 4. location affinity +15
//! 5. clamp to [30, 95]

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::search::query_parser::ParsedQuery;

pub const BASE_SCORE: u8 = 60;
pub const MIN_SCORE: u8 = 30;
pub const MAX_SCORE: u8 = 95;

const TITLE_BONUS: u8 = 25;
const SKILL_POINTS_EACH: u8 = 5;
const SKILL_BONUS_CAP: u8 = 25;
const LOCATION_BONUS: u8 = 15;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// The subset of a job listing the scorer looks at. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobListing {
    pub title: String,
    pub skills: Vec<String>,
    pub location: String,
    pub remote: bool,
}

/// Per-factor contributions, returned alongside the score for transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: u8,
    pub title: u8,
    pub skills: u8,
    pub location: u8,
    /// Sum before clamping. Can exceed `MAX_SCORE`.
    pub raw_total: u8,
    /// Final score in [MIN_SCORE, MAX_SCORE].
    pub total: u8,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scores a listing against a parsed query. Implementations must be total: bad or
/// missing listing data lowers the score, it never produces an error.
pub trait MatchScorer: Send + Sync {
    fn score(&self, listing: &JobListing, query: &ParsedQuery) -> ScoreBreakdown;
}

/// Rule-based scorer used whenever no smarter backend is configured.
pub struct HeuristicMatchScorer;

impl MatchScorer for HeuristicMatchScorer {
    fn score(&self, listing: &JobListing, query: &ParsedQuery) -> ScoreBreakdown {
        score_breakdown(listing, query)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring
// ────────────────────────────────────────────────────────────────────────────

/// Relevance of `listing` for `query`, in [30, 95].
pub fn calculate_match_score(listing: &JobListing, query: &ParsedQuery) -> u8 {
    score_breakdown(listing, query).total
}

pub fn score_breakdown(listing: &JobListing, query: &ParsedQuery) -> ScoreBreakdown {
    let title = if titles_overlap(&listing.title, &query.job_title) {
        TITLE_BONUS
    } else {
        0
    };
    let skills = skill_points(&listing.skills, &query.skills);
    let location = if locations_match(listing, &query.location) {
        LOCATION_BONUS
    } else {
        0
    };

    let raw_total = BASE_SCORE + title + skills + location;
    let breakdown = ScoreBreakdown {
        base: BASE_SCORE,
        title,
        skills,
        location,
        raw_total,
        total: raw_total.clamp(MIN_SCORE, MAX_SCORE),
    };

    debug!(
        listing_title = %listing.title,
        title, skills, location, total = breakdown.total,
        "Scored listing"
    );

    breakdown
}

/// Lower-cases and drops the first " developer" so "React Developer" and "react" compare equal.
fn strip_title(title: &str) -> String {
    title.to_lowercase().replacen(" developer", "", 1)
}

fn titles_overlap(listing_title: &str, query_title: &str) -> bool {
    let listing = strip_title(listing_title);
    let query = strip_title(query_title);

    // "" is a substring of everything; an empty side must not count as a match.
    if listing.trim().is_empty() || query.trim().is_empty() {
        return false;
    }

    listing.contains(&query) || query.contains(&listing)
}

fn skill_points(listing_skills: &[String], query_skills: &[String]) -> u8 {
    if query_skills.is_empty() {
        return 0;
    }

    let listing_lower: Vec<String> = listing_skills.iter().map(|s| s.to_lowercase()).collect();

    let matched = query_skills
        .iter()
        .map(|s| s.to_lowercase())
        .filter(|skill| !skill.is_empty())
        .filter(|skill| listing_lower.iter().any(|ls| ls.contains(skill.as_str())))
        .count();

    // Saturate before multiplying so a huge skill list cannot overflow.
    let matched = matched.min(usize::from(SKILL_BONUS_CAP / SKILL_POINTS_EACH)) as u8;
    (matched * SKILL_POINTS_EACH).min(SKILL_BONUS_CAP)
}

fn locations_match(listing: &JobListing, query_location: &str) -> bool {
    if query_location.is_empty() || listing.location.is_empty() {
        return false;
    }

    let query_lower = query_location.to_lowercase();
    listing.location.to_lowercase().contains(&query_lower)
        || (query_lower.contains("remote") && listing.remote)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
