use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavedSearchRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub query: String,
    /// `ParsedQuery` as produced at save time.
    pub parsed_query: Value,
    pub created_at: DateTime<Utc>,
}
