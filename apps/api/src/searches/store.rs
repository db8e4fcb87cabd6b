//! Saved-search persistence behind a trait, so handlers work against PostgreSQL in
//! production and an in-memory store in tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::saved_search::SavedSearchRow;
use crate::search::query_parser::ParsedQuery;

#[async_trait]
pub trait SearchStore: Send + Sync {
    async fn create(
        &self,
        user_id: Uuid,
        query: &str,
        parsed: &ParsedQuery,
    ) -> Result<SavedSearchRow, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<SavedSearchRow>, AppError>;

    /// Newest first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SavedSearchRow>, AppError>;
}

fn parsed_to_json(parsed: &ParsedQuery) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(parsed).map_err(|e| AppError::Internal(e.into()))
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

pub struct PgSearchStore {
    pool: PgPool,
}

impl PgSearchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a small pool; saved searches are low-traffic create/read.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        info!("Connecting to PostgreSQL (max {max_connections} connections)...");
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        info!("PostgreSQL pool ready for saved searches");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl SearchStore for PgSearchStore {
    async fn create(
        &self,
        user_id: Uuid,
        query: &str,
        parsed: &ParsedQuery,
    ) -> Result<SavedSearchRow, AppError> {
        let row = sqlx::query_as::<_, SavedSearchRow>(
            r#"
            INSERT INTO saved_searches (id, user_id, query, parsed_query)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, query, parsed_query, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(query)
        .bind(parsed_to_json(parsed)?)
        .fetch_one(&self.pool)
        .await?;

        info!("Saved search {} for user {}", row.id, user_id);
        Ok(row)
    }

    async fn get(&self, id: Uuid) -> Result<Option<SavedSearchRow>, AppError> {
        let row = sqlx::query_as::<_, SavedSearchRow>("SELECT * FROM saved_searches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SavedSearchRow>, AppError> {
        let rows = sqlx::query_as::<_, SavedSearchRow>(
            "SELECT * FROM saved_searches WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

/// Rows kept by `MemorySearchStore` before the oldest are evicted.
pub const MEMORY_STORE_CAPACITY: usize = 10_000;

/// Keeps saved searches in memory. Not durable; meant for tests and local runs.
/// Once full, each insert evicts the oldest saved search.
pub struct MemorySearchStore {
    rows: RwLock<VecDeque<SavedSearchRow>>,
    capacity: usize,
}

impl Default for MemorySearchStore {
    fn default() -> Self {
        Self::with_capacity(MEMORY_STORE_CAPACITY)
    }
}

impl MemorySearchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: RwLock::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }
}

#[async_trait]
impl SearchStore for MemorySearchStore {
    async fn create(
        &self,
        user_id: Uuid,
        query: &str,
        parsed: &ParsedQuery,
    ) -> Result<SavedSearchRow, AppError> {
        let row = SavedSearchRow {
            id: Uuid::new_v4(),
            user_id,
            query: query.to_string(),
            parsed_query: parsed_to_json(parsed)?,
            created_at: Utc::now(),
        };
        let mut rows = self.rows.write().await;
        while rows.len() >= self.capacity {
            if let Some(evicted) = rows.pop_front() {
                debug!("Memory store full, evicted saved search {}", evicted.id);
            }
        }
        rows.push_back(row.clone());
        Ok(row)
    }

    async fn get(&self, id: Uuid) -> Result<Option<SavedSearchRow>, AppError> {
        Ok(self.rows.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SavedSearchRow>, AppError> {
        // Insertion order is creation order; reverse for newest first.
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::query_parser::parse_job_query;

    #[tokio::test]
    async fn test_memory_store_create_and_get() {
        let store = MemorySearchStore::new();
        let user_id = Uuid::new_v4();
        let parsed = parse_job_query("senior rust berlin");

        let row = store.create(user_id, "senior rust berlin", &parsed).await.unwrap();
        assert_eq!(row.user_id, user_id);
        assert_eq!(row.parsed_query["jobTitle"], "Rust Developer");

        let fetched = store.get(row.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, row.id);
        assert_eq!(fetched.query, "senior rust berlin");
    }

    #[tokio::test]
    async fn test_memory_store_get_missing_is_none() {
        let store = MemorySearchStore::new();
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_lists_newest_first_per_user() {
        let store = MemorySearchStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        for q in ["python", "react", "golang"] {
            store.create(alice, q, &parse_job_query(q)).await.unwrap();
        }
        store.create(bob, "java", &parse_job_query("java")).await.unwrap();

        let rows = store.list_for_user(alice).await.unwrap();
        let queries: Vec<_> = rows.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, vec!["golang", "react", "python"]);
    }

    #[tokio::test]
    async fn test_memory_store_evicts_oldest_when_full() {
        let store = MemorySearchStore::with_capacity(2);
        let user_id = Uuid::new_v4();

        let first = store.create(user_id, "python", &parse_job_query("python")).await.unwrap();
        for q in ["react", "golang"] {
            store.create(user_id, q, &parse_job_query(q)).await.unwrap();
        }

        assert!(store.get(first.id).await.unwrap().is_none());
        let rows = store.list_for_user(user_id).await.unwrap();
        let queries: Vec<_> = rows.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, vec!["golang", "react"]);
    }
}
