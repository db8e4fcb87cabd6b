/// Job Source — the single point of entry for fetching listings from the external
/// job-board aggregator.
///
/// Handlers depend on the `JobSource` trait only; `HttpJobSource` is the production
/// backend and tests plug in a canned source.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::search::match_scorer::JobListing;
use crate::search::query_parser::ParsedQuery;

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum JobSourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Aggregator error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Aggregator unavailable after {retries} retries")]
    Exhausted { retries: u32 },
}

/// One listing as returned by the aggregator. Every field is optional upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatedJob {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: Option<String>,
    pub skills: Vec<String>,
    pub remote: bool,
}

impl AggregatedJob {
    /// Projects the fields the match scorer reads.
    pub fn listing(&self) -> JobListing {
        JobListing {
            title: self.title.clone(),
            skills: self.skills.clone(),
            location: self.location.clone(),
            remote: self.remote,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AggregatorResponse {
    #[serde(default)]
    results: Vec<AggregatedJob>,
}

#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch(&self, query: &ParsedQuery) -> Result<Vec<AggregatedJob>, JobSourceError>;
}

/// Aggregator client over HTTP with retry on 429 and 5xx.
#[derive(Clone)]
pub struct HttpJobSource {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    /// First retry delay; doubles on each further attempt.
    backoff: Duration,
}

impl HttpJobSource {
    pub fn new(base_url: String, api_key: Option<String>) -> Result<Self, JobSourceError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url,
            api_key,
            backoff: RETRY_BACKOFF,
        })
    }

    #[cfg(test)]
    fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }
}

/// Query-string parameters sent to the aggregator for a parsed query.
fn search_params(query: &ParsedQuery) -> Vec<(&'static str, String)> {
    let mut what = query.job_title.clone();
    for skill in &query.skills {
        what.push(' ');
        what.push_str(skill);
    }

    let mut params = vec![("what", what)];
    if !query.location.is_empty() {
        params.push(("where", query.location.clone()));
    }
    params.push(("job_type", query.job_type.to_string()));
    params.push(("experience", query.experience_level.to_string()));
    params
}

#[async_trait]
impl JobSource for HttpJobSource {
    async fn fetch(&self, query: &ParsedQuery) -> Result<Vec<AggregatedJob>, JobSourceError> {
        let params = search_params(query);
        let mut last_error: Option<JobSourceError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = self.backoff * (1 << (attempt - 1));
                warn!(
                    "Aggregator attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.get(&self.base_url).query(&params);
            if let Some(key) = &self.api_key {
                request = request.header("x-api-key", key);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(JobSourceError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Aggregator returned {}: {}", status, body);
                last_error = Some(JobSourceError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(JobSourceError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let body: AggregatorResponse = response.json().await?;
            debug!("Aggregator returned {} listings", body.results.len());
            return Ok(body.results);
        }

        Err(last_error.unwrap_or(JobSourceError::Exhausted {
            retries: MAX_RETRIES,
        }))
    }
}
