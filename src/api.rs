use serde::Serialize;
use serde_json::Value;
use std::env;
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{Config, FilterParams};
use crate::consts::MAX_KEYWORD_CHARS;
use crate::dataset::{normalize_batch, Dataset};
use crate::error::{KwError, KwResult};
use crate::metrics::{compute_stats, KeywordStats};
use crate::scoring::{assign_clusters, score_difficulty};

pub const ENV_CUSTOMER_ID: &str = "NAVER_CUSTOMER_ID";
pub const ENV_API_KEY: &str = "NAVER_API_KEY";
pub const ENV_SECRET_KEY: &str = "NAVER_SECRET_KEY";

/// Failures a keyword search backend can report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("API credentials are missing or incomplete")]
    MissingCredentials,

    #[error("authentication failed, check the API credentials")]
    Authentication,

    #[error("rate limited by the search API, retry later")]
    RateLimited,

    #[error("search request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("search API returned HTTP {0}")]
    Http(u16),
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub customer_id: String,
    pub api_key: String,
    pub secret_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("customer_id", &self.customer_id)
            .field("api_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(
        customer_id: impl Into<String>,
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Reads `NAVER_CUSTOMER_ID`, `NAVER_API_KEY` and `NAVER_SECRET_KEY`.
    /// Unset variables are left empty.
    pub fn from_env() -> Self {
        let var = |name: &str| env::var(name).unwrap_or_default();
        Self::new(var(ENV_CUSTOMER_ID), var(ENV_API_KEY), var(ENV_SECRET_KEY))
    }

    pub fn is_complete(&self) -> bool {
        [&self.customer_id, &self.api_key, &self.secret_key]
            .iter()
            .all(|s| !s.trim().is_empty())
    }
}

/// A backend returning raw keyword records for a seed keyword.
pub trait KeywordSource {
    fn fetch_keywords(
        &self,
        keyword: &str,
        credentials: &Credentials,
    ) -> Result<Vec<Value>, SourceError>;
}

/// Everything one search produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub query: String,
    pub dataset: Dataset,
    pub stats: Option<KeywordStats>,
}

impl AnalysisResult {
    /// The dataset narrowed by volume and competition, then cut to `top` rows.
    pub fn filtered(&self, filter: &FilterParams) -> Dataset {
        let allowed = filter.competition_filter();
        self.dataset
            .filter(filter.min_volume, allowed.as_deref())
            .top(filter.top)
    }
}

/// Checks a seed keyword before it is sent anywhere.
pub fn validate_keyword(keyword: &str) -> KwResult<&str> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        return Err(KwError::InvalidQuery("keyword is empty".to_string()));
    }
    let chars = trimmed.chars().count();
    if chars > MAX_KEYWORD_CHARS {
        return Err(KwError::InvalidQuery(format!(
            "keyword is {} characters long, the limit is {}",
            chars, MAX_KEYWORD_CHARS
        )));
    }
    Ok(trimmed)
}

/// Runs the full pipeline over already fetched records.
pub fn analyze(records: &Value, query: &str, config: &Config) -> KwResult<AnalysisResult> {
    let dataset = normalize_batch(records, query)?;
    let dataset = score_difficulty(&dataset);
    let dataset = assign_clusters(&dataset, &config.cluster);
    let stats = compute_stats(&dataset);

    info!(
        query,
        keywords = dataset.len(),
        total_volume = stats.as_ref().map_or(0, |s| s.total_volume),
        "Keyword analysis complete"
    );

    Ok(AnalysisResult {
        query: query.to_string(),
        dataset,
        stats,
    })
}

/// Validates `keyword`, fetches its records from `source` and analyzes them.
pub fn analyze_from_source<S: KeywordSource + ?Sized>(
    source: &S,
    keyword: &str,
    credentials: &Credentials,
    config: &Config,
) -> KwResult<AnalysisResult> {
    let keyword = validate_keyword(keyword)?;
    if !credentials.is_complete() {
        return Err(SourceError::MissingCredentials.into());
    }

    let records = source.fetch_keywords(keyword, credentials).map_err(|e| {
        warn!(keyword, error = %e, "Keyword search failed");
        KwError::from(e)
    })?;

    analyze(&Value::Array(records), keyword, config)
}

/// Holds the most recent successful analysis for an interactive caller.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    last: Option<AnalysisResult>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `result`, returning the one it replaces.
    pub fn record(&mut self, result: AnalysisResult) -> Option<AnalysisResult> {
        self.last.replace(result)
    }

    pub fn last(&self) -> Option<&AnalysisResult> {
        self.last.as_ref()
    }

    pub fn take(&mut self) -> Option<AnalysisResult> {
        self.last.take()
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Runs a search. A failed search leaves the previous result in place.
    pub fn run<S: KeywordSource + ?Sized>(
        &mut self,
        source: &S,
        keyword: &str,
        credentials: &Credentials,
        config: &Config,
    ) -> KwResult<&AnalysisResult> {
        let result = analyze_from_source(source, keyword, credentials, config)?;
        Ok(&*self.last.insert(result))
    }
}
