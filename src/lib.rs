pub mod api;
pub mod coerce;
pub mod config;
pub mod consts;
pub mod dataset;
pub mod error;
pub mod export;
pub mod metrics;
pub mod scoring;

mod util;

pub use api::{analyze, AnalysisResult, AnalysisSession, Credentials, KeywordSource, SourceError};
pub use config::Config;
pub use dataset::{Competition, CompetitionLevel, Dataset, KeywordRow, SuggestMetric};
pub use error::{KwError, KwResult};
pub use metrics::{compute_stats, KeywordStats};
pub use scoring::{assign_clusters, score_difficulty};
