use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::consts::{DEFAULT_CLUSTER_COUNT, DEFAULT_CLUSTER_SEED, DEFAULT_TOP_N};
use crate::dataset::Competition;
use crate::error::{KwError, KwResult};

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub filter: FilterParams,
    #[command(flatten)]
    pub cluster: ClusterParams,
    #[command(flatten)]
    pub report: ReportParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterParams {
    #[arg(long, default_value_t = 0)]
    pub min_volume: u64,

    /// Comma-separated competition labels to keep (e.g. "낮음,중간"); empty keeps all
    #[arg(long, default_value = "")]
    pub competition: String,

    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    #[arg(long, default_value_t = 5)]
    pub suggest_limit: usize,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            min_volume: 0,
            competition: String::new(),
            top: DEFAULT_TOP_N,
            suggest_limit: 5,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClusterParams {
    #[arg(long, default_value_t = DEFAULT_CLUSTER_COUNT)]
    pub clusters: usize,
    #[arg(long, default_value_t = DEFAULT_CLUSTER_SEED)]
    pub cluster_seed: u64,
    #[arg(long, default_value_t = 300)]
    pub cluster_max_iter: usize,
    #[arg(long, default_value_t = 10)]
    pub cluster_restarts: usize,
    #[arg(long, default_value_t = 1e-4)]
    pub cluster_tolerance: f64,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            clusters: DEFAULT_CLUSTER_COUNT,
            cluster_seed: DEFAULT_CLUSTER_SEED,
            cluster_max_iter: 300,
            cluster_restarts: 10,
            cluster_tolerance: 1e-4,
        }
    }
}

impl ClusterParams {
    pub fn with_clusters(clusters: usize) -> Self {
        Self {
            clusters,
            ..Default::default()
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportParams {
    /// Keyword column width in printed tables
    #[arg(long, default_value_t = 30)]
    pub keyword_width: usize,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self { keyword_width: 30 }
    }
}

impl FilterParams {
    /// Parsed `competition` list, `None` when no label is given.
    pub fn competition_filter(&self) -> Option<Vec<Competition>> {
        let labels: Vec<Competition> = self
            .competition
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Competition::from_label)
            .collect();

        if labels.is_empty() {
            None
        } else {
            Some(labels)
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KwResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            KwError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            KwError::Config(format!("Failed to parse config '{}': {}", path.display(), e))
        })
    }

    pub fn validate(&self) -> KwResult<()> {
        if self.filter.top == 0 {
            return Err(KwError::Config("--top must be at least 1".to_string()));
        }
        if self.cluster.clusters == 0 {
            return Err(KwError::Config("--clusters must be at least 1".to_string()));
        }
        if self.report.keyword_width < 4 {
            return Err(KwError::Config(
                "--keyword-width must be at least 4".to_string(),
            ));
        }
        Ok(())
    }

    /// Overlays the values the user typed on the command line onto `self`
    /// (typically loaded from a file), leaving clap defaults out.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(filter.min_volume);
        update_if_present!(filter.competition);
        update_if_present!(filter.top);
        update_if_present!(filter.suggest_limit);

        update_if_present!(cluster.clusters);
        update_if_present!(cluster.cluster_seed);
        update_if_present!(cluster.cluster_max_iter);
        update_if_present!(cluster.cluster_restarts);
        update_if_present!(cluster.cluster_tolerance);

        update_if_present!(report.keyword_width);
    }
}
