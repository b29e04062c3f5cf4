use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ClusterParams;
use crate::dataset::Dataset;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    #[error("clustering support is not compiled in (feature 'clustering')")]
    Unavailable,

    #[error("cannot form {k} clusters from {points} points")]
    InvalidClusterCount { k: usize, points: usize },

    #[error("feature vector {0} is not finite")]
    NonFiniteFeature(usize),

    #[error("k-means did not produce a usable model")]
    Degenerate,
}

/// Per-cluster aggregates for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub cluster_id: usize,
    pub keywords: usize,
    pub mean_volume: f64,
    pub mean_competition_weight: f64,
}

/// Groups rows by (total volume, competition weight) with seeded k-means.
///
/// With fewer rows than clusters, or if clustering fails, the rows are
/// returned without `cluster_id`. Failures are logged, never returned.
/// Cluster ids carry no ordering meaning.
pub fn assign_clusters(dataset: &Dataset, params: &ClusterParams) -> Dataset {
    if dataset.len() < params.clusters {
        debug!(
            rows = dataset.len(),
            k = params.clusters,
            "Too few keywords to cluster, skipping"
        );
        return dataset.clone();
    }

    match try_assign(dataset, params) {
        Ok(clustered) => clustered,
        Err(e) => {
            warn!(error = %e, "Keyword clustering failed, rows left unclustered");
            dataset.clone()
        }
    }
}

#[cfg(feature = "clustering")]
fn try_assign(dataset: &Dataset, params: &ClusterParams) -> Result<Dataset, ClusterError> {
    use super::kmeans;

    let features: Vec<[f64; 2]> = dataset
        .iter()
        .map(|r| [r.total_volume() as f64, r.competition.weight()])
        .collect();

    let points = kmeans::standardize(&features);
    let model = kmeans::fit_kmeans(&points, &kmeans::KMeansParams::from(params))?;

    debug!(
        k = params.clusters,
        iterations = model.iterations,
        inertia = model.inertia,
        "Clustered keywords"
    );

    Ok(dataset.annotated(|idx, row| row.cluster_id = Some(model.labels[idx])))
}

#[cfg(not(feature = "clustering"))]
fn try_assign(_dataset: &Dataset, _params: &ClusterParams) -> Result<Dataset, ClusterError> {
    Err(ClusterError::Unavailable)
}

/// Summaries for every cluster id present, in id order.
pub fn cluster_summary(dataset: &Dataset) -> Vec<ClusterSummary> {
    let mut groups: BTreeMap<usize, (usize, u64, f64)> = BTreeMap::new();

    for row in dataset {
        if let Some(id) = row.cluster_id {
            let entry = groups.entry(id).or_insert((0, 0, 0.0));
            entry.0 += 1;
            entry.1 = entry.1.saturating_add(row.total_volume());
            entry.2 += row.competition.weight();
        }
    }

    groups
        .into_iter()
        .map(|(cluster_id, (keywords, volume, weight))| ClusterSummary {
            cluster_id,
            keywords,
            mean_volume: volume as f64 / keywords as f64,
            mean_competition_weight: weight / keywords as f64,
        })
        .collect()
}
