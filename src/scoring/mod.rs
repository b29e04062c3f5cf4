pub mod cluster;
#[cfg(feature = "clustering")]
pub mod kmeans;

pub use self::cluster::{assign_clusters, cluster_summary, ClusterError, ClusterSummary};

use tracing::debug;

use crate::consts::{COMPETITION_PENALTY, UNIFORM_SCORE, VOLUME_WEIGHT, WEIGHT_HIGH};
use crate::dataset::{Dataset, KeywordRow};

/// Annotates every row with a 0-100 opportunity score.
///
/// High volume raises the score, strong competition lowers it. The score is
/// min-max normalized within `dataset`, so it only ranks keywords of one
/// search against each other.
pub fn score_difficulty(dataset: &Dataset) -> Dataset {
    if dataset.is_empty() {
        return dataset.clone();
    }

    let scores = opportunity_scores(dataset.rows());
    debug!(rows = scores.len(), "Scored keyword difficulty");

    dataset.annotated(|idx, row| row.difficulty_score = Some(scores[idx]))
}

/// Unnormalized score: `0.7 * volume_score - 0.3 * (weight / 3)` where
/// `volume_score = ln(1 + volume) / max ln(1 + volume)` (0 if that max is 0).
pub fn raw_scores(rows: &[KeywordRow]) -> Vec<f64> {
    let log_volumes: Vec<f64> = rows
        .iter()
        .map(|r| (r.total_volume() as f64).ln_1p())
        .collect();
    let max_log = log_volumes.iter().copied().fold(0.0f64, f64::max);

    rows.iter()
        .zip(&log_volumes)
        .map(|(row, &log_volume)| {
            let volume_score = if max_log > 0.0 {
                log_volume / max_log
            } else {
                0.0
            };
            VOLUME_WEIGHT * volume_score - COMPETITION_PENALTY * (row.competition.weight() / WEIGHT_HIGH)
        })
        .collect()
}

/// Min-max scaled to 0-100. Halves round to even (as NumPy/pandas `round`
/// does), so 12.5 scores 12; `f64::round` would give 13.
fn opportunity_scores(rows: &[KeywordRow]) -> Vec<u8> {
    let raw = raw_scores(rows);

    let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range <= 0.0 {
        return vec![UNIFORM_SCORE; raw.len()];
    }

    raw.iter().map(|&s| scale_score(s, min, range)).collect()
}

#[inline(always)]
fn scale_score(raw: f64, min: f64, range: f64) -> u8 {
    ((raw - min) / range * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
}
