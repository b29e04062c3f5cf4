//! Aggregate statistics over a [`Dataset`].

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::consts::TOP_SHARE_FRACTION;
use crate::dataset::Dataset;
use crate::util::{percentage, round_to, saturating_sum};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordStats {
    pub row_count: usize,

    // Total volume distribution
    pub total_volume: u64,
    pub mean_volume: f64,
    pub median_volume: f64,
    pub min_volume: u64,
    pub max_volume: u64,

    // Aggregate device split, percent with one decimal
    pub pc_share: f64,
    pub mobile_share: f64,

    /// Row count per competition label.
    pub competition_counts: BTreeMap<String, usize>,

    /// Rows making up the top decile (at least one) and their share of
    /// total volume as a fraction in [0, 1].
    pub top_share_count: usize,
    pub top_share: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DeviceSplit {
    pub pc: f64,
    pub mobile: f64,
}

/// Statistics for `dataset`, `None` when it has no rows.
pub fn compute_stats(dataset: &Dataset) -> Option<KeywordStats> {
    if dataset.is_empty() {
        return None;
    }

    let row_count = dataset.len();
    let volumes: Vec<u64> = dataset.iter().map(|r| r.total_volume()).collect();
    let total_volume = saturating_sum(volumes.iter().copied());

    let mut competition_counts = BTreeMap::new();
    for row in dataset {
        *competition_counts.entry(row.competition.label()).or_insert(0) += 1;
    }

    // Rows are ranked, so the top decile is a prefix
    let top_share_count = ((row_count as f64 * TOP_SHARE_FRACTION).floor() as usize).max(1);
    let top_volume = saturating_sum(volumes.iter().copied().take(top_share_count));
    let top_share = if total_volume > 0 {
        top_volume as f64 / total_volume as f64
    } else {
        0.0
    };

    let split = device_distribution(dataset);

    Some(KeywordStats {
        row_count,
        total_volume,
        mean_volume: total_volume as f64 / row_count as f64,
        median_volume: median(&volumes),
        min_volume: volumes.iter().copied().min().unwrap_or(0),
        max_volume: volumes.iter().copied().max().unwrap_or(0),
        pc_share: split.pc,
        mobile_share: split.mobile,
        competition_counts,
        top_share_count,
        top_share,
    })
}

/// PC vs mobile share of the summed volume; zero for an empty or all-zero dataset.
pub fn device_distribution(dataset: &Dataset) -> DeviceSplit {
    let pc_sum = saturating_sum(dataset.iter().map(|r| r.pc_volume));
    let mobile_sum = saturating_sum(dataset.iter().map(|r| r.mobile_volume));
    let total = pc_sum.saturating_add(mobile_sum);

    DeviceSplit {
        pc: percentage(pc_sum, total),
        mobile: percentage(mobile_sum, total),
    }
}

/// The statistics as a JSON object; an empty object means "no data".
pub fn stats_map(dataset: &Dataset) -> Map<String, Value> {
    match compute_stats(dataset).map(serde_json::to_value) {
        Some(Ok(Value::Object(map))) => map,
        _ => Map::new(),
    }
}

impl KeywordStats {
    /// Ordered (label, value) pairs for tables and summary exports.
    pub fn summary_rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![
            ("Keywords".to_string(), self.row_count.to_string()),
            ("Total volume".to_string(), self.total_volume.to_string()),
            (
                "Mean volume".to_string(),
                format!("{:.1}", round_to(self.mean_volume, 1)),
            ),
            ("Median volume".to_string(), format!("{}", self.median_volume)),
            ("Max volume".to_string(), self.max_volume.to_string()),
            ("Min volume".to_string(), self.min_volume.to_string()),
            ("PC share %".to_string(), format!("{:.1}", self.pc_share)),
            ("Mobile share %".to_string(), format!("{:.1}", self.mobile_share)),
            (
                format!("Top {} share %", self.top_share_count),
                format!("{:.1}", self.top_share * 100.0),
            ),
        ];

        for (label, count) in &self.competition_counts {
            rows.push((format!("Competition {}", label), count.to_string()));
        }
        rows
    }
}

fn median(values: &[u64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let n = sorted.len();
    match n {
        0 => 0.0,
        _ if n % 2 == 1 => sorted[n / 2] as f64,
        _ => (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0,
    }
}
