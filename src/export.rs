use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::fmt;
use std::io;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

use crate::dataset::{Competition, Dataset, KeywordRow};
use crate::error::{KwError, KwResult};
use crate::metrics::KeywordStats;

#[derive(Debug, Clone, Copy, Default, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Exported columns. The main-keyword flag is internal and left out.
#[derive(Serialize)]
struct ExportRecord<'a> {
    keyword: &'a str,
    total_volume: u64,
    pc_volume: u64,
    mobile_volume: u64,
    pc_ratio: f64,
    mobile_ratio: f64,
    competition: &'a Competition,
    avg_ad_depth: u64,
    ctr: Option<f64>,
    clicks: u64,
    difficulty_score: Option<u8>,
    cluster_id: Option<usize>,
}

impl<'a> From<&'a KeywordRow> for ExportRecord<'a> {
    fn from(row: &'a KeywordRow) -> Self {
        Self {
            keyword: &row.keyword,
            total_volume: row.total_volume(),
            pc_volume: row.pc_volume,
            mobile_volume: row.mobile_volume,
            pc_ratio: row.pc_ratio(),
            mobile_ratio: row.mobile_ratio(),
            competition: &row.competition,
            avg_ad_depth: row.avg_ad_depth,
            ctr: row.ctr,
            clicks: row.clicks,
            difficulty_score: row.difficulty_score,
            cluster_id: row.cluster_id,
        }
    }
}

/// Serializes `dataset` and names the file after `query` and `now`.
///
/// Returns `(bytes, filename)`. Rows keep the dataset order.
pub fn export<Tz>(
    dataset: &Dataset,
    query: &str,
    format: ExportFormat,
    now: &DateTime<Tz>,
) -> KwResult<(Vec<u8>, String)>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if dataset.is_empty() {
        return Err(KwError::EmptyDataset);
    }

    let records: Vec<ExportRecord> = dataset.iter().map(ExportRecord::from).collect();

    let bytes = match format {
        ExportFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(Vec::new());
            for record in &records {
                wtr.serialize(record)?;
            }
            into_bytes(wtr)?
        }
        ExportFormat::Json => serde_json::to_vec_pretty(&records)?,
    };

    let filename = export_filename(query, format, now);
    debug!(%filename, rows = records.len(), bytes = bytes.len(), "Exported keywords");
    Ok((bytes, filename))
}

/// `keywords_<query>_<YYYYmmdd_HHMMSS>.<ext>`. Whitespace, path separators
/// and other characters not allowed in file names become `_`.
pub fn export_filename<Tz>(query: &str, format: ExportFormat, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format!(
        "keywords_{}_{}.{}",
        file_safe(query.trim()),
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Keeps the result a single path component, so `..` cannot survive either.
fn file_safe(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '.' => '_',
            c if c.is_whitespace() || c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// The statistics summary as `metric,value` CSV.
pub fn export_stats_csv(stats: &KeywordStats) -> KwResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["metric", "value"])?;
    for (label, value) in stats.summary_rows() {
        wtr.write_record([label, value])?;
    }
    into_bytes(wtr)
}

fn into_bytes(wtr: csv::Writer<Vec<u8>>) -> KwResult<Vec<u8>> {
    wtr.into_inner()
        .map_err(|e| KwError::Io(io::Error::new(e.error().kind(), e.to_string())))
}
