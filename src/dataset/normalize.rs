use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::types::{Competition, KeywordRow};
use super::Dataset;
use crate::coerce;
use crate::error::{KwError, KwResult};

// Raw field names of the keyword tool response
pub const FIELD_KEYWORD_LIST: &str = "keywordList";
pub const FIELD_KEYWORD: &str = "relKeyword";
pub const FIELD_PC_COUNT: &str = "monthlyPcQcCnt";
pub const FIELD_MOBILE_COUNT: &str = "monthlyMobileQcCnt";
pub const FIELD_COMPETITION: &str = "compIdx";
pub const FIELD_AD_DEPTH: &str = "plAvgDepth";
pub const FIELD_CTR: &str = "monthlyAveCtr";
pub const FIELD_CLICKS: &str = "monthlyAvePcClkCnt";

/// Maps raw keyword records onto [`KeywordRow`]s for one query.
pub struct RecordNormalizer {
    query_lower: String,
}

impl RecordNormalizer {
    pub fn new(query: &str) -> Self {
        Self {
            query_lower: query.to_lowercase(),
        }
    }

    /// Normalizes one record. Missing fields become zero / unknown; only a
    /// record that is not a JSON object is rejected.
    pub fn normalize(&self, record: &Value) -> KwResult<KeywordRow> {
        let map = record.as_object().ok_or_else(|| {
            KwError::InputShape(format!(
                "expected a keyword record object, got {}",
                value_kind(record)
            ))
        })?;

        Ok(self.normalize_map(map))
    }

    fn normalize_map(&self, map: &Map<String, Value>) -> KeywordRow {
        let keyword = match map.get(FIELD_KEYWORD) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        let is_main_keyword = keyword.to_lowercase() == self.query_lower;

        let ctr = match map.get(FIELD_CTR) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim() == "-" => None,
            Some(v) => Some(coerce::to_float(v)),
        };

        KeywordRow {
            keyword,
            pc_volume: count(map, FIELD_PC_COUNT),
            mobile_volume: count(map, FIELD_MOBILE_COUNT),
            competition: Competition::from_raw(map.get(FIELD_COMPETITION)),
            avg_ad_depth: count(map, FIELD_AD_DEPTH),
            ctr,
            clicks: count(map, FIELD_CLICKS),
            is_main_keyword,
            difficulty_score: None,
            cluster_id: None,
        }
    }
}

/// Normalizes a batch of raw records into a ranked [`Dataset`].
///
/// Accepts either the record array itself or a saved response object
/// carrying it under `keywordList`. Anything else, or any element that is
/// not an object, is an input shape error.
pub fn normalize_batch(records: &Value, query: &str) -> KwResult<Dataset> {
    let list = extract_keyword_list(records)?;
    normalize_records(list, query)
}

pub fn normalize_records(records: &[Value], query: &str) -> KwResult<Dataset> {
    if records.is_empty() {
        warn!(query, "No keyword records to process");
        return Ok(Dataset::empty());
    }

    let normalizer = RecordNormalizer::new(query);
    let rows = records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            normalizer.normalize(record).map_err(|e| match e {
                KwError::InputShape(msg) => KwError::InputShape(format!("record {}: {}", idx, msg)),
                other => other,
            })
        })
        .collect::<KwResult<Vec<_>>>()?;

    debug!(query, rows = rows.len(), "Normalized keyword batch");
    Ok(Dataset::from_rows(rows))
}

/// The record list inside `value`, unwrapping a `{"keywordList": [...]}` response.
pub fn extract_keyword_list(value: &Value) -> KwResult<&[Value]> {
    match value {
        Value::Array(list) => Ok(list.as_slice()),
        Value::Object(map) => match map.get(FIELD_KEYWORD_LIST) {
            Some(Value::Array(list)) => Ok(list.as_slice()),
            Some(Value::Null) | None => Err(KwError::InputShape(format!(
                "response object has no '{}' array",
                FIELD_KEYWORD_LIST
            ))),
            Some(other) => Err(KwError::InputShape(format!(
                "'{}' must be an array, got {}",
                FIELD_KEYWORD_LIST,
                value_kind(other)
            ))),
        },
        other => Err(KwError::InputShape(format!(
            "expected a list of keyword records, got {}",
            value_kind(other)
        ))),
    }
}

fn count(map: &Map<String, Value>, field: &str) -> u64 {
    map.get(field).map(coerce::to_count).unwrap_or(0)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
