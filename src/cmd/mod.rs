pub mod analyze;
pub mod suggest;

use keylens::error::KwResult;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

/// Reads saved search API output: a record array or a `{"keywordList": [...]}` object.
pub fn load_records(path: &Path) -> KwResult<Value> {
    info!("📂 Loading keyword records: {}", path.display());
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
