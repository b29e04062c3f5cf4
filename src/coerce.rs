//! Lenient numeric coercion for search API values.
//!
//! The keyword tool reports counts as integers most of the time, but low
//! counts arrive as threshold strings such as `"< 10"` and some fields are
//! occasionally missing or null. Every function here is total: anything that
//! cannot be read as a number becomes zero.

use serde_json::Value;

/// Marks a "fewer than N" count. The point estimate used is N / 2.
const THRESHOLD_MARKER: char = '<';

/// Reads a value as an integer.
///
/// * null / missing / array / object -> 0
/// * bool -> 0, `true` included
/// * numbers -> cast, floats truncated toward zero
/// * `"< N"` -> N / 2 (integer division), 0 if N is not an integer
/// * numeric strings -> parsed (`"12.7"` -> 12), 0 otherwise
pub fn to_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(u) = n.as_u64() {
                i64::try_from(u).unwrap_or(i64::MAX)
            } else {
                n.as_f64().map(truncate).unwrap_or(0)
            }
        }
        Value::String(s) => parse_int(s),
        _ => 0,
    }
}

/// Reads a value as a float. Same rules as [`to_int`] without truncation;
/// non-finite results (`"NaN"`, `"inf"`) become 0.0.
pub fn to_float(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_float(s),
        _ => 0.0,
    };

    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

/// [`to_int`] clamped at zero, for counts.
pub fn to_count(value: &Value) -> u64 {
    to_int(value).max(0) as u64
}

fn parse_int(raw: &str) -> i64 {
    let s = raw.trim();

    if let Some(threshold) = threshold_part(s) {
        return threshold.parse::<i64>().map(|n| n / 2).unwrap_or(0);
    }

    s.parse::<i64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().map(truncate))
        .unwrap_or(0)
}

fn parse_float(raw: &str) -> f64 {
    let s = raw.trim();

    if let Some(threshold) = threshold_part(s) {
        return threshold.parse::<f64>().map(|n| n / 2.0).unwrap_or(0.0);
    }

    s.parse::<f64>().unwrap_or(0.0)
}

/// The numeric text following the last threshold marker, if any.
fn threshold_part(s: &str) -> Option<&str> {
    s.rfind(THRESHOLD_MARKER).map(|idx| s[idx + 1..].trim())
}

#[inline(always)]
fn truncate(f: f64) -> i64 {
    if f.is_finite() {
        f.trunc() as i64
    } else {
        0
    }
}
