use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

use crate::consts::{WEIGHT_HIGH, WEIGHT_LOW, WEIGHT_MEDIUM, WEIGHT_UNKNOWN};
use crate::util::{percentage, round_to};

/// Competition labels reported by the keyword tool.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(ascii_case_insensitive)]
pub enum CompetitionLevel {
    #[strum(to_string = "높음", serialize = "high")]
    High,
    #[strum(to_string = "중간", serialize = "medium")]
    Medium,
    #[strum(to_string = "낮음", serialize = "low")]
    Low,
    #[strum(to_string = "-")]
    Unknown,
}

impl CompetitionLevel {
    pub fn weight(&self) -> f64 {
        match self {
            Self::High => WEIGHT_HIGH,
            Self::Medium => WEIGHT_MEDIUM,
            Self::Low => WEIGHT_LOW,
            Self::Unknown => WEIGHT_UNKNOWN,
        }
    }
}

/// Competition of one keyword: a known label, a numeric index, or a label
/// this crate does not recognise (kept verbatim for display and counting).
#[derive(Debug, Clone, PartialEq)]
pub enum Competition {
    Level(CompetitionLevel),
    Numeric(f64),
    Other(String),
}

impl Default for Competition {
    fn default() -> Self {
        Self::Level(CompetitionLevel::Unknown)
    }
}

impl From<CompetitionLevel> for Competition {
    fn from(level: CompetitionLevel) -> Self {
        Self::Level(level)
    }
}

impl Competition {
    pub const HIGH: Competition = Competition::Level(CompetitionLevel::High);
    pub const MEDIUM: Competition = Competition::Level(CompetitionLevel::Medium);
    pub const LOW: Competition = Competition::Level(CompetitionLevel::Low);
    pub const UNKNOWN: Competition = Competition::Level(CompetitionLevel::Unknown);

    /// Reads the raw `compIdx` field. Absent, null and blank values are unknown.
    pub fn from_raw(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => Self::from_label(s),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) if v.is_finite() => Self::Numeric(v),
                _ => Self::default(),
            },
            _ => Self::default(),
        }
    }

    /// Parses a user or API supplied label.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() {
            return Self::default();
        }
        if let Ok(level) = CompetitionLevel::from_str(label) {
            return Self::Level(level);
        }
        match label.parse::<f64>() {
            Ok(v) if v.is_finite() => Self::Numeric(v),
            _ => Self::Other(label.to_string()),
        }
    }

    /// Numeric weight used by scoring and clustering.
    /// Numeric indices are their own weight; unrecognised labels count as unknown.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Level(level) => level.weight(),
            Self::Numeric(v) => *v,
            Self::Other(_) => WEIGHT_UNKNOWN,
        }
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Competition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(level) => write!(f, "{}", level),
            Self::Numeric(v) => write!(f, "{}", v),
            Self::Other(s) => f.write_str(s),
        }
    }
}

impl Serialize for Competition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Numeric(v) => serializer.serialize_f64(*v),
            other => serializer.collect_str(other),
        }
    }
}

/// One normalized keyword.
///
/// Total volume and the device ratios are derived from the two counts on
/// every call, so they cannot drift out of sync with them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeywordRow {
    pub keyword: String,
    pub pc_volume: u64,
    pub mobile_volume: u64,
    pub competition: Competition,
    pub avg_ad_depth: u64,
    pub ctr: Option<f64>,
    pub clicks: u64,
    pub is_main_keyword: bool,

    // Filled in by later stages
    pub difficulty_score: Option<u8>,
    pub cluster_id: Option<usize>,
}

impl KeywordRow {
    pub fn new(
        keyword: impl Into<String>,
        pc_volume: u64,
        mobile_volume: u64,
        competition: Competition,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            pc_volume,
            mobile_volume,
            competition,
            ..Default::default()
        }
    }

    #[inline(always)]
    pub fn total_volume(&self) -> u64 {
        self.pc_volume.saturating_add(self.mobile_volume)
    }

    /// PC share of this keyword's volume, one decimal, 0 without volume.
    pub fn pc_ratio(&self) -> f64 {
        percentage(self.pc_volume, self.total_volume())
    }

    /// Complement of [`pc_ratio`](Self::pc_ratio) so the two always sum to 100.
    pub fn mobile_ratio(&self) -> f64 {
        if self.total_volume() == 0 {
            return 0.0;
        }
        round_to(100.0 - self.pc_ratio(), 1)
    }

    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.keyword.to_lowercase() == keyword.to_lowercase()
    }
}

impl Serialize for KeywordRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("KeywordRow", 13)?;
        s.serialize_field("keyword", &self.keyword)?;
        s.serialize_field("total_volume", &self.total_volume())?;
        s.serialize_field("pc_volume", &self.pc_volume)?;
        s.serialize_field("mobile_volume", &self.mobile_volume)?;
        s.serialize_field("competition", &self.competition)?;
        s.serialize_field("avg_ad_depth", &self.avg_ad_depth)?;
        s.serialize_field("ctr", &self.ctr)?;
        s.serialize_field("clicks", &self.clicks)?;
        s.serialize_field("pc_ratio", &self.pc_ratio())?;
        s.serialize_field("mobile_ratio", &self.mobile_ratio())?;
        s.serialize_field("is_main_keyword", &self.is_main_keyword)?;
        s.serialize_field("difficulty_score", &self.difficulty_score)?;
        s.serialize_field("cluster_id", &self.cluster_id)?;
        s.end()
    }
}

/// Column a keyword suggestion is ranked by.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum SuggestMetric {
    #[strum(serialize = "total")]
    TotalVolume,
    #[strum(serialize = "pc")]
    PcVolume,
    #[strum(serialize = "mobile")]
    MobileVolume,
    Clicks,
    #[strum(serialize = "difficulty")]
    DifficultyScore,
}

impl SuggestMetric {
    /// Sort key; unscored rows rank below every scored one.
    pub fn value(&self, row: &KeywordRow) -> f64 {
        match self {
            Self::TotalVolume => row.total_volume() as f64,
            Self::PcVolume => row.pc_volume as f64,
            Self::MobileVolume => row.mobile_volume as f64,
            Self::Clicks => row.clicks as f64,
            Self::DifficultyScore => row
                .difficulty_score
                .map(f64::from)
                .unwrap_or(f64::NEG_INFINITY),
        }
    }
}
