/// Weight of the log-scaled volume term in the opportunity score.
pub const VOLUME_WEIGHT: f64 = 0.7;

/// Weight of the (normalized) competition penalty in the opportunity score.
pub const COMPETITION_PENALTY: f64 = 0.3;

/// Competition weights per label. The highest weight is also the divisor
/// that maps a weight into [0, 1] for scoring.
pub const WEIGHT_HIGH: f64 = 3.0;
pub const WEIGHT_MEDIUM: f64 = 2.0;
pub const WEIGHT_LOW: f64 = 1.0;
/// Used for "-" and for labels the API may add later.
pub const WEIGHT_UNKNOWN: f64 = 1.5;

/// Score given to every row when all raw scores are equal.
pub const UNIFORM_SCORE: u8 = 50;

/// Fraction of rows (by volume rank) whose share of total volume is reported.
pub const TOP_SHARE_FRACTION: f64 = 0.1;

/// Default number of k-means clusters.
pub const DEFAULT_CLUSTER_COUNT: usize = 3;

/// Default k-means seed, kept stable so repeated runs assign the same ids.
pub const DEFAULT_CLUSTER_SEED: u64 = 42;

/// Default number of rows shown in the keyword table.
pub const DEFAULT_TOP_N: usize = 15;

/// Longest query keyword accepted before calling the search API.
pub const MAX_KEYWORD_CHARS: usize = 100;
