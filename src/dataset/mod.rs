pub mod normalize;
pub mod types;

use serde::Serialize;

pub use self::normalize::{normalize_batch, normalize_records, RecordNormalizer};
pub use self::types::{Competition, CompetitionLevel, KeywordRow, SuggestMetric};

/// Keyword rows of one search, ranked by total volume.
///
/// Rows are kept sorted by total volume descending at all times, ties in
/// their original order. Every transformation returns a new `Dataset`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    rows: Vec<KeywordRow>,
}

impl Dataset {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Ranks `rows` by total volume (stable sort).
    pub fn from_rows(mut rows: Vec<KeywordRow>) -> Self {
        rows.sort_by(|a, b| b.total_volume().cmp(&a.total_volume()));
        Self { rows }
    }

    pub fn rows(&self) -> &[KeywordRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeywordRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<KeywordRow> {
        self.rows
    }

    /// The `n` highest-volume rows (all rows if `n` exceeds the length).
    pub fn top(&self, n: usize) -> Dataset {
        Self {
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Rows with at least `min_volume` total volume and, when `competition_in`
    /// is given, one of the listed competition values.
    pub fn filter(&self, min_volume: u64, competition_in: Option<&[Competition]>) -> Dataset {
        let rows = self
            .rows
            .iter()
            .filter(|r| r.total_volume() >= min_volume)
            .filter(|r| competition_in.map_or(true, |allowed| allowed.contains(&r.competition)))
            .cloned()
            .collect();
        Self { rows }
    }

    /// The row of the queried keyword, falling back to the top row.
    pub fn main_row(&self) -> Option<&KeywordRow> {
        self.rows
            .iter()
            .find(|r| r.is_main_keyword)
            .or_else(|| self.rows.first())
    }

    /// Up to `limit` rows ranked by `metric`, optionally restricted to one
    /// competition value. The ranking is not the dataset order, hence a plain Vec.
    pub fn suggest(
        &self,
        metric: SuggestMetric,
        competition: Option<&Competition>,
        limit: usize,
    ) -> Vec<KeywordRow> {
        let mut picks: Vec<KeywordRow> = self
            .rows
            .iter()
            .filter(|r| competition.map_or(true, |c| &r.competition == c))
            .cloned()
            .collect();

        picks.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));
        picks.truncate(limit);
        picks
    }

    /// Copies the dataset, letting `annotate` fill derived fields of each row.
    /// Volumes must not change, so the ranking still holds.
    pub(crate) fn annotated<F>(&self, mut annotate: F) -> Dataset
    where
        F: FnMut(usize, &mut KeywordRow),
    {
        let mut rows = self.rows.clone();
        for (idx, row) in rows.iter_mut().enumerate() {
            annotate(idx, row);
        }
        Self { rows }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a KeywordRow;
    type IntoIter = std::slice::Iter<'a, KeywordRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
