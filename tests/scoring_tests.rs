mod common;

use common::row;
use keylens::dataset::{Competition, Dataset};
use keylens::scoring::{raw_scores, score_difficulty};

fn scores(dataset: &Dataset) -> Vec<Option<u8>> {
    dataset.iter().map(|r| r.difficulty_score).collect()
}

#[test]
fn test_identical_rows_score_fifty() {
    let dataset = Dataset::from_rows(vec![
        row("a", 100, 100, Competition::MEDIUM),
        row("b", 100, 100, Competition::MEDIUM),
        row("c", 100, 100, Competition::MEDIUM),
    ]);
    assert_eq!(scores(&score_difficulty(&dataset)), vec![Some(50); 3]);
}

#[test]
fn test_single_row_scores_fifty() {
    let dataset = Dataset::from_rows(vec![row("a", 1, 2, Competition::HIGH)]);
    assert_eq!(scores(&score_difficulty(&dataset)), vec![Some(50)]);
}

#[test]
fn test_empty_dataset_stays_empty() {
    assert!(score_difficulty(&Dataset::empty()).is_empty());
}

#[test]
fn test_high_volume_low_competition_wins() {
    let dataset = Dataset::from_rows(vec![
        row("best", 10_000, 10_000, Competition::LOW),
        row("worst", 5, 5, Competition::HIGH),
        row("middle", 500, 500, Competition::MEDIUM),
    ]);
    let scored = score_difficulty(&dataset);
    let by_name = |name: &str| {
        scored
            .iter()
            .find(|r| r.keyword == name)
            .and_then(|r| r.difficulty_score)
    };

    assert_eq!(by_name("best"), Some(100));
    assert_eq!(by_name("worst"), Some(0));
    let middle = by_name("middle").unwrap();
    assert!(middle > 0 && middle < 100);
}

#[test]
fn test_scoring_keeps_order_and_volumes() {
    let dataset = Dataset::from_rows(vec![
        row("a", 900, 100, Competition::HIGH),
        row("b", 10, 10, Competition::LOW),
    ]);
    let scored = score_difficulty(&dataset);

    assert_eq!(scored.len(), dataset.len());
    for (before, after) in dataset.iter().zip(scored.iter()) {
        assert_eq!(before.keyword, after.keyword);
        assert_eq!(before.total_volume(), after.total_volume());
    }
    assert!(dataset.iter().all(|r| r.difficulty_score.is_none()));
}

#[test]
fn test_raw_score_formula() {
    let rows = vec![
        row("a", 0, 0, Competition::LOW),
        row("b", 0, 0, Competition::HIGH),
        row("c", 0, 0, Competition::UNKNOWN),
    ];
    // All-zero volume: only the competition term remains
    let raw = raw_scores(&rows);
    assert!((raw[0] - (-0.1)).abs() < 1e-12);
    assert!((raw[1] - (-0.3)).abs() < 1e-12);
    assert!((raw[2] - (-0.15)).abs() < 1e-12);
}

#[test]
fn test_zero_volume_rows_scored_by_competition() {
    let dataset = Dataset::from_rows(vec![
        row("low", 0, 0, Competition::LOW),
        row("high", 0, 0, Competition::HIGH),
    ]);
    assert_eq!(scores(&score_difficulty(&dataset)), vec![Some(100), Some(0)]);
}
