use keylens::coerce::{to_float, to_int};
use keylens::config::ClusterParams;
use keylens::dataset::{Competition, Dataset, KeywordRow};
use keylens::metrics::compute_stats;
use keylens::scoring::{assign_clusters, score_difficulty};
use proptest::prelude::*;
use serde_json::Value;

// --- STRATEGIES ---

fn arb_competition() -> impl Strategy<Value = Competition> {
    prop_oneof![
        Just(Competition::HIGH),
        Just(Competition::MEDIUM),
        Just(Competition::LOW),
        Just(Competition::UNKNOWN),
        (0.0..3.0f64).prop_map(Competition::Numeric),
    ]
}

prop_compose! {
    fn arb_row()(
        idx in 0u32..1000,
        pc in 0u64..2_000_000,
        mobile in 0u64..2_000_000,
        competition in arb_competition()
    ) -> KeywordRow {
        KeywordRow::new(format!("kw{}", idx), pc, mobile, competition)
    }
}

fn arb_rows() -> impl Strategy<Value = Vec<KeywordRow>> {
    proptest::collection::vec(arb_row(), 0..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_coercion_never_panics(s in ".*") {
        let value = Value::String(s);
        let _ = to_int(&value);
        prop_assert!(to_float(&value).is_finite());
    }

    #[test]
    fn test_threshold_is_half(n in 0i64..1_000_000) {
        prop_assert_eq!(to_int(&Value::String(format!("< {}", n))), n / 2);
    }

    #[test]
    fn test_row_invariants(row in arb_row()) {
        prop_assert_eq!(row.total_volume(), row.pc_volume + row.mobile_volume);
        if row.total_volume() > 0 {
            prop_assert!((row.pc_ratio() + row.mobile_ratio() - 100.0).abs() < 1e-9);
        } else {
            prop_assert_eq!(row.pc_ratio(), 0.0);
            prop_assert_eq!(row.mobile_ratio(), 0.0);
        }
    }

    #[test]
    fn test_dataset_sorted_and_stable(rows in arb_rows()) {
        let tagged: Vec<KeywordRow> = rows
            .into_iter()
            .enumerate()
            .map(|(i, mut r)| { r.keyword = i.to_string(); r })
            .collect();
        let dataset = Dataset::from_rows(tagged);

        for pair in dataset.rows().windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.total_volume() >= b.total_volume());
            if a.total_volume() == b.total_volume() {
                let ia: usize = a.keyword.parse().unwrap();
                let ib: usize = b.keyword.parse().unwrap();
                prop_assert!(ia < ib);
            }
        }
    }

    #[test]
    fn test_pipeline_preserves_rows(rows in arb_rows()) {
        let dataset = Dataset::from_rows(rows);
        let scored = score_difficulty(&dataset);
        let clustered = assign_clusters(&scored, &ClusterParams::default());

        prop_assert_eq!(clustered.len(), dataset.len());
        for (before, after) in dataset.iter().zip(clustered.iter()) {
            prop_assert_eq!(&before.keyword, &after.keyword);
            prop_assert_eq!(before.total_volume(), after.total_volume());

            let score = after.difficulty_score;
            prop_assert!(matches!(score, Some(s) if s <= 100));

            match after.cluster_id {
                Some(id) => prop_assert!(id < 3),
                None => prop_assert!(dataset.len() < 3),
            }
        }
    }

    #[test]
    fn test_stats_consistent(rows in arb_rows()) {
        let dataset = Dataset::from_rows(rows);
        match compute_stats(&dataset) {
            None => prop_assert!(dataset.is_empty()),
            Some(stats) => {
                prop_assert_eq!(stats.row_count, dataset.len());
                prop_assert!(stats.min_volume as f64 <= stats.median_volume);
                prop_assert!(stats.median_volume <= stats.max_volume as f64);
                prop_assert!((0.0..=1.0).contains(&stats.top_share));
                prop_assert_eq!(stats.competition_counts.values().sum::<usize>(), dataset.len());
            }
        }
    }
}
