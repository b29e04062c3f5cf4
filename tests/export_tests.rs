mod common;

use chrono::{TimeZone, Utc};
use common::row;
use keylens::dataset::{Competition, Dataset};
use keylens::error::KwError;
use keylens::export::{export, export_filename, export_stats_csv, ExportFormat};
use keylens::metrics::compute_stats;
use regex::Regex;

fn sample() -> Dataset {
    let mut main = row("vitamin", 1200, 5, Competition::LOW);
    main.is_main_keyword = true;
    main.ctr = Some(0.5);
    main.difficulty_score = Some(100);
    main.cluster_id = Some(1);

    Dataset::from_rows(vec![main, row("vitamin c", 300, 700, Competition::HIGH)])
}

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
}

#[test]
fn test_filename_format() {
    assert_eq!(
        export_filename("vitamin c", ExportFormat::Csv, &fixed_now()),
        "keywords_vitamin_c_20240309_140507.csv"
    );

    assert_eq!(
        export_filename("1/2 inch", ExportFormat::Csv, &fixed_now()),
        "keywords_1_2_inch_20240309_140507.csv"
    );
    assert_eq!(
        export_filename("../../etc/x", ExportFormat::Csv, &fixed_now()),
        "keywords_______etc_x_20240309_140507.csv"
    );
    assert_eq!(
        export_filename(r"c:\temp*?", ExportFormat::Json, &fixed_now()),
        "keywords_c__temp___20240309_140507.json"
    );

    let live = export_filename("a b", ExportFormat::Json, &Utc::now());
    let re = Regex::new(r"^keywords_a_b_\d{8}_\d{6}\.json$").unwrap();
    assert!(re.is_match(&live), "{}", live);
}

#[test]
fn test_csv_export() {
    let (bytes, filename) = export(&sample(), "vitamin", ExportFormat::Csv, &fixed_now()).unwrap();
    assert!(filename.ends_with(".csv"));

    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "keyword,total_volume,pc_volume,mobile_volume,pc_ratio,mobile_ratio,competition,avg_ad_depth,ctr,clicks,difficulty_score,cluster_id"
    );
    assert!(lines[1].starts_with("vitamin,1205,1200,5,99.6,0.4,낮음,0,0.5,0,100,1"));
    assert!(lines[2].starts_with("vitamin c,1000,300,700,30.0,70.0,높음,0,,0,,"));
    assert!(!text.contains("is_main_keyword"));
}

#[test]
fn test_json_export() {
    let (bytes, filename) = export(&sample(), "vitamin", ExportFormat::Json, &fixed_now()).unwrap();
    assert_eq!(filename, "keywords_vitamin_20240309_140507.json");

    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let rows = value.as_array().unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["keyword"], "vitamin");
    assert_eq!(rows[0]["total_volume"], 1205);
    assert_eq!(rows[1]["ctr"], serde_json::Value::Null);
    assert!(rows[0].get("is_main_keyword").is_none());
}

#[test]
fn test_empty_export_fails() {
    let err = export(&Dataset::empty(), "q", ExportFormat::Csv, &fixed_now()).unwrap_err();
    assert!(matches!(err, KwError::EmptyDataset));
}

#[test]
fn test_stats_csv() {
    let stats = compute_stats(&sample()).unwrap();
    let text = String::from_utf8(export_stats_csv(&stats).unwrap()).unwrap();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("metric,value"));
    assert_eq!(lines.next(), Some("Keywords,2"));
    assert!(text.contains("Total volume,2205"));
}

#[test]
fn test_format_parsing() {
    assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
    assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
    assert!("xlsx".parse::<ExportFormat>().is_err());
    assert_eq!(ExportFormat::Json.to_string(), "json");
}
