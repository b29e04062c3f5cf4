use keylens::coerce::{to_count, to_float, to_int};
use rstest::rstest;
use serde_json::{json, Value};

#[rstest]
#[case(Value::Null, 0)]
#[case(json!(42), 42)]
#[case(json!(-7), -7)]
#[case(json!(12.9), 12)]
#[case(json!(-12.9), -12)]
#[case(json!("< 10"), 5)]
#[case(json!("< 7"), 3)]
#[case(json!("<10"), 5)]
#[case(json!("< abc"), 0)]
#[case(json!("350"), 350)]
#[case(json!(" 350 "), 350)]
#[case(json!("12.7"), 12)]
#[case(json!("abc"), 0)]
#[case(json!(""), 0)]
#[case(json!(true), 0)]
#[case(json!(false), 0)]
#[case(json!([1, 2]), 0)]
#[case(json!({"n": 1}), 0)]
fn test_to_int(#[case] value: Value, #[case] expected: i64) {
    assert_eq!(to_int(&value), expected);
}

#[rstest]
#[case(Value::Null, 0.0)]
#[case(json!(3), 3.0)]
#[case(json!(0.25), 0.25)]
#[case(json!("1.5"), 1.5)]
#[case(json!("< 10"), 5.0)]
#[case(json!("NaN"), 0.0)]
#[case(json!("inf"), 0.0)]
#[case(json!("n/a"), 0.0)]
fn test_to_float(#[case] value: Value, #[case] expected: f64) {
    assert_eq!(to_float(&value), expected);
}

#[test]
fn test_to_count_clamps_negative() {
    assert_eq!(to_count(&json!(-5)), 0);
    assert_eq!(to_count(&json!("< 10")), 5);
    assert_eq!(to_count(&json!(1200)), 1200);
}

#[test]
fn test_huge_unsigned_saturates() {
    assert_eq!(to_int(&json!(u64::MAX)), i64::MAX);
}
