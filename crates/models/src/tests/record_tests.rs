use serde_json::json;

use crate::errors::ModelError;
use crate::record::{self, loosely_equals, merge, numeric_id, parse_patch, parse_record, record_id};

#[test]
fn numeric_id_reads_leading_digits() {
    assert_eq!(numeric_id(&json!("1")), Some(1));
    assert_eq!(numeric_id(&json!("  42")), Some(42));
    assert_eq!(numeric_id(&json!("12abc")), Some(12));
    assert_eq!(numeric_id(&json!("-3")), Some(-3));
    assert_eq!(numeric_id(&json!(7)), Some(7));
    assert_eq!(numeric_id(&json!("abc")), None);
    assert_eq!(numeric_id(&json!("")), None);
    assert_eq!(numeric_id(&json!(null)), None);
}

#[test]
fn record_id_only_accepts_strings() {
    let rec = parse_record(br#"{"id":"5","title":"x"}"#).unwrap();
    assert_eq!(record_id(&rec), Some("5"));
    let rec = parse_record(br#"{"id":5}"#).unwrap();
    assert_eq!(record_id(&rec), None);
}

#[test]
fn parse_record_rejects_non_objects_and_bad_json() {
    assert!(matches!(parse_record(b"[1,2]"), Err(ModelError::NotAnObject("an array"))));
    assert!(matches!(parse_record(b"\"hi\""), Err(ModelError::NotAnObject("a string"))));
    assert!(matches!(parse_record(b"{not json"), Err(ModelError::Parse(_))));
    assert!(matches!(parse_record(b""), Err(ModelError::Parse(_))));
}

#[test]
fn parse_patch_treats_empty_and_null_as_no_change() {
    assert!(parse_patch(b"").unwrap().is_empty());
    assert!(parse_patch(b"  \n").unwrap().is_empty());
    assert!(parse_patch(b"null").unwrap().is_empty());
    assert_eq!(parse_patch(br#"{"status":"closed"}"#).unwrap().len(), 1);
    assert!(matches!(parse_patch(b"[1]"), Err(ModelError::NotAnObject("an array"))));
    assert!(matches!(parse_patch(b"{oops"), Err(ModelError::Parse(_))));
}

#[test]
fn merge_overwrites_present_and_keeps_absent_fields() {
    let mut target = parse_record(br#"{"id":"1","title":"old","status":"open"}"#).unwrap();
    let patch = parse_record(br#"{"status":"closed","extra":true}"#).unwrap();
    merge(&mut target, patch);
    assert_eq!(
        serde_json::Value::Object(target),
        json!({"id":"1","title":"old","status":"closed","extra":true})
    );
}

#[test]
fn loose_equality_matches_numbers_and_strings() {
    assert!(loosely_equals(&json!(3), "3"));
    assert!(loosely_equals(&json!(3), " 3 "));
    assert!(loosely_equals(&json!("3"), "3"));
    assert!(!loosely_equals(&json!("03"), "3"));
    assert!(!loosely_equals(&json!(4), "3"));
    assert!(!loosely_equals(&json!(3), "abc"));
    assert!(loosely_equals(&json!(true), "1"));
    assert!(!loosely_equals(&json!(null), "null"));
}

#[test]
fn to_record_requires_an_object() {
    assert!(record::to_record(&vec![1, 2]).is_err());
    assert!(record::to_record(&json!({"a": 1})).is_ok());
}
