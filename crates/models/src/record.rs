use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::ModelError;

/// A stored entry: a JSON object with a string `id` plus free-form fields.
pub type Record = Map<String, Value>;

pub const ID_FIELD: &str = "id";

/// The record's `id`, when it is a JSON string.
pub fn record_id(record: &Record) -> Option<&str> {
    record.get(ID_FIELD).and_then(Value::as_str)
}

/// Numeric value of a record's `id` for id generation.
///
/// Strings are read like a lenient integer parse: leading whitespace, an
/// optional sign, then as many digits as follow (`"12abc"` is 12). Ids with no
/// leading digits yield `None`.
pub fn numeric_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => leading_int(s),
        _ => None,
    }
}

fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let n: i64 = digits[..end].parse().ok()?;
    Some(if negative { -n } else { n })
}

/// Parse a request body into a record.
pub fn parse_record(bytes: &[u8]) -> Result<Record, ModelError> {
    let value: Value = serde_json::from_slice(bytes)?;
    into_record(value)
}

/// Parse an update body. An empty body or JSON `null` is an empty patch.
pub fn parse_patch(bytes: &[u8]) -> Result<Record, ModelError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Record::new());
    }
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Null => Ok(Record::new()),
        value => into_record(value),
    }
}

pub fn into_record(value: Value) -> Result<Record, ModelError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(ModelError::NotAnObject("null")),
        Value::Bool(_) => Err(ModelError::NotAnObject("a boolean")),
        Value::Number(_) => Err(ModelError::NotAnObject("a number")),
        Value::String(_) => Err(ModelError::NotAnObject("a string")),
        Value::Array(_) => Err(ModelError::NotAnObject("an array")),
    }
}

/// Serialize a typed view into a record.
pub fn to_record<T: Serialize>(value: &T) -> Result<Record, ModelError> {
    into_record(serde_json::to_value(value)?)
}

/// Shallow merge: every patch field overwrites, absent fields are kept.
pub fn merge(target: &mut Record, patch: Record) {
    for (key, value) in patch {
        target.insert(key, value);
    }
}

/// Loose comparison of a stored field against a query-string value, so that
/// `?userId=3` matches both `"userId": "3"` and `"userId": 3`.
pub fn loosely_equals(value: &Value, expected: &str) -> bool {
    match value {
        Value::String(s) => s == expected,
        Value::Number(n) => {
            let trimmed = expected.trim();
            let parsed = if trimmed.is_empty() { Some(0.0) } else { trimmed.parse::<f64>().ok() };
            match (parsed, n.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        }
        Value::Bool(b) => {
            let as_num = if *b { 1.0 } else { 0.0 };
            expected.trim().parse::<f64>().map(|v| v == as_num).unwrap_or(false)
        }
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}
