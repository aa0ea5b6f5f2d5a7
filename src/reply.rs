//! Sentinel normalization.
//!
//! Every raw store reply is first classified into one of four outcomes,
//! then decoded into the shape the calling operation promises. The store
//! overloads a handful of sentinels (nil, `0`, empty arrays, error lines);
//! the rules here keep them apart:
//!
//! - nil (bulk or array) is `Absent`
//! - a `WRONGTYPE` error line is `TypeMismatch`
//! - any other error line is `OperationFailed`
//! - everything else, including `0` and `[]`, is a real `Value`
//!
//! Collection reads never see `Absent`: the store answers a missing key
//! with an empty collection, which is already the correct value.

use crate::store::RespValue;
use std::collections::HashMap;

/// Outcome of a single store round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Value(T),
    Absent,
    TypeMismatch,
    OperationFailed(String),
}

impl Reply<RespValue> {
    pub fn classify(raw: RespValue) -> Self {
        match raw {
            RespValue::Error(msg) if raw_is_wrong_type(&msg) => Reply::TypeMismatch,
            RespValue::Error(msg) => Reply::OperationFailed(msg),
            v if v.is_nil() => Reply::Absent,
            v => Reply::Value(v),
        }
    }
}

fn raw_is_wrong_type(msg: &str) -> bool {
    msg.starts_with(crate::store::WRONGTYPE_PREFIX)
}

/// Decoded payload, or the reply handed back when its shape is wrong.
pub type Decoded<T> = Result<T, RespValue>;

fn bytes_to_string(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

fn is_string_like(value: &RespValue) -> bool {
    matches!(
        value,
        RespValue::BulkString(Some(_)) | RespValue::SimpleString(_)
    )
}

/// Bulk or simple string payload.
pub fn string(value: RespValue) -> Decoded<String> {
    match value {
        RespValue::BulkString(Some(bytes)) => Ok(bytes_to_string(bytes)),
        RespValue::SimpleString(s) => Ok(s),
        other => Err(other),
    }
}

pub fn integer(value: RespValue) -> Decoded<i64> {
    let parsed = match &value {
        RespValue::Integer(n) => Some(*n),
        // Proxies speaking RESP3 may answer numbers as bulk strings
        RespValue::BulkString(Some(bytes)) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.parse().ok()),
        _ => None,
    };
    parsed.ok_or(value)
}

/// Non-negative count (removed, added, length).
pub fn count(value: RespValue) -> Decoded<u64> {
    match integer(value)? {
        n if n >= 0 => Ok(n as u64),
        n => Err(RespValue::Integer(n)),
    }
}

/// `1` / `0` integer replies.
pub fn flag(value: RespValue) -> Decoded<bool> {
    match integer(value)? {
        0 => Ok(false),
        1 => Ok(true),
        n => Err(RespValue::Integer(n)),
    }
}

/// `+OK`.
pub fn ok_status(value: RespValue) -> Decoded<()> {
    match value {
        RespValue::SimpleString(s) if s == "OK" => Ok(()),
        other => Err(other),
    }
}

/// Array of strings; a nil element is a shape error.
pub fn strings(value: RespValue) -> Decoded<Vec<String>> {
    match value {
        RespValue::Array(Some(items)) if items.iter().all(is_string_like) => Ok(items
            .into_iter()
            .filter_map(|item| string(item).ok())
            .collect()),
        other => Err(other),
    }
}

/// Array with one slot per requested key or field; nil slots stay in place.
pub fn optional_strings(value: RespValue) -> Decoded<Vec<Option<String>>> {
    match value {
        RespValue::Array(Some(items))
            if items.iter().all(|i| i.is_nil() || is_string_like(i)) =>
        {
            Ok(items.into_iter().map(|item| string(item).ok()).collect())
        }
        other => Err(other),
    }
}

/// Flat `[field, value, field, value, ...]` array.
pub fn field_map(value: RespValue) -> Decoded<HashMap<String, String>> {
    match value {
        RespValue::Array(Some(ref items)) if items.len() % 2 != 0 => Err(value),
        other => {
            let items = strings(other)?;
            let mut map = HashMap::with_capacity(items.len() / 2);
            let mut iter = items.into_iter();
            while let (Some(field), Some(v)) = (iter.next(), iter.next()) {
                map.insert(field, v);
            }
            Ok(map)
        }
    }
}

/// Two-element `[key, value]` array from a blocking pop.
pub fn key_value(value: RespValue) -> Decoded<(String, String)> {
    match value {
        RespValue::Array(Some(ref items)) if items.len() != 2 => Err(value),
        other => {
            let mut items = strings(other)?.into_iter();
            match (items.next(), items.next()) {
                (Some(k), Some(v)) => Ok((k, v)),
                _ => Err(RespValue::empty_array()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::WRONGTYPE_MESSAGE;

    #[test]
    fn test_classify_separates_sentinels() {
        assert_eq!(Reply::classify(RespValue::nil()), Reply::Absent);
        assert_eq!(Reply::classify(RespValue::Array(None)), Reply::Absent);
        assert_eq!(
            Reply::classify(RespValue::err(WRONGTYPE_MESSAGE)),
            Reply::TypeMismatch
        );
        assert_eq!(
            Reply::classify(RespValue::err("ERR value is not an integer or out of range")),
            Reply::OperationFailed("ERR value is not an integer or out of range".to_string())
        );
    }

    #[test]
    fn test_zero_and_empty_are_values() {
        assert_eq!(
            Reply::classify(RespValue::Integer(0)),
            Reply::Value(RespValue::Integer(0))
        );
        assert_eq!(
            Reply::classify(RespValue::empty_array()),
            Reply::Value(RespValue::empty_array())
        );
        assert_eq!(
            Reply::classify(RespValue::bulk("")),
            Reply::Value(RespValue::bulk(""))
        );
    }

    #[test]
    fn test_optional_strings_keep_slots() {
        let raw = RespValue::Array(Some(vec![
            RespValue::bulk("a"),
            RespValue::nil(),
            RespValue::bulk("c"),
        ]));
        assert_eq!(
            optional_strings(raw),
            Ok(vec![Some("a".to_string()), None, Some("c".to_string())])
        );
    }

    #[test]
    fn test_strings_hand_back_bad_reply() {
        let raw = RespValue::Array(Some(vec![RespValue::bulk("a"), RespValue::nil()]));
        assert_eq!(strings(raw.clone()), Err(raw));
        assert_eq!(string(RespValue::Integer(3)), Err(RespValue::Integer(3)));
    }

    #[test]
    fn test_field_map() {
        let map = field_map(RespValue::bulk_array(["f1", "v1", "f2", "v2"])).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["f2"], "v2");
        assert!(field_map(RespValue::bulk_array(["dangling"])).is_err());
        assert_eq!(field_map(RespValue::empty_array()), Ok(HashMap::new()));
    }

    #[test]
    fn test_flags_and_counts() {
        assert_eq!(flag(RespValue::Integer(1)), Ok(true));
        assert_eq!(flag(RespValue::Integer(0)), Ok(false));
        assert!(flag(RespValue::Integer(2)).is_err());
        assert!(count(RespValue::Integer(-1)).is_err());
        assert_eq!(integer(RespValue::bulk("-12")), Ok(-12));
        assert_eq!(ok_status(RespValue::ok()), Ok(()));
    }

    #[test]
    fn test_key_value() {
        assert_eq!(
            key_value(RespValue::bulk_array(["q", "job"])),
            Ok(("q".to_string(), "job".to_string()))
        );
        assert!(key_value(RespValue::bulk_array(["q"])).is_err());
    }
}
