//! Raw store replies.
//!
//! `RespValue` is the shape every `Store` answers with, whatever transport
//! sits behind it. Nothing here interprets a reply; that is the job of
//! `crate::reply`.

use std::fmt;

/// Prefix the store uses when a command hits a key of another type.
pub const WRONGTYPE_PREFIX: &str = "WRONGTYPE";

/// Message Redis sends with a `WRONGTYPE` rejection.
pub const WRONGTYPE_MESSAGE: &str =
    "WRONGTYPE Operation against a key holding the wrong kind of value";

#[derive(Debug, Clone, PartialEq)]
pub enum RespValue {
    SimpleString(String),
    Error(String),
    Integer(i64),
    BulkString(Option<Vec<u8>>),
    Array(Option<Vec<RespValue>>),
}

impl RespValue {
    #[inline]
    pub fn ok() -> Self {
        RespValue::SimpleString("OK".to_string())
    }

    #[inline]
    pub fn simple(s: &str) -> Self {
        RespValue::SimpleString(s.to_string())
    }

    #[inline]
    pub fn err(msg: impl Into<String>) -> Self {
        RespValue::Error(msg.into())
    }

    #[inline]
    pub fn wrong_type() -> Self {
        RespValue::Error(WRONGTYPE_MESSAGE.to_string())
    }

    #[inline]
    pub fn nil() -> Self {
        RespValue::BulkString(None)
    }

    #[inline]
    pub fn bulk(s: &str) -> Self {
        RespValue::BulkString(Some(s.as_bytes().to_vec()))
    }

    #[inline]
    pub fn empty_array() -> Self {
        RespValue::Array(Some(Vec::new()))
    }

    /// Array of bulk strings, in the order given.
    pub fn bulk_array<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        RespValue::Array(Some(
            items.into_iter().map(|s| RespValue::bulk(s.as_ref())).collect(),
        ))
    }

    /// Null bulk string or null array.
    pub fn is_nil(&self) -> bool {
        matches!(self, RespValue::BulkString(None) | RespValue::Array(None))
    }

    pub fn is_wrong_type(&self) -> bool {
        matches!(self, RespValue::Error(msg) if msg.starts_with(WRONGTYPE_PREFIX))
    }
}

impl fmt::Display for RespValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RespValue::SimpleString(s) => write!(f, "+{}", s),
            RespValue::Error(s) => write!(f, "-{}", s),
            RespValue::Integer(n) => write!(f, ":{}", n),
            RespValue::BulkString(None) => write!(f, "(nil)"),
            RespValue::BulkString(Some(data)) => {
                write!(f, "\"{}\"", String::from_utf8_lossy(data))
            }
            RespValue::Array(None) => write!(f, "(nil array)"),
            RespValue::Array(Some(elements)) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
        }
    }
}
