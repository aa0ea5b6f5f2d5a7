//! Declared shape of a key's value, as reported by TYPE.

use std::fmt;
use std::str::FromStr;

/// A snapshot of what a key holds at the moment it was inspected.
///
/// Never cached: the store is shared, so the next call may see another type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    None,
    String,
    List,
    Set,
    SortedSet,
    Hash,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::None => "none",
            KeyType::String => "string",
            KeyType::List => "list",
            KeyType::Set => "set",
            KeyType::SortedSet => "zset",
            KeyType::Hash => "hash",
        }
    }

    pub fn exists(&self) -> bool {
        *self != KeyType::None
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned for a TYPE reply outside the known families
/// (e.g. `stream`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key type `{0}`")]
pub struct UnknownKeyType(pub String);

impl FromStr for KeyType {
    type Err = UnknownKeyType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(KeyType::None),
            "string" => Ok(KeyType::String),
            "list" => Ok(KeyType::List),
            "set" => Ok(KeyType::Set),
            "zset" => Ok(KeyType::SortedSet),
            "hash" => Ok(KeyType::Hash),
            other => Err(UnknownKeyType(other.to_string())),
        }
    }
}
