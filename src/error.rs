//! Error types for the typed access layer.
//!
//! Absence is not an error: operations report a missing key or field as
//! `Ok(None)` or as an empty collection. Everything in `Error` is an outcome
//! the caller did not ask for.

use crate::key_type::KeyType;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The key exists but holds another kind of value.
    #[error("key `{key}` holds a {found} value, expected {expected}")]
    WrongType {
        key: String,
        expected: KeyType,
        found: KeyType,
    },

    /// The operation needs an existing key and there was none.
    #[error("no such key `{key}`")]
    NoSuchKey { key: String },

    /// The store rejected a correctly typed operation.
    #[error("{command} failed: {message}")]
    OperationFailed {
        command: &'static str,
        message: String,
    },

    /// Rejected before reaching the store.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The reply does not have the shape the command promises.
    #[error("unexpected reply to {command}: {reply}")]
    UnexpectedReply {
        command: &'static str,
        reply: String,
    },

    #[error(transparent)]
    Transport(#[from] StoreError),
}

impl Error {
    pub fn is_wrong_type(&self) -> bool {
        matches!(self, Error::WrongType { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
