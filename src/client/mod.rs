//! Typed client over a `Store`.
//!
//! `Client` is the one handle callers hold. Each data-type family adds its
//! operations in its own file:
//!
//! - `mod.rs` (this file): round trips, the type oracle, failure diagnosis
//! - `key_ops.rs`: exists, type_of, delete, expire, ttl, persist
//! - `string_ops.rs`: get/set family, counters, append, multi-key get/set
//! - `hash_ops.rs`: field-level reads and writes
//! - `list_ops.rs`: push/pop (blocking too), range, trim, insert, move
//! - `set_ops.rs`: membership, sampling, set algebra
//!
//! # Failure diagnosis
//!
//! The store answers a type clash with `WRONGTYPE` and most other refusals
//! with a generic error line. Neither says which key clashed or whether it
//! existed, so after a refusal the client asks the type oracle once per key:
//!
//! | oracle says           | error           |
//! |-----------------------|-----------------|
//! | a different type      | `WrongType`     |
//! | `none`                | `NoSuchKey`     |
//! | the expected type     | `OperationFailed` |
//!
//! A `WRONGTYPE` refusal is always `WrongType`. The oracle only names the
//! key; if the key changed before the oracle looked, the primary key is
//! reported with whatever type the oracle saw.
//!
//! The oracle is consulted only after the store refused, so no write is
//! ever gated on a client-side check.

mod hash_ops;
mod key_ops;
mod list_ops;
mod set_ops;
mod string_ops;

#[cfg(test)]
mod tests;

pub use hash_ops::FieldWrite;
pub use key_ops::Ttl;
pub use list_ops::InsertOutcome;

use crate::error::{Error, Result};
use crate::key_type::KeyType;
use crate::reply::{self, Decoded, Reply};
use crate::store::{Command, MemoryStore, RespValue, Store};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct Client {
    store: Arc<dyn Store>,
}

impl Client {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Client { store }
    }

    /// Client over a fresh in-process store.
    pub fn in_memory() -> Self {
        Client::new(Arc::new(MemoryStore::new()))
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Type oracle: one TYPE round trip, never cached.
    pub async fn type_of(&self, key: &str) -> Result<KeyType> {
        let cmd = Command::TypeOf(key.to_string());
        match self.call(&cmd).await? {
            Reply::Value(value) => {
                let name = decode(&cmd, reply::string(value))?;
                name.parse().map_err(|_| Error::UnexpectedReply {
                    command: cmd.name(),
                    reply: name,
                })
            }
            Reply::Absent => Err(unexpected(&cmd, RespValue::nil())),
            Reply::TypeMismatch | Reply::OperationFailed(_) => Err(Error::OperationFailed {
                command: cmd.name(),
                message: "TYPE refused".to_string(),
            }),
        }
    }

    /// One round trip, classified. Transport failures surface unchanged.
    pub(crate) async fn call(&self, cmd: &Command) -> Result<Reply<RespValue>> {
        debug!(command = cmd.name(), key = ?cmd.primary_key(), "store round trip");
        match self.store.execute(cmd).await {
            Ok(raw) => Ok(Reply::classify(raw)),
            Err(e) => {
                warn!(command = cmd.name(), error = %e, "store transport failure");
                Err(e.into())
            }
        }
    }

    /// Round trip whose refusals are diagnosed against `expected`.
    /// `Ok(None)` is absence.
    pub(crate) async fn guarded(
        &self,
        cmd: &Command,
        expected: KeyType,
    ) -> Result<Option<RespValue>> {
        match self.call(cmd).await? {
            Reply::Value(value) => Ok(Some(value)),
            Reply::Absent => Ok(None),
            Reply::TypeMismatch => Err(self.diagnose_mismatch(cmd, expected).await),
            Reply::OperationFailed(message) => Err(self.diagnose(cmd, expected, message).await),
        }
    }

    /// Like `guarded`, for commands that never answer nil.
    pub(crate) async fn guarded_value(&self, cmd: &Command, expected: KeyType) -> Result<RespValue> {
        match self.guarded(cmd, expected).await? {
            Some(value) => Ok(value),
            None => Err(unexpected(cmd, RespValue::nil())),
        }
    }

    /// Size query that reads a type clash as zero, in one round trip.
    pub(crate) async fn shape_count(&self, cmd: &Command) -> Result<u64> {
        match self.call(cmd).await? {
            Reply::Value(raw) => decode(cmd, reply::count(raw)),
            Reply::TypeMismatch => Ok(0),
            Reply::Absent => Err(unexpected(cmd, RespValue::nil())),
            Reply::OperationFailed(message) => Err(Error::OperationFailed {
                command: cmd.name(),
                message,
            }),
        }
    }

    /// Name the key behind a `WRONGTYPE` refusal.
    async fn diagnose_mismatch(&self, cmd: &Command, expected: KeyType) -> Error {
        let keys = cmd.keys();
        let mut first_found = None;

        for key in &keys {
            let found = match self.type_of(key).await {
                Ok(found) => found,
                Err(e) => {
                    warn!(command = cmd.name(), key, error = %e, "type lookup after WRONGTYPE failed");
                    break;
                }
            };
            if found.exists() && found != expected {
                debug!(command = cmd.name(), key, %found, %expected, "diagnosed type clash");
                return Error::WrongType {
                    key: key.to_string(),
                    expected,
                    found,
                };
            }
            if first_found.is_none() {
                first_found = Some(found);
            }
        }

        // The key changed between the refusal and the lookup
        let key = keys.first().copied().unwrap_or_default();
        debug!(command = cmd.name(), key, ?first_found, "type clash no longer visible");
        Error::WrongType {
            key: key.to_string(),
            expected,
            found: first_found.unwrap_or(KeyType::None),
        }
    }

    /// Turn a generic refusal into the error the caller can act on.
    async fn diagnose(&self, cmd: &Command, expected: KeyType, message: String) -> Error {
        let keys = cmd.keys();
        let mut first_found = None;

        for key in &keys {
            let found = match self.type_of(key).await {
                Ok(found) => found,
                Err(e) => return e,
            };
            if found.exists() && found != expected {
                debug!(command = cmd.name(), key, %found, %expected, "diagnosed type clash");
                return Error::WrongType {
                    key: key.to_string(),
                    expected,
                    found,
                };
            }
            if first_found.is_none() {
                first_found = Some(found);
            }
        }

        match (keys.first(), first_found) {
            (Some(key), Some(KeyType::None)) => Error::NoSuchKey {
                key: key.to_string(),
            },
            _ => Error::OperationFailed {
                command: cmd.name(),
                message,
            },
        }
    }
}

pub(crate) fn decode<T>(cmd: &Command, decoded: Decoded<T>) -> Result<T> {
    decoded.map_err(|reply| unexpected(cmd, reply))
}

pub(crate) fn unexpected(cmd: &Command, reply: RespValue) -> Error {
    Error::UnexpectedReply {
        command: cmd.name(),
        reply: reply.to_string(),
    }
}

pub(crate) fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn owned_pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Variadic commands need at least one argument.
pub(crate) fn require_non_empty<T>(items: &[T], what: &str) -> Result<()> {
    if items.is_empty() {
        Err(Error::InvalidArgument(format!("{} must not be empty", what)))
    } else {
        Ok(())
    }
}
