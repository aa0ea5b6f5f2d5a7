//! Key operations: existence, type, deletion, pass-through expiry.

use super::{decode, owned, require_non_empty, Client};
use crate::error::{Error, Result};
use crate::key_type::KeyType;
use crate::reply;
use crate::store::Command;
use std::time::Duration;

/// Remaining lifetime of an existing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    Persistent,
    Expires(Duration),
}

impl Client {
    pub async fn exists(&self, key: &str) -> Result<bool> {
        let cmd = Command::Exists(vec![key.to_string()]);
        let value = self.guarded_value(&cmd, KeyType::None).await?;
        Ok(decode(&cmd, reply::count(value))? > 0)
    }

    /// True iff the key was actually removed. Deleting a missing key is not
    /// an error.
    pub async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.delete_many(&[key]).await? > 0)
    }

    /// Number of keys actually removed.
    pub async fn delete_many(&self, keys: &[&str]) -> Result<u64> {
        require_non_empty(keys, "keys")?;
        let cmd = Command::Del(owned(keys));
        let value = self.guarded_value(&cmd, KeyType::None).await?;
        decode(&cmd, reply::count(value))
    }

    /// Set a time-to-live, in whole seconds. True iff the key exists.
    pub async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let seconds = whole_seconds(ttl)?;
        let cmd = Command::Expire(key.to_string(), seconds);
        let value = self.guarded_value(&cmd, KeyType::None).await?;
        decode(&cmd, reply::flag(value))
    }

    /// `None` when the key does not exist.
    pub async fn ttl(&self, key: &str) -> Result<Option<Ttl>> {
        let cmd = Command::Pttl(key.to_string());
        let value = self.guarded_value(&cmd, KeyType::None).await?;
        match decode(&cmd, reply::integer(value))? {
            -2 => Ok(None),
            -1 => Ok(Some(Ttl::Persistent)),
            ms if ms >= 0 => Ok(Some(Ttl::Expires(Duration::from_millis(ms as u64)))),
            other => Err(Error::UnexpectedReply {
                command: cmd.name(),
                reply: other.to_string(),
            }),
        }
    }

    /// True iff an expiry was removed.
    pub async fn persist(&self, key: &str) -> Result<bool> {
        let cmd = Command::Persist(key.to_string());
        let value = self.guarded_value(&cmd, KeyType::None).await?;
        decode(&cmd, reply::flag(value))
    }
}

/// Expiry arguments travel as whole seconds and must be at least one.
pub(crate) fn whole_seconds(ttl: Duration) -> Result<u64> {
    match ttl.as_secs() {
        0 => Err(Error::InvalidArgument(format!(
            "ttl must be at least one second, got {:?}",
            ttl
        ))),
        seconds => Ok(seconds),
    }
}
