//! String operations.

use super::key_ops::whole_seconds;
use super::{decode, owned, owned_pairs, require_non_empty, Client};
use crate::error::{Error, Result};
use crate::key_type::KeyType;
use crate::reply;
use crate::store::Command;
use std::time::Duration;

impl Client {
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let cmd = Command::Get(key.to_string());
        match self.guarded(&cmd, KeyType::String).await? {
            Some(value) => decode(&cmd, reply::string(value)).map(Some),
            None => Ok(None),
        }
    }

    /// Unconditional overwrite. Clears any previous expiry.
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let cmd = Command::Set(key.to_string(), value.to_string());
        let raw = self.guarded_value(&cmd, KeyType::String).await?;
        decode(&cmd, reply::ok_status(raw))
    }

    /// Set with a time-to-live in whole seconds (at least one).
    pub async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let seconds = whole_seconds(ttl)?;
        let cmd = Command::SetEx(key.to_string(), seconds, value.to_string());
        let raw = self.guarded_value(&cmd, KeyType::String).await?;
        decode(&cmd, reply::ok_status(raw))
    }

    /// True iff the key was absent and has been created.
    pub async fn set_if_absent(&self, key: &str, value: &str) -> Result<bool> {
        let cmd = Command::SetNx(key.to_string(), value.to_string());
        let raw = self.guarded_value(&cmd, KeyType::String).await?;
        decode(&cmd, reply::flag(raw))
    }

    pub async fn multi_set(&self, pairs: &[(&str, &str)]) -> Result<()> {
        require_non_empty(pairs, "pairs")?;
        let cmd = Command::MSet(owned_pairs(pairs));
        let raw = self.guarded_value(&cmd, KeyType::String).await?;
        decode(&cmd, reply::ok_status(raw))
    }

    /// Atomic: either every key was absent and all are written, or nothing
    /// is written and the result is false.
    pub async fn multi_set_if_all_absent(&self, pairs: &[(&str, &str)]) -> Result<bool> {
        require_non_empty(pairs, "pairs")?;
        let cmd = Command::MSetNx(owned_pairs(pairs));
        let raw = self.guarded_value(&cmd, KeyType::String).await?;
        decode(&cmd, reply::flag(raw))
    }

    /// One slot per key, in order. Missing and non-string keys are `None`.
    pub async fn multi_get(&self, keys: &[&str]) -> Result<Vec<Option<String>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let cmd = Command::MGet(owned(keys));
        let raw = self.guarded_value(&cmd, KeyType::String).await?;
        let values = decode(&cmd, reply::optional_strings(raw))?;

        debug_assert_eq!(
            values.len(),
            keys.len(),
            "Postcondition violated: multi_get must return one slot per key"
        );

        Ok(values)
    }

    /// Resulting length. A missing key starts as the empty string.
    pub async fn append(&self, key: &str, fragment: &str) -> Result<u64> {
        let cmd = Command::Append(key.to_string(), fragment.to_string());
        let raw = self.guarded_value(&cmd, KeyType::String).await?;
        decode(&cmd, reply::count(raw))
    }

    /// Store `value` and return what was there before.
    ///
    /// `None` means the key did not exist; `Some("")` means it held the empty
    /// string.
    pub async fn get_and_replace(&self, key: &str, value: &str) -> Result<Option<String>> {
        let cmd = Command::GetSet(key.to_string(), value.to_string());
        match self.guarded(&cmd, KeyType::String).await? {
            Some(old) => decode(&cmd, reply::string(old)).map(Some),
            None => Ok(None),
        }
    }

    /// Length of the string; 0 if the key is absent.
    pub async fn str_len(&self, key: &str) -> Result<u64> {
        let cmd = Command::StrLen(key.to_string());
        let raw = self.guarded_value(&cmd, KeyType::String).await?;
        decode(&cmd, reply::count(raw))
    }

    pub async fn increment(&self, key: &str) -> Result<i64> {
        self.increment_by(key, 1).await
    }

    /// Add `by` to the integer stored at `key` (0 if absent).
    pub async fn increment_by(&self, key: &str, by: i64) -> Result<i64> {
        let cmd = Command::IncrBy(key.to_string(), by);
        let raw = self.guarded_value(&cmd, KeyType::String).await?;
        decode(&cmd, reply::integer(raw))
    }

    pub async fn decrement(&self, key: &str) -> Result<i64> {
        self.decrement_by(key, 1).await
    }

    pub async fn decrement_by(&self, key: &str, by: i64) -> Result<i64> {
        if by == i64::MIN {
            return Err(Error::InvalidArgument(
                "decrement would overflow".to_string(),
            ));
        }
        let cmd = Command::DecrBy(key.to_string(), by);
        let raw = self.guarded_value(&cmd, KeyType::String).await?;
        decode(&cmd, reply::integer(raw))
    }
}
