//! Hash operations.
//!
//! Writes are accepted when the key is absent or already a hash; any other
//! type is reported as `Error::WrongType` by the store-side refusal.

use super::{decode, owned, owned_pairs, require_non_empty, Client};
use crate::error::Result;
use crate::key_type::KeyType;
use crate::reply;
use crate::store::Command;
use std::collections::HashMap;

/// What `hash_set` did to the field. Both outcomes are success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWrite {
    Created,
    Overwritten,
}

impl Client {
    pub async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<FieldWrite> {
        let cmd = Command::HSet(key.to_string(), vec![(field.to_string(), value.to_string())]);
        let raw = self.guarded_value(&cmd, KeyType::Hash).await?;
        Ok(match decode(&cmd, reply::flag(raw))? {
            true => FieldWrite::Created,
            false => FieldWrite::Overwritten,
        })
    }

    /// True iff the field did not exist and has been created.
    pub async fn hash_set_if_absent(&self, key: &str, field: &str, value: &str) -> Result<bool> {
        let cmd = Command::HSetNx(key.to_string(), field.to_string(), value.to_string());
        let raw = self.guarded_value(&cmd, KeyType::Hash).await?;
        decode(&cmd, reply::flag(raw))
    }

    /// Write several fields at once. Fields not mentioned are untouched.
    pub async fn hash_multi_set(&self, key: &str, fields: &[(&str, &str)]) -> Result<()> {
        require_non_empty(fields, "fields")?;
        let cmd = Command::HSet(key.to_string(), owned_pairs(fields));
        let raw = self.guarded_value(&cmd, KeyType::Hash).await?;
        decode(&cmd, reply::count(raw)).map(|_| ())
    }

    pub async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>> {
        let cmd = Command::HGet(key.to_string(), field.to_string());
        match self.guarded(&cmd, KeyType::Hash).await? {
            Some(raw) => decode(&cmd, reply::string(raw)).map(Some),
            None => Ok(None),
        }
    }

    /// One slot per field, in order; a missing key yields all `None`.
    pub async fn hash_multi_get(&self, key: &str, fields: &[&str]) -> Result<Vec<Option<String>>> {
        if fields.is_empty() {
            return Ok(Vec::new());
        }
        let cmd = Command::HMGet(key.to_string(), owned(fields));
        let raw = self.guarded_value(&cmd, KeyType::Hash).await?;
        decode(&cmd, reply::optional_strings(raw))
    }

    /// Empty map when the key is absent.
    pub async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>> {
        let cmd = Command::HGetAll(key.to_string());
        let raw = self.guarded_value(&cmd, KeyType::Hash).await?;
        decode(&cmd, reply::field_map(raw))
    }

    /// Number of fields actually removed.
    pub async fn hash_delete(&self, key: &str, fields: &[&str]) -> Result<u64> {
        require_non_empty(fields, "fields")?;
        let cmd = Command::HDel(key.to_string(), owned(fields));
        let raw = self.guarded_value(&cmd, KeyType::Hash).await?;
        decode(&cmd, reply::count(raw))
    }

    pub async fn hash_len(&self, key: &str) -> Result<u64> {
        let cmd = Command::HLen(key.to_string());
        let raw = self.guarded_value(&cmd, KeyType::Hash).await?;
        decode(&cmd, reply::count(raw))
    }

    pub async fn hash_field_exists(&self, key: &str, field: &str) -> Result<bool> {
        let cmd = Command::HExists(key.to_string(), field.to_string());
        let raw = self.guarded_value(&cmd, KeyType::Hash).await?;
        decode(&cmd, reply::flag(raw))
    }

    /// `delta` may be negative. Fails if the field is not an integer.
    pub async fn hash_increment_by(&self, key: &str, field: &str, delta: i64) -> Result<i64> {
        let cmd = Command::HIncrBy(key.to_string(), field.to_string(), delta);
        let raw = self.guarded_value(&cmd, KeyType::Hash).await?;
        decode(&cmd, reply::integer(raw))
    }

    pub async fn hash_keys(&self, key: &str) -> Result<Vec<String>> {
        let cmd = Command::HKeys(key.to_string());
        let raw = self.guarded_value(&cmd, KeyType::Hash).await?;
        decode(&cmd, reply::strings(raw))
    }

    pub async fn hash_values(&self, key: &str) -> Result<Vec<String>> {
        let cmd = Command::HVals(key.to_string());
        let raw = self.guarded_value(&cmd, KeyType::Hash).await?;
        decode(&cmd, reply::strings(raw))
    }
}
