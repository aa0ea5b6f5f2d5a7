//! List operations.
//!
//! Blocking pops take a `Duration`; `Duration::ZERO` waits until data
//! arrives or the returned future is dropped. Dropping the future is how a
//! caller cancels: the store-side wait goes away with it.

use super::{decode, owned, require_non_empty, unexpected, Client};
use crate::error::Result;
use crate::key_type::KeyType;
use crate::reply;
use crate::store::{Command, InsertPosition, RespValue};
use std::time::Duration;

/// Outcome of `list_insert_before` / `list_insert_after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Inserted; carries the new list length.
    Inserted(u64),
    PivotNotFound,
    NoSuchKey,
}

impl Client {
    /// Push each value at the head in turn, so the last value ends up first.
    /// Returns the new length.
    pub async fn list_push_left(&self, key: &str, values: &[&str]) -> Result<u64> {
        require_non_empty(values, "values")?;
        self.push(Command::LPush(key.to_string(), owned(values))).await
    }

    /// Push at the head only if the list exists; 0 when it does not.
    pub async fn list_push_left_if_exists(&self, key: &str, value: &str) -> Result<u64> {
        self.push(Command::LPushX(key.to_string(), vec![value.to_string()]))
            .await
    }

    /// Append at the tail, preserving argument order.
    pub async fn list_push_right(&self, key: &str, values: &[&str]) -> Result<u64> {
        require_non_empty(values, "values")?;
        self.push(Command::RPush(key.to_string(), owned(values))).await
    }

    pub async fn list_push_right_if_exists(&self, key: &str, value: &str) -> Result<u64> {
        self.push(Command::RPushX(key.to_string(), vec![value.to_string()]))
            .await
    }

    async fn push(&self, cmd: Command) -> Result<u64> {
        let raw = self.guarded_value(&cmd, KeyType::List).await?;
        decode(&cmd, reply::count(raw))
    }

    pub async fn list_pop_left(&self, key: &str) -> Result<Option<String>> {
        self.optional_element(Command::LPop(key.to_string())).await
    }

    pub async fn list_pop_right(&self, key: &str) -> Result<Option<String>> {
        self.optional_element(Command::RPop(key.to_string())).await
    }

    /// Pop the head of the first non-empty list among `keys`, checked in
    /// order, waiting up to `timeout`. Returns `(key, value)`, or `None` on
    /// timeout.
    pub async fn list_blocking_pop_left(
        &self,
        keys: &[&str],
        timeout: Duration,
    ) -> Result<Option<(String, String)>> {
        require_non_empty(keys, "keys")?;
        self.blocking_pop(Command::BLPop(owned(keys), timeout)).await
    }

    pub async fn list_blocking_pop_right(
        &self,
        keys: &[&str],
        timeout: Duration,
    ) -> Result<Option<(String, String)>> {
        require_non_empty(keys, "keys")?;
        self.blocking_pop(Command::BRPop(owned(keys), timeout)).await
    }

    async fn blocking_pop(&self, cmd: Command) -> Result<Option<(String, String)>> {
        match self.guarded(&cmd, KeyType::List).await? {
            Some(raw) => decode(&cmd, reply::key_value(raw)).map(Some),
            None => Ok(None),
        }
    }

    /// Length of the list; 0 when the key is absent or is not a list.
    pub async fn list_len(&self, key: &str) -> Result<u64> {
        self.shape_count(&Command::LLen(key.to_string())).await
    }

    /// Inclusive range; negative indices count from the tail (-1 is last).
    pub async fn list_range(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>> {
        let cmd = Command::LRange(key.to_string(), start, stop);
        let raw = self.guarded_value(&cmd, KeyType::List).await?;
        decode(&cmd, reply::strings(raw))
    }

    /// Remove up to `|count|` occurrences of `value`: head to tail for
    /// `count > 0`, tail to head for `count < 0`, all of them for `0`.
    pub async fn list_remove(&self, key: &str, count: i64, value: &str) -> Result<u64> {
        let cmd = Command::LRem(key.to_string(), count, value.to_string());
        let raw = self.guarded_value(&cmd, KeyType::List).await?;
        decode(&cmd, reply::count(raw))
    }

    /// Overwrite the element at `index`. A missing key is `NoSuchKey`; an
    /// index out of range is `OperationFailed`.
    pub async fn list_set(&self, key: &str, index: i64, value: &str) -> Result<()> {
        let cmd = Command::LSet(key.to_string(), index, value.to_string());
        let raw = self.guarded_value(&cmd, KeyType::List).await?;
        decode(&cmd, reply::ok_status(raw))
    }

    /// Keep only the inclusive range; everything else is discarded.
    pub async fn list_trim(&self, key: &str, start: i64, stop: i64) -> Result<()> {
        let cmd = Command::LTrim(key.to_string(), start, stop);
        let raw = self.guarded_value(&cmd, KeyType::List).await?;
        decode(&cmd, reply::ok_status(raw))
    }

    pub async fn list_index(&self, key: &str, index: i64) -> Result<Option<String>> {
        self.optional_element(Command::LIndex(key.to_string(), index))
            .await
    }

    pub async fn list_insert_before(&self, key: &str, pivot: &str, value: &str) -> Result<InsertOutcome> {
        self.insert(key, InsertPosition::Before, pivot, value).await
    }

    pub async fn list_insert_after(&self, key: &str, pivot: &str, value: &str) -> Result<InsertOutcome> {
        self.insert(key, InsertPosition::After, pivot, value).await
    }

    async fn insert(
        &self,
        key: &str,
        position: InsertPosition,
        pivot: &str,
        value: &str,
    ) -> Result<InsertOutcome> {
        let cmd = Command::LInsert {
            key: key.to_string(),
            position,
            pivot: pivot.to_string(),
            value: value.to_string(),
        };
        let raw = self.guarded_value(&cmd, KeyType::List).await?;
        match decode(&cmd, reply::integer(raw))? {
            -1 => Ok(InsertOutcome::PivotNotFound),
            0 => Ok(InsertOutcome::NoSuchKey),
            len if len > 0 => Ok(InsertOutcome::Inserted(len as u64)),
            other => Err(unexpected(&cmd, RespValue::Integer(other))),
        }
    }

    /// Atomically pop the tail of `source` and push it at the head of
    /// `dest`. With `source == dest` this rotates the list.
    pub async fn list_move_tail_to_head(&self, source: &str, dest: &str) -> Result<Option<String>> {
        self.optional_element(Command::RPopLPush(source.to_string(), dest.to_string()))
            .await
    }

    /// Blocking form of `list_move_tail_to_head`; `None` on timeout.
    pub async fn list_blocking_move_tail_to_head(
        &self,
        source: &str,
        dest: &str,
        timeout: Duration,
    ) -> Result<Option<String>> {
        self.optional_element(Command::BRPopLPush(
            source.to_string(),
            dest.to_string(),
            timeout,
        ))
        .await
    }

    async fn optional_element(&self, cmd: Command) -> Result<Option<String>> {
        match self.guarded(&cmd, KeyType::List).await? {
            Some(raw) => decode(&cmd, reply::string(raw)).map(Some),
            None => Ok(None),
        }
    }
}
