//! In-process command executor.
//!
//! `CommandExecutor` is the single-threaded state machine behind
//! `MemoryStore`. The implementation is split across files per family:
//!
//! - `mod.rs` (this file): core struct, clock, and execute dispatch
//! - `key_ops.rs`: EXISTS, TYPE, DEL, EXPIRE, PTTL, PERSIST
//! - `string_ops.rs`: GET, SET, SETEX, SETNX, MSET, MSETNX, APPEND, GETSET, ...
//! - `hash_ops.rs`: HSET, HSETNX, HGET, HMGET, HGETALL, HDEL, ...
//! - `list_ops.rs`: LPUSH, RPUSH, LPOP, RPOP, LRANGE, LREM, LINSERT, ...
//! - `set_ops.rs`: SADD, SREM, SMEMBERS, SMOVE, SPOP, SINTER, ...
//!
//! Blocking commands are executed here as a single non-blocking attempt;
//! waiting for data is the caller's job (see `MemoryStore`).

mod hash_ops;
mod key_ops;
mod list_ops;
mod set_ops;
mod string_ops;

use super::data::Value;
use crate::store::{Command, RespValue};
use ahash::AHashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::time::Instant;

pub struct CommandExecutor {
    pub(crate) data: AHashMap<String, Value>,
    pub(crate) expirations: AHashMap<String, Instant>,
    pub(crate) current_time: Instant,
    /// Drives SPOP / SRANDMEMBER; seeded so runs are reproducible
    pub(crate) rng: ChaCha8Rng,
    pub(crate) commands_processed: usize,
}

impl CommandExecutor {
    pub fn new(seed: u64) -> Self {
        CommandExecutor {
            data: AHashMap::new(),
            expirations: AHashMap::new(),
            current_time: Instant::now(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            commands_processed: 0,
        }
    }

    /// Advance the clock and drop every key whose expiry has passed.
    pub fn set_time(&mut self, time: Instant) {
        self.current_time = time;
        self.evict_expired_keys();
    }

    pub fn commands_processed(&self) -> usize {
        self.commands_processed
    }

    pub fn key_count(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn evict_expired_keys(&mut self) {
        let now = self.current_time;
        let expired: Vec<String> = self
            .expirations
            .iter()
            .filter(|(_, &at)| at <= now)
            .map(|(k, _)| k.clone())
            .collect();

        for key in expired {
            self.data.remove(&key);
            self.expirations.remove(&key);
        }
    }

    pub(crate) fn get_value(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub(crate) fn get_value_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.data.get_mut(key)
    }

    /// Insert or replace a key's value. Any previous expiry is cleared.
    pub(crate) fn put_value(&mut self, key: &str, value: Value) {
        self.data.insert(key.to_string(), value);
        self.expirations.remove(key);
    }

    pub(crate) fn remove_key(&mut self, key: &str) -> bool {
        self.expirations.remove(key);
        self.data.remove(key).is_some()
    }

    /// Drop the key if it holds an aggregate that has become empty.
    pub(crate) fn drop_if_empty(&mut self, key: &str) {
        if self.data.get(key).is_some_and(Value::is_empty_aggregate) {
            self.remove_key(key);
        }
    }

    /// Main command execution entry point
    pub fn execute(&mut self, cmd: &Command) -> RespValue {
        self.commands_processed += 1;

        match cmd {
            // Key commands
            Command::Exists(keys) => self.execute_exists(keys),
            Command::TypeOf(key) => self.execute_typeof(key),
            Command::Del(keys) => self.execute_del(keys),
            Command::Expire(key, seconds) => self.execute_expire(key, *seconds),
            Command::Pttl(key) => self.execute_pttl(key),
            Command::Persist(key) => self.execute_persist(key),

            // String commands
            Command::Get(key) => self.execute_get(key),
            Command::Set(key, value) => self.execute_set(key, value),
            Command::SetEx(key, seconds, value) => self.execute_setex(key, *seconds, value),
            Command::SetNx(key, value) => self.execute_setnx(key, value),
            Command::MSet(pairs) => self.execute_mset(pairs),
            Command::MSetNx(pairs) => self.execute_msetnx(pairs),
            Command::Append(key, value) => self.execute_append(key, value),
            Command::GetSet(key, value) => self.execute_getset(key, value),
            Command::StrLen(key) => self.execute_strlen(key),
            Command::MGet(keys) => self.execute_mget(keys),
            Command::IncrBy(key, increment) => self.incr_by_impl(key, *increment),
            Command::DecrBy(key, decrement) => match decrement.checked_neg() {
                Some(neg) => self.incr_by_impl(key, neg),
                None => RespValue::err("ERR decrement would overflow"),
            },

            // Hash commands
            Command::HSet(key, pairs) => self.execute_hset(key, pairs),
            Command::HSetNx(key, field, value) => self.execute_hsetnx(key, field, value),
            Command::HGet(key, field) => self.execute_hget(key, field),
            Command::HMGet(key, fields) => self.execute_hmget(key, fields),
            Command::HGetAll(key) => self.execute_hgetall(key),
            Command::HDel(key, fields) => self.execute_hdel(key, fields),
            Command::HLen(key) => self.execute_hlen(key),
            Command::HExists(key, field) => self.execute_hexists(key, field),
            Command::HIncrBy(key, field, increment) => {
                self.execute_hincrby(key, field, *increment)
            }
            Command::HKeys(key) => self.execute_hkeys(key),
            Command::HVals(key) => self.execute_hvals(key),

            // List commands
            Command::LPush(key, values) => self.execute_push(key, values, true, false),
            Command::LPushX(key, values) => self.execute_push(key, values, true, true),
            Command::RPush(key, values) => self.execute_push(key, values, false, false),
            Command::RPushX(key, values) => self.execute_push(key, values, false, true),
            Command::LPop(key) => self.execute_pop(key, true),
            Command::RPop(key) => self.execute_pop(key, false),
            Command::BLPop(keys, _) => self.execute_pop_first(keys, true),
            Command::BRPop(keys, _) => self.execute_pop_first(keys, false),
            Command::LLen(key) => self.execute_llen(key),
            Command::LRange(key, start, stop) => self.execute_lrange(key, *start, *stop),
            Command::LRem(key, count, value) => self.execute_lrem(key, *count, value),
            Command::LSet(key, index, value) => self.execute_lset(key, *index, value),
            Command::LTrim(key, start, stop) => self.execute_ltrim(key, *start, *stop),
            Command::LIndex(key, index) => self.execute_lindex(key, *index),
            Command::LInsert {
                key,
                position,
                pivot,
                value,
            } => self.execute_linsert(key, *position, pivot, value),
            Command::RPopLPush(source, dest) | Command::BRPopLPush(source, dest, _) => {
                self.execute_rpoplpush(source, dest)
            }

            // Set commands
            Command::SAdd(key, members) => self.execute_sadd(key, members),
            Command::SRem(key, members) => self.execute_srem(key, members),
            Command::SMembers(key) => self.execute_smembers(key),
            Command::SIsMember(key, member) => self.execute_sismember(key, member),
            Command::SCard(key) => self.execute_scard(key),
            Command::SMove(source, dest, member) => self.execute_smove(source, dest, member),
            Command::SPop(key) => self.execute_spop(key),
            Command::SRandMember(key, count) => self.execute_srandmember(key, *count),
            Command::SInter(keys) => self.execute_set_algebra(keys, SetAlgebra::Inter, None),
            Command::SInterStore(dest, keys) => {
                self.execute_set_algebra(keys, SetAlgebra::Inter, Some(dest))
            }
            Command::SUnion(keys) => self.execute_set_algebra(keys, SetAlgebra::Union, None),
            Command::SUnionStore(dest, keys) => {
                self.execute_set_algebra(keys, SetAlgebra::Union, Some(dest))
            }
            Command::SDiff(keys) => self.execute_set_algebra(keys, SetAlgebra::Diff, None),
            Command::SDiffStore(dest, keys) => {
                self.execute_set_algebra(keys, SetAlgebra::Diff, Some(dest))
            }
        }
    }
}

/// Which set-algebra operation SINTER/SUNION/SDIFF (and their STORE forms) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SetAlgebra {
    Inter,
    Union,
    Diff,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_expired_keys_are_evicted_on_clock_advance() {
        let mut executor = CommandExecutor::new(0);
        let start = executor.current_time;
        executor.execute(&Command::SetEx("k".to_string(), 2, "v".to_string()));
        assert_eq!(executor.key_count(), 1);

        executor.set_time(start + Duration::from_millis(1999));
        assert_eq!(executor.execute(&Command::Get("k".to_string())), RespValue::bulk("v"));

        executor.set_time(start + Duration::from_secs(2));
        assert_eq!(executor.execute(&Command::Get("k".to_string())), RespValue::nil());
        assert_eq!(executor.key_count(), 0);
    }

    #[test]
    fn test_commands_processed_counts_every_call() {
        let mut executor = CommandExecutor::new(0);
        executor.execute(&Command::Get("a".to_string()));
        executor.execute(&Command::Exists(vec!["a".to_string()]));
        assert_eq!(executor.commands_processed(), 2);
    }
}
