//! Store command enum and utility methods.
//!
//! `Command` is the closed set of primitive commands the typed layer sends to
//! a `Store`. Each variant maps one-to-one onto a Redis command, so a network
//! store can forward `name()` + `args()` unchanged while the in-process store
//! executes the variant directly.
//!
//! # Categories
//!
//! - **Key commands**: EXISTS, TYPE, DEL, EXPIRE, PTTL, PERSIST
//! - **String commands**: GET, SET, SETEX, SETNX, MSET, MSETNX, APPEND, GETSET,
//!   STRLEN, MGET, INCRBY, DECRBY
//! - **Hash commands**: HSET, HSETNX, HGET, HMGET, HGETALL, HDEL, HLEN, HEXISTS,
//!   HINCRBY, HKEYS, HVALS
//! - **List commands**: LPUSH, LPUSHX, RPUSH, RPUSHX, LPOP, RPOP, BLPOP, BRPOP,
//!   LLEN, LRANGE, LREM, LSET, LTRIM, LINDEX, LINSERT, RPOPLPUSH, BRPOPLPUSH
//! - **Set commands**: SADD, SREM, SMEMBERS, SISMEMBER, SCARD, SMOVE, SPOP,
//!   SRANDMEMBER, SINTER, SINTERSTORE, SUNION, SUNIONSTORE, SDIFF, SDIFFSTORE

use std::time::Duration;

/// Where LINSERT places the new element relative to the pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Before,
    After,
}

impl InsertPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsertPosition::Before => "BEFORE",
            InsertPosition::After => "AFTER",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // Key commands
    Exists(Vec<String>),
    TypeOf(String),
    Del(Vec<String>),
    Expire(String, u64),
    Pttl(String),
    Persist(String),
    // String commands
    Get(String),
    Set(String, String),
    SetEx(String, u64, String),
    SetNx(String, String),
    MSet(Vec<(String, String)>),
    MSetNx(Vec<(String, String)>),
    Append(String, String),
    GetSet(String, String),
    StrLen(String),
    MGet(Vec<String>),
    IncrBy(String, i64),
    DecrBy(String, i64),
    // Hash commands
    HSet(String, Vec<(String, String)>),
    HSetNx(String, String, String),
    HGet(String, String),
    HMGet(String, Vec<String>),
    HGetAll(String),
    HDel(String, Vec<String>),
    HLen(String),
    HExists(String, String),
    HIncrBy(String, String, i64),
    HKeys(String),
    HVals(String),
    // List commands
    LPush(String, Vec<String>),
    LPushX(String, Vec<String>),
    RPush(String, Vec<String>),
    RPushX(String, Vec<String>),
    LPop(String),
    RPop(String),
    /// BLPOP key [key ...] timeout; a zero timeout blocks indefinitely
    BLPop(Vec<String>, Duration),
    BRPop(Vec<String>, Duration),
    LLen(String),
    LRange(String, i64, i64),
    LRem(String, i64, String),
    LSet(String, i64, String),
    LTrim(String, i64, i64),
    LIndex(String, i64),
    LInsert {
        key: String,
        position: InsertPosition,
        pivot: String,
        value: String,
    },
    RPopLPush(String, String), // source, dest
    BRPopLPush(String, String, Duration),
    // Set commands
    SAdd(String, Vec<String>),
    SRem(String, Vec<String>),
    SMembers(String),
    SIsMember(String, String),
    SCard(String),
    SMove(String, String, String), // source, dest, member
    SPop(String),
    SRandMember(String, i64),
    SInter(Vec<String>),
    SInterStore(String, Vec<String>),
    SUnion(Vec<String>),
    SUnionStore(String, Vec<String>),
    SDiff(Vec<String>),
    SDiffStore(String, Vec<String>),
}

impl Command {
    /// Redis command name, as sent on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Exists(_) => "EXISTS",
            Command::TypeOf(_) => "TYPE",
            Command::Del(_) => "DEL",
            Command::Expire(..) => "EXPIRE",
            Command::Pttl(_) => "PTTL",
            Command::Persist(_) => "PERSIST",
            Command::Get(_) => "GET",
            Command::Set(..) => "SET",
            Command::SetEx(..) => "SETEX",
            Command::SetNx(..) => "SETNX",
            Command::MSet(_) => "MSET",
            Command::MSetNx(_) => "MSETNX",
            Command::Append(..) => "APPEND",
            Command::GetSet(..) => "GETSET",
            Command::StrLen(_) => "STRLEN",
            Command::MGet(_) => "MGET",
            Command::IncrBy(..) => "INCRBY",
            Command::DecrBy(..) => "DECRBY",
            Command::HSet(..) => "HSET",
            Command::HSetNx(..) => "HSETNX",
            Command::HGet(..) => "HGET",
            Command::HMGet(..) => "HMGET",
            Command::HGetAll(_) => "HGETALL",
            Command::HDel(..) => "HDEL",
            Command::HLen(_) => "HLEN",
            Command::HExists(..) => "HEXISTS",
            Command::HIncrBy(..) => "HINCRBY",
            Command::HKeys(_) => "HKEYS",
            Command::HVals(_) => "HVALS",
            Command::LPush(..) => "LPUSH",
            Command::LPushX(..) => "LPUSHX",
            Command::RPush(..) => "RPUSH",
            Command::RPushX(..) => "RPUSHX",
            Command::LPop(_) => "LPOP",
            Command::RPop(_) => "RPOP",
            Command::BLPop(..) => "BLPOP",
            Command::BRPop(..) => "BRPOP",
            Command::LLen(_) => "LLEN",
            Command::LRange(..) => "LRANGE",
            Command::LRem(..) => "LREM",
            Command::LSet(..) => "LSET",
            Command::LTrim(..) => "LTRIM",
            Command::LIndex(..) => "LINDEX",
            Command::LInsert { .. } => "LINSERT",
            Command::RPopLPush(..) => "RPOPLPUSH",
            Command::BRPopLPush(..) => "BRPOPLPUSH",
            Command::SAdd(..) => "SADD",
            Command::SRem(..) => "SREM",
            Command::SMembers(_) => "SMEMBERS",
            Command::SIsMember(..) => "SISMEMBER",
            Command::SCard(_) => "SCARD",
            Command::SMove(..) => "SMOVE",
            Command::SPop(_) => "SPOP",
            Command::SRandMember(..) => "SRANDMEMBER",
            Command::SInter(_) => "SINTER",
            Command::SInterStore(..) => "SINTERSTORE",
            Command::SUnion(_) => "SUNION",
            Command::SUnionStore(..) => "SUNIONSTORE",
            Command::SDiff(_) => "SDIFF",
            Command::SDiffStore(..) => "SDIFFSTORE",
        }
    }

    /// Wire arguments following the command name, in protocol order.
    pub fn args(&self) -> Vec<String> {
        fn with_key(key: &str, rest: &[String]) -> Vec<String> {
            let mut args = Vec::with_capacity(rest.len() + 1);
            args.push(key.to_string());
            args.extend(rest.iter().cloned());
            args
        }
        fn flatten(pairs: &[(String, String)]) -> impl Iterator<Item = String> + '_ {
            pairs.iter().flat_map(|(a, b)| [a.clone(), b.clone()])
        }

        match self {
            Command::Exists(keys)
            | Command::Del(keys)
            | Command::MGet(keys)
            | Command::SInter(keys)
            | Command::SUnion(keys)
            | Command::SDiff(keys) => keys.clone(),
            Command::TypeOf(key)
            | Command::Pttl(key)
            | Command::Persist(key)
            | Command::Get(key)
            | Command::StrLen(key)
            | Command::HGetAll(key)
            | Command::HLen(key)
            | Command::HKeys(key)
            | Command::HVals(key)
            | Command::LPop(key)
            | Command::RPop(key)
            | Command::LLen(key)
            | Command::SMembers(key)
            | Command::SCard(key)
            | Command::SPop(key) => vec![key.clone()],
            Command::Expire(key, seconds) => vec![key.clone(), seconds.to_string()],
            Command::Set(key, value)
            | Command::SetNx(key, value)
            | Command::Append(key, value)
            | Command::GetSet(key, value) => vec![key.clone(), value.clone()],
            Command::SetEx(key, seconds, value) => {
                vec![key.clone(), seconds.to_string(), value.clone()]
            }
            Command::MSet(pairs) | Command::MSetNx(pairs) => flatten(pairs).collect(),
            Command::IncrBy(key, n) | Command::DecrBy(key, n) => vec![key.clone(), n.to_string()],
            Command::HSet(key, pairs) => std::iter::once(key.clone()).chain(flatten(pairs)).collect(),
            Command::HSetNx(key, field, value) => vec![key.clone(), field.clone(), value.clone()],
            Command::HGet(key, field)
            | Command::HExists(key, field)
            | Command::SIsMember(key, field) => vec![key.clone(), field.clone()],
            Command::HMGet(key, fields) | Command::HDel(key, fields) => with_key(key, fields),
            Command::HIncrBy(key, field, n) => vec![key.clone(), field.clone(), n.to_string()],
            Command::LPush(key, values)
            | Command::LPushX(key, values)
            | Command::RPush(key, values)
            | Command::RPushX(key, values)
            | Command::SAdd(key, values)
            | Command::SRem(key, values) => with_key(key, values),
            Command::BLPop(keys, timeout) | Command::BRPop(keys, timeout) => {
                let mut args = keys.clone();
                args.push(timeout_arg(*timeout));
                args
            }
            Command::LRange(key, start, stop) | Command::LTrim(key, start, stop) => {
                vec![key.clone(), start.to_string(), stop.to_string()]
            }
            Command::LRem(key, count, value) => vec![key.clone(), count.to_string(), value.clone()],
            Command::LSet(key, index, value) => vec![key.clone(), index.to_string(), value.clone()],
            Command::LIndex(key, index) => vec![key.clone(), index.to_string()],
            Command::LInsert {
                key,
                position,
                pivot,
                value,
            } => vec![
                key.clone(),
                position.as_str().to_string(),
                pivot.clone(),
                value.clone(),
            ],
            Command::RPopLPush(source, dest) => vec![source.clone(), dest.clone()],
            Command::BRPopLPush(source, dest, timeout) => {
                vec![source.clone(), dest.clone(), timeout_arg(*timeout)]
            }
            Command::SMove(source, dest, member) => {
                vec![source.clone(), dest.clone(), member.clone()]
            }
            Command::SRandMember(key, count) => vec![key.clone(), count.to_string()],
            Command::SInterStore(dest, keys)
            | Command::SUnionStore(dest, keys)
            | Command::SDiffStore(dest, keys) => with_key(dest, keys),
        }
    }

    /// First key the command touches (used for logging and diagnosis).
    pub fn primary_key(&self) -> Option<&str> {
        match self {
            Command::Exists(keys)
            | Command::Del(keys)
            | Command::MGet(keys)
            | Command::BLPop(keys, _)
            | Command::BRPop(keys, _)
            | Command::SInter(keys)
            | Command::SUnion(keys)
            | Command::SDiff(keys) => keys.first().map(String::as_str),
            Command::MSet(pairs) | Command::MSetNx(pairs) => {
                pairs.first().map(|(k, _)| k.as_str())
            }
            Command::TypeOf(key)
            | Command::Expire(key, _)
            | Command::Pttl(key)
            | Command::Persist(key)
            | Command::Get(key)
            | Command::Set(key, _)
            | Command::SetEx(key, _, _)
            | Command::SetNx(key, _)
            | Command::Append(key, _)
            | Command::GetSet(key, _)
            | Command::StrLen(key)
            | Command::IncrBy(key, _)
            | Command::DecrBy(key, _)
            | Command::HSet(key, _)
            | Command::HSetNx(key, _, _)
            | Command::HGet(key, _)
            | Command::HMGet(key, _)
            | Command::HGetAll(key)
            | Command::HDel(key, _)
            | Command::HLen(key)
            | Command::HExists(key, _)
            | Command::HIncrBy(key, _, _)
            | Command::HKeys(key)
            | Command::HVals(key)
            | Command::LPush(key, _)
            | Command::LPushX(key, _)
            | Command::RPush(key, _)
            | Command::RPushX(key, _)
            | Command::LPop(key)
            | Command::RPop(key)
            | Command::LLen(key)
            | Command::LRange(key, _, _)
            | Command::LRem(key, _, _)
            | Command::LSet(key, _, _)
            | Command::LTrim(key, _, _)
            | Command::LIndex(key, _)
            | Command::LInsert { key, .. }
            | Command::RPopLPush(key, _)
            | Command::BRPopLPush(key, _, _)
            | Command::SAdd(key, _)
            | Command::SRem(key, _)
            | Command::SMembers(key)
            | Command::SIsMember(key, _)
            | Command::SCard(key)
            | Command::SMove(key, _, _)
            | Command::SPop(key)
            | Command::SRandMember(key, _)
            | Command::SInterStore(key, _)
            | Command::SUnionStore(key, _)
            | Command::SDiffStore(key, _) => Some(key),
        }
    }

    /// Keys whose type the command depends on, in argument order.
    ///
    /// Destinations that are overwritten wholesale (the `*STORE` forms) are
    /// not included; their previous type never causes a rejection.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Command::Exists(keys)
            | Command::Del(keys)
            | Command::MGet(keys)
            | Command::BLPop(keys, _)
            | Command::BRPop(keys, _)
            | Command::SInter(keys)
            | Command::SUnion(keys)
            | Command::SDiff(keys)
            | Command::SInterStore(_, keys)
            | Command::SUnionStore(_, keys)
            | Command::SDiffStore(_, keys) => keys.iter().map(String::as_str).collect(),
            Command::MSet(pairs) | Command::MSetNx(pairs) => {
                pairs.iter().map(|(k, _)| k.as_str()).collect()
            }
            Command::RPopLPush(source, dest)
            | Command::BRPopLPush(source, dest, _)
            | Command::SMove(source, dest, _) => vec![source.as_str(), dest.as_str()],
            _ => self.primary_key().into_iter().collect(),
        }
    }

    /// Commands that may suspend the caller until list data arrives.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            Command::BLPop(..) | Command::BRPop(..) | Command::BRPopLPush(..)
        )
    }

    /// Blocking timeout carried by the command, if any.
    pub fn block_timeout(&self) -> Option<Duration> {
        match self {
            Command::BLPop(_, timeout)
            | Command::BRPop(_, timeout)
            | Command::BRPopLPush(_, _, timeout) => Some(*timeout),
            _ => None,
        }
    }

    /// Commands after which a blocked list pop may be able to proceed.
    pub fn wakes_list_waiters(&self) -> bool {
        matches!(
            self,
            Command::LPush(..)
                | Command::LPushX(..)
                | Command::RPush(..)
                | Command::RPushX(..)
                | Command::LInsert { .. }
                | Command::RPopLPush(..)
                | Command::BRPopLPush(..)
        )
    }
}

/// Blocking timeouts go out in seconds with millisecond precision (Redis >= 6
/// accepts decimal timeouts). Partial milliseconds round up, so a non-zero
/// timeout never turns into `0` (block forever).
fn timeout_arg(timeout: Duration) -> String {
    let millis = timeout.as_nanos().div_ceil(1_000_000);
    if millis % 1000 == 0 {
        (millis / 1000).to_string()
    } else {
        format!("{}.{:03}", millis / 1000, millis % 1000)
    }
}
