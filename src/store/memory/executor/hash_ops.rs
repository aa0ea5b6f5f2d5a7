//! Hash command implementations for CommandExecutor.
//!
//! Handles: HSET, HSETNX, HGET, HMGET, HGETALL, HDEL, HLEN, HEXISTS,
//! HINCRBY, HKEYS, HVALS

use super::CommandExecutor;
use crate::store::memory::data::{StoreHash, Value};
use crate::store::RespValue;

impl CommandExecutor {
    /// Fetch the hash at `key`, creating it when absent.
    /// `Err` carries the WRONGTYPE reply.
    fn hash_entry(&mut self, key: &str) -> Result<&mut StoreHash, RespValue> {
        if !self.data.contains_key(key) {
            self.put_value(key, Value::Hash(StoreHash::new()));
        }
        match self.get_value_mut(key) {
            Some(Value::Hash(h)) => Ok(h),
            _ => Err(RespValue::wrong_type()),
        }
    }

    pub(super) fn execute_hset(&mut self, key: &str, pairs: &[(String, String)]) -> RespValue {
        let hash = match self.hash_entry(key) {
            Ok(h) => h,
            Err(reply) => return reply,
        };
        let created = pairs
            .iter()
            .filter(|(field, value)| hash.set(field.clone(), value.clone()))
            .count();
        RespValue::Integer(created as i64)
    }

    pub(super) fn execute_hsetnx(&mut self, key: &str, field: &str, value: &str) -> RespValue {
        let hash = match self.hash_entry(key) {
            Ok(h) => h,
            Err(reply) => return reply,
        };
        if hash.exists(field) {
            return RespValue::Integer(0);
        }
        hash.set(field.to_string(), value.to_string());
        RespValue::Integer(1)
    }

    pub(super) fn execute_hget(&self, key: &str, field: &str) -> RespValue {
        match self.get_value(key) {
            Some(Value::Hash(h)) => match h.get(field) {
                Some(v) => RespValue::bulk(v),
                None => RespValue::nil(),
            },
            Some(_) => RespValue::wrong_type(),
            None => RespValue::nil(),
        }
    }

    pub(super) fn execute_hmget(&self, key: &str, fields: &[String]) -> RespValue {
        let hash = match self.get_value(key) {
            Some(Value::Hash(h)) => Some(h),
            Some(_) => return RespValue::wrong_type(),
            None => None,
        };
        let values = fields
            .iter()
            .map(|f| match hash.and_then(|h| h.get(f)) {
                Some(v) => RespValue::bulk(v),
                None => RespValue::nil(),
            })
            .collect();
        RespValue::Array(Some(values))
    }

    pub(super) fn execute_hgetall(&self, key: &str) -> RespValue {
        match self.get_value(key) {
            Some(Value::Hash(h)) => RespValue::bulk_array(
                h.iter().flat_map(|(f, v)| [f.as_str(), v.as_str()]),
            ),
            Some(_) => RespValue::wrong_type(),
            None => RespValue::empty_array(),
        }
    }

    pub(super) fn execute_hdel(&mut self, key: &str, fields: &[String]) -> RespValue {
        let removed = match self.get_value_mut(key) {
            Some(Value::Hash(h)) => fields.iter().filter(|f| h.delete(f)).count(),
            Some(_) => return RespValue::wrong_type(),
            None => return RespValue::Integer(0),
        };
        self.drop_if_empty(key);
        RespValue::Integer(removed as i64)
    }

    pub(super) fn execute_hlen(&self, key: &str) -> RespValue {
        match self.get_value(key) {
            Some(Value::Hash(h)) => RespValue::Integer(h.len() as i64),
            Some(_) => RespValue::wrong_type(),
            None => RespValue::Integer(0),
        }
    }

    pub(super) fn execute_hexists(&self, key: &str, field: &str) -> RespValue {
        match self.get_value(key) {
            Some(Value::Hash(h)) => RespValue::Integer(i64::from(h.exists(field))),
            Some(_) => RespValue::wrong_type(),
            None => RespValue::Integer(0),
        }
    }

    pub(super) fn execute_hincrby(&mut self, key: &str, field: &str, increment: i64) -> RespValue {
        // Validate before touching the keyspace so a failed HINCRBY on a
        // missing key leaves nothing behind
        let current = match self.get_value(key) {
            Some(Value::Hash(h)) => match h.get(field) {
                Some(v) => match v.parse::<i64>() {
                    Ok(n) => n,
                    Err(_) => return RespValue::err("ERR hash value is not an integer"),
                },
                None => 0,
            },
            Some(_) => return RespValue::wrong_type(),
            None => 0,
        };
        let new_value = match current.checked_add(increment) {
            Some(n) => n,
            None => return RespValue::err("ERR increment or decrement would overflow"),
        };
        match self.hash_entry(key) {
            Ok(h) => {
                h.set(field.to_string(), new_value.to_string());
            }
            Err(reply) => return reply,
        }
        RespValue::Integer(new_value)
    }

    pub(super) fn execute_hkeys(&self, key: &str) -> RespValue {
        match self.get_value(key) {
            Some(Value::Hash(h)) => RespValue::bulk_array(h.keys()),
            Some(_) => RespValue::wrong_type(),
            None => RespValue::empty_array(),
        }
    }

    pub(super) fn execute_hvals(&self, key: &str) -> RespValue {
        match self.get_value(key) {
            Some(Value::Hash(h)) => RespValue::bulk_array(h.values()),
            Some(_) => RespValue::wrong_type(),
            None => RespValue::empty_array(),
        }
    }
}
