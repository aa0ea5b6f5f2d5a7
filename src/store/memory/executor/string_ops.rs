//! String command implementations for CommandExecutor.
//!
//! Handles: GET, SET, SETEX, SETNX, MSET, MSETNX, APPEND, GETSET, STRLEN,
//! MGET, INCRBY, DECRBY

use super::CommandExecutor;
use crate::store::memory::data::Value;
use crate::store::RespValue;
use std::time::Duration;

impl CommandExecutor {
    pub(super) fn execute_get(&self, key: &str) -> RespValue {
        match self.get_value(key) {
            Some(Value::String(s)) => RespValue::bulk(s),
            Some(_) => RespValue::wrong_type(),
            None => RespValue::nil(),
        }
    }

    pub(super) fn execute_set(&mut self, key: &str, value: &str) -> RespValue {
        self.put_value(key, Value::String(value.to_string()));
        RespValue::ok()
    }

    pub(super) fn execute_setex(&mut self, key: &str, seconds: u64, value: &str) -> RespValue {
        if seconds == 0 {
            return RespValue::err("ERR invalid expire time in 'setex' command");
        }
        self.put_value(key, Value::String(value.to_string()));
        let at = self.current_time + Duration::from_secs(seconds);
        self.expirations.insert(key.to_string(), at);

        debug_assert!(
            self.expirations.contains_key(key),
            "Postcondition violated: SETEX must leave an expiration"
        );

        RespValue::ok()
    }

    pub(super) fn execute_setnx(&mut self, key: &str, value: &str) -> RespValue {
        if self.data.contains_key(key) {
            return RespValue::Integer(0);
        }
        self.put_value(key, Value::String(value.to_string()));
        RespValue::Integer(1)
    }

    pub(super) fn execute_mset(&mut self, pairs: &[(String, String)]) -> RespValue {
        for (key, value) in pairs {
            self.put_value(key, Value::String(value.clone()));
        }
        RespValue::ok()
    }

    pub(super) fn execute_msetnx(&mut self, pairs: &[(String, String)]) -> RespValue {
        // All-or-nothing: a single pre-existing key vetoes the whole write
        if pairs.iter().any(|(key, _)| self.data.contains_key(key)) {
            return RespValue::Integer(0);
        }
        for (key, value) in pairs {
            self.put_value(key, Value::String(value.clone()));
        }
        RespValue::Integer(1)
    }

    pub(super) fn execute_append(&mut self, key: &str, value: &str) -> RespValue {
        match self.get_value_mut(key) {
            Some(Value::String(s)) => {
                s.push_str(value);
                RespValue::Integer(s.len() as i64)
            }
            Some(_) => RespValue::wrong_type(),
            None => {
                self.put_value(key, Value::String(value.to_string()));
                RespValue::Integer(value.len() as i64)
            }
        }
    }

    pub(super) fn execute_getset(&mut self, key: &str, value: &str) -> RespValue {
        let old_value = match self.get_value(key) {
            Some(Value::String(s)) => RespValue::bulk(s),
            Some(_) => return RespValue::wrong_type(),
            None => RespValue::nil(),
        };
        self.put_value(key, Value::String(value.to_string()));
        old_value
    }

    pub(super) fn execute_strlen(&self, key: &str) -> RespValue {
        match self.get_value(key) {
            Some(Value::String(s)) => RespValue::Integer(s.len() as i64),
            Some(_) => RespValue::wrong_type(),
            None => RespValue::Integer(0),
        }
    }

    pub(super) fn execute_mget(&self, keys: &[String]) -> RespValue {
        let values: Vec<RespValue> = keys
            .iter()
            .map(|k| match self.get_value(k) {
                Some(Value::String(s)) => RespValue::bulk(s),
                // MGET answers nil for non-string keys (not WRONGTYPE)
                _ => RespValue::nil(),
            })
            .collect();

        debug_assert_eq!(
            values.len(),
            keys.len(),
            "Postcondition violated: MGET result count must match input key count"
        );

        RespValue::Array(Some(values))
    }

    pub(super) fn incr_by_impl(&mut self, key: &str, increment: i64) -> RespValue {
        let current = match self.get_value(key) {
            Some(Value::String(s)) => match s.parse::<i64>() {
                Ok(n) => n,
                Err(_) => return RespValue::err("ERR value is not an integer or out of range"),
            },
            Some(_) => return RespValue::wrong_type(),
            None => 0,
        };
        let new_value = match current.checked_add(increment) {
            Some(n) => n,
            None => return RespValue::err("ERR increment or decrement would overflow"),
        };

        // INCR keeps an existing TTL, so update in place rather than put_value
        match self.get_value_mut(key) {
            Some(Value::String(s)) => *s = new_value.to_string(),
            _ => {
                self.data
                    .insert(key.to_string(), Value::String(new_value.to_string()));
            }
        }

        debug_assert_eq!(
            self.data
                .get(key)
                .and_then(Value::as_string)
                .and_then(|s| s.parse::<i64>().ok()),
            Some(new_value),
            "Postcondition: stored value must equal returned value"
        );

        RespValue::Integer(new_value)
    }
}

#[cfg(test)]
mod tests {
    use super::super::CommandExecutor;
    use crate::store::{Command, RespValue};

    #[test]
    fn test_incr_rejects_non_integer_without_mutation() {
        let mut executor = CommandExecutor::new(0);
        executor.execute(&Command::Set("k".to_string(), "abc".to_string()));
        let result = executor.execute(&Command::IncrBy("k".to_string(), 1));
        assert_eq!(
            result,
            RespValue::err("ERR value is not an integer or out of range")
        );
        assert_eq!(
            executor.execute(&Command::Get("k".to_string())),
            RespValue::bulk("abc")
        );
    }

    #[test]
    fn test_incr_overflow() {
        let mut executor = CommandExecutor::new(0);
        executor.execute(&Command::Set("k".to_string(), i64::MAX.to_string()));
        let result = executor.execute(&Command::IncrBy("k".to_string(), 1));
        assert!(matches!(result, RespValue::Error(_)));
        let result = executor.execute(&Command::DecrBy("j".to_string(), i64::MIN));
        assert!(matches!(result, RespValue::Error(_)));
    }

    #[test]
    fn test_msetnx_is_all_or_nothing() {
        let mut executor = CommandExecutor::new(0);
        executor.execute(&Command::Set("k1".to_string(), "old".to_string()));
        let result = executor.execute(&Command::MSetNx(vec![
            ("k1".to_string(), "v1".to_string()),
            ("k2".to_string(), "v2".to_string()),
        ]));
        assert_eq!(result, RespValue::Integer(0));
        assert_eq!(
            executor.execute(&Command::Get("k2".to_string())),
            RespValue::nil()
        );
    }

    #[test]
    fn test_getset_wrong_type_leaves_value() {
        let mut executor = CommandExecutor::new(0);
        executor.execute(&Command::RPush("l".to_string(), vec!["a".to_string()]));
        let result = executor.execute(&Command::GetSet("l".to_string(), "x".to_string()));
        assert!(result.is_wrong_type());
        assert_eq!(
            executor.execute(&Command::LLen("l".to_string())),
            RespValue::Integer(1)
        );
    }

    #[test]
    fn test_mget_nil_for_wrong_type() {
        let mut executor = CommandExecutor::new(0);
        executor.execute(&Command::Set("s".to_string(), "v".to_string()));
        executor.execute(&Command::RPush("l".to_string(), vec!["a".to_string()]));
        let result = executor.execute(&Command::MGet(vec![
            "s".to_string(),
            "l".to_string(),
            "missing".to_string(),
        ]));
        assert_eq!(
            result,
            RespValue::Array(Some(vec![
                RespValue::bulk("v"),
                RespValue::nil(),
                RespValue::nil()
            ]))
        );
    }
}
