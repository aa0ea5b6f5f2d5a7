//! Key command implementations for CommandExecutor.
//!
//! Handles: EXISTS, TYPE, DEL, EXPIRE, PTTL, PERSIST
//!
//! # Invariants
//!
//! - DEL removes keys from data AND expirations
//! - EXISTS count is always in range [0, keys.len()]
//! - PTTL returns -2 (not exists), -1 (no expiry), or >= 0 (remaining)

use super::CommandExecutor;
use crate::store::RespValue;
use std::time::Duration;

impl CommandExecutor {
    pub(super) fn execute_exists(&self, keys: &[String]) -> RespValue {
        let count = keys.iter().filter(|k| self.data.contains_key(*k)).count();

        debug_assert!(
            count <= keys.len(),
            "Postcondition violated: EXISTS count cannot exceed input keys count"
        );

        RespValue::Integer(count as i64)
    }

    pub(super) fn execute_typeof(&self, key: &str) -> RespValue {
        match self.get_value(key) {
            Some(value) => RespValue::simple(value.type_name()),
            None => RespValue::simple("none"),
        }
    }

    pub(super) fn execute_del(&mut self, keys: &[String]) -> RespValue {
        #[cfg(debug_assertions)]
        let pre_data_len = self.data.len();

        let mut count = 0i64;
        for key in keys {
            if self.remove_key(key) {
                count += 1;
            }
        }

        #[cfg(debug_assertions)]
        debug_assert_eq!(
            self.data.len(),
            pre_data_len - count as usize,
            "Postcondition violated: data.len() must decrease by deleted count"
        );

        RespValue::Integer(count)
    }

    pub(super) fn execute_expire(&mut self, key: &str, seconds: u64) -> RespValue {
        if !self.data.contains_key(key) {
            return RespValue::Integer(0);
        }
        if seconds == 0 {
            // Zero TTL deletes immediately
            self.remove_key(key);
            return RespValue::Integer(1);
        }
        let at = self.current_time + Duration::from_secs(seconds);
        self.expirations.insert(key.to_string(), at);
        RespValue::Integer(1)
    }

    pub(super) fn execute_pttl(&self, key: &str) -> RespValue {
        let result = if !self.data.contains_key(key) {
            -2i64
        } else if let Some(at) = self.expirations.get(key) {
            at.saturating_duration_since(self.current_time).as_millis() as i64
        } else {
            -1i64
        };

        debug_assert!(result >= -2, "Postcondition violated: PTTL must be >= -2");

        RespValue::Integer(result)
    }

    pub(super) fn execute_persist(&mut self, key: &str) -> RespValue {
        if self.data.contains_key(key) && self.expirations.remove(key).is_some() {
            RespValue::Integer(1)
        } else {
            RespValue::Integer(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::CommandExecutor;
    use crate::store::{Command, RespValue};

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_del_counts_only_removed_keys() {
        let mut executor = CommandExecutor::new(0);
        executor.execute(&Command::Set("a".to_string(), "1".to_string()));
        executor.execute(&Command::Set("b".to_string(), "2".to_string()));

        let result = executor.execute(&Command::Del(keys(&["a", "b", "missing"])));
        assert_eq!(result, RespValue::Integer(2));
        assert_eq!(
            executor.execute(&Command::Del(keys(&["a"]))),
            RespValue::Integer(0)
        );
    }

    #[test]
    fn test_type_names() {
        let mut executor = CommandExecutor::new(0);
        executor.execute(&Command::Set("s".to_string(), "v".to_string()));
        executor.execute(&Command::RPush("l".to_string(), keys(&["v"])));
        executor.execute(&Command::SAdd("z".to_string(), keys(&["v"])));
        executor.execute(&Command::HSet(
            "h".to_string(),
            vec![("f".to_string(), "v".to_string())],
        ));

        for (key, expected) in [
            ("s", "string"),
            ("l", "list"),
            ("z", "set"),
            ("h", "hash"),
            ("none", "none"),
        ] {
            assert_eq!(
                executor.execute(&Command::TypeOf(key.to_string())),
                RespValue::simple(expected)
            );
        }
    }

    #[test]
    fn test_pttl_sentinels() {
        let mut executor = CommandExecutor::new(0);
        assert_eq!(
            executor.execute(&Command::Pttl("k".to_string())),
            RespValue::Integer(-2)
        );
        executor.execute(&Command::Set("k".to_string(), "v".to_string()));
        assert_eq!(
            executor.execute(&Command::Pttl("k".to_string())),
            RespValue::Integer(-1)
        );
        executor.execute(&Command::Expire("k".to_string(), 10));
        assert_eq!(
            executor.execute(&Command::Pttl("k".to_string())),
            RespValue::Integer(10_000)
        );
        assert_eq!(
            executor.execute(&Command::Persist("k".to_string())),
            RespValue::Integer(1)
        );
        assert_eq!(
            executor.execute(&Command::Persist("k".to_string())),
            RespValue::Integer(0)
        );
    }
}
