//! List command implementations for CommandExecutor.
//!
//! Handles: LPUSH, LPUSHX, RPUSH, RPUSHX, LPOP, RPOP, BLPOP, BRPOP, LLEN,
//! LRANGE, LREM, LSET, LTRIM, LINDEX, LINSERT, RPOPLPUSH, BRPOPLPUSH
//!
//! # Invariants
//!
//! - A list that loses its last element is removed from the keyspace
//! - RPOPLPUSH checks both keys before mutating either

use super::CommandExecutor;
use crate::store::memory::data::{StoreList, Value};
use crate::store::{InsertPosition, RespValue};

impl CommandExecutor {
    pub(super) fn execute_push(
        &mut self,
        key: &str,
        values: &[String],
        left: bool,
        only_if_exists: bool,
    ) -> RespValue {
        match self.get_value(key) {
            Some(Value::List(_)) => {}
            Some(_) => return RespValue::wrong_type(),
            None if only_if_exists => return RespValue::Integer(0),
            None => self.put_value(key, Value::List(StoreList::new())),
        }
        let Some(Value::List(list)) = self.get_value_mut(key) else {
            return RespValue::wrong_type();
        };

        #[cfg(debug_assertions)]
        let pre_len = list.len();

        for value in values {
            if left {
                list.lpush(value.clone());
            } else {
                list.rpush(value.clone());
            }
        }

        #[cfg(debug_assertions)]
        debug_assert_eq!(
            list.len(),
            pre_len + values.len(),
            "Postcondition violated: push must grow the list by the value count"
        );

        RespValue::Integer(list.len() as i64)
    }

    pub(super) fn execute_pop(&mut self, key: &str, left: bool) -> RespValue {
        let popped = match self.get_value_mut(key) {
            Some(Value::List(list)) => {
                if left {
                    list.lpop()
                } else {
                    list.rpop()
                }
            }
            Some(_) => return RespValue::wrong_type(),
            None => return RespValue::nil(),
        };
        self.drop_if_empty(key);
        match popped {
            Some(v) => RespValue::bulk(&v),
            None => RespValue::nil(),
        }
    }

    /// One non-blocking attempt of BLPOP/BRPOP: pop from the first non-empty
    /// list in argument order. Replies `[key, value]` or a null array.
    pub(super) fn execute_pop_first(&mut self, keys: &[String], left: bool) -> RespValue {
        // Any wrong-typed key fails the whole command, as a server does when
        // it scans keys in order
        let mut ready = None;
        for key in keys {
            match self.get_value(key) {
                Some(Value::List(list)) if !list.is_empty() => {
                    ready = Some(key);
                    break;
                }
                Some(Value::List(_)) | None => continue,
                Some(_) => return RespValue::wrong_type(),
            }
        }
        match ready {
            Some(key) => {
                let popped = self.execute_pop(key, left);
                RespValue::Array(Some(vec![RespValue::bulk(key), popped]))
            }
            None => RespValue::Array(None),
        }
    }

    pub(super) fn execute_llen(&self, key: &str) -> RespValue {
        match self.get_value(key) {
            Some(Value::List(list)) => RespValue::Integer(list.len() as i64),
            Some(_) => RespValue::wrong_type(),
            None => RespValue::Integer(0),
        }
    }

    pub(super) fn execute_lrange(&self, key: &str, start: i64, stop: i64) -> RespValue {
        match self.get_value(key) {
            Some(Value::List(list)) => RespValue::bulk_array(list.range(start, stop)),
            Some(_) => RespValue::wrong_type(),
            None => RespValue::empty_array(),
        }
    }

    pub(super) fn execute_lrem(&mut self, key: &str, count: i64, value: &str) -> RespValue {
        let removed = match self.get_value_mut(key) {
            Some(Value::List(list)) => list.remove(count, value),
            Some(_) => return RespValue::wrong_type(),
            None => return RespValue::Integer(0),
        };
        self.drop_if_empty(key);
        RespValue::Integer(removed as i64)
    }

    pub(super) fn execute_lset(&mut self, key: &str, index: i64, value: &str) -> RespValue {
        match self.get_value_mut(key) {
            Some(Value::List(list)) => match list.set(index, value.to_string()) {
                Ok(()) => RespValue::ok(),
                Err(msg) => RespValue::err(msg),
            },
            Some(_) => RespValue::wrong_type(),
            None => RespValue::err("ERR no such key"),
        }
    }

    pub(super) fn execute_ltrim(&mut self, key: &str, start: i64, stop: i64) -> RespValue {
        match self.get_value_mut(key) {
            Some(Value::List(list)) => list.trim(start, stop),
            Some(_) => return RespValue::wrong_type(),
            None => return RespValue::ok(),
        }
        self.drop_if_empty(key);
        RespValue::ok()
    }

    pub(super) fn execute_lindex(&self, key: &str, index: i64) -> RespValue {
        match self.get_value(key) {
            Some(Value::List(list)) => match list.get(index) {
                Some(v) => RespValue::bulk(v),
                None => RespValue::nil(),
            },
            Some(_) => RespValue::wrong_type(),
            None => RespValue::nil(),
        }
    }

    /// LINSERT replies with the new length, `-1` when the pivot is missing,
    /// and `0` when the key is missing.
    pub(super) fn execute_linsert(
        &mut self,
        key: &str,
        position: InsertPosition,
        pivot: &str,
        value: &str,
    ) -> RespValue {
        match self.get_value_mut(key) {
            Some(Value::List(list)) => {
                let before = position == InsertPosition::Before;
                match list.insert(before, pivot, value.to_string()) {
                    Some(len) => RespValue::Integer(len as i64),
                    None => RespValue::Integer(-1),
                }
            }
            Some(_) => RespValue::wrong_type(),
            None => RespValue::Integer(0),
        }
    }

    /// Pop the tail of `source` and push it onto the head of `dest`.
    /// `source == dest` rotates the list.
    pub(super) fn execute_rpoplpush(&mut self, source: &str, dest: &str) -> RespValue {
        match self.get_value(source) {
            Some(Value::List(_)) => {}
            Some(_) => return RespValue::wrong_type(),
            None => return RespValue::nil(),
        }
        // Check the destination first so a type clash cannot lose the element
        if let Some(existing) = self.get_value(dest) {
            if existing.as_list().is_none() {
                return RespValue::wrong_type();
            }
        }

        let element = match self.get_value_mut(source) {
            Some(Value::List(list)) => list.rpop(),
            _ => None,
        };
        let Some(element) = element else {
            return RespValue::nil();
        };
        self.drop_if_empty(source);

        if !self.data.contains_key(dest) {
            self.put_value(dest, Value::List(StoreList::new()));
        }
        if let Some(Value::List(list)) = self.get_value_mut(dest) {
            list.lpush(element.clone());
        }

        debug_assert!(
            self.get_value(dest)
                .and_then(Value::as_list)
                .and_then(|l| l.get(0))
                .is_some_and(|head| *head == element),
            "Postcondition violated: moved element must be the head of dest"
        );

        RespValue::bulk(&element)
    }
}

#[cfg(test)]
mod tests {
    use super::super::CommandExecutor;
    use crate::store::{Command, InsertPosition, RespValue};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn range(executor: &mut CommandExecutor, key: &str) -> RespValue {
        executor.execute(&Command::LRange(key.to_string(), 0, -1))
    }

    #[test]
    fn test_lpush_reverses_argument_order() {
        let mut executor = CommandExecutor::new(0);
        executor.execute(&Command::LPush("l".to_string(), strings(&["a", "b", "c"])));
        assert_eq!(range(&mut executor, "l"), RespValue::bulk_array(["c", "b", "a"]));
    }

    #[test]
    fn test_pushx_on_missing_key_creates_nothing() {
        let mut executor = CommandExecutor::new(0);
        let result = executor.execute(&Command::RPushX("l".to_string(), strings(&["a"])));
        assert_eq!(result, RespValue::Integer(0));
        assert_eq!(executor.key_count(), 0);
    }

    #[test]
    fn test_pop_removes_drained_list() {
        let mut executor = CommandExecutor::new(0);
        executor.execute(&Command::RPush("l".to_string(), strings(&["only"])));
        assert_eq!(
            executor.execute(&Command::LPop("l".to_string())),
            RespValue::bulk("only")
        );
        assert_eq!(executor.key_count(), 0);
        assert_eq!(executor.execute(&Command::RPop("l".to_string())), RespValue::nil());
    }

    #[test]
    fn test_pop_first_scans_keys_in_order() {
        let mut executor = CommandExecutor::new(0);
        executor.execute(&Command::RPush("second".to_string(), strings(&["x", "y"])));
        let result = executor.execute(&Command::BRPop(
            strings(&["first", "second"]),
            std::time::Duration::ZERO,
        ));
        assert_eq!(
            result,
            RespValue::Array(Some(vec![RespValue::bulk("second"), RespValue::bulk("y")]))
        );
        let result = executor.execute(&Command::BLPop(
            strings(&["nothing"]),
            std::time::Duration::ZERO,
        ));
        assert_eq!(result, RespValue::Array(None));
    }

    #[test]
    fn test_linsert_sentinels() {
        let mut executor = CommandExecutor::new(0);
        let insert = |pivot: &str| Command::LInsert {
            key: "l".to_string(),
            position: InsertPosition::After,
            pivot: pivot.to_string(),
            value: "new".to_string(),
        };
        assert_eq!(executor.execute(&insert("a")), RespValue::Integer(0));
        executor.execute(&Command::RPush("l".to_string(), strings(&["a", "b"])));
        assert_eq!(executor.execute(&insert("zz")), RespValue::Integer(-1));
        assert_eq!(executor.execute(&insert("a")), RespValue::Integer(3));
        assert_eq!(range(&mut executor, "l"), RespValue::bulk_array(["a", "new", "b"]));
    }

    #[test]
    fn test_lset_errors() {
        let mut executor = CommandExecutor::new(0);
        assert_eq!(
            executor.execute(&Command::LSet("l".to_string(), 0, "v".to_string())),
            RespValue::err("ERR no such key")
        );
        executor.execute(&Command::RPush("l".to_string(), strings(&["a"])));
        assert_eq!(
            executor.execute(&Command::LSet("l".to_string(), 5, "v".to_string())),
            RespValue::err("ERR index out of range")
        );
        assert_eq!(
            executor.execute(&Command::LSet("l".to_string(), -1, "z".to_string())),
            RespValue::ok()
        );
    }

    #[test]
    fn test_ltrim_to_empty_removes_key() {
        let mut executor = CommandExecutor::new(0);
        executor.execute(&Command::RPush("l".to_string(), strings(&["a", "b"])));
        executor.execute(&Command::LTrim("l".to_string(), 5, 10));
        assert_eq!(executor.key_count(), 0);
    }

    #[test]
    fn test_rpoplpush_rotates_single_list() {
        let mut executor = CommandExecutor::new(0);
        executor.execute(&Command::RPush("l".to_string(), strings(&["a", "b", "c"])));
        let result = executor.execute(&Command::RPopLPush("l".to_string(), "l".to_string()));
        assert_eq!(result, RespValue::bulk("c"));
        assert_eq!(range(&mut executor, "l"), RespValue::bulk_array(["c", "a", "b"]));
    }

    #[test]
    fn test_rpoplpush_wrong_type_dest_keeps_source() {
        let mut executor = CommandExecutor::new(0);
        executor.execute(&Command::RPush("src".to_string(), strings(&["a"])));
        executor.execute(&Command::Set("dst".to_string(), "v".to_string()));
        let result = executor.execute(&Command::RPopLPush("src".to_string(), "dst".to_string()));
        assert!(result.is_wrong_type());
        assert_eq!(range(&mut executor, "src"), RespValue::bulk_array(["a"]));
    }
}
