//! Set command implementations for CommandExecutor.
//!
//! Handles: SADD, SREM, SMEMBERS, SISMEMBER, SCARD, SMOVE, SPOP, SRANDMEMBER,
//! SINTER, SINTERSTORE, SUNION, SUNIONSTORE, SDIFF, SDIFFSTORE

use super::{CommandExecutor, SetAlgebra};
use crate::store::memory::data::{StoreSet, Value};
use crate::store::RespValue;

impl CommandExecutor {
    pub(super) fn execute_sadd(&mut self, key: &str, members: &[String]) -> RespValue {
        match self.get_value(key) {
            Some(Value::Set(_)) => {}
            Some(_) => return RespValue::wrong_type(),
            None => self.put_value(key, Value::Set(StoreSet::new())),
        }
        let Some(Value::Set(set)) = self.get_value_mut(key) else {
            return RespValue::wrong_type();
        };
        let added = members.iter().filter(|m| set.add((*m).clone())).count();
        RespValue::Integer(added as i64)
    }

    pub(super) fn execute_srem(&mut self, key: &str, members: &[String]) -> RespValue {
        let removed = match self.get_value_mut(key) {
            Some(Value::Set(set)) => members.iter().filter(|m| set.remove(m)).count(),
            Some(_) => return RespValue::wrong_type(),
            None => return RespValue::Integer(0),
        };
        self.drop_if_empty(key);
        RespValue::Integer(removed as i64)
    }

    pub(super) fn execute_smembers(&self, key: &str) -> RespValue {
        match self.get_value(key) {
            Some(Value::Set(set)) => RespValue::bulk_array(set.members()),
            Some(_) => RespValue::wrong_type(),
            None => RespValue::empty_array(),
        }
    }

    pub(super) fn execute_sismember(&self, key: &str, member: &str) -> RespValue {
        match self.get_value(key) {
            Some(Value::Set(set)) => RespValue::Integer(i64::from(set.contains(member))),
            Some(_) => RespValue::wrong_type(),
            None => RespValue::Integer(0),
        }
    }

    pub(super) fn execute_scard(&self, key: &str) -> RespValue {
        match self.get_value(key) {
            Some(Value::Set(set)) => RespValue::Integer(set.len() as i64),
            Some(_) => RespValue::wrong_type(),
            None => RespValue::Integer(0),
        }
    }

    pub(super) fn execute_smove(&mut self, source: &str, dest: &str, member: &str) -> RespValue {
        // A missing source answers 0 before either key is type-checked
        let present = match self.get_value(source) {
            Some(Value::Set(set)) => set.contains(member),
            Some(_) => return RespValue::wrong_type(),
            None => return RespValue::Integer(0),
        };
        if !matches!(self.get_value(dest), Some(Value::Set(_)) | None) {
            return RespValue::wrong_type();
        }
        if !present {
            return RespValue::Integer(0);
        }
        if source == dest {
            return RespValue::Integer(1);
        }

        if let Some(Value::Set(set)) = self.get_value_mut(source) {
            set.remove(member);
        }
        self.drop_if_empty(source);
        self.execute_sadd(dest, &[member.to_string()]);

        debug_assert!(
            self.get_value(dest)
                .and_then(Value::as_set)
                .is_some_and(|s| s.contains(member)),
            "Postcondition violated: moved member must be in dest"
        );

        RespValue::Integer(1)
    }

    pub(super) fn execute_spop(&mut self, key: &str) -> RespValue {
        let popped = match self.data.get_mut(key) {
            Some(Value::Set(set)) => set.pop(&mut self.rng),
            Some(_) => return RespValue::wrong_type(),
            None => return RespValue::nil(),
        };
        self.drop_if_empty(key);
        match popped {
            Some(member) => RespValue::bulk(&member),
            None => RespValue::nil(),
        }
    }

    pub(super) fn execute_srandmember(&mut self, key: &str, count: i64) -> RespValue {
        // Counts must lie in [-i64::MAX, i64::MAX], checked before the key
        if count.checked_neg().is_none() {
            return RespValue::err("ERR value is out of range");
        }
        match self.data.get(key) {
            Some(Value::Set(set)) => RespValue::bulk_array(set.sample(count, &mut self.rng)),
            Some(_) => RespValue::wrong_type(),
            None => RespValue::empty_array(),
        }
    }

    /// SINTER/SUNION/SDIFF and their STORE forms. Missing keys act as
    /// empty sets; any non-set key fails the whole command.
    pub(super) fn execute_set_algebra(
        &mut self,
        keys: &[String],
        op: SetAlgebra,
        dest: Option<&String>,
    ) -> RespValue {
        let result = match self.combine_sets(keys, op) {
            Ok(result) => result,
            Err(reply) => return reply,
        };

        match dest {
            None => RespValue::bulk_array(result.members()),
            Some(dest) => {
                let count = result.len() as i64;
                if result.is_empty() {
                    self.remove_key(dest);
                } else {
                    self.put_value(dest, Value::Set(result));
                }
                RespValue::Integer(count)
            }
        }
    }

    fn combine_sets(&self, keys: &[String], op: SetAlgebra) -> Result<StoreSet, RespValue> {
        let mut operands: Vec<Option<&StoreSet>> = Vec::with_capacity(keys.len());
        for key in keys {
            match self.get_value(key) {
                Some(Value::Set(set)) => operands.push(Some(set)),
                Some(_) => return Err(RespValue::wrong_type()),
                None => operands.push(None),
            }
        }

        let mut result = StoreSet::new();
        let Some((first, rest)) = operands.split_first() else {
            return Ok(result);
        };
        let contains = |set: &Option<&StoreSet>, member: &str| set.is_some_and(|s| s.contains(member));

        match op {
            SetAlgebra::Union => {
                for member in operands.iter().flatten().flat_map(|s| s.iter()) {
                    result.add(member.clone());
                }
            }
            SetAlgebra::Inter => {
                for member in first.iter().flat_map(|s| s.iter()) {
                    if rest.iter().all(|s| contains(s, member)) {
                        result.add(member.clone());
                    }
                }
            }
            SetAlgebra::Diff => {
                for member in first.iter().flat_map(|s| s.iter()) {
                    if !rest.iter().any(|s| contains(s, member)) {
                        result.add(member.clone());
                    }
                }
            }
        }
        Ok(result)
    }
}
