//! Store List data structure

use std::collections::VecDeque;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoreList {
    items: VecDeque<String>,
}

/// Resolve a possibly negative index against `len`; `None` when out of range.
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let idx = if index < 0 { len + index } else { index };
    if idx < 0 || idx >= len {
        None
    } else {
        Some(idx as usize)
    }
}

/// Normalize an inclusive [start, stop] range the way LRANGE/LTRIM do.
/// Returns `None` when the range selects nothing.
fn resolve_range(start: i64, stop: i64, len: usize) -> Option<(usize, usize)> {
    let len = len as i64;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
    if start > stop || start >= len || stop < 0 {
        return None;
    }
    Some((start as usize, stop as usize))
}

impl StoreList {
    pub fn new() -> Self {
        StoreList {
            items: VecDeque::new(),
        }
    }

    pub fn lpush(&mut self, value: String) {
        #[cfg(debug_assertions)]
        let pre_len = self.items.len();

        self.items.push_front(value);

        debug_assert_eq!(
            self.items.len(),
            pre_len + 1,
            "Postcondition violated: len must increase by 1 after lpush"
        );
    }

    pub fn rpush(&mut self, value: String) {
        #[cfg(debug_assertions)]
        let pre_len = self.items.len();

        self.items.push_back(value);

        debug_assert_eq!(
            self.items.len(),
            pre_len + 1,
            "Postcondition violated: len must increase by 1 after rpush"
        );
    }

    pub fn lpop(&mut self) -> Option<String> {
        self.items.pop_front()
    }

    pub fn rpop(&mut self) -> Option<String> {
        self.items.pop_back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// LRANGE - inclusive range, negative indices count from the tail
    pub fn range(&self, start: i64, stop: i64) -> Vec<String> {
        match resolve_range(start, stop, self.items.len()) {
            Some((s, e)) => {
                let out: Vec<String> = self.items.iter().skip(s).take(e - s + 1).cloned().collect();
                debug_assert!(
                    out.len() <= self.items.len(),
                    "Postcondition violated: range cannot exceed list length"
                );
                out
            }
            None => Vec::new(),
        }
    }

    /// LINDEX - element at index
    pub fn get(&self, index: i64) -> Option<&String> {
        resolve_index(index, self.items.len()).and_then(|i| self.items.get(i))
    }

    /// LSET - overwrite the element at index
    pub fn set(&mut self, index: i64, value: String) -> Result<(), &'static str> {
        let idx = resolve_index(index, self.items.len()).ok_or("ERR index out of range")?;
        self.items[idx] = value;
        Ok(())
    }

    /// LTRIM - keep only the inclusive range
    pub fn trim(&mut self, start: i64, stop: i64) {
        match resolve_range(start, stop, self.items.len()) {
            Some((s, e)) => {
                self.items.truncate(e + 1);
                self.items.drain(..s);
                debug_assert_eq!(
                    self.items.len(),
                    e - s + 1,
                    "Postcondition violated: length must equal trimmed range size"
                );
            }
            None => self.items.clear(),
        }
    }

    /// LREM - remove up to |count| occurrences of `value`.
    ///
    /// `count > 0` scans head to tail, `count < 0` tail to head, `0` removes all.
    pub fn remove(&mut self, count: i64, value: &str) -> usize {
        let limit = if count == 0 {
            usize::MAX
        } else {
            count.unsigned_abs() as usize
        };
        let mut removed = 0;

        if count >= 0 {
            let mut i = 0;
            while i < self.items.len() && removed < limit {
                if self.items[i] == value {
                    self.items.remove(i);
                    removed += 1;
                } else {
                    i += 1;
                }
            }
        } else {
            let mut i = self.items.len();
            while i > 0 && removed < limit {
                i -= 1;
                if self.items[i] == value {
                    self.items.remove(i);
                    removed += 1;
                }
            }
        }
        removed
    }

    /// LINSERT - insert next to the first occurrence of `pivot`.
    /// Returns the new length, or `None` if the pivot is absent.
    pub fn insert(&mut self, before: bool, pivot: &str, value: String) -> Option<usize> {
        let pos = self.items.iter().position(|item| item == pivot)?;
        let at = if before { pos } else { pos + 1 };
        self.items.insert(at, value);
        Some(self.items.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.items.iter()
    }
}
