//! Deterministic simulation testing for list operations
//!
//! Seeded harness that drives the typed list API over a `MemoryStore` and
//! mirrors every operation on a `VecDeque` model:
//! - Deterministic random operation generation (ChaCha8)
//! - Return values and full list contents checked after each operation
//! - Seed-based reproducibility for debugging

use crate::client::{Client, InsertOutcome};
use crate::error::Error;
use crate::store::MemoryStore;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use std::sync::Arc;

/// Keys the harness works on; moves go between them.
const KEYS: [&str; 2] = ["dst:list:a", "dst:list:b"];

#[derive(Debug, Clone)]
pub struct ListDSTConfig {
    pub seed: u64,
    /// Number of distinct element values
    pub num_values: usize,
    /// Weight of pops (vs pushes)
    pub pop_prob: f64,
    /// Weight of in-place edits (set, insert, remove)
    pub edit_prob: f64,
    /// Weight of trims
    pub trim_prob: f64,
    /// Weight of tail-to-head moves
    pub move_prob: f64,
}

impl Default for ListDSTConfig {
    fn default() -> Self {
        ListDSTConfig {
            seed: 0,
            num_values: 20,
            pop_prob: 0.25,
            edit_prob: 0.15,
            trim_prob: 0.03,
            move_prob: 0.1,
        }
    }
}

impl ListDSTConfig {
    pub fn new(seed: u64) -> Self {
        ListDSTConfig {
            seed,
            ..Default::default()
        }
    }

    /// Lots of push/pop, lists hover near empty
    pub fn high_churn(seed: u64) -> Self {
        ListDSTConfig {
            seed,
            num_values: 8,
            pop_prob: 0.45,
            edit_prob: 0.05,
            trim_prob: 0.02,
            move_prob: 0.1,
        }
    }

    /// Mostly set / insert / remove / move
    pub fn edit_heavy(seed: u64) -> Self {
        ListDSTConfig {
            seed,
            num_values: 5,
            pop_prob: 0.1,
            edit_prob: 0.4,
            trim_prob: 0.05,
            move_prob: 0.2,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ListOp {
    Push { key: usize, left: bool, values: Vec<String> },
    Pop { key: usize, left: bool },
    Set { key: usize, index: i64, value: String },
    Insert { key: usize, before: bool, pivot: String, value: String },
    Remove { key: usize, count: i64, value: String },
    Trim { key: usize, start: i64, stop: i64 },
    Move { source: usize, dest: usize },
}

#[derive(Debug, Clone)]
pub struct ListDSTResult {
    pub seed: u64,
    pub total_operations: u64,
    pub pushes: u64,
    pub pops: u64,
    pub edits: u64,
    pub trims: u64,
    pub moves: u64,
    pub invariant_violations: Vec<String>,
    pub last_op: Option<ListOp>,
}

impl ListDSTResult {
    pub fn new(seed: u64) -> Self {
        ListDSTResult {
            seed,
            total_operations: 0,
            pushes: 0,
            pops: 0,
            edits: 0,
            trims: 0,
            moves: 0,
            invariant_violations: Vec::new(),
            last_op: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.invariant_violations.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "Seed {}: {} ops (push:{}, pop:{}, edit:{}, trim:{}, move:{}), {} violations",
            self.seed,
            self.total_operations,
            self.pushes,
            self.pops,
            self.edits,
            self.trims,
            self.moves,
            self.invariant_violations.len()
        )
    }
}

/// Resolve an inclusive range the way LRANGE/LTRIM do.
fn model_range(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
    if start > stop || start >= len || stop < 0 {
        None
    } else {
        Some((start as usize, stop as usize))
    }
}

pub struct ListDSTHarness {
    config: ListDSTConfig,
    rng: ChaCha8Rng,
    client: Client,
    model: [VecDeque<String>; 2],
    result: ListDSTResult,
}

impl ListDSTHarness {
    pub fn new(config: ListDSTConfig) -> Self {
        ListDSTHarness {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            client: Client::new(Arc::new(MemoryStore::with_seed(config.seed))),
            result: ListDSTResult::new(config.seed),
            model: [VecDeque::new(), VecDeque::new()],
            config,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(ListDSTConfig::new(seed))
    }

    fn random_value(&mut self) -> String {
        format!("value:{}", self.rng.gen_range(0..self.config.num_values))
    }

    fn random_index(&mut self, key: usize) -> i64 {
        // Indices deliberately overshoot both ends
        let len = self.model[key].len() as i64;
        self.rng.gen_range(-(len + 2)..=len + 1)
    }

    fn next_op(&mut self) -> ListOp {
        let key = self.rng.gen_range(0..KEYS.len());
        let left = self.rng.gen_bool(0.5);
        let roll: f64 = self.rng.gen();

        let mut threshold = self.config.trim_prob;
        if roll < threshold {
            let start = self.random_index(key);
            let stop = self.random_index(key);
            return ListOp::Trim { key, start, stop };
        }
        threshold += self.config.move_prob;
        if roll < threshold {
            let dest = self.rng.gen_range(0..KEYS.len());
            return ListOp::Move { source: key, dest };
        }
        threshold += self.config.edit_prob;
        if roll < threshold {
            let value = self.random_value();
            return match self.rng.gen_range(0..3) {
                0 => ListOp::Set {
                    key,
                    index: self.random_index(key),
                    value,
                },
                1 => ListOp::Insert {
                    key,
                    before: left,
                    pivot: self.random_value(),
                    value,
                },
                _ => ListOp::Remove {
                    key,
                    count: self.rng.gen_range(-2..=2),
                    value,
                },
            };
        }
        threshold += self.config.pop_prob;
        if roll < threshold {
            return ListOp::Pop { key, left };
        }
        let n = self.rng.gen_range(1..=3);
        let values = (0..n).map(|_| self.random_value()).collect();
        ListOp::Push { key, left, values }
    }

    async fn apply(&mut self, op: &ListOp) -> Result<(), String> {
        match op {
            ListOp::Push { key, left, values } => {
                self.result.pushes += 1;
                let refs: Vec<&str> = values.iter().map(String::as_str).collect();
                let len = if *left {
                    self.client.list_push_left(KEYS[*key], &refs).await
                } else {
                    self.client.list_push_right(KEYS[*key], &refs).await
                }
                .map_err(|e| e.to_string())?;
                for v in values {
                    if *left {
                        self.model[*key].push_front(v.clone());
                    } else {
                        self.model[*key].push_back(v.clone());
                    }
                }
                expect_eq("push length", len, self.model[*key].len() as u64)
            }
            ListOp::Pop { key, left } => {
                self.result.pops += 1;
                let got = if *left {
                    self.client.list_pop_left(KEYS[*key]).await
                } else {
                    self.client.list_pop_right(KEYS[*key]).await
                }
                .map_err(|e| e.to_string())?;
                let expected = if *left {
                    self.model[*key].pop_front()
                } else {
                    self.model[*key].pop_back()
                };
                expect_eq("popped element", got, expected)
            }
            ListOp::Set { key, index, value } => {
                self.result.edits += 1;
                let got = self.client.list_set(KEYS[*key], *index, value).await;
                let len = self.model[*key].len() as i64;
                let resolved = if *index < 0 { len + index } else { *index };
                match got {
                    Ok(()) if (0..len).contains(&resolved) => {
                        self.model[*key][resolved as usize] = value.clone();
                        Ok(())
                    }
                    Err(Error::NoSuchKey { .. }) if len == 0 => Ok(()),
                    Err(Error::OperationFailed { .. }) if !(0..len).contains(&resolved) => Ok(()),
                    other => Err(format!("list_set({}) gave {:?} on len {}", index, other, len)),
                }
            }
            ListOp::Insert {
                key,
                before,
                pivot,
                value,
            } => {
                self.result.edits += 1;
                let got = if *before {
                    self.client.list_insert_before(KEYS[*key], pivot, value).await
                } else {
                    self.client.list_insert_after(KEYS[*key], pivot, value).await
                }
                .map_err(|e| e.to_string())?;
                let list = &mut self.model[*key];
                let expected = if list.is_empty() {
                    InsertOutcome::NoSuchKey
                } else {
                    match list.iter().position(|v| v == pivot) {
                        Some(pos) => {
                            list.insert(if *before { pos } else { pos + 1 }, value.clone());
                            InsertOutcome::Inserted(list.len() as u64)
                        }
                        None => InsertOutcome::PivotNotFound,
                    }
                };
                expect_eq("insert outcome", got, expected)
            }
            ListOp::Remove { key, count, value } => {
                self.result.edits += 1;
                let got = self
                    .client
                    .list_remove(KEYS[*key], *count, value)
                    .await
                    .map_err(|e| e.to_string())?;
                let list = &mut self.model[*key];
                let limit = if *count == 0 { usize::MAX } else { count.unsigned_abs() as usize };
                let mut positions: Vec<usize> = list
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| *v == value)
                    .map(|(i, _)| i)
                    .collect();
                if *count < 0 {
                    positions.reverse();
                }
                positions.truncate(limit);
                positions.sort_unstable_by(|a, b| b.cmp(a));
                for i in &positions {
                    list.remove(*i);
                }
                expect_eq("removed count", got, positions.len() as u64)
            }
            ListOp::Trim { key, start, stop } => {
                self.result.trims += 1;
                self.client
                    .list_trim(KEYS[*key], *start, *stop)
                    .await
                    .map_err(|e| e.to_string())?;
                let list = &mut self.model[*key];
                match model_range(list.len(), *start, *stop) {
                    Some((s, e)) => {
                        list.truncate(e + 1);
                        list.drain(..s);
                    }
                    None => list.clear(),
                }
                Ok(())
            }
            ListOp::Move { source, dest } => {
                self.result.moves += 1;
                let got = self
                    .client
                    .list_move_tail_to_head(KEYS[*source], KEYS[*dest])
                    .await
                    .map_err(|e| e.to_string())?;
                let expected = self.model[*source].pop_back();
                if let Some(v) = &expected {
                    self.model[*dest].push_front(v.clone());
                }
                expect_eq("moved element", got, expected)
            }
        }
    }

    async fn check_invariants(&self) -> Result<(), String> {
        for (key, model) in KEYS.iter().zip(self.model.iter()) {
            let actual = self
                .client
                .list_range(key, 0, -1)
                .await
                .map_err(|e| e.to_string())?;
            if actual.iter().ne(model.iter()) {
                return Err(format!(
                    "{} contents mismatch: actual={:?}, model={:?}",
                    key, actual, model
                ));
            }
            let len = self.client.list_len(key).await.map_err(|e| e.to_string())?;
            expect_eq("list_len", len, model.len() as u64)?;
            // Drained lists must vanish from the keyspace
            let exists = self.client.exists(key).await.map_err(|e| e.to_string())?;
            expect_eq("exists", exists, !model.is_empty())?;
        }
        Ok(())
    }

    async fn run_single_op(&mut self) {
        let op = self.next_op();
        self.result.total_operations += 1;
        let outcome = match self.apply(&op).await {
            Ok(()) => self.check_invariants().await,
            Err(e) => Err(e),
        };
        if let Err(violation) = outcome {
            self.result.invariant_violations.push(format!(
                "Op #{}: {:?} - {}",
                self.result.total_operations, op, violation
            ));
        }
        self.result.last_op = Some(op);
    }

    pub async fn run(&mut self, operations: usize) {
        for _ in 0..operations {
            self.run_single_op().await;
            if !self.result.invariant_violations.is_empty() {
                break;
            }
        }
    }

    pub fn result(&self) -> &ListDSTResult {
        &self.result
    }
}

fn expect_eq<T: PartialEq + std::fmt::Debug>(what: &str, actual: T, expected: T) -> Result<(), String> {
    if actual == expected {
        Ok(())
    } else {
        Err(format!(
            "{} mismatch: actual={:?}, expected={:?}",
            what, actual, expected
        ))
    }
}

/// Run a batch of seeds, one harness each
pub async fn run_list_batch(
    start_seed: u64,
    num_seeds: usize,
    ops_per_seed: usize,
    config_fn: fn(u64) -> ListDSTConfig,
) -> Vec<ListDSTResult> {
    let mut results = Vec::with_capacity(num_seeds);
    for i in 0..num_seeds {
        let mut harness = ListDSTHarness::new(config_fn(start_seed + i as u64));
        harness.run(ops_per_seed).await;
        results.push(harness.result().clone());
    }
    results
}

pub fn summarize_list_batch(results: &[ListDSTResult]) -> String {
    let total = results.len();
    let passed = results.iter().filter(|r| r.is_success()).count();
    let total_ops: u64 = results.iter().map(|r| r.total_operations).sum();

    let mut summary = format!(
        "List DST Summary\n\
         ================\n\
         Seeds: {} total, {} passed, {} failed\n\
         Total operations: {}\n",
        total,
        passed,
        total - passed,
        total_ops
    );

    for result in results.iter().filter(|r| !r.is_success()) {
        summary.push_str(&format!("  {}\n", result.summary()));
        for violation in &result.invariant_violations {
            summary.push_str(&format!("    - {}\n", violation));
        }
    }

    summary
}
