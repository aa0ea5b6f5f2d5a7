//! In-process store.
//!
//! `MemoryStore` wraps a `CommandExecutor` behind a lock, the same way a
//! shared server state would, and layers blocking list pops on top with a
//! `Notify`. Time comes from `tokio::time`, so paused-clock tests can
//! drive both expiry and blocking timeouts.

pub mod data;
mod executor;

pub use executor::CommandExecutor;

use super::{Command, RespValue, Store, StoreResult};
use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::debug;

/// Seed used by `MemoryStore::new`.
pub const DEFAULT_SEED: u64 = 0x5eed;

struct Shared {
    executor: Mutex<CommandExecutor>,
    /// Signalled after every command that can feed a blocked pop
    list_pushed: Notify,
}

#[derive(Clone)]
pub struct MemoryStore {
    shared: Arc<Shared>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Store whose random choices (SPOP, SRANDMEMBER) replay for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        MemoryStore {
            shared: Arc::new(Shared {
                executor: Mutex::new(CommandExecutor::new(seed)),
                list_pushed: Notify::new(),
            }),
        }
    }

    pub fn with_lock<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CommandExecutor) -> R,
    {
        let mut executor = self.shared.executor.lock();
        executor.set_time(Instant::now());
        f(&mut executor)
    }

    pub fn key_count(&self) -> usize {
        self.with_lock(|executor| executor.key_count())
    }

    fn execute_now(&self, cmd: &Command) -> RespValue {
        let reply = self.with_lock(|executor| executor.execute(cmd));
        if cmd.wakes_list_waiters() && !matches!(reply, RespValue::Error(_)) {
            self.shared.list_pushed.notify_waiters();
        }
        reply
    }

    /// Retry a blocking pop until it yields data or the deadline passes.
    ///
    /// The `Notified` future is created before each attempt so a push that
    /// lands between the attempt and the await is not missed.
    async fn execute_blocking(&self, cmd: &Command) -> RespValue {
        let deadline = cmd
            .block_timeout()
            .filter(|t| !t.is_zero())
            .map(|t| Instant::now() + t);

        loop {
            let notified = self.shared.list_pushed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            let reply = self.execute_now(cmd);
            if !reply.is_nil() {
                return reply;
            }

            debug!(command = cmd.name(), key = ?cmd.primary_key(), "blocking until list data arrives");
            match deadline {
                Some(deadline) => {
                    if tokio::time::timeout_at(deadline, notified).await.is_err() {
                        debug!(command = cmd.name(), "blocking wait timed out");
                        return reply;
                    }
                }
                None => notified.await,
            }
        }
    }
}

impl Store for MemoryStore {
    fn execute<'a>(&'a self, cmd: &'a Command) -> BoxFuture<'a, StoreResult<RespValue>> {
        Box::pin(async move {
            if cmd.is_blocking() {
                Ok(self.execute_blocking(cmd).await)
            } else {
                Ok(self.execute_now(cmd))
            }
        })
    }
}
