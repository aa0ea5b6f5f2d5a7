//! The Store boundary.
//!
//! A `Store` executes one primitive `Command` per call and answers with a raw
//! `RespValue`. Server-side rejections (`WRONGTYPE`, `ERR ...`) come back as
//! `RespValue::Error` replies; only transport failures are `StoreError`s.
//!
//! Two implementations ship with the crate:
//!
//! - `RedisStore` (feature `redis-backend`): a Redis server reached through
//!   the `redis` crate.
//! - `MemoryStore`: an in-process command processor with the same semantics,
//!   used by tests and demos.

mod command;
pub mod memory;
#[cfg(feature = "redis-backend")]
mod redis_store;
mod resp;

pub use command::{Command, InsertPosition};
pub use memory::MemoryStore;
#[cfg(feature = "redis-backend")]
pub use redis_store::RedisStore;
pub use resp::{RespValue, WRONGTYPE_MESSAGE, WRONGTYPE_PREFIX};

use futures::future::BoxFuture;

/// Transport-level failure talking to the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Connection could not be established or broke mid-call
    #[error("store I/O error: {0}")]
    Io(String),
    /// The store answered with something that is not a valid reply
    #[error("store protocol error: {0}")]
    Protocol(String),
    /// The store has been shut down
    #[error("store is closed")]
    Closed,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A key-value store that executes primitive commands.
///
/// Implementations must keep each command atomic store-side. Blocking
/// commands (`Command::is_blocking`) may suspend the returned future, but
/// must not hold up commands issued by other callers in the meantime, and
/// dropping the future must abandon the wait.
pub trait Store: Send + Sync + 'static {
    fn execute<'a>(&'a self, cmd: &'a Command) -> BoxFuture<'a, StoreResult<RespValue>>;
}
