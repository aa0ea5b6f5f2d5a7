//! Typed access layer over a Redis-style key-value store.
//!
//! Every operation returns a closed outcome: a value, absence (`Ok(None)` or
//! an empty collection), or an `Error` that says whether the key held the
//! wrong type, did not exist, or the store refused the operation outright.
//!
//! ```no_run
//! # async fn demo() -> redis_typed::Result<()> {
//! let client = redis_typed::Client::in_memory();
//! client.list_push_left("jobs", &["a", "b"]).await?;
//! assert_eq!(client.list_pop_left("jobs").await?, Some("b".to_string()));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod key_type;
pub mod list_dst;
pub mod reply;
pub mod store;

pub use client::{Client, FieldWrite, InsertOutcome, Ttl};
pub use config::{Backend, ClientConfig};
pub use error::{Error, Result};
pub use key_type::KeyType;
pub use store::{MemoryStore, Store, StoreError};
#[cfg(feature = "redis-backend")]
pub use store::RedisStore;
