//! Value types held by the in-process store
//!
//! - `Value`: union of every value shape a key can hold
//! - `StoreList`: double-ended list (LPUSH/RPUSH/LPOP/RPOP/LINSERT/LREM)
//! - `StoreSet`: unordered set of unique members
//! - `StoreHash`: field-value table

mod hash;
mod list;
mod set;
mod value;

pub use hash::StoreHash;
pub use list::StoreList;
pub use set::StoreSet;
pub use value::Value;
