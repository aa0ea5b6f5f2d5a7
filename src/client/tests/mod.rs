//! Client tests over the in-process store, one file per family.

mod hash_tests;
mod list_tests;

use super::Client;

fn client() -> Client {
    Client::in_memory()
}
