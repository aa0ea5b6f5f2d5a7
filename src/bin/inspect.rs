//! Inspect keys through the typed layer.
//!
//! Usage: `redis-typed-inspect <key> [key ...]`
//!
//! The store is chosen by `REDIS_TYPED_BACKEND` / `REDIS_URL` (see
//! `ClientConfig::from_env`). Log verbosity follows `RUST_LOG`.

use redis_typed::{Client, ClientConfig, KeyType, Ttl};
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn describe(client: &Client, key: &str) -> redis_typed::Result<String> {
    let key_type = client.type_of(key).await?;
    let size = match key_type {
        KeyType::None => return Ok(format!("{:<24} (absent)", key)),
        KeyType::String => format!("{} bytes", client.str_len(key).await?),
        KeyType::List => format!("{} elements", client.list_len(key).await?),
        KeyType::Set => format!("{} members", client.set_cardinality(key).await?),
        KeyType::Hash => format!("{} fields", client.hash_len(key).await?),
        KeyType::SortedSet => "-".to_string(),
    };
    let ttl = match client.ttl(key).await? {
        Some(Ttl::Expires(left)) => format!("expires in {:.1}s", left.as_secs_f64()),
        Some(Ttl::Persistent) | None => "persistent".to_string(),
    };
    Ok(format!("{:<24} {:<6} {:<16} {}", key, key_type, size, ttl))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let keys: Vec<String> = std::env::args().skip(1).collect();
    if keys.is_empty() {
        eprintln!("usage: redis-typed-inspect <key> [key ...]");
        std::process::exit(2);
    }

    let config = ClientConfig::from_env();
    info!(backend = ?config.backend, url = %config.url, "connecting");
    let client = config.connect().await?;

    for key in &keys {
        println!("{}", describe(&client, key).await?);
    }

    Ok(())
}
