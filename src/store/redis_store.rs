//! Redis-server store.
//!
//! Non-blocking commands share one multiplexed connection. Blocking pops get
//! a dedicated connection each, so a long wait never stalls other callers and
//! dropping the future closes the socket, which abandons the wait
//! server-side.

use super::{Command, RespValue, Store, StoreError, StoreResult};
use futures::future::BoxFuture;
use redis::aio::MultiplexedConnection;
use redis::{Client as RedisClient, RedisError, Value};
use tracing::{debug, info};

pub struct RedisStore {
    client: RedisClient,
    shared: MultiplexedConnection,
}

impl RedisStore {
    /// Connect to `url` (e.g. `redis://127.0.0.1:6379/0`).
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let client = RedisClient::open(url).map_err(transport_error)?;
        let shared = client
            .get_multiplexed_async_connection()
            .await
            .map_err(transport_error)?;
        info!(url, "connected to redis");
        Ok(RedisStore { client, shared })
    }

    async fn run(&self, cmd: &Command) -> StoreResult<RespValue> {
        let mut request = redis::cmd(cmd.name());
        for arg in cmd.args() {
            request.arg(arg);
        }

        let result: Result<Value, RedisError> = if cmd.is_blocking() {
            let mut dedicated = self
                .client
                .get_multiplexed_async_connection()
                .await
                .map_err(transport_error)?;
            debug!(command = cmd.name(), "opened dedicated connection for blocking command");
            request.query_async(&mut dedicated).await
        } else {
            let mut conn = self.shared.clone();
            request.query_async(&mut conn).await
        };

        match result {
            Ok(value) => to_resp(value),
            Err(e) => server_reply(e),
        }
    }
}

impl Store for RedisStore {
    fn execute<'a>(&'a self, cmd: &'a Command) -> BoxFuture<'a, StoreResult<RespValue>> {
        Box::pin(self.run(cmd))
    }
}

fn transport_error(e: RedisError) -> StoreError {
    StoreError::Io(e.to_string())
}

/// Server-side rejections become `RespValue::Error` so the typed layer can
/// classify them; anything without an error code is a transport failure.
fn server_reply(e: RedisError) -> StoreResult<RespValue> {
    match e.code() {
        Some(code) => {
            let message = match e.detail() {
                Some(detail) => format!("{} {}", code, detail),
                None => code.to_string(),
            };
            Ok(RespValue::Error(message))
        }
        None => Err(transport_error(e)),
    }
}

fn to_resp(value: Value) -> StoreResult<RespValue> {
    Ok(match value {
        Value::Nil => RespValue::BulkString(None),
        Value::Int(n) => RespValue::Integer(n),
        Value::BulkString(bytes) => RespValue::BulkString(Some(bytes)),
        Value::SimpleString(s) => RespValue::SimpleString(s),
        Value::Okay => RespValue::ok(),
        Value::Array(items) | Value::Set(items) => RespValue::Array(Some(
            items
                .into_iter()
                .map(to_resp)
                .collect::<StoreResult<Vec<_>>>()?,
        )),
        Value::Map(pairs) => {
            let mut flat = Vec::with_capacity(pairs.len() * 2);
            for (k, v) in pairs {
                flat.push(to_resp(k)?);
                flat.push(to_resp(v)?);
            }
            RespValue::Array(Some(flat))
        }
        Value::Boolean(b) => RespValue::Integer(i64::from(b)),
        Value::Double(d) => RespValue::BulkString(Some(d.to_string().into_bytes())),
        other => {
            return Err(StoreError::Protocol(format!(
                "unsupported reply shape: {:?}",
                other
            )))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_conversion() {
        assert_eq!(to_resp(Value::Nil).unwrap(), RespValue::nil());
        assert_eq!(to_resp(Value::Okay).unwrap(), RespValue::ok());
        assert_eq!(
            to_resp(Value::Array(vec![
                Value::BulkString(b"k".to_vec()),
                Value::Int(3)
            ]))
            .unwrap(),
            RespValue::Array(Some(vec![RespValue::bulk("k"), RespValue::Integer(3)]))
        );
        assert_eq!(
            to_resp(Value::Map(vec![(
                Value::BulkString(b"f".to_vec()),
                Value::BulkString(b"v".to_vec())
            )]))
            .unwrap(),
            RespValue::bulk_array(["f", "v"])
        );
    }
}
