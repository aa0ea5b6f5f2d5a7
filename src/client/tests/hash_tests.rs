//! Hash operation tests

use super::super::FieldWrite;
use super::client;
use crate::error::Error;
use crate::key_type::KeyType;
use std::collections::HashMap;

#[tokio::test]
async fn test_hash_set_get_delete() {
    let client = client();
    assert_eq!(
        client.hash_set("h", "f", "x").await.unwrap(),
        FieldWrite::Created
    );
    assert_eq!(
        client.hash_set("h", "f", "y").await.unwrap(),
        FieldWrite::Overwritten
    );
    assert_eq!(client.hash_get("h", "f").await.unwrap().as_deref(), Some("y"));
    assert_eq!(client.hash_delete("h", &["f"]).await.unwrap(), 1);
    assert_eq!(client.hash_get("h", "f").await.unwrap(), None);
    assert_eq!(client.type_of("h").await.unwrap(), KeyType::None);
}

#[tokio::test]
async fn test_hash_set_if_absent() {
    let client = client();
    assert!(client.hash_set_if_absent("h", "f", "1").await.unwrap());
    assert!(!client.hash_set_if_absent("h", "f", "2").await.unwrap());
    assert_eq!(client.hash_get("h", "f").await.unwrap().as_deref(), Some("1"));
}

#[tokio::test]
async fn test_hash_multi_set_merges_fields() {
    let client = client();
    client.hash_set("h", "keep", "k").await.unwrap();
    client
        .hash_multi_set("h", &[("a", "1"), ("keep", "k2")])
        .await
        .unwrap();

    let all = client.hash_get_all("h").await.unwrap();
    let expected: HashMap<String, String> = [("a", "1"), ("keep", "k2")]
        .into_iter()
        .map(|(f, v)| (f.to_string(), v.to_string()))
        .collect();
    assert_eq!(all, expected);
    assert_eq!(client.hash_len("h").await.unwrap(), 2);
}

#[tokio::test]
async fn test_hash_multi_set_rejects_non_hash() {
    let client = client();
    client.set("s", "v").await.unwrap();
    let err = client.hash_multi_set("s", &[("f", "v")]).await.unwrap_err();
    assert!(err.is_wrong_type());
    assert_eq!(client.get("s").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn test_hash_reads_on_missing_key() {
    let client = client();
    assert!(client.hash_get_all("h").await.unwrap().is_empty());
    assert!(client.hash_keys("h").await.unwrap().is_empty());
    assert!(client.hash_values("h").await.unwrap().is_empty());
    assert_eq!(client.hash_len("h").await.unwrap(), 0);
    assert!(!client.hash_field_exists("h", "f").await.unwrap());
    assert_eq!(
        client.hash_multi_get("h", &["a", "b"]).await.unwrap(),
        vec![None, None]
    );
    assert_eq!(client.hash_delete("h", &["f"]).await.unwrap(), 0);
}

#[tokio::test]
async fn test_hash_multi_get_aligns_with_fields() {
    let client = client();
    client
        .hash_multi_set("h", &[("a", "1"), ("c", "3")])
        .await
        .unwrap();
    assert_eq!(
        client.hash_multi_get("h", &["c", "b", "a"]).await.unwrap(),
        vec![Some("3".to_string()), None, Some("1".to_string())]
    );
}

#[tokio::test]
async fn test_hash_keys_and_values_pair_up() {
    let client = client();
    client
        .hash_multi_set("h", &[("a", "1"), ("b", "2"), ("c", "3")])
        .await
        .unwrap();
    let mut keys = client.hash_keys("h").await.unwrap();
    let mut values = client.hash_values("h").await.unwrap();
    keys.sort();
    values.sort();
    assert_eq!(keys, vec!["a", "b", "c"]);
    assert_eq!(values, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_hash_increment_by() {
    let client = client();
    assert_eq!(client.hash_increment_by("h", "n", 5).await.unwrap(), 5);
    assert_eq!(client.hash_increment_by("h", "n", -7).await.unwrap(), -2);

    client.hash_set("h", "word", "abc").await.unwrap();
    assert!(matches!(
        client.hash_increment_by("h", "word", 1).await,
        Err(Error::OperationFailed { .. })
    ));
    assert_eq!(
        client.hash_get("h", "word").await.unwrap().as_deref(),
        Some("abc")
    );
}
