//! List operation tests - push/pop, blocking pops, insert, move

use super::super::InsertOutcome;
use super::client;
use crate::error::Error;
use std::time::Duration;

// ============================================
// Push / pop
// ============================================

#[tokio::test]
async fn test_push_left_reverses_input() {
    let client = client();
    assert_eq!(client.list_push_left("l", &["a", "b", "c"]).await.unwrap(), 3);
    assert_eq!(
        client.list_range("l", 0, -1).await.unwrap(),
        vec!["c", "b", "a"]
    );
}

#[tokio::test]
async fn test_push_right_preserves_input() {
    let client = client();
    client.list_push_right("l", &["a", "b", "c"]).await.unwrap();
    assert_eq!(
        client.list_range("l", 0, -1).await.unwrap(),
        vec!["a", "b", "c"]
    );
    assert_eq!(client.list_range("l", -2, -1).await.unwrap(), vec!["b", "c"]);
    assert!(client.list_range("l", 5, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_push_if_exists_is_noop_on_missing_key() {
    let client = client();
    assert_eq!(client.list_push_left_if_exists("l", "a").await.unwrap(), 0);
    assert_eq!(client.list_push_right_if_exists("l", "a").await.unwrap(), 0);
    assert!(!client.exists("l").await.unwrap());

    client.list_push_right("l", &["x"]).await.unwrap();
    assert_eq!(client.list_push_left_if_exists("l", "a").await.unwrap(), 2);
    assert_eq!(client.list_push_right_if_exists("l", "z").await.unwrap(), 3);
    assert_eq!(
        client.list_range("l", 0, -1).await.unwrap(),
        vec!["a", "x", "z"]
    );
}

#[tokio::test]
async fn test_push_if_exists_rejects_non_list() {
    let client = client();
    client.set("s", "v").await.unwrap();
    assert!(client
        .list_push_left_if_exists("s", "a")
        .await
        .unwrap_err()
        .is_wrong_type());
}

#[tokio::test]
async fn test_pops() {
    let client = client();
    client.list_push_right("l", &["a", "b", "c"]).await.unwrap();
    assert_eq!(client.list_pop_left("l").await.unwrap().as_deref(), Some("a"));
    assert_eq!(client.list_pop_right("l").await.unwrap().as_deref(), Some("c"));
    assert_eq!(client.list_pop_right("l").await.unwrap().as_deref(), Some("b"));
    assert_eq!(client.list_pop_left("l").await.unwrap(), None);
}

// ============================================
// Length and range on wrong types
// ============================================

#[tokio::test]
async fn test_len_is_zero_for_absent_and_wrong_type() {
    let client = client();
    assert_eq!(client.list_len("l").await.unwrap(), 0);
    client.set("s", "v").await.unwrap();
    assert_eq!(client.list_len("s").await.unwrap(), 0);
    assert!(client.list_range("s", 0, -1).await.unwrap_err().is_wrong_type());
}

// ============================================
// Remove / set / trim / index
// ============================================

#[tokio::test]
async fn test_remove_directions() {
    let client = client();
    client
        .list_push_right("l", &["x", "a", "x", "b", "x"])
        .await
        .unwrap();
    assert_eq!(client.list_remove("l", -1, "x").await.unwrap(), 1);
    assert_eq!(
        client.list_range("l", 0, -1).await.unwrap(),
        vec!["x", "a", "x", "b"]
    );
    assert_eq!(client.list_remove("l", 1, "x").await.unwrap(), 1);
    assert_eq!(
        client.list_range("l", 0, -1).await.unwrap(),
        vec!["a", "x", "b"]
    );
    assert_eq!(client.list_remove("l", 0, "x").await.unwrap(), 1);
    assert_eq!(client.list_remove("l", 0, "nope").await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_set_errors() {
    let client = client();
    assert!(matches!(
        client.list_set("l", 0, "v").await,
        Err(Error::NoSuchKey { key }) if key == "l"
    ));

    client.list_push_right("l", &["a", "b"]).await.unwrap();
    assert!(matches!(
        client.list_set("l", 9, "v").await,
        Err(Error::OperationFailed { command: "LSET", .. })
    ));
    client.list_set("l", -1, "z").await.unwrap();
    assert_eq!(client.list_index("l", 1).await.unwrap().as_deref(), Some("z"));
    assert_eq!(client.list_index("l", 2).await.unwrap(), None);
}

#[tokio::test]
async fn test_trim_keeps_inclusive_range() {
    let client = client();
    client
        .list_push_right("l", &["a", "b", "c", "d"])
        .await
        .unwrap();
    client.list_trim("l", 1, -2).await.unwrap();
    assert_eq!(client.list_range("l", 0, -1).await.unwrap(), vec!["b", "c"]);
    client.list_trim("missing", 0, 1).await.unwrap();
}

// ============================================
// Insert
// ============================================

#[tokio::test]
async fn test_insert_outcomes() {
    let client = client();
    assert_eq!(
        client.list_insert_before("l", "p", "v").await.unwrap(),
        InsertOutcome::NoSuchKey
    );
    client.list_push_right("l", &["a", "b"]).await.unwrap();
    assert_eq!(
        client.list_insert_before("l", "zz", "v").await.unwrap(),
        InsertOutcome::PivotNotFound
    );
    assert_eq!(
        client.list_insert_before("l", "b", "mid").await.unwrap(),
        InsertOutcome::Inserted(3)
    );
    assert_eq!(
        client.list_insert_after("l", "b", "end").await.unwrap(),
        InsertOutcome::Inserted(4)
    );
    assert_eq!(
        client.list_range("l", 0, -1).await.unwrap(),
        vec!["a", "mid", "b", "end"]
    );
}

// ============================================
// Move tail to head
// ============================================

#[tokio::test]
async fn test_move_tail_to_head() {
    let client = client();
    client.list_push_right("src", &["a", "b"]).await.unwrap();
    assert_eq!(
        client
            .list_move_tail_to_head("src", "dst")
            .await
            .unwrap()
            .as_deref(),
        Some("b")
    );
    assert_eq!(client.list_range("dst", 0, -1).await.unwrap(), vec!["b"]);
    assert_eq!(client.list_range("src", 0, -1).await.unwrap(), vec!["a"]);
    assert_eq!(client.list_move_tail_to_head("empty", "dst").await.unwrap(), None);
}

#[tokio::test]
async fn test_move_tail_to_head_rotates_same_list() {
    let client = client();
    client.list_push_right("l", &["a", "b", "c"]).await.unwrap();
    client.list_move_tail_to_head("l", "l").await.unwrap();
    assert_eq!(
        client.list_range("l", 0, -1).await.unwrap(),
        vec!["c", "a", "b"]
    );
}

// ============================================
// Blocking pops
// ============================================

#[tokio::test(start_paused = true)]
async fn test_blocking_pop_prefers_earlier_keys() {
    let client = client();
    client.list_push_right("low", &["l1"]).await.unwrap();
    client.list_push_right("high", &["h1"]).await.unwrap();
    let popped = client
        .list_blocking_pop_left(&["high", "low"], Duration::from_secs(1))
        .await
        .unwrap();
    assert_eq!(popped, Some(("high".to_string(), "h1".to_string())));
}

#[tokio::test(start_paused = true)]
async fn test_blocking_pop_times_out() {
    let client = client();
    let start = tokio::time::Instant::now();
    let popped = client
        .list_blocking_pop_right(&["q"], Duration::from_millis(1500))
        .await
        .unwrap();
    assert_eq!(popped, None);
    assert!(start.elapsed() >= Duration::from_millis(1500));
}

#[tokio::test(start_paused = true)]
async fn test_blocking_pop_does_not_block_other_callers() {
    let client = client();
    let waiter = {
        let client = client.clone();
        tokio::spawn(async move {
            client
                .list_blocking_pop_left(&["q"], Duration::ZERO)
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;

    client.set("other", "v").await.unwrap();
    assert_eq!(client.get("other").await.unwrap().as_deref(), Some("v"));
    client.list_push_right("q", &["job"]).await.unwrap();

    let popped = waiter.await.unwrap().unwrap();
    assert_eq!(popped, Some(("q".to_string(), "job".to_string())));
}

#[tokio::test(start_paused = true)]
async fn test_blocking_move_waits_for_source() {
    let client = client();
    let waiter = {
        let client = client.clone();
        tokio::spawn(async move {
            client
                .list_blocking_move_tail_to_head("src", "dst", Duration::from_secs(5))
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    client.list_push_left("src", &["x"]).await.unwrap();

    assert_eq!(waiter.await.unwrap().unwrap().as_deref(), Some("x"));
    assert_eq!(client.list_range("dst", 0, -1).await.unwrap(), vec!["x"]);
}

#[tokio::test]
async fn test_blocking_pop_requires_keys() {
    let client = client();
    assert!(matches!(
        client.list_blocking_pop_left(&[], Duration::ZERO).await,
        Err(Error::InvalidArgument(_))
    ));
}
