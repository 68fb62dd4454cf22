//! Realtime Relay Tests
//!
//! Each test serves the router on an ephemeral port and talks to it with
//! real WebSocket clients.

use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{
    body_json, connect_ws, next_event, next_event_within, send_chat, send_raw, TestApp,
};

#[tokio::test]
async fn test_two_clients_both_receive_message_and_it_is_stored() {
    let app = TestApp::new();
    let addr = app.spawn().await;
    let mut alice = connect_ws(addr).await;
    let mut bob = connect_ws(addr).await;
    app.wait_for_sessions(2).await;

    send_chat(&mut alice, "A", "hello").await;

    let expected = json!({"username": "A", "message": "hello"});
    let to_alice = next_event(&mut alice).await.expect("sender gets its own message");
    let to_bob = next_event(&mut bob).await.expect("other client gets the message");
    assert_eq!(to_alice.event, "chat message");
    assert_eq!(to_alice.data, expected);
    assert_eq!(to_bob.event, "chat message");
    assert_eq!(to_bob.data, expected);

    let listed = body_json(app.get("/api/messages").await).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["username"], "A");
    assert_eq!(listed[0]["message"], "hello");
}

#[tokio::test]
async fn test_broadcast_carries_payload_without_stored_fields() {
    let app = TestApp::new();
    let addr = app.spawn().await;
    let mut client = connect_ws(addr).await;
    app.wait_for_sessions(1).await;

    send_chat(&mut client, "a", "hi").await;

    let event = next_event(&mut client).await.unwrap();
    assert!(event.data.get("id").is_none());
    assert!(event.data.get("createdAt").is_none());
}

#[tokio::test]
async fn test_concurrent_senders_get_their_own_payloads() {
    let app = TestApp::new();
    let addr = app.spawn().await;
    let mut alice = connect_ws(addr).await;
    let mut bob = connect_ws(addr).await;
    app.wait_for_sessions(2).await;

    let (_, _) = tokio::join!(
        send_chat(&mut alice, "alice", "from alice"),
        send_chat(&mut bob, "bob", "from bob"),
    );

    let mut seen_by_alice = Vec::new();
    for _ in 0..2 {
        seen_by_alice.push(next_event(&mut alice).await.unwrap().data);
    }
    seen_by_alice.sort_by_key(|data| data["username"].as_str().unwrap().to_owned());

    assert_eq!(
        seen_by_alice,
        vec![
            json!({"username": "alice", "message": "from alice"}),
            json!({"username": "bob", "message": "from bob"}),
        ]
    );
    app.wait_for_stored(2).await;
}

#[tokio::test]
async fn test_same_payload_twice_stores_two_records() {
    let app = TestApp::new();
    let addr = app.spawn().await;
    let mut client = connect_ws(addr).await;
    app.wait_for_sessions(1).await;

    send_chat(&mut client, "a", "hi").await;
    send_chat(&mut client, "a", "hi").await;
    next_event(&mut client).await.unwrap();
    next_event(&mut client).await.unwrap();

    app.wait_for_stored(2).await;
    let listed = body_json(app.get("/api/messages").await).await;
    let listed = listed.as_array().unwrap();
    assert_ne!(listed[0]["id"], listed[1]["id"]);
}

#[tokio::test]
async fn test_rest_created_message_is_not_broadcast() {
    let app = TestApp::new();
    let addr = app.spawn().await;
    let mut client = connect_ws(addr).await;
    app.wait_for_sessions(1).await;

    let response = app
        .post_json("/api/messages", r#"{"username": "a", "message": "quiet"}"#)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert!(next_event_within(&mut client, Duration::from_millis(200))
        .await
        .is_none());
}

#[tokio::test]
async fn test_invalid_payload_gets_error_only_to_sender() {
    let app = TestApp::new();
    let addr = app.spawn().await;
    let mut sender = connect_ws(addr).await;
    let mut other = connect_ws(addr).await;
    app.wait_for_sessions(2).await;

    send_raw(
        &mut sender,
        json!({"event": "chat message", "data": {"username": "a"}}).to_string(),
    )
    .await;

    let event = next_event(&mut sender).await.unwrap();
    assert_eq!(event.event, "error");
    assert!(next_event_within(&mut other, Duration::from_millis(200))
        .await
        .is_none());
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_store_failure_sends_server_error_and_no_broadcast() {
    let app = TestApp::with_unavailable_store();
    let addr = app.spawn().await;
    let mut sender = connect_ws(addr).await;
    let mut other = connect_ws(addr).await;
    app.wait_for_sessions(2).await;

    send_chat(&mut sender, "a", "hi").await;

    let event = next_event(&mut sender).await.unwrap();
    assert_eq!(event.event, "error");
    assert_eq!(event.data, json!({"message": "Server Error"}));
    assert!(next_event_within(&mut other, Duration::from_millis(200))
        .await
        .is_none());
}

#[tokio::test]
async fn test_unknown_events_and_garbage_are_ignored() {
    let app = TestApp::new();
    let addr = app.spawn().await;
    let mut client = connect_ws(addr).await;
    app.wait_for_sessions(1).await;

    send_raw(&mut client, "not json".into()).await;
    send_raw(&mut client, json!({"event": "typing", "data": {}}).to_string()).await;
    send_chat(&mut client, "a", "still here").await;

    let event = next_event(&mut client).await.unwrap();
    assert_eq!(event.data["message"], "still here");
}

#[tokio::test]
async fn test_disconnect_unregisters_session() {
    let app = TestApp::new();
    let addr = app.spawn().await;
    let mut stays = connect_ws(addr).await;
    let leaves = connect_ws(addr).await;
    app.wait_for_sessions(2).await;

    drop(leaves);
    app.wait_for_sessions(1).await;

    send_chat(&mut stays, "a", "anyone?").await;
    assert!(next_event(&mut stays).await.is_some());
}
