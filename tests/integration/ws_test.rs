//! Integration tests for the WebSocket chat channel.
//!
//! These run the app on a real listener so the upgrade handshake happens.

mod helpers;

use std::net::SocketAddr;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use helpers::{TestApp, TestUser};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn serve(app: &TestApp) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local addr");
    let router = app.router.clone();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

async fn connect(addr: SocketAddr, user: &TestUser) -> Socket {
    let url = format!("ws://{addr}/chat?token={}", user.access_token);
    let (socket, _) = tokio_tungstenite::connect_async(url)
        .await
        .expect("WebSocket handshake failed");
    socket
}

async fn send(socket: &mut Socket, frame: Value) {
    socket
        .send(Message::Text(frame.to_string().into()))
        .await
        .expect("Failed to send frame");
}

/// Next JSON text frame, skipping control frames.
async fn next_event(socket: &mut Socket) -> Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), socket.next())
            .await
            .expect("Timed out waiting for a frame")
            .expect("Socket closed")
            .expect("Socket error");
        if let Message::Text(text) = frame {
            return serde_json::from_str(text.as_str()).expect("Frame is not JSON");
        }
    }
}

/// Round-trip an unknown event. Frames on one connection are handled in
/// order, so once the error reply arrives everything sent before it is done.
async fn sync(socket: &mut Socket) {
    send(socket, json!({ "event": "sync", "data": null })).await;
    let reply = next_event(socket).await;
    assert_eq!(reply["event"], "error", "Unexpected frame: {reply}");
}

#[tokio::test]
async fn test_ws_upgrade_without_token() {
    let Some(app) = TestApp::new().await else { return };
    let addr = serve(&app).await;

    let result = tokio_tungstenite::connect_async(format!("ws://{addr}/chat")).await;

    match result {
        Err(tungstenite::Error::Http(response)) => assert_eq!(response.status(), 401),
        Err(e) => panic!("Expected 401 handshake failure, got {e}"),
        Ok(_) => panic!("Handshake succeeded without a token"),
    }
}

#[tokio::test]
async fn test_ws_upgrade_with_bad_token() {
    let Some(app) = TestApp::new().await else { return };
    let addr = serve(&app).await;

    let result = tokio_tungstenite::connect_async(format!("ws://{addr}/chat?token=garbage")).await;

    assert!(matches!(result, Err(tungstenite::Error::Http(_))));
}

#[tokio::test]
async fn test_room_created_pushed_to_receiver() {
    let Some(app) = TestApp::new().await else { return };
    let addr = serve(&app).await;
    let alice = app.register_user("alice").await;
    let bob = app.register_user("bob").await;

    let mut bob_ws = connect(addr, &bob).await;
    sync(&mut bob_ws).await;

    let room = app
        .request(
            "POST",
            "/api/chat/rooms",
            Some(json!({ "receiverId": bob.id })),
            Some(&alice.access_token),
        )
        .await;

    let event = next_event(&mut bob_ws).await;
    assert_eq!(event["event"], "roomCreated");
    assert_eq!(event["data"]["id"], room.body["id"]);
}

#[tokio::test]
async fn test_messages_fan_out_to_joined_sockets() {
    let Some(app) = TestApp::new().await else { return };
    let addr = serve(&app).await;
    let alice = app.register_user("alice").await;
    let bob = app.register_user("bob").await;
    let room_id = app
        .request(
            "POST",
            "/api/chat/rooms",
            Some(json!({ "receiverId": bob.id })),
            Some(&alice.access_token),
        )
        .await
        .uuid("/id");

    let mut alice_ws = connect(addr, &alice).await;
    let mut bob_ws = connect(addr, &bob).await;
    for ws in [&mut alice_ws, &mut bob_ws] {
        send(ws, json!({ "event": "joinRoom", "data": room_id })).await;
        sync(ws).await;
    }

    // Over the socket
    send(
        &mut alice_ws,
        json!({ "event": "sendMessage", "data": { "roomId": room_id, "content": "hi bob" } }),
    )
    .await;

    for ws in [&mut alice_ws, &mut bob_ws] {
        let event = next_event(ws).await;
        assert_eq!(event["event"], "newMessage");
        assert_eq!(event["data"]["content"], "hi bob");
        assert_eq!(event["data"]["sender"]["id"], alice.id.to_string());
    }

    // Over REST, still pushed to the room
    let sent = app
        .request(
            "POST",
            &format!("/api/chat/rooms/{room_id}/messages"),
            Some(json!({ "content": "hey alice" })),
            Some(&bob.access_token),
        )
        .await;
    assert_eq!(sent.status, axum::http::StatusCode::CREATED);

    let event = next_event(&mut alice_ws).await;
    assert_eq!(event["event"], "newMessage");
    assert_eq!(event["data"]["content"], "hey alice");

    // Both messages were stored
    let history = app
        .request(
            "GET",
            &format!("/api/chat/rooms/{room_id}/messages"),
            None,
            Some(&alice.access_token),
        )
        .await;
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn test_outsider_cannot_join_or_send() {
    let Some(app) = TestApp::new().await else { return };
    let addr = serve(&app).await;
    let alice = app.register_user("alice").await;
    let bob = app.register_user("bob").await;
    let eve = app.register_user("eve").await;
    let room_id = app
        .request(
            "POST",
            "/api/chat/rooms",
            Some(json!({ "receiverId": bob.id })),
            Some(&alice.access_token),
        )
        .await
        .uuid("/id");

    let mut eve_ws = connect(addr, &eve).await;

    send(&mut eve_ws, json!({ "event": "joinRoom", "data": room_id })).await;
    let event = next_event(&mut eve_ws).await;
    assert_eq!(event, json!({ "event": "error", "data": { "message": "Cannot join room" } }));

    send(
        &mut eve_ws,
        json!({ "event": "sendMessage", "data": { "roomId": room_id, "content": "boo" } }),
    )
    .await;
    let event = next_event(&mut eve_ws).await;
    assert_eq!(event["data"]["message"], "Failed to send message");

    let history = app
        .request(
            "GET",
            &format!("/api/chat/rooms/{room_id}/messages"),
            None,
            Some(&alice.access_token),
        )
        .await;
    assert_eq!(history.len(), 0);
}
