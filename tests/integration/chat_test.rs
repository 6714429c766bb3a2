//! Integration tests for chat rooms and message history over REST.

mod helpers;

use axum::http::StatusCode;
use uuid::Uuid;

use helpers::{TestApp, TestUser};

async fn open_room(app: &TestApp, from: &TestUser, to: &TestUser) -> helpers::TestResponse {
    app.request(
        "POST",
        "/api/chat/rooms",
        Some(serde_json::json!({ "receiverId": to.id })),
        Some(&from.access_token),
    )
    .await
}

#[tokio::test]
async fn test_create_room_is_idempotent_per_pair() {
    let Some(app) = TestApp::new().await else { return };
    let alice = app.register_user("alice").await;
    let bob = app.register_user("bob").await;

    let first = open_room(&app, &alice, &bob).await;
    assert_eq!(first.status, StatusCode::CREATED);
    let room_id = first.uuid("/id");

    // Either participant asking again lands in the same room
    let again = open_room(&app, &alice, &bob).await;
    assert_eq!(again.uuid("/id"), room_id);
    let reverse = open_room(&app, &bob, &alice).await;
    assert_eq!(reverse.uuid("/id"), room_id);

    let inbox = app
        .request("GET", "/api/chat/rooms", None, Some(&bob.access_token))
        .await;
    assert_eq!(inbox.status, StatusCode::OK);
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox.body[0]["otherUser"]["id"], alice.id.to_string());
}

#[tokio::test]
async fn test_room_without_opportunity_reuses_any_pair_room() {
    let Some(app) = TestApp::new().await else { return };
    let admin = app.register_admin("admin").await;
    let alice = app.register_user("alice").await;
    let bob = app.register_user("bob").await;
    let category_id = app.create_category(&admin, "Moving").await;
    let opportunity_id = app.create_opportunity(&bob, category_id, "Move piano").await;

    let scoped = app
        .request(
            "POST",
            "/api/chat/rooms",
            Some(serde_json::json!({ "receiverId": bob.id, "opportunityId": opportunity_id })),
            Some(&alice.access_token),
        )
        .await;
    assert_eq!(scoped.status, StatusCode::CREATED);

    let unscoped = open_room(&app, &bob, &alice).await;
    assert_eq!(unscoped.status, StatusCode::CREATED);
    assert_eq!(unscoped.uuid("/id"), scoped.uuid("/id"));

    let inbox = app
        .request("GET", "/api/chat/rooms", None, Some(&alice.access_token))
        .await;
    assert_eq!(inbox.len(), 1);
}

#[tokio::test]
async fn test_create_room_rejects_self_and_unknown_user() {
    let Some(app) = TestApp::new().await else { return };
    let alice = app.register_user("alice").await;

    let own = open_room(&app, &alice, &alice).await;
    assert_eq!(own.status, StatusCode::BAD_REQUEST);

    let ghost = app
        .request(
            "POST",
            "/api/chat/rooms",
            Some(serde_json::json!({ "receiverId": Uuid::new_v4() })),
            Some(&alice.access_token),
        )
        .await;
    assert_eq!(ghost.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_messages_visible_only_to_participants() {
    let Some(app) = TestApp::new().await else { return };
    let alice = app.register_user("alice").await;
    let bob = app.register_user("bob").await;
    let eve = app.register_user("eve").await;
    let room_id = open_room(&app, &alice, &bob).await.uuid("/id");
    let messages_path = format!("/api/chat/rooms/{room_id}/messages");

    for text in ["hello", "are you there?"] {
        let sent = app
            .request(
                "POST",
                &messages_path,
                Some(serde_json::json!({ "content": text })),
                Some(&alice.access_token),
            )
            .await;
        assert_eq!(sent.status, StatusCode::CREATED);
        assert_eq!(sent.body["isRead"], false);
    }

    let history = app
        .request("GET", &messages_path, None, Some(&bob.access_token))
        .await;
    assert_eq!(history.status, StatusCode::OK);
    assert_eq!(history.len(), 2);
    assert_eq!(history.body[0]["content"], "are you there?");
    assert_eq!(history.body[0]["sender"]["id"], alice.id.to_string());

    let limited = app
        .request(
            "GET",
            &format!("{messages_path}?limit=1&offset=1"),
            None,
            Some(&bob.access_token),
        )
        .await;
    assert_eq!(limited.len(), 1);
    assert_eq!(limited.body[0]["content"], "hello");

    let snooping = app
        .request("GET", &messages_path, None, Some(&eve.access_token))
        .await;
    assert_eq!(snooping.status, StatusCode::FORBIDDEN);

    let intruding = app
        .request(
            "POST",
            &messages_path,
            Some(serde_json::json!({ "content": "hi" })),
            Some(&eve.access_token),
        )
        .await;
    assert_eq!(intruding.status, StatusCode::FORBIDDEN);

    let room = app
        .request(
            "GET",
            &format!("/api/chat/rooms/{room_id}"),
            None,
            Some(&eve.access_token),
        )
        .await;
    assert_eq!(room.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_blank_message_rejected() {
    let Some(app) = TestApp::new().await else { return };
    let alice = app.register_user("alice").await;
    let bob = app.register_user("bob").await;
    let room_id = open_room(&app, &alice, &bob).await.uuid("/id");

    let response = app
        .request(
            "POST",
            &format!("/api/chat/rooms/{room_id}/messages"),
            Some(serde_json::json!({ "content": "   " })),
            Some(&alice.access_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mark_as_read() {
    let Some(app) = TestApp::new().await else { return };
    let alice = app.register_user("alice").await;
    let bob = app.register_user("bob").await;
    let room_id = open_room(&app, &alice, &bob).await.uuid("/id");

    let message_id = app
        .request(
            "POST",
            &format!("/api/chat/rooms/{room_id}/messages"),
            Some(serde_json::json!({ "content": "ping" })),
            Some(&alice.access_token),
        )
        .await
        .uuid("/id");

    let read = app
        .request(
            "PATCH",
            &format!("/api/chat/messages/{message_id}/read"),
            None,
            Some(&bob.access_token),
        )
        .await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.body["isRead"], true);

    let missing = app
        .request(
            "PATCH",
            &format!("/api/chat/messages/{}/read", Uuid::new_v4()),
            None,
            Some(&bob.access_token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
