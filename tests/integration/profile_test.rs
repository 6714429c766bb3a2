//! Integration tests for profiles, feedback, portfolio, and uploaded files.

mod helpers;

use axum::http::StatusCode;

use helpers::TestApp;

/// A 1x1 transparent PNG.
const PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

#[tokio::test]
async fn test_update_profile() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.register_user("grace").await;

    let response = app
        .request(
            "PATCH",
            "/api/users/me",
            Some(serde_json::json!({ "city": "Porto", "occupation": "Carpenter" })),
            Some(&user.access_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.string("/city"), "Porto");
    assert_eq!(response.string("/occupation"), "Carpenter");
    assert_eq!(response.string("/name"), "grace");

    let public = app
        .request("GET", &format!("/api/users/{}", user.id), None, None)
        .await;
    assert_eq!(public.status, StatusCode::OK);
    assert!(public.body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_photo_upload_and_serve() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.register_user("heidi").await;

    let rejected = app
        .upload(
            "/api/users/me/photo",
            "notes.txt",
            "text/plain",
            b"hello",
            &[],
            &user.access_token,
        )
        .await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);

    let uploaded = app
        .upload(
            "/api/users/me/photo",
            "me.png",
            "image/png",
            PNG,
            &[],
            &user.access_token,
        )
        .await;
    assert_eq!(uploaded.status, StatusCode::CREATED);
    let photo = uploaded.string("/userPhoto");
    assert!(photo.starts_with("/uploads/"));
    assert!(photo.ends_with(".png"));

    let (status, bytes) = app.get_raw(&photo).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, PNG);

    let cleared = app
        .request("DELETE", "/api/users/me/photo", None, Some(&user.access_token))
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.body["userPhoto"].is_null());

    let (status, _) = app.get_raw(&photo).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_path_traversal_rejected() {
    let Some(app) = TestApp::new().await else { return };

    let (status, _) = app.get_raw("/uploads/../Cargo.toml").await;

    assert_ne!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_feedback_lifecycle_and_rating() {
    let Some(app) = TestApp::new().await else { return };
    let worker = app.register_user("ivan").await;
    let client = app.register_user("judy").await;
    let other = app.register_user("mallory").await;

    let created = app
        .request(
            "POST",
            "/api/feedbacks",
            Some(serde_json::json!({
                "revieweeId": worker.id,
                "rating": 4,
                "comment": "Solid work",
            })),
            Some(&client.access_token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let feedback_id = created.uuid("/id");

    let duplicate = app
        .request(
            "POST",
            "/api/feedbacks",
            Some(serde_json::json!({ "revieweeId": worker.id, "rating": 5 })),
            Some(&client.access_token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let second = app
        .request(
            "POST",
            "/api/feedbacks",
            Some(serde_json::json!({ "revieweeId": worker.id, "rating": 5 })),
            Some(&other.access_token),
        )
        .await;
    assert_eq!(second.status, StatusCode::CREATED);

    let rating = app
        .request("GET", &format!("/api/users/{}/rating", worker.id), None, None)
        .await;
    assert_eq!(rating.status, StatusCode::OK);
    assert_eq!(rating.body["averageRating"], 4.5);
    assert_eq!(rating.body["totalFeedbacks"], 2);

    let hijack = app
        .request(
            "PATCH",
            &format!("/api/feedbacks/{feedback_id}"),
            Some(serde_json::json!({ "rating": 1 })),
            Some(&other.access_token),
        )
        .await;
    assert_eq!(hijack.status, StatusCode::FORBIDDEN);

    let listed = app
        .request("GET", &format!("/api/users/{}/feedbacks", worker.id), None, None)
        .await;
    assert_eq!(listed.len(), 2);
    assert!(listed.body[0]["reviewer"].get("id").is_some());

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/feedbacks/{feedback_id}"),
            None,
            Some(&client.access_token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let stats = app
        .request("GET", &format!("/api/users/{}/stats", worker.id), None, None)
        .await;
    assert_eq!(stats.body["feedbackCount"], 1);
    assert_eq!(stats.body["averageRating"], 5.0);
}

#[tokio::test]
async fn test_feedback_rules() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.register_user("oscar").await;

    let own = app
        .request(
            "POST",
            "/api/feedbacks",
            Some(serde_json::json!({ "revieweeId": user.id, "rating": 5 })),
            Some(&user.access_token),
        )
        .await;
    assert_eq!(own.status, StatusCode::BAD_REQUEST);

    let out_of_range = app
        .request(
            "POST",
            "/api/feedbacks",
            Some(serde_json::json!({ "revieweeId": uuid::Uuid::new_v4(), "rating": 6 })),
            Some(&user.access_token),
        )
        .await;
    assert_eq!(out_of_range.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_portfolio_upload_and_ownership() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.register_user("peggy").await;
    let other = app.register_user("trent").await;

    let uploaded = app
        .upload(
            "/api/portfolio/upload",
            "deck.png",
            "image/png",
            PNG,
            &[("title", "Deck build"), ("description", "Cedar deck")],
            &owner.access_token,
        )
        .await;
    assert_eq!(uploaded.status, StatusCode::CREATED);
    assert_eq!(uploaded.string("/title"), "Deck build");
    let item_id = uploaded.uuid("/id");

    let linked = app
        .request(
            "POST",
            "/api/portfolio",
            Some(serde_json::json!({ "imageUrl": "https://img.example.com/a.jpg" })),
            Some(&owner.access_token),
        )
        .await;
    assert_eq!(linked.status, StatusCode::CREATED);

    let gallery = app
        .request("GET", &format!("/api/users/{}/portfolio", owner.id), None, None)
        .await;
    assert_eq!(gallery.len(), 2);

    let foreign = app
        .request(
            "DELETE",
            &format!("/api/portfolio/{item_id}"),
            None,
            Some(&other.access_token),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::FORBIDDEN);

    let renamed = app
        .request(
            "PATCH",
            &format!("/api/portfolio/{item_id}"),
            Some(serde_json::json!({ "title": "Deck rebuild" })),
            Some(&owner.access_token),
        )
        .await;
    assert_eq!(renamed.string("/title"), "Deck rebuild");

    let removed = app
        .request(
            "DELETE",
            &format!("/api/portfolio/{item_id}"),
            None,
            Some(&owner.access_token),
        )
        .await;
    assert_eq!(removed.status, StatusCode::OK);

    let gallery = app
        .request("GET", &format!("/api/users/{}/portfolio", owner.id), None, None)
        .await;
    assert_eq!(gallery.len(), 1);
}
