//! Integration tests for categories and opportunities.

mod helpers;

use axum::http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_category_mutations_require_admin() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.register_user("plain").await;

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(serde_json::json!({ "name": "Nope", "slug": "nope" })),
            Some(&user.access_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.message(), "Admin access required");
}

#[tokio::test]
async fn test_inactive_category_hidden_from_default_list() {
    let Some(app) = TestApp::new().await else { return };
    let admin = app.register_admin("admin").await;
    let category_id = app.create_category(&admin, "Gardening").await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/categories/{category_id}"),
            Some(serde_json::json!({ "isActive": false })),
            Some(&admin.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["isActive"], false);

    let active = app.request("GET", "/api/categories", None, None).await;
    assert_eq!(active.status, StatusCode::OK);
    let listed = |body: &serde_json::Value| {
        body.as_array()
            .map(|items| items.iter().any(|c| c["id"] == category_id.to_string()))
            .unwrap_or(false)
    };
    assert!(!listed(&active.body));

    let all = app.request("GET", "/api/categories?all=true", None, None).await;
    assert!(listed(&all.body));

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/categories/{category_id}"),
            None,
            Some(&admin.access_token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let missing = app
        .request("GET", &format!("/api/categories/{category_id}"), None, None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_uuid_path() {
    let Some(app) = TestApp::new().await else { return };

    let response = app
        .request("GET", "/api/opportunities/not-a-uuid", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_opportunity_search_by_category() {
    let Some(app) = TestApp::new().await else { return };
    let admin = app.register_admin("admin").await;
    let owner = app.register_user("poster").await;
    let category_id = app.create_category(&admin, "Plumbing").await;

    let slug = app
        .request("GET", &format!("/api/categories/{category_id}"), None, None)
        .await
        .string("/slug");

    app.create_opportunity(&owner, category_id, "Fix sink").await;
    app.create_opportunity(&owner, category_id, "Fix shower").await;

    let search = app
        .request(
            "GET",
            &format!("/api/opportunities?category={slug}&sort=price_asc"),
            None,
            None,
        )
        .await;
    assert_eq!(search.status, StatusCode::OK);
    assert_eq!(search.len(), 2);
    assert_eq!(search.body[0]["category"]["slug"], slug);
    assert_eq!(search.body[0]["user"]["id"], owner.id.to_string());

    let count = app
        .request(
            "GET",
            &format!("/api/opportunities/count?category={slug}"),
            None,
            None,
        )
        .await;
    assert_eq!(count.status, StatusCode::OK);
    assert_eq!(count.body["count"], 2);

    let bad_rating = app
        .request("GET", "/api/opportunities?minRating=9", None, None)
        .await;
    assert_eq!(bad_rating.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_category_slug_is_ignored() {
    let Some(app) = TestApp::new().await else { return };
    let admin = app.register_admin("admin").await;
    let owner = app.register_user("poster").await;
    let category_id = app.create_category(&admin, "Carpentry").await;
    app.create_opportunity(&owner, category_id, "Build shelf").await;

    let search = app
        .request("GET", "/api/opportunities?category=no-such-category-slug", None, None)
        .await;
    assert_eq!(search.status, StatusCode::OK);
    assert!(search.len() > 0);

    let count = app
        .request(
            "GET",
            "/api/opportunities/count?category=no-such-category-slug",
            None,
            None,
        )
        .await;
    assert_eq!(count.status, StatusCode::OK);
    assert!(count.body["count"].as_i64().unwrap_or(0) > 0);
}

#[tokio::test]
async fn test_inverted_price_filter_is_accepted() {
    let Some(app) = TestApp::new().await else { return };

    let search = app
        .request("GET", "/api/opportunities?priceMin=500&priceMax=100", None, None)
        .await;
    assert_eq!(search.status, StatusCode::OK);
    assert_eq!(search.len(), 0);

    let negative = app
        .request("GET", "/api/opportunities?priceMin=-1", None, None)
        .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_opportunity_owner_rules() {
    let Some(app) = TestApp::new().await else { return };
    let admin = app.register_admin("admin").await;
    let owner = app.register_user("owner").await;
    let stranger = app.register_user("stranger").await;
    let category_id = app.create_category(&admin, "Tutoring").await;
    let id = app.create_opportunity(&owner, category_id, "Math lessons").await;
    let slug = app
        .request("GET", &format!("/api/categories/{category_id}"), None, None)
        .await
        .string("/slug");
    let in_category = format!("/api/opportunities?category={slug}");

    let forbidden = app
        .request(
            "PATCH",
            &format!("/api/opportunities/{id}"),
            Some(serde_json::json!({ "title": "Hijacked" })),
            Some(&stranger.access_token),
        )
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let updated = app
        .request(
            "PATCH",
            &format!("/api/opportunities/{id}"),
            Some(serde_json::json!({ "title": "Physics lessons", "status": "in_progress" })),
            Some(&owner.access_token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.string("/title"), "Physics lessons");
    assert_eq!(updated.string("/status"), "in_progress");

    let detail = app
        .request("GET", &format!("/api/opportunities/{id}"), None, None)
        .await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["user"]["id"], owner.id.to_string());

    let mine = app
        .request("GET", "/api/opportunities/user/me", None, Some(&owner.access_token))
        .await;
    assert_eq!(mine.len(), 1);

    let before = app.request("GET", &in_category, None, None).await;
    assert_eq!(before.len(), 1);

    // Admins may delete any posting
    let deleted = app
        .request(
            "DELETE",
            &format!("/api/opportunities/{id}"),
            None,
            Some(&admin.access_token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app
        .request("GET", &format!("/api/opportunities/{id}"), None, None)
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let listed = app
        .request("GET", &format!("/api/opportunities/user/{}", owner.id), None, None)
        .await;
    assert_eq!(listed.len(), 0);

    let search = app.request("GET", &in_category, None, None).await;
    assert_eq!(search.status, StatusCode::OK);
    assert_eq!(search.len(), 0);

    // The row is kept for audit, only flagged
    let (is_deleted,): (bool,) = sqlx::query_as("SELECT is_deleted FROM opportunities WHERE id = $1")
        .bind(id)
        .fetch_one(&app.db_pool)
        .await
        .expect("Soft-deleted row should remain");
    assert!(is_deleted);
}

#[tokio::test]
async fn test_complete_opportunity_counts_for_worker() {
    let Some(app) = TestApp::new().await else { return };
    let admin = app.register_admin("admin").await;
    let owner = app.register_user("client").await;
    let worker = app.register_user("worker").await;
    let category_id = app.create_category(&admin, "Painting").await;
    let id = app.create_opportunity(&owner, category_id, "Paint fence").await;

    let not_owner = app
        .request(
            "PATCH",
            &format!("/api/opportunities/{id}/complete"),
            Some(serde_json::json!({ "completedByUserId": worker.id })),
            Some(&worker.access_token),
        )
        .await;
    assert_eq!(not_owner.status, StatusCode::FORBIDDEN);

    let completed = app
        .request(
            "PATCH",
            &format!("/api/opportunities/{id}/complete"),
            Some(serde_json::json!({ "completedByUserId": worker.id })),
            Some(&owner.access_token),
        )
        .await;
    assert_eq!(completed.status, StatusCode::OK);
    assert_eq!(completed.string("/status"), "completed");

    let stats = app
        .request("GET", &format!("/api/users/{}/stats", worker.id), None, None)
        .await;
    assert_eq!(stats.status, StatusCode::OK);
    assert_eq!(stats.body["completedJobs"], 1);
}
