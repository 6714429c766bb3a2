//! Shared test helpers for integration tests.
//!
//! Tests run against the PostgreSQL database named by
//! `FINDIT_TEST_DATABASE_URL`. When the variable is unset every test
//! returns early, so the suite stays green on machines without a database.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use findit_api::AppState;
use findit_core::config::AppConfig;
use findit_core::config::app::ServerConfig;
use findit_core::config::auth::AuthConfig;
use findit_core::config::database::DatabaseConfig;
use findit_core::config::logging::LoggingConfig;
use findit_core::config::realtime::RealtimeConfig;
use findit_core::config::upload::UploadConfig;
use findit_database::DatabasePool;

/// Environment variable holding the test database URL.
pub const TEST_DATABASE_ENV: &str = "FINDIT_TEST_DATABASE_URL";

/// Password used for every test account.
pub const PASSWORD: &str = "password123";

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// The state behind the router
    pub state: AppState,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Upload directory, removed on drop
    _upload_dir: TempDir,
}

/// A registered test account.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl TestApp {
    /// Create a new test application, or `None` when no test database is configured.
    pub async fn new() -> Option<Self> {
        let Ok(url) = std::env::var(TEST_DATABASE_ENV) else {
            eprintln!("{TEST_DATABASE_ENV} not set, skipping");
            return None;
        };

        let upload_dir = TempDir::new().expect("Failed to create upload dir");
        let config = test_config(url, &upload_dir);

        let db_pool = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database")
            .into_pool();

        findit_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        let state = findit_api::build_state(config, db_pool.clone())
            .await
            .expect("Failed to build state");
        let router = findit_api::build_app(state.clone());

        Some(Self {
            router,
            state,
            db_pool,
            _upload_dir: upload_dir,
        })
    }

    /// Register a fresh account with a unique email.
    pub async fn register_user(&self, name: &str) -> TestUser {
        let email = unique_email(name);
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": PASSWORD,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );

        TestUser {
            id: response.uuid("/user/id"),
            email,
            access_token: response.string("/accessToken"),
            refresh_token: response.string("/refreshToken"),
        }
    }

    /// Register an account, promote it to admin, and log in again so the
    /// token carries the flag.
    pub async fn register_admin(&self, name: &str) -> TestUser {
        let user = self.register_user(name).await;

        sqlx::query("UPDATE users SET is_admin = TRUE WHERE id = $1")
            .bind(user.id)
            .execute(&self.db_pool)
            .await
            .expect("Failed to promote admin");

        self.login(&user.email).await
    }

    /// Login and return the account with its new tokens.
    pub async fn login(&self, email: &str) -> TestUser {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": PASSWORD })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        TestUser {
            id: response.uuid("/user/id"),
            email: email.to_string(),
            access_token: response.string("/accessToken"),
            refresh_token: response.string("/refreshToken"),
        }
    }

    /// Create a category through the admin API.
    ///
    /// Name and slug both carry a random suffix so reruns against the same
    /// database never collide on the unique columns.
    pub async fn create_category(&self, admin: &TestUser, name: &str) -> Uuid {
        let suffix = short_id();
        let response = self
            .request(
                "POST",
                "/api/categories",
                Some(serde_json::json!({
                    "name": format!("{name} {suffix}"),
                    "slug": format!("{}-{suffix}", name.to_lowercase()),
                })),
                Some(&admin.access_token),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create category failed: {:?}",
            response.body
        );
        response.uuid("/id")
    }

    /// Post an opportunity owned by `owner`.
    pub async fn create_opportunity(&self, owner: &TestUser, category_id: Uuid, title: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/opportunities",
                Some(serde_json::json!({
                    "title": title,
                    "description": "Looking for help",
                    "categoryId": category_id,
                    "priceMin": 100.0,
                    "priceMax": 250.0,
                    "city": "Lisbon",
                    "country": "Portugal",
                })),
                Some(&owner.access_token),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create opportunity failed: {:?}",
            response.body
        );
        response.uuid("/id")
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload a single file as `multipart/form-data` with extra text fields.
    pub async fn upload(
        &self,
        path: &str,
        file_name: &str,
        content_type: &str,
        content: &[u8],
        fields: &[(&str, &str)],
        token: &str,
    ) -> TestResponse {
        let boundary = "findit-test-boundary";
        let mut body = Vec::new();

        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .header("Authorization", format!("Bearer {}", token))
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Fetch a path and return the raw body bytes.
    pub async fn get_raw(&self, path: &str) -> (StatusCode, Vec<u8>) {
        let req = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        (status, bytes.to_vec())
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// String at a JSON pointer.
    pub fn string(&self, pointer: &str) -> String {
        self.body
            .pointer(pointer)
            .and_then(Value::as_str)
            .unwrap_or_else(|| panic!("No string at {pointer}: {:?}", self.body))
            .to_string()
    }

    /// UUID at a JSON pointer.
    pub fn uuid(&self, pointer: &str) -> Uuid {
        self.string(pointer)
            .parse()
            .unwrap_or_else(|_| panic!("No uuid at {pointer}: {:?}", self.body))
    }

    /// Length of the top-level JSON array.
    pub fn len(&self) -> usize {
        self.body
            .as_array()
            .unwrap_or_else(|| panic!("Body is not an array: {:?}", self.body))
            .len()
    }

    /// The `message` field of an error envelope.
    pub fn message(&self) -> String {
        self.string("/message")
    }
}

fn test_config(database_url: String, upload_dir: &TempDir) -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: database_url,
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 10,
            idle_timeout_seconds: 60,
        },
        auth: AuthConfig::with_secret("integration-test-secret"),
        upload: UploadConfig {
            directory: upload_dir.path().to_string_lossy().into_owned(),
            ..UploadConfig::default()
        },
        realtime: RealtimeConfig::default(),
        logging: LoggingConfig::default(),
    }
}

/// An email no other test run has used.
pub fn unique_email(name: &str) -> String {
    format!("{}-{}@test.findit.dev", name.to_lowercase(), Uuid::new_v4().simple())
}

fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}
