use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use canvass_api::auth::jwt::{generate_access_token, JwtConfig};
use canvass_api::config::{RewardProviderConfig, ServerConfig};
use canvass_api::rewards::RewardClient;
use canvass_api::router::build_app_router;
use canvass_api::state::AppState;
use canvass_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults and a known JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        rewards: RewardProviderConfig {
            // Unroutable on purpose; redemption tests never reach it.
            endpoint: "http://127.0.0.1:1/redeem".to_string(),
            max_attempts: 1,
            retry_delay_ms: 1,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        rewards: Arc::new(RewardClient::new(&config.rewards)),
    };
    build_app_router(state, &config)
}

/// Insert a user row and mint a matching access token.
pub async fn seed_user(pool: &PgPool, email: &str, role: &str) -> (i64, String) {
    let user = UserRepo::create(pool, email, "Test User", role)
        .await
        .expect("user insert should succeed");
    let token = generate_access_token(user.id, role, &test_config().jwt)
        .expect("token generation should succeed");
    (user.id, token)
}

/// Send a request with an optional bearer token and JSON body.
async fn request(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("request should succeed")
}

/// GET with a bearer token.
pub async fn get(app: Router, path: &str, token: &str) -> Response {
    request(app, Method::GET, path, Some(token), None).await
}

/// GET without authentication.
pub async fn get_unauthed(app: Router, path: &str) -> Response {
    request(app, Method::GET, path, None, None).await
}

/// POST a JSON body with a bearer token.
pub async fn post_json(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    request(app, Method::POST, path, Some(token), Some(body)).await
}

/// POST a JSON body without authentication.
pub async fn post_json_unauthed(app: Router, path: &str, body: serde_json::Value) -> Response {
    request(app, Method::POST, path, None, Some(body)).await
}

/// PATCH a JSON body with a bearer token.
pub async fn patch_json(
    app: Router,
    path: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    request(app, Method::PATCH, path, Some(token), Some(body)).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Assert status and return the parsed body in one step.
pub async fn expect_json(response: Response, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
