//! Central module for assembling the application's HTTP surface.
//!
//! `app_router` mounts the user routes and injects the shared `AppState`;
//! `main` and the end-to-end tests both build the app through it.

pub mod common;

use crate::auth;
use crate::state::AppState;
use axum::{Extension, Router, response::Json, routing::get};
use serde_json::{Value, json};

/// Builds the full application router around `state`.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .nest("/api/users", auth::routes::user_router())
        .layer(Extension(state))
}

async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": "Jobboard Backend",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::service::tests::{test_state, unavailable_state};
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_with_token(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn signup_body(username: &str, password: &str) -> Value {
        json!({
            "name": "test user",
            "username": username,
            "password": password,
            "phone_number": "1234567890",
            "gender": "male",
            "date_of_birth": "2000-01-01",
            "membership_status": "active",
            "bio": "test bio",
            "address": "test address",
            "profile_picture": "test picture",
        })
    }

    async fn app() -> Router {
        let (state, _) = test_state().await;
        app_router(state)
    }

    #[tokio::test]
    async fn test_signup_verify_login_flow() {
        let app = app().await;

        let (status, body) = send(
            &app,
            post_json("/api/users/signup", signup_body("alice", "pw123456")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["username"], "alice");
        assert!(body["user"].get("password").is_none());
        assert!(body["user"].get("password_hash").is_none());
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) = send(&app, get_with_token("/api/users/verify", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["username"], "alice");

        let (status, body) = send(
            &app,
            post_json("/api/users/login", json!({"username": "alice", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid username or password");

        let (status, body) = send(
            &app,
            post_json("/api/users/login", json!({"username": "alice", "password": "pw123456"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].is_string());
        assert_eq!(body["user"]["username"], "alice");
    }

    #[tokio::test]
    async fn test_duplicate_signup() {
        let app = app().await;

        let (status, _) = send(
            &app,
            post_json("/api/users/signup", signup_body("bob", "pw123456")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            &app,
            post_json("/api/users/signup", signup_body("bob", "pw123456")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "duplicate_username");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_signup_missing_fields() {
        let app = app().await;

        let (status, body) = send(
            &app,
            post_json("/api/users/signup", json!({"username": "", "password": "short"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_type"], "validation_error");

        let request = Request::builder()
            .method("POST")
            .uri("/api/users/signup")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let app = app().await;

        let (status, body) = send(
            &app,
            post_json(
                "/api/users/login",
                json!({"username": "notfound", "password": "password123"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid username or password");
    }

    #[tokio::test]
    async fn test_verify_header_handling() {
        let app = app().await;

        let (status, _) = send(&app, get_with_token("/api/users/verify", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let basic = Request::builder()
            .uri("/api/users/verify")
            .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, basic).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) =
            send(&app, get_with_token("/api/users/verify", Some("garbage.token.value"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_list_users_requires_auth() {
        let app = app().await;

        let (status, body) = send(&app, get_with_token("/api/users", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Request is not authorized");

        let (_, body) = send(
            &app,
            post_json("/api/users/signup", signup_body("testuser", "testpassword")),
        )
        .await;
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) = send(&app, get_with_token("/api/users", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        let users = body.as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert!(users[0].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_store_outage_is_a_server_error() {
        let state = unavailable_state();
        let token = state.tokens.issue("someone").unwrap();
        let app = app_router(state);

        let responses = [
            send(&app, post_json("/api/users/signup", signup_body("alice", "pw123456"))).await,
            send(
                &app,
                post_json("/api/users/login", json!({"username": "alice", "password": "pw123456"})),
            )
            .await,
            send(&app, get_with_token("/api/users/verify", Some(&token))).await,
            send(&app, get_with_token("/api/users", Some(&token))).await,
        ];

        for (status, body) in responses {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body["error"], "Internal server error");
            assert_eq!(body["error_type"], "internal_error");
            let text = body.to_string().to_lowercase();
            assert!(!text.contains("timed out"), "leaked: {}", text);
            assert!(!text.contains("pool"), "leaked: {}", text);
        }
    }

    #[tokio::test]
    async fn test_root_banner() {
        let app = app().await;

        let (status, body) = send(&app, get_with_token("/", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "Jobboard Backend");
    }
}
