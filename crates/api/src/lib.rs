//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Authentication middleware
//! - JSON error responses

pub mod error;
pub mod middleware;
pub mod routes;

pub use error::{ApiError, ApiResult};

use axum::Router;
use fintrack_core::category::CategoryCache;
use fintrack_shared::JwtService;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Category lookup cache; writers invalidate their entry.
    pub category_cache: CategoryCache,
    /// Upper bound on request handling time.
    pub request_timeout: Duration,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TimeoutLayer::new(state.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        body::Body,
        http::{Request, Response, header::AUTHORIZATION},
    };
    use http_body_util::BodyExt;
    use sea_orm::DatabaseConnection;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    use fintrack_core::category::CategoryCache;
    use fintrack_shared::{JwtConfig, JwtService, TokenSubject};

    use crate::{AppState, create_router};

    /// State over the given connection with a fixed test secret.
    pub fn state_with(db: DatabaseConnection) -> AppState {
        AppState {
            db: Arc::new(db),
            jwt_service: Arc::new(JwtService::new(JwtConfig {
                secret: "test-secret-key-for-testing".to_string(),
                ..JwtConfig::default()
            })),
            category_cache: CategoryCache::new(),
            request_timeout: Duration::from_secs(5),
        }
    }

    /// State whose database is never reachable.
    pub fn disconnected_state() -> AppState {
        state_with(DatabaseConnection::default())
    }

    pub fn subject(user_id: i32) -> TokenSubject {
        TokenSubject {
            user_id,
            name: "tester".to_string(),
            email: "tester@example.com".to_string(),
        }
    }

    pub fn access_token(state: &AppState, user_id: i32) -> String {
        state
            .jwt_service
            .generate_access_token(&subject(user_id))
            .unwrap()
    }

    pub async fn send(
        state: &AppState,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        create_router(state.clone()).oneshot(request).await.unwrap()
    }

    pub async fn json_body(response: Response<Body>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }
}
