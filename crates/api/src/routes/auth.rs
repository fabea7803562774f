//! Authentication routes for register, login, and token refresh.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use tracing::info;

use crate::{AppState, error::ApiError, error::ApiResult};
use fintrack_core::auth::{hash_password, normalize_email, validate_registration, verify_password};
use fintrack_db::UserRepository;
use fintrack_shared::auth::{
    LoginRequest, RefreshRequest, RegisterRequest, TokenKind, TokenPair, TokenSubject, UserInfo,
};
use fintrack_shared::AppError;

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Invalid email or password")
}

/// POST /auth/register - Register a new user.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let (email, user_name) =
        validate_registration(&payload.email, &payload.user_name, &payload.password)?;

    let user_repo = UserRepository::new((*state.db).clone());
    if user_repo.email_exists(&email).await? {
        return Err(AppError::Conflict("An account with this email already exists".to_string()).into());
    }

    let password_hash = hash_password(&payload.password)?;
    let user = user_repo.create(&email, &user_name, &password_hash).await?;

    info!(user_id = user.id, "New user registered");

    Ok((
        StatusCode::CREATED,
        Json(UserInfo {
            id: user.id,
            email: user.email,
            user_name: user.user_name,
        }),
    ))
}

/// POST /auth/login - Authenticate user and return a token pair.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<TokenPair>> {
    let email = normalize_email(&payload.email);
    if email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation("Email and password are required"));
    }

    let user_repo = UserRepository::new((*state.db).clone());
    let Some(user) = user_repo.find_by_email(&email).await? else {
        info!("Login attempt for unknown email");
        return Err(invalid_credentials());
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        info!(user_id = user.id, "Failed login attempt - invalid password");
        return Err(invalid_credentials());
    }

    let pair = state.jwt_service.issue_pair(&TokenSubject {
        user_id: user.id,
        name: user.user_name,
        email: user.email,
    })?;

    info!(user_id = user.id, "User logged in");
    Ok(Json(pair))
}

/// POST /auth/refresh - Exchange a refresh token for a new token pair.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> ApiResult<Json<TokenPair>> {
    let claims = state
        .jwt_service
        .validate_kind(&payload.refresh_token, TokenKind::Refresh)?;

    let user_repo = UserRepository::new((*state.db).clone());
    let Some(user) = user_repo.find_by_id(claims.user_id()).await? else {
        return Err(ApiError::unauthorized("User no longer exists"));
    };

    let pair = state.jwt_service.issue_pair(&TokenSubject {
        user_id: user.id,
        name: user.user_name,
        email: user.email,
    })?;

    Ok(Json(pair))
}
