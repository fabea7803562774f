//! Account routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::transactions::TransactionResponse;
use crate::{AppState, error::ApiError, error::ApiResult, middleware::AuthUser};
use fintrack_core::account::{validate_account_name, validate_initial_balance};
use fintrack_db::AccountRepository;
use fintrack_db::entities::accounts;
use fintrack_db::repositories::UpdateAccountInput;
use fintrack_shared::types::money_str;

/// Creates the account routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route(
            "/accounts/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Account name.
    pub name: String,
    /// Opening balance, defaults to zero.
    #[serde(default)]
    pub initial_balance: Decimal,
}

/// Request body for updating an account.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    /// New name.
    pub name: Option<String>,
    /// New opening balance.
    pub initial_balance: Option<Decimal>,
}

/// Account in API responses.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: i32,
    /// Account name.
    pub name: String,
    /// Opening balance.
    #[serde(with = "money_str")]
    pub initial_balance: Decimal,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<accounts::Model> for AccountResponse {
    fn from(model: accounts::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            initial_balance: model.initial_balance,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Account with balance and history.
#[derive(Debug, Serialize)]
pub struct AccountDetailResponse {
    /// The account.
    #[serde(flatten)]
    pub account: AccountResponse,
    /// Opening balance plus income minus expenses.
    #[serde(with = "money_str")]
    pub current_balance: Decimal,
    /// Transactions, newest first.
    pub transactions: Vec<TransactionResponse>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /accounts
async fn list_accounts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<AccountResponse>>> {
    let accounts = AccountRepository::new((*state.db).clone())
        .list(auth.user_id())
        .await?;

    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}

/// POST /accounts
async fn create_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateAccountRequest>,
) -> ApiResult<impl IntoResponse> {
    let name = validate_account_name(&payload.name)?;
    let initial_balance = validate_initial_balance(payload.initial_balance)?;

    let account = AccountRepository::new((*state.db).clone())
        .create(auth.user_id(), name, initial_balance)
        .await?;

    info!(user_id = auth.user_id(), account_id = account.id, "Account created");
    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// GET /accounts/{id} - Account with current balance and transactions.
async fn get_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<AccountDetailResponse>> {
    let detail = AccountRepository::new((*state.db).clone())
        .find_with_transactions(auth.user_id(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Account not found: {id}")))?;

    Ok(Json(AccountDetailResponse {
        account: detail.account.into(),
        current_balance: detail.current_balance,
        transactions: detail
            .transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect(),
    }))
}

/// PUT /accounts/{id}
async fn update_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAccountRequest>,
) -> ApiResult<Json<AccountResponse>> {
    let input = UpdateAccountInput {
        name: payload
            .name
            .as_deref()
            .map(validate_account_name)
            .transpose()?,
        initial_balance: payload
            .initial_balance
            .map(validate_initial_balance)
            .transpose()?,
    };

    let account = AccountRepository::new((*state.db).clone())
        .update(auth.user_id(), id, input)
        .await?;

    info!(user_id = auth.user_id(), account_id = id, "Account updated");
    Ok(Json(account.into()))
}

/// DELETE /accounts/{id} - Removes the account and its transactions.
async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    AccountRepository::new((*state.db).clone())
        .delete(auth.user_id(), id)
        .await?;

    info!(user_id = auth.user_id(), account_id = id, "Account deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::{access_token, disconnected_state, json_body, send};

    #[tokio::test]
    async fn test_list_requires_token() {
        let state = disconnected_state();
        let response = send(&state, "GET", "/api/v1/accounts", None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let state = disconnected_state();
        let token = access_token(&state, 1);
        let response = send(
            &state,
            "POST",
            "/api/v1/accounts",
            Some(&token),
            Some(json!({ "name": "   ", "initial_balance": "10.00" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_update_rejects_fractional_cents() {
        let state = disconnected_state();
        let token = access_token(&state, 1);
        let response = send(
            &state,
            "PUT",
            "/api/v1/accounts/1",
            Some(&token),
            Some(json!({ "initial_balance": "0.001" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_rejects_balance_beyond_column() {
        let state = disconnected_state();
        let token = access_token(&state, 1);
        let response = send(
            &state,
            "POST",
            "/api/v1/accounts",
            Some(&token),
            Some(json!({ "name": "Vault", "initial_balance": "100000000000000000000.00" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "validation_error");
    }
}
