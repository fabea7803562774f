//! Transaction routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiError, error::ApiResult, middleware::AuthUser};
use fintrack_core::reports::MonthPeriod;
use fintrack_core::transaction::{TransactionKind, validate_amount, validate_title};
use fintrack_db::TransactionRepository;
use fintrack_db::repositories::{CreateTransactionInput, TransactionRow, UpdateTransactionInput};
use fintrack_shared::types::{PageRequest, PageResponse, money_str};

use super::reports::{PeriodQuery, validate_period};

/// Creates the transaction routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/transactions/month", get(list_month))
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Restrict to one account.
    pub account_id: Option<i32>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// Request body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Display title.
    pub title: String,
    /// Income or expense.
    pub transaction_type: TransactionKind,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Category.
    pub category_id: i32,
    /// Account.
    pub account_id: i32,
}

/// Request body for updating a transaction. An absent title is kept.
#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    /// New title.
    pub title: Option<String>,
    /// Income or expense.
    pub transaction_type: TransactionKind,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Category.
    pub category_id: i32,
    /// Account.
    pub account_id: i32,
}

/// Transaction in API responses.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: i32,
    /// Display title.
    pub title: String,
    /// Income or expense.
    pub transaction_type: TransactionKind,
    /// Amount.
    #[serde(with = "money_str")]
    pub amount: Decimal,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Category ID.
    pub category_id: i32,
    /// Category title, null once the category is deleted.
    pub category_title: Option<String>,
    /// Account ID.
    pub account_id: i32,
    /// Account name.
    pub account_name: String,
}

impl From<TransactionRow> for TransactionResponse {
    fn from(row: TransactionRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            transaction_type: row.transaction_type.into(),
            amount: row.amount,
            created_at: row.created_at.into(),
            category_id: row.category_id,
            category_title: row.category_title,
            account_id: row.account_id,
            account_name: row.account_name,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /transactions - Paginated list, newest first.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> ApiResult<Json<PageResponse<TransactionResponse>>> {
    let page = PageRequest::from_query(query.page, query.per_page);
    let result = TransactionRepository::new((*state.db).clone())
        .list(auth.user_id(), query.account_id, &page)
        .await?;

    Ok(Json(PageResponse {
        data: result.data.into_iter().map(TransactionResponse::from).collect(),
        meta: result.meta,
    }))
}

/// GET /transactions/month - All transactions of a calendar month.
async fn list_month(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<Vec<TransactionResponse>>> {
    validate_period(query.year, query.month)?;
    let period = MonthPeriod::new(query.year, query.month)?;

    let rows = TransactionRepository::new((*state.db).clone())
        .list_for_period(auth.user_id(), &period)
        .await?;

    Ok(Json(rows.into_iter().map(TransactionResponse::from).collect()))
}

/// POST /transactions - Record a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = CreateTransactionInput {
        account_id: payload.account_id,
        category_id: payload.category_id,
        title: validate_title(&payload.title)?,
        kind: payload.transaction_type,
        amount: validate_amount(payload.amount)?,
    };

    let row = TransactionRepository::new((*state.db).clone())
        .create(auth.user_id(), input)
        .await?;

    info!(
        user_id = auth.user_id(),
        transaction_id = row.id,
        account_id = row.account_id,
        "Transaction created"
    );

    Ok((StatusCode::CREATED, Json(TransactionResponse::from(row))))
}

/// GET /transactions/{id}
async fn get_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<TransactionResponse>> {
    let row = TransactionRepository::new((*state.db).clone())
        .find(auth.user_id(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Transaction not found: {id}")))?;

    Ok(Json(row.into()))
}

/// PUT /transactions/{id}
async fn update_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTransactionRequest>,
) -> ApiResult<Json<TransactionResponse>> {
    let title = payload.title.as_deref().map(validate_title).transpose()?;
    let input = UpdateTransactionInput {
        account_id: payload.account_id,
        category_id: payload.category_id,
        title,
        kind: payload.transaction_type,
        amount: validate_amount(payload.amount)?,
    };

    let row = TransactionRepository::new((*state.db).clone())
        .update(auth.user_id(), id, input)
        .await?;

    info!(user_id = auth.user_id(), transaction_id = id, "Transaction updated");
    Ok(Json(row.into()))
}

/// DELETE /transactions/{id}
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    TransactionRepository::new((*state.db).clone())
        .delete(auth.user_id(), id)
        .await?;

    info!(user_id = auth.user_id(), transaction_id = id, "Transaction deleted");
    Ok(StatusCode::NO_CONTENT)
}
