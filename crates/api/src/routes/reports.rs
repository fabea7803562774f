//! Report routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use tracing::info;

use crate::{AppState, error::ApiError, error::ApiResult, middleware::AuthUser};
use fintrack_core::reports::{MonthlyReport, MonthlyReportService};
use fintrack_db::TransactionRepository;

/// Creates the report routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/monthly", get(get_monthly_report))
}

/// Query parameters selecting a calendar month.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    /// Calendar year.
    pub year: i32,
    /// Month, 1 through 12.
    pub month: u32,
}

/// Rejects periods outside year 1 onwards and months 1-12.
pub(crate) fn validate_period(year: i32, month: u32) -> Result<(), ApiError> {
    if year < 1 {
        return Err(ApiError::validation("year must be 1 or later"));
    }
    if !(1..=12).contains(&month) {
        return Err(ApiError::validation("month must be between 1 and 12"));
    }
    Ok(())
}

/// GET /reports/monthly - Income, expenses and category breakdown for a month.
async fn get_monthly_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<Json<MonthlyReport>> {
    validate_period(query.year, query.month)?;

    let reader = TransactionRepository::new((*state.db).clone());
    let service = MonthlyReportService::new(Arc::new(reader));
    let report = service
        .generate_monthly_report(auth.user_id(), query.year, query.month)
        .await?;

    info!(
        user_id = auth.user_id(),
        year = query.year,
        month = query.month,
        transactions = report.transactions.len(),
        categories = report.categories.len(),
        "Monthly report generated"
    );

    Ok(Json(report))
}
