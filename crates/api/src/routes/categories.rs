//! Category routes.
//!
//! Single-category reads go through the in-memory [`CategoryCache`]; every
//! write invalidates the affected entry.
//!
//! [`CategoryCache`]: fintrack_core::category::CategoryCache

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{AppState, error::ApiError, error::ApiResult, middleware::AuthUser};
use fintrack_core::category::{Category, validate_category_description, validate_category_title};
use fintrack_db::CategoryRepository;
use fintrack_db::repositories::UpdateCategoryInput;

/// Creates the category routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Request body for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Display title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Request body for updating a category. A blank description clears it.
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Category in API responses.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    /// Category ID.
    pub id: i32,
    /// Display title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            title: category.title.clone(),
            description: category.description.clone(),
            created_at: category.created_at,
        }
    }
}

/// Category list entry.
#[derive(Debug, Serialize)]
pub struct CategorySummaryResponse {
    /// The category.
    #[serde(flatten)]
    pub category: CategoryResponse,
    /// Number of transactions filed under the category.
    pub transactions_count: u64,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /categories - Categories with transaction counts.
async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<CategorySummaryResponse>>> {
    let rows = CategoryRepository::new((*state.db).clone())
        .list_with_counts(auth.user_id())
        .await?;

    Ok(Json(
        rows.into_iter()
            .map(|row| CategorySummaryResponse {
                category: CategoryResponse::from(&Category::from(row.category)),
                transactions_count: row.transactions_count,
            })
            .collect(),
    ))
}

/// POST /categories
async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> ApiResult<impl IntoResponse> {
    let title = validate_category_title(&payload.title)?;
    let description = validate_category_description(payload.description.as_deref())?;

    let model = CategoryRepository::new((*state.db).clone())
        .create(auth.user_id(), title, description)
        .await?;
    let category = state.category_cache.insert(model.into());

    info!(user_id = auth.user_id(), category_id = category.id, "Category created");
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(&*category))))
}

/// GET /categories/{id}
async fn get_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<CategoryResponse>> {
    let category = load_category(&state, auth.user_id(), id).await?;
    Ok(Json(CategoryResponse::from(&*category)))
}

/// PUT /categories/{id}
async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> ApiResult<Json<CategoryResponse>> {
    let input = UpdateCategoryInput {
        title: payload
            .title
            .as_deref()
            .map(validate_category_title)
            .transpose()?,
        description: payload
            .description
            .as_deref()
            .map(|d| validate_category_description(Some(d)))
            .transpose()?,
    };

    let model = CategoryRepository::new((*state.db).clone())
        .update(auth.user_id(), id, input)
        .await?;
    state.category_cache.invalidate(auth.user_id(), id);
    let category = state.category_cache.insert(model.into());

    info!(user_id = auth.user_id(), category_id = id, "Category updated");
    Ok(Json(CategoryResponse::from(&*category)))
}

/// DELETE /categories/{id} - Transactions keep their `category_id`.
async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    CategoryRepository::new((*state.db).clone())
        .delete(auth.user_id(), id)
        .await?;
    state.category_cache.invalidate(auth.user_id(), id);

    info!(user_id = auth.user_id(), category_id = id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn load_category(state: &AppState, user_id: i32, id: i32) -> ApiResult<Arc<Category>> {
    if let Some(category) = state.category_cache.get(user_id, id) {
        debug!(user_id, category_id = id, "Category cache hit");
        return Ok(category);
    }

    let model = CategoryRepository::new((*state.db).clone())
        .find(user_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Category not found: {id}")))?;

    Ok(state.category_cache.insert(model.into()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::test_support::{access_token, disconnected_state, json_body, send};

    fn category(user_id: i32, id: i32, title: &str) -> Category {
        Category {
            id,
            user_id,
            title: title.to_string(),
            description: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_served_from_cache() {
        let state = disconnected_state();
        state.category_cache.insert(category(1, 9, "Food"));
        let token = access_token(&state, 1);

        let response = send(&state, "GET", "/api/v1/categories/9", Some(&token), None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["id"], 9);
        assert_eq!(body["title"], "Food");
    }

    #[tokio::test]
    async fn test_create_rejects_long_description() {
        let state = disconnected_state();
        let token = access_token(&state, 1);
        let response = send(
            &state,
            "POST",
            "/api/v1/categories",
            Some(&token),
            Some(json!({ "title": "Food", "description": "d".repeat(256) })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_update_rejects_blank_title() {
        let state = disconnected_state();
        let token = access_token(&state, 1);
        let response = send(
            &state,
            "PUT",
            "/api/v1/categories/3",
            Some(&token),
            Some(json!({ "title": "" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_requires_token() {
        let state = disconnected_state();
        let response = send(&state, "GET", "/api/v1/categories", None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
