//! Category repository for database operations.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::entities::{accounts, categories, transactions};

/// Error types for category operations.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    /// Category not found (or not owned by the caller).
    #[error("Category not found: {0}")]
    NotFound(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Category with the number of transactions filed under it.
#[derive(Debug, Clone)]
pub struct CategoryWithCount {
    /// The category record.
    pub category: categories::Model,
    /// Number of the user's transactions referencing the category.
    pub transactions_count: u64,
}

/// Input for updating a category.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    /// New title.
    pub title: Option<String>,
    /// New description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
}

/// Category repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the user's categories by title with transaction counts.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn list_with_counts(&self, user_id: i32) -> Result<Vec<CategoryWithCount>, DbErr> {
        let categories = categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id))
            .order_by_asc(categories::Column::Title)
            .order_by_asc(categories::Column::Id)
            .all(&self.db)
            .await?;

        let counts: HashMap<i32, i64> = transactions::Entity::find()
            .select_only()
            .column(transactions::Column::CategoryId)
            .column_as(transactions::Column::Id.count(), "transactions_count")
            .join(JoinType::InnerJoin, transactions::Relation::Accounts.def())
            .filter(accounts::Column::UserId.eq(user_id))
            .group_by(transactions::Column::CategoryId)
            .into_tuple::<(i32, i64)>()
            .all(&self.db)
            .await?
            .into_iter()
            .collect();

        Ok(categories
            .into_iter()
            .map(|category| {
                let count = counts.get(&category.id).copied().unwrap_or_default();
                CategoryWithCount {
                    transactions_count: u64::try_from(count).unwrap_or_default(),
                    category,
                }
            })
            .collect())
    }

    /// Finds a category owned by the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(&self, user_id: i32, id: i32) -> Result<Option<categories::Model>, DbErr> {
        categories::Entity::find_by_id(id)
            .filter(categories::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: i32,
        title: String,
        description: Option<String>,
    ) -> Result<categories::Model, DbErr> {
        categories::ActiveModel {
            user_id: Set(user_id),
            title: Set(title),
            description: Set(description),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
    }

    /// Updates a category owned by the user.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::NotFound` if the category is not the user's.
    pub async fn update(
        &self,
        user_id: i32,
        id: i32,
        input: UpdateCategoryInput,
    ) -> Result<categories::Model, CategoryError> {
        let existing = self
            .find(user_id, id)
            .await?
            .ok_or(CategoryError::NotFound(id))?;

        let mut active: categories::ActiveModel = existing.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a category. Transactions keep the dangling `category_id`.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::NotFound` if the category is not the user's.
    pub async fn delete(&self, user_id: i32, id: i32) -> Result<(), CategoryError> {
        let result = categories::Entity::delete_many()
            .filter(categories::Column::Id.eq(id))
            .filter(categories::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(CategoryError::NotFound(id));
        }
        Ok(())
    }
}
