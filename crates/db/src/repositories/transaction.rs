//! Transaction repository for database operations.
//!
//! Every query is scoped to the owning user through an inner join on `accounts`.
//! Category titles come from a left join, so rows survive category deletion.

use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};

use fintrack_core::reports::{MonthPeriod, ReportError, TransactionReader};
use fintrack_core::transaction::{TransactionKind, TransactionRecord};
use fintrack_shared::types::{PageRequest, PageResponse};

use crate::entities::{accounts, categories, sea_orm_active_enums::TransactionType, transactions};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found (or not owned by the caller).
    #[error("Transaction not found: {0}")]
    NotFound(i32),

    /// Referenced account not found (or not owned by the caller).
    #[error("Account not found: {0}")]
    AccountNotFound(i32),

    /// Referenced category not found (or not owned by the caller).
    #[error("Category not found: {0}")]
    CategoryNotFound(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Transaction joined with its account name and category title.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct TransactionRow {
    /// Transaction ID.
    pub id: i32,
    /// Display title.
    pub title: String,
    /// Income or expense.
    pub transaction_type: TransactionType,
    /// Amount.
    pub amount: Decimal,
    /// Creation time.
    pub created_at: DateTimeWithTimeZone,
    /// Category ID (may dangle).
    pub category_id: i32,
    /// Category title, `None` when the category was deleted.
    pub category_title: Option<String>,
    /// Account ID.
    pub account_id: i32,
    /// Account name.
    pub account_name: String,
}

impl TransactionRow {
    /// Converts the row into the domain record used by reports.
    #[must_use]
    pub fn into_record(self) -> TransactionRecord {
        TransactionRecord {
            id: self.id,
            title: self.title,
            kind: self.transaction_type.into(),
            amount: self.amount,
            created_at: self.created_at.into(),
            category_id: self.category_id,
            category_title: self.category_title,
            account_id: self.account_id,
        }
    }
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Target account.
    pub account_id: i32,
    /// Category.
    pub category_id: i32,
    /// Validated title.
    pub title: String,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Validated amount.
    pub amount: Decimal,
}

/// Input for updating a transaction. `title` is kept when `None`.
#[derive(Debug, Clone)]
pub struct UpdateTransactionInput {
    /// Target account.
    pub account_id: i32,
    /// Category.
    pub category_id: i32,
    /// New title.
    pub title: Option<String>,
    /// Income or expense.
    pub kind: TransactionKind,
    /// New amount.
    pub amount: Decimal,
}

/// Transaction repository for CRUD operations and monthly reads.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Base query selecting [`TransactionRow`] columns for one user.
    fn detailed(user_id: i32) -> Select<transactions::Entity> {
        transactions::Entity::find()
            .select_only()
            .columns([
                transactions::Column::Id,
                transactions::Column::Title,
                transactions::Column::TransactionType,
                transactions::Column::Amount,
                transactions::Column::CreatedAt,
                transactions::Column::CategoryId,
                transactions::Column::AccountId,
            ])
            .column_as(categories::Column::Title, "category_title")
            .column_as(accounts::Column::Name, "account_name")
            .join(JoinType::InnerJoin, transactions::Relation::Accounts.def())
            .join(JoinType::LeftJoin, transactions::Relation::Categories.def())
            .filter(accounts::Column::UserId.eq(user_id))
    }

    /// Finds one transaction owned by the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(&self, user_id: i32, id: i32) -> Result<Option<TransactionRow>, DbErr> {
        Self::detailed(user_id)
            .filter(transactions::Column::Id.eq(id))
            .into_model::<TransactionRow>()
            .one(&self.db)
            .await
    }

    /// Lists the user's transactions, newest first, optionally for one account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        user_id: i32,
        account_id: Option<i32>,
        page: &PageRequest,
    ) -> Result<PageResponse<TransactionRow>, DbErr> {
        let mut query = Self::detailed(user_id);
        if let Some(account_id) = account_id {
            query = query.filter(transactions::Column::AccountId.eq(account_id));
        }

        let paginator = query
            .order_by_desc(transactions::Column::CreatedAt)
            .order_by_desc(transactions::Column::Id)
            .into_model::<TransactionRow>()
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.page_index()).await?;

        Ok(PageResponse::new(rows, page, total))
    }

    /// Lists every transaction of one account, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_account(
        &self,
        user_id: i32,
        account_id: i32,
    ) -> Result<Vec<TransactionRow>, DbErr> {
        Self::detailed(user_id)
            .filter(transactions::Column::AccountId.eq(account_id))
            .order_by_desc(transactions::Column::CreatedAt)
            .order_by_desc(transactions::Column::Id)
            .into_model::<TransactionRow>()
            .all(&self.db)
            .await
    }

    /// Lists the user's transactions with `start <= created_at < end`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_period(
        &self,
        user_id: i32,
        period: &MonthPeriod,
    ) -> Result<Vec<TransactionRow>, DbErr> {
        Self::detailed(user_id)
            .filter(transactions::Column::CreatedAt.gte(period.start()))
            .filter(transactions::Column::CreatedAt.lt(period.end()))
            .order_by_desc(transactions::Column::CreatedAt)
            .order_by_desc(transactions::Column::Id)
            .into_model::<TransactionRow>()
            .all(&self.db)
            .await
    }

    /// Creates a transaction after checking account and category ownership.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`/`CategoryNotFound` for foreign references,
    /// or a database error.
    pub async fn create(
        &self,
        user_id: i32,
        input: CreateTransactionInput,
    ) -> Result<TransactionRow, TransactionError> {
        self.ensure_references(user_id, input.account_id, input.category_id)
            .await?;

        let model = transactions::ActiveModel {
            account_id: Set(input.account_id),
            category_id: Set(input.category_id),
            title: Set(input.title),
            transaction_type: Set(input.kind.into()),
            amount: Set(input.amount),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        self.find(user_id, model.id)
            .await?
            .ok_or(TransactionError::NotFound(model.id))
    }

    /// Updates a transaction owned by the user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the transaction is not the user's,
    /// `AccountNotFound`/`CategoryNotFound` for foreign references,
    /// or a database error.
    pub async fn update(
        &self,
        user_id: i32,
        id: i32,
        input: UpdateTransactionInput,
    ) -> Result<TransactionRow, TransactionError> {
        let existing = self
            .find_owned_model(user_id, id)
            .await?
            .ok_or(TransactionError::NotFound(id))?;
        self.ensure_references(user_id, input.account_id, input.category_id)
            .await?;

        let mut active: transactions::ActiveModel = existing.into();
        active.account_id = Set(input.account_id);
        active.category_id = Set(input.category_id);
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        active.transaction_type = Set(input.kind.into());
        active.amount = Set(input.amount);
        active.update(&self.db).await?;

        self.find(user_id, id)
            .await?
            .ok_or(TransactionError::NotFound(id))
    }

    /// Deletes a transaction owned by the user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the transaction is not the user's, or a database error.
    pub async fn delete(&self, user_id: i32, id: i32) -> Result<(), TransactionError> {
        self.find_owned_model(user_id, id)
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        transactions::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn find_owned_model(
        &self,
        user_id: i32,
        id: i32,
    ) -> Result<Option<transactions::Model>, DbErr> {
        transactions::Entity::find_by_id(id)
            .join(JoinType::InnerJoin, transactions::Relation::Accounts.def())
            .filter(accounts::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    async fn ensure_references(
        &self,
        user_id: i32,
        account_id: i32,
        category_id: i32,
    ) -> Result<(), TransactionError> {
        let account = accounts::Entity::find_by_id(account_id)
            .filter(accounts::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        if account.is_none() {
            return Err(TransactionError::AccountNotFound(account_id));
        }

        let category = categories::Entity::find_by_id(category_id)
            .filter(categories::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        if category.is_none() {
            return Err(TransactionError::CategoryNotFound(category_id));
        }

        Ok(())
    }
}

impl TransactionReader for TransactionRepository {
    async fn fetch_transactions_for_month(
        &self,
        user_id: i32,
        year: i32,
        month: u32,
    ) -> Result<Vec<TransactionRecord>, ReportError> {
        let period = MonthPeriod::new(year, month)?;
        let rows = self
            .list_for_period(user_id, &period)
            .await
            .map_err(|e| ReportError::Source(e.to_string()))?;

        Ok(rows.into_iter().map(TransactionRow::into_record).collect())
    }
}
