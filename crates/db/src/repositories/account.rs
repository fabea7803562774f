//! Account repository for database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use fintrack_core::account::current_balance;
use fintrack_core::transaction::TransactionKind;

use super::transaction::{TransactionRepository, TransactionRow};
use crate::entities::accounts;

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found (or not owned by the caller).
    #[error("Account not found: {0}")]
    NotFound(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Account with its derived balance and full transaction history.
#[derive(Debug, Clone)]
pub struct AccountWithTransactions {
    /// The account record.
    pub account: accounts::Model,
    /// `initial_balance` adjusted by every income and expense.
    pub current_balance: Decimal,
    /// The account's transactions, newest first.
    pub transactions: Vec<TransactionRow>,
}

/// Input for updating an account. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    /// New name.
    pub name: Option<String>,
    /// New initial balance.
    pub initial_balance: Option<Decimal>,
}

/// Account repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the user's accounts by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: i32) -> Result<Vec<accounts::Model>, DbErr> {
        accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .order_by_asc(accounts::Column::Name)
            .order_by_asc(accounts::Column::Id)
            .all(&self.db)
            .await
    }

    /// Finds an account owned by the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(&self, user_id: i32, id: i32) -> Result<Option<accounts::Model>, DbErr> {
        accounts::Entity::find_by_id(id)
            .filter(accounts::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Loads an account with its transactions and current balance.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn find_with_transactions(
        &self,
        user_id: i32,
        id: i32,
    ) -> Result<Option<AccountWithTransactions>, DbErr> {
        let Some(account) = self.find(user_id, id).await? else {
            return Ok(None);
        };

        let transactions = TransactionRepository::new(self.db.clone())
            .list_for_account(user_id, id)
            .await?;
        let current_balance = current_balance(
            account.initial_balance,
            transactions
                .iter()
                .map(|t| (TransactionKind::from(t.transaction_type), t.amount)),
        );

        Ok(Some(AccountWithTransactions {
            account,
            current_balance,
            transactions,
        }))
    }

    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: i32,
        name: String,
        initial_balance: Decimal,
    ) -> Result<accounts::Model, DbErr> {
        let now = chrono::Utc::now().into();
        accounts::ActiveModel {
            user_id: Set(user_id),
            name: Set(name),
            initial_balance: Set(initial_balance),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
    }

    /// Updates an account owned by the user.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::NotFound` if the account is not the user's.
    pub async fn update(
        &self,
        user_id: i32,
        id: i32,
        input: UpdateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let existing = self
            .find(user_id, id)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        let mut active: accounts::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(initial_balance) = input.initial_balance {
            active.initial_balance = Set(initial_balance);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes an account and, by cascade, its transactions.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::NotFound` if the account is not the user's.
    pub async fn delete(&self, user_id: i32, id: i32) -> Result<(), AccountError> {
        let result = accounts::Entity::delete_many()
            .filter(accounts::Column::Id.eq(id))
            .filter(accounts::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AccountError::NotFound(id));
        }
        Ok(())
    }
}
