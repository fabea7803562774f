//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every lookup takes the owning `user_id`; rows of other users behave as missing.

pub mod account;
pub mod category;
pub mod transaction;
pub mod user;

pub use account::{AccountError, AccountRepository, AccountWithTransactions, UpdateAccountInput};
pub use category::{CategoryError, CategoryRepository, CategoryWithCount, UpdateCategoryInput};
pub use transaction::{
    CreateTransactionInput, TransactionError, TransactionRepository, TransactionRow,
    UpdateTransactionInput,
};
pub use user::{UserError, UserRepository};
