//! Financial accounts.
//!
//! An account's stored `initial_balance` never changes with activity; the
//! current balance is derived from its transactions on read.

use fintrack_shared::types::{MAX_AMOUNT, has_money_scale};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::transaction::TransactionKind;

/// Maximum number of characters in an account name.
pub const MAX_ACCOUNT_NAME_LENGTH: usize = 80;

/// Reasons an account write is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountValidationError {
    /// Name is blank.
    #[error("Account name is required")]
    EmptyName,

    /// Name exceeds the allowed length.
    #[error("Account name must be at most {max} characters")]
    NameTooLong {
        /// Allowed maximum.
        max: usize,
    },

    /// Initial balance has more than two fractional digits.
    #[error("Initial balance must have at most two decimal places: {0}")]
    TooPrecise(Decimal),

    /// Initial balance magnitude does not fit the storage column.
    #[error("Initial balance magnitude must not exceed {max}: {amount}")]
    TooLarge {
        /// Rejected balance.
        amount: Decimal,
        /// Allowed magnitude.
        max: Decimal,
    },
}

/// Validates an account name, returning the trimmed value.
pub fn validate_account_name(name: &str) -> Result<String, AccountValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AccountValidationError::EmptyName);
    }
    if trimmed.chars().count() > MAX_ACCOUNT_NAME_LENGTH {
        return Err(AccountValidationError::NameTooLong {
            max: MAX_ACCOUNT_NAME_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}

/// Validates an initial balance. Negative values are allowed (overdrawn accounts).
pub fn validate_initial_balance(amount: Decimal) -> Result<Decimal, AccountValidationError> {
    if !has_money_scale(amount) {
        return Err(AccountValidationError::TooPrecise(amount));
    }
    if amount.abs() > MAX_AMOUNT {
        return Err(AccountValidationError::TooLarge {
            amount,
            max: MAX_AMOUNT,
        });
    }
    Ok(amount)
}

/// Computes `initial + Σ income − Σ expense`.
#[must_use]
pub fn current_balance<I>(initial_balance: Decimal, movements: I) -> Decimal
where
    I: IntoIterator<Item = (TransactionKind, Decimal)>,
{
    movements
        .into_iter()
        .fold(initial_balance, |balance, (kind, amount)| match kind {
            TransactionKind::Income => balance + amount,
            TransactionKind::Expense => balance - amount,
        })
}
