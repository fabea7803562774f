//! Transaction input validation.

use fintrack_shared::types::{MAX_AMOUNT, has_money_scale};
use rust_decimal::Decimal;
use thiserror::Error;

/// Maximum number of characters in a transaction title.
pub const MAX_TITLE_LENGTH: usize = 80;

/// Reasons a transaction write is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionValidationError {
    /// Title is blank.
    #[error("Title is required")]
    EmptyTitle,

    /// Title exceeds the allowed length.
    #[error("Title must be at most {max} characters, got {actual}")]
    TitleTooLong {
        /// Allowed maximum.
        max: usize,
        /// Length of the rejected title.
        actual: usize,
    },

    /// Amount is below zero.
    #[error("Amount must not be negative: {0}")]
    NegativeAmount(Decimal),

    /// Amount has more than two fractional digits.
    #[error("Amount must have at most two decimal places: {0}")]
    TooPrecise(Decimal),

    /// Amount does not fit the storage column.
    #[error("Amount exceeds the maximum of {max}: {amount}")]
    TooLarge {
        /// Rejected amount.
        amount: Decimal,
        /// Allowed maximum.
        max: Decimal,
    },
}

/// Validates a transaction title, returning the trimmed value.
///
/// # Errors
///
/// Returns an error if the title is blank or longer than [`MAX_TITLE_LENGTH`] characters.
pub fn validate_title(title: &str) -> Result<String, TransactionValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TransactionValidationError::EmptyTitle);
    }
    let actual = trimmed.chars().count();
    if actual > MAX_TITLE_LENGTH {
        return Err(TransactionValidationError::TitleTooLong {
            max: MAX_TITLE_LENGTH,
            actual,
        });
    }
    Ok(trimmed.to_string())
}

/// Validates a transaction amount.
///
/// # Errors
///
/// Returns an error if the amount is negative, has more than two
/// fractional digits, or exceeds [`MAX_AMOUNT`].
pub fn validate_amount(amount: Decimal) -> Result<Decimal, TransactionValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(TransactionValidationError::NegativeAmount(amount));
    }
    if !has_money_scale(amount) {
        return Err(TransactionValidationError::TooPrecise(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(TransactionValidationError::TooLarge {
            amount,
            max: MAX_AMOUNT,
        });
    }
    Ok(amount)
}
