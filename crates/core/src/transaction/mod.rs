//! Income and expense transactions.
//!
//! This module provides:
//! - The transaction kind and record types shared by reports and persistence
//! - Input validation for transaction writes

mod types;
mod validation;

pub use types::{TransactionKind, TransactionRecord};
pub use validation::{
    MAX_TITLE_LENGTH, TransactionValidationError, validate_amount, validate_title,
};
