//! Monthly report generation.
//!
//! This module aggregates one user's transactions for a calendar month into:
//! - Total income, total expense and balance
//! - A per-category expense breakdown with percentages
//! - The reshaped transaction list
//!
//! Persistence is reached only through the [`TransactionReader`] trait.

pub mod error;
pub mod period;
pub mod reader;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use period::MonthPeriod;
pub use reader::TransactionReader;
pub use service::MonthlyReportService;
pub use types::*;
