//! Report error types.

use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Year/month pair does not name a calendar month.
    #[error("Invalid report period: {year}-{month}")]
    InvalidPeriod {
        /// Requested year.
        year: i32,
        /// Requested month.
        month: u32,
    },

    /// The transaction source failed.
    #[error("Transaction source failed: {0}")]
    Source(String),
}
