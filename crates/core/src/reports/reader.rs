//! The data-access contract the report engine depends on.

use crate::transaction::TransactionRecord;

use super::error::ReportError;

/// Supplies the transactions of one user for one calendar month.
///
/// Implementations must return only transactions owned by `user_id` whose
/// `created_at` falls in the half-open range given by [`super::MonthPeriod`],
/// and must report an out-of-range month as [`ReportError::InvalidPeriod`].
pub trait TransactionReader: Send + Sync {
    /// Fetches all transactions for the month.
    fn fetch_transactions_for_month(
        &self,
        user_id: i32,
        year: i32,
        month: u32,
    ) -> impl std::future::Future<Output = Result<Vec<TransactionRecord>, ReportError>> + Send;
}
