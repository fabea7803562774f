//! Monthly report generation service.

use std::collections::HashMap;
use std::sync::Arc;

use fintrack_shared::types::round_money;
use rust_decimal::Decimal;

use super::error::ReportError;
use super::reader::TransactionReader;
use super::types::{CategoryBreakdown, MonthlyReport, ReportTransaction};
use crate::transaction::{TransactionKind, TransactionRecord};

/// Service for generating monthly reports.
pub struct MonthlyReportService<R: TransactionReader> {
    reader: Arc<R>,
}

impl<R: TransactionReader> MonthlyReportService<R> {
    /// Creates a new report service over the given reader.
    pub const fn new(reader: Arc<R>) -> Self {
        Self { reader }
    }

    /// Fetches the month's transactions for a user and aggregates them.
    ///
    /// Year and month are not validated here; the reader decides what an
    /// out-of-range period means.
    ///
    /// # Errors
    ///
    /// Returns whatever error the reader returns, unchanged.
    pub async fn generate_monthly_report(
        &self,
        user_id: i32,
        year: i32,
        month: u32,
    ) -> Result<MonthlyReport, ReportError> {
        let transactions = self
            .reader
            .fetch_transactions_for_month(user_id, year, month)
            .await?;
        Ok(Self::build_report(year, month, &transactions))
    }

    /// Aggregates an already-fetched transaction set.
    ///
    /// Categories are grouped by `category_id`; the title comes from the first
    /// transaction seen in the group. Percentages are rounded half away from
    /// zero to two decimals and are zero when there is no expense at all.
    #[must_use]
    pub fn build_report(
        year: i32,
        month: u32,
        transactions: &[TransactionRecord],
    ) -> MonthlyReport {
        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;
        let mut groups: Vec<CategoryBreakdown> = Vec::new();
        let mut group_index: HashMap<i32, usize> = HashMap::new();

        for tx in transactions {
            match tx.kind {
                TransactionKind::Income => total_income += tx.amount,
                TransactionKind::Expense => {
                    total_expense += tx.amount;
                    let idx = *group_index.entry(tx.category_id).or_insert_with(|| {
                        groups.push(CategoryBreakdown {
                            category_id: tx.category_id,
                            category_title: tx.category_title.clone().unwrap_or_default(),
                            total_expense: Decimal::ZERO,
                            percentage: Decimal::ZERO,
                        });
                        groups.len() - 1
                    });
                    groups[idx].total_expense += tx.amount;
                }
            }
        }

        for group in &mut groups {
            group.percentage = percentage_of(group.total_expense, total_expense);
        }
        // stable: ties keep first-appearance order
        groups.sort_by(|a, b| b.total_expense.cmp(&a.total_expense));

        MonthlyReport {
            year,
            month,
            total_income,
            total_expense,
            balance: total_income - total_expense,
            categories: groups,
            transactions: transactions.iter().map(ReportTransaction::from).collect(),
        }
    }
}

fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    round_money(part * Decimal::ONE_HUNDRED / whole)
}
