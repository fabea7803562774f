//! Report data types.

use chrono::{DateTime, Utc};
use fintrack_shared::types::money_str;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::{TransactionKind, TransactionRecord};

/// Monthly income/expense report for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// Report year.
    pub year: i32,
    /// Report month (1-12).
    pub month: u32,
    /// Sum of all income amounts.
    #[serde(with = "money_str")]
    pub total_income: Decimal,
    /// Sum of all expense amounts.
    #[serde(with = "money_str")]
    pub total_expense: Decimal,
    /// `total_income - total_expense`, may be negative.
    #[serde(with = "money_str")]
    pub balance: Decimal,
    /// Expense breakdown, largest first.
    pub categories: Vec<CategoryBreakdown>,
    /// Every transaction of the month in source order.
    pub transactions: Vec<ReportTransaction>,
}

/// Expense total of one category within a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// Category ID (grouping key).
    pub category_id: i32,
    /// Category title, empty when the category is gone.
    pub category_title: String,
    /// Sum of the category's expense amounts.
    #[serde(with = "money_str")]
    pub total_expense: Decimal,
    /// Share of the month's total expense, 0-100 with two decimals.
    #[serde(with = "money_str")]
    pub percentage: Decimal,
}

/// Transaction as presented inside a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTransaction {
    /// Transaction ID.
    pub id: i32,
    /// Display title.
    pub title: String,
    /// Income or expense.
    #[serde(rename = "transaction_type")]
    pub kind: TransactionKind,
    /// Amount.
    #[serde(with = "money_str")]
    pub amount: Decimal,
    /// When the transaction was recorded.
    pub created_at: DateTime<Utc>,
    /// Category ID.
    pub category_id: i32,
    /// Category title, empty when the category is gone.
    pub category_title: String,
    /// Account ID.
    pub account_id: i32,
}

impl From<&TransactionRecord> for ReportTransaction {
    fn from(record: &TransactionRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            kind: record.kind,
            amount: record.amount,
            created_at: record.created_at,
            category_id: record.category_id,
            category_title: record.category_title.clone().unwrap_or_default(),
            account_id: record.account_id,
        }
    }
}
