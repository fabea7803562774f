//! Tests for the monthly report engine.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ReportError;
use super::reader::TransactionReader;
use super::service::MonthlyReportService;
use crate::transaction::{TransactionKind, TransactionRecord};

fn created_at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, day, 12, 0, 0).unwrap()
}

fn tx(
    id: i32,
    kind: TransactionKind,
    amount: Decimal,
    category_id: i32,
    category_title: Option<&str>,
) -> TransactionRecord {
    TransactionRecord {
        id,
        title: format!("Transaction {id}"),
        kind,
        amount,
        created_at: created_at(u32::try_from(id).unwrap_or(1).clamp(1, 28)),
        category_id,
        category_title: category_title.map(str::to_string),
        account_id: 1,
    }
}

fn income(id: i32, amount: Decimal, category_id: i32, title: &str) -> TransactionRecord {
    tx(id, TransactionKind::Income, amount, category_id, Some(title))
}

fn expense(id: i32, amount: Decimal, category_id: i32, title: &str) -> TransactionRecord {
    tx(id, TransactionKind::Expense, amount, category_id, Some(title))
}

type Build = MonthlyReportService<MockReader>;

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_mixed_month() {
    let transactions = vec![
        income(1, dec!(5000), 1, "Income"),
        expense(2, dec!(300), 2, "Food"),
        expense(3, dec!(150), 2, "Food"),
        expense(4, dec!(1200), 3, "Housing"),
    ];

    let report = Build::build_report(2024, 11, &transactions);

    assert_eq!(report.year, 2024);
    assert_eq!(report.month, 11);
    assert_eq!(report.total_income, dec!(5000));
    assert_eq!(report.total_expense, dec!(1650));
    assert_eq!(report.balance, dec!(3350));
    assert_eq!(report.categories.len(), 2);

    assert_eq!(report.categories[0].category_id, 3);
    assert_eq!(report.categories[0].category_title, "Housing");
    assert_eq!(report.categories[0].total_expense, dec!(1200));
    assert_eq!(report.categories[0].percentage, dec!(72.73));

    assert_eq!(report.categories[1].category_id, 2);
    assert_eq!(report.categories[1].category_title, "Food");
    assert_eq!(report.categories[1].total_expense, dec!(450));
    assert_eq!(report.categories[1].percentage, dec!(27.27));

    assert_eq!(report.transactions.len(), 4);
    let ids: Vec<i32> = report.transactions.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn test_empty_month() {
    let report = Build::build_report(2024, 12, &[]);

    assert_eq!(report.total_income, Decimal::ZERO);
    assert_eq!(report.total_expense, Decimal::ZERO);
    assert_eq!(report.balance, Decimal::ZERO);
    assert!(report.categories.is_empty());
    assert!(report.transactions.is_empty());
}

#[test]
fn test_income_only_month() {
    let transactions = vec![
        income(1, dec!(5000), 1, "Salary"),
        income(2, dec!(1500), 1, "Salary"),
    ];

    let report = Build::build_report(2024, 11, &transactions);

    assert_eq!(report.total_income, dec!(6500));
    assert_eq!(report.total_expense, Decimal::ZERO);
    assert_eq!(report.balance, dec!(6500));
    assert!(report.categories.is_empty());
    assert_eq!(report.transactions.len(), 2);
}

#[test]
fn test_missing_category_title() {
    let transactions = vec![tx(1, TransactionKind::Expense, dec!(100), 9, None)];

    let report = Build::build_report(2024, 11, &transactions);

    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.categories[0].category_id, 9);
    assert_eq!(report.categories[0].category_title, "");
    assert_eq!(report.categories[0].total_expense, dec!(100));
    assert_eq!(report.categories[0].percentage, dec!(100.00));
    assert_eq!(report.transactions[0].category_title, "");
}

#[test]
fn test_equal_split_keeps_first_appearance_order() {
    let transactions = vec![
        expense(1, dec!(150), 7, "Transport"),
        expense(2, dec!(150), 4, "Leisure"),
    ];

    let report = Build::build_report(2024, 11, &transactions);

    assert_eq!(report.categories.len(), 2);
    assert_eq!(report.categories[0].category_id, 7);
    assert_eq!(report.categories[1].category_id, 4);
    assert_eq!(report.categories[0].percentage, dec!(50.00));
    assert_eq!(report.categories[1].percentage, dec!(50.00));
}

#[test]
fn test_zero_amount_expenses_have_zero_percentage() {
    let transactions = vec![
        expense(1, dec!(0), 1, "Food"),
        expense(2, dec!(0), 2, "Rent"),
    ];

    let report = Build::build_report(2024, 11, &transactions);

    assert_eq!(report.total_expense, Decimal::ZERO);
    assert_eq!(report.categories.len(), 2);
    assert!(report.categories.iter().all(|c| c.percentage.is_zero()));
}

#[test]
fn test_same_category_id_groups_once() {
    let transactions = vec![
        expense(1, dec!(10), 5, "Groceries"),
        expense(2, dec!(20), 5, "Food"),
    ];

    let report = Build::build_report(2024, 11, &transactions);

    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.categories[0].category_title, "Groceries");
    assert_eq!(report.categories[0].total_expense, dec!(30));
}

#[test]
fn test_negative_balance() {
    let transactions = vec![
        income(1, dec!(100), 1, "Salary"),
        expense(2, dec!(250.50), 2, "Rent"),
    ];

    let report = Build::build_report(2024, 11, &transactions);

    assert_eq!(report.balance, dec!(-150.50));
}

#[test]
fn test_income_never_forms_category_row() {
    let transactions = vec![
        income(1, dec!(800), 2, "Food"),
        expense(2, dec!(200), 2, "Food"),
    ];

    let report = Build::build_report(2024, 11, &transactions);

    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.categories[0].total_expense, dec!(200));
    assert_eq!(report.categories[0].percentage, dec!(100.00));
}

#[test]
fn test_report_serializes_amounts_as_two_decimal_strings() {
    let transactions = vec![
        income(1, dec!(5000), 1, "Income"),
        expense(4, dec!(1200), 3, "Housing"),
    ];

    let report = Build::build_report(2024, 11, &transactions);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["total_income"], "5000.00");
    assert_eq!(json["balance"], "3800.00");
    assert_eq!(json["categories"][0]["percentage"], "100.00");
    assert_eq!(json["transactions"][1]["transaction_type"], "expense");
    assert_eq!(json["transactions"][1]["category_title"], "Housing");
}

// ============================================================================
// Reader-backed generation
// ============================================================================

struct MockReader {
    transactions: Vec<TransactionRecord>,
    fail_with: Option<ReportError>,
    calls: Mutex<Vec<(i32, i32, u32)>>,
}

impl MockReader {
    fn with(transactions: Vec<TransactionRecord>) -> Self {
        Self {
            transactions,
            fail_with: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing(error: ReportError) -> Self {
        Self {
            transactions: Vec::new(),
            fail_with: Some(error),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl TransactionReader for MockReader {
    async fn fetch_transactions_for_month(
        &self,
        user_id: i32,
        year: i32,
        month: u32,
    ) -> Result<Vec<TransactionRecord>, ReportError> {
        self.calls.lock().unwrap().push((user_id, year, month));
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(self.transactions.clone()),
        }
    }
}

#[tokio::test]
async fn test_generate_uses_reader_result() {
    let reader = Arc::new(MockReader::with(vec![
        income(1, dec!(5000), 1, "Income"),
        expense(2, dec!(300), 2, "Food"),
    ]));
    let service = MonthlyReportService::new(Arc::clone(&reader));

    let report = service.generate_monthly_report(42, 2024, 11).await.unwrap();

    assert_eq!(report.total_income, dec!(5000));
    assert_eq!(report.total_expense, dec!(300));
    assert_eq!(*reader.calls.lock().unwrap(), vec![(42, 2024, 11)]);
}

#[tokio::test]
async fn test_generate_propagates_reader_error() {
    let reader = Arc::new(MockReader::failing(ReportError::Source(
        "connection refused".to_string(),
    )));
    let service = MonthlyReportService::new(reader);

    let result = service.generate_monthly_report(1, 2024, 11).await;

    assert_eq!(
        result,
        Err(ReportError::Source("connection refused".to_string()))
    );
}

#[tokio::test]
async fn test_generate_passes_month_through_unvalidated() {
    let reader = Arc::new(MockReader::failing(ReportError::InvalidPeriod {
        year: 2024,
        month: 13,
    }));
    let service = MonthlyReportService::new(Arc::clone(&reader));

    let result = service.generate_monthly_report(1, 2024, 13).await;

    assert!(matches!(result, Err(ReportError::InvalidPeriod { month: 13, .. })));
    assert_eq!(*reader.calls.lock().unwrap(), vec![(1, 2024, 13)]);
}

// ============================================================================
// Properties
// ============================================================================

fn arb_transaction() -> impl Strategy<Value = TransactionRecord> {
    (
        prop::bool::ANY,
        0i64..10_000_000,
        1i32..8,
        prop::option::of("[A-Z][a-z]{2,8}"),
    )
        .prop_map(|(is_income, cents, category_id, title)| {
            let kind = if is_income {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            tx(0, kind, Decimal::new(cents, 2), category_id, title.as_deref())
        })
}

fn arb_transactions() -> impl Strategy<Value = Vec<TransactionRecord>> {
    prop::collection::vec(arb_transaction(), 0..40)
}

proptest! {
    /// Balance always equals income minus expense.
    #[test]
    fn prop_balance_identity(transactions in arb_transactions()) {
        let report = Build::build_report(2024, 11, &transactions);
        prop_assert_eq!(report.balance, report.total_income - report.total_expense);
    }

    /// Category totals partition the total expense exactly.
    #[test]
    fn prop_categories_partition_expense(transactions in arb_transactions()) {
        let report = Build::build_report(2024, 11, &transactions);
        let sum: Decimal = report.categories.iter().map(|c| c.total_expense).sum();
        prop_assert_eq!(sum, report.total_expense);

        let expense_ids: std::collections::HashSet<i32> = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .map(|t| t.category_id)
            .collect();
        prop_assert_eq!(report.categories.len(), expense_ids.len());
    }

    /// Percentages stay within 0..=100 and add up to 100 within rounding.
    #[test]
    fn prop_percentage_bounds(transactions in arb_transactions()) {
        let report = Build::build_report(2024, 11, &transactions);
        for category in &report.categories {
            prop_assert!(category.percentage >= Decimal::ZERO);
            prop_assert!(category.percentage <= Decimal::ONE_HUNDRED);
        }
        if report.total_expense > Decimal::ZERO {
            let sum: Decimal = report.categories.iter().map(|c| c.percentage).sum();
            let tolerance = dec!(0.01) * Decimal::from(report.categories.len());
            prop_assert!((sum - Decimal::ONE_HUNDRED).abs() <= tolerance);
        }
    }

    /// Without expenses there are no category rows.
    #[test]
    fn prop_no_expense_no_categories(cents in prop::collection::vec(0i64..1_000_000, 0..20)) {
        let transactions: Vec<TransactionRecord> = cents
            .into_iter()
            .map(|c| tx(0, TransactionKind::Income, Decimal::new(c, 2), 1, Some("Salary")))
            .collect();
        let report = Build::build_report(2024, 11, &transactions);
        prop_assert!(report.categories.is_empty());
        prop_assert_eq!(report.total_expense, Decimal::ZERO);
    }

    /// Categories come largest first.
    #[test]
    fn prop_categories_sorted_descending(transactions in arb_transactions()) {
        let report = Build::build_report(2024, 11, &transactions);
        for pair in report.categories.windows(2) {
            prop_assert!(pair[0].total_expense >= pair[1].total_expense);
        }
    }

    /// Transactions are passed through in source order.
    #[test]
    fn prop_transactions_preserved(transactions in arb_transactions()) {
        let report = Build::build_report(2024, 11, &transactions);
        prop_assert_eq!(report.transactions.len(), transactions.len());
        for (out, input) in report.transactions.iter().zip(&transactions) {
            prop_assert_eq!(out.amount, input.amount);
            prop_assert_eq!(out.kind, input.kind);
            prop_assert_eq!(out.category_id, input.category_id);
        }
    }
}
