//! Database seeder for FinTrack development and testing.
//!
//! Seeds a demo user with an account, a handful of categories and a month of
//! transactions so the monthly report has something to show.
//!
//! Usage: cargo run --bin seeder

use chrono::{Datelike, Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use fintrack_core::auth::hash_password;
use fintrack_db::entities::{categories, sea_orm_active_enums::TransactionType, transactions};
use fintrack_db::{AccountRepository, CategoryRepository, UserRepository};

/// Demo login (consistent for all seeds)
const DEMO_EMAIL: &str = "demo@fintrack.dev";
/// Demo password, only ever used against a local database
const DEMO_PASSWORD: &str = "demo-password";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = fintrack_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo user...");
    let Some(user_id) = seed_demo_user(&db).await else {
        println!("Seeding skipped.");
        return;
    };

    println!("Seeding account...");
    let account_id = AccountRepository::new(db.clone())
        .create(user_id, "Main Wallet".to_string(), Decimal::new(50_000, 2))
        .await
        .expect("Failed to create account")
        .id;

    println!("Seeding categories...");
    let categories = seed_categories(&db, user_id).await;

    println!("Seeding transactions...");
    seed_transactions(&db, account_id, &categories).await;

    println!("Seeding complete! Log in as {DEMO_EMAIL} / {DEMO_PASSWORD}");
}

/// Creates the demo user, or returns `None` if it already exists.
async fn seed_demo_user(db: &DatabaseConnection) -> Option<i32> {
    let users = UserRepository::new(db.clone());
    if users
        .email_exists(DEMO_EMAIL)
        .await
        .expect("Failed to query users")
    {
        println!("  Demo user already exists, skipping...");
        return None;
    }

    let password_hash = hash_password(DEMO_PASSWORD).expect("Failed to hash password");
    let user = users
        .create(DEMO_EMAIL, "Demo User", &password_hash)
        .await
        .expect("Failed to insert demo user");

    println!("  Created demo user: {DEMO_EMAIL}");
    Some(user.id)
}

async fn seed_categories(db: &DatabaseConnection, user_id: i32) -> Vec<categories::Model> {
    let repo = CategoryRepository::new(db.clone());
    let mut created = Vec::new();

    for (title, description) in [
        ("Salary", Some("Monthly pay")),
        ("Housing", Some("Rent and utilities")),
        ("Food", None),
        ("Transport", None),
    ] {
        match repo
            .create(user_id, title.to_string(), description.map(str::to_string))
            .await
        {
            Ok(category) => created.push(category),
            Err(e) => eprintln!("Failed to insert category {title}: {e}"),
        }
    }

    println!("  Created {} categories", created.len());
    created
}

/// Spreads income and expenses across the current month up to today.
async fn seed_transactions(
    db: &DatabaseConnection,
    account_id: i32,
    categories: &[categories::Model],
) {
    let find_category = |title: &str| {
        categories
            .iter()
            .find(|c| c.title == title)
            .map(|c| c.id)
    };

    // (day of month, title, category, type, amount in cents)
    let entries = [
        (1, "Paycheck", "Salary", TransactionType::Income, 420_000),
        (1, "Rent", "Housing", TransactionType::Expense, 120_000),
        (3, "Groceries", "Food", TransactionType::Expense, 8_450),
        (5, "Bus pass", "Transport", TransactionType::Expense, 4_500),
        (9, "Electricity", "Housing", TransactionType::Expense, 6_230),
        (12, "Groceries", "Food", TransactionType::Expense, 11_075),
        (15, "Side project", "Salary", TransactionType::Income, 35_000),
        (18, "Dinner out", "Food", TransactionType::Expense, 5_600),
        (22, "Taxi", "Transport", TransactionType::Expense, 2_340),
    ];

    let now = Utc::now();
    let month_start = now - Duration::days(i64::from(now.day0()));
    let mut inserted = 0;

    for (day, title, category, kind, cents) in entries {
        if day > now.day() {
            continue;
        }
        let Some(category_id) = find_category(category) else {
            continue;
        };

        let transaction = transactions::ActiveModel {
            account_id: Set(account_id),
            category_id: Set(category_id),
            title: Set(title.to_string()),
            transaction_type: Set(kind),
            amount: Set(Decimal::new(cents, 2)),
            created_at: Set((month_start + Duration::days(i64::from(day - 1))).into()),
            ..Default::default()
        };

        if let Err(e) = transaction.insert(db).await {
            eprintln!("Failed to insert transaction {title}: {e}");
        } else {
            inserted += 1;
        }
    }

    println!("  Created {inserted} transactions");
}
