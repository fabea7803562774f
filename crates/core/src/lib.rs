//! Core business logic for FinTrack.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `reports` - Monthly report aggregation and the `TransactionReader` contract
//! - `transaction` - Transaction domain types and validation
//! - `account` - Account balance derivation
//! - `category` - Category types and the category lookup cache
//! - `auth` - Password hashing

pub mod account;
pub mod auth;
pub mod category;
pub mod reports;
pub mod transaction;
