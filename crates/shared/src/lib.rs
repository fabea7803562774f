//! Shared types, errors, and configuration for FinTrack.
//!
//! This crate provides common types used across all other crates:
//! - Money helpers with fixed two-digit decimal precision
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - JWT issuance and validation
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::{Claims, TokenKind, TokenPair, TokenSubject};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
