//! Common types used across the application.

pub mod money;
pub mod pagination;

pub use money::{MAX_AMOUNT, MONEY_SCALE, format_money, has_money_scale, money_str, round_money};
pub use pagination::{PageMeta, PageRequest, PageResponse};
