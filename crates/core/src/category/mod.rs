//! Transaction categories.
//!
//! This module provides:
//! - Category lookup data and input validation
//! - An in-memory lookup cache with explicit invalidation

mod cache;

pub use cache::CategoryCache;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of characters in a category title.
pub const MAX_CATEGORY_TITLE_LENGTH: usize = 80;

/// Maximum number of characters in a category description.
pub const MAX_CATEGORY_DESCRIPTION_LENGTH: usize = 255;

/// A user-defined category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: i32,
    /// Owning user.
    pub user_id: i32,
    /// Display title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Reasons a category write is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryValidationError {
    /// Title is blank.
    #[error("Category title is required")]
    EmptyTitle,

    /// Title exceeds the allowed length.
    #[error("Category title must be at most {max} characters")]
    TitleTooLong {
        /// Allowed maximum.
        max: usize,
    },

    /// Description exceeds the allowed length.
    #[error("Category description must be at most {max} characters")]
    DescriptionTooLong {
        /// Allowed maximum.
        max: usize,
    },
}

/// Validates a category title, returning the trimmed value.
pub fn validate_category_title(title: &str) -> Result<String, CategoryValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CategoryValidationError::EmptyTitle);
    }
    if trimmed.chars().count() > MAX_CATEGORY_TITLE_LENGTH {
        return Err(CategoryValidationError::TitleTooLong {
            max: MAX_CATEGORY_TITLE_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}

/// Validates an optional description. Blank descriptions become `None`.
pub fn validate_category_description(
    description: Option<&str>,
) -> Result<Option<String>, CategoryValidationError> {
    match description.map(str::trim) {
        None | Some("") => Ok(None),
        Some(d) if d.chars().count() > MAX_CATEGORY_DESCRIPTION_LENGTH => {
            Err(CategoryValidationError::DescriptionTooLong {
                max: MAX_CATEGORY_DESCRIPTION_LENGTH,
            })
        }
        Some(d) => Ok(Some(d.to_string())),
    }
}
