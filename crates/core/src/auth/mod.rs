//! Authentication and password hashing.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - Registration input rules

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use thiserror::Error;

/// Minimum accepted password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum number of characters in a user name.
pub const MAX_USER_NAME_LENGTH: usize = 80;

/// Maximum number of characters in an email address.
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Reasons a registration request is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A required field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The email address is not plausible.
    #[error("Invalid email address")]
    InvalidEmail,

    /// The email address exceeds the allowed length.
    #[error("Email must be at most {max} characters")]
    EmailTooLong {
        /// Allowed maximum.
        max: usize,
    },

    /// The user name exceeds the allowed length.
    #[error("User name must be at most {max} characters")]
    NameTooLong {
        /// Allowed maximum.
        max: usize,
    },

    /// The password is too short.
    #[error("Password must be at least {min} characters")]
    WeakPassword {
        /// Required minimum.
        min: usize,
    },
}

/// Normalizes an email address for storage and lookup.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Checks registration input, returning the normalized email and trimmed user name.
pub fn validate_registration(
    email: &str,
    user_name: &str,
    password: &str,
) -> Result<(String, String), RegistrationError> {
    let email = normalize_email(email);
    if email.is_empty() {
        return Err(RegistrationError::MissingField("email"));
    }
    let user_name = user_name.trim();
    if user_name.is_empty() {
        return Err(RegistrationError::MissingField("user_name"));
    }
    if password.is_empty() {
        return Err(RegistrationError::MissingField("password"));
    }
    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(RegistrationError::EmailTooLong {
            max: MAX_EMAIL_LENGTH,
        });
    }
    if user_name.chars().count() > MAX_USER_NAME_LENGTH {
        return Err(RegistrationError::NameTooLong {
            max: MAX_USER_NAME_LENGTH,
        });
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
        _ => return Err(RegistrationError::InvalidEmail),
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(RegistrationError::WeakPassword {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok((email, user_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_valid_registration() {
        let (email, name) =
            validate_registration(" Bob@Example.com ", " bob ", "hunter22!").unwrap();
        assert_eq!(email, "bob@example.com");
        assert_eq!(name, "bob");
    }

    #[test]
    fn test_registration_rejections() {
        assert_eq!(
            validate_registration("", "bob", "password1"),
            Err(RegistrationError::MissingField("email"))
        );
        assert_eq!(
            validate_registration("bob@example.com", "  ", "password1"),
            Err(RegistrationError::MissingField("user_name"))
        );
        assert_eq!(
            validate_registration("bob.example.com", "bob", "password1"),
            Err(RegistrationError::InvalidEmail)
        );
        assert_eq!(
            validate_registration("bob@example.com", "bob", "short"),
            Err(RegistrationError::WeakPassword { min: 8 })
        );
    }

    #[rstest]
    #[case("a".repeat(244) + "@example.com", "bob".to_string(), Err(RegistrationError::EmailTooLong { max: 255 }))]
    #[case("bob@example.com".to_string(), "n".repeat(81), Err(RegistrationError::NameTooLong { max: 80 }))]
    #[case("a".repeat(243) + "@example.com", "n".repeat(80), Ok(()))]
    fn test_registration_length_limits(
        #[case] email: String,
        #[case] user_name: String,
        #[case] expected: Result<(), RegistrationError>,
    ) {
        assert_eq!(
            validate_registration(&email, &user_name, "password1").map(|_| ()),
            expected
        );
    }
}
