//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality,
//! plus the field checks they share.

use crate::types::{AppError, Result};

/// Register and login handlers.
pub mod auth;
/// Liveness handler.
pub mod health;
/// Role-restricted area handlers.
pub mod roles;
/// User CRUD handlers.
pub mod users;

/// A field counts as present when it was sent and is not an empty string.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// An age of 0 counts as not sent.
pub(crate) fn present_age(value: Option<i64>) -> Option<i64> {
    value.filter(|age| *age != 0)
}

pub(crate) fn missing_fields() -> AppError {
    AppError::InvalidInput("Missing fields".to_string())
}

/// Shape check equivalent to `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
pub(crate) fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // Needs a dot with at least one character on either side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub(crate) fn validate_email(email: &str) -> Result<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(AppError::InvalidInput("Invalid email".to_string()))
    }
}

pub(crate) fn validate_age(age: i64) -> Result<i64> {
    if age < 0 {
        return Err(AppError::InvalidInput("Invalid age".to_string()));
    }
    Ok(age)
}
