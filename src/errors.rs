//! Unified error types for the catalog.
//!
//! Storage errors are classified on the way in: uniqueness violations (duplicate slug,
//! SKU or username) get their own variant so callers can present them, everything else
//! from the store is carried as [`Error::Database`].

use rust_decimal::Decimal;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// All errors produced by the catalog.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Any other storage-layer failure
    #[error("Database error: {0}")]
    Database(DbErr),

    /// A unique column (slug, SKU, username) already holds the value
    #[error("Uniqueness violation: {message}")]
    UniqueViolation {
        /// Message reported by the store
        message: String,
    },

    /// Input rejected before reaching the store
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable reason
        message: String,
    },

    /// Category lookup failed
    #[error("Category not found: {key}")]
    CategoryNotFound {
        /// Slug or id that was looked up
        key: String,
    },

    /// Brand lookup failed
    #[error("Brand not found: {key}")]
    BrandNotFound {
        /// Slug or id that was looked up
        key: String,
    },

    /// Product lookup failed
    #[error("Product not found: {key}")]
    ProductNotFound {
        /// Slug or id that was looked up
        key: String,
    },

    /// User lookup failed
    #[error("User not found: {key}")]
    UserNotFound {
        /// Username or id that was looked up
        key: String,
    },

    /// Image lookup failed
    #[error("Image not found: {key}")]
    ImageNotFound {
        /// Id that was looked up
        key: String,
    },

    /// A query parameter had a value outside its accepted set
    #[error("Invalid value for parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name as it appears in the request
        name: &'static str,
        /// Rejected value
        value: String,
    },

    /// Requested page lies past the last page
    #[error("Page {page} is out of range (last page is {last_page})")]
    PageOutOfRange {
        /// Requested 1-based page
        page: u64,
        /// Last valid 1-based page
        last_page: u64,
    },

    /// Negative price or sale price
    #[error("Invalid price: {amount}")]
    InvalidPrice {
        /// Rejected amount
        amount: Decimal,
    },

    /// Review rating outside 1..=5
    #[error("Invalid rating: {rating} (expected 1 to 5)")]
    InvalidRating {
        /// Rejected rating
        rating: i32,
    },

    /// Rendering output as JSON failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O failure (reading configuration)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => Self::UniqueViolation { message },
            _ => Self::Database(err),
        }
    }
}

impl Error {
    /// Shorthand for building a [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_db_error_stays_database() {
        let err: Error = DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, Error::Database(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_not_found_messages() {
        let err = Error::ProductNotFound {
            key: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "Product not found: missing");
        let err = Error::ImageNotFound {
            key: "42".to_string(),
        };
        assert_eq!(err.to_string(), "Image not found: 42");
    }
}
