//! Numeric-specific error types.

use thiserror::Error;

use super::base::Base;
use super::units::UnitCategory;

/// Errors produced by the numeric converters.
///
/// Every variant is recoverable: callers surface the message next to the
/// offending input and keep accepting edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    /// A character outside the declared base's alphabet.
    #[error("Invalid {base} digit '{character}'")]
    InvalidDigit { base: Base, character: char },

    /// A unit symbol that does not belong to the category.
    #[error("Unknown unit '{unit}' for category {category}")]
    UnknownUnit { category: UnitCategory, unit: String },

    /// A category name that is not recognised.
    #[error("Unknown unit category: {0}")]
    UnknownCategory(String),

    /// A base name that is not recognised.
    #[error("Unknown numeral base: {0}")]
    UnknownBase(String),

    /// A delimiter name that is not recognised.
    #[error("Unknown delimiter: {0}")]
    UnknownDelimiter(String),
}

impl NumericError {
    /// Create a new "invalid digit" error.
    pub fn invalid_digit(base: Base, character: char) -> Self {
        Self::InvalidDigit { base, character }
    }

    /// Create a new "unknown unit" error.
    pub fn unknown_unit(category: UnitCategory, unit: impl Into<String>) -> Self {
        Self::UnknownUnit {
            category,
            unit: unit.into(),
        }
    }
}
