//! Error types for the Tip Distribution Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine, the employee directory and the shift ledger
//! can report.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Tip Distribution Engine.
///
/// Validation failures (`InvalidInput`, `InvalidRoster`, `InvalidPool`) are
/// raised before any computation and never leave partial state behind.
/// Persistence failures are propagated unchanged from the backing store.
///
/// # Example
///
/// ```
/// use tip_engine::error::EngineError;
///
/// let error = EngineError::InvalidRoster {
///     message: "roster is empty".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid roster: roster is empty");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A monetary or hours input was malformed or out of range.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was rejected.
        field: String,
        /// A description of what made the input invalid.
        message: String,
    },

    /// The roster cannot be proportionally divided.
    #[error("Invalid roster: {message}")]
    InvalidRoster {
        /// A description of what made the roster invalid.
        message: String,
    },

    /// The pool handed to the allocation engine was negative.
    #[error("Invalid pool: {amount} is negative")]
    InvalidPool {
        /// The rejected pool amount.
        amount: Decimal,
    },

    /// A finalized shift already exists for this date.
    #[error("A shift already exists for {date}")]
    DuplicateShift {
        /// The date that is already taken.
        date: NaiveDate,
    },

    /// No shift exists with the given id.
    #[error("Shift not found: {shift_id}")]
    ShiftNotFound {
        /// The id that was looked up.
        shift_id: String,
    },

    /// No employee exists with the given id.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The backing store failed.
    #[error("Persistence error: {message}")]
    Persistence {
        /// A description of the store failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`EngineError::InvalidRoster`].
    pub fn invalid_roster(message: impl Into<String>) -> Self {
        Self::InvalidRoster {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
