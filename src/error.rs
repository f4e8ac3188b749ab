//! Error types for the salary reconciliation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while reconciling attendance
//! into payable salary.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the salary reconciliation engine.
///
/// Apart from `SalaryOverflow`, every variant is an input-validation failure
/// raised before any arithmetic. None of them is retryable.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::InvalidDateRange { year: 2024, month: 13 };
/// assert_eq!(error.to_string(), "Invalid date range: 2024-13 is not a calendar month");
/// assert_eq!(error.code(), "INVALID_DATE_RANGE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The requested year/month does not resolve to a calendar month.
    #[error("Invalid date range: {year}-{month} is not a calendar month")]
    InvalidDateRange {
        /// The requested year.
        year: i32,
        /// The requested month (1-based).
        month: u32,
    },

    /// An attendance record's date could not be parsed.
    #[error("Malformed attendance record for '{employee}': date '{date}' {message}")]
    MalformedRecord {
        /// The employee the record was matched to.
        employee: String,
        /// The raw date field.
        date: String,
        /// A description of the parse failure.
        message: String,
    },

    /// The employee's base salary is below zero.
    #[error("Negative base salary for '{employee}': {salary}")]
    NegativeSalary {
        /// The employee whose salary was rejected.
        employee: String,
        /// The rejected salary.
        salary: Decimal,
    },

    /// The roster supplied a salary that is not a number.
    #[error("Invalid salary for '{employee}': '{value}' is not numeric")]
    InvalidSalary {
        /// The employee whose salary was rejected.
        employee: String,
        /// The raw salary value.
        value: String,
    },

    /// Two attendance records exist for the same employee and date and the
    /// active policy rejects duplicates.
    #[error("Duplicate attendance records for '{employee}' on {date}")]
    DuplicateRecord {
        /// The employee with duplicate records.
        employee: String,
        /// The duplicated date.
        date: String,
    },

    /// The salary arithmetic left the range of the decimal type.
    #[error("Salary calculation overflowed for '{employee}'")]
    SalaryOverflow {
        /// The employee whose calculation overflowed.
        employee: String,
    },

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
}

impl EngineError {
    /// Returns a stable, machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            EngineError::MalformedRecord { .. } => "MALFORMED_RECORD",
            EngineError::NegativeSalary { .. } => "NEGATIVE_SALARY",
            EngineError::InvalidSalary { .. } => "INVALID_SALARY",
            EngineError::DuplicateRecord { .. } => "DUPLICATE_RECORD",
            EngineError::SalaryOverflow { .. } => "SALARY_OVERFLOW",
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                "CONFIG_ERROR"
            }
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
