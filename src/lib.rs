//! Attendance-to-salary reconciliation engine.
//!
//! This crate classifies each calendar day of an employee's month from raw
//! attendance records and converts the result into a final payable salary,
//! charging absences and leave beyond a monthly grace allowance at a
//! per-day rate of `base_salary / days_in_month`.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
