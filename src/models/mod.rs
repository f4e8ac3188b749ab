//! Core data models for the salary reconciliation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod audit;
mod day_classification;
mod employee;
mod payroll_run;
mod salary_summary;

pub use attendance::AttendanceRecord;
pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use day_classification::{DayClassification, DayKind};
pub use employee::{Employee, RosterEntry};
pub use payroll_run::{PayrollRun, RunTotals};
pub use salary_summary::{EmployeeFailure, EmployeeOutcome, SalarySummary};
