//! Calculation logic for the salary reconciliation engine.
//!
//! This module contains calendar helpers, the email-then-name attendance
//! join, the per-day attendance classifier, the salary reconciler, and the
//! batch orchestrator that runs them over a whole roster.

mod attendance_index;
mod batch;
mod calendar;
mod classifier;
mod reconciler;

pub use attendance_index::{AttendanceIndex, EmployeeRecords, MatchedBy};
pub use batch::{Reconciler, reconcile_all, run_payroll};
pub use calendar::{days_in_month, first_of_month, is_leap_year, is_sunday, iso_date, month_dates};
pub use classifier::{
    DUPLICATE_RECORD_IGNORED, FLAG_PRIORITY, FlagPredicate, MATCHED_BY_NAME, MonthClassification,
    NO_ATTENDANCE_RECORDS, classify, classify_record, classify_with_policy,
};
pub use reconciler::{DayTally, NEGATIVE_FINAL_SALARY, reconcile, reconcile_with_policy};
