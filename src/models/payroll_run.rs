//! Batch envelope handed to the payroll persistence layer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::EmployeeOutcome;

/// Aggregated totals for a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    /// Roster entries processed.
    pub employees: u32,
    /// Employees reconciled.
    pub reconciled: u32,
    /// Employees rejected.
    pub failed: u32,
    /// Sum of final salaries over reconciled employees.
    pub total_payable: Decimal,
}

impl RunTotals {
    /// Computes totals over a set of outcomes.
    pub fn from_outcomes(outcomes: &[EmployeeOutcome]) -> Self {
        let reconciled: Vec<_> = outcomes.iter().filter_map(|o| o.summary()).collect();
        let total_payable = reconciled.iter().map(|s| s.final_salary).sum();

        Self {
            employees: saturating_count(outcomes.len()),
            reconciled: saturating_count(reconciled.len()),
            failed: saturating_count(outcomes.len() - reconciled.len()),
            total_payable,
        }
    }
}

/// Converts a count to `u32`, saturating at `u32::MAX`.
fn saturating_count(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// The complete result of reconciling one roster for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was produced.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced the run.
    pub engine_version: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-based.
    pub month: u32,
    /// One outcome per roster entry, in roster order.
    pub outcomes: Vec<EmployeeOutcome>,
    /// Aggregated totals.
    pub totals: RunTotals,
}

impl PayrollRun {
    /// Wraps outcomes in a freshly identified run.
    pub fn new(year: i32, month: u32, outcomes: Vec<EmployeeOutcome>) -> Self {
        let totals = RunTotals::from_outcomes(&outcomes);
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            year,
            month,
            outcomes,
            totals,
        }
    }
}
