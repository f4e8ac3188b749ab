//! Salary summary and per-employee outcome models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditTrace;
use crate::error::EngineError;

/// The reconciled salary of one employee for one calendar month.
///
/// Besides the final figure, the summary keeps every day count that went into
/// it. `present_count` includes half days, which are also counted on their
/// own in `half_day_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalarySummary {
    /// Employee name.
    pub employee_name: String,
    /// Employee email.
    pub email: String,
    /// Branch office.
    pub branch: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-based.
    pub month: u32,
    /// Base monthly salary.
    pub base_salary: Decimal,
    /// Number of calendar days in the month, the per-day divisor.
    pub days_in_month: u32,
    /// `base_salary / days_in_month`, unrounded.
    pub per_day_salary: Decimal,
    /// Present days, half days included.
    pub present_count: u32,
    /// Absent days.
    pub absent_count: u32,
    /// Leave days.
    pub leave_count: u32,
    /// Holidays.
    pub holiday_count: u32,
    /// Half days.
    pub half_day_count: u32,
    /// Leave relief days.
    pub leave_relief_count: u32,
    /// Days falling on a Sunday, whatever their kind.
    pub sunday_count: u32,
    /// Sundays without a usable record.
    pub sunday_unmarked_count: u32,
    /// Days charged against salary.
    pub cut_days: u32,
    /// Payable salary, rounded to a whole currency unit. Not clamped at zero.
    pub final_salary: Decimal,
    /// How the figure was reached.
    pub audit_trace: AuditTrace,
}

impl SalarySummary {
    /// Returns the key the persistence layer upserts this summary under.
    ///
    /// # Examples
    ///
    /// ```
    /// # use salary_engine::models::{AuditTrace, SalarySummary};
    /// # use rust_decimal::Decimal;
    /// # let summary = SalarySummary {
    /// #     employee_name: "Asha Menon".to_string(),
    /// #     email: "Asha@Firm.test".to_string(),
    /// #     branch: String::new(),
    /// #     year: 2024,
    /// #     month: 4,
    /// #     base_salary: Decimal::ZERO,
    /// #     days_in_month: 30,
    /// #     per_day_salary: Decimal::ZERO,
    /// #     present_count: 0,
    /// #     absent_count: 0,
    /// #     leave_count: 0,
    /// #     holiday_count: 0,
    /// #     half_day_count: 0,
    /// #     leave_relief_count: 0,
    /// #     sunday_count: 0,
    /// #     sunday_unmarked_count: 0,
    /// #     cut_days: 0,
    /// #     final_salary: Decimal::ZERO,
    /// #     audit_trace: AuditTrace::default(),
    /// # };
    /// assert_eq!(summary.payroll_key(), "asha@firm.test:2024-04");
    /// ```
    pub fn payroll_key(&self) -> String {
        let email = self.email.trim();
        let identity = if email.is_empty() {
            self.employee_name.trim().to_string()
        } else {
            email.to_lowercase()
        };
        format!("{}:{:04}-{:02}", identity, self.year, self.month)
    }

    /// Returns the number of days classified exactly once.
    ///
    /// Half days are excluded because they are already part of
    /// `present_count`. For a complete month this equals `days_in_month`.
    pub fn classified_days(&self) -> u32 {
        self.present_count
            + self.absent_count
            + self.leave_count
            + self.holiday_count
            + self.leave_relief_count
            + self.sunday_unmarked_count
    }
}

/// Why one employee in a batch could not be reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFailure {
    /// Employee name as supplied by the roster.
    pub employee_name: String,
    /// Employee email as supplied by the roster.
    pub email: String,
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl EmployeeFailure {
    /// Builds a failure record from an engine error.
    pub fn from_error(
        employee_name: impl Into<String>,
        email: impl Into<String>,
        error: &EngineError,
    ) -> Self {
        Self {
            employee_name: employee_name.into(),
            email: email.into(),
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// The result for one roster entry in a batch run.
///
/// Serialized with a `status` tag so callers can tell failed employees apart
/// from employees whose salary is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EmployeeOutcome {
    /// The employee was reconciled.
    Reconciled(SalarySummary),
    /// The employee's inputs were rejected.
    Failed(EmployeeFailure),
}

impl EmployeeOutcome {
    /// Returns the summary if the employee was reconciled.
    pub fn summary(&self) -> Option<&SalarySummary> {
        match self {
            EmployeeOutcome::Reconciled(summary) => Some(summary),
            EmployeeOutcome::Failed(_) => None,
        }
    }

    /// Returns the failure if the employee was rejected.
    pub fn failure(&self) -> Option<&EmployeeFailure> {
        match self {
            EmployeeOutcome::Reconciled(_) => None,
            EmployeeOutcome::Failed(failure) => Some(failure),
        }
    }

    /// Returns true if the employee was reconciled.
    pub fn is_reconciled(&self) -> bool {
        matches!(self, EmployeeOutcome::Reconciled(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_sample_summary() -> SalarySummary {
        SalarySummary {
            employee_name: "Asha Menon".to_string(),
            email: "asha@firm.test".to_string(),
            branch: "Kochi".to_string(),
            year: 2024,
            month: 4,
            base_salary: dec("30000"),
            days_in_month: 30,
            per_day_salary: dec("1000"),
            present_count: 21,
            absent_count: 3,
            leave_count: 1,
            holiday_count: 1,
            half_day_count: 2,
            leave_relief_count: 0,
            sunday_count: 4,
            sunday_unmarked_count: 4,
            cut_days: 3,
            final_salary: dec("27000"),
            audit_trace: AuditTrace::default(),
        }
    }

    #[test]
    fn test_classified_days_excludes_half_days() {
        let summary = create_sample_summary();
        assert_eq!(summary.classified_days(), 30);
    }

    #[test]
    fn test_payroll_key_falls_back_to_name() {
        let mut summary = create_sample_summary();
        summary.email = "  ".to_string();
        assert_eq!(summary.payroll_key(), "Asha Menon:2024-04");
    }

    #[test]
    fn test_summary_serializes_money_as_strings() {
        let json = serde_json::to_value(create_sample_summary()).unwrap();
        assert_eq!(json["final_salary"], "27000");
        assert_eq!(json["per_day_salary"], "1000");
        assert_eq!(json["cut_days"], 3);
    }

    #[test]
    fn test_outcome_tagged_reconciled() {
        let outcome = EmployeeOutcome::Reconciled(create_sample_summary());
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "reconciled");
        assert_eq!(json["employee_name"], "Asha Menon");

        let back: EmployeeOutcome = serde_json::from_value(json).unwrap();
        assert_eq!(back, outcome);
    }

    #[test]
    fn test_outcome_tagged_failed() {
        let error = EngineError::NegativeSalary {
            employee: "ravi@firm.test".to_string(),
            salary: dec("-1"),
        };
        let outcome =
            EmployeeOutcome::Failed(EmployeeFailure::from_error("Ravi", "ravi@firm.test", &error));

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["code"], "NEGATIVE_SALARY");
        assert!(!outcome.is_reconciled());
        assert!(outcome.summary().is_none());
        assert_eq!(outcome.failure().unwrap().code, "NEGATIVE_SALARY");
    }
}
