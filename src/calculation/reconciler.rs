//! Salary reconciliation.
//!
//! Aggregates a month of [`DayClassification`]s into a [`SalarySummary`]:
//!
//! ```text
//! cut_days     = absent + max(0, leave - grace_leave_days)
//! per_day      = base_salary / days_in_month
//! final_salary = round(base_salary - cut_days * per_day)
//!              = round(base_salary * (days_in_month - cut_days) / days_in_month)
//! ```
//!
//! The second form is what gets computed, so midpoints are exact.
//!
//! Every calendar day, Sundays and holidays included, counts toward the
//! per-day divisor.

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::PayrollPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, DayClassification, DayKind, Employee, SalarySummary,
};

use super::classifier::classified_month;

/// Warning code for a final salary below zero.
pub const NEGATIVE_FINAL_SALARY: &str = "NEGATIVE_FINAL_SALARY";

/// Per-kind day counts for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayTally {
    /// Present days, half days included.
    pub present: u32,
    /// Absent days.
    pub absent: u32,
    /// Leave days.
    pub leave: u32,
    /// Holidays.
    pub holiday: u32,
    /// Half days.
    pub half_day: u32,
    /// Leave relief days.
    pub leave_relief: u32,
    /// Days on a Sunday.
    pub sunday: u32,
    /// Sundays without a usable record.
    pub sunday_unmarked: u32,
    /// Days whose kind never reduces salary. Leave is excluded even when
    /// it falls inside the grace allowance.
    pub paid: u32,
}

impl DayTally {
    /// Counts classifications by kind.
    ///
    /// A half day increments both `half_day` and `present`.
    pub fn from_days(days: &[DayClassification]) -> Self {
        let mut tally = Self::default();
        for day in days {
            if day.is_sunday {
                tally.sunday += 1;
            }
            if day.kind.is_paid() {
                tally.paid += 1;
            }
            match day.kind {
                DayKind::Present => tally.present += 1,
                DayKind::Absent => tally.absent += 1,
                DayKind::Leave => tally.leave += 1,
                DayKind::Holiday => tally.holiday += 1,
                DayKind::HalfDay => {
                    tally.half_day += 1;
                    tally.present += 1;
                }
                DayKind::LeaveRelief => tally.leave_relief += 1,
                DayKind::SundayUnmarked => tally.sunday_unmarked += 1,
            }
        }
        tally
    }

    /// Days charged against salary.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_engine::calculation::DayTally;
    ///
    /// let tally = DayTally { absent: 1, leave: 3, ..Default::default() };
    /// assert_eq!(tally.cut_days(2), 2);
    /// ```
    pub fn cut_days(&self, grace_leave_days: u32) -> u32 {
        self.absent + self.leave.saturating_sub(grace_leave_days)
    }
}

/// Reconciles one employee's month with the default policy.
///
/// # Errors
///
/// - [`EngineError::NegativeSalary`] if the base salary is below zero.
/// - [`EngineError::InvalidDateRange`] if `classifications` is empty, spans
///   more than one month, or does not cover every day of its month.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::{classify, reconcile};
/// use salary_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     name: "Asha Menon".to_string(),
///     email: "asha@firm.test".to_string(),
///     base_salary: Decimal::new(30000, 0),
///     branch: String::new(),
/// };
///
/// // No attendance at all in April 2024: 26 weekdays absent, 4 paid Sundays.
/// let days = classify(&employee, &[], 2024, 4).unwrap();
/// let summary = reconcile(&employee, &days).unwrap();
/// assert_eq!(summary.cut_days, 26);
/// assert_eq!(summary.final_salary, Decimal::new(4000, 0));
/// ```
pub fn reconcile(
    employee: &Employee,
    classifications: &[DayClassification],
) -> EngineResult<SalarySummary> {
    reconcile_with_policy(employee, classifications, &PayrollPolicy::default())
}

/// Reconciles one employee's month under an explicit policy.
///
/// # Errors
///
/// As [`reconcile`].
pub fn reconcile_with_policy(
    employee: &Employee,
    classifications: &[DayClassification],
    policy: &PayrollPolicy,
) -> EngineResult<SalarySummary> {
    let base_salary = employee.base_salary;
    if base_salary < Decimal::ZERO {
        return Err(EngineError::NegativeSalary {
            employee: employee.identity().to_string(),
            salary: base_salary,
        });
    }

    let (year, month, days_in_month) = classified_month(classifications)?;
    let tally = DayTally::from_days(classifications);
    let mut steps = Vec::new();
    let mut warnings = Vec::new();

    steps.push(AuditStep {
        step_number: 1,
        rule_id: "day_tally".to_string(),
        rule_name: "Attendance Day Tally".to_string(),
        input: serde_json::json!({
            "year": year,
            "month": month,
            "days_in_month": days_in_month,
        }),
        output: serde_json::json!({
            "present": tally.present,
            "absent": tally.absent,
            "leave": tally.leave,
            "holiday": tally.holiday,
            "half_day": tally.half_day,
            "leave_relief": tally.leave_relief,
            "sunday": tally.sunday,
            "sunday_unmarked": tally.sunday_unmarked,
            "paid": tally.paid,
        }),
        reasoning: format!(
            "{} days classified: {} present ({} half), {} absent, {} leave, {} holiday, \
             {} leave relief, {} unmarked Sundays",
            days_in_month,
            tally.present,
            tally.half_day,
            tally.absent,
            tally.leave,
            tally.holiday,
            tally.leave_relief,
            tally.sunday_unmarked
        ),
    });

    let charged_leave = tally.leave.saturating_sub(policy.grace_leave_days);
    let cut_days = tally.cut_days(policy.grace_leave_days);

    steps.push(AuditStep {
        step_number: 2,
        rule_id: "grace_leave".to_string(),
        rule_name: "Grace Leave Allowance".to_string(),
        input: serde_json::json!({
            "leave_count": tally.leave,
            "grace_leave_days": policy.grace_leave_days,
            "absent_count": tally.absent,
        }),
        output: serde_json::json!({
            "charged_leave": charged_leave,
            "cut_days": cut_days,
        }),
        reasoning: format!(
            "{} leave days with {} free: {} charged; {} absences + {} charged leave = {} cut days",
            tally.leave, policy.grace_leave_days, charged_leave, tally.absent, charged_leave, cut_days
        ),
    });

    let overflow = || EngineError::SalaryOverflow {
        employee: employee.identity().to_string(),
    };

    let divisor = Decimal::from(days_in_month);
    let per_day_salary = base_salary.checked_div(divisor).ok_or_else(overflow)?;

    // Multiply before dividing: `per_day_salary` is cut at 28 digits, which
    // can pull an exact .5 just below the midpoint.
    let payable_days = Decimal::from(days_in_month) - Decimal::from(cut_days);
    let unrounded = base_salary
        .checked_mul(payable_days)
        .and_then(|scaled| scaled.checked_div(divisor))
        .ok_or_else(overflow)?;
    let deduction = base_salary.checked_sub(unrounded).ok_or_else(overflow)?;
    let final_salary = policy.rounding.apply(unrounded);

    steps.push(AuditStep {
        step_number: 3,
        rule_id: "per_day_salary".to_string(),
        rule_name: "Per-Day Salary".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "days_in_month": days_in_month,
        }),
        output: serde_json::json!({
            "per_day_salary": per_day_salary.normalize().to_string(),
        }),
        reasoning: format!(
            "{} / {} days = {}",
            base_salary.normalize(),
            days_in_month,
            per_day_salary.normalize()
        ),
    });

    steps.push(AuditStep {
        step_number: 4,
        rule_id: "final_salary".to_string(),
        rule_name: "Final Salary".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "cut_days": cut_days,
            "per_day_salary": per_day_salary.normalize().to_string(),
            "rounding": policy.rounding,
        }),
        output: serde_json::json!({
            "deduction": deduction.normalize().to_string(),
            "final_salary": final_salary.normalize().to_string(),
        }),
        reasoning: format!(
            "{} × ({} - {}) / {} = {}, rounded to {}",
            base_salary.normalize(),
            days_in_month,
            cut_days,
            days_in_month,
            unrounded.normalize(),
            final_salary.normalize()
        ),
    });

    if let Some(warning) = negative_salary_warning(final_salary) {
        warn!(
            employee = %employee.identity(),
            final_salary = %final_salary,
            "Final salary is negative"
        );
        warnings.push(warning);
    }

    Ok(SalarySummary {
        employee_name: employee.name.clone(),
        email: employee.email.clone(),
        branch: employee.branch.clone(),
        year,
        month,
        base_salary,
        days_in_month,
        per_day_salary,
        present_count: tally.present,
        absent_count: tally.absent,
        leave_count: tally.leave,
        holiday_count: tally.holiday,
        half_day_count: tally.half_day,
        leave_relief_count: tally.leave_relief,
        sunday_count: tally.sunday,
        sunday_unmarked_count: tally.sunday_unmarked,
        cut_days,
        final_salary,
        audit_trace: AuditTrace { steps, warnings },
    })
}

/// Flags, without clamping, a final salary below zero.
fn negative_salary_warning(final_salary: Decimal) -> Option<AuditWarning> {
    (final_salary < Decimal::ZERO).then(|| {
        AuditWarning::new(
            NEGATIVE_FINAL_SALARY,
            format!(
                "Final salary {} is below zero and was not clamped",
                final_salary.normalize()
            ),
            "high",
        )
    })
}
