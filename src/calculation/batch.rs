//! Batch reconciliation over a whole roster.
//!
//! Each roster entry is parsed, classified and reconciled on its own. A
//! failure for one employee becomes a [`EmployeeOutcome::Failed`] entry and
//! never stops the rest of the batch. Employees share only the read-only
//! attendance index and policy, so callers may fan the work out across
//! threads.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::PayrollPolicy;
use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, EmployeeFailure, EmployeeOutcome, PayrollRun, RosterEntry, SalarySummary,
};

use super::attendance_index::AttendanceIndex;
use super::calendar::days_in_month;
use super::classifier::classify_with_policy;
use super::reconciler::reconcile_with_policy;

/// Reconciles rosters under a fixed policy.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::Reconciler;
/// use salary_engine::config::PayrollPolicy;
/// use salary_engine::models::{AttendanceRecord, RosterEntry};
///
/// let roster = vec![RosterEntry {
///     name: "Asha Menon".to_string(),
///     email: "asha@firm.test".to_string(),
///     salary: "30000".to_string(),
///     branch: "Kochi".to_string(),
/// }];
/// let log = vec![AttendanceRecord {
///     email: "asha@firm.test".to_string(),
///     date: "2024-04-01".to_string(),
///     present: true,
///     ..Default::default()
/// }];
///
/// let reconciler = Reconciler::new(PayrollPolicy::default());
/// let outcomes = reconciler.reconcile_all(&roster, &log, 2024, 4).unwrap();
/// assert_eq!(outcomes.len(), 1);
/// assert!(outcomes[0].is_reconciled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    policy: PayrollPolicy,
}

impl Reconciler {
    /// Creates a reconciler with the given policy.
    pub fn new(policy: PayrollPolicy) -> Self {
        Self { policy }
    }

    /// Returns the active policy.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }

    /// Reconciles every roster entry for one month, in roster order.
    ///
    /// Returns an empty list, not an error, when either the roster or the
    /// attendance log is empty.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDateRange`](crate::error::EngineError::InvalidDateRange)
    /// if year/month is not a calendar month. Every other error is reported
    /// per employee.
    pub fn reconcile_all(
        &self,
        roster: &[RosterEntry],
        attendance_log: &[AttendanceRecord],
        year: i32,
        month: u32,
    ) -> EngineResult<Vec<EmployeeOutcome>> {
        days_in_month(year, month)?;

        if roster.is_empty() || attendance_log.is_empty() {
            warn!(
                employees = roster.len(),
                records = attendance_log.len(),
                year,
                month,
                "Roster or attendance log is empty, nothing to reconcile"
            );
            return Ok(Vec::new());
        }

        let start_time = Instant::now();
        let index = AttendanceIndex::new(attendance_log);
        info!(
            employees = roster.len(),
            records = index.len(),
            year,
            month,
            "Reconciling payroll"
        );

        let outcomes: Vec<EmployeeOutcome> = roster
            .iter()
            .map(|entry| match self.reconcile_entry(entry, &index, year, month) {
                Ok(summary) => {
                    debug!(
                        employee = %entry.email,
                        cut_days = summary.cut_days,
                        final_salary = %summary.final_salary,
                        "Employee reconciled"
                    );
                    EmployeeOutcome::Reconciled(summary)
                }
                Err(err) => {
                    warn!(
                        employee = %entry.name,
                        email = %entry.email,
                        code = err.code(),
                        error = %err,
                        "Employee reconciliation failed"
                    );
                    EmployeeOutcome::Failed(EmployeeFailure::from_error(
                        entry.name.clone(),
                        entry.email.clone(),
                        &err,
                    ))
                }
            })
            .collect();

        let failed = outcomes.iter().filter(|o| !o.is_reconciled()).count();
        info!(
            employees = outcomes.len(),
            failed,
            duration_us = start_time.elapsed().as_micros() as u64,
            "Payroll reconciliation completed"
        );

        Ok(outcomes)
    }

    /// Reconciles a roster and wraps the outcomes in a [`PayrollRun`].
    ///
    /// # Errors
    ///
    /// As [`Reconciler::reconcile_all`].
    pub fn run_payroll(
        &self,
        roster: &[RosterEntry],
        attendance_log: &[AttendanceRecord],
        year: i32,
        month: u32,
    ) -> EngineResult<PayrollRun> {
        let outcomes = self.reconcile_all(roster, attendance_log, year, month)?;
        let run = PayrollRun::new(year, month, outcomes);
        info!(
            run_id = %run.run_id,
            reconciled = run.totals.reconciled,
            failed = run.totals.failed,
            total_payable = %run.totals.total_payable,
            "Payroll run assembled"
        );
        Ok(run)
    }

    fn reconcile_entry(
        &self,
        entry: &RosterEntry,
        index: &AttendanceIndex<'_>,
        year: i32,
        month: u32,
    ) -> EngineResult<SalarySummary> {
        let employee = entry.to_employee()?;
        let classified = classify_with_policy(&employee, index, year, month, &self.policy)?;
        let mut summary = reconcile_with_policy(&employee, &classified.days, &self.policy)?;

        let mut warnings = classified.warnings;
        warnings.append(&mut summary.audit_trace.warnings);
        summary.audit_trace.warnings = warnings;

        Ok(summary)
    }
}

/// Reconciles every roster entry for one month with the default policy.
///
/// # Errors
///
/// As [`Reconciler::reconcile_all`].
pub fn reconcile_all(
    roster: &[RosterEntry],
    attendance_log: &[AttendanceRecord],
    year: i32,
    month: u32,
) -> EngineResult<Vec<EmployeeOutcome>> {
    Reconciler::default().reconcile_all(roster, attendance_log, year, month)
}

/// Reconciles a roster with the default policy and wraps it in a run.
///
/// # Errors
///
/// As [`Reconciler::reconcile_all`].
pub fn run_payroll(
    roster: &[RosterEntry],
    attendance_log: &[AttendanceRecord],
    year: i32,
    month: u32,
) -> EngineResult<PayrollRun> {
    Reconciler::default().run_payroll(roster, attendance_log, year, month)
}
