//! Configuration types for salary reconciliation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML policy file.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of leave days per month that do not reduce salary.
pub const DEFAULT_GRACE_LEAVE_DAYS: u32 = 2;

/// How the final salary is rounded to a whole currency unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// `floor(x + 0.5)`: midpoints go toward positive infinity.
    #[default]
    HalfUp,
    /// Banker's rounding: midpoints go to the even neighbour.
    HalfEven,
}

impl RoundingMode {
    /// Rounds a value to a whole number.
    ///
    /// # Examples
    ///
    /// ```
    /// use salary_engine::config::RoundingMode;
    /// use rust_decimal::Decimal;
    ///
    /// let value = Decimal::new(405, 1); // 40.5
    /// assert_eq!(RoundingMode::HalfUp.apply(value), Decimal::new(41, 0));
    /// assert_eq!(RoundingMode::HalfEven.apply(value), Decimal::new(40, 0));
    /// ```
    pub fn apply(self, value: Decimal) -> Decimal {
        match self {
            RoundingMode::HalfUp => match value.checked_add(Decimal::new(5, 1)) {
                Some(shifted) => shifted.floor(),
                // Values this large carry no fractional digits.
                None => value.trunc(),
            },
            RoundingMode::HalfEven => {
                value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            }
        }
    }
}

/// What to do when an employee has more than one record for the same date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The first record in input order is used; later ones are reported as
    /// warnings.
    #[default]
    FirstWins,
    /// Duplicates fail the employee with `DuplicateRecord`.
    Reject,
}

/// Policy knobs for one reconciliation run.
///
/// Every field has a default, so an empty YAML document is a valid policy
/// equal to [`PayrollPolicy::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollPolicy {
    /// Leave days per month that are not charged.
    pub grace_leave_days: u32,
    /// Rounding applied to the final salary.
    pub rounding: RoundingMode,
    /// Handling of duplicate attendance records.
    pub duplicate_records: DuplicatePolicy,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            grace_leave_days: DEFAULT_GRACE_LEAVE_DAYS,
            rounding: RoundingMode::default(),
            duplicate_records: DuplicatePolicy::default(),
        }
    }
}
