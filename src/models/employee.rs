//! Employee and roster models.
//!
//! The roster provider hands over [`RosterEntry`] values with the salary as a
//! raw string. [`RosterEntry::to_employee`] validates that string and produces
//! the [`Employee`] the engine computes with.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

/// An employee whose attendance is reconciled into a monthly salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Display name, used as the fallback join key against attendance.
    pub name: String,
    /// Email address, the primary join key against attendance.
    pub email: String,
    /// Base monthly salary before any deductions.
    pub base_salary: Decimal,
    /// The branch office the employee belongs to.
    #[serde(default)]
    pub branch: String,
}

impl Employee {
    /// Returns the identifier used in errors and log events.
    ///
    /// # Examples
    ///
    /// ```
    /// use salary_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     name: "Asha Menon".to_string(),
    ///     email: String::new(),
    ///     base_salary: Decimal::new(30000, 0),
    ///     branch: "Kochi".to_string(),
    /// };
    /// assert_eq!(employee.identity(), "Asha Menon");
    /// ```
    pub fn identity(&self) -> &str {
        let email = self.email.trim();
        if email.is_empty() {
            self.name.trim()
        } else {
            email
        }
    }
}

/// One row as supplied by the employee roster provider.
///
/// Older roster documents nest `name` and `email` under a `sender`
/// sub-document; deserialization flattens it, preferring top-level fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RosterEntryWire")]
pub struct RosterEntry {
    /// Employee name.
    pub name: String,
    /// Employee email.
    pub email: String,
    /// Base monthly salary as a numeric string.
    pub salary: String,
    /// Branch office.
    pub branch: String,
}

impl RosterEntry {
    /// Validates the raw salary and converts this entry into an [`Employee`].
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidSalary`] when the salary is not a number.
    /// - [`EngineError::NegativeSalary`] when the salary is below zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use salary_engine::models::RosterEntry;
    /// use rust_decimal::Decimal;
    ///
    /// let entry = RosterEntry {
    ///     name: "Asha Menon".to_string(),
    ///     email: "asha@firm.test".to_string(),
    ///     salary: " 30000 ".to_string(),
    ///     branch: "Kochi".to_string(),
    /// };
    /// let employee = entry.to_employee().unwrap();
    /// assert_eq!(employee.base_salary, Decimal::new(30000, 0));
    /// ```
    pub fn to_employee(&self) -> EngineResult<Employee> {
        let identity = if self.email.trim().is_empty() {
            self.name.trim()
        } else {
            self.email.trim()
        };

        let base_salary =
            Decimal::from_str(self.salary.trim()).map_err(|_| EngineError::InvalidSalary {
                employee: identity.to_string(),
                value: self.salary.clone(),
            })?;

        if base_salary < Decimal::ZERO {
            return Err(EngineError::NegativeSalary {
                employee: identity.to_string(),
                salary: base_salary,
            });
        }

        Ok(Employee {
            name: self.name.clone(),
            email: self.email.clone(),
            base_salary,
            branch: self.branch.clone(),
        })
    }
}

/// Identity fields of the legacy `sender` sub-document.
#[derive(Debug, Default, Deserialize)]
struct SenderWire {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// Salary as it appears on the wire: usually a string, sometimes a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SalaryWire {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Debug, Deserialize)]
struct RosterEntryWire {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    salary: Option<SalaryWire>,
    #[serde(default)]
    branch: Option<String>,
    #[serde(default)]
    sender: Option<SenderWire>,
}

impl From<RosterEntryWire> for RosterEntry {
    fn from(wire: RosterEntryWire) -> Self {
        let sender = wire.sender.unwrap_or_default();
        let salary = match wire.salary {
            Some(SalaryWire::Text(text)) => text,
            Some(SalaryWire::Number(number)) => number.to_string(),
            None => String::new(),
        };

        RosterEntry {
            name: wire.name.or(sender.name).unwrap_or_default(),
            email: wire.email.or(sender.email).unwrap_or_default(),
            salary,
            branch: wire.branch.unwrap_or_default(),
        }
    }
}
