//! Employee-to-attendance join.
//!
//! Records are matched to an employee by email first and by name only when
//! the email stage finds nothing. Both stages keep the input order of the
//! attendance log, which is what "first record wins" refers to.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, Employee};

/// Which join stage produced an employee's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedBy {
    /// Records carried the employee's email.
    Email,
    /// No email match; records carried the employee's name.
    Name,
    /// No record matched at all.
    Unmatched,
}

/// The records matched to one employee, in input order.
#[derive(Debug, Clone)]
pub struct EmployeeRecords<'a> {
    /// The join stage that produced the records.
    pub matched_by: MatchedBy,
    /// The matched records.
    pub records: Vec<&'a AttendanceRecord>,
}

/// Lookup tables over an attendance log.
///
/// Built once per batch and shared read-only by every employee.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::{AttendanceIndex, MatchedBy};
/// use salary_engine::models::{AttendanceRecord, Employee};
/// use rust_decimal::Decimal;
///
/// let log = vec![AttendanceRecord {
///     employee_name: "Asha Menon".to_string(),
///     date: "2024-04-01".to_string(),
///     present: true,
///     ..Default::default()
/// }];
/// let employee = Employee {
///     name: "Asha Menon".to_string(),
///     email: "asha@firm.test".to_string(),
///     base_salary: Decimal::new(30000, 0),
///     branch: String::new(),
/// };
///
/// let index = AttendanceIndex::new(&log);
/// let matched = index.records_for(&employee);
/// assert_eq!(matched.matched_by, MatchedBy::Name);
/// assert_eq!(matched.records.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AttendanceIndex<'a> {
    records: &'a [AttendanceRecord],
    by_email: HashMap<String, Vec<usize>>,
    by_name: HashMap<String, Vec<usize>>,
}

impl<'a> AttendanceIndex<'a> {
    /// Indexes an attendance log.
    pub fn new(records: &'a [AttendanceRecord]) -> Self {
        let mut by_email: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();

        for (position, record) in records.iter().enumerate() {
            if let Some(key) = email_key(&record.email) {
                by_email.entry(key).or_default().push(position);
            }
            if let Some(key) = name_key(&record.employee_name) {
                by_name.entry(key).or_default().push(position);
            }
        }

        Self {
            records,
            by_email,
            by_name,
        }
    }

    /// Returns the number of records in the underlying log.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the underlying log is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the records belonging to `employee`.
    ///
    /// Email is compared trimmed and case-insensitively, name trimmed and
    /// exactly.
    pub fn records_for(&self, employee: &Employee) -> EmployeeRecords<'a> {
        let email_hits = email_key(&employee.email).and_then(|key| self.by_email.get(&key));
        if let Some(positions) = email_hits {
            return self.collect(MatchedBy::Email, positions);
        }

        let name_hits = name_key(&employee.name).and_then(|key| self.by_name.get(&key));
        if let Some(positions) = name_hits {
            return self.collect(MatchedBy::Name, positions);
        }

        EmployeeRecords {
            matched_by: MatchedBy::Unmatched,
            records: Vec::new(),
        }
    }

    fn collect(&self, matched_by: MatchedBy, positions: &[usize]) -> EmployeeRecords<'a> {
        let records: &'a [AttendanceRecord] = self.records;
        EmployeeRecords {
            matched_by,
            records: positions.iter().map(|&p| &records[p]).collect(),
        }
    }
}

fn email_key(email: &str) -> Option<String> {
    let trimmed = email.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn name_key(name: &str) -> Option<String> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
