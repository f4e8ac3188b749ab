//! Raw attendance records as supplied by the attendance history provider.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One attendance entry for one employee on one date.
///
/// The boolean flags are not mutually exclusive on the wire. Which flag wins
/// is decided by the classifier's priority table, not by this type.
///
/// The date is kept as the raw string so that an unparseable value can be
/// reported against the employee it belongs to instead of failing the whole
/// attendance log at deserialization time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Name of the employee, the fallback join key.
    #[serde(default)]
    pub employee_name: String,
    /// Email of the employee, the primary join key.
    #[serde(default)]
    pub email: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Marked present.
    #[serde(default)]
    pub present: bool,
    /// Marked absent.
    #[serde(default)]
    pub absent: bool,
    /// On leave.
    #[serde(default)]
    pub leave: bool,
    /// Office holiday.
    #[serde(default)]
    pub holiday: bool,
    /// Worked half a day.
    #[serde(default)]
    pub half_day: bool,
    /// Leave granted as relief, paid.
    #[serde(default)]
    pub leave_relief: bool,
}

impl AttendanceRecord {
    /// Parses the record's date.
    ///
    /// Accepts a plain ISO date and, for entries exported with a time
    /// component, an ISO timestamp whose date part is used.
    ///
    /// # Examples
    ///
    /// ```
    /// use salary_engine::models::AttendanceRecord;
    /// use chrono::NaiveDate;
    ///
    /// let record = AttendanceRecord {
    ///     date: "2024-04-02T00:00:00.000Z".to_string(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(record.parsed_date(), Ok(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()));
    /// ```
    pub fn parsed_date(&self) -> Result<NaiveDate, chrono::ParseError> {
        let raw = self.date.trim();
        let date_part = raw.split_once('T').map_or(raw, |(date, _)| date);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
    }
}
