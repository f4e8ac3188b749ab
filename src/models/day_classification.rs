//! Per-day classification produced by the attendance classifier.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The kind assigned to a single calendar day for one employee.
///
/// # Example
///
/// ```
/// use salary_engine::models::DayKind;
///
/// assert!(DayKind::SundayUnmarked.is_paid());
/// assert!(!DayKind::Absent.is_paid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// Marked present.
    Present,
    /// Marked absent, or a non-Sunday with no usable record.
    Absent,
    /// On leave. The first few leave days per month are free.
    Leave,
    /// Office holiday.
    Holiday,
    /// Half day, paid as present.
    HalfDay,
    /// Leave relief, paid.
    LeaveRelief,
    /// A Sunday with no usable record, paid as a rest day.
    SundayUnmarked,
}

impl DayKind {
    /// Returns true if the day never reduces salary on its own.
    ///
    /// `Leave` reports false: whether a leave day is charged depends on how
    /// many leave days precede it in the month.
    pub fn is_paid(self) -> bool {
        !matches!(self, DayKind::Absent | DayKind::Leave)
    }
}

/// The classification of one calendar day for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayClassification {
    /// The calendar date.
    pub date: NaiveDate,
    /// Day of month, 1-based.
    pub day: u32,
    /// The assigned kind.
    pub kind: DayKind,
    /// Whether the date falls on a Sunday.
    pub is_sunday: bool,
}

impl DayClassification {
    /// Returns true for a Sunday that carried an attendance record.
    ///
    /// Such a day keeps the kind its flags gave it and only counts toward
    /// the Sunday tally.
    pub fn is_sunday_recorded(&self) -> bool {
        self.is_sunday && self.kind != DayKind::SundayUnmarked
    }
}
