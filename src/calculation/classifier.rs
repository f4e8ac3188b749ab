//! Attendance classification.
//!
//! Turns one employee's raw attendance records into exactly one
//! [`DayClassification`] per calendar day of the target month.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::config::{DuplicatePolicy, PayrollPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AuditWarning, DayClassification, DayKind, Employee};

use super::attendance_index::{AttendanceIndex, MatchedBy};
use super::calendar::{days_in_month, is_sunday, iso_date, month_dates};

/// Warning code for a duplicate record that lost to an earlier one.
pub const DUPLICATE_RECORD_IGNORED: &str = "DUPLICATE_RECORD_IGNORED";

/// Warning code for an employee whose records were found by name only.
pub const MATCHED_BY_NAME: &str = "MATCHED_BY_NAME";

/// Warning code for an employee with no matching attendance records.
pub const NO_ATTENDANCE_RECORDS: &str = "NO_ATTENDANCE_RECORDS";

/// A check for one attendance flag.
pub type FlagPredicate = fn(&AttendanceRecord) -> bool;

/// Flag checks in priority order. The first flag that is set decides the day.
pub const FLAG_PRIORITY: [(FlagPredicate, DayKind); 6] = [
    (is_holiday, DayKind::Holiday),
    (is_leave_relief, DayKind::LeaveRelief),
    (is_half_day, DayKind::HalfDay),
    (is_leave, DayKind::Leave),
    (is_present, DayKind::Present),
    (is_absent, DayKind::Absent),
];

fn is_holiday(record: &AttendanceRecord) -> bool {
    record.holiday
}

fn is_leave_relief(record: &AttendanceRecord) -> bool {
    record.leave_relief
}

fn is_half_day(record: &AttendanceRecord) -> bool {
    record.half_day
}

fn is_leave(record: &AttendanceRecord) -> bool {
    record.leave
}

fn is_present(record: &AttendanceRecord) -> bool {
    record.present
}

fn is_absent(record: &AttendanceRecord) -> bool {
    record.absent
}

/// Resolves a record's flags to a single day kind.
///
/// Returns `None` for a record with no flag set; the caller treats such a
/// day as if it had no record.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::classify_record;
/// use salary_engine::models::{AttendanceRecord, DayKind};
///
/// let record = AttendanceRecord {
///     date: "2024-04-02".to_string(),
///     present: true,
///     holiday: true,
///     ..Default::default()
/// };
/// assert_eq!(classify_record(&record), Some(DayKind::Holiday));
/// ```
pub fn classify_record(record: &AttendanceRecord) -> Option<DayKind> {
    FLAG_PRIORITY
        .iter()
        .find(|(is_set, _)| is_set(record))
        .map(|&(_, kind)| kind)
}

/// One employee's classified month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthClassification {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-based.
    pub month: u32,
    /// How the employee's records were found.
    pub matched_by: MatchedBy,
    /// One entry per calendar day, in date order.
    pub days: Vec<DayClassification>,
    /// Data-quality warnings raised while classifying.
    pub warnings: Vec<AuditWarning>,
}

/// Classifies every day of a month for one employee with the default policy.
///
/// # Errors
///
/// - [`EngineError::InvalidDateRange`] if year/month is not a calendar month.
/// - [`EngineError::MalformedRecord`] if one of the employee's records has a
///   date that cannot be parsed.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::classify;
/// use salary_engine::models::{AttendanceRecord, DayKind, Employee};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     name: "Asha Menon".to_string(),
///     email: "asha@firm.test".to_string(),
///     base_salary: Decimal::new(30000, 0),
///     branch: String::new(),
/// };
/// let log = vec![AttendanceRecord {
///     email: "asha@firm.test".to_string(),
///     date: "2024-04-01".to_string(),
///     present: true,
///     ..Default::default()
/// }];
///
/// let days = classify(&employee, &log, 2024, 4).unwrap();
/// assert_eq!(days.len(), 30);
/// assert_eq!(days[0].kind, DayKind::Present);
/// assert_eq!(days[1].kind, DayKind::Absent);
/// assert_eq!(days[6].kind, DayKind::SundayUnmarked); // 2024-04-07
/// ```
pub fn classify(
    employee: &Employee,
    records: &[AttendanceRecord],
    year: i32,
    month: u32,
) -> EngineResult<Vec<DayClassification>> {
    let index = AttendanceIndex::new(records);
    let classified =
        classify_with_policy(employee, &index, year, month, &PayrollPolicy::default())?;
    Ok(classified.days)
}

/// Classifies every day of a month for one employee against a prebuilt index.
///
/// # Errors
///
/// As [`classify`], plus [`EngineError::DuplicateRecord`] when the policy
/// rejects duplicates and the employee has two records for one date.
pub fn classify_with_policy(
    employee: &Employee,
    index: &AttendanceIndex<'_>,
    year: i32,
    month: u32,
    policy: &PayrollPolicy,
) -> EngineResult<MonthClassification> {
    let dates = month_dates(year, month)?;
    let matched = index.records_for(employee);
    let mut warnings = Vec::new();

    debug!(
        employee = %employee.identity(),
        matched_by = ?matched.matched_by,
        records = matched.records.len(),
        "Matched attendance records"
    );
    match matched.matched_by {
        MatchedBy::Email => {}
        MatchedBy::Name => warnings.push(AuditWarning::new(
            MATCHED_BY_NAME,
            format!(
                "No attendance record carried the email '{}'; records were matched by name",
                employee.email.trim()
            ),
            "low",
        )),
        MatchedBy::Unmatched => warnings.push(AuditWarning::new(
            NO_ATTENDANCE_RECORDS,
            "No attendance record matched this employee; every day was left unmarked",
            "medium",
        )),
    }

    let mut by_date: HashMap<NaiveDate, &AttendanceRecord> = HashMap::new();
    for &record in &matched.records {
        let date = record
            .parsed_date()
            .map_err(|e| EngineError::MalformedRecord {
                employee: employee.identity().to_string(),
                date: record.date.clone(),
                message: e.to_string(),
            })?;

        if date.year() != year || date.month() != month {
            continue;
        }

        match by_date.entry(date) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(_) => match policy.duplicate_records {
                DuplicatePolicy::FirstWins => {
                    debug!(
                        employee = %employee.identity(),
                        date = %date,
                        "Ignoring duplicate attendance record"
                    );
                    warnings.push(AuditWarning::new(
                        DUPLICATE_RECORD_IGNORED,
                        format!(
                            "More than one attendance record on {}; the first one was used",
                            iso_date(date)
                        ),
                        "low",
                    ));
                }
                DuplicatePolicy::Reject => {
                    return Err(EngineError::DuplicateRecord {
                        employee: employee.identity().to_string(),
                        date: iso_date(date),
                    });
                }
            },
        }
    }

    let days = dates
        .into_iter()
        .map(|date| {
            let sunday = is_sunday(date);
            let kind = by_date
                .get(&date)
                .and_then(|record| classify_record(record))
                .unwrap_or(if sunday {
                    DayKind::SundayUnmarked
                } else {
                    DayKind::Absent
                });

            DayClassification {
                date,
                day: date.day(),
                kind,
                is_sunday: sunday,
            }
        })
        .collect();

    Ok(MonthClassification {
        year,
        month,
        matched_by: matched.matched_by,
        days,
        warnings,
    })
}

/// Checks that a classification sequence covers exactly one whole month and
/// returns that month as `(year, month, days_in_month)`.
pub(crate) fn classified_month(days: &[DayClassification]) -> EngineResult<(i32, u32, u32)> {
    let first = days.first().ok_or(EngineError::InvalidDateRange {
        year: 0,
        month: 0,
    })?;
    let (year, month) = (first.date.year(), first.date.month());
    let expected = days_in_month(year, month)?;

    let single_month = days
        .iter()
        .all(|d| d.date.year() == year && d.date.month() == month);

    if !single_month || days.len() != expected as usize {
        return Err(EngineError::InvalidDateRange { year, month });
    }

    Ok((year, month, expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn employee() -> Employee {
        Employee {
            name: "Asha Menon".to_string(),
            email: "asha@firm.test".to_string(),
            base_salary: Decimal::new(30000, 0),
            branch: "Kochi".to_string(),
        }
    }

    fn record(date: &str) -> AttendanceRecord {
        AttendanceRecord {
            employee_name: "Asha Menon".to_string(),
            email: "asha@firm.test".to_string(),
            date: date.to_string(),
            ..Default::default()
        }
    }

    fn present(date: &str) -> AttendanceRecord {
        AttendanceRecord {
            present: true,
            ..record(date)
        }
    }

    fn kind_on(days: &[DayClassification], day: u32) -> DayKind {
        days[(day - 1) as usize].kind
    }

    #[test]
    fn test_priority_holiday_beats_everything() {
        let r = AttendanceRecord {
            holiday: true,
            leave_relief: true,
            half_day: true,
            leave: true,
            present: true,
            absent: true,
            ..record("2024-04-02")
        };
        assert_eq!(classify_record(&r), Some(DayKind::Holiday));
    }

    #[test]
    fn test_priority_order_is_exact() {
        let relief = AttendanceRecord {
            leave_relief: true,
            half_day: true,
            ..record("2024-04-02")
        };
        assert_eq!(classify_record(&relief), Some(DayKind::LeaveRelief));

        let half = AttendanceRecord {
            half_day: true,
            leave: true,
            ..record("2024-04-02")
        };
        assert_eq!(classify_record(&half), Some(DayKind::HalfDay));

        let leave = AttendanceRecord {
            leave: true,
            present: true,
            ..record("2024-04-02")
        };
        assert_eq!(classify_record(&leave), Some(DayKind::Leave));

        let both = AttendanceRecord {
            present: true,
            absent: true,
            ..record("2024-04-02")
        };
        assert_eq!(classify_record(&both), Some(DayKind::Present));

        let absent = AttendanceRecord {
            absent: true,
            ..record("2024-04-02")
        };
        assert_eq!(classify_record(&absent), Some(DayKind::Absent));
    }

    #[test]
    fn test_unflagged_record_classifies_to_none() {
        assert_eq!(classify_record(&record("2024-04-02")), None);
    }

    #[test]
    fn test_missing_weekday_is_absent_and_missing_sunday_is_unmarked() {
        let days = classify(&employee(), &[], 2024, 4).unwrap();
        // 2024-04-01 is a Monday, 2024-04-07 a Sunday
        assert_eq!(kind_on(&days, 1), DayKind::Absent);
        assert_eq!(kind_on(&days, 7), DayKind::SundayUnmarked);
        assert!(days[6].is_sunday);
    }

    #[test]
    fn test_recorded_sunday_uses_flags() {
        let log = vec![present("2024-04-07")];
        let days = classify(&employee(), &log, 2024, 4).unwrap();

        let sunday = days[6];
        assert_eq!(sunday.kind, DayKind::Present);
        assert!(sunday.is_sunday);
        assert!(sunday.is_sunday_recorded());
    }

    #[test]
    fn test_unflagged_record_on_sunday_counts_as_unmarked() {
        let log = vec![record("2024-04-07"), record("2024-04-08")];
        let days = classify(&employee(), &log, 2024, 4).unwrap();

        assert_eq!(kind_on(&days, 7), DayKind::SundayUnmarked);
        assert_eq!(kind_on(&days, 8), DayKind::Absent);
    }

    #[test]
    fn test_records_outside_month_are_ignored() {
        let log = vec![present("2024-03-31"), present("2024-05-01")];
        let days = classify(&employee(), &log, 2024, 4).unwrap();
        assert!(days.iter().all(|d| d.kind != DayKind::Present));
    }

    #[test]
    fn test_unsorted_records_are_placed_by_date() {
        let log = vec![present("2024-04-30"), present("2024-04-02")];
        let days = classify(&employee(), &log, 2024, 4).unwrap();

        assert_eq!(kind_on(&days, 2), DayKind::Present);
        assert_eq!(kind_on(&days, 30), DayKind::Present);
        assert_eq!(days[29].day, 30);
    }

    #[test]
    fn test_duplicate_first_wins_by_default() {
        let leave = AttendanceRecord {
            leave: true,
            ..record("2024-04-02")
        };
        let log = vec![leave, present("2024-04-02")];

        let index = AttendanceIndex::new(&log);
        let classified =
            classify_with_policy(&employee(), &index, 2024, 4, &PayrollPolicy::default())
                .unwrap();

        assert_eq!(kind_on(&classified.days, 2), DayKind::Leave);
        assert_eq!(classified.warnings.len(), 1);
        assert_eq!(classified.warnings[0].code, DUPLICATE_RECORD_IGNORED);
    }

    #[test]
    fn test_email_match_adds_no_warning() {
        let log = vec![present("2024-04-02")];
        let index = AttendanceIndex::new(&log);
        let classified =
            classify_with_policy(&employee(), &index, 2024, 4, &PayrollPolicy::default())
                .unwrap();

        assert_eq!(classified.matched_by, MatchedBy::Email);
        assert!(classified.warnings.is_empty());
    }

    #[test]
    fn test_name_match_is_reported() {
        let log = vec![AttendanceRecord {
            email: String::new(),
            ..present("2024-04-02")
        }];
        let index = AttendanceIndex::new(&log);
        let classified =
            classify_with_policy(&employee(), &index, 2024, 4, &PayrollPolicy::default())
                .unwrap();

        assert_eq!(classified.matched_by, MatchedBy::Name);
        assert_eq!(kind_on(&classified.days, 2), DayKind::Present);
        assert_eq!(classified.warnings.len(), 1);
        assert_eq!(classified.warnings[0].code, MATCHED_BY_NAME);
        assert!(classified.warnings[0].message.contains("asha@firm.test"));
    }

    #[test]
    fn test_unmatched_employee_is_reported() {
        let log = vec![AttendanceRecord {
            employee_name: "Ravi Kumar".to_string(),
            email: "ravi@firm.test".to_string(),
            ..present("2024-04-02")
        }];
        let index = AttendanceIndex::new(&log);
        let classified =
            classify_with_policy(&employee(), &index, 2024, 4, &PayrollPolicy::default())
                .unwrap();

        assert_eq!(classified.matched_by, MatchedBy::Unmatched);
        assert_eq!(classified.warnings[0].code, NO_ATTENDANCE_RECORDS);
        assert_eq!(classified.warnings[0].severity, "medium");
    }

    #[test]
    fn test_duplicate_rejected_under_reject_policy() {
        let log = vec![present("2024-04-02"), present("2024-04-02")];
        let policy = PayrollPolicy {
            duplicate_records: DuplicatePolicy::Reject,
            ..Default::default()
        };

        let index = AttendanceIndex::new(&log);
        let result = classify_with_policy(&employee(), &index, 2024, 4, &policy);
        assert_eq!(
            result,
            Err(EngineError::DuplicateRecord {
                employee: "asha@firm.test".to_string(),
                date: "2024-04-02".to_string(),
            })
        );
    }

    #[test]
    fn test_malformed_date_fails() {
        let log = vec![present("2024-04-31")];
        match classify(&employee(), &log, 2024, 4) {
            Err(EngineError::MalformedRecord { employee, date, .. }) => {
                assert_eq!(employee, "asha@firm.test");
                assert_eq!(date, "2024-04-31");
            }
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_date_of_other_employee_is_ignored() {
        let mut other = present("garbage");
        other.email = "ravi@firm.test".to_string();
        other.employee_name = "Ravi Kumar".to_string();

        let days = classify(&employee(), &[other], 2024, 4).unwrap();
        assert_eq!(days.len(), 30);
    }

    #[test]
    fn test_invalid_month_fails() {
        assert_eq!(
            classify(&employee(), &[], 2024, 13),
            Err(EngineError::InvalidDateRange {
                year: 2024,
                month: 13
            })
        );
    }

    #[test]
    fn test_classified_month_accepts_full_month() {
        let days = classify(&employee(), &[], 2024, 2).unwrap();
        assert_eq!(classified_month(&days).unwrap(), (2024, 2, 29));
    }

    #[test]
    fn test_classified_month_rejects_partial_or_empty() {
        let days = classify(&employee(), &[], 2024, 2).unwrap();
        assert!(classified_month(&days[..10]).is_err());
        assert!(classified_month(&[]).is_err());
    }

    fn arb_record() -> impl Strategy<Value = AttendanceRecord> {
        (
            1u32..=31,
            any::<[bool; 6]>(),
        )
            .prop_map(|(day, flags)| AttendanceRecord {
                employee_name: "Asha Menon".to_string(),
                email: "asha@firm.test".to_string(),
                date: format!("2024-01-{:02}", day),
                present: flags[0],
                absent: flags[1],
                leave: flags[2],
                holiday: flags[3],
                half_day: flags[4],
                leave_relief: flags[5],
            })
    }

    proptest! {
        #[test]
        fn prop_one_classification_per_day(
            year in 1970i32..=2100,
            month in 1u32..=12,
        ) {
            let days = classify(&employee(), &[], year, month).unwrap();
            prop_assert_eq!(days.len() as u32, days_in_month(year, month).unwrap());
            for (i, day) in days.iter().enumerate() {
                prop_assert_eq!(day.day, i as u32 + 1);
            }
        }

        #[test]
        fn prop_every_january_day_classified_once(
            log in proptest::collection::vec(arb_record(), 0..60),
        ) {
            let days = classify(&employee(), &log, 2024, 1).unwrap();
            prop_assert_eq!(days.len(), 31);
            let sundays = days.iter().filter(|d| d.is_sunday).count();
            prop_assert_eq!(sundays, 4);
        }
    }
}
