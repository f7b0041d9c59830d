//! Attendance-window evaluation: turns a check-in/check-out pair and a
//! department rule into late and effective minutes.
//!
//! Everything here is pure. Dates are ignored; only the time of day of each
//! timestamp matters, with night-shift rules rolling check-out into the next
//! day.

use crate::model::department_rule::DepartmentRule;
use crate::utils::time_parse::{ParseError, parse_timestamp};
use chrono::Timelike;
use serde::Serialize;
use utoipa::ToSchema;

pub const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct AttendanceMinutes {
    #[schema(example = 20)]
    pub late_minutes: u32,
    #[schema(example = 520)]
    pub effective_minutes: u32,
}

fn minute_of_day(t: &impl Timelike) -> i64 {
    i64::from(t.hour()) * 60 + i64::from(t.minute())
}

fn to_minutes(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Check-out minus check-in in minutes, after the next-day adjustment.
///
/// May be negative when a day-shift rule sees a check-out clock time earlier
/// than the check-in.
pub fn total_span_minutes(
    check_in: &impl Timelike,
    check_out: &impl Timelike,
    rule: &DepartmentRule,
) -> i64 {
    let mut out = minute_of_day(check_out);
    if rule.check_out_next_day {
        out += MINUTES_PER_DAY;
    }
    out - minute_of_day(check_in)
}

/// Lateness charged for a check-in.
///
/// Tolerance is a gate: once exceeded, the full raw lateness is charged.
pub fn late_minutes(check_in: &impl Timelike, rule: &DepartmentRule) -> u32 {
    let raw_late = minute_of_day(check_in) - rule.scheduled_start_minutes();
    if raw_late > i64::from(rule.tolerance_minutes) {
        to_minutes(raw_late)
    } else {
        0
    }
}

pub fn compute_minutes(
    check_in: &impl Timelike,
    check_out: &impl Timelike,
    rule: &DepartmentRule,
) -> AttendanceMinutes {
    let late = late_minutes(check_in, rule);
    let span = total_span_minutes(check_in, check_out, rule);

    AttendanceMinutes {
        late_minutes: late,
        effective_minutes: to_minutes(span - i64::from(late)),
    }
}

/// Same as [`compute_minutes`] for the raw strings stored on a record.
pub fn compute_minutes_str(
    check_in: &str,
    check_out: &str,
    rule: &DepartmentRule,
) -> Result<AttendanceMinutes, ParseError> {
    let check_in = parse_timestamp(check_in)?;
    let check_out = parse_timestamp(check_out)?;
    Ok(compute_minutes(&check_in, &check_out, rule))
}
