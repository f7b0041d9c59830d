use crate::calc::{AttendanceMinutes, compute_minutes_str};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::rules::RuleTable;
use crate::utils::duration_format::{DurationLocale, format_minutes, format_optional};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::{debug, warn};
use utoipa::ToSchema;

/// Why a record's minutes were not computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PendingReason {
    MissingCheckIn,
    MissingCheckOut,
    UnknownDepartment,
    InvalidTimestamp,
}

/// One record ready for a dashboard row.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RecordEvaluation {
    #[schema(example = "att-0001")]
    pub record_id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub department: String,
    #[schema(example = "kantor-pusat", nullable = true)]
    pub department_slug: Option<String>,
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,

    #[schema(nullable = true)]
    pub minutes: Option<AttendanceMinutes>,
    #[schema(nullable = true)]
    pub pending_reason: Option<PendingReason>,

    /// Stored overtime, zeroed when the session was also late.
    #[schema(nullable = true)]
    pub overtime_minutes: Option<u32>,
    #[schema(nullable = true)]
    pub total_work_minutes: Option<u32>,
    #[schema(nullable = true)]
    pub face_score: Option<f64>,

    #[schema(example = "20m")]
    pub late: String,
    #[schema(example = "8h 40m")]
    pub effective: String,
    #[schema(example = "-")]
    pub overtime: String,
    #[schema(example = "-")]
    pub total_work: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AttendanceSummary {
    pub total_records: usize,
    pub evaluated_records: usize,
    pub pending_records: usize,
    #[schema(value_type = Object, example = json!({"present": 3, "late": 1, "absent": 0}))]
    pub status_counts: BTreeMap<AttendanceStatus, usize>,
    pub late_minutes_total: u64,
    pub effective_minutes_total: u64,
    pub overtime_minutes_total: u64,
    #[schema(nullable = true)]
    pub average_face_score: Option<f64>,
    pub late_total: String,
    pub effective_total: String,
    pub overtime_total: String,
}

fn compute_for(
    record: &AttendanceRecord,
    rules: &RuleTable,
) -> Result<(String, AttendanceMinutes), (Option<String>, PendingReason)> {
    let rule = rules.find_by_name(&record.department);
    let slug = rule.map(|r| r.slug());

    let check_in = record
        .check_in
        .as_ref()
        .ok_or((slug.clone(), PendingReason::MissingCheckIn))?;
    let check_out = record
        .check_out
        .as_ref()
        .ok_or((slug.clone(), PendingReason::MissingCheckOut))?;
    let rule = rule.ok_or((None, PendingReason::UnknownDepartment))?;

    match compute_minutes_str(&check_in.time, &check_out.time, rule) {
        Ok(minutes) => Ok((rule.slug(), minutes)),
        Err(e) => {
            warn!(error = %e, record_id = %record.id, "Skipping record with unreadable timestamp");
            Err((slug, PendingReason::InvalidTimestamp))
        }
    }
}

/// Resolves the record's department and computes its minutes.
///
/// The calculator only runs when both timestamps are present and the
/// department is known; otherwise display fields carry the placeholder.
pub fn evaluate_record(
    record: &AttendanceRecord,
    rules: &RuleTable,
    locale: DurationLocale,
) -> RecordEvaluation {
    let (department_slug, minutes, pending_reason) = match compute_for(record, rules) {
        Ok((slug, minutes)) => (Some(slug), Some(minutes), None),
        Err((slug, reason)) => (slug, None, Some(reason)),
    };

    let mut overtime_minutes = record.overtime_minutes;
    if let (Some(m), Some(ot)) = (minutes, overtime_minutes) {
        if m.late_minutes > 0 && ot > 0 {
            debug!(record_id = %record.id, late = m.late_minutes, overtime = ot, "Dropping overtime on late session");
            overtime_minutes = Some(0);
        }
    }

    RecordEvaluation {
        record_id: record.id.clone(),
        employee_id: record.employee_id.clone(),
        employee_name: record.employee_name.clone(),
        department: record.department.clone(),
        department_slug,
        date: record.date,
        status: record.status,
        minutes,
        pending_reason,
        overtime_minutes,
        total_work_minutes: record.total_work_minutes,
        face_score: record.check_in.as_ref().and_then(|c| c.face_score),
        late: format_optional(minutes.map(|m| m.late_minutes), locale),
        effective: format_optional(minutes.map(|m| m.effective_minutes), locale),
        overtime: format_optional(overtime_minutes, locale),
        total_work: format_optional(record.total_work_minutes, locale),
    }
}

pub fn evaluate_records(
    records: &[AttendanceRecord],
    rules: &RuleTable,
    locale: DurationLocale,
) -> Vec<RecordEvaluation> {
    records
        .iter()
        .map(|record| evaluate_record(record, rules, locale))
        .collect()
}

/// Aggregates for the report header.
pub fn summarize(evaluations: &[RecordEvaluation], locale: DurationLocale) -> AttendanceSummary {
    let mut status_counts: BTreeMap<AttendanceStatus, usize> =
        AttendanceStatus::iter().map(|s| (s, 0)).collect();

    let mut evaluated_records = 0;
    let mut late_minutes_total = 0u64;
    let mut effective_minutes_total = 0u64;
    let mut overtime_minutes_total = 0u64;
    let mut face_scores = Vec::new();

    for eval in evaluations {
        *status_counts.entry(eval.status).or_insert(0) += 1;

        if let Some(m) = eval.minutes {
            evaluated_records += 1;
            late_minutes_total += u64::from(m.late_minutes);
            effective_minutes_total += u64::from(m.effective_minutes);
        }
        overtime_minutes_total += u64::from(eval.overtime_minutes.unwrap_or(0));

        if let Some(score) = eval.face_score {
            face_scores.push(score);
        }
    }

    let average_face_score = if face_scores.is_empty() {
        None
    } else {
        Some(face_scores.iter().sum::<f64>() / face_scores.len() as f64)
    };

    let total_records = evaluations.len();
    AttendanceSummary {
        total_records,
        evaluated_records,
        pending_records: total_records - evaluated_records,
        status_counts,
        late_minutes_total,
        effective_minutes_total,
        overtime_minutes_total,
        average_face_score,
        late_total: format_minutes(late_minutes_total, locale),
        effective_total: format_minutes(effective_minutes_total, locale),
        overtime_total: format_minutes(overtime_minutes_total, locale),
    }
}
