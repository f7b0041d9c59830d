use crate::auth::auth::AuthUser;
use crate::calc::compute_minutes_str;
use crate::config::Config;
use crate::error::ApiError;
use crate::model::attendance::AttendanceRecord;
use crate::report::{AttendanceSummary, RecordEvaluation, evaluate_records, summarize};
use crate::rules;
use crate::utils::duration_format::{DurationLocale, format_minutes};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct EvaluateRequest {
    #[schema(example = "2024-01-01T08:20:00")]
    pub check_in: String,
    #[schema(example = "2024-01-01T17:00:00")]
    pub check_out: String,
    /// Department name or slug
    #[schema(example = "Kantor Pusat")]
    pub department: String,
    #[schema(example = "en", nullable = true)]
    pub locale: Option<DurationLocale>,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "department": "Kantor Pusat",
    "department_slug": "kantor-pusat",
    "late_minutes": 20,
    "effective_minutes": 520,
    "late": "20m",
    "effective": "8h 40m"
}))]
pub struct EvaluateResponse {
    pub department: String,
    pub department_slug: String,
    pub late_minutes: u32,
    pub effective_minutes: u32,
    pub late: String,
    pub effective: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ReportRequest {
    pub records: Vec<AttendanceRecord>,
    #[schema(example = "id", nullable = true)]
    pub locale: Option<DurationLocale>,
}

#[derive(Serialize, ToSchema)]
pub struct ReportResponse {
    pub data: Vec<RecordEvaluation>,
    pub summary: AttendanceSummary,
}

/// Evaluate one check-in/check-out pair
#[utoipa::path(
    post,
    path = "/api/v1/attendance/evaluate",
    request_body(
        content = EvaluateRequest,
        description = "Check-in/out timestamps and the department they belong to",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Late and effective minutes", body = EvaluateResponse),
        (status = 400, description = "Unreadable timestamp", body = Object, example = json!({
            "error": "unrecognised date-time `later`"
        })),
        (status = 404, description = "Unknown department"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn evaluate(
    auth: AuthUser,
    config: web::Data<Config>,
    payload: web::Json<EvaluateRequest>,
) -> actix_web::Result<impl Responder> {
    auth.require_evaluator()?;

    let rule = rules::global()
        .find_by_name(&payload.department)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown department `{}`", payload.department)))?;

    let minutes = compute_minutes_str(&payload.check_in, &payload.check_out, rule)
        .map_err(ApiError::from)?;
    let locale = payload.locale.unwrap_or(config.duration_locale);

    debug!(
        user = %auth.username,
        department = %rule.name,
        late = minutes.late_minutes,
        effective = minutes.effective_minutes,
        "Evaluated attendance session"
    );

    Ok(HttpResponse::Ok().json(EvaluateResponse {
        department: rule.name.clone(),
        department_slug: rule.slug(),
        late_minutes: minutes.late_minutes,
        effective_minutes: minutes.effective_minutes,
        late: format_minutes(u64::from(minutes.late_minutes), locale),
        effective: format_minutes(u64::from(minutes.effective_minutes), locale),
    }))
}

/// Evaluate a batch of attendance records
#[utoipa::path(
    post,
    path = "/api/v1/attendance/report",
    request_body(
        content = ReportRequest,
        description = "Records fetched by the dashboard",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Per-record evaluation with summary", body = ReportResponse),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn report(
    auth: AuthUser,
    config: web::Data<Config>,
    payload: web::Json<ReportRequest>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let locale = payload.locale.unwrap_or(config.duration_locale);
    let data = evaluate_records(&payload.records, rules::global(), locale);
    let summary = summarize(&data, locale);

    info!(
        user = %auth.username,
        records = summary.total_records,
        pending = summary.pending_records,
        "Attendance report generated"
    );

    Ok(HttpResponse::Ok().json(ReportResponse { data, summary }))
}
