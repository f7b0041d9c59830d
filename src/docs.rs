use crate::api::attendance::{EvaluateRequest, EvaluateResponse, ReportRequest, ReportResponse};
use crate::api::department::{DepartmentListResponse, DepartmentResponse, ResolveQuery};
use crate::calc::AttendanceMinutes;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, CheckIn, CheckOut};
use crate::model::department_rule::DepartmentRule;
use crate::report::{AttendanceSummary, PendingReason, RecordEvaluation};
use crate::utils::duration_format::DurationLocale;
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Admin API",
        version = "0.1.0",
        description = r#"
## Attendance administration

Back end for the attendance dashboard. Check-in/out data is captured by the
mobile client (face recognition + GPS); this service turns it into
minute-accurate outcomes.

### Features
- **Department rules**
  - List rules, resolve a department name to its slug, fetch a rule by slug
- **Attendance evaluation**
  - Late and effective minutes for a single check-in/check-out pair
  - Batch report over dashboard records with totals per status

### Security
All `/api/v1` endpoints require a **JWT Bearer** access token from the
authentication provider. Reports are limited to **Admin** and **HR**.
"#,
    ),
    paths(
        crate::api::department::list_departments,
        crate::api::department::resolve_department,
        crate::api::department::get_department,

        crate::api::attendance::evaluate,
        crate::api::attendance::report
    ),
    components(
        schemas(
            DepartmentRule,
            DepartmentResponse,
            DepartmentListResponse,
            ResolveQuery,
            AttendanceStatus,
            AttendanceRecord,
            CheckIn,
            CheckOut,
            AttendanceMinutes,
            DurationLocale,
            EvaluateRequest,
            EvaluateResponse,
            ReportRequest,
            ReportResponse,
            RecordEvaluation,
            PendingReason,
            AttendanceSummary
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Department", description = "Department rule lookup"),
        (name = "Attendance", description = "Attendance evaluation"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
