use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::department_rule::DepartmentRule;
use crate::rules;
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, ToSchema)]
pub struct DepartmentResponse {
    #[schema(example = "security-satpam")]
    pub slug: String,
    pub rule: DepartmentRule,
}

impl From<&DepartmentRule> for DepartmentResponse {
    fn from(rule: &DepartmentRule) -> Self {
        Self {
            slug: rule.slug(),
            rule: rule.clone(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct DepartmentListResponse {
    pub data: Vec<DepartmentResponse>,
    #[schema(example = 7)]
    pub total: usize,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct ResolveQuery {
    /// Department name as shown on the dashboard (any case)
    #[schema(example = "Security (Satpam)")]
    pub name: String,
}

/// List department rules
#[utoipa::path(
    get,
    path = "/api/v1/departments",
    responses(
        (status = 200, description = "All department rules", body = DepartmentListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Department"
)]
pub async fn list_departments(auth: AuthUser) -> actix_web::Result<impl Responder> {
    auth.require_evaluator()?;

    let data: Vec<DepartmentResponse> = rules::global().all().iter().map(Into::into).collect();
    let total = data.len();

    Ok(HttpResponse::Ok().json(DepartmentListResponse { data, total }))
}

/// Resolve a department name to its slug
#[utoipa::path(
    get,
    path = "/api/v1/departments/resolve",
    params(ResolveQuery),
    responses(
        (status = 200, description = "Matching department", body = DepartmentResponse),
        (status = 404, description = "No department with that name", body = Object, example = json!({
            "error": "Unknown department `Finance`"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Department"
)]
pub async fn resolve_department(
    auth: AuthUser,
    query: web::Query<ResolveQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_evaluator()?;

    let rule = rules::global()
        .find_by_name(&query.name)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown department `{}`", query.name)))?;

    Ok(HttpResponse::Ok().json(DepartmentResponse::from(rule)))
}

/// Get a department rule by slug
#[utoipa::path(
    get,
    path = "/api/v1/departments/{slug}",
    params(
        ("slug" = String, Path, description = "Department slug, e.g. `kantor-pusat`")
    ),
    responses(
        (status = 200, description = "Department rule", body = DepartmentResponse),
        (status = 404, description = "Department not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Department"
)]
pub async fn get_department(
    auth: AuthUser,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    auth.require_evaluator()?;

    let slug = path.into_inner();
    let rule = rules::global()
        .find_by_slug(&slug)
        .ok_or_else(|| ApiError::NotFound(format!("Department `{slug}` not found")))?;

    Ok(HttpResponse::Ok().json(DepartmentResponse::from(rule)))
}
