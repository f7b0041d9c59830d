use actix_web::{App, http::StatusCode, test, web::Data};
use attendance_admin::auth::jwt::generate_access_token;
use attendance_admin::config::Config;
use attendance_admin::routes;
use attendance_admin::utils::duration_format::DurationLocale;
use serde_json::{Value, json};

const SECRET: &str = "test-secret";

const ADMIN: u8 = 1;
const HR: u8 = 2;
const SUPERVISOR: u8 = 3;
const EMPLOYEE: u8 = 4;

fn test_config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".to_string(),
        jwt_secret: SECRET.to_string(),
        rate_protected_per_min: 1000,
        api_prefix: "/api/v1".to_string(),
        rules_file: None,
        duration_locale: DurationLocale::En,
        log_dir: "logs".to_string(),
    }
}

fn bearer(role: u8) -> (&'static str, String) {
    let token = generate_access_token(1, "tester".to_string(), role, None, SECRET, 900).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

macro_rules! init_app {
    () => {{
        let config = test_config();
        let limiter = routes::build_limiter_config(config.rate_protected_per_min).unwrap();
        test::init_service(
            App::new()
                .app_data(Data::new(config.clone()))
                .configure(|cfg| routes::configure(cfg, &config, &limiter)),
        )
        .await
    }};
}

fn get(uri: &str) -> test::TestRequest {
    test::TestRequest::get()
        .uri(uri)
        .peer_addr("127.0.0.1:40000".parse().unwrap())
}

fn post(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .peer_addr("127.0.0.1:40000".parse().unwrap())
        .set_json(body)
}

#[actix_web::test]
async fn health_is_public() {
    let app = init_app!();
    let resp = test::call_service(&app, get("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn missing_token_is_unauthorized() {
    let app = init_app!();
    let resp = test::call_service(&app, get("/api/v1/departments").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn forged_token_is_unauthorized() {
    let app = init_app!();
    let token = generate_access_token(1, "mallory".into(), ADMIN, None, "other", 900).unwrap();
    let req = get("/api/v1/departments")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn employees_cannot_read_rules() {
    let app = init_app!();
    let req = get("/api/v1/departments")
        .insert_header(bearer(EMPLOYEE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn lists_departments_with_slugs() {
    let app = init_app!();
    let req = get("/api/v1/departments")
        .insert_header(bearer(SUPERVISOR))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let data = body["data"].as_array().unwrap();
    assert_eq!(body["total"].as_u64().unwrap() as usize, data.len());
    assert!(
        data.iter()
            .any(|d| d["slug"] == "security-satpam" && d["rule"]["checkOutNextDay"] == true)
    );
}

#[actix_web::test]
async fn resolves_name_and_slug() {
    let app = init_app!();

    let req = get("/api/v1/departments/resolve?name=sales%20%2F%20MARKETING")
        .insert_header(bearer(HR))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["slug"], "sales-marketing");
    assert_eq!(body["rule"]["name"], "Sales / Marketing");

    let req = get("/api/v1/departments/sales-marketing")
        .insert_header(bearer(HR))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["rule"]["toleranceMinutes"], 30);

    let req = get("/api/v1/departments/finance")
        .insert_header(bearer(HR))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn evaluates_a_late_session() {
    let app = init_app!();
    let req = post(
        "/api/v1/attendance/evaluate",
        json!({
            "check_in": "2024-01-01T08:20:00",
            "check_out": "2024-01-01T17:00:00",
            "department": "Kantor Pusat"
        }),
    )
    .insert_header(bearer(SUPERVISOR))
    .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["department_slug"], "kantor-pusat");
    assert_eq!(body["late_minutes"], 20);
    assert_eq!(body["effective_minutes"], 520);
    assert_eq!(body["late"], "20m");
    assert_eq!(body["effective"], "8h 40m");
}

#[actix_web::test]
async fn evaluates_night_shift_in_indonesian() {
    let app = init_app!();
    let req = post(
        "/api/v1/attendance/evaluate",
        json!({
            "check_in": "2024-01-01T22:00:00",
            "check_out": "2024-01-02T06:00:00",
            "department": "security-satpam",
            "locale": "id"
        }),
    )
    .insert_header(bearer(ADMIN))
    .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["effective_minutes"], 480);
    assert_eq!(body["effective"], "8j 0m");
}

#[actix_web::test]
async fn evaluate_rejects_bad_input() {
    let app = init_app!();

    let req = post(
        "/api/v1/attendance/evaluate",
        json!({ "check_in": "08:00", "check_out": "later", "department": "Produksi" }),
    )
    .insert_header(bearer(ADMIN))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("later"));

    let req = post(
        "/api/v1/attendance/evaluate",
        json!({ "check_in": "08:00", "check_out": "17:00", "department": "Finance" }),
    )
    .insert_header(bearer(ADMIN))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn report_requires_hr_or_admin() {
    let app = init_app!();
    let req = post("/api/v1/attendance/report", json!({ "records": [] }))
        .insert_header(bearer(SUPERVISOR))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn report_evaluates_records_and_summarizes() {
    let app = init_app!();
    let req = post(
        "/api/v1/attendance/report",
        json!({
            "records": [
                {
                    "id": "a1",
                    "employeeId": "EMP-001",
                    "employeeName": "Budi",
                    "department": "Kantor Pusat",
                    "date": "2024-01-01",
                    "status": "late",
                    "checkIn": { "time": "2024-01-01T08:20:00", "faceScore": 0.8 },
                    "checkOut": { "time": "2024-01-01T17:00:00" }
                },
                {
                    "id": "a2",
                    "employeeId": "EMP-002",
                    "employeeName": "Sari",
                    "department": "Produksi",
                    "date": "2024-01-01",
                    "status": "present",
                    "checkIn": { "time": "2024-01-01T07:00:00" }
                }
            ]
        }),
    )
    .insert_header(bearer(HR))
    .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["minutes"]["late_minutes"], 20);
    assert_eq!(data[0]["effective"], "8h 40m");
    assert_eq!(data[1]["pending_reason"], "missing_check_out");
    assert_eq!(data[1]["effective"], "-");

    let summary = &body["summary"];
    assert_eq!(summary["total_records"], 2);
    assert_eq!(summary["evaluated_records"], 1);
    assert_eq!(summary["status_counts"]["late"], 1);
    assert_eq!(summary["status_counts"]["present"], 1);
    assert_eq!(summary["late_minutes_total"], 20);
    assert_eq!(summary["effective_total"], "8h 40m");
    assert_eq!(summary["average_face_score"], 0.8);
}
