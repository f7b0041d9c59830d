use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    Leave,
    Overtime,
    Holiday,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    #[schema(example = "2024-01-01T08:20:00")]
    pub time: String,
    /// Face-match confidence reported by the mobile client.
    #[schema(example = 0.93, nullable = true)]
    pub face_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CheckOut {
    #[schema(example = "2024-01-01T17:00:00")]
    pub time: String,
}

/// One employee-day as stored by the check-in client.
///
/// Read-only here: the service evaluates records, it never writes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "att-0001",
        "employeeId": "EMP-001",
        "employeeName": "Budi Santoso",
        "department": "Kantor Pusat",
        "date": "2024-01-01",
        "status": "late",
        "checkIn": { "time": "2024-01-01T08:20:00", "faceScore": 0.93 },
        "checkOut": { "time": "2024-01-01T17:00:00" }
    })
)]
pub struct AttendanceRecord {
    pub id: String,
    pub employee_id: String,
    pub employee_name: String,
    pub department: String,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    pub status: AttendanceStatus,

    #[serde(default)]
    pub check_in: Option<CheckIn>,
    #[serde(default)]
    pub check_out: Option<CheckOut>,

    #[serde(default)]
    pub late_minutes: Option<u32>,
    #[serde(default)]
    pub overtime_minutes: Option<u32>,
    #[serde(default)]
    pub total_work_minutes: Option<u32>,
}
