use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Attendance policy for one department or shift.
///
/// Times are `HH:mm` on the wire. The table is static configuration: rules are
/// loaded once per process and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "name": "Kantor Pusat",
        "checkInTime": "08:00",
        "checkOutTime": "17:00",
        "checkOutNextDay": false,
        "toleranceMinutes": 15,
        "trackFromHome": false,
        "targetBased": false,
        "color": "#2563eb",
        "description": "Head office, regular day shift"
    })
)]
pub struct DepartmentRule {
    #[schema(example = "Kantor Pusat")]
    pub name: String,

    #[serde(with = "hhmm")]
    #[schema(example = "08:00", value_type = String)]
    pub check_in_time: NaiveTime,

    #[serde(with = "hhmm")]
    #[schema(example = "17:00", value_type = String)]
    pub check_out_time: NaiveTime,

    /// Night shift: check-out is expected on the day after check-in.
    #[serde(default)]
    pub check_out_next_day: bool,

    /// Grace period after the scheduled start.
    #[serde(default)]
    #[schema(example = 15)]
    pub tolerance_minutes: u32,

    #[serde(default)]
    pub track_from_home: bool,

    #[serde(default)]
    pub target_based: bool,

    #[serde(default)]
    #[schema(example = "#2563eb")]
    pub color: String,

    #[serde(default)]
    pub description: String,
}

impl DepartmentRule {
    /// URL-safe identifier derived from the department name.
    pub fn slug(&self) -> String {
        crate::rules::slugify(&self.name)
    }

    /// Scheduled check-in as minutes since midnight.
    pub fn scheduled_start_minutes(&self) -> i64 {
        i64::from(self.check_in_time.hour()) * 60 + i64::from(self.check_in_time.minute())
    }
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|_| D::Error::custom(format!("expected HH:mm, got `{raw}`")))
    }
}
