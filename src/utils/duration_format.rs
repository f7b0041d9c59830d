use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Shown wherever a duration cannot be computed.
pub const PLACEHOLDER: &str = "-";

/// Unit suffixes used by the dashboard: English `h` or Indonesian `j` (jam).
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DurationLocale {
    #[default]
    En,
    Id,
}

impl DurationLocale {
    fn hour_suffix(self) -> char {
        match self {
            DurationLocale::En => 'h',
            DurationLocale::Id => 'j',
        }
    }
}

/// `"{h}h {m}m"`, or `"{m}m"` when under an hour.
pub fn format_minutes(minutes: u64, locale: DurationLocale) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours == 0 {
        format!("{rest}m")
    } else {
        format!("{hours}{} {rest}m", locale.hour_suffix())
    }
}

pub fn format_optional(minutes: Option<u32>, locale: DurationLocale) -> String {
    match minutes {
        Some(m) => format_minutes(u64::from(m), locale),
        None => PLACEHOLDER.to_string(),
    }
}
