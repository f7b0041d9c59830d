use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use derive_more::Display;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "unrecognised date-time `{}`", input)]
pub struct ParseError {
    pub input: String,
}

impl std::error::Error for ParseError {}

/// Parses the check-in/out strings written by the mobile client.
///
/// Offsets are honoured by keeping the wall-clock time in that offset. A bare
/// time of day is placed on 1970-01-01; callers only use the time part.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, ParseError> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }

    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt);
        }
    }

    for fmt in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(trimmed, fmt) {
            return Ok(NaiveDate::default().and_time(time));
        }
    }

    Err(ParseError {
        input: input.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn hm(dt: NaiveDateTime) -> (u32, u32) {
        (dt.hour(), dt.minute())
    }

    #[test]
    fn accepts_iso_variants() {
        assert_eq!(hm(parse_timestamp("2024-01-01T08:20:00").unwrap()), (8, 20));
        assert_eq!(hm(parse_timestamp("2024-01-01T08:20").unwrap()), (8, 20));
        assert_eq!(hm(parse_timestamp("2024-01-01 17:05:59.250").unwrap()), (17, 5));
        assert_eq!(hm(parse_timestamp(" 2024-01-01 17:05 ").unwrap()), (17, 5));
    }

    #[test]
    fn rfc3339_keeps_local_wall_clock() {
        let dt = parse_timestamp("2024-01-01T22:00:00+07:00").unwrap();
        assert_eq!(hm(dt), (22, 0));
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let utc = parse_timestamp("2024-01-02T06:00:00Z").unwrap();
        assert_eq!(hm(utc), (6, 0));
    }

    #[test]
    fn accepts_bare_time_of_day() {
        assert_eq!(hm(parse_timestamp("08:10:00").unwrap()), (8, 10));
        assert_eq!(hm(parse_timestamp("23:59").unwrap()), (23, 59));
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert_eq!(err.input, "yesterday");
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("25:00").is_err());
    }
}
