use chrono::{Local, NaiveDateTime, SubsecRound, Timelike};

/// Source of wall-clock readings for record timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Process-local wall time, truncated to microseconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local().trunc_subsecs(6)
    }
}

const WHOLE_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";
const MICROSECONDS: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub fn format_timestamp(value: &NaiveDateTime) -> String {
    if value.nanosecond() == 0 {
        value.format(WHOLE_SECONDS).to_string()
    } else {
        value.format(MICROSECONDS).to_string()
    }
}

pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
}

/// Serde adapter for naive ISO-8601 timestamps without an offset.
pub mod iso8601 {
    use chrono::NaiveDateTime;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Timelike};

    use super::{format_timestamp, parse_timestamp, Clock, SystemClock};

    #[test]
    fn whole_seconds_render_without_fraction() {
        let value = NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|date| date.and_hms_opt(10, 0, 0))
            .expect("valid timestamp");

        assert_eq!(format_timestamp(&value), "2024-01-15T10:00:00");
    }

    #[test]
    fn fractional_seconds_render_with_six_digits() {
        let value = NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|date| date.and_hms_micro_opt(10, 0, 0, 42_000))
            .expect("valid timestamp");

        assert_eq!(format_timestamp(&value), "2024-01-15T10:00:00.042000");
        assert_eq!(parse_timestamp("2024-01-15T10:00:00.042000").expect("parse"), value);
    }

    #[test]
    fn system_clock_has_microsecond_resolution() {
        let now = SystemClock.now();
        assert_eq!(now.nanosecond() % 1_000, 0);
    }
}
