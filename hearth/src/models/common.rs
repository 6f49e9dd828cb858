use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HearthError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wall-clock layouts accepted when a timestamp carries no offset. Such
/// timestamps are read as UTC.
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| HearthError::Validation(format!("Invalid date '{value}': {e}")))
}

/// Parse an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM[:SS]` one taken as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| HearthError::Validation(format!("Invalid timestamp '{value}'")))
}

/// The instant a calendar date begins, in UTC.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::default()).and_utc()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SessionType {
    Individual,
    Couples,
    Family,
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Individual => write!(f, "Individual"),
            Self::Couples => write!(f, "Couples"),
            Self::Family => write!(f, "Family"),
        }
    }
}

impl std::str::FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "individual" => Ok(Self::Individual),
            "couples" => Ok(Self::Couples),
            "family" => Ok(Self::Family),
            _ => Err(format!("Unknown session type: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_date() {
        let date = parse_date("2025-06-25").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2025, 6, 25));
        assert_eq!(parse_date(" 2025-06-25 ").unwrap(), date);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        for bad in ["", "yesterday", "2025-13-01", "2025-02-30", "25/06/2025"] {
            match parse_date(bad) {
                Err(HearthError::Validation(msg)) => assert!(msg.contains("Invalid date")),
                other => panic!("expected validation error for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_timestamp_naive_is_utc() {
        let ts = parse_timestamp("2025-06-30T11:00:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2025-06-30T11:00:00+00:00");

        let short = parse_timestamp("2025-06-30T14:30").unwrap();
        assert_eq!((short.hour(), short.minute()), (14, 30));
    }

    #[test]
    fn test_parse_timestamp_with_offset() {
        let ts = parse_timestamp("2025-06-30T11:00:00+02:00").unwrap();
        assert_eq!(ts.hour(), 9);
        let zulu = parse_timestamp("2025-06-30T11:00:00Z").unwrap();
        assert_eq!(zulu.hour(), 11);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(matches!(
            parse_timestamp("Invalid Date"),
            Err(HearthError::Validation(_))
        ));
        assert!(matches!(
            parse_timestamp("2025-06-30"),
            Err(HearthError::Validation(_))
        ));
    }

    #[test]
    fn test_start_of_day() {
        let date = parse_date("2025-06-25").unwrap();
        assert_eq!(start_of_day(date).to_rfc3339(), "2025-06-25T00:00:00+00:00");
    }

    #[test]
    fn test_session_type_round_trip_names() {
        assert_eq!(SessionType::Couples.to_string(), "Couples");
        assert_eq!("family".parse::<SessionType>().unwrap(), SessionType::Family);
        assert!("group".parse::<SessionType>().is_err());
        let json = serde_json::to_string(&SessionType::Individual).unwrap();
        assert_eq!(json, "\"Individual\"");
    }
}
