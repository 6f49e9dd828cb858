//! Shared DTO types used across several v1 endpoints.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;

use crate::analytics::{MoodPoint, MoodTrend};

/// Wire format for instants: RFC 3339 in UTC with a `Z` suffix.
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Wire format for calendar dates: `YYYY-MM-DD`.
pub fn format_date(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoodPointResponse {
    pub date: String,
    pub mood: u8,
    pub x: f64,
    pub y: f64,
}

impl From<&MoodPoint> for MoodPointResponse {
    fn from(point: &MoodPoint) -> Self {
        Self {
            date: format_date(point.date),
            mood: point.mood,
            x: point.x,
            y: point.y,
        }
    }
}

/// A mood series scaled into a drawing box.
///
/// `y` grows with mood. `svgPoints` is ready for an SVG `polyline`, with y
/// already flipped into screen coordinates.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoodTrendResponse {
    pub width: f64,
    pub height: f64,
    pub points: Vec<MoodPointResponse>,
    pub svg_points: String,
}

impl From<&MoodTrend> for MoodTrendResponse {
    fn from(trend: &MoodTrend) -> Self {
        Self {
            width: trend.width,
            height: trend.height,
            points: trend.points.iter().map(MoodPointResponse::from).collect(),
            svg_points: trend.svg_points(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_date, parse_timestamp, MoodEntry};

    #[test]
    fn timestamps_use_zulu_suffix() {
        let ts = parse_timestamp("2025-06-30T09:00:00").unwrap();
        assert_eq!(format_timestamp(ts), "2025-06-30T09:00:00Z");
        assert_eq!(format_date(parse_date("2025-06-05").unwrap()), "2025-06-05");
    }

    #[test]
    fn mood_trend_serializes_camel_case() {
        let entries: Vec<MoodEntry> = [("2025-06-01", 3), ("2025-06-08", 7)]
            .iter()
            .map(|(d, m)| MoodEntry {
                date: parse_date(d).unwrap(),
                mood: *m,
                note: None,
            })
            .collect();
        let trend = MoodTrend::from_entries(&entries, 80.0, 20.0);

        let json = serde_json::to_value(MoodTrendResponse::from(&trend)).unwrap();
        assert_eq!(json["svgPoints"], "0,20 80,0");
        assert_eq!(json["points"][1]["date"], "2025-06-08");
        assert_eq!(json["points"][1]["y"], 20.0);
    }
}
