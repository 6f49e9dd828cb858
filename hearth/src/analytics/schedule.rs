use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Appointment;

/// Order appointments by start time. Equal times keep their relative order.
pub fn sort_appointments(appointments: &mut [Appointment]) {
    appointments.sort_by_key(|a| a.time);
}

/// Time left until a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Countdown {
    Remaining {
        hours: u64,
        minutes: u8,
        seconds: u8,
    },
    Started,
}

impl Countdown {
    /// Whole seconds are truncated; any positive remainder still counts
    /// as remaining, so the last second reads `00:00:00`.
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let millis = target.signed_duration_since(now).num_milliseconds();
        if millis <= 0 {
            return Self::Started;
        }

        let total = (millis / 1000) as u64;
        Self::Remaining {
            hours: total / 3600,
            minutes: ((total % 3600) / 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started)
    }

    pub fn total_seconds(&self) -> u64 {
        match self {
            Self::Remaining {
                hours,
                minutes,
                seconds,
            } => hours * 3600 + u64::from(*minutes) * 60 + u64::from(*seconds),
            Self::Started => 0,
        }
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remaining {
                hours,
                minutes,
                seconds,
            } => write!(f, "{hours:02}:{minutes:02}:{seconds:02}"),
            Self::Started => write!(f, "Session Started"),
        }
    }
}
