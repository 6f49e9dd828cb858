use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::SessionType;
use crate::error::{HearthError, Result};

pub const MOOD_MIN: u8 = 1;
pub const MOOD_MAX: u8 = 10;

/// Check a self-reported mood score against the 1..=10 scale.
pub fn validate_mood(value: i64) -> Result<u8> {
    if (MOOD_MIN as i64..=MOOD_MAX as i64).contains(&value) {
        Ok(value as u8)
    } else {
        Err(HearthError::Validation(format!(
            "Mood must be between {MOOD_MIN} and {MOOD_MAX}, got {value}"
        )))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PatientStatus {
    #[default]
    Active,
    Inactive,
    Completed,
}

impl std::fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

impl std::str::FromStr for PatientStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("Unknown patient status: {s}")),
        }
    }
}

/// A session note written by the therapist.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: String,
    pub date: NaiveDate,
    pub content: String,
    /// Distinct tags in first-seen order.
    pub tags: Vec<String>,
    pub mood: Option<u8>,
}

impl Note {
    pub fn new(
        id: String,
        date: NaiveDate,
        content: String,
        tags: Vec<String>,
        mood: Option<u8>,
    ) -> Result<Self> {
        if let Some(mood) = mood {
            validate_mood(mood as i64)?;
        }

        let mut distinct: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            if !distinct.contains(&tag) {
                distinct.push(tag);
            }
        }

        Ok(Self {
            id,
            date,
            content,
            tags: distinct,
            mood,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoodEntry {
    pub date: NaiveDate,
    pub mood: u8,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEntry {
    pub date: NaiveDate,
    pub score: i32,
    pub area: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub last_session: NaiveDate,
    pub next_session: Option<DateTime<Utc>>,
    /// Usually newest first; the order is whatever the dataset holds.
    pub notes: Vec<Note>,
    pub mood_data: Vec<MoodEntry>,
    pub progress: Vec<ProgressEntry>,
    pub session_type: SessionType,
    pub status: PatientStatus,
}

impl Patient {
    pub fn has_note(&self, note_id: &str) -> bool {
        self.notes.iter().any(|n| n.id == note_id)
    }
}
