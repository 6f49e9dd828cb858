use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session length used when an appointment does not state one.
pub const DEFAULT_DURATION_MINUTES: u32 = 50;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentType {
    Virtual,
    #[serde(rename = "In-Person")]
    InPerson,
}

impl std::fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Virtual => write!(f, "Virtual"),
            Self::InPerson => write!(f, "In-Person"),
        }
    }
}

impl std::str::FromStr for AppointmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "virtual" => Ok(Self::Virtual),
            "in-person" | "in_person" | "inperson" => Ok(Self::InPerson),
            _ => Err(format!("Unknown appointment type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(format!("Unknown appointment status: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    /// Copy of the patient's name at booking time.
    pub name: String,
    pub time: DateTime<Utc>,
    pub appointment_type: AppointmentType,
    pub avatar: String,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
}

impl Appointment {
    pub fn duration_or(&self, fallback: u32) -> u32 {
        self.duration_minutes.unwrap_or(fallback)
    }

    pub fn duration(&self) -> u32 {
        self.duration_or(DEFAULT_DURATION_MINUTES)
    }
}
