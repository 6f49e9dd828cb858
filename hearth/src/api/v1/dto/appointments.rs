//! Schedule and countdown DTOs for the v1 API.

use serde::Serialize;

use super::common::format_timestamp;
use super::patients::NoteResponse;
use crate::analytics::Countdown;
use crate::models::Appointment;
use crate::services::{AppointmentFocus, Schedule};

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub id: String,
    pub patient_id: String,
    pub name: String,
    pub time: String,
    /// `Virtual` or `In-Person`.
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub avatar: String,
    /// Stated session length; absent when the booking leaves it open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// `scheduled`, `completed` or `cancelled`.
    pub status: String,
}

impl From<&Appointment> for AppointmentResponse {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id.clone(),
            patient_id: appointment.patient_id.clone(),
            name: appointment.name.clone(),
            time: format_timestamp(appointment.time),
            appointment_type: appointment.appointment_type.to_string(),
            avatar: appointment.avatar.clone(),
            duration_minutes: appointment.duration_minutes,
            notes: appointment.notes.clone(),
            status: appointment.status.to_string(),
        }
    }
}

/// Response for `GET /v1/appointments`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    /// Appointments ordered by start time.
    pub appointments: Vec<AppointmentResponse>,
    /// Default focus: the first appointment in stored order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_appointment_id: Option<String>,
}

impl From<&Schedule> for ScheduleResponse {
    fn from(schedule: &Schedule) -> Self {
        Self {
            appointments: schedule
                .appointments
                .iter()
                .map(AppointmentResponse::from)
                .collect(),
            selected_appointment_id: schedule.selection.appointment_id.clone(),
        }
    }
}

/// `remaining` while the session is ahead, `started` once its time passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CountdownState {
    Remaining,
    Started,
}

/// A single countdown reading. Also the payload of each SSE `countdown` event.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountdownResponse {
    pub appointment_id: String,
    pub starts_at: String,
    pub state: CountdownState,
    pub hours: u64,
    pub minutes: u8,
    pub seconds: u8,
    pub total_seconds: u64,
    /// `HH:MM:SS`, or `Session Started`.
    pub display: String,
}

impl CountdownResponse {
    pub fn new(appointment_id: &str, starts_at: chrono::DateTime<chrono::Utc>, countdown: Countdown) -> Self {
        let (state, hours, minutes, seconds) = match countdown {
            Countdown::Remaining {
                hours,
                minutes,
                seconds,
            } => (CountdownState::Remaining, hours, minutes, seconds),
            Countdown::Started => (CountdownState::Started, 0, 0, 0),
        };

        Self {
            appointment_id: appointment_id.to_string(),
            starts_at: format_timestamp(starts_at),
            state,
            hours,
            minutes,
            seconds,
            total_seconds: countdown.total_seconds(),
            display: countdown.to_string(),
        }
    }
}

/// Response for `GET /v1/appointments/{appointmentId}`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentFocusResponse {
    pub appointment: AppointmentResponse,
    pub patient_id: String,
    pub patient_name: String,
    pub patient_avatar: String,
    pub session_type: String,
    /// Stated duration, or the configured fallback (50 minutes by default).
    pub duration_minutes: u32,
    pub countdown: CountdownResponse,
    /// The patient's most recent notes.
    pub recent_notes: Vec<NoteResponse>,
}

impl From<&AppointmentFocus> for AppointmentFocusResponse {
    fn from(focus: &AppointmentFocus) -> Self {
        Self {
            appointment: AppointmentResponse::from(&focus.appointment),
            patient_id: focus.patient.id.clone(),
            patient_name: focus.patient.name.clone(),
            patient_avatar: focus.patient.avatar.clone(),
            session_type: focus.patient.session_type.to_string(),
            duration_minutes: focus.duration_minutes,
            countdown: CountdownResponse::new(
                &focus.appointment.id,
                focus.appointment.time,
                focus.countdown,
            ),
            recent_notes: focus.recent_notes.iter().map(NoteResponse::from).collect(),
        }
    }
}
