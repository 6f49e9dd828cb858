//! Patient and session-note DTOs for the v1 API.

use serde::{Deserialize, Serialize};

use super::common::{format_date, format_timestamp, MoodTrendResponse};
use crate::analytics::parse_tags;
use crate::models::{MoodEntry, Note, Patient, ProgressEntry};
use crate::services::{NewNote, PatientDetail, PatientOverview};

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /v1/patients`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PatientsQuery {
    /// Case-insensitive substring of the patient name. Empty keeps everyone.
    pub search: Option<String>,
}

/// Tags as typed in the note form, or already split.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum TagsInput {
    /// Comma-separated text, e.g. `"anxiety, work"`.
    Text(String),
    List(Vec<String>),
}

impl TagsInput {
    pub fn into_tags(self) -> Vec<String> {
        match self {
            Self::Text(text) => parse_tags(&text),
            Self::List(tags) => tags,
        }
    }
}

/// Request body for `POST /v1/patients/{patientId}/notes`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    /// Note text. Surrounding whitespace is trimmed; must not end up empty.
    pub content: String,
    pub tags: Option<TagsInput>,
    /// Self-reported mood from 1 to 10. Defaults to 5.
    pub mood: Option<i64>,
}

impl From<CreateNoteRequest> for NewNote {
    fn from(req: CreateNoteRequest) -> Self {
        NewNote {
            content: req.content,
            tags: req.tags.map(TagsInput::into_tags).unwrap_or_default(),
            mood: req.mood,
        }
    }
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: String,
    pub date: String,
    pub content: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<u8>,
}

impl From<&Note> for NoteResponse {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            date: format_date(note.date),
            content: note.content.clone(),
            tags: note.tags.clone(),
            mood: note.mood,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntryResponse {
    pub date: String,
    pub mood: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<&MoodEntry> for MoodEntryResponse {
    fn from(entry: &MoodEntry) -> Self {
        Self {
            date: format_date(entry.date),
            mood: entry.mood,
            note: entry.note.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntryResponse {
    pub date: String,
    pub score: i32,
    pub area: String,
}

impl From<&ProgressEntry> for ProgressEntryResponse {
    fn from(entry: &ProgressEntry) -> Self {
        Self {
            date: format_date(entry.date),
            score: entry.score,
            area: entry.area.clone(),
        }
    }
}

/// One row of `GET /v1/patients`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummaryResponse {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub last_session: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_session: Option<String>,
    /// `Individual`, `Couples` or `Family`.
    pub session_type: String,
    /// `Active`, `Inactive` or `Completed`.
    pub status: String,
    /// The most recent mood entries drawn in an 80x20 box.
    pub sparkline: MoodTrendResponse,
}

impl From<&PatientOverview> for PatientSummaryResponse {
    fn from(overview: &PatientOverview) -> Self {
        let patient = &overview.patient;
        Self {
            id: patient.id.clone(),
            name: patient.name.clone(),
            avatar: patient.avatar.clone(),
            last_session: format_date(patient.last_session),
            next_session: patient.next_session.map(format_timestamp),
            session_type: patient.session_type.to_string(),
            status: patient.status.to_string(),
            sparkline: MoodTrendResponse::from(&overview.sparkline),
        }
    }
}

/// Response for `GET /v1/patients/{patientId}`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientResponse {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub last_session: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_session: Option<String>,
    pub session_type: String,
    pub status: String,
    /// Notes in stored order, newest first for notes added through the API.
    pub notes: Vec<NoteResponse>,
    pub note_count: usize,
    pub mood_data: Vec<MoodEntryResponse>,
    pub progress: Vec<ProgressEntryResponse>,
    /// The whole mood series drawn in a 600x150 box.
    pub mood_trend: MoodTrendResponse,
}

impl From<&PatientDetail> for PatientResponse {
    fn from(detail: &PatientDetail) -> Self {
        let patient = &detail.patient;
        Self {
            id: patient.id.clone(),
            name: patient.name.clone(),
            avatar: patient.avatar.clone(),
            last_session: format_date(patient.last_session),
            next_session: patient.next_session.map(format_timestamp),
            session_type: patient.session_type.to_string(),
            status: patient.status.to_string(),
            notes: patient.notes.iter().map(NoteResponse::from).collect(),
            note_count: detail.note_count,
            mood_data: patient.mood_data.iter().map(MoodEntryResponse::from).collect(),
            progress: patient.progress.iter().map(ProgressEntryResponse::from).collect(),
            mood_trend: MoodTrendResponse::from(&detail.mood_trend),
        }
    }
}

/// Response for `POST /v1/patients/{patientId}/notes`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteResponse {
    pub patient_id: String,
    pub note: NoteResponse,
    pub note_count: usize,
}

impl CreateNoteResponse {
    pub fn new(patient: &Patient, note: &Note) -> Self {
        Self {
            patient_id: patient.id.clone(),
            note: NoteResponse::from(note),
            note_count: patient.notes.len(),
        }
    }
}
