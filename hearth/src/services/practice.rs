use std::sync::Arc;

use chrono::{DateTime, Utc};
use nanoid::nanoid;
use validator::{Validate, ValidationError};

use crate::analytics::{
    filter_patients, recent_notes, sort_appointments, trailing_window, Countdown,
    FinancialFilter, MoodTrend, Period, RevenueSummary, StatusFilter,
};
use crate::config::PracticeConfig;
use crate::error::{HearthError, Result};
use crate::models::{
    validate_mood, Appointment, FinancialRecord, Note, Patient, Selection,
};
use crate::services::Clock;
use crate::store::PracticeStore;

pub const SPARKLINE_WIDTH: f64 = 80.0;
pub const SPARKLINE_HEIGHT: f64 = 20.0;
pub const TREND_WIDTH: f64 = 600.0;
pub const TREND_HEIGHT: f64 = 150.0;
pub const DEFAULT_NOTE_MOOD: u8 = 5;
pub const MAX_NOTE_CHARS: u64 = 20_000;

fn not_blank(content: &str) -> std::result::Result<(), ValidationError> {
    if content.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Note content must not be empty".into());
        return Err(error);
    }
    Ok(())
}

/// A note as typed by the therapist, before it gets an id and a date.
#[derive(Debug, Clone, Default, Validate)]
pub struct NewNote {
    #[validate(
        custom(function = "not_blank"),
        length(max = MAX_NOTE_CHARS, message = "Note content must be at most 20000 characters")
    )]
    pub content: String,
    pub tags: Vec<String>,
    #[validate(range(min = 1, max = 10))]
    pub mood: Option<i64>,
}

/// A row in the patient list.
#[derive(Debug, Clone)]
pub struct PatientOverview {
    pub patient: Patient,
    pub sparkline: MoodTrend,
}

#[derive(Debug, Clone)]
pub struct PatientDetail {
    pub patient: Patient,
    pub mood_trend: MoodTrend,
    pub note_count: usize,
}

#[derive(Debug, Clone)]
pub struct Schedule {
    pub appointments: Vec<Appointment>,
    pub selection: Selection,
}

#[derive(Debug, Clone)]
pub struct AppointmentFocus {
    pub appointment: Appointment,
    pub patient: Patient,
    pub duration_minutes: u32,
    pub countdown: Countdown,
    pub recent_notes: Vec<Note>,
}

#[derive(Debug, Clone)]
pub struct FinancialOverview {
    pub status: StatusFilter,
    pub period: Period,
    pub records: Vec<FinancialRecord>,
    pub summary: RevenueSummary,
}

#[derive(Clone)]
pub struct PracticeService {
    store: Arc<dyn PracticeStore>,
    clock: Arc<dyn Clock>,
    settings: PracticeConfig,
}

impl PracticeService {
    pub fn new(
        store: Arc<dyn PracticeStore>,
        clock: Arc<dyn Clock>,
        settings: PracticeConfig,
    ) -> Self {
        Self {
            store,
            clock,
            settings,
        }
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    pub async fn search_patients(&self, term: &str) -> Result<Vec<PatientOverview>> {
        let patients = self.store.list_patients().await?;

        Ok(filter_patients(&patients, term)
            .into_iter()
            .map(|patient| {
                let window = trailing_window(&patient.mood_data, self.settings.sparkline_window);
                PatientOverview {
                    sparkline: MoodTrend::from_entries(window, SPARKLINE_WIDTH, SPARKLINE_HEIGHT),
                    patient: patient.clone(),
                }
            })
            .collect())
    }

    pub async fn patient_detail(&self, patient_id: &str) -> Result<PatientDetail> {
        let patient = self.require_patient(patient_id).await?;
        Ok(PatientDetail {
            mood_trend: MoodTrend::from_entries(&patient.mood_data, TREND_WIDTH, TREND_HEIGHT),
            note_count: patient.notes.len(),
            patient,
        })
    }

    /// Stamp and store a new note; it becomes the patient's most recent.
    pub async fn add_note(&self, patient_id: &str, new_note: NewNote) -> Result<(Patient, Note)> {
        let new_note = NewNote {
            content: new_note.content.trim().to_string(),
            ..new_note
        };
        new_note.validate()?;

        let mood = match new_note.mood {
            Some(value) => validate_mood(value)?,
            None => DEFAULT_NOTE_MOOD,
        };

        let tags = new_note
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let note = Note::new(
            format!("n{}", nanoid!(12)),
            self.clock.today(),
            new_note.content,
            tags,
            Some(mood),
        )?;

        let patient = self.store.add_note(patient_id, note.clone()).await?;
        tracing::info!(
            patient_id,
            note_id = note.id.as_str(),
            mood,
            tags = note.tags.len(),
            "Session note added"
        );
        Ok((patient, note))
    }

    pub async fn schedule(&self) -> Result<Schedule> {
        let stored = self.store.list_appointments().await?;
        let selection = Selection::for_schedule(&stored);

        let mut appointments = stored;
        sort_appointments(&mut appointments);

        Ok(Schedule {
            appointments,
            selection,
        })
    }

    pub async fn appointment_focus(&self, appointment_id: &str) -> Result<AppointmentFocus> {
        let appointments = self.store.list_appointments().await?;
        let patients = self.store.list_patients().await?;

        let selection = Selection::default().select_appointment(&appointments, appointment_id)?;
        let appointment = selection
            .active_appointment(&appointments)
            .cloned()
            .ok_or_else(|| {
                HearthError::NotFound(format!("Appointment {appointment_id} not found"))
            })?;
        let patient = selection.active_patient(&patients).cloned().ok_or_else(|| {
            HearthError::NotFound(format!("Patient {} not found", appointment.patient_id))
        })?;

        Ok(AppointmentFocus {
            duration_minutes: appointment.duration_or(self.settings.default_duration_minutes),
            countdown: Countdown::until(appointment.time, self.clock.now()),
            recent_notes: recent_notes(&patient, self.settings.recent_notes).to_vec(),
            appointment,
            patient,
        })
    }

    /// Countdown to an appointment as of now.
    pub async fn countdown(&self, appointment_id: &str) -> Result<(Appointment, Countdown)> {
        let appointment = self.require_appointment(appointment_id).await?;
        let countdown = Countdown::until(appointment.time, self.clock.now());
        Ok((appointment, countdown))
    }

    pub async fn appointment_start(&self, appointment_id: &str) -> Result<DateTime<Utc>> {
        Ok(self.require_appointment(appointment_id).await?.time)
    }

    pub async fn financial_overview(
        &self,
        status: StatusFilter,
        period: Period,
    ) -> Result<FinancialOverview> {
        let records = self.store.list_financial_records().await?;
        let kept: Vec<FinancialRecord> = FinancialFilter::new(status, period)
            .apply(&records, self.clock.now())
            .into_iter()
            .cloned()
            .collect();
        let summary = RevenueSummary::from_records(&kept);

        Ok(FinancialOverview {
            status,
            period,
            records: kept,
            summary,
        })
    }

    async fn require_patient(&self, patient_id: &str) -> Result<Patient> {
        self.store
            .get_patient(patient_id)
            .await?
            .ok_or_else(|| HearthError::NotFound(format!("Patient {patient_id} not found")))
    }

    async fn require_appointment(&self, appointment_id: &str) -> Result<Appointment> {
        self.store
            .get_appointment(appointment_id)
            .await?
            .ok_or_else(|| {
                HearthError::NotFound(format!("Appointment {appointment_id} not found"))
            })
    }
}

/// Parse the status and period query selectors.
pub fn parse_selectors(status: Option<&str>, period: Option<&str>) -> Result<(StatusFilter, Period)> {
    let status = status
        .unwrap_or_default()
        .parse::<StatusFilter>()
        .map_err(HearthError::Validation)?;
    let period = period
        .unwrap_or_default()
        .parse::<Period>()
        .map_err(HearthError::Validation)?;
    Ok((status, period))
}
