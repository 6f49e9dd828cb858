//! Practice dataset loading.
//!
//! The dataset is JSON with `patients`, `appointments` and `financialRecords`
//! arrays. Dates and timestamps arrive as strings and are parsed here, so a
//! malformed value surfaces as a validation error naming the offending record
//! instead of leaking into the analytics as a bogus date.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{HearthError, Result};
use crate::models::{
    parse_date, parse_timestamp, validate_mood, Appointment, AppointmentStatus, AppointmentType,
    BillingType, FinancialRecord, MoodEntry, Note, Patient, PatientStatus, PaymentStatus,
    ProgressEntry, SessionType,
};

const EMBEDDED_SEED: &str = include_str!("../../seed/practice.json");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDataset {
    #[serde(default)]
    patients: Vec<RawPatient>,
    #[serde(default)]
    appointments: Vec<RawAppointment>,
    #[serde(default)]
    financial_records: Vec<RawFinancialRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPatient {
    id: String,
    name: String,
    #[serde(default)]
    avatar: String,
    last_session: String,
    next_session: Option<String>,
    #[serde(default)]
    notes: Vec<RawNote>,
    #[serde(default)]
    mood_data: Vec<RawMoodEntry>,
    #[serde(default)]
    progress: Vec<RawProgressEntry>,
    session_type: SessionType,
    #[serde(default)]
    status: PatientStatus,
}

#[derive(Debug, Deserialize)]
struct RawNote {
    id: String,
    date: String,
    content: String,
    #[serde(default)]
    tags: Vec<String>,
    mood: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawMoodEntry {
    date: String,
    mood: i64,
    #[serde(default, alias = "notes")]
    note: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawProgressEntry {
    date: String,
    score: i32,
    area: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAppointment {
    id: String,
    patient_id: String,
    name: String,
    time: String,
    #[serde(rename = "type")]
    appointment_type: AppointmentType,
    #[serde(default)]
    avatar: String,
    duration: Option<u32>,
    notes: Option<String>,
    #[serde(default)]
    status: AppointmentStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFinancialRecord {
    id: String,
    patient_id: String,
    patient_name: String,
    date: String,
    amount: f64,
    #[serde(rename = "type")]
    billing_type: BillingType,
    status: PaymentStatus,
    session_type: SessionType,
}

/// A validated practice dataset.
#[derive(Debug, Clone, Default)]
pub struct SeedDataset {
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
    pub financial_records: Vec<FinancialRecord>,
}

impl SeedDataset {
    /// The demo practice compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_SEED)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        tracing::info!(path = %path.display(), "Loading practice dataset");
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let raw: RawDataset = serde_json::from_str(raw)
            .map_err(|e| HearthError::Validation(format!("Invalid practice dataset: {e}")))?;

        let mut patient_ids = HashSet::new();
        let mut note_ids = HashSet::new();
        let mut patients = Vec::with_capacity(raw.patients.len());

        for raw_patient in raw.patients {
            if !patient_ids.insert(raw_patient.id.clone()) {
                return Err(HearthError::Validation(format!(
                    "Duplicate patient id {}",
                    raw_patient.id
                )));
            }
            let patient = convert_patient(raw_patient)?;
            for note in &patient.notes {
                if !note_ids.insert(note.id.clone()) {
                    return Err(HearthError::Validation(format!(
                        "Duplicate note id {}",
                        note.id
                    )));
                }
            }
            patients.push(patient);
        }

        let mut appointment_ids = HashSet::new();
        let mut appointments = Vec::with_capacity(raw.appointments.len());
        for raw_appointment in raw.appointments {
            if !appointment_ids.insert(raw_appointment.id.clone()) {
                return Err(HearthError::Validation(format!(
                    "Duplicate appointment id {}",
                    raw_appointment.id
                )));
            }
            require_patient(&patient_ids, &raw_appointment.patient_id, || {
                format!("appointment {}", raw_appointment.id)
            })?;
            appointments.push(convert_appointment(raw_appointment)?);
        }

        let mut record_ids = HashSet::new();
        let mut financial_records = Vec::with_capacity(raw.financial_records.len());
        for raw_record in raw.financial_records {
            if !record_ids.insert(raw_record.id.clone()) {
                return Err(HearthError::Validation(format!(
                    "Duplicate financial record id {}",
                    raw_record.id
                )));
            }
            require_patient(&patient_ids, &raw_record.patient_id, || {
                format!("financial record {}", raw_record.id)
            })?;
            financial_records.push(convert_record(raw_record)?);
        }

        tracing::debug!(
            patients = patients.len(),
            appointments = appointments.len(),
            financial_records = financial_records.len(),
            "Practice dataset validated"
        );

        Ok(Self {
            patients,
            appointments,
            financial_records,
        })
    }
}

/// Prefix validation messages with the record they came from.
fn in_context<T>(result: Result<T>, context: impl FnOnce() -> String) -> Result<T> {
    result.map_err(|e| match e {
        HearthError::Validation(msg) => HearthError::Validation(format!("{}: {msg}", context())),
        other => other,
    })
}

fn require_patient(
    known: &HashSet<String>,
    patient_id: &str,
    owner: impl FnOnce() -> String,
) -> Result<()> {
    if known.contains(patient_id) {
        Ok(())
    } else {
        Err(HearthError::NotFound(format!(
            "Patient {patient_id} referenced by {} not found",
            owner()
        )))
    }
}

fn convert_patient(raw: RawPatient) -> Result<Patient> {
    let id = raw.id;
    let last_session = in_context(parse_date(&raw.last_session), || format!("patient {id}"))?;
    let next_session = match raw.next_session.as_deref() {
        Some(value) => Some(in_context(parse_timestamp(value), || {
            format!("patient {id}")
        })?),
        None => None,
    };

    let notes = raw
        .notes
        .into_iter()
        .map(|note| {
            let note_id = note.id.clone();
            in_context(convert_note(note), || format!("patient {id} note {note_id}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let mood_data = raw
        .mood_data
        .into_iter()
        .map(|entry| {
            in_context(convert_mood_entry(entry), || format!("patient {id} mood entry"))
        })
        .collect::<Result<Vec<_>>>()?;

    let progress = raw
        .progress
        .into_iter()
        .map(|entry| {
            in_context(
                parse_date(&entry.date).map(|date| ProgressEntry {
                    date,
                    score: entry.score,
                    area: entry.area,
                }),
                || format!("patient {id} progress entry"),
            )
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Patient {
        id,
        name: raw.name,
        avatar: raw.avatar,
        last_session,
        next_session,
        notes,
        mood_data,
        progress,
        session_type: raw.session_type,
        status: raw.status,
    })
}

fn convert_note(raw: RawNote) -> Result<Note> {
    let date = parse_date(&raw.date)?;
    let mood = raw.mood.map(validate_mood).transpose()?;
    Note::new(raw.id, date, raw.content, raw.tags, mood)
}

fn convert_mood_entry(raw: RawMoodEntry) -> Result<MoodEntry> {
    Ok(MoodEntry {
        date: parse_date(&raw.date)?,
        mood: validate_mood(raw.mood)?,
        note: raw.note,
    })
}

fn convert_appointment(raw: RawAppointment) -> Result<Appointment> {
    let id = raw.id;
    let time = in_context(parse_timestamp(&raw.time), || format!("appointment {id}"))?;
    Ok(Appointment {
        id,
        patient_id: raw.patient_id,
        name: raw.name,
        time,
        appointment_type: raw.appointment_type,
        avatar: raw.avatar,
        duration_minutes: raw.duration,
        notes: raw.notes,
        status: raw.status,
    })
}

fn convert_record(raw: RawFinancialRecord) -> Result<FinancialRecord> {
    let id = raw.id;
    let date = in_context(parse_date(&raw.date), || format!("financial record {id}"))?;

    if !raw.amount.is_finite() {
        return Err(HearthError::Validation(format!(
            "financial record {id}: amount must be a finite number"
        )));
    }
    if raw.amount <= 0.0 {
        tracing::warn!(record_id = %id, amount = raw.amount, "Non-positive financial amount");
    }

    Ok(FinancialRecord {
        id,
        patient_id: raw.patient_id,
        patient_name: raw.patient_name,
        date,
        amount: raw.amount,
        billing_type: raw.billing_type,
        status: raw.status,
        session_type: raw.session_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_patient(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Test Patient",
            "lastSession": "2025-06-25",
            "sessionType": "Individual"
        })
    }

    #[test]
    fn test_embedded_seed_loads() {
        let data = SeedDataset::embedded().unwrap();
        assert_eq!(data.patients.len(), 3);
        assert_eq!(data.appointments.len(), 3);
        assert_eq!(data.financial_records.len(), 5);

        let amelia = &data.patients[0];
        assert_eq!(amelia.name, "Amelia Chen");
        assert_eq!(amelia.notes.len(), 2);
        assert_eq!(amelia.mood_data.len(), 6);
        assert_eq!(amelia.notes[0].mood, Some(7));
        assert_eq!(
            amelia.next_session.unwrap().to_rfc3339(),
            "2025-06-30T11:00:00+00:00"
        );

        let amounts: Vec<f64> = data.financial_records.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![150.0, 200.0, 150.0, 150.0, 200.0]);
    }

    #[test]
    fn test_optional_fields_default() {
        let raw = json!({ "patients": [minimal_patient("p1")] }).to_string();
        let data = SeedDataset::from_json(&raw).unwrap();
        let patient = &data.patients[0];
        assert_eq!(patient.status, PatientStatus::Active);
        assert!(patient.next_session.is_none());
        assert!(patient.notes.is_empty());
        assert!(data.appointments.is_empty());
    }

    #[test]
    fn test_malformed_date_is_validation_error() {
        let mut patient = minimal_patient("p1");
        patient["lastSession"] = json!("not-a-date");
        let raw = json!({ "patients": [patient] }).to_string();

        match SeedDataset::from_json(&raw) {
            Err(HearthError::Validation(msg)) => {
                assert!(msg.starts_with("patient p1"), "message was {msg}");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_mood_is_validation_error() {
        let mut patient = minimal_patient("p1");
        patient["moodData"] = json!([{ "date": "2025-06-25", "mood": 0 }]);
        let raw = json!({ "patients": [patient] }).to_string();
        assert!(matches!(
            SeedDataset::from_json(&raw),
            Err(HearthError::Validation(_))
        ));
    }

    #[test]
    fn test_mood_entry_accepts_notes_alias() {
        let mut patient = minimal_patient("p1");
        patient["moodData"] = json!([{ "date": "2025-06-25", "mood": 4, "notes": "rough week" }]);
        let raw = json!({ "patients": [patient] }).to_string();
        let data = SeedDataset::from_json(&raw).unwrap();
        assert_eq!(data.patients[0].mood_data[0].note.as_deref(), Some("rough week"));
    }

    #[test]
    fn test_dangling_patient_reference_is_not_found() {
        let raw = json!({
            "patients": [minimal_patient("p1")],
            "appointments": [{
                "id": "a1",
                "patientId": "p404",
                "name": "Ghost",
                "time": "2025-06-30T09:00:00",
                "type": "Virtual"
            }]
        })
        .to_string();
        assert!(matches!(
            SeedDataset::from_json(&raw),
            Err(HearthError::NotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_patient_id_rejected() {
        let raw = json!({ "patients": [minimal_patient("p1"), minimal_patient("p1")] }).to_string();
        assert!(matches!(
            SeedDataset::from_json(&raw),
            Err(HearthError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_enum_value_rejected() {
        let mut patient = minimal_patient("p1");
        patient["sessionType"] = json!("Group");
        let raw = json!({ "patients": [patient] }).to_string();
        assert!(matches!(
            SeedDataset::from_json(&raw),
            Err(HearthError::Validation(_))
        ));
    }

    #[test]
    fn test_from_path_reads_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let raw = json!({ "patients": [minimal_patient("p9")] }).to_string();
        std::fs::write(file.path(), raw).unwrap();

        let data = SeedDataset::from_path(file.path()).unwrap();
        assert_eq!(data.patients[0].id, "p9");
    }

    #[test]
    fn test_from_missing_path_is_io_error() {
        let err = SeedDataset::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, HearthError::Io(_)));
    }
}
