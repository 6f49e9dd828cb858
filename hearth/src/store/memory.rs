use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{PracticeStore, SeedDataset};
use crate::error::{HearthError, Result};
use crate::models::{Appointment, FinancialRecord, Note, Patient};

/// Process-lifetime store over a validated dataset.
pub struct InMemoryStore {
    data: RwLock<SeedDataset>,
}

impl InMemoryStore {
    pub fn new(data: SeedDataset) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }
}

#[async_trait]
impl PracticeStore for InMemoryStore {
    async fn list_patients(&self) -> Result<Vec<Patient>> {
        Ok(self.data.read().await.patients.clone())
    }

    async fn get_patient(&self, id: &str) -> Result<Option<Patient>> {
        let data = self.data.read().await;
        Ok(data.patients.iter().find(|p| p.id == id).cloned())
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        Ok(self.data.read().await.appointments.clone())
    }

    async fn get_appointment(&self, id: &str) -> Result<Option<Appointment>> {
        let data = self.data.read().await;
        Ok(data.appointments.iter().find(|a| a.id == id).cloned())
    }

    async fn list_financial_records(&self) -> Result<Vec<FinancialRecord>> {
        Ok(self.data.read().await.financial_records.clone())
    }

    async fn add_note(&self, patient_id: &str, note: Note) -> Result<Patient> {
        let mut data = self.data.write().await;

        let index = data
            .patients
            .iter()
            .position(|p| p.id == patient_id)
            .ok_or_else(|| HearthError::NotFound(format!("Patient {patient_id} not found")))?;

        if data.patients.iter().any(|p| p.has_note(&note.id)) {
            return Err(HearthError::Validation(format!(
                "Note id {} already exists",
                note.id
            )));
        }

        let patient = &mut data.patients[index];
        patient.notes.insert(0, note);
        Ok(patient.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;

    fn store() -> InMemoryStore {
        InMemoryStore::new(SeedDataset::embedded().unwrap())
    }

    fn note(id: &str) -> Note {
        Note::new(
            id.to_string(),
            parse_date("2025-07-01").unwrap(),
            "Reviewed homework.".to_string(),
            vec!["homework".to_string()],
            Some(6),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_lookups() {
        let store = store();
        assert_eq!(store.list_patients().await.unwrap().len(), 3);
        assert_eq!(
            store.get_patient("p002").await.unwrap().unwrap().name,
            "Benjamin Carter"
        );
        assert!(store.get_patient("nope").await.unwrap().is_none());
        assert!(store.get_appointment("a003").await.unwrap().is_some());
        assert_eq!(store.list_financial_records().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_add_note_prepends() {
        let store = store();
        let updated = store.add_note("p001", note("n100")).await.unwrap();
        assert_eq!(updated.notes.len(), 3);
        assert_eq!(updated.notes[0].id, "n100");

        let reread = store.get_patient("p001").await.unwrap().unwrap();
        assert_eq!(reread.notes[0].id, "n100");
    }

    #[tokio::test]
    async fn test_add_note_unknown_patient() {
        let store = store();
        let err = store.add_note("p404", note("n100")).await.unwrap_err();
        assert!(matches!(err, HearthError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_add_note_unknown_patient_wins_over_duplicate_id() {
        let store = store();
        let err = store.add_note("p404", note("n001")).await.unwrap_err();
        assert!(matches!(err, HearthError::NotFound(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_add_note_duplicate_id() {
        let store = store();
        // n003 belongs to another patient
        let err = store.add_note("p001", note("n003")).await.unwrap_err();
        assert!(matches!(err, HearthError::Validation(_)));
    }
}
