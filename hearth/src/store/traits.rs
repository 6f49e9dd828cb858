use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Appointment, FinancialRecord, Note, Patient};

/// Read access to the practice dataset plus its one write path.
#[async_trait]
pub trait PracticeStore: Send + Sync {
    async fn list_patients(&self) -> Result<Vec<Patient>>;
    async fn get_patient(&self, id: &str) -> Result<Option<Patient>>;
    async fn list_appointments(&self) -> Result<Vec<Appointment>>;
    async fn get_appointment(&self, id: &str) -> Result<Option<Appointment>>;
    async fn list_financial_records(&self) -> Result<Vec<FinancialRecord>>;

    /// Prepend `note` to the patient's notes and return the updated patient.
    ///
    /// Fails with `NotFound` for an unknown patient and `Validation` when the
    /// note id is already taken anywhere in the store.
    async fn add_note(&self, patient_id: &str, note: Note) -> Result<Patient>;
}
