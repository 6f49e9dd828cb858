use super::{Appointment, Patient};
use crate::error::{HearthError, Result};

/// Which patient and appointment a view is focused on.
///
/// A plain value handed to whoever renders the view; nothing here is global.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub patient_id: Option<String>,
    pub appointment_id: Option<String>,
}

impl Selection {
    /// Default focus for the schedule: the first appointment as stored.
    pub fn for_schedule(appointments: &[Appointment]) -> Self {
        Self {
            patient_id: None,
            appointment_id: appointments.first().map(|a| a.id.clone()),
        }
    }

    pub fn select_patient(self, patients: &[Patient], patient_id: &str) -> Result<Self> {
        if !patients.iter().any(|p| p.id == patient_id) {
            return Err(HearthError::NotFound(format!(
                "Patient {patient_id} not found"
            )));
        }
        Ok(Self {
            patient_id: Some(patient_id.to_string()),
            ..self
        })
    }

    pub fn select_appointment(
        self,
        appointments: &[Appointment],
        appointment_id: &str,
    ) -> Result<Self> {
        let appointment = appointments
            .iter()
            .find(|a| a.id == appointment_id)
            .ok_or_else(|| {
                HearthError::NotFound(format!("Appointment {appointment_id} not found"))
            })?;
        Ok(Self {
            patient_id: Some(appointment.patient_id.clone()),
            appointment_id: Some(appointment.id.clone()),
        })
    }

    pub fn active_patient<'a>(&self, patients: &'a [Patient]) -> Option<&'a Patient> {
        let id = self.patient_id.as_deref()?;
        patients.iter().find(|p| p.id == id)
    }

    pub fn active_appointment<'a>(&self, appointments: &'a [Appointment]) -> Option<&'a Appointment> {
        let id = self.appointment_id.as_deref()?;
        appointments.iter().find(|a| a.id == id)
    }
}
