use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{Doctor, Patient, RecordId};

pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// A booking between one patient and one doctor.
///
/// `patient` and `doctor` are snapshots taken when the appointment was
/// booked or last updated; later edits to either record are not reflected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: RecordId,
    pub patient: Patient,
    pub doctor: Doctor,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn scheduled_end_time(&self) -> DateTime<Utc> {
        self.scheduled_at + Duration::minutes(i64::from(self.duration_minutes))
    }

    pub fn is_for_patient(&self, patient_id: RecordId) -> bool {
        self.patient.id == patient_id
    }

    pub fn is_with_doctor(&self, doctor_id: RecordId) -> bool {
        self.doctor.id == doctor_id
    }
}
