use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::hemoglobin::{gauge_percent, HemoglobinStatus};

/// Transfusion dates tracked for a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransfusionSchedule {
    pub last: NaiveDate,
    pub next: NaiveDate,
}

impl TransfusionSchedule {
    pub fn interval_days(&self) -> i64 {
        self.next.signed_duration_since(self.last).num_days()
    }

    pub fn days_since_last(&self, today: NaiveDate) -> i64 {
        today.signed_duration_since(self.last).num_days()
    }

    /// Negative once the scheduled date has passed.
    pub fn days_until_next(&self, today: NaiveDate) -> i64 {
        self.next.signed_duration_since(today).num_days()
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.days_until_next(today) < 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationDose {
    pub name: String,
    pub time: String,
    pub taken: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub doctor: String,
    pub date: NaiveDate,
    pub kind: String,
}

/// Patient data backing the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSnapshot {
    pub name: String,
    pub blood_type: String,
    pub hemoglobin_g_dl: f64,
    pub transfusions: TransfusionSchedule,
    #[serde(default)]
    pub medications: Vec<MedicationDose>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationAdherence {
    pub taken: usize,
    pub scheduled: usize,
    pub pending: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareSummary {
    pub patient_name: String,
    pub blood_type: String,
    pub hemoglobin_g_dl: f64,
    pub hemoglobin_status: HemoglobinStatus,
    pub hemoglobin_gauge_percent: f64,
    pub days_until_next_transfusion: i64,
    pub days_since_last_transfusion: i64,
    pub transfusion_overdue: bool,
    pub medication_adherence: MedicationAdherence,
    pub upcoming_appointments: Vec<Appointment>,
}

pub fn summarize(snapshot: &PatientSnapshot, today: NaiveDate) -> CareSummary {
    let taken = snapshot
        .medications
        .iter()
        .filter(|dose| dose.taken)
        .count();
    let pending = snapshot
        .medications
        .iter()
        .filter(|dose| !dose.taken)
        .map(|dose| format!("{} ({})", dose.name, dose.time))
        .collect();

    let mut upcoming_appointments: Vec<Appointment> = snapshot
        .appointments
        .iter()
        .filter(|appointment| appointment.date >= today)
        .cloned()
        .collect();
    upcoming_appointments.sort_by_key(|appointment| appointment.date);

    CareSummary {
        patient_name: snapshot.name.clone(),
        blood_type: snapshot.blood_type.clone(),
        hemoglobin_g_dl: snapshot.hemoglobin_g_dl,
        hemoglobin_status: HemoglobinStatus::classify(snapshot.hemoglobin_g_dl),
        hemoglobin_gauge_percent: gauge_percent(snapshot.hemoglobin_g_dl),
        days_until_next_transfusion: snapshot.transfusions.days_until_next(today),
        days_since_last_transfusion: snapshot.transfusions.days_since_last(today),
        transfusion_overdue: snapshot.transfusions.is_overdue(today),
        medication_adherence: MedicationAdherence {
            taken,
            scheduled: snapshot.medications.len(),
            pending,
        },
        upcoming_appointments,
    }
}
