//! Patient dashboard summaries for transfusion-dependent care.

mod dashboard;
mod hemoglobin;

pub use dashboard::{
    summarize, Appointment, CareSummary, MedicationAdherence, MedicationDose, PatientSnapshot,
    TransfusionSchedule,
};
pub use hemoglobin::{gauge_percent, HemoglobinStatus};

use axum::{extract::rejection::JsonRejection, routing::post, Json, Router};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::error::{AppError, ContractViolation};

#[derive(Debug, Deserialize)]
pub struct CareSummaryRequest {
    #[serde(flatten)]
    pub snapshot: PatientSnapshot,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

pub fn care_router() -> Router {
    Router::new().route("/api/v1/patients/summary", post(summary_handler))
}

pub(crate) async fn summary_handler(
    payload: Result<Json<CareSummaryRequest>, JsonRejection>,
) -> Result<Json<CareSummary>, AppError> {
    let Json(CareSummaryRequest { snapshot, today }) = payload.map_err(ContractViolation::from)?;
    let today = today.unwrap_or_else(|| Utc::now().date_naive());
    Ok(Json(summarize(&snapshot, today)))
}
