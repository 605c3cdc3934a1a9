use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::compatibility::{compatibility_matrix, CompatibilityRow};
use super::domain::{BloodRequest, BloodType, DonorProfile};
use super::policy::{DonorReason, RequestReason, RequestWarning};
use super::EligibilityEvaluator;
use crate::error::{AppError, ContractViolation};

#[derive(Debug, Deserialize)]
pub struct DonorEligibilityRequest {
    #[serde(flatten)]
    pub profile: DonorProfile,
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DonorEligibilityResponse {
    pub as_of: DateTime<Utc>,
    pub eligible: bool,
    pub reasons: Vec<DonorReason>,
}

#[derive(Debug, Deserialize)]
pub struct BloodRequestClassifyRequest {
    #[serde(flatten)]
    pub request: BloodRequest,
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BloodRequestClassifyResponse {
    pub as_of: DateTime<Utc>,
    pub valid: bool,
    pub reasons: Vec<RequestReason>,
    pub warnings: Vec<RequestWarning>,
    pub urgency_deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompatibilityQuery {
    pub donor_type: BloodType,
    pub recipient_type: BloodType,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompatibilityResponse {
    pub donor_type: BloodType,
    pub recipient_type: BloodType,
    pub compatible: bool,
}

/// Router builder exposing the evaluator over HTTP.
pub fn eligibility_router(evaluator: Arc<EligibilityEvaluator>) -> Router {
    Router::new()
        .route("/api/v1/donors/eligibility", post(donor_eligibility_handler))
        .route(
            "/api/v1/blood-requests/classify",
            post(classify_request_handler),
        )
        .route("/api/v1/compatibility", post(compatibility_handler))
        .route("/api/v1/compatibility/matrix", get(matrix_handler))
        .with_state(evaluator)
}

pub(crate) async fn donor_eligibility_handler(
    State(evaluator): State<Arc<EligibilityEvaluator>>,
    payload: Result<Json<DonorEligibilityRequest>, JsonRejection>,
) -> Result<Json<DonorEligibilityResponse>, AppError> {
    let Json(DonorEligibilityRequest { profile, as_of }) =
        payload.map_err(ContractViolation::from)?;
    let as_of = as_of.unwrap_or_else(Utc::now);

    let verdict = evaluator.evaluate_donor(&profile, as_of);
    debug!(eligible = verdict.eligible, reasons = ?verdict.reasons, "donor screened");

    Ok(Json(DonorEligibilityResponse {
        as_of,
        eligible: verdict.eligible,
        reasons: verdict.reasons,
    }))
}

pub(crate) async fn classify_request_handler(
    State(evaluator): State<Arc<EligibilityEvaluator>>,
    payload: Result<Json<BloodRequestClassifyRequest>, JsonRejection>,
) -> Result<Json<BloodRequestClassifyResponse>, AppError> {
    let Json(BloodRequestClassifyRequest { request, as_of }) =
        payload.map_err(ContractViolation::from)?;
    let as_of = as_of.unwrap_or_else(Utc::now);

    let classification = evaluator.classify_request(&request, as_of);
    debug!(
        valid = classification.valid,
        reasons = ?classification.reasons,
        warnings = ?classification.warnings,
        "blood request classified"
    );

    Ok(Json(BloodRequestClassifyResponse {
        as_of,
        valid: classification.valid,
        reasons: classification.reasons,
        warnings: classification.warnings,
        urgency_deadline: classification.urgency_deadline,
    }))
}

pub(crate) async fn compatibility_handler(
    State(evaluator): State<Arc<EligibilityEvaluator>>,
    payload: Result<Json<CompatibilityQuery>, JsonRejection>,
) -> Result<Json<CompatibilityResponse>, AppError> {
    let Json(CompatibilityQuery {
        donor_type,
        recipient_type,
    }) = payload.map_err(ContractViolation::from)?;

    Ok(Json(CompatibilityResponse {
        donor_type,
        recipient_type,
        compatible: evaluator.blood_type_compatibility(donor_type, recipient_type),
    }))
}

pub(crate) async fn matrix_handler() -> Json<Vec<CompatibilityRow>> {
    Json(compatibility_matrix())
}
