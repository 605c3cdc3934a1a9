use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::eligibility::eligibility_router;

fn router() -> axum::Router {
    eligibility_router(Arc::new(evaluator()))
}

fn json_post(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn donor_route_returns_verdict_codes() {
    let mut payload = serde_json::to_value(eligible_donor()).unwrap();
    payload["weight_kg"] = json!(44.9);
    payload["consent_terms"] = json!(false);
    payload["as_of"] = json!(as_of());

    let response = router()
        .oneshot(json_post("/api/v1/donors/eligibility", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["eligible"], json!(false));
    assert_eq!(body["reasons"], json!(["UNDERWEIGHT", "CONSENT_MISSING"]));
    assert_eq!(body["as_of"], json!("2026-03-10T12:00:00Z"));
}

#[tokio::test]
async fn donor_route_rejects_missing_fields_as_contract_violation() {
    let payload = json!({
        "full_name": "Ananya Iyer",
        "gender": "female",
        "blood_type": "B+"
    });

    let response = router()
        .oneshot(json_post("/api/v1/donors/eligibility", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("evaluator contract"));
}

#[tokio::test]
async fn classify_route_reports_warnings_separately() {
    let mut payload = serde_json::to_value(valid_request()).unwrap();
    payload["required_by"] = json!("2026-03-10T15:00:00Z");
    payload["as_of"] = json!(as_of());

    let response = router()
        .oneshot(json_post("/api/v1/blood-requests/classify", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["valid"], json!(true));
    assert_eq!(body["reasons"], json!([]));
    assert_eq!(body["warnings"], json!(["URGENCY_WINDOW_EXCEEDED"]));
    assert_eq!(body["urgency_deadline"], json!("2026-03-10T14:00:00Z"));
}

#[tokio::test]
async fn classify_route_accepts_unknown_tier_as_reason() {
    let mut payload = serde_json::to_value(valid_request()).unwrap();
    payload["urgency"] = json!("asap");
    payload["as_of"] = json!(as_of());

    let response = router()
        .oneshot(json_post("/api/v1/blood-requests/classify", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["reasons"], json!(["INVALID_URGENCY"]));
    assert_eq!(body["urgency_deadline"], Value::Null);
}

#[tokio::test]
async fn compatibility_route_answers_pairs() {
    let response = router()
        .oneshot(json_post(
            "/api/v1/compatibility",
            json!({ "donor_type": "A+", "recipient_type": "O-" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["compatible"], json!(false));
}

#[tokio::test]
async fn compatibility_route_rejects_unknown_codes() {
    let response = router()
        .oneshot(json_post(
            "/api/v1/compatibility",
            json!({ "donor_type": "C+", "recipient_type": "O-" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn matrix_route_lists_universal_donor() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/compatibility/matrix")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let rows = body.as_array().unwrap();
    let universal = rows
        .iter()
        .find(|row| row["donor"] == json!("O-"))
        .expect("O- row present");
    assert_eq!(universal["recipients"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn unrecognized_availability_slots_are_reported_not_rejected() {
    let mut payload = serde_json::to_value(eligible_donor()).unwrap();
    payload["availability"] = json!(["mornings"]);
    payload["as_of"] = json!(as_of());

    let response = router()
        .oneshot(json_post("/api/v1/donors/eligibility", payload.clone()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["reasons"], json!(["NO_AVAILABILITY"]));

    payload["availability"] = json!(["mornings", "Weekdays (Mon-Fri)"]);
    let response = router()
        .oneshot(json_post("/api/v1/donors/eligibility", payload))
        .await
        .unwrap();

    let body = read_json(response).await;
    assert_eq!(body["eligible"], json!(true));
}
