use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use std::sync::Arc;
use thalai::care::care_router;
use thalai::eligibility::{eligibility_router, EligibilityEvaluator};

pub(crate) fn with_service_routes(evaluator: Arc<EligibilityEvaluator>) -> Router {
    eligibility_router(evaluator)
        .merge(care_router())
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use thalai::eligibility::EligibilityPolicy;
    use tower::ServiceExt;

    fn app(ready: bool) -> Router {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        };
        let evaluator = Arc::new(EligibilityEvaluator::new(EligibilityPolicy::default()));
        with_service_routes(evaluator).layer(Extension(state))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let response = app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(true)
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ready");
    }

    #[tokio::test]
    async fn merged_router_serves_eligibility_and_care() {
        let donor = json!({
            "full_name": "Meera Nair",
            "date_of_birth": "1990-04-12",
            "gender": "female",
            "blood_type": "O-",
            "weight_kg": 58.0,
            "availability": ["weekdays"],
            "consent_terms": true,
            "consent_data_sharing": true,
            "as_of": "2025-11-01T09:00:00Z"
        });
        let response = app(true)
            .oneshot(
                Request::post("/api/v1/donors/eligibility")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(donor.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["eligible"], true);

        let patient = json!({
            "name": "Rahul Sharma",
            "blood_type": "B+",
            "hemoglobin_g_dl": 9.4,
            "transfusions": { "last": "2025-10-20", "next": "2025-11-03" },
            "today": "2025-11-01"
        });
        let response = app(true)
            .oneshot(
                Request::post("/api/v1/patients/summary")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(patient.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["hemoglobin_status"], "stable");
        assert_eq!(body["days_until_next_transfusion"], 2);
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }
}
