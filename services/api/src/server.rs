use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use thalai::config::AppConfig;
use thalai::eligibility::EligibilityEvaluator;
use thalai::error::AppError;
use thalai::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let evaluator = Arc::new(EligibilityEvaluator::new(config.eligibility.clone()));
    let app = with_service_routes(evaluator)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        min_age = config.eligibility.min_age_years,
        max_age = config.eligibility.max_age_years,
        min_weight_kg = config.eligibility.min_weight_kg,
        donation_gap_days = config.eligibility.min_donation_gap_days,
        "eligibility service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
