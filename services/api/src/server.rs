use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicantRepository, InMemoryJobRepository};
use crate::routes::with_recruitment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rekrut::config::AppConfig;
use rekrut::error::AppError;
use rekrut::recruitment::RecruitmentService;
use rekrut::screening::ScreeningEngine;
use rekrut::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        engine: Arc::new(ScreeningEngine::new(config.screening.clone())),
    };

    let recruitment_service = Arc::new(RecruitmentService::new(
        Arc::new(InMemoryJobRepository::default()),
        Arc::new(InMemoryApplicantRepository::default()),
        config.screening.clone(),
    ));

    let app = with_recruitment_routes(recruitment_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        ai_score_threshold = config.screening.default_ai_score_threshold,
        "recruitment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
