use crate::infra::AppState;
use crate::screen::{screen_request, ScreeningReport, ScreeningRequest};
use axum::body::Bytes;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use rekrut::error::AppError;
use rekrut::recruitment::{
    recruitment_router, ApplicantRepository, JobRepository, RecruitmentService,
};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub(crate) fn with_recruitment_routes<J, A>(service: Arc<RecruitmentService<J, A>>) -> axum::Router
where
    J: JobRepository + 'static,
    A: ApplicantRepository + 'static,
{
    recruitment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/screening", axum::routing::post(screening_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
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

/// Body is parsed by hand so malformed documents surface as `AppError::Input`.
pub(crate) async fn screening_endpoint(
    Extension(state): Extension<AppState>,
    body: Bytes,
) -> Result<Json<ScreeningReport>, AppError> {
    let request: ScreeningRequest = serde_json::from_slice(&body)?;
    Ok(Json(screen_request(&state.engine, request)))
}
