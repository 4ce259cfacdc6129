use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicantId, ApplicantStatus, ApplicationSubmission, JobDraft, JobId};
use super::repository::{ApplicantRepository, JobRepository, RepositoryError};
use super::service::{RecruitmentError, RecruitmentService, TestScreeningRequest};

type SharedService<J, A> = Arc<RecruitmentService<J, A>>;

/// Router builder exposing job, application, and screening endpoints.
pub fn recruitment_router<J, A>(service: SharedService<J, A>) -> Router
where
    J: JobRepository + 'static,
    A: ApplicantRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs",
            get(list_jobs_handler::<J, A>).post(create_job_handler::<J, A>),
        )
        .route("/api/v1/jobs/:job_id", get(job_handler::<J, A>))
        .route(
            "/api/v1/jobs/:job_id/applicants",
            get(list_applicants_handler::<J, A>),
        )
        .route(
            "/api/v1/jobs/:job_id/test-screening",
            post(test_screening_handler::<J, A>),
        )
        .route("/api/v1/applications", post(apply_handler::<J, A>))
        .route(
            "/api/v1/applications/:applicant_id",
            get(applicant_handler::<J, A>),
        )
        .route(
            "/api/v1/applications/:applicant_id/rescreen",
            post(rescreen_handler::<J, A>),
        )
        .route(
            "/api/v1/applications/:applicant_id/status",
            put(update_status_handler::<J, A>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdate {
    pub(crate) status: ApplicantStatus,
}

pub(crate) async fn create_job_handler<J, A>(
    State(service): State<SharedService<J, A>>,
    Json(draft): Json<JobDraft>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicantRepository + 'static,
{
    match service.create_job(draft) {
        Ok(job) => (StatusCode::CREATED, Json(job)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_jobs_handler<J, A>(
    State(service): State<SharedService<J, A>>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicantRepository + 'static,
{
    match service.list_jobs() {
        Ok(jobs) => (StatusCode::OK, Json(jobs)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn job_handler<J, A>(
    State(service): State<SharedService<J, A>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicantRepository + 'static,
{
    match service.job(&JobId(job_id)) {
        Ok(job) => (StatusCode::OK, Json(job)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_applicants_handler<J, A>(
    State(service): State<SharedService<J, A>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicantRepository + 'static,
{
    match service.list_applicants(&JobId(job_id)) {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn test_screening_handler<J, A>(
    State(service): State<SharedService<J, A>>,
    Path(job_id): Path<String>,
    Json(request): Json<TestScreeningRequest>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicantRepository + 'static,
{
    match service.test_screening(&JobId(job_id), request) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn apply_handler<J, A>(
    State(service): State<SharedService<J, A>>,
    Json(submission): Json<ApplicationSubmission>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicantRepository + 'static,
{
    match service.apply(submission) {
        Ok(receipt) => {
            let record = &receipt.record;
            let payload = json!({
                "message": "Application submitted successfully",
                "applicant_id": record.id,
                "screening_result": receipt.verdict,
                "auto_screening_status": record.auto_screening_status,
                "applicant_status": record.status,
            });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn applicant_handler<J, A>(
    State(service): State<SharedService<J, A>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicantRepository + 'static,
{
    match service.get(&ApplicantId(applicant_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rescreen_handler<J, A>(
    State(service): State<SharedService<J, A>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicantRepository + 'static,
{
    match service.rescreen(&ApplicantId(applicant_id)) {
        Ok(outcome) => {
            let payload = json!({
                "message": "Auto-screening completed successfully.",
                "new_status": outcome.verdict.status,
                "applicant_status": outcome.record.status,
                "log": outcome.verdict.log,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_status_handler<J, A>(
    State(service): State<SharedService<J, A>>,
    Path(applicant_id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicantRepository + 'static,
{
    match service.update_status(&ApplicantId(applicant_id), update.status) {
        Ok(record) => (StatusCode::OK, Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: RecruitmentError) -> Response {
    let status = match &error {
        RecruitmentError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RecruitmentError::JobNotFound(_)
        | RecruitmentError::ApplicantNotFound(_)
        | RecruitmentError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        RecruitmentError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        RecruitmentError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
