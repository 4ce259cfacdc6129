use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::recruitment::router::{apply_handler, rescreen_handler};
use crate::recruitment::RecruitmentService;

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn apply_handler_returns_screening_summary() {
    let (service, _, _) = build_service();
    let job = service.create_job(graduate_draft()).unwrap();
    let service = Arc::new(service);

    let response = apply_handler::<MemoryJobs, MemoryApplicants>(
        State(service),
        axum::Json(submission(&job.id, passing_answers())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["message"], "Application submitted successfully");
    assert_eq!(payload["auto_screening_status"], "Lolos");
    assert_eq!(payload["applicant_status"], "Shortlisted");
    assert_eq!(payload["screening_result"]["status"], "Lolos");
    assert_eq!(
        payload["screening_result"]["log"]["Lolos"]
            .as_array()
            .map(Vec::len),
        Some(2)
    );
}

#[tokio::test]
async fn apply_handler_returns_internal_error_on_repository_failure() {
    let jobs = Arc::new(MemoryJobs::default());
    let service = RecruitmentService::new(jobs, Arc::new(UnavailableApplicants), screening_config());
    let job = service.create_job(graduate_draft()).unwrap();

    let response = apply_handler::<MemoryJobs, UnavailableApplicants>(
        State(Arc::new(service)),
        axum::Json(submission(&job.id, passing_answers())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "repository unavailable: database offline");
}

#[tokio::test]
async fn rescreen_handler_returns_not_found_for_unknown_applicant() {
    let (service, _, _) = build_service();

    let response = rescreen_handler::<MemoryJobs, MemoryApplicants>(
        State(Arc::new(service)),
        Path("applicant-unknown".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "applicant applicant-unknown not found");
}

#[tokio::test]
async fn create_job_route_validates_criteria() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let body = json!({
        "title": "Barista",
        "custom_fields": [
            { "label": "age", "type": "number", "criteria": "<=30", "required": true },
            { "label": "age", "type": "number", "criteria": ">=18", "required": true }
        ]
    });
    let response = router
        .oneshot(json_request("POST", "/api/v1/jobs", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "criterion label 'age' is used more than once");
}

#[tokio::test]
async fn job_routes_create_and_fetch_postings() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let created = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/jobs",
            &serde_json::to_value(graduate_draft()).unwrap(),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let job = read_json_body(created).await;
    let job_id = job["id"].as_str().unwrap().to_string();
    assert_eq!(job["custom_fields"][0]["type"], "number");

    let fetched = router
        .clone()
        .oneshot(get_request(&format!("/api/v1/jobs/{job_id}")))
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(read_json_body(fetched).await["title"], "Junior Data Analyst");

    let listed = router.oneshot(get_request("/api/v1/jobs")).await.unwrap();
    assert_eq!(listed.status(), StatusCode::OK);
    let jobs = read_json_body(listed).await;
    assert_eq!(jobs.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn unknown_job_route_returns_not_found() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(get_request("/api/v1/jobs/job-unknown/applicants"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_screening_route_runs_dry_screening() {
    let (service, _, _) = build_service();
    let job = service.create_job(graduate_draft()).unwrap();
    let router = router_with_service(service);

    let body = json!({
        "test_answers": { "gpa": "2,9", "degree": "S1" },
        "ai_score": 82
    });
    let response = router
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/jobs/{}/test-screening", job.id),
            &body,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["job_title"], "Junior Data Analyst");
    assert_eq!(payload["processed_answers"]["gpa"], "2,9");
    assert_eq!(payload["screening_result"]["status"], "Lolos");
    assert_eq!(
        payload["screening_result"]["log"]["Lolos"][0]["reason"],
        "Skor AI berhasil dihitung: 82"
    );
    assert_eq!(
        payload["screening_result"]["log"]["Review"][0]["reason"],
        "Jawaban '2,9' untuk gpa bukan angka yang valid."
    );
}

#[tokio::test]
async fn rescreen_and_status_routes_update_the_applicant() {
    let (service, _, _) = build_service();
    let job = service.create_job(graduate_draft()).unwrap();
    let receipt = service
        .apply(submission(&job.id, json!({ "gpa": "3.1", "degree": "SMA" })))
        .unwrap();
    let applicant_id = receipt.record.id.to_string();
    let router = router_with_service(service);

    let rescreened = router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/applications/{applicant_id}/rescreen"),
            &json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(rescreened.status(), StatusCode::OK);
    let payload = read_json_body(rescreened).await;
    assert_eq!(payload["new_status"], "Tidak Lolos");
    assert_eq!(payload["applicant_status"], "Rejected");
    assert_eq!(
        payload["log"]["Tidak Lolos"][0]["reason"],
        "Jawaban 'SMA' untuk degree tidak ada di daftar yang diizinkan: s1, s2."
    );

    let updated = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/applications/{applicant_id}/status"),
            &json!({ "status": "Scheduled for Assessment" }),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    let view = read_json_body(updated).await;
    assert_eq!(view["status"], "Scheduled for Assessment");
    assert_eq!(view["auto_screening_status"], "Tidak Lolos");

    let fetched = router
        .oneshot(get_request(&format!("/api/v1/applications/{applicant_id}")))
        .await
        .unwrap();
    assert_eq!(fetched.status(), StatusCode::OK);
    let record = read_json_body(fetched).await;
    assert_eq!(record["status"], "Scheduled for Assessment");
    assert_eq!(record["custom_answers"]["degree"], "SMA");
}

#[tokio::test]
async fn status_route_rejects_unknown_stage() {
    let (service, _, _) = build_service();
    let job = service.create_job(open_draft()).unwrap();
    let receipt = service.apply(submission(&job.id, json!({}))).unwrap();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/applications/{}/status", receipt.record.id),
            &json!({ "status": "Ghosted" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
