use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::recruitment::domain::{
    ApplicantId, ApplicantRecord, ApplicationSubmission, JobDraft, JobId, JobPosting,
};
use crate::recruitment::repository::{ApplicantRepository, JobRepository, RepositoryError};
use crate::recruitment::{recruitment_router, RecruitmentService};
use crate::screening::{CriterionDefinition, CriterionKind, ScreeningConfig};

pub(super) type MemoryService = RecruitmentService<MemoryJobs, MemoryApplicants>;

pub(super) fn screening_config() -> ScreeningConfig {
    ScreeningConfig {
        default_ai_score_threshold: 70.0,
    }
}

pub(super) fn graduate_draft() -> JobDraft {
    JobDraft {
        title: "Junior Data Analyst".to_string(),
        company: "PT Contoh Nusantara".to_string(),
        location: "Jakarta".to_string(),
        description: "Analyze hiring funnel data.".to_string(),
        custom_fields: vec![
            CriterionDefinition::new("gpa", CriterionKind::Number, ">=3.0", true),
            CriterionDefinition::new("degree", CriterionKind::Text, "S1,S2", true),
            CriterionDefinition::new("certification", CriterionKind::Text, "TOEFL,IELTS", false),
        ],
    }
}

pub(super) fn open_draft() -> JobDraft {
    JobDraft {
        title: "Office Assistant".to_string(),
        company: "PT Contoh Nusantara".to_string(),
        location: "Bandung".to_string(),
        description: String::new(),
        custom_fields: Vec::new(),
    }
}

pub(super) fn submission(job_id: &JobId, answers: Value) -> ApplicationSubmission {
    ApplicationSubmission {
        job_id: job_id.clone(),
        name: "Dewi Lestari".to_string(),
        email: "dewi@example.com".to_string(),
        user_id: Some("user-42".to_string()),
        company: Some("PT Contoh Nusantara".to_string()),
        uploaded_files: vec!["user-42/cv.pdf".to_string()],
        custom_answers: Some(answers),
        ai_score: None,
    }
}

pub(super) fn passing_answers() -> Value {
    json!({ "gpa": "3.45", "degree": " S1 " })
}

pub(super) fn build_service() -> (MemoryService, Arc<MemoryJobs>, Arc<MemoryApplicants>) {
    let jobs = Arc::new(MemoryJobs::default());
    let applicants = Arc::new(MemoryApplicants::default());
    let service = RecruitmentService::new(jobs.clone(), applicants.clone(), screening_config());
    (service, jobs, applicants)
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    recruitment_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryJobs {
    pub(super) jobs: Arc<Mutex<HashMap<JobId, JobPosting>>>,
}

impl JobRepository for MemoryJobs {
    fn insert(&self, job: JobPosting) -> Result<JobPosting, RepositoryError> {
        let mut guard = self.jobs.lock().expect("job mutex poisoned");
        if guard.contains_key(&job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self.jobs.lock().expect("job mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        let guard = self.jobs.lock().expect("job mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryApplicants {
    pub(super) records: Arc<Mutex<HashMap<ApplicantId, ApplicantRecord>>>,
}

impl MemoryApplicants {
    pub(super) fn stored(&self, id: &ApplicantId) -> ApplicantRecord {
        self.records
            .lock()
            .expect("applicant mutex poisoned")
            .get(id)
            .cloned()
            .expect("applicant stored")
    }
}

impl ApplicantRepository for MemoryApplicants {
    fn insert(&self, record: ApplicantRecord) -> Result<ApplicantRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("applicant mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicantRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("applicant mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ApplicantId) -> Result<Option<ApplicantRecord>, RepositoryError> {
        let guard = self.records.lock().expect("applicant mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_for_job(&self, job_id: &JobId) -> Result<Vec<ApplicantRecord>, RepositoryError> {
        let guard = self.records.lock().expect("applicant mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.job_id == job_id)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableApplicants;

impl ApplicantRepository for UnavailableApplicants {
    fn insert(&self, _record: ApplicantRecord) -> Result<ApplicantRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ApplicantRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicantId) -> Result<Option<ApplicantRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_for_job(&self, _job_id: &JobId) -> Result<Vec<ApplicantRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
