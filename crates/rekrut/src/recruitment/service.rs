use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::domain::{
    ApplicantId, ApplicantRecord, ApplicantStatus, ApplicationSubmission, AutoScreeningStatus,
    JobDraft, JobId, JobPosting,
};
use super::repository::{ApplicantRepository, JobRepository, RepositoryError};
use crate::screening::{AnswerMap, ScreeningConfig, ScreeningEngine, ScreeningVerdict};

/// Service composing job storage, applicant storage, and the screening engine.
pub struct RecruitmentService<J, A> {
    jobs: Arc<J>,
    applicants: Arc<A>,
    engine: Arc<ScreeningEngine>,
}

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static APPLICANT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> JobId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobId(format!("job-{id:06}"))
}

fn next_applicant_id() -> ApplicantId {
    let id = APPLICANT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicantId(format!("applicant-{id:06}"))
}

impl<J, A> RecruitmentService<J, A>
where
    J: JobRepository + 'static,
    A: ApplicantRepository + 'static,
{
    pub fn new(jobs: Arc<J>, applicants: Arc<A>, config: ScreeningConfig) -> Self {
        Self {
            jobs,
            applicants,
            engine: Arc::new(ScreeningEngine::new(config)),
        }
    }

    pub fn engine(&self) -> &ScreeningEngine {
        &self.engine
    }

    /// Open a new position after checking its screening criteria are addressable.
    pub fn create_job(&self, draft: JobDraft) -> Result<JobPosting, RecruitmentError> {
        validate_draft(&draft)?;
        let job = JobPosting::from_draft(next_job_id(), draft);
        let stored = self.jobs.insert(job)?;
        info!(
            job_id = %stored.id.0,
            criteria = stored.custom_fields.len(),
            "job posting created"
        );
        Ok(stored)
    }

    pub fn job(&self, job_id: &JobId) -> Result<JobPosting, RecruitmentError> {
        self.jobs
            .fetch(job_id)?
            .ok_or_else(|| RecruitmentError::JobNotFound(job_id.clone()))
    }

    pub fn list_jobs(&self) -> Result<Vec<JobPosting>, RecruitmentError> {
        let mut jobs = self.jobs.list()?;
        jobs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(jobs)
    }

    /// Record an application, auto-screening it when the job defines criteria.
    pub fn apply(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<ApplicationReceipt, RecruitmentError> {
        validate_submission(&submission)?;
        let job = self.job(&submission.job_id)?;

        let mut status = ApplicantStatus::Applied;
        let mut auto_screening_status = AutoScreeningStatus::Pending;
        let mut verdict = None;

        if job.has_screening_criteria() {
            if let Some(raw) = submission.custom_answers.as_ref() {
                let screened = self.screen(&job, raw, submission.ai_score);
                status = ApplicantStatus::from_screening(screened.status);
                auto_screening_status = screened.status.into();
                verdict = Some(screened);
            }
        }

        let record = ApplicantRecord {
            id: next_applicant_id(),
            job_id: job.id.clone(),
            name: submission.name.trim().to_string(),
            email: submission.email.trim().to_string(),
            user_id: submission.user_id,
            company: submission.company,
            uploaded_files: submission.uploaded_files,
            custom_answers: submission.custom_answers,
            status,
            auto_screening_status,
            auto_screening_log: verdict.as_ref().map(|verdict| verdict.log.clone()),
            ai_score: submission.ai_score,
            applied_at: Utc::now(),
        };

        let stored = self.applicants.insert(record)?;
        info!(
            applicant_id = %stored.id.0,
            job_id = %job.id.0,
            auto_screening = stored.auto_screening_status.label(),
            status = stored.status.label(),
            "application submitted"
        );

        Ok(ApplicationReceipt {
            record: stored,
            verdict,
        })
    }

    /// Re-run screening for a stored applicant against the job's current criteria.
    pub fn rescreen(&self, applicant_id: &ApplicantId) -> Result<RescreenOutcome, RecruitmentError> {
        info!(applicant_id = %applicant_id.0, "starting auto-screening rerun");
        let mut record = self.get(applicant_id)?;
        let job = self.job(&record.job_id)?;
        debug!(applicant_id = %applicant_id.0, job_id = %job.id.0, "loaded job criteria");

        let raw = record.custom_answers.clone().unwrap_or(Value::Null);
        let verdict = self.screen(&job, &raw, record.ai_score);

        record.auto_screening_status = verdict.status.into();
        record.auto_screening_log = Some(verdict.log.clone());
        if record.status.is_screening_stage() {
            record.status = ApplicantStatus::from_screening(verdict.status);
        } else {
            warn!(
                applicant_id = %applicant_id.0,
                status = record.status.label(),
                "applicant past screening; keeping pipeline stage"
            );
        }

        self.applicants.update(record.clone())?;
        info!(
            applicant_id = %applicant_id.0,
            result = verdict.status.label(),
            status = record.status.label(),
            "auto-screening rerun stored"
        );

        Ok(RescreenOutcome { record, verdict })
    }

    /// Dry-run screening of ad-hoc answers without storing anything.
    pub fn test_screening(
        &self,
        job_id: &JobId,
        request: TestScreeningRequest,
    ) -> Result<TestScreening, RecruitmentError> {
        let job = self.job(job_id)?;
        if !job.has_screening_criteria() {
            return Ok(TestScreening::NoCriteria {
                message: "No screening criteria defined for this job".to_string(),
            });
        }

        let raw = request.test_answers.clone().unwrap_or(Value::Null);
        let answers = AnswerMap::from_json(&raw);
        let screening = self
            .engine
            .screen(&job.custom_fields, answers.as_ref(), request.ai_score);

        Ok(TestScreening::Evaluated {
            job_title: job.title,
            original_answers: request.test_answers,
            processed_answers: screening.processed.map(|processed| processed.to_json()),
            screening_result: screening.verdict,
        })
    }

    /// Administrator override of the pipeline stage.
    pub fn update_status(
        &self,
        applicant_id: &ApplicantId,
        status: ApplicantStatus,
    ) -> Result<ApplicantRecord, RecruitmentError> {
        let mut record = self.get(applicant_id)?;
        let previous = record.status;
        record.status = status;
        self.applicants.update(record.clone())?;
        info!(
            applicant_id = %applicant_id.0,
            from = previous.label(),
            to = status.label(),
            "applicant status updated"
        );
        Ok(record)
    }

    pub fn get(&self, applicant_id: &ApplicantId) -> Result<ApplicantRecord, RecruitmentError> {
        self.applicants
            .fetch(applicant_id)?
            .ok_or_else(|| RecruitmentError::ApplicantNotFound(applicant_id.clone()))
    }

    pub fn list_applicants(&self, job_id: &JobId) -> Result<Vec<ApplicantRecord>, RecruitmentError> {
        self.job(job_id)?;
        let mut records = self.applicants.list_for_job(job_id)?;
        records.sort_by(|a, b| a.applied_at.cmp(&b.applied_at).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }

    fn screen(&self, job: &JobPosting, raw: &Value, ai_score: Option<f64>) -> ScreeningVerdict {
        let answers = AnswerMap::from_json(raw);
        if answers.is_none() {
            warn!(job_id = %job.id.0, "custom answers are not a JSON object");
        }

        let screening = self
            .engine
            .screen(&job.custom_fields, answers.as_ref(), ai_score);
        debug!(
            job_id = %job.id.0,
            passed = screening.verdict.log.passed.len(),
            failed = screening.verdict.log.failed.len(),
            review = screening.verdict.log.review.len(),
            "screening log"
        );
        screening.verdict
    }
}

fn validate_draft(draft: &JobDraft) -> Result<(), ValidationError> {
    if draft.title.trim().is_empty() {
        return Err(ValidationError::MissingField("title"));
    }

    let mut seen = HashSet::new();
    for (index, criterion) in draft.custom_fields.iter().enumerate() {
        let label = criterion.label.trim();
        if label.is_empty() {
            return Err(ValidationError::BlankCriterionLabel { index });
        }
        if !seen.insert(label) {
            return Err(ValidationError::DuplicateCriterionLabel(label.to_string()));
        }
    }
    Ok(())
}

fn validate_submission(submission: &ApplicationSubmission) -> Result<(), ValidationError> {
    if submission.job_id.0.trim().is_empty() {
        return Err(ValidationError::MissingField("job_id"));
    }
    if submission.name.trim().is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    if submission.email.trim().is_empty() {
        return Err(ValidationError::MissingField("email"));
    }
    Ok(())
}

/// Stored applicant plus the verdict computed during intake, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationReceipt {
    pub record: ApplicantRecord,
    pub verdict: Option<ScreeningVerdict>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RescreenOutcome {
    pub record: ApplicantRecord,
    pub verdict: ScreeningVerdict,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestScreeningRequest {
    #[serde(default)]
    pub test_answers: Option<Value>,
    #[serde(default)]
    pub ai_score: Option<f64>,
}

/// Result of a dry-run screening.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TestScreening {
    NoCriteria {
        message: String,
    },
    Evaluated {
        job_title: String,
        original_answers: Option<Value>,
        processed_answers: Option<Value>,
        screening_result: ScreeningVerdict,
    },
}

/// Input rejected before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("criterion #{index} has an empty label")]
    BlankCriterionLabel { index: usize },
    #[error("criterion label '{0}' is used more than once")]
    DuplicateCriterionLabel(String),
}

/// Error raised by the recruitment service.
#[derive(Debug, thiserror::Error)]
pub enum RecruitmentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("job {0} not found")]
    JobNotFound(JobId),
    #[error("applicant {0} not found")]
    ApplicantNotFound(ApplicantId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
