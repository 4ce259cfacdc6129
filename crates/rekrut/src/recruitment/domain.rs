use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::screening::{CriterionDefinition, ScreeningLog, ScreeningStatus};

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

/// Identifier wrapper for applicants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fields an administrator fills in when opening a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub custom_fields: Vec<CriterionDefinition>,
}

/// Published job posting with its screening criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub custom_fields: Vec<CriterionDefinition>,
}

impl JobPosting {
    pub fn from_draft(id: JobId, draft: JobDraft) -> Self {
        Self {
            id,
            title: draft.title.trim().to_string(),
            company: draft.company,
            location: draft.location,
            description: draft.description,
            custom_fields: draft.custom_fields,
        }
    }

    pub fn has_screening_criteria(&self) -> bool {
        !self.custom_fields.is_empty()
    }
}

/// Candidate application as received from the apply form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub job_id: JobId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, rename = "uploadedFiles", alias = "uploaded_files")]
    pub uploaded_files: Vec<String>,
    #[serde(default)]
    pub custom_answers: Option<Value>,
    #[serde(default)]
    pub ai_score: Option<f64>,
}

/// Hiring pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicantStatus {
    #[serde(rename = "Applied")]
    Applied,
    #[serde(rename = "Shortlisted")]
    Shortlisted,
    #[serde(rename = "Scheduled for Assessment")]
    ScheduledForAssessment,
    #[serde(rename = "Interviewed")]
    Interviewed,
    #[serde(rename = "Hired")]
    Hired,
    #[serde(rename = "Rejected")]
    Rejected,
}

impl ApplicantStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicantStatus::Applied => "Applied",
            ApplicantStatus::Shortlisted => "Shortlisted",
            ApplicantStatus::ScheduledForAssessment => "Scheduled for Assessment",
            ApplicantStatus::Interviewed => "Interviewed",
            ApplicantStatus::Hired => "Hired",
            ApplicantStatus::Rejected => "Rejected",
        }
    }

    /// Pipeline stage implied by an automated screening result.
    pub const fn from_screening(status: ScreeningStatus) -> Self {
        match status {
            ScreeningStatus::Lolos => ApplicantStatus::Shortlisted,
            ScreeningStatus::TidakLolos => ApplicantStatus::Rejected,
        }
    }

    /// Stages that automated screening may still move.
    pub const fn is_screening_stage(self) -> bool {
        matches!(
            self,
            ApplicantStatus::Applied | ApplicantStatus::Shortlisted | ApplicantStatus::Rejected
        )
    }
}

/// Screening state stored on the applicant record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoScreeningStatus {
    #[serde(rename = "Belum Diproses")]
    Pending,
    #[serde(rename = "Lolos")]
    Lolos,
    #[serde(rename = "Tidak Lolos")]
    TidakLolos,
}

impl AutoScreeningStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AutoScreeningStatus::Pending => "Belum Diproses",
            AutoScreeningStatus::Lolos => "Lolos",
            AutoScreeningStatus::TidakLolos => "Tidak Lolos",
        }
    }
}

impl From<ScreeningStatus> for AutoScreeningStatus {
    fn from(value: ScreeningStatus) -> Self {
        match value {
            ScreeningStatus::Lolos => AutoScreeningStatus::Lolos,
            ScreeningStatus::TidakLolos => AutoScreeningStatus::TidakLolos,
        }
    }
}

/// Persisted applicant, including the raw answers and the latest screening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub id: ApplicantId,
    pub job_id: JobId,
    pub name: String,
    pub email: String,
    pub user_id: Option<String>,
    pub company: Option<String>,
    pub uploaded_files: Vec<String>,
    pub custom_answers: Option<Value>,
    pub status: ApplicantStatus,
    pub auto_screening_status: AutoScreeningStatus,
    pub auto_screening_log: Option<ScreeningLog>,
    pub ai_score: Option<f64>,
    pub applied_at: DateTime<Utc>,
}

impl ApplicantRecord {
    pub fn status_view(&self) -> ApplicantStatusView {
        ApplicantStatusView {
            applicant_id: self.id.clone(),
            job_id: self.job_id.clone(),
            status: self.status.label(),
            auto_screening_status: self.auto_screening_status.label(),
        }
    }
}

/// Slim status projection returned by pipeline endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicantStatusView {
    pub applicant_id: ApplicantId,
    pub job_id: JobId,
    pub status: &'static str,
    pub auto_screening_status: &'static str,
}
