//! Job postings, applications, and the hiring pipeline around auto-screening.
//!
//! The service loads a job's criteria and an applicant's answers from the
//! repositories, runs them through [`crate::screening`], and persists the
//! verdict together with the pipeline stage it implies.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantId, ApplicantRecord, ApplicantStatus, ApplicantStatusView, ApplicationSubmission,
    AutoScreeningStatus, JobDraft, JobId, JobPosting,
};
pub use repository::{ApplicantRepository, JobRepository, RepositoryError};
pub use router::recruitment_router;
pub use service::{
    ApplicationReceipt, RecruitmentError, RecruitmentService, RescreenOutcome, TestScreening,
    TestScreeningRequest, ValidationError,
};
