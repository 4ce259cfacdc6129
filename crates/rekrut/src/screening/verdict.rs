use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of checking a single criterion against an applicant's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CriterionOutcome {
    Passed { reason: String },
    Failed { reason: String },
    NeedsReview { reason: String },
}

impl CriterionOutcome {
    pub fn passed(reason: impl Into<String>) -> Self {
        Self::Passed {
            reason: reason.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn needs_review(reason: impl Into<String>) -> Self {
        Self::NeedsReview {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            CriterionOutcome::Passed { reason }
            | CriterionOutcome::Failed { reason }
            | CriterionOutcome::NeedsReview { reason } => reason,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CriterionOutcome::Failed { .. })
    }
}

/// Aggregate screening result. There is no partial pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreeningStatus {
    #[serde(rename = "Lolos")]
    Lolos,
    #[serde(rename = "Tidak Lolos")]
    TidakLolos,
}

impl ScreeningStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ScreeningStatus::Lolos => "Lolos",
            ScreeningStatus::TidakLolos => "Tidak Lolos",
        }
    }
}

impl fmt::Display for ScreeningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub reason: String,
}

/// Justifications grouped into the buckets administrators review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningLog {
    #[serde(rename = "Lolos", default)]
    pub passed: Vec<LogEntry>,
    #[serde(rename = "Tidak Lolos", default)]
    pub failed: Vec<LogEntry>,
    #[serde(rename = "Review", default)]
    pub review: Vec<LogEntry>,
}

impl ScreeningLog {
    pub fn from_outcomes<'a, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a CriterionOutcome>,
    {
        let mut log = ScreeningLog::default();
        for outcome in outcomes {
            let entry = LogEntry {
                reason: outcome.reason().to_string(),
            };
            match outcome {
                CriterionOutcome::Passed { .. } => log.passed.push(entry),
                CriterionOutcome::Failed { .. } => log.failed.push(entry),
                CriterionOutcome::NeedsReview { .. } => log.review.push(entry),
            }
        }
        log
    }

    pub fn len(&self) -> usize {
        self.passed.len() + self.failed.len() + self.review.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Screening output handed back to the caller for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningVerdict {
    pub status: ScreeningStatus,
    pub log: ScreeningLog,
}

impl ScreeningVerdict {
    /// Fails if and only if at least one outcome failed.
    pub fn from_outcomes(outcomes: &[CriterionOutcome]) -> Self {
        let status = if outcomes.iter().any(CriterionOutcome::is_failure) {
            ScreeningStatus::TidakLolos
        } else {
            ScreeningStatus::Lolos
        };

        Self {
            status,
            log: ScreeningLog::from_outcomes(outcomes),
        }
    }

    pub fn passed(&self) -> bool {
        self.status == ScreeningStatus::Lolos
    }
}
