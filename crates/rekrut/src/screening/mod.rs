//! Rule-based auto-screening of job applications.
//!
//! A job carries an ordered list of [`CriterionDefinition`]s; an applicant
//! submits an [`AnswerMap`]. [`preprocess`] retypes the raw answers and
//! [`evaluate`] turns them into a [`ScreeningVerdict`]. Neither function
//! fails: malformed rules or answers end up in the `Review` bucket of the log.

mod criteria;
mod number;
mod preprocess;
mod text;
mod verdict;

#[cfg(test)]
mod tests;

pub use criteria::{
    AnswerMap, AnswerValue, CriterionDefinition, CriterionKind, AI_SCORE_THRESHOLD_LABEL,
};
pub use number::{evaluate_number, Comparison, NumericRule, RuleParseError, TOLERANCE};
pub use preprocess::preprocess;
pub use text::{allow_list, evaluate_text};
pub use verdict::{CriterionOutcome, LogEntry, ScreeningLog, ScreeningStatus, ScreeningVerdict};

use serde::{Deserialize, Serialize};

const DEFAULT_AI_SCORE_THRESHOLD: f64 = 70.0;

/// Evaluate preprocessed answers against a job's criteria.
///
/// `None` answers model a payload that was missing or not a JSON object.
pub fn evaluate(criteria: &[CriterionDefinition], answers: Option<&AnswerMap>) -> ScreeningVerdict {
    let rules = answer_rules(criteria);
    if rules.is_empty() {
        return ScreeningVerdict::from_outcomes(&[CriterionOutcome::passed(
            "Tidak ada kriteria untuk dicek.",
        )]);
    }

    let mut outcomes = Vec::with_capacity(rules.len());
    match answers {
        Some(answers) => outcomes.extend(check_rules(&rules, answers)),
        None => outcomes.push(invalid_answers()),
    }
    ScreeningVerdict::from_outcomes(&outcomes)
}

/// Criteria that are checked against answers, i.e. everything but the AI threshold row.
fn answer_rules(criteria: &[CriterionDefinition]) -> Vec<&CriterionDefinition> {
    criteria
        .iter()
        .filter(|criterion| !criterion.is_ai_score_threshold())
        .collect()
}

fn invalid_answers() -> CriterionOutcome {
    CriterionOutcome::failed("Data jawaban tidak valid.")
}

fn check_rules(rules: &[&CriterionDefinition], answers: &AnswerMap) -> Vec<CriterionOutcome> {
    rules
        .iter()
        .filter_map(|criterion| check_criterion(criterion, answers))
        .collect()
}

/// `None` means the criterion was skipped (optional and unanswered).
fn check_criterion(criterion: &CriterionDefinition, answers: &AnswerMap) -> Option<CriterionOutcome> {
    let label = criterion.label.as_str();

    let Some(answer) = answers.present(label) else {
        return criterion.required.then(|| {
            CriterionOutcome::failed(format!(
                "Jawaban untuk {label} tidak ditemukan atau kosong."
            ))
        });
    };

    if criterion.criteria.trim().is_empty() {
        return Some(CriterionOutcome::needs_review(format!(
            "Kriteria untuk {label} tidak didefinisikan."
        )));
    }

    let outcome = match &criterion.kind {
        CriterionKind::Number => evaluate_number(answer, &criterion.criteria, label),
        CriterionKind::Text => evaluate_text(answer, &criterion.criteria, label),
        CriterionKind::Unsupported(kind) => CriterionOutcome::needs_review(format!(
            "Tipe kriteria '{kind}' untuk {label} tidak didukung."
        )),
    };
    Some(outcome)
}

/// Screening dials that are not part of a job's own criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningConfig {
    pub default_ai_score_threshold: f64,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            default_ai_score_threshold: DEFAULT_AI_SCORE_THRESHOLD,
        }
    }
}

/// Stateless screener that also knows how to gate on an external AI fit score.
#[derive(Debug, Clone, Default)]
pub struct ScreeningEngine {
    config: ScreeningConfig,
}

impl ScreeningEngine {
    pub fn new(config: ScreeningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScreeningConfig {
        &self.config
    }

    pub fn preprocess(&self, criteria: &[CriterionDefinition], raw: &AnswerMap) -> AnswerMap {
        preprocess(criteria, raw)
    }

    pub fn evaluate(
        &self,
        criteria: &[CriterionDefinition],
        answers: Option<&AnswerMap>,
    ) -> ScreeningVerdict {
        evaluate(criteria, answers)
    }

    /// Threshold from the job's `ai_score_threshold` row, else the configured default.
    pub fn ai_score_threshold(&self, criteria: &[CriterionDefinition]) -> f64 {
        criteria
            .iter()
            .filter(|criterion| criterion.is_ai_score_threshold())
            .find_map(|criterion| {
                criterion
                    .criteria
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
            })
            .unwrap_or(self.config.default_ai_score_threshold)
    }

    /// Like [`evaluate`], with the AI score checked against the job threshold first.
    pub fn evaluate_with_ai_score(
        &self,
        criteria: &[CriterionDefinition],
        answers: Option<&AnswerMap>,
        ai_score: f64,
    ) -> ScreeningVerdict {
        let threshold = self.ai_score_threshold(criteria);
        let mut outcomes = vec![CriterionOutcome::passed(format!(
            "Skor AI berhasil dihitung: {ai_score}"
        ))];
        if ai_score < threshold {
            outcomes.push(CriterionOutcome::failed(format!(
                "Skor AI ({ai_score}) di bawah ambang batas ({threshold})."
            )));
        }

        match answers {
            Some(answers) => outcomes.extend(check_rules(&answer_rules(criteria), answers)),
            None => outcomes.push(invalid_answers()),
        }
        ScreeningVerdict::from_outcomes(&outcomes)
    }

    /// Preprocess raw answers and evaluate them, gating on the AI score when one is known.
    pub fn screen(
        &self,
        criteria: &[CriterionDefinition],
        raw_answers: Option<&AnswerMap>,
        ai_score: Option<f64>,
    ) -> Screening {
        let processed = raw_answers.map(|raw| self.preprocess(criteria, raw));
        let verdict = match ai_score {
            Some(score) => self.evaluate_with_ai_score(criteria, processed.as_ref(), score),
            None => self.evaluate(criteria, processed.as_ref()),
        };
        Screening { processed, verdict }
    }
}

/// Preprocessed answers alongside the verdict they produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Screening {
    pub processed: Option<AnswerMap>,
    pub verdict: ScreeningVerdict,
}
