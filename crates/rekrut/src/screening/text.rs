use super::criteria::AnswerValue;
use super::verdict::CriterionOutcome;

/// Comma-separated allow-list, trimmed and lower-cased, without empty tokens.
pub fn allow_list(criteria: &str) -> Vec<String> {
    criteria
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Check a free-text answer against a comma-separated allow-list.
pub fn evaluate_text(answer: &AnswerValue, criteria: &str, label: &str) -> CriterionOutcome {
    let allowed = allow_list(criteria);
    if allowed.is_empty() {
        return CriterionOutcome::needs_review(format!("Kriteria untuk {label} kosong."));
    }

    let cleaned = answer.to_text().trim().to_lowercase();
    if allowed.iter().any(|candidate| *candidate == cleaned) {
        CriterionOutcome::passed(format!(
            "Jawaban '{answer}' untuk {label} memenuhi kriteria yang diizinkan."
        ))
    } else {
        CriterionOutcome::failed(format!(
            "Jawaban '{answer}' untuk {label} tidak ada di daftar yang diizinkan: {}.",
            allowed.join(", ")
        ))
    }
}
