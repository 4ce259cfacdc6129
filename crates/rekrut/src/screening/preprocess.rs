use super::criteria::{AnswerMap, AnswerValue, CriterionDefinition, CriterionKind};

/// Retype raw answers to match each field's declared type.
///
/// Keys are never added or removed. Number fields become `f64` when the raw
/// value parses to a finite number and are left alone otherwise; text fields
/// are coerced to trimmed strings. Applying this twice is the same as once.
pub fn preprocess(criteria: &[CriterionDefinition], raw: &AnswerMap) -> AnswerMap {
    let mut processed = raw.clone();

    for criterion in criteria {
        let Some(answer) = processed.get_mut(&criterion.label) else {
            continue;
        };
        if answer.is_blank() {
            continue;
        }

        match criterion.kind {
            CriterionKind::Number => {
                if let Some(value) = answer.as_number() {
                    *answer = AnswerValue::Number(value);
                }
            }
            CriterionKind::Text => {
                *answer = AnswerValue::Text(answer.to_text().trim().to_string());
            }
            CriterionKind::Unsupported(_) => {}
        }
    }

    processed
}
