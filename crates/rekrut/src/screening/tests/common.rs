use serde_json::Value;

use crate::screening::{
    AnswerMap, CriterionDefinition, CriterionKind, ScreeningConfig, ScreeningEngine,
};

pub(super) fn number(label: &str, criteria: &str, required: bool) -> CriterionDefinition {
    CriterionDefinition::new(label, CriterionKind::Number, criteria, required)
}

pub(super) fn text(label: &str, criteria: &str, required: bool) -> CriterionDefinition {
    CriterionDefinition::new(label, CriterionKind::Text, criteria, required)
}

pub(super) fn answers(value: Value) -> AnswerMap {
    AnswerMap::from_json(&value).expect("answers fixture must be an object")
}

pub(super) fn graduate_criteria() -> Vec<CriterionDefinition> {
    vec![
        number("gpa", ">=3.0", true),
        text("degree", "S1,S2", true),
    ]
}

pub(super) fn engine() -> ScreeningEngine {
    ScreeningEngine::new(ScreeningConfig {
        default_ai_score_threshold: 70.0,
    })
}

pub(super) fn reasons(entries: &[crate::screening::LogEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.reason.as_str()).collect()
}
