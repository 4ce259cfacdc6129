use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Label of the pseudo-criterion that carries a job's AI score threshold.
pub const AI_SCORE_THRESHOLD_LABEL: &str = "ai_score_threshold";

/// One screening rule attached to a job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionDefinition {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: CriterionKind,
    #[serde(default)]
    pub criteria: String,
    #[serde(default)]
    pub required: bool,
}

impl CriterionDefinition {
    pub fn new(
        label: impl Into<String>,
        kind: CriterionKind,
        criteria: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            criteria: criteria.into(),
            required,
        }
    }

    pub(crate) fn is_ai_score_threshold(&self) -> bool {
        self.label == AI_SCORE_THRESHOLD_LABEL
    }
}

/// Field type selecting the evaluator. Unknown types are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CriterionKind {
    Number,
    Text,
    Unsupported(String),
}

impl CriterionKind {
    pub fn as_str(&self) -> &str {
        match self {
            CriterionKind::Number => "number",
            CriterionKind::Text => "text",
            CriterionKind::Unsupported(raw) => raw,
        }
    }
}

impl From<String> for CriterionKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "number" => CriterionKind::Number,
            "text" => CriterionKind::Text,
            _ => CriterionKind::Unsupported(value),
        }
    }
}

impl From<CriterionKind> for String {
    fn from(value: CriterionKind) -> Self {
        match value {
            CriterionKind::Unsupported(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

/// Scalar answer submitted for a custom field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum AnswerValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<AnswerValue>),
}

impl AnswerValue {
    /// Missing-equivalent values: `null` and the empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Null => true,
            AnswerValue::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Finite numeric reading of the value, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(value) => Some(*value),
            AnswerValue::Text(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|value| value.is_finite())
    }

    /// Plain string form used for text comparison and log messages.
    pub fn to_text(&self) -> String {
        match self {
            AnswerValue::Null => String::new(),
            AnswerValue::Bool(flag) => flag.to_string(),
            AnswerValue::Number(value) => value.to_string(),
            AnswerValue::Text(text) => text.clone(),
            AnswerValue::List(items) => items
                .iter()
                .map(AnswerValue::to_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<Value> for AnswerValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => AnswerValue::Null,
            Value::Bool(flag) => AnswerValue::Bool(flag),
            Value::Number(number) => number
                .as_f64()
                .map(AnswerValue::Number)
                .unwrap_or_else(|| AnswerValue::Text(number.to_string())),
            Value::String(text) => AnswerValue::Text(text),
            Value::Array(items) => {
                AnswerValue::List(items.into_iter().map(AnswerValue::from).collect())
            }
            object @ Value::Object(_) => AnswerValue::Text(object.to_string()),
        }
    }
}

impl From<AnswerValue> for Value {
    fn from(value: AnswerValue) -> Self {
        match value {
            AnswerValue::Null => Value::Null,
            AnswerValue::Bool(flag) => Value::Bool(flag),
            AnswerValue::Number(number) => serde_json::Number::from_f64(number)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            AnswerValue::Text(text) => Value::String(text),
            AnswerValue::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Bool(value)
    }
}

/// Applicant answers keyed by criterion label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<String, AnswerValue>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON payload; anything other than an object is rejected.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(
            object
                .iter()
                .map(|(label, answer)| (label.clone(), AnswerValue::from(answer.clone())))
                .collect(),
        )
    }

    pub fn get(&self, label: &str) -> Option<&AnswerValue> {
        self.0.get(label)
    }

    /// Answer for `label` unless it is missing, `null` or empty.
    pub fn present(&self, label: &str) -> Option<&AnswerValue> {
        self.get(label).filter(|answer| !answer.is_blank())
    }

    pub fn insert(&mut self, label: impl Into<String>, answer: impl Into<AnswerValue>) {
        self.0.insert(label.into(), answer.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.0.iter()
    }

    pub(crate) fn get_mut(&mut self, label: &str) -> Option<&mut AnswerValue> {
        self.0.get_mut(label)
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(label, answer)| (label.clone(), Value::from(answer.clone())))
                .collect(),
        )
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerMap
where
    K: Into<String>,
    V: Into<AnswerValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(label, answer)| (label.into(), answer.into()))
                .collect(),
        )
    }
}
