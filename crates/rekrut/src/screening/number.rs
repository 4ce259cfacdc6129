use std::fmt;

use super::criteria::AnswerValue;
use super::verdict::CriterionOutcome;

/// Absolute difference under which two values count as equal.
pub const TOLERANCE: f64 = 1e-6;

/// Comparison selected by a numeric criterion string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    AtLeast,
    AtMost,
    GreaterThan,
    LessThan,
    EqualTo,
}

impl Comparison {
    /// Operator phrase used in applicant-facing justifications.
    pub const fn phrase(self) -> &'static str {
        match self {
            Comparison::AtLeast => "minimal",
            Comparison::GreaterThan => "lebih dari",
            Comparison::AtMost => "maksimal",
            Comparison::LessThan => "kurang dari",
            Comparison::EqualTo => "sama dengan",
        }
    }

    pub fn holds(self, value: f64, threshold: f64) -> bool {
        let near = (value - threshold).abs() < TOLERANCE;
        match self {
            Comparison::AtLeast => value > threshold || near,
            Comparison::AtMost => value < threshold || near,
            Comparison::GreaterThan => value > threshold && !near,
            Comparison::LessThan => value < threshold && !near,
            Comparison::EqualTo => near,
        }
    }
}

/// First matching prefix wins, so two-character operators come before one-character ones.
const PREFIXES: &[(&str, Comparison)] = &[
    (">=", Comparison::AtLeast),
    ("<=", Comparison::AtMost),
    (">", Comparison::GreaterThan),
    ("<", Comparison::LessThan),
    ("=", Comparison::EqualTo),
    ("min ", Comparison::AtLeast),
    ("max ", Comparison::AtMost),
    ("minimal ", Comparison::AtLeast),
    ("maksimal ", Comparison::AtMost),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{input}' is not a numeric criterion")]
pub struct RuleParseError {
    pub input: String,
}

/// Parsed form of a numeric criterion such as `">= 3.0"` or `"min 2"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRule {
    pub comparison: Comparison,
    pub threshold: f64,
}

impl NumericRule {
    pub fn parse(input: &str) -> Result<Self, RuleParseError> {
        let trimmed = input.trim();
        let (comparison, rest) = split_operator(trimmed).unwrap_or((Comparison::EqualTo, trimmed));

        let threshold = rest
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| RuleParseError {
                input: input.to_string(),
            })?;

        Ok(Self {
            comparison,
            threshold,
        })
    }

    pub fn matches(&self, value: f64) -> bool {
        self.comparison.holds(value, self.threshold)
    }
}

impl fmt::Display for NumericRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.comparison.phrase(), self.threshold)
    }
}

fn split_operator(input: &str) -> Option<(Comparison, &str)> {
    PREFIXES.iter().find_map(|(prefix, comparison)| {
        let head = input.get(..prefix.len())?;
        head.eq_ignore_ascii_case(prefix)
            .then_some((*comparison, &input[prefix.len()..]))
    })
}

/// Check a numeric answer against a criterion string.
pub fn evaluate_number(answer: &AnswerValue, criteria: &str, label: &str) -> CriterionOutcome {
    let Some(value) = answer.as_number() else {
        return CriterionOutcome::needs_review(format!(
            "Jawaban '{answer}' untuk {label} bukan angka yang valid."
        ));
    };

    let rule = match NumericRule::parse(criteria) {
        Ok(rule) => rule,
        Err(_) => {
            return CriterionOutcome::needs_review(format!(
                "Format kriteria '{criteria}' untuk {label} tidak valid."
            ))
        }
    };

    if rule.matches(value) {
        CriterionOutcome::passed(format!(
            "Jawaban {answer} untuk {label} memenuhi kriteria {rule}."
        ))
    } else {
        CriterionOutcome::failed(format!(
            "Jawaban {answer} untuk {label} tidak memenuhi syarat {rule}."
        ))
    }
}
