use clap::Args;
use rekrut::config::AppConfig;
use rekrut::error::AppError;
use rekrut::screening::{AnswerMap, CriterionDefinition, ScreeningEngine, ScreeningVerdict};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScreenArgs {
    /// JSON file holding the job's criteria array
    #[arg(long)]
    pub(crate) criteria: PathBuf,
    /// JSON file holding the applicant's answers object
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// AI fit score to gate on before the answer rules
    #[arg(long)]
    pub(crate) ai_score: Option<f64>,
}

/// Criteria, answers and optional AI score screened in one shot.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ScreeningRequest {
    pub(crate) criteria: Vec<CriterionDefinition>,
    #[serde(default)]
    pub(crate) answers: Option<Value>,
    #[serde(default)]
    pub(crate) ai_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ScreeningReport {
    pub(crate) processed_answers: Option<Value>,
    pub(crate) screening_result: ScreeningVerdict,
}

pub(crate) fn screen_request(engine: &ScreeningEngine, request: ScreeningRequest) -> ScreeningReport {
    let answers = request.answers.as_ref().and_then(AnswerMap::from_json);
    let screening = engine.screen(&request.criteria, answers.as_ref(), request.ai_score);
    ScreeningReport {
        processed_answers: screening.processed.map(|processed| processed.to_json()),
        screening_result: screening.verdict,
    }
}

pub(crate) fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let ScreenArgs {
        criteria,
        answers,
        ai_score,
    } = args;

    let config = AppConfig::load()?;
    let engine = ScreeningEngine::new(config.screening);

    let request = ScreeningRequest {
        criteria: serde_json::from_value(read_json(&criteria)?)?,
        answers: Some(read_json(&answers)?),
        ai_score,
    };
    let report = screen_request(&engine, request);

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn read_json(path: &Path) -> Result<Value, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
