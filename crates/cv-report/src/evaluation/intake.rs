use std::fmt::Debug;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::domain::EvaluationResult;

/// Failure to obtain a decodable evaluation from the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("failed to read evaluation: {0}")]
    Io(#[from] std::io::Error),
    #[error("evaluation is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("evaluation body must be a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("evaluation service reported an error: {0}")]
    Service(String),
}

/// Supplies one evaluation per accepted submission.
pub trait EvaluationSource: Debug {
    fn fetch(&self) -> Result<EvaluationResult, IntakeError>;
}

/// Reads an evaluation previously saved as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl EvaluationSource for JsonFileSource {
    fn fetch(&self) -> Result<EvaluationResult, IntakeError> {
        let file = std::fs::File::open(&self.path)?;
        parse_evaluation(std::io::BufReader::new(file))
    }
}

/// Reads a single evaluation body from standard input.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinSource;

impl EvaluationSource for StdinSource {
    fn fetch(&self) -> Result<EvaluationResult, IntakeError> {
        parse_evaluation(std::io::stdin().lock())
    }
}

pub fn parse_evaluation<R: Read>(reader: R) -> Result<EvaluationResult, IntakeError> {
    let value: Value = serde_json::from_reader(reader)?;
    parse_evaluation_value(value)
}

pub fn parse_evaluation_str(raw: &str) -> Result<EvaluationResult, IntakeError> {
    let value: Value = serde_json::from_str(raw)?;
    parse_evaluation_value(value)
}

/// Decode an already-parsed response body.
///
/// A body shaped like `{"error": "..."}` with no evaluation fields is the
/// service's failure envelope and surfaces as [`IntakeError::Service`].
pub fn parse_evaluation_value(value: Value) -> Result<EvaluationResult, IntakeError> {
    let object = match &value {
        Value::Object(object) => object,
        Value::Null => return Err(IntakeError::NotAnObject("null")),
        Value::Array(_) => return Err(IntakeError::NotAnObject("an array")),
        Value::String(_) => return Err(IntakeError::NotAnObject("a string")),
        Value::Number(_) => return Err(IntakeError::NotAnObject("a number")),
        Value::Bool(_) => return Err(IntakeError::NotAnObject("a boolean")),
    };

    let has_evaluation = ["candidates", "criteria", "comparisonMatrix", "finalRecommendation"]
        .iter()
        .any(|key| object.contains_key(*key));
    if !has_evaluation {
        if let Some(message) = object.get("error").and_then(Value::as_str) {
            return Err(IntakeError::Service(message.to_string()));
        }
    }

    let result: EvaluationResult = serde_json::from_value(value)?;
    tracing::debug!(
        candidates = result.candidates.len(),
        criteria = result.criteria.len(),
        "decoded evaluation result"
    );
    Ok(result)
}
