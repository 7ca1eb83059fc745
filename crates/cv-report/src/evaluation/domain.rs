use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::criteria::{CriterionCategory, KnownCriterion};

/// Evaluation returned by the scoring service for one analysis run.
///
/// Every field is optional on the wire. Missing or `null` values decode to their
/// defaults so that rendering can apply display fallbacks instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvaluationResult {
    #[serde(deserialize_with = "lenient_text")]
    pub tor_text: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub criteria: Vec<CriterionWeight>,
    #[serde(deserialize_with = "null_as_default")]
    pub candidates: Vec<Candidate>,
    #[serde(deserialize_with = "null_as_default")]
    pub comparison_matrix: Vec<RankingEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub final_recommendation: FinalRecommendation,
}

impl EvaluationResult {
    /// Raw criterion labels in received order. Absent names become empty labels.
    pub fn criterion_names(&self) -> Vec<&str> {
        self.criteria
            .iter()
            .map(|entry| entry.criterion.as_deref().unwrap_or_default())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CriterionWeight {
    #[serde(deserialize_with = "lenient_text")]
    pub criterion: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub weight: Option<f64>,
}

impl CriterionWeight {
    pub fn new(criterion: impl Into<String>, weight: f64) -> Self {
        Self {
            criterion: Some(criterion.into()),
            weight: Some(weight),
        }
    }

    /// Exact, case-sensitive name comparison. Empty names never match.
    pub fn is_named(&self, name: &str) -> bool {
        !name.is_empty() && self.criterion.as_deref() == Some(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Candidate {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub recommendation: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub scores: Scores,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: CandidateSummary,
    #[serde(deserialize_with = "null_as_default")]
    pub detailed_evaluation: Vec<DetailedCriterionEvaluation>,
}

impl Candidate {
    pub fn recommendation_tier(&self) -> RecommendationTier {
        RecommendationTier::from_label(self.recommendation.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateSummary {
    #[serde(deserialize_with = "lenient_text")]
    pub key_strengths: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub key_weaknesses: Option<String>,
}

/// Per-category sub-scores plus the overall total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scores {
    #[serde(deserialize_with = "null_as_default")]
    pub general_qualifications: GeneralQualificationScores,
    #[serde(deserialize_with = "null_as_default")]
    pub adequacy_for_assignment: AssignmentAdequacyScores,
    #[serde(
        alias = "specificSkillsCompetencies",
        deserialize_with = "null_as_default"
    )]
    pub specific_skills_and_competencies: SpecificSkillScores,
    #[serde(deserialize_with = "lenient_number")]
    pub total_score: Option<f64>,
}

impl Scores {
    pub fn subtotal(&self, category: CriterionCategory) -> Option<f64> {
        match category {
            CriterionCategory::GeneralQualifications => self.general_qualifications.subtotal,
            CriterionCategory::AdequacyForAssignment => self.adequacy_for_assignment.subtotal,
            CriterionCategory::SpecificSkills => self.specific_skills_and_competencies.subtotal,
        }
    }

    pub fn sub_score(&self, criterion: KnownCriterion) -> Option<f64> {
        let general = &self.general_qualifications;
        let adequacy = &self.adequacy_for_assignment;
        let skills = &self.specific_skills_and_competencies;
        match criterion {
            KnownCriterion::Education => general.education,
            KnownCriterion::YearsOfExperience => general.years_of_experience,
            KnownCriterion::RelevantProjectExperience => adequacy.relevant_project_experience,
            KnownCriterion::DonorExperience => adequacy.donor_experience,
            KnownCriterion::RegionalExperience => adequacy.regional_experience,
            KnownCriterion::TechnicalSkills => skills.technical_skills,
            KnownCriterion::LanguageProficiency => skills.language_proficiency,
            KnownCriterion::Certifications => skills.certifications,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralQualificationScores {
    #[serde(deserialize_with = "lenient_number")]
    pub education: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub years_of_experience: Option<f64>,
    #[serde(alias = "total", deserialize_with = "lenient_number")]
    pub subtotal: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignmentAdequacyScores {
    #[serde(deserialize_with = "lenient_number")]
    pub relevant_project_experience: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub donor_experience: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub regional_experience: Option<f64>,
    #[serde(alias = "total", deserialize_with = "lenient_number")]
    pub subtotal: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecificSkillScores {
    #[serde(deserialize_with = "lenient_number")]
    pub technical_skills: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub language_proficiency: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub certifications: Option<f64>,
    #[serde(alias = "total", deserialize_with = "lenient_number")]
    pub subtotal: Option<f64>,
}

/// Scorer output for one criterion of one candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailedCriterionEvaluation {
    #[serde(deserialize_with = "lenient_text")]
    pub criterion: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub weight: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub score: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub justification: Option<String>,
}

impl DetailedCriterionEvaluation {
    pub fn is_for(&self, name: &str) -> bool {
        !name.is_empty() && self.criterion.as_deref() == Some(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RankingEntry {
    #[serde(deserialize_with = "lenient_text")]
    pub candidate_name: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub total_score: Option<f64>,
    #[serde(deserialize_with = "lenient_rank")]
    pub rank: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinalRecommendation {
    #[serde(deserialize_with = "lenient_text")]
    pub best_candidate: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub final_decision: Option<String>,
    pub justification: Option<Justification>,
}

/// Rationale for the final recommendation, either free text or a structured breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Justification {
    Text(String),
    Structured(StructuredJustification),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredJustification {
    #[serde(deserialize_with = "lenient_text")]
    pub detailed_explanation: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub why_he: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub why_not_others: Vec<OtherCandidateReason>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OtherCandidateReason {
    #[serde(deserialize_with = "lenient_text")]
    pub candidate_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub reason: Option<String>,
}

impl<'de> Deserialize<'de> for Justification {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::String(text) => Ok(Justification::Text(text)),
            Value::Object(_) => StructuredJustification::deserialize(value)
                .map(Justification::Structured)
                .map_err(serde::de::Error::custom),
            other => {
                let coerced = coerce_to_text(&other).unwrap_or_default();
                tracing::warn!(
                    kind = value_kind(&other),
                    "final recommendation justification is not text or an object; rendering as text"
                );
                Ok(Justification::Text(coerced))
            }
        }
    }
}

/// Badge tier derived from a candidate's recommendation label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    HighlySuitable,
    Suitable,
    Other,
}

impl RecommendationTier {
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some("Highly Suitable") => Self::HighlySuitable,
            Some("Suitable") => Self::Suitable,
            _ => Self::Other,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_to_text))
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_to_number))
}

fn lenient_rank<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|value| match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|rank| rank.round() as i64)),
        Value::String(raw) => raw.trim().parse::<i64>().ok(),
        _ => None,
    }))
}

fn coerce_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(coerce_to_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(" "))
            }
        }
        Value::Null | Value::Object(_) => None,
    }
}

fn coerce_to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
