use serde::Serialize;

use super::domain::{Candidate, DetailedCriterionEvaluation};
use super::lookup::lookup;

/// Shown when a candidate has no usable evidence for a criterion.
pub const NO_WORK_HERE: &str = "No work here";
/// Scorer sentinel meaning the CV held nothing for the criterion.
pub const NO_EVIDENCE_IN_CV: &str = "No evidence in CV.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FulfillmentEntry {
    pub criterion: String,
    pub evidence: String,
}

/// Evidence per criterion for one candidate, in the order the criteria were received.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FulfillmentMap {
    pub entries: Vec<FulfillmentEntry>,
}

impl FulfillmentMap {
    pub fn get(&self, criterion: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.criterion == criterion)
            .map(|entry| entry.evidence.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn evidence(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.evidence.as_str())
    }
}

/// Build the evidence map for `candidate` across `criteria`.
///
/// Evidence is the justification of the first detailed entry with the same
/// criterion name, kept only when its score is positive and the text is neither
/// empty nor [`NO_EVIDENCE_IN_CV`]. Everything else maps to [`NO_WORK_HERE`].
pub fn fulfillment(candidate: &Candidate, criteria: &[&str]) -> FulfillmentMap {
    let entries = criteria
        .iter()
        .map(|&criterion| FulfillmentEntry {
            criterion: criterion.to_string(),
            evidence: lookup(
                &candidate.detailed_evaluation,
                |entry| entry.is_for(criterion),
                usable_evidence,
                NO_WORK_HERE.to_string(),
            ),
        })
        .collect();

    FulfillmentMap { entries }
}

fn usable_evidence(entry: &DetailedCriterionEvaluation) -> Option<String> {
    let scored = entry.score.is_some_and(|score| score > 0.0);
    let text = entry.justification.as_deref()?;
    (scored && !text.is_empty() && text != NO_EVIDENCE_IN_CV).then(|| text.to_string())
}
