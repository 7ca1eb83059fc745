//! Evaluation results received from the scoring service and the derived views
//! the report is built from.

pub mod criteria;
pub mod domain;
pub mod fulfillment;
pub mod intake;
mod lookup;
pub mod presenter;
pub mod ranking;
mod tracker;

pub use criteria::{
    normalize_criteria, CategoryWeighting, CriterionCategory, KnownCriterion,
    SubcriterionWeighting, WeightSource,
};
pub use domain::{
    Candidate, CandidateSummary, CriterionWeight, DetailedCriterionEvaluation, EvaluationResult,
    FinalRecommendation, Justification, OtherCandidateReason, RankingEntry, RecommendationTier,
    Scores, StructuredJustification,
};
pub use fulfillment::{fulfillment, FulfillmentEntry, FulfillmentMap, NO_EVIDENCE_IN_CV, NO_WORK_HERE};
pub use intake::{
    parse_evaluation, parse_evaluation_str, EvaluationSource, IntakeError, JsonFileSource,
    StdinSource,
};
pub use lookup::lookup;
pub use ranking::rank_order;
pub use tracker::{AnalysisTicket, AnalysisTracker};
