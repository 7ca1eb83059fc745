use crate::infra::bootstrap;
use crate::report::write_artifact;
use chrono::{Local, NaiveDate};
use clap::Args;
use cv_report::error::AppError;
use cv_report::evaluation::{
    Candidate, CandidateSummary, CriterionWeight, DetailedCriterionEvaluation, EvaluationResult,
    FinalRecommendation, Justification, OtherCandidateReason, RankingEntry, Scores,
    StructuredJustification,
};
use cv_report::evaluation::domain::{
    AssignmentAdequacyScores, GeneralQualificationScores, SpecificSkillScores,
};
use cv_report::report::{export_report, ExportFormat};
use std::path::Path;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Export format for the sample report (defaults to markdown)
    #[arg(long, value_parser = crate::infra::parse_format)]
    pub(crate) format: Option<ExportFormat>,
    /// Generation date stamped into the report (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = bootstrap()?;
    let format = args.format.unwrap_or(ExportFormat::Markdown);
    let generated_on = args.date.unwrap_or_else(|| Local::now().date_naive());

    let artifact = export_report(&demo_evaluation(), format, generated_on)?;
    write_artifact(&artifact, Some(Path::new("-")), &config.export)
}

/// Three-candidate monitoring and evaluation shortlist with a structured
/// final justification. One candidate carries gaps to exercise fallbacks.
pub(crate) fn demo_evaluation() -> EvaluationResult {
    let criteria = [
        ("Education", 10.0),
        ("Years of Experience", 10.0),
        ("Relevant Project Experience", 25.0),
        ("Donor Experience", 15.0),
        ("Regional Experience", 10.0),
        ("Technical Skills", 15.0),
        ("Language Proficiency", 10.0),
        ("Certifications", 5.0),
    ]
    .into_iter()
    .map(|(name, weight)| CriterionWeight::new(name, weight))
    .collect();

    EvaluationResult {
        tor_text: Some(
            "Monitoring and Evaluation Lead for a three-year food security programme.\n\
             Requires donor reporting experience and fluency in French."
                .to_string(),
        ),
        criteria,
        candidates: vec![
            demo_candidate(
                "Amara Diallo",
                "Highly Suitable",
                [9.0, 8.5, 23.0, 13.0, 9.0, 13.5, 10.0, 4.0],
                "Led M&E for two EU-funded programmes in the Sahel.",
                "Limited exposure to mobile data collection tools.",
            ),
            demo_candidate(
                "Jonas Berg",
                "Suitable",
                [8.0, 7.0, 18.0, 10.0, 4.0, 12.0, 6.0, 5.0],
                "Strong statistical background and survey design.",
                "No field experience in West Africa.",
            ),
            Candidate {
                name: Some("Lucia Fernández".to_string()),
                recommendation: Some("Not Suitable".to_string()),
                scores: Scores {
                    total_score: Some(41.0),
                    ..Scores::default()
                },
                summary: CandidateSummary {
                    key_strengths: Some("Fluent in French and Spanish.".to_string()),
                    key_weaknesses: None,
                },
                detailed_evaluation: vec![DetailedCriterionEvaluation {
                    criterion: Some("Donor Experience".to_string()),
                    weight: Some(15.0),
                    score: Some(0.0),
                    justification: Some("No evidence in CV.".to_string()),
                }],
            },
        ],
        comparison_matrix: vec![
            ranking_entry("Jonas Berg", 70.0, 2),
            ranking_entry("Lucia Fernández", 41.0, 3),
            ranking_entry("Amara Diallo", 90.0, 1),
        ],
        final_recommendation: FinalRecommendation {
            best_candidate: Some("Amara Diallo".to_string()),
            final_decision: Some("Proceed to interview".to_string()),
            justification: Some(Justification::Structured(StructuredJustification {
                detailed_explanation: Some(
                    "Highest weighted score with direct donor reporting experience.".to_string(),
                ),
                why_he: Some("Has delivered the same role in the target region.".to_string()),
                why_not_others: vec![
                    OtherCandidateReason {
                        candidate_name: Some("Jonas Berg".to_string()),
                        reason: Some("Lacks regional experience.".to_string()),
                    },
                    OtherCandidateReason {
                        candidate_name: Some("Lucia Fernández".to_string()),
                        reason: Some("No donor-funded project history.".to_string()),
                    },
                ],
            })),
        },
    }
}

fn demo_candidate(
    name: &str,
    recommendation: &str,
    sub_scores: [f64; 8],
    strengths: &str,
    weaknesses: &str,
) -> Candidate {
    let [education, years, projects, donor, regional, technical, language, certifications] =
        sub_scores;
    let total: f64 = sub_scores.iter().sum();

    let detailed_evaluation = [
        ("Education", 10.0, education, "Master's degree in development economics."),
        ("Relevant Project Experience", 25.0, projects, "Managed programme-wide results frameworks."),
        ("Regional Experience", 10.0, regional, "Field postings in the target region."),
    ]
    .into_iter()
    .map(|(criterion, weight, score, justification)| DetailedCriterionEvaluation {
        criterion: Some(criterion.to_string()),
        weight: Some(weight),
        score: Some(score),
        justification: Some(justification.to_string()),
    })
    .collect();

    Candidate {
        name: Some(name.to_string()),
        recommendation: Some(recommendation.to_string()),
        scores: Scores {
            general_qualifications: GeneralQualificationScores {
                education: Some(education),
                years_of_experience: Some(years),
                subtotal: Some(education + years),
            },
            adequacy_for_assignment: AssignmentAdequacyScores {
                relevant_project_experience: Some(projects),
                donor_experience: Some(donor),
                regional_experience: Some(regional),
                subtotal: Some(projects + donor + regional),
            },
            specific_skills_and_competencies: SpecificSkillScores {
                technical_skills: Some(technical),
                language_proficiency: Some(language),
                certifications: Some(certifications),
                subtotal: Some(technical + language + certifications),
            },
            total_score: Some(total),
        },
        summary: CandidateSummary {
            key_strengths: Some(strengths.to_string()),
            key_weaknesses: Some(weaknesses.to_string()),
        },
        detailed_evaluation,
    }
}

fn ranking_entry(name: &str, total_score: f64, rank: i64) -> RankingEntry {
    RankingEntry {
        candidate_name: Some(name.to_string()),
        total_score: Some(total_score),
        rank: Some(rank),
    }
}
