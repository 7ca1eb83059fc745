use super::document::{Block, ListItem, ReportDocument, Section, SectionKind, Table};
use crate::evaluation::criteria::{normalize_criteria, CriterionCategory, TOTAL_WEIGHT};
use crate::evaluation::domain::{
    Candidate, EvaluationResult, FinalRecommendation, Justification, StructuredJustification,
};
use crate::evaluation::fulfillment::fulfillment;
use crate::evaluation::presenter::{
    format_score, format_text, format_weight, NONE, NONE_PROVIDED, NOT_AVAILABLE, NOT_EVALUATED,
    UNNAMED_CANDIDATE,
};
use crate::evaluation::ranking::rank_order;

pub const REPORT_TITLE: &str = "CV Evaluation Report";
pub const SCORE_DISCLAIMER: &str = "This score is approximate and can fluctuate by plus or minus 5";
pub const NO_OTHER_CANDIDATES: &str = "No other candidates evaluated.";

pub const RANKING_COLUMNS: [&str; 3] = ["Candidate Name", "Total Score", "Rank"];
pub const CANDIDATE_NAME_COLUMN: &str = "Candidate Name";

/// Build the report tree for `result`.
///
/// Section order is fixed: terms of reference, evaluation criteria, candidates,
/// ranking, final recommendation, CV comparison. Candidates keep their received
/// order everywhere except the ranking table.
pub fn assemble(result: &EvaluationResult) -> ReportDocument {
    let sections = vec![
        terms_of_reference(result.tor_text.as_deref()),
        evaluation_criteria(result),
        candidates(&result.candidates),
        ranking(result),
        final_recommendation(&result.final_recommendation),
        cv_comparison(result),
    ];

    tracing::debug!(
        candidates = result.candidates.len(),
        criteria = result.criteria.len(),
        ranked = result.comparison_matrix.len(),
        "assembled evaluation report"
    );

    ReportDocument {
        title: REPORT_TITLE.to_string(),
        sections,
    }
}

fn terms_of_reference(tor_text: Option<&str>) -> Section {
    let mut section = Section::new(SectionKind::TermsOfReference, "Terms of Reference");
    let paragraphs: Vec<&str> = tor_text
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if paragraphs.is_empty() {
        section.blocks.push(Block::paragraph(NONE_PROVIDED));
    } else {
        section
            .blocks
            .extend(paragraphs.into_iter().map(Block::paragraph));
    }
    section
}

fn evaluation_criteria(result: &EvaluationResult) -> Section {
    let mut items: Vec<ListItem> = normalize_criteria(&result.criteria)
        .into_iter()
        .map(|category| {
            let children = category
                .subitems
                .iter()
                .map(|item| ListItem::leaf(weighted_label(item.name, item.weight)))
                .collect();
            ListItem::nested(weighted_label(category.label, category.weight), children)
        })
        .collect();
    items.push(ListItem::leaf(weighted_label("Total Score", TOTAL_WEIGHT)));

    Section::new(SectionKind::EvaluationCriteria, "Evaluation Criteria")
        .with(Block::List { items })
}

fn weighted_label(label: &str, weight: f64) -> String {
    format!("{label} – {}", format_weight(Some(weight)))
}

fn candidates(candidates: &[Candidate]) -> Section {
    let mut section = Section::new(SectionKind::Candidates, "Candidates");
    if candidates.is_empty() {
        section.blocks.push(Block::note("No candidates evaluated."));
    }
    section.blocks.extend(
        candidates
            .iter()
            .map(|candidate| Block::Section(candidate_section(candidate))),
    );
    section
}

fn candidate_section(candidate: &Candidate) -> Section {
    let summary = &candidate.summary;
    let scores = &candidate.scores;

    Section::new(
        SectionKind::Candidate,
        format_text(candidate.name.as_deref(), UNNAMED_CANDIDATE),
    )
    .with(Block::Badge {
        text: format_text(candidate.recommendation.as_deref(), NOT_EVALUATED),
        tier: candidate.recommendation_tier(),
    })
    .with(Block::field(
        "Total Score",
        format_score(scores.total_score, NOT_AVAILABLE),
    ))
    .with(Block::note(SCORE_DISCLAIMER))
    .with(Block::field(
        "Key Strengths",
        format_text(summary.key_strengths.as_deref(), NONE_PROVIDED),
    ))
    .with(Block::field(
        "Key Weaknesses",
        format_text(summary.key_weaknesses.as_deref(), NONE_PROVIDED),
    ))
    .with(Block::Section(score_breakdown(candidate)))
    .with(Block::Section(detailed_evaluation(candidate)))
}

fn score_breakdown(candidate: &Candidate) -> Section {
    let scores = &candidate.scores;
    let items = CriterionCategory::ordered()
        .into_iter()
        .map(|category| {
            let children = category
                .subcriteria()
                .iter()
                .map(|&criterion| {
                    ListItem::leaf(format!(
                        "{}: {}",
                        criterion.label(),
                        format_score(scores.sub_score(criterion), NOT_AVAILABLE)
                    ))
                })
                .collect();
            ListItem::nested(
                format!(
                    "{}: {}",
                    category.label(),
                    format_score(scores.subtotal(category), NOT_AVAILABLE)
                ),
                children,
            )
        })
        .collect();

    Section::new(SectionKind::ScoreBreakdown, "Score Breakdown").with(Block::List { items })
}

fn detailed_evaluation(candidate: &Candidate) -> Section {
    let section = Section::new(SectionKind::DetailedEvaluation, "Detailed Evaluation");
    if candidate.detailed_evaluation.is_empty() {
        return section.with(Block::note("No detailed evaluation provided."));
    }

    let items = candidate
        .detailed_evaluation
        .iter()
        .map(|entry| {
            ListItem::nested(
                format_text(entry.criterion.as_deref(), NOT_EVALUATED),
                vec![
                    ListItem::leaf(format!("Weight: {}", format_weight(entry.weight))),
                    ListItem::leaf(format!(
                        "Score: {}",
                        format_score(entry.score, NOT_AVAILABLE)
                    )),
                    ListItem::leaf(format!(
                        "Justification: {}",
                        format_text(entry.justification.as_deref(), NONE_PROVIDED)
                    )),
                ],
            )
        })
        .collect();

    section.with(Block::List { items })
}

fn ranking(result: &EvaluationResult) -> Section {
    let rows = rank_order(&result.comparison_matrix)
        .into_iter()
        .map(|entry| {
            vec![
                format_text(entry.candidate_name.as_deref(), UNNAMED_CANDIDATE),
                format_score(entry.total_score, NOT_AVAILABLE),
                entry
                    .rank
                    .map(|rank| rank.to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            ]
        })
        .collect();

    Section::new(SectionKind::Ranking, "Comparison Ranking").with(Block::Table(Table {
        columns: RANKING_COLUMNS.iter().map(|column| column.to_string()).collect(),
        rows,
    }))
}

fn final_recommendation(recommendation: &FinalRecommendation) -> Section {
    let mut section = Section::new(SectionKind::FinalRecommendation, "Final Recommendation")
        .with(Block::field(
            "Best Candidate",
            format_text(recommendation.best_candidate.as_deref(), NONE),
        ))
        .with(Block::field(
            "Final Decision",
            format_text(recommendation.final_decision.as_deref(), NONE),
        ));

    match &recommendation.justification {
        Some(Justification::Structured(detail)) => {
            section
                .blocks
                .extend(structured_justification(detail).into_iter().map(Block::Section));
        }
        Some(Justification::Text(text)) => {
            section
                .blocks
                .push(Block::Section(text_justification(Some(text.as_str()))));
        }
        None => {
            section.blocks.push(Block::Section(text_justification(None)));
        }
    }
    section
}

fn text_justification(text: Option<&str>) -> Section {
    Section::new(SectionKind::Justification, "Justification")
        .with(Block::paragraph(format_text(text, NONE_PROVIDED)))
}

fn structured_justification(detail: &StructuredJustification) -> [Section; 3] {
    let explanation = Section::new(SectionKind::DetailedExplanation, "Detailed Explanation").with(
        Block::paragraph(format_text(
            detail.detailed_explanation.as_deref(),
            NONE_PROVIDED,
        )),
    );

    let why_recommended = Section::new(SectionKind::WhyRecommended, "Why Recommended Candidate")
        .with(Block::paragraph(format_text(
            detail.why_he.as_deref(),
            NONE_PROVIDED,
        )));

    let mut why_not_others = Section::new(SectionKind::WhyNotOthers, "Why Not Others");
    if detail.why_not_others.is_empty() {
        why_not_others.blocks.push(Block::note(NO_OTHER_CANDIDATES));
    } else {
        why_not_others
            .blocks
            .extend(detail.why_not_others.iter().map(|other| {
                Block::field(
                    format_text(other.candidate_name.as_deref(), UNNAMED_CANDIDATE),
                    format_text(other.reason.as_deref(), NONE_PROVIDED),
                )
            }));
    }

    [explanation, why_recommended, why_not_others]
}

fn cv_comparison(result: &EvaluationResult) -> Section {
    let criteria = result.criterion_names();
    let mut columns = Vec::with_capacity(criteria.len() + 1);
    columns.push(CANDIDATE_NAME_COLUMN.to_string());
    columns.extend(criteria.iter().map(|name| name.to_string()));

    let rows = result
        .candidates
        .iter()
        .map(|candidate| {
            let mut row = Vec::with_capacity(columns.len());
            row.push(format_text(candidate.name.as_deref(), UNNAMED_CANDIDATE));
            row.extend(
                fulfillment(candidate, &criteria)
                    .evidence()
                    .map(str::to_string),
            );
            row
        })
        .collect();

    Section::new(SectionKind::CvComparison, "CV Comparison Table")
        .with(Block::Table(Table { columns, rows }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::domain::{
        CriterionWeight, DetailedCriterionEvaluation, OtherCandidateReason, RankingEntry, Scores,
    };
    use crate::evaluation::{RecommendationTier, NO_WORK_HERE};

    fn evaluation(justification: Option<Justification>) -> EvaluationResult {
        EvaluationResult {
            tor_text: Some("Senior evaluator\n\nField missions in the Sahel".to_string()),
            criteria: vec![CriterionWeight::new("Education", 12.0)],
            candidates: vec![Candidate {
                name: Some("Ana".to_string()),
                recommendation: Some("Highly Suitable".to_string()),
                scores: Scores {
                    total_score: Some(75.0),
                    ..Scores::default()
                },
                detailed_evaluation: vec![DetailedCriterionEvaluation {
                    criterion: Some("Education".to_string()),
                    weight: Some(12.0),
                    score: Some(8.0),
                    justification: Some("Has MSc".to_string()),
                }],
                ..Candidate::default()
            }],
            comparison_matrix: vec![RankingEntry {
                candidate_name: Some("Ana".to_string()),
                total_score: Some(75.0),
                rank: Some(1),
            }],
            final_recommendation: FinalRecommendation {
                best_candidate: Some("Ana".to_string()),
                final_decision: Some("Recruit".to_string()),
                justification,
            },
        }
    }

    fn kinds(document: &ReportDocument) -> Vec<SectionKind> {
        document.sections.iter().map(|section| section.kind).collect()
    }

    #[test]
    fn sections_follow_fixed_order() {
        let document = assemble(&evaluation(None));
        assert_eq!(document.title, REPORT_TITLE);
        assert_eq!(
            kinds(&document),
            vec![
                SectionKind::TermsOfReference,
                SectionKind::EvaluationCriteria,
                SectionKind::Candidates,
                SectionKind::Ranking,
                SectionKind::FinalRecommendation,
                SectionKind::CvComparison,
            ]
        );
    }

    #[test]
    fn terms_of_reference_split_into_paragraphs() {
        let document = assemble(&evaluation(None));
        let tor = document
            .section(SectionKind::TermsOfReference)
            .expect("tor section");
        assert_eq!(
            tor.blocks,
            vec![
                Block::paragraph("Senior evaluator"),
                Block::paragraph("Field missions in the Sahel"),
            ]
        );
    }

    #[test]
    fn criteria_section_lists_rubric_and_total() {
        let document = assemble(&evaluation(None));
        let criteria = document
            .section(SectionKind::EvaluationCriteria)
            .expect("criteria section");
        let Block::List { items } = &criteria.blocks[0] else {
            panic!("criteria should render as a list");
        };

        assert_eq!(items.len(), 4);
        assert_eq!(items[0].text, "General Qualifications – 20%");
        assert_eq!(items[0].children[0].text, "Education – 12%");
        assert_eq!(items[0].children[1].text, "Years of Experience – 10%");
        assert_eq!(items[3].text, "Total Score – 100%");
        assert!(items[3].children.is_empty());
    }

    #[test]
    fn candidate_section_carries_disclaimer_and_fallbacks() {
        let document = assemble(&evaluation(None));
        let candidates = document
            .section(SectionKind::Candidates)
            .expect("candidates section");
        let ana = candidates
            .subsection(SectionKind::Candidate)
            .expect("candidate section");

        assert_eq!(ana.heading, "Ana");
        assert!(ana
            .blocks
            .contains(&Block::field("Total Score", "75.00")));
        assert!(ana.blocks.contains(&Block::note(SCORE_DISCLAIMER)));
        assert!(ana
            .blocks
            .contains(&Block::field("Key Strengths", NONE_PROVIDED)));

        let breakdown = ana
            .subsection(SectionKind::ScoreBreakdown)
            .expect("breakdown");
        let Block::List { items } = &breakdown.blocks[0] else {
            panic!("breakdown should render as a list");
        };
        assert_eq!(items[0].text, "General Qualifications: N/A");
        assert_eq!(items[0].children[0].text, "Education: N/A");
    }

    #[test]
    fn candidate_blocks_keep_fixed_order_with_detailed_evaluation() {
        let mut result = evaluation(None);
        result.candidates[0].detailed_evaluation.push(DetailedCriterionEvaluation::default());
        let document = assemble(&result);
        let ana = document
            .section(SectionKind::Candidates)
            .and_then(|section| section.subsection(SectionKind::Candidate))
            .expect("candidate section");

        assert_eq!(
            &ana.blocks[..5],
            &[
                Block::Badge {
                    text: "Highly Suitable".to_string(),
                    tier: RecommendationTier::HighlySuitable,
                },
                Block::field("Total Score", "75.00"),
                Block::note(SCORE_DISCLAIMER),
                Block::field("Key Strengths", NONE_PROVIDED),
                Block::field("Key Weaknesses", NONE_PROVIDED),
            ]
        );
        assert_eq!(ana.blocks.len(), 7);
        assert!(matches!(
            &ana.blocks[5],
            Block::Section(section) if section.kind == SectionKind::ScoreBreakdown
        ));

        let expected = Section::new(SectionKind::DetailedEvaluation, "Detailed Evaluation").with(
            Block::List {
                items: vec![
                    ListItem::nested(
                        "Education",
                        vec![
                            ListItem::leaf("Weight: 12%"),
                            ListItem::leaf("Score: 8.00"),
                            ListItem::leaf("Justification: Has MSc"),
                        ],
                    ),
                    ListItem::nested(
                        NOT_EVALUATED,
                        vec![
                            ListItem::leaf("Weight: N/A"),
                            ListItem::leaf("Score: N/A"),
                            ListItem::leaf("Justification: None provided."),
                        ],
                    ),
                ],
            },
        );
        assert_eq!(ana.blocks[6], Block::Section(expected));
    }

    #[test]
    fn candidate_without_detailed_entries_shows_note() {
        let mut result = evaluation(None);
        result.candidates[0].detailed_evaluation.clear();
        let document = assemble(&result);
        let detailed = document
            .section(SectionKind::Candidates)
            .and_then(|section| section.subsection(SectionKind::Candidate))
            .and_then(|candidate| candidate.subsection(SectionKind::DetailedEvaluation))
            .expect("detailed evaluation section");

        assert_eq!(
            detailed.blocks,
            vec![Block::note("No detailed evaluation provided.")]
        );
    }

    #[test]
    fn string_justification_renders_single_block() {
        let document = assemble(&evaluation(Some(Justification::Text(
            "Candidate A is strongest.".to_string(),
        ))));
        let recommendation = document
            .section(SectionKind::FinalRecommendation)
            .expect("recommendation section");

        let subsections: Vec<&Section> = recommendation.subsections().collect();
        assert_eq!(subsections.len(), 1);
        assert_eq!(subsections[0].kind, SectionKind::Justification);
        assert_eq!(
            subsections[0].blocks,
            vec![Block::paragraph("Candidate A is strongest.")]
        );
    }

    #[test]
    fn structured_justification_with_no_others_shows_empty_state() {
        let document = assemble(&evaluation(Some(Justification::Structured(
            StructuredJustification {
                detailed_explanation: Some("Deep donor experience".to_string()),
                why_he: None,
                why_not_others: Vec::new(),
            },
        ))));
        let recommendation = document
            .section(SectionKind::FinalRecommendation)
            .expect("recommendation section");

        let kinds: Vec<SectionKind> = recommendation.subsections().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::DetailedExplanation,
                SectionKind::WhyRecommended,
                SectionKind::WhyNotOthers,
            ]
        );

        let why_he = recommendation
            .subsection(SectionKind::WhyRecommended)
            .expect("why recommended");
        assert_eq!(why_he.blocks, vec![Block::paragraph(NONE_PROVIDED)]);

        let others = recommendation
            .subsection(SectionKind::WhyNotOthers)
            .expect("why not others");
        assert_eq!(others.blocks, vec![Block::note(NO_OTHER_CANDIDATES)]);
    }

    #[test]
    fn structured_justification_lists_other_candidates() {
        let document = assemble(&evaluation(Some(Justification::Structured(
            StructuredJustification {
                detailed_explanation: None,
                why_he: Some("Led similar reviews".to_string()),
                why_not_others: vec![
                    OtherCandidateReason {
                        candidate_name: Some("Ben".to_string()),
                        reason: Some("No donor work".to_string()),
                    },
                    OtherCandidateReason::default(),
                ],
            },
        ))));
        let others = document
            .section(SectionKind::FinalRecommendation)
            .and_then(|section| section.subsection(SectionKind::WhyNotOthers))
            .expect("why not others");

        assert_eq!(
            others.blocks,
            vec![
                Block::field("Ben", "No donor work"),
                Block::field(UNNAMED_CANDIDATE, NONE_PROVIDED),
            ]
        );
    }

    #[test]
    fn comparison_table_uses_raw_criteria_and_fulfillment() {
        let mut result = evaluation(None);
        result.criteria.push(CriterionWeight::new("Leadership", 5.0));
        let document = assemble(&result);

        let comparison = document
            .section(SectionKind::CvComparison)
            .expect("comparison section");
        let Block::Table(table) = &comparison.blocks[0] else {
            panic!("comparison should render as a table");
        };

        assert_eq!(table.columns, vec!["Candidate Name", "Education", "Leadership"]);
        assert_eq!(table.rows, vec![vec!["Ana", "Has MSc", NO_WORK_HERE]]);
    }

    #[test]
    fn empty_evaluation_still_renders_every_section() {
        let document = assemble(&EvaluationResult::default());
        assert_eq!(document.sections.len(), 6);

        let comparison = document
            .section(SectionKind::CvComparison)
            .expect("comparison section");
        let Block::Table(table) = &comparison.blocks[0] else {
            panic!("comparison should render as a table");
        };
        assert_eq!(table.columns, vec!["Candidate Name"]);
        assert!(table.rows.is_empty());

        let recommendation = document
            .section(SectionKind::FinalRecommendation)
            .expect("recommendation");
        assert!(recommendation.blocks.contains(&Block::field("Best Candidate", NONE)));
        assert_eq!(
            recommendation
                .subsection(SectionKind::Justification)
                .map(|section| section.blocks.clone()),
            Some(vec![Block::paragraph(NONE_PROVIDED)])
        );
    }
}
