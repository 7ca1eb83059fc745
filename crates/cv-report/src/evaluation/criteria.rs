use serde::Serialize;

use super::domain::CriterionWeight;
use super::lookup::lookup;

/// Weight shown for the synthetic grand-total row of the criteria hierarchy.
pub const TOTAL_WEIGHT: f64 = 100.0;

/// Fixed top-level grouping of the evaluation rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionCategory {
    GeneralQualifications,
    AdequacyForAssignment,
    SpecificSkills,
}

impl CriterionCategory {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::GeneralQualifications,
            Self::AdequacyForAssignment,
            Self::SpecificSkills,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::GeneralQualifications => "General Qualifications",
            Self::AdequacyForAssignment => "Adequacy for Assignment",
            Self::SpecificSkills => "Specific Skills & Competencies",
        }
    }

    pub const fn weight(self) -> f64 {
        match self {
            Self::GeneralQualifications => 20.0,
            Self::AdequacyForAssignment => 50.0,
            Self::SpecificSkills => 30.0,
        }
    }

    pub const fn subcriteria(self) -> &'static [KnownCriterion] {
        match self {
            Self::GeneralQualifications => &[
                KnownCriterion::Education,
                KnownCriterion::YearsOfExperience,
            ],
            Self::AdequacyForAssignment => &[
                KnownCriterion::RelevantProjectExperience,
                KnownCriterion::DonorExperience,
                KnownCriterion::RegionalExperience,
            ],
            Self::SpecificSkills => &[
                KnownCriterion::TechnicalSkills,
                KnownCriterion::LanguageProficiency,
                KnownCriterion::Certifications,
            ],
        }
    }
}

/// The eight rubric rows with a documented default weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KnownCriterion {
    Education,
    YearsOfExperience,
    RelevantProjectExperience,
    DonorExperience,
    RegionalExperience,
    TechnicalSkills,
    LanguageProficiency,
    Certifications,
}

impl KnownCriterion {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Education => "Education",
            Self::YearsOfExperience => "Years of Experience",
            Self::RelevantProjectExperience => "Relevant Project Experience",
            Self::DonorExperience => "Donor Experience",
            Self::RegionalExperience => "Regional Experience",
            Self::TechnicalSkills => "Technical Skills",
            Self::LanguageProficiency => "Language Proficiency",
            Self::Certifications => "Certifications",
        }
    }

    pub const fn default_weight(self) -> f64 {
        match self {
            Self::Education => 10.0,
            Self::YearsOfExperience => 10.0,
            Self::RelevantProjectExperience => 25.0,
            Self::DonorExperience => 15.0,
            Self::RegionalExperience => 10.0,
            Self::TechnicalSkills => 15.0,
            Self::LanguageProficiency => 10.0,
            Self::Certifications => 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    Received,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubcriterionWeighting {
    pub criterion: KnownCriterion,
    pub name: &'static str,
    pub weight: f64,
    pub source: WeightSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryWeighting {
    pub category: CriterionCategory,
    pub label: &'static str,
    pub weight: f64,
    pub subitems: Vec<SubcriterionWeighting>,
}

/// Project the received criteria onto the fixed three-category rubric.
///
/// Always yields three categories holding 2, 3 and 3 rows. Received criteria
/// outside the rubric are ignored here; a rubric row without a received
/// weight keeps its default.
pub fn normalize_criteria(criteria: &[CriterionWeight]) -> Vec<CategoryWeighting> {
    CriterionCategory::ordered()
        .into_iter()
        .map(|category| CategoryWeighting {
            category,
            label: category.label(),
            weight: category.weight(),
            subitems: category
                .subcriteria()
                .iter()
                .map(|&criterion| weigh(criterion, criteria))
                .collect(),
        })
        .collect()
}

fn weigh(criterion: KnownCriterion, criteria: &[CriterionWeight]) -> SubcriterionWeighting {
    let (weight, source) = lookup(
        criteria,
        |entry| entry.is_named(criterion.label()),
        |entry| entry.weight.map(|weight| (weight, WeightSource::Received)),
        (criterion.default_weight(), WeightSource::Default),
    );

    SubcriterionWeighting {
        criterion,
        name: criterion.label(),
        weight,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_criteria_yield_full_default_rubric() {
        let hierarchy = normalize_criteria(&[]);

        let shape: Vec<usize> = hierarchy.iter().map(|entry| entry.subitems.len()).collect();
        assert_eq!(shape, vec![2, 3, 3]);
        assert!(hierarchy
            .iter()
            .flat_map(|entry| &entry.subitems)
            .all(|item| item.source == WeightSource::Default));

        let defaults: f64 = hierarchy
            .iter()
            .flat_map(|entry| &entry.subitems)
            .map(|item| item.weight)
            .sum();
        assert_eq!(defaults, TOTAL_WEIGHT);
    }

    #[test]
    fn received_weight_overrides_default() {
        let hierarchy = normalize_criteria(&[CriterionWeight::new("Education", 12.0)]);

        let general = &hierarchy[0];
        assert_eq!(general.label, "General Qualifications");
        assert_eq!(general.weight, 20.0);
        assert_eq!(general.subitems[0].name, "Education");
        assert_eq!(general.subitems[0].weight, 12.0);
        assert_eq!(general.subitems[0].source, WeightSource::Received);
        assert_eq!(general.subitems[1].name, "Years of Experience");
        assert_eq!(general.subitems[1].weight, 10.0);
    }

    #[test]
    fn unknown_and_case_mismatched_criteria_are_ignored() {
        let hierarchy = normalize_criteria(&[
            CriterionWeight::new("Leadership", 40.0),
            CriterionWeight::new("education", 3.0),
        ]);

        assert_eq!(hierarchy.len(), 3);
        assert_eq!(hierarchy[0].subitems[0].weight, 10.0);
        assert!(hierarchy
            .iter()
            .flat_map(|entry| &entry.subitems)
            .all(|item| item.name != "Leadership"));
    }

    #[test]
    fn matched_criterion_without_weight_keeps_default() {
        let hierarchy = normalize_criteria(&[CriterionWeight {
            criterion: Some("Donor Experience".to_string()),
            weight: None,
        }]);

        let donor = &hierarchy[1].subitems[1];
        assert_eq!(donor.name, "Donor Experience");
        assert_eq!(donor.weight, 15.0);
        assert_eq!(donor.source, WeightSource::Default);
    }
}
