use serde::Serialize;

use crate::evaluation::RecommendationTier;

/// Ordered, renderer-independent tree describing a full evaluation report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub sections: Vec<Section>,
}

impl ReportDocument {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind == kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    TermsOfReference,
    EvaluationCriteria,
    Candidates,
    Candidate,
    ScoreBreakdown,
    DetailedEvaluation,
    Ranking,
    FinalRecommendation,
    Justification,
    DetailedExplanation,
    WhyRecommended,
    WhyNotOthers,
    CvComparison,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub heading: String,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new(kind: SectionKind, heading: impl Into<String>) -> Self {
        Self {
            kind,
            heading: heading.into(),
            blocks: Vec::new(),
        }
    }

    pub fn with(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn subsections(&self) -> impl Iterator<Item = &Section> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Section(section) => Some(section),
            _ => None,
        })
    }

    pub fn subsection(&self, kind: SectionKind) -> Option<&Section> {
        self.subsections().find(|section| section.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph { text: String },
    Field { label: String, value: String },
    Badge { text: String, tier: RecommendationTier },
    Note { text: String },
    List { items: Vec<ListItem> },
    Table(Table),
    Section(Section),
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph { text: text.into() }
    }

    pub fn field(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Field {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn note(text: impl Into<String>) -> Self {
        Self::Note { text: text.into() }
    }
}

/// Borrowed view of a [`Block::Badge`] handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationBadge<'a> {
    pub text: &'a str,
    pub tier: RecommendationTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ListItem>,
}

impl ListItem {
    pub fn leaf(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            children: Vec::new(),
        }
    }

    pub fn nested(text: impl Into<String>, children: Vec<ListItem>) -> Self {
        Self {
            text: text.into(),
            children,
        }
    }
}

/// Grid with one header row and one row per data item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
