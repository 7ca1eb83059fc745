use std::collections::HashSet;

use serde::Serialize;

use super::ReportVisitor;
use crate::evaluation::RecommendationTier;
use crate::report::document::{ListItem, RecommendationBadge, Section, SectionKind, Table};

/// Sections up to this depth start expanded; deeper groups start collapsed.
const EXPANDED_DEPTH: usize = 2;

/// Node tree consumed by an interactive front end.
///
/// Carries presentation hints only (collapsible groups, badge tones, row hover);
/// every piece of content comes from the report tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractiveView {
    pub title: String,
    pub nodes: Vec<UiNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UiNode {
    Group {
        id: String,
        title: String,
        level: usize,
        section: SectionKind,
        expanded: bool,
        children: Vec<UiNode>,
    },
    Text {
        text: String,
    },
    Field {
        label: String,
        value: String,
    },
    Badge {
        text: String,
        tone: BadgeTone,
    },
    Callout {
        text: String,
    },
    List {
        items: Vec<UiListItem>,
    },
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
        hover_rows: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiListItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<UiListItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Success,
    Info,
    Warning,
}

impl From<RecommendationTier> for BadgeTone {
    fn from(tier: RecommendationTier) -> Self {
        match tier {
            RecommendationTier::HighlySuitable => Self::Success,
            RecommendationTier::Suitable => Self::Info,
            RecommendationTier::Other => Self::Warning,
        }
    }
}

struct Frame {
    id: String,
    title: String,
    level: usize,
    section: SectionKind,
    children: Vec<UiNode>,
}

#[derive(Default)]
pub struct InteractiveRenderer {
    title: String,
    nodes: Vec<UiNode>,
    stack: Vec<Frame>,
    issued_ids: HashSet<String>,
}

impl InteractiveRenderer {
    pub fn finish(mut self) -> InteractiveView {
        while let Some(frame) = self.stack.pop() {
            self.close(frame);
        }
        InteractiveView {
            title: self.title,
            nodes: self.nodes,
        }
    }

    fn push(&mut self, node: UiNode) {
        match self.stack.last_mut() {
            Some(frame) => frame.children.push(node),
            None => self.nodes.push(node),
        }
    }

    fn close(&mut self, frame: Frame) {
        let node = UiNode::Group {
            id: frame.id,
            title: frame.title,
            level: frame.level,
            section: frame.section,
            expanded: frame.level <= EXPANDED_DEPTH,
            children: frame.children,
        };
        self.push(node);
    }

    fn group_id(&mut self, heading: &str) -> String {
        let slug = slugify(heading);
        let base = match self.stack.last() {
            Some(parent) => format!("{}--{}", parent.id, slug),
            None => slug,
        };
        let mut id = base.clone();
        let mut suffix = 1;
        while self.issued_ids.contains(&id) {
            suffix += 1;
            id = format!("{}-{}", base, suffix);
        }
        self.issued_ids.insert(id.clone());
        id
    }
}

impl ReportVisitor for InteractiveRenderer {
    fn title(&mut self, text: &str) {
        self.title = text.to_string();
    }

    fn enter_section(&mut self, section: &Section, depth: usize) {
        let id = self.group_id(&section.heading);
        self.stack.push(Frame {
            id,
            title: section.heading.clone(),
            level: depth,
            section: section.kind,
            children: Vec::new(),
        });
    }

    fn leave_section(&mut self, _section: &Section, _depth: usize) {
        if let Some(frame) = self.stack.pop() {
            self.close(frame);
        }
    }

    fn paragraph(&mut self, text: &str, _depth: usize) {
        self.push(UiNode::Text {
            text: text.to_string(),
        });
    }

    fn field(&mut self, label: &str, value: &str, _depth: usize) {
        self.push(UiNode::Field {
            label: label.to_string(),
            value: value.to_string(),
        });
    }

    fn badge(&mut self, badge: RecommendationBadge<'_>, _depth: usize) {
        self.push(UiNode::Badge {
            text: badge.text.to_string(),
            tone: badge.tier.into(),
        });
    }

    fn note(&mut self, text: &str, _depth: usize) {
        self.push(UiNode::Callout {
            text: text.to_string(),
        });
    }

    fn list(&mut self, items: &[ListItem], _depth: usize) {
        self.push(UiNode::List {
            items: items.iter().map(to_ui_item).collect(),
        });
    }

    fn table(&mut self, table: &Table, _depth: usize) {
        self.push(UiNode::Table {
            columns: table.columns.clone(),
            rows: table.rows.clone(),
            hover_rows: true,
        });
    }
}

fn to_ui_item(item: &ListItem) -> UiListItem {
    UiListItem {
        text: item.text.clone(),
        children: item.children.iter().map(to_ui_item).collect(),
    }
}

fn slugify(heading: &str) -> String {
    let mut slug = heading
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>();
    while slug.contains("--") {
        slug = slug.replace("--", "-");
    }
    let trimmed = slug.trim_matches('-').to_string();
    if trimmed.is_empty() {
        "section".to_string()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::document::{Block, ReportDocument};
    use crate::report::render::render_interactive;

    fn document() -> ReportDocument {
        let candidate = |name: &str| {
            Section::new(SectionKind::Candidate, name).with(Block::Badge {
                text: "Suitable".to_string(),
                tier: RecommendationTier::Suitable,
            })
        };
        ReportDocument {
            title: "CV Evaluation Report".to_string(),
            sections: vec![Section::new(SectionKind::Candidates, "Candidates")
                .with(Block::Section(candidate("Ana Lima")))
                .with(Block::Section(candidate("Ana Lima")))],
        }
    }

    #[test]
    fn nests_groups_and_deduplicates_ids() {
        let view = render_interactive(&document());
        assert_eq!(view.title, "CV Evaluation Report");

        let UiNode::Group {
            id,
            expanded,
            children,
            ..
        } = &view.nodes[0]
        else {
            panic!("expected top-level group");
        };
        assert_eq!(id, "candidates");
        assert!(*expanded);

        let ids: Vec<&str> = children
            .iter()
            .filter_map(|node| match node {
                UiNode::Group { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec!["candidates--ana-lima", "candidates--ana-lima-2"]);
    }

    #[test]
    fn suffixed_ids_never_collide_with_later_headings() {
        let candidate = |name: &str| Block::Section(Section::new(SectionKind::Candidate, name));
        let document = ReportDocument {
            title: "CV Evaluation Report".to_string(),
            sections: vec![Section::new(SectionKind::Candidates, "Candidates")
                .with(candidate("Ana Lima"))
                .with(candidate("Ana Lima"))
                .with(candidate("Ana Lima 2"))],
        };

        let view = render_interactive(&document);
        let UiNode::Group { children, .. } = &view.nodes[0] else {
            panic!("expected top-level group");
        };
        let ids: Vec<&str> = children
            .iter()
            .filter_map(|node| match node {
                UiNode::Group { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            ids,
            vec![
                "candidates--ana-lima",
                "candidates--ana-lima-2",
                "candidates--ana-lima-2-2",
            ]
        );
    }

    #[test]
    fn badge_tone_follows_recommendation_tier() {
        let view = render_interactive(&document());
        let UiNode::Group { children, .. } = &view.nodes[0] else {
            panic!("expected top-level group");
        };
        let UiNode::Group {
            children: candidate,
            expanded,
            ..
        } = &children[0]
        else {
            panic!("expected candidate group");
        };

        assert!(*expanded);
        assert_eq!(
            candidate[0],
            UiNode::Badge {
                text: "Suitable".to_string(),
                tone: BadgeTone::Info,
            }
        );
    }

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Specific Skills & Competencies"), "specific-skills-competencies");
        assert_eq!(slugify("***"), "section");
    }
}
