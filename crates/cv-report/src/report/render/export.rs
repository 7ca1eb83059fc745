use serde::Serialize;

use super::ReportVisitor;
use crate::report::document::{ListItem, RecommendationBadge, Section, Table};

/// Deepest heading level most document formats support.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Flat, format-neutral document body ready for a serializer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDocument {
    pub title: String,
    pub blocks: Vec<ExportBlock>,
}

impl ExportDocument {
    pub fn headings(&self) -> impl Iterator<Item = (u8, &str)> {
        self.blocks.iter().filter_map(|block| match block {
            ExportBlock::Heading { level, text } => Some((*level, text.as_str())),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = (&[String], &[Vec<String>])> {
        self.blocks.iter().filter_map(|block| match block {
            ExportBlock::Table { header, rows, .. } => Some((header.as_slice(), rows.as_slice())),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExportBlock {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
        style: ParagraphStyle,
    },
    Labeled {
        label: String,
        text: String,
    },
    BulletList {
        items: Vec<ExportListItem>,
    },
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
        bordered: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphStyle {
    Plain,
    Emphasis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportListItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ExportListItem>,
}

/// Builds an [`ExportDocument`]; the title is level 1 and a section at depth
/// `d` becomes a heading of level `d + 1`.
#[derive(Debug, Default)]
pub struct ExportRenderer {
    title: String,
    blocks: Vec<ExportBlock>,
}

impl ExportRenderer {
    pub fn finish(self) -> ExportDocument {
        ExportDocument {
            title: self.title,
            blocks: self.blocks,
        }
    }
}

fn heading_level(depth: usize) -> u8 {
    u8::try_from(depth + 1)
        .unwrap_or(MAX_HEADING_LEVEL)
        .min(MAX_HEADING_LEVEL)
}

impl ReportVisitor for ExportRenderer {
    fn title(&mut self, text: &str) {
        self.title = text.to_string();
        self.blocks.push(ExportBlock::Heading {
            level: 1,
            text: text.to_string(),
        });
    }

    fn enter_section(&mut self, section: &Section, depth: usize) {
        self.blocks.push(ExportBlock::Heading {
            level: heading_level(depth),
            text: section.heading.clone(),
        });
    }

    fn leave_section(&mut self, _section: &Section, _depth: usize) {}

    fn paragraph(&mut self, text: &str, _depth: usize) {
        self.blocks.push(ExportBlock::Paragraph {
            text: text.to_string(),
            style: ParagraphStyle::Plain,
        });
    }

    fn field(&mut self, label: &str, value: &str, _depth: usize) {
        self.blocks.push(ExportBlock::Labeled {
            label: label.to_string(),
            text: value.to_string(),
        });
    }

    fn badge(&mut self, badge: RecommendationBadge<'_>, _depth: usize) {
        self.blocks.push(ExportBlock::Labeled {
            label: "Recommendation".to_string(),
            text: badge.text.to_string(),
        });
    }

    fn note(&mut self, text: &str, _depth: usize) {
        self.blocks.push(ExportBlock::Paragraph {
            text: text.to_string(),
            style: ParagraphStyle::Emphasis,
        });
    }

    fn list(&mut self, items: &[ListItem], _depth: usize) {
        self.blocks.push(ExportBlock::BulletList {
            items: items.iter().map(to_export_item).collect(),
        });
    }

    fn table(&mut self, table: &Table, _depth: usize) {
        self.blocks.push(ExportBlock::Table {
            header: table.columns.clone(),
            rows: table.rows.clone(),
            bordered: true,
        });
    }
}

fn to_export_item(item: &ListItem) -> ExportListItem {
    ExportListItem {
        text: item.text.clone(),
        children: item.children.iter().map(to_export_item).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_levels_follow_depth_and_cap() {
        assert_eq!(heading_level(1), 2);
        assert_eq!(heading_level(3), 4);
        assert_eq!(heading_level(12), MAX_HEADING_LEVEL);
    }
}
