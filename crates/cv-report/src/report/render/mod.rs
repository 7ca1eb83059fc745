//! Renderers over the assembled report tree.
//!
//! Both renderers are [`ReportVisitor`]s driven by [`walk`], so the interactive
//! view and the export see the same nodes in the same order.

pub mod export;
pub mod interactive;

use super::document::{Block, ListItem, RecommendationBadge, ReportDocument, Section, Table};

pub use export::{ExportBlock, ExportDocument, ExportListItem, ExportRenderer, ParagraphStyle};
pub use interactive::{BadgeTone, InteractiveRenderer, InteractiveView, UiListItem, UiNode};

/// Callbacks for a depth-first traversal of a [`ReportDocument`].
///
/// `depth` is 1 for top-level sections and grows by one per nested section.
pub trait ReportVisitor {
    fn title(&mut self, text: &str);
    fn enter_section(&mut self, section: &Section, depth: usize);
    fn leave_section(&mut self, section: &Section, depth: usize);
    fn paragraph(&mut self, text: &str, depth: usize);
    fn field(&mut self, label: &str, value: &str, depth: usize);
    fn badge(&mut self, badge: RecommendationBadge<'_>, depth: usize);
    fn note(&mut self, text: &str, depth: usize);
    fn list(&mut self, items: &[ListItem], depth: usize);
    fn table(&mut self, table: &Table, depth: usize);
}

pub fn walk<V: ReportVisitor + ?Sized>(document: &ReportDocument, visitor: &mut V) {
    visitor.title(&document.title);
    for section in &document.sections {
        walk_section(section, 1, visitor);
    }
}

fn walk_section<V: ReportVisitor + ?Sized>(section: &Section, depth: usize, visitor: &mut V) {
    visitor.enter_section(section, depth);
    for block in &section.blocks {
        match block {
            Block::Paragraph { text } => visitor.paragraph(text, depth),
            Block::Field { label, value } => visitor.field(label, value, depth),
            Block::Badge { text, tier } => visitor.badge(
                RecommendationBadge {
                    text: text.as_str(),
                    tier: *tier,
                },
                depth,
            ),
            Block::Note { text } => visitor.note(text, depth),
            Block::List { items } => visitor.list(items, depth),
            Block::Table(table) => visitor.table(table, depth),
            Block::Section(child) => walk_section(child, depth + 1, visitor),
        }
    }
    visitor.leave_section(section, depth);
}

/// Forwards every callback to two visitors, in order.
struct Tee<'a, A: ?Sized, B: ?Sized> {
    first: &'a mut A,
    second: &'a mut B,
}

impl<A, B> ReportVisitor for Tee<'_, A, B>
where
    A: ReportVisitor + ?Sized,
    B: ReportVisitor + ?Sized,
{
    fn title(&mut self, text: &str) {
        self.first.title(text);
        self.second.title(text);
    }

    fn enter_section(&mut self, section: &Section, depth: usize) {
        self.first.enter_section(section, depth);
        self.second.enter_section(section, depth);
    }

    fn leave_section(&mut self, section: &Section, depth: usize) {
        self.first.leave_section(section, depth);
        self.second.leave_section(section, depth);
    }

    fn paragraph(&mut self, text: &str, depth: usize) {
        self.first.paragraph(text, depth);
        self.second.paragraph(text, depth);
    }

    fn field(&mut self, label: &str, value: &str, depth: usize) {
        self.first.field(label, value, depth);
        self.second.field(label, value, depth);
    }

    fn badge(&mut self, badge: RecommendationBadge<'_>, depth: usize) {
        self.first.badge(badge, depth);
        self.second.badge(badge, depth);
    }

    fn note(&mut self, text: &str, depth: usize) {
        self.first.note(text, depth);
        self.second.note(text, depth);
    }

    fn list(&mut self, items: &[ListItem], depth: usize) {
        self.first.list(items, depth);
        self.second.list(items, depth);
    }

    fn table(&mut self, table: &Table, depth: usize) {
        self.first.table(table, depth);
        self.second.table(table, depth);
    }
}

/// Interactive view and export document produced by a single traversal.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub interactive: InteractiveView,
    pub export: ExportDocument,
}

pub fn render(document: &ReportDocument) -> RenderedReport {
    let mut interactive = InteractiveRenderer::default();
    let mut export = ExportRenderer::default();
    walk(
        document,
        &mut Tee {
            first: &mut interactive,
            second: &mut export,
        },
    );

    RenderedReport {
        interactive: interactive.finish(),
        export: export.finish(),
    }
}

pub fn render_interactive(document: &ReportDocument) -> InteractiveView {
    let mut renderer = InteractiveRenderer::default();
    walk(document, &mut renderer);
    renderer.finish()
}

/// Export-only rendering; needs nothing beyond the document itself.
pub fn render_export(document: &ReportDocument) -> ExportDocument {
    let mut renderer = ExportRenderer::default();
    walk(document, &mut renderer);
    renderer.finish()
}
