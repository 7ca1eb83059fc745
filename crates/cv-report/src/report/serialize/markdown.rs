use std::fmt::Write as _;

use super::{DocumentSerializer, ExportError, ExportFormat};
use crate::report::render::{ExportBlock, ExportDocument, ExportListItem, ParagraphStyle};

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownSerializer;

impl DocumentSerializer for MarkdownSerializer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Markdown
    }

    fn serialize(&self, document: &ExportDocument) -> Result<Vec<u8>, ExportError> {
        Ok(render_markdown(document)?.into_bytes())
    }
}

fn render_markdown(document: &ExportDocument) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    for (index, block) in document.blocks.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        match block {
            ExportBlock::Heading { level, text } => {
                writeln!(out, "{} {}", "#".repeat(usize::from(*level)), single_line(text))?;
            }
            ExportBlock::Paragraph { text, style } => match style {
                ParagraphStyle::Plain => writeln!(out, "{}", paragraph(text))?,
                ParagraphStyle::Emphasis => writeln!(out, "*{}*", single_line(text))?,
            },
            ExportBlock::Labeled { label, text } => {
                writeln!(out, "**{}:** {}", single_line(label), single_line(text))?;
            }
            ExportBlock::BulletList { items } => write_list(&mut out, items, 0)?,
            ExportBlock::Table { header, rows, .. } => write_table(&mut out, header, rows)?,
        }
    }

    Ok(out)
}

fn write_list(out: &mut String, items: &[ExportListItem], depth: usize) -> std::fmt::Result {
    for item in items {
        writeln!(out, "{}- {}", "  ".repeat(depth), single_line(&item.text))?;
        write_list(out, &item.children, depth + 1)?;
    }
    Ok(())
}

fn write_table(out: &mut String, header: &[String], rows: &[Vec<String>]) -> std::fmt::Result {
    let cells = |row: &[String]| {
        row.iter()
            .map(|cell| table_cell(cell))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    writeln!(out, "| {} |", cells(header))?;
    writeln!(out, "|{}", " --- |".repeat(header.len()))?;
    for row in rows {
        writeln!(out, "| {} |", cells(row))?;
    }
    Ok(())
}

fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Single line with a leading block marker escaped so scorer text cannot open
/// a heading, quote or list.
fn paragraph(text: &str) -> String {
    let line = single_line(text);
    match line.chars().next() {
        Some('#' | '>' | '-' | '+' | '*' | '=') => format!("\\{line}"),
        _ => line,
    }
}

fn table_cell(text: &str) -> String {
    single_line(text).replace('|', "\\|")
}
