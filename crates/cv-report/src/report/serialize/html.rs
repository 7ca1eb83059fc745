use std::fmt::Write as _;

use super::{DocumentSerializer, ExportError, ExportFormat};
use crate::report::render::{ExportBlock, ExportDocument, ExportListItem, ParagraphStyle};

const STYLESHEET: &str = "body{font-family:sans-serif;line-height:1.4}\
table{border-collapse:collapse;margin:0.5em 0}\
th,td{border:1px solid #444;padding:4px 8px;text-align:left;vertical-align:top}\
th{background:#eee}";

/// Standalone HTML page with bordered tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSerializer;

impl DocumentSerializer for HtmlSerializer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Html
    }

    fn serialize(&self, document: &ExportDocument) -> Result<Vec<u8>, ExportError> {
        Ok(render_html(document)?.into_bytes())
    }
}

fn render_html(document: &ExportDocument) -> Result<String, std::fmt::Error> {
    let mut html = String::new();
    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"en\">")?;
    writeln!(
        html,
        "<head><meta charset=\"utf-8\"><title>{}</title><style>{}</style></head>",
        escape_html(&document.title),
        STYLESHEET
    )?;
    writeln!(html, "<body>")?;

    for block in &document.blocks {
        match block {
            ExportBlock::Heading { level, text } => {
                writeln!(html, "<h{level}>{}</h{level}>", escape_html(text))?;
            }
            ExportBlock::Paragraph { text, style } => match style {
                ParagraphStyle::Plain => writeln!(html, "<p>{}</p>", escape_html(text))?,
                ParagraphStyle::Emphasis => {
                    writeln!(html, "<p><em>{}</em></p>", escape_html(text))?
                }
            },
            ExportBlock::Labeled { label, text } => {
                writeln!(
                    html,
                    "<p><strong>{}:</strong> {}</p>",
                    escape_html(label),
                    escape_html(text)
                )?;
            }
            ExportBlock::BulletList { items } => write_list(&mut html, items)?,
            ExportBlock::Table {
                header,
                rows,
                bordered,
            } => write_table(&mut html, header, rows, *bordered)?,
        }
    }

    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;
    Ok(html)
}

fn write_list(html: &mut String, items: &[ExportListItem]) -> std::fmt::Result {
    html.push_str("<ul>");
    for item in items {
        write!(html, "<li>{}", escape_html(&item.text))?;
        if !item.children.is_empty() {
            write_list(html, &item.children)?;
        }
        html.push_str("</li>");
    }
    writeln!(html, "</ul>")
}

fn write_table(
    html: &mut String,
    header: &[String],
    rows: &[Vec<String>],
    bordered: bool,
) -> std::fmt::Result {
    if bordered {
        html.push_str("<table border=\"1\">");
    } else {
        html.push_str("<table>");
    }

    html.push_str("<thead><tr>");
    for column in header {
        write!(html, "<th>{}</th>", escape_html(column))?;
    }
    html.push_str("</tr></thead><tbody>");

    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            write!(html, "<td>{}</td>", escape_html(cell))?;
        }
        html.push_str("</tr>");
    }
    writeln!(html, "</tbody></table>")
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '\n' => escaped.push_str("<br>"),
            other => escaped.push(other),
        }
    }
    escaped
}
