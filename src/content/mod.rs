//! Composite rendering of a document's text, tables and workbooks.
//!
//! The composite is a plain-text view meant for display or for feeding a
//! downstream consumer with a size limit. Sections always appear in the
//! order text, tables, workbooks, and a section with nothing to show is left
//! out. The preview is a character slice of the full rendering; it may cut a
//! section mid-way.

use crate::common::error::ItemResult;
use crate::common::options::ExtractOptions;
use crate::ooxml::docx::Table;
use crate::ooxml::xlsx::Workbook;
use serde::Serialize;

pub const TEXT_LABEL: &str = "=== Text ===";
pub const TABLES_LABEL: &str = "=== Tables ===";
pub const WORKBOOKS_LABEL: &str = "=== Embedded Workbooks ===";

/// Rendered composite and its bounded preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositeContent {
    /// Full rendering, never truncated
    #[serde(skip)]
    pub full: String,
    /// Length of `full` in characters
    pub chars: usize,
    /// First `max_chars` characters of `full`
    pub preview: String,
    pub truncated: bool,
}

impl CompositeContent {
    /// Build from a full rendering, slicing the preview by characters.
    pub fn new(full: String, max_chars: usize) -> Self {
        let chars = full.chars().count();
        let preview = truncate_chars(&full, max_chars).to_string();
        Self {
            chars,
            preview,
            truncated: chars > max_chars,
            full,
        }
    }

    /// Whether the document had nothing to render.
    pub fn is_empty(&self) -> bool {
        self.full.is_empty()
    }
}

/// Merge text, tables and workbooks into one composite.
pub fn aggregate(
    text: &str,
    tables: &[Table],
    workbooks: &[ItemResult<Workbook>],
    options: &ExtractOptions,
) -> CompositeContent {
    let mut lines: Vec<String> = Vec::new();

    if !text.trim().is_empty() {
        lines.push(format!("{TEXT_LABEL}\n{text}"));
    }

    if !tables.is_empty() {
        lines.push(TABLES_LABEL.to_string());
        for table in tables {
            lines.push(format!(
                "\nTable {} ({} rows x {} columns):",
                table.index, table.rows, table.columns
            ));
            lines.extend(table.data.iter().map(|row| row.join(" | ")));
        }
    }

    if !workbooks.is_empty() {
        lines.push(WORKBOOKS_LABEL.to_string());
        for workbook in workbooks {
            match workbook {
                Ok(workbook) => render_workbook(&mut lines, workbook, options.preview_rows),
                Err(e) => lines.push(format!("Workbook read error: {}", e.message)),
            }
        }
    }

    let full = lines.join("\n");
    let full = if full.trim().is_empty() { String::new() } else { full };
    CompositeContent::new(full, options.max_chars)
}

fn render_workbook(lines: &mut Vec<String>, workbook: &Workbook, preview_rows: usize) {
    lines.push(format!("\nWorkbook: {}", workbook.name));
    for sheet in &workbook.sheets {
        lines.push(format!(
            "  Sheet: {} ({} rows x {} columns)",
            sheet.name, sheet.rows, sheet.columns
        ));
        for row in sheet.data.iter().take(preview_rows) {
            lines.push(format!("    {}", row.join(" | ")));
        }
        if sheet.data.len() > preview_rows {
            lines.push(format!("    ... ({} more rows)", sheet.data.len() - preview_rows));
        }
    }
}

/// The first `max_chars` characters of `s`.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
