//! Worksheet cell grid decoding.

use super::cell::{CellType, MAX_COLUMNS, MAX_ROWS, reference_to_coords, render_bool, render_number};
use super::shared_strings::SharedStrings;
use super::styles::CellStyles;
use crate::common::error::{Error, Result};
use crate::common::xml::{attr_value, push_reference, push_text};
use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use std::collections::BTreeMap;

/// Workbook-wide lookups needed to render cell values.
#[derive(Debug, Clone, Copy)]
pub struct SheetContext<'a> {
    pub shared_strings: &'a SharedStrings,
    pub styles: &'a CellStyles,
    /// Workbook uses the 1904 date system
    pub date1904: bool,
}

#[derive(Debug, Default)]
struct PendingCell {
    row: u32,
    col: u32,
    cell_type: CellType,
    style: usize,
    value: Option<String>,
    formula: Option<String>,
    inline: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    None,
    Value,
    Formula,
    Inline,
}

/// Decode the rows of a worksheet part into a grid of cell text.
///
/// The grid starts at `A1` and is as wide as the right-most column holding a
/// value; absent cells are empty strings. Rows without any value are left
/// out entirely.
///
/// A cell or row positioned past `XFD1048576`, explicitly or by counting
/// on from the previous one, is a `MalformedDocument`.
pub fn parse_rows(xml: &[u8], ctx: &SheetContext<'_>) -> Result<Vec<Vec<String>>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut cells: BTreeMap<u32, BTreeMap<u32, String>> = BTreeMap::new();
    let mut max_col = 0u32;
    let mut cur_row = 0u32;
    let mut cur_col = 0u32;
    let mut cell: Option<PendingCell> = None;
    let mut capture = Capture::None;
    let mut in_inline = false;
    let mut phonetic_depth = 0usize;

    let mut finish = |cell: PendingCell, max_col: &mut u32| {
        if let Some(text) = render_cell(&cell, ctx) {
            *max_col = (*max_col).max(cell.col);
            cells.entry(cell.row).or_default().insert(cell.col, text);
        }
    };

    loop {
        let event = reader.read_event_into(&mut buf)?;
        let is_empty = matches!(event, Event::Empty(_));
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => match e.local_name().as_ref() {
                b"row" => {
                    cur_row = row_number(e, reader.decoder())?.unwrap_or(cur_row + 1);
                    cur_col = 0;
                },
                b"c" => {
                    let pending = start_cell(e, reader.decoder(), cur_row.max(1), cur_col + 1)?;
                    cur_col = pending.col;
                    if is_empty {
                        finish(pending, &mut max_col);
                    } else {
                        cell = Some(pending);
                    }
                },
                b"v" if !is_empty => {
                    capture = Capture::Value;
                    if let Some(c) = cell.as_mut() {
                        c.value = Some(String::new());
                    }
                },
                b"f" if !is_empty => {
                    capture = Capture::Formula;
                    if let Some(c) = cell.as_mut() {
                        c.formula = Some(String::new());
                    }
                },
                b"is" if !is_empty => in_inline = true,
                b"rPh" if !is_empty => phonetic_depth += 1,
                b"t" if !is_empty && in_inline && phonetic_depth == 0 => {
                    capture = Capture::Inline;
                    if let Some(c) = cell.as_mut() {
                        c.inline.get_or_insert_with(String::new);
                    }
                },
                _ => {},
            },
            Event::End(ref e) => match e.local_name().as_ref() {
                b"v" | b"f" | b"t" => capture = Capture::None,
                b"is" => in_inline = false,
                b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                b"c" => {
                    capture = Capture::None;
                    if let Some(pending) = cell.take() {
                        finish(pending, &mut max_col);
                    }
                },
                _ => {},
            },
            Event::Text(ref e) => {
                if let Some(target) = capture_target(cell.as_mut(), capture) {
                    push_text(target, e)?;
                }
            },
            Event::GeneralRef(ref e) => {
                if let Some(target) = capture_target(cell.as_mut(), capture) {
                    push_reference(target, e)?;
                }
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    let width = max_col as usize;
    Ok(cells
        .into_values()
        .map(|row| {
            let mut out = vec![String::new(); width];
            for (col, text) in row {
                out[col as usize - 1] = text;
            }
            out
        })
        .collect())
}

fn row_number(e: &BytesStart<'_>, decoder: Decoder) -> Result<Option<u32>> {
    let row = attr_value(e, b"r", decoder)?
        .and_then(|r| atoi_simd::parse::<u64>(r.trim().as_bytes()).ok())
        .filter(|&r| r > 0);
    match row {
        Some(r) if r > u64::from(MAX_ROWS) => Err(out_of_range(&format!("row {r}"))),
        Some(r) => Ok(Some(r as u32)),
        None => Ok(None),
    }
}

fn out_of_range(position: &str) -> Error {
    Error::MalformedDocument(format!("cell position {position} is outside the worksheet grid"))
}

fn start_cell(
    e: &BytesStart<'_>,
    decoder: Decoder,
    default_row: u32,
    default_col: u32,
) -> Result<PendingCell> {
    let (col, row) = match attr_value(e, b"r", decoder)? {
        Some(reference) => reference_to_coords(&reference).ok_or_else(|| out_of_range(&reference))?,
        None if default_col > MAX_COLUMNS || default_row > MAX_ROWS => {
            return Err(out_of_range(&format!("R{default_row}C{default_col}")));
        },
        None => (default_col, default_row),
    };
    let cell_type = CellType::from_attr(attr_value(e, b"t", decoder)?.as_deref());
    let style = attr_value(e, b"s", decoder)?
        .and_then(|s| atoi_simd::parse::<usize>(s.as_bytes()).ok())
        .unwrap_or(0);

    Ok(PendingCell {
        row,
        col,
        cell_type,
        style,
        ..PendingCell::default()
    })
}

fn capture_target(cell: Option<&mut PendingCell>, capture: Capture) -> Option<&mut String> {
    let cell = cell?;
    match capture {
        Capture::None => None,
        Capture::Value => cell.value.as_mut(),
        Capture::Formula => cell.formula.as_mut(),
        Capture::Inline => cell.inline.as_mut(),
    }
}

/// Text of a finished cell, or `None` when it holds no value.
fn render_cell(cell: &PendingCell, ctx: &SheetContext<'_>) -> Option<String> {
    if let Some(formula) = cell.formula.as_deref().filter(|f| !f.trim().is_empty()) {
        return Some(format!("={formula}"));
    }

    let text = match cell.cell_type {
        CellType::InlineString => cell.inline.clone().or_else(|| cell.value.clone())?,
        CellType::SharedString => {
            let index = atoi_simd::parse::<usize>(cell.value.as_deref()?.trim().as_bytes()).ok()?;
            ctx.shared_strings.get(index)?.to_string()
        },
        CellType::Boolean => render_bool(cell.value.as_deref()?),
        CellType::FormulaString | CellType::Error | CellType::Date => cell.value.clone()?,
        CellType::Number => render_number(
            cell.value.as_deref()?,
            ctx.styles.kind(cell.style),
            ctx.date1904,
        ),
    };
    (!text.is_empty()).then_some(text)
}
